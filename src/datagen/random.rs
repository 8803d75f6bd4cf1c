//! Seeded random source shared by every table writer.
//!
//! One `ChaCha8Rng` drives everything, including the fake names and emails,
//! so a run is reproducible from its seed, anchor and counts as long as the
//! tables are generated in the same order.

use chrono::{Duration, Months, NaiveDateTime};
use convert_case::{Case, Casing};
use fake::faker::address::en::CountryName;
use fake::faker::internet::en::{FreeEmailProvider, Username};
use fake::faker::lorem::en::Words;
use fake::faker::name::en::Name;
use fake::Fake;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::datagen::records::{Money, OrderStatus, Timestamp};

/// A closed interval of timestamps ending at an anchor instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Window covering the `months` calendar months before `anchor`
    pub fn trailing_months(anchor: NaiveDateTime, months: u32) -> Option<Self> {
        let start = anchor.checked_sub_months(Months::new(months))?;
        Some(TimeWindow { start, end: anchor })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    fn span_secs(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }
}

pub struct RandomSource {
    rng: ChaCha8Rng,
    statuses: WeightedIndex<f64>,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> Self {
        let statuses = WeightedIndex::new(OrderStatus::WEIGHTS)
            .expect("order status weights are positive constants");

        RandomSource {
            rng: ChaCha8Rng::seed_from_u64(seed),
            statuses,
        }
    }

    /// Uniform id in `1..=max`
    pub fn id_up_to(&mut self, max: u64) -> u64 {
        self.rng.gen_range(1..=max)
    }

    pub fn int_between(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }

    /// Uniform amount in `[low, high]`, rounded to cents
    pub fn money(&mut self, low: f64, high: f64) -> Money {
        let raw: f64 = self.rng.gen_range(low..=high);
        Money((raw * 100.0).round() / 100.0)
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    pub fn pick<T: Copy>(&mut self, choices: &[T]) -> T {
        choices[self.rng.gen_range(0..choices.len())]
    }

    pub fn status(&mut self) -> OrderStatus {
        OrderStatus::ALL[self.statuses.sample(&mut self.rng)]
    }

    /// Uniform second-resolution instant inside `window`
    pub fn timestamp(&mut self, window: &TimeWindow) -> Timestamp {
        let offset = self.rng.gen_range(0..=window.span_secs());
        Timestamp(window.start + Duration::seconds(offset))
    }

    pub fn person_name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }

    /// `<username>.<customer_id>@<free provider>`; the id keeps addresses
    /// distinct past the size of the fake username vocabulary
    pub fn customer_email(&mut self, customer_id: u64) -> String {
        let username: String = Username().fake_with_rng(&mut self.rng);
        let provider: String = FreeEmailProvider().fake_with_rng(&mut self.rng);

        let mut local: String = username
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if local.is_empty() {
            local.push_str("customer");
        }
        format!("{}.{}@{}", local, customer_id, provider)
    }

    pub fn country(&mut self) -> String {
        CountryName().fake_with_rng(&mut self.rng)
    }

    /// Three title-cased lorem words
    pub fn product_name(&mut self) -> String {
        let words: Vec<String> = Words(3..4).fake_with_rng(&mut self.rng);
        words.join(" ").to_case(Case::Title)
    }

    /// Random (v4 layout) UUID drawn from the seeded stream
    pub fn tracking_id(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }
}
