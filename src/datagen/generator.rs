//! Generation driver: writes every table in a fixed order from one seeded source.

use std::path::PathBuf;

use crate::config::GeneratorConfig;
use crate::datagen::catalog::{write_categories, write_customers, write_inventory, write_products};
use crate::datagen::fulfillment::{write_payments, write_shipments};
use crate::datagen::orders::{chunk_ranges, generate_order_chunk, ItemIdCounter, OrderDomain};
use crate::datagen::random::{RandomSource, TimeWindow};
use crate::error::{ConfigError, GenerateError};
use crate::fs_utils::ensure_dir;

/// Customer sign-ups span the five years before the anchor
pub const CUSTOMER_HISTORY_MONTHS: u32 = 60;
/// Orders, payments, shipments and stock updates span the two years before it
pub const ACTIVITY_HISTORY_MONTHS: u32 = 24;

/// Row counts for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub out_dir: PathBuf,
    pub customers: u64,
    pub categories: u64,
    pub products: u64,
    pub orders: u64,
    pub order_items: u64,
    pub chunks: u64,
    pub payments: u64,
    pub shipments: u64,
    pub inventory: u64,
}

/// Generate the full dataset described by `config`.
///
/// The random source is consumed in file order (customers, categories,
/// products, order chunks, payments, shipments, inventory); changing that
/// order changes the output for the same seed.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationSummary, GenerateError> {
    config.validate()?;
    let customer_window = trailing(config, CUSTOMER_HISTORY_MONTHS)?;
    let activity_window = trailing(config, ACTIVITY_HISTORY_MONTHS)?;

    let out = config.out_dir.as_path();
    ensure_dir(out)?;

    tracing::info!("Output directory: {}", out.display());
    tracing::info!(
        "Counts: {} customers, {} products, {} orders (seed {}, anchor {})",
        config.customers,
        config.products,
        config.orders,
        config.seed,
        config.anchor
    );

    let mut rng = RandomSource::from_seed(config.seed);

    let customers = write_customers(
        &out.join("customers.csv"),
        config.customers,
        &mut rng,
        &customer_window,
    )?;
    let categories = write_categories(&out.join("categories.csv"), config.categories)?;
    let products = write_products(
        &out.join("products.csv"),
        config.products,
        config.categories,
        &mut rng,
    )?;

    let domain = OrderDomain {
        customers: config.customers,
        products: config.products,
        window: activity_window,
    };
    let mut counter = ItemIdCounter::new();
    let mut chunks = 0;
    for range in chunk_ranges(config.orders, config.chunk_size) {
        let (next, _) = generate_order_chunk(out, range, &domain, &mut rng, counter)?;
        counter = next;
        chunks += 1;
    }

    let payments = write_payments(
        &out.join("payments.csv"),
        config.orders,
        &mut rng,
        &activity_window,
    )?;
    let shipments = write_shipments(
        &out.join("shipments.csv"),
        config.orders,
        &mut rng,
        &activity_window,
    )?;
    let inventory = write_inventory(
        &out.join("inventory.csv"),
        config.products,
        &mut rng,
        &activity_window,
    )?;

    tracing::info!("Data generation complete: {}", out.display());

    Ok(GenerationSummary {
        out_dir: config.out_dir.clone(),
        customers,
        categories,
        products,
        orders: config.orders,
        order_items: counter.last_issued(),
        chunks,
        payments,
        shipments,
        inventory,
    })
}

fn trailing(config: &GeneratorConfig, months: u32) -> Result<TimeWindow, GenerateError> {
    TimeWindow::trailing_months(config.anchor, months).ok_or_else(|| {
        GenerateError::Config(ConfigError::Invalid(format!(
            "anchor {} leaves no room for a {}-month history",
            config.anchor, months
        )))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_anchor;
    use chrono::NaiveDate;

    #[test]
    fn test_invalid_config_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never-created");
        let config = GeneratorConfig {
            out_dir: out.clone(),
            chunk_size: 0,
            ..GeneratorConfig::default()
        };

        assert!(matches!(generate(&config), Err(GenerateError::Config(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_anchor_without_history_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("never-created");
        let config = GeneratorConfig {
            out_dir: out.clone(),
            anchor: NaiveDate::MIN.and_hms_opt(0, 0, 0).unwrap(),
            ..GeneratorConfig::default()
        };

        let err = generate(&config).unwrap_err();
        assert!(matches!(err, GenerateError::Config(ConfigError::Invalid(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_zero_orders_still_writes_empty_order_tables() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            out_dir: dir.path().to_path_buf(),
            customers: 3,
            categories: 1,
            products: 2,
            orders: 0,
            chunk_size: 10,
            seed: 1,
            anchor: parse_anchor("2025-01-01 00:00:00").unwrap(),
        };

        let summary = generate(&config).unwrap();
        assert_eq!(summary.chunks, 0);
        assert_eq!(summary.order_items, 0);
        assert_eq!(summary.payments, 0);
        assert_eq!(std::fs::read_to_string(dir.path().join("payments.csv")).unwrap(), "");
        assert_eq!(std::fs::read_to_string(dir.path().join("shipments.csv")).unwrap(), "");
    }
}
