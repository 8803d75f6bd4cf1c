//! Chunked generation of orders and their line items.
//!
//! Orders are written in id ranges of at most `chunk_size` rows, each range
//! producing a pair of files (`orders_<start>_<end>.csv` and
//! `order_items_<start>_<end>.csv`). Only one chunk's rows are ever in
//! flight, so memory stays flat no matter how many orders are requested.
//!
//! Item ids are global across chunks. The counter is passed into
//! [`generate_order_chunk`] and the advanced value is returned, so the
//! driver owns the only copy.

use std::path::{Path, PathBuf};

use crate::datagen::random::{RandomSource, TimeWindow};
use crate::datagen::records::{Money, OrderItemRow, OrderRow};
use crate::error::GenerateError;
use crate::fs_utils::{create_csv, csv_err, finish_csv};

pub const MIN_ITEMS_PER_ORDER: u32 = 1;
pub const MAX_ITEMS_PER_ORDER: u32 = 5;

/// Last order-item id handed out (0 before the first item)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ItemIdCounter(u64);

impl ItemIdCounter {
    pub fn new() -> Self {
        ItemIdCounter(0)
    }

    pub fn last_issued(&self) -> u64 {
        self.0
    }

    fn next_id(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

/// Inclusive range of order ids covered by one chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start: u64,
    pub end: u64,
}

impl ChunkRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    pub fn orders_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("orders_{}_{}.csv", self.start, self.end))
    }

    pub fn items_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("order_items_{}_{}.csv", self.start, self.end))
    }
}

/// Split `1..=total` into consecutive ranges of at most `chunk_size` ids
pub fn chunk_ranges(total: u64, chunk_size: u64) -> impl Iterator<Item = ChunkRange> {
    let step = chunk_size.max(1);
    let mut start = 1u64;

    std::iter::from_fn(move || {
        if start > total {
            return None;
        }
        let end = total.min(start.saturating_add(step - 1));
        let range = ChunkRange { start, end };
        start = end + 1;
        Some(range)
    })
}

/// Foreign-key bounds and time window for the orders in a chunk
#[derive(Debug, Clone, Copy)]
pub struct OrderDomain {
    pub customers: u64,
    pub products: u64,
    pub window: TimeWindow,
}

/// Rows written for a single chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkStats {
    pub orders: u64,
    pub items: u64,
}

/// Write one chunk of orders and their items, returning the advanced item counter.
pub fn generate_order_chunk(
    dir: &Path,
    range: ChunkRange,
    domain: &OrderDomain,
    rng: &mut RandomSource,
    counter: ItemIdCounter,
) -> Result<(ItemIdCounter, ChunkStats), GenerateError> {
    let orders_path = range.orders_file(dir);
    let items_path = range.items_file(dir);

    let mut orders = create_csv(&orders_path)?;
    let mut items = create_csv(&items_path)?;
    let mut counter = counter;
    let first_item = counter.last_issued();

    for order_id in range.start..=range.end {
        let order_datetime = rng.timestamp(&domain.window);
        let order = OrderRow {
            id: order_id,
            customer_id: rng.id_up_to(domain.customers),
            order_datetime,
            status: rng.status(),
            total_amount: Money::ZERO,
        };
        orders.serialize(&order).map_err(csv_err(&orders_path))?;

        let item_count = rng.int_between(MIN_ITEMS_PER_ORDER, MAX_ITEMS_PER_ORDER);
        for _ in 0..item_count {
            let item = OrderItemRow {
                id: counter.next_id(),
                order_id,
                order_datetime,
                product_id: rng.id_up_to(domain.products),
                quantity: rng.int_between(1, 4),
                price: rng.money(5.0, 500.0),
            };
            items.serialize(&item).map_err(csv_err(&items_path))?;
        }
    }

    finish_csv(orders, &orders_path)?;
    finish_csv(items, &items_path)?;

    let stats = ChunkStats {
        orders: range.len(),
        items: counter.last_issued() - first_item,
    };
    tracing::info!(
        "Wrote chunk orders: {} and items: {} (items so far: {})",
        orders_path.display(),
        items_path.display(),
        counter.last_issued()
    );

    Ok((counter, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn domain() -> OrderDomain {
        let anchor = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        OrderDomain {
            customers: 10,
            products: 5,
            window: TimeWindow::trailing_months(anchor, 24).unwrap(),
        }
    }

    #[test]
    fn test_chunk_ranges_tile_exactly() {
        for (total, chunk) in [(25u64, 10u64), (30, 10), (1, 100), (7, 1), (100_000, 33_333)] {
            let ranges: Vec<ChunkRange> = chunk_ranges(total, chunk).collect();
            assert_eq!(ranges.len() as u64, total.div_ceil(chunk));

            let mut expected_start = 1;
            for range in &ranges {
                assert_eq!(range.start, expected_start);
                assert!(range.len() <= chunk);
                expected_start = range.end + 1;
            }
            assert_eq!(expected_start, total + 1);
        }
    }

    #[test]
    fn test_chunk_ranges_for_zero_orders() {
        assert_eq!(chunk_ranges(0, 10).count(), 0);
    }

    #[test]
    fn test_chunk_file_names() {
        let range = ChunkRange { start: 21, end: 25 };
        let dir = Path::new("/data");
        assert_eq!(range.orders_file(dir), PathBuf::from("/data/orders_21_25.csv"));
        assert_eq!(range.items_file(dir), PathBuf::from("/data/order_items_21_25.csv"));
    }

    #[test]
    fn test_counter_is_threaded_between_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = RandomSource::from_seed(42);
        let domain = domain();

        let mut counter = ItemIdCounter::new();
        let mut total_items = 0;
        for range in chunk_ranges(25, 10) {
            let (next, stats) =
                generate_order_chunk(dir.path(), range, &domain, &mut rng, counter).unwrap();
            assert_eq!(next.last_issued(), counter.last_issued() + stats.items);
            assert!(stats.items >= stats.orders && stats.items <= stats.orders * 5);
            total_items += stats.items;
            counter = next;
        }
        assert_eq!(counter.last_issued(), total_items);

        let mut expected_id = 1u64;
        for range in chunk_ranges(25, 10) {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(false)
                .from_path(range.items_file(dir.path()))
                .unwrap();
            for record in reader.records() {
                let record = record.unwrap();
                assert_eq!(record[0].parse::<u64>().unwrap(), expected_id);
                let order_id: u64 = record[1].parse().unwrap();
                assert!(order_id >= range.start && order_id <= range.end);
                expected_id += 1;
            }
        }
        assert_eq!(expected_id - 1, total_items);
    }

    #[test]
    fn test_items_copy_parent_datetime() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = RandomSource::from_seed(1);
        let range = ChunkRange { start: 1, end: 20 };

        generate_order_chunk(dir.path(), range, &domain(), &mut rng, ItemIdCounter::new())
            .unwrap();

        let orders: Vec<csv::StringRecord> = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(range.orders_file(dir.path()))
            .unwrap()
            .records()
            .map(|r| r.unwrap())
            .collect();
        let mut items = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(range.items_file(dir.path()))
            .unwrap();

        for item in items.records() {
            let item = item.unwrap();
            let order_id: usize = item[1].parse().unwrap();
            assert_eq!(&item[2], &orders[order_id - 1][2]);
        }
        for order in &orders {
            assert_eq!(&order[4], "0.00");
        }
    }
}
