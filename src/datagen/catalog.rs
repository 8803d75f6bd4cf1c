//! Writers for the reference tables: customers, categories, products and inventory.

use std::collections::HashSet;
use std::path::Path;

use crate::datagen::random::{RandomSource, TimeWindow};
use crate::datagen::records::{CategoryRow, CustomerRow, InventoryRow, ProductRow};
use crate::error::GenerateError;
use crate::fs_utils::{create_csv, csv_err, finish_csv};

/// Re-draws allowed before giving up on a unique address
const MAX_EMAIL_ATTEMPTS: u32 = 8;

pub const WAREHOUSE_COUNT: u32 = 200;

pub fn write_customers(
    path: &Path,
    count: u64,
    rng: &mut RandomSource,
    window: &TimeWindow,
) -> Result<u64, GenerateError> {
    tracing::info!("Generating {} customers -> {}", count, path.display());
    let mut writer = create_csv(path)?;
    let mut emails = EmailRegistry::default();

    for id in 1..=count {
        let name = rng.person_name();
        let email = emails.issue(rng, id)?;
        let country = rng.country();
        let created_at = rng.timestamp(window);

        writer
            .serialize(CustomerRow { id, name, email, country, created_at })
            .map_err(csv_err(path))?;
    }

    finish_csv(writer, path)?;
    if emails.redraws > 0 {
        tracing::debug!("{} email redraws for {} customers", emails.redraws, count);
    }
    Ok(count)
}

/// Hands out customer emails, refusing any address already issued
#[derive(Debug, Default)]
struct EmailRegistry {
    seen: HashSet<String>,
    redraws: u64,
}

impl EmailRegistry {
    fn issue(&mut self, rng: &mut RandomSource, customer_id: u64) -> Result<String, GenerateError> {
        for _ in 0..MAX_EMAIL_ATTEMPTS {
            let email = rng.customer_email(customer_id);
            if self.seen.insert(email.clone()) {
                return Ok(email);
            }
            self.redraws += 1;
        }

        Err(GenerateError::UniqueExhausted {
            customer_id,
            attempts: MAX_EMAIL_ATTEMPTS,
        })
    }
}

pub fn write_categories(path: &Path, count: u64) -> Result<u64, GenerateError> {
    tracing::info!("Generating {} categories -> {}", count, path.display());
    let mut writer = create_csv(path)?;

    for id in 1..=count {
        writer
            .serialize(CategoryRow { id, name: format!("Category {}", id) })
            .map_err(csv_err(path))?;
    }

    finish_csv(writer, path)?;
    Ok(count)
}

pub fn write_products(
    path: &Path,
    count: u64,
    categories: u64,
    rng: &mut RandomSource,
) -> Result<u64, GenerateError> {
    tracing::info!("Generating {} products -> {}", count, path.display());
    let mut writer = create_csv(path)?;

    for id in 1..=count {
        let name = rng.product_name();
        let price = rng.money(5.0, 2000.0);
        let category_id = rng.id_up_to(categories);

        writer
            .serialize(ProductRow { id, name, price, category_id })
            .map_err(csv_err(path))?;
    }

    finish_csv(writer, path)?;
    Ok(count)
}

pub fn write_inventory(
    path: &Path,
    products: u64,
    rng: &mut RandomSource,
    window: &TimeWindow,
) -> Result<u64, GenerateError> {
    tracing::info!("Generating inventory -> {}", path.display());
    let mut writer = create_csv(path)?;

    for product_id in 1..=products {
        let warehouse = format!("WH-{}", rng.int_between(1, WAREHOUSE_COUNT));
        let quantity = rng.int_between(0, 1000);
        let updated_at = rng.timestamp(window);

        writer
            .serialize(InventoryRow { product_id, warehouse, quantity, updated_at })
            .map_err(csv_err(path))?;
    }

    finish_csv(writer, path)?;
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::fs;

    fn window() -> TimeWindow {
        let anchor = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TimeWindow::trailing_months(anchor, 60).unwrap()
    }

    fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_customer_emails_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("customers.csv");
        let mut rng = RandomSource::from_seed(42);

        write_customers(&path, 500, &mut rng, &window()).unwrap();

        let rows = read_rows(&path);
        assert_eq!(rows.len(), 500);
        let emails: HashSet<&str> = rows.iter().map(|r| &r[2]).collect();
        assert_eq!(emails.len(), 500);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 5);
            assert_eq!(row[0].parse::<u64>().unwrap(), i as u64 + 1);
        }
    }

    #[test]
    fn test_email_space_holds_tens_of_thousands_of_customers() {
        let mut rng = RandomSource::from_seed(42);
        let mut emails = EmailRegistry::default();

        for id in 1..=25_000 {
            emails.issue(&mut rng, id).unwrap();
        }

        assert_eq!(emails.seen.len(), 25_000);
        assert_eq!(emails.redraws, 0);
    }

    #[test]
    fn test_email_registry_gives_up_after_repeated_collisions() {
        let mut rng = RandomSource::from_seed(9);
        let mut emails = EmailRegistry::default();

        // Pre-register everything the next attempts for customer 77 would produce.
        let mut replay = RandomSource::from_seed(9);
        for _ in 0..MAX_EMAIL_ATTEMPTS {
            emails.seen.insert(replay.customer_email(77));
        }

        let err = emails.issue(&mut rng, 77).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UniqueExhausted { customer_id: 77, attempts: MAX_EMAIL_ATTEMPTS }
        ));
        assert_eq!(emails.redraws, MAX_EMAIL_ATTEMPTS as u64);
    }

    #[test]
    fn test_categories_are_named_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.csv");

        write_categories(&path, 3).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1,Category 1\n2,Category 2\n3,Category 3\n"
        );
    }

    #[test]
    fn test_products_reference_existing_categories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.csv");
        let mut rng = RandomSource::from_seed(42);

        write_products(&path, 200, 4, &mut rng).unwrap();

        for row in read_rows(&path) {
            let price: f64 = row[2].parse().unwrap();
            assert!((5.0..=2000.0).contains(&price));
            assert_eq!(row[2].split('.').nth(1).unwrap().len(), 2);
            let category: u64 = row[3].parse().unwrap();
            assert!((1..=4).contains(&category));
        }
    }

    #[test]
    fn test_inventory_warehouses_are_bounded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.csv");
        let mut rng = RandomSource::from_seed(42);

        assert_eq!(write_inventory(&path, 300, &mut rng, &window()).unwrap(), 300);

        for row in read_rows(&path) {
            let n: u32 = row[1].strip_prefix("WH-").unwrap().parse().unwrap();
            assert!((1..=WAREHOUSE_COUNT).contains(&n));
            let qty: u32 = row[2].parse().unwrap();
            assert!(qty <= 1000);
        }
    }
}
