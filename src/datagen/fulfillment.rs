//! Payments and shipments, keyed by order id.
//!
//! Both files walk `1..=orders` directly rather than the ids written by the
//! order chunks. The two always agree today, but nothing here checks it.

use std::path::Path;

use crate::datagen::random::{RandomSource, TimeWindow};
use crate::datagen::records::{PaymentRow, ShipmentRow, CARRIERS, PAYMENT_METHODS};
use crate::error::GenerateError;
use crate::fs_utils::{create_csv, csv_err, finish_csv};

pub const SHIPMENT_RATE: f64 = 0.85;

pub fn write_payments(
    path: &Path,
    orders: u64,
    rng: &mut RandomSource,
    window: &TimeWindow,
) -> Result<u64, GenerateError> {
    tracing::info!("Generating payments -> {}", path.display());
    let mut writer = create_csv(path)?;

    for order_id in 1..=orders {
        let amount = rng.money(5.0, 2000.0);
        let method = rng.pick(&PAYMENT_METHODS);
        let paid_at = rng.timestamp(window);

        writer
            .serialize(PaymentRow { order_id, paid_at, amount, method })
            .map_err(csv_err(path))?;
    }

    finish_csv(writer, path)?;
    Ok(orders)
}

/// Returns the number of shipment rows actually emitted
pub fn write_shipments(
    path: &Path,
    orders: u64,
    rng: &mut RandomSource,
    window: &TimeWindow,
) -> Result<u64, GenerateError> {
    tracing::info!("Generating shipments -> {}", path.display());
    let mut writer = create_csv(path)?;
    let mut shipped = 0;

    for order_id in 1..=orders {
        if !rng.chance(SHIPMENT_RATE) {
            continue;
        }
        let shipped_at = rng.timestamp(window);
        let carrier = rng.pick(&CARRIERS);
        let tracking_id = rng.tracking_id();

        writer
            .serialize(ShipmentRow { order_id, shipped_at, carrier, tracking_id })
            .map_err(csv_err(path))?;
        shipped += 1;
    }

    finish_csv(writer, path)?;
    tracing::debug!("{} of {} orders shipped", shipped, orders);
    Ok(shipped)
}
