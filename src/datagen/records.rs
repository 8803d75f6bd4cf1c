//! Row types for every generated table.
//!
//! Each struct serializes to one headerless CSV record; field order is the
//! column order of the file.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A monetary amount, always written with two decimal places
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Money(pub f64);

impl Money {
    pub const ZERO: Money = Money(0.0);
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A second-resolution timestamp written as `YYYY-MM-DD HH:MM:SS`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(pub NaiveDateTime);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Completed,
    Pending,
    Cancelled,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Completed,
        OrderStatus::Pending,
        OrderStatus::Cancelled,
        OrderStatus::Returned,
    ];

    /// Sampling weights, index-aligned with [`OrderStatus::ALL`]
    pub const WEIGHTS: [f64; 4] = [0.70, 0.15, 0.10, 0.05];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Completed => "completed",
            OrderStatus::Pending => "pending",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Returned => "returned",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const PAYMENT_METHODS: [&str; 4] = ["Credit Card", "UPI", "PayPal", "NetBanking"];
pub const CARRIERS: [&str; 5] = ["DHL", "FedEx", "BlueDart", "Delhivery", "Ecom"];

#[derive(Debug, Serialize)]
pub struct CustomerRow {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub country: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ProductRow {
    pub id: u64,
    pub name: String,
    pub price: Money,
    pub category_id: u64,
}

#[derive(Debug, Serialize)]
pub struct OrderRow {
    pub id: u64,
    pub customer_id: u64,
    pub order_datetime: Timestamp,
    pub status: OrderStatus,
    /// Placeholder; never reconciled against the order's items.
    pub total_amount: Money,
}

#[derive(Debug, Serialize)]
pub struct OrderItemRow {
    pub id: u64,
    pub order_id: u64,
    pub order_datetime: Timestamp,
    pub product_id: u64,
    pub quantity: u32,
    pub price: Money,
}

#[derive(Debug, Serialize)]
pub struct PaymentRow {
    pub order_id: u64,
    pub paid_at: Timestamp,
    pub amount: Money,
    pub method: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ShipmentRow {
    pub order_id: u64,
    pub shipped_at: Timestamp,
    pub carrier: &'static str,
    pub tracking_id: String,
}

#[derive(Debug, Serialize)]
pub struct InventoryRow {
    pub product_id: u64,
    pub warehouse: String,
    pub quantity: u32,
    pub updated_at: Timestamp,
}
