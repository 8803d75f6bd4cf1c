//! # Warehouse Seed: Load-Test Data for an E-Commerce Warehouse
//!
//! Two independent tools:
//!
//! - **Dataset generator** ([`datagen`]): writes headerless CSV files for a
//!   relational e-commerce schema (customers, categories, products, orders,
//!   order items, payments, shipments, inventory) at any scale. Orders and
//!   their items are written in fixed-size chunks so memory stays bounded.
//!   All randomness comes from one seeded source, so a run is reproducible.
//! - **Partition provisioner** ([`partitions`]): creates monthly range
//!   partitions for the `orders` and `order_items` parent tables in
//!   PostgreSQL with idempotent `CREATE TABLE IF NOT EXISTS` statements.
//!
//! ## Example: small dataset
//!
//! ```no_run
//! use warehouse_seed::{generate, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     out_dir: "/tmp/seed-small".into(),
//!     customers: 10,
//!     categories: 2,
//!     products: 5,
//!     orders: 25,
//!     chunk_size: 10,
//!     ..GeneratorConfig::default()
//! };
//! let summary = generate(&config)?;
//! assert_eq!(summary.chunks, 3);
//! # Ok::<(), warehouse_seed::GenerateError>(())
//! ```

pub mod config;
pub mod datagen;
pub mod error;
pub mod fs_utils;
pub mod logging;
pub mod partitions;

// Re-export key types
pub use config::{GeneratorConfig, GeneratorProfile, ProvisionerConfig};
pub use datagen::{generate, GenerationSummary, ItemIdCounter};
pub use error::{ConfigError, GenerateError, ProvisionError};
pub use partitions::{provision, DryRunSink, ProvisionSummary, StatementSink, YearMonth};

#[cfg(feature = "postgres")]
pub use partitions::PgSink;
