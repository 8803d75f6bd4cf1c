//! Synthetic e-commerce dataset generator.
//!
//! Writes headerless CSV files for customers, categories, products, chunked
//! orders and order items, payments, shipments and inventory.

pub mod catalog;
pub mod fulfillment;
pub mod generator;
pub mod orders;
pub mod random;
pub mod records;

pub use generator::{generate, GenerationSummary};
pub use orders::{chunk_ranges, generate_order_chunk, ChunkRange, ItemIdCounter};
pub use random::{RandomSource, TimeWindow};
pub use records::OrderStatus;
