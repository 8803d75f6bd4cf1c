//! Monthly range partitions for the `orders` and `order_items` parents.

pub mod ddl;
pub mod months;
pub mod provisioner;
pub mod sink;

pub use ddl::{partition_name, partition_statement, partition_statements, PartitionStatement};
pub use months::{months, YearMonth};
pub use provisioner::{provision, ProvisionSummary};
pub use sink::{DryRunSink, StatementSink};

#[cfg(feature = "postgres")]
pub use sink::PgSink;
