//! Top-level partition provisioning run.

use crate::config::ProvisionerConfig;
use crate::error::ProvisionError;
use crate::partitions::ddl::partition_statements;
use crate::partitions::sink::StatementSink;

/// What a successful run applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionSummary {
    pub months: usize,
    pub partitions: Vec<String>,
}

/// Build every statement for the configured window and apply them as one batch.
///
/// Statements are `CREATE TABLE IF NOT EXISTS`, so re-running over the same
/// window leaves existing partitions untouched.
pub fn provision<S: StatementSink>(
    config: &ProvisionerConfig,
    sink: &mut S,
) -> Result<ProvisionSummary, ProvisionError> {
    let statements = partition_statements(config)?;
    tracing::info!(
        "Provisioning {} partitions for {} from {} to {}",
        statements.len(),
        config.parents.join(", "),
        config.first_month,
        config.last_month
    );

    sink.apply(&statements)?;

    for month_batch in statements.chunks(config.parents.len()) {
        let names: Vec<&str> = month_batch.iter().map(|s| s.partition.as_str()).collect();
        tracing::info!("Created partitions: {}", names.join(", "));
    }

    let months = statements.len() / config.parents.len();
    Ok(ProvisionSummary {
        months,
        partitions: statements.into_iter().map(|s| s.partition).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partitions::ddl::PartitionStatement;
    use crate::partitions::months::YearMonth;
    use std::collections::BTreeSet;

    /// In-memory stand-in that behaves like `CREATE TABLE IF NOT EXISTS`
    #[derive(Default)]
    struct FakeCatalog {
        tables: BTreeSet<String>,
        created: usize,
        fail_on: Option<String>,
    }

    impl StatementSink for FakeCatalog {
        fn apply(&mut self, statements: &[PartitionStatement]) -> Result<(), ProvisionError> {
            let mut staged = self.tables.clone();
            let mut created = 0;
            for stmt in statements {
                if self.fail_on.as_deref() == Some(stmt.partition.as_str()) {
                    return Err(ProvisionError::Statement {
                        partition: stmt.partition.clone(),
                        reason: "overlapping partition".to_string(),
                    });
                }
                if staged.insert(stmt.partition.clone()) {
                    created += 1;
                }
            }
            self.tables = staged;
            self.created += created;
            Ok(())
        }
    }

    fn config() -> ProvisionerConfig {
        ProvisionerConfig {
            database_url: "postgres://localhost/test".to_string(),
            ..ProvisionerConfig::default()
        }
    }

    #[test]
    fn test_second_run_is_a_no_op() {
        let mut catalog = FakeCatalog::default();

        let first = provision(&config(), &mut catalog).unwrap();
        assert_eq!(first.months, 36);
        assert_eq!(first.partitions.len(), 72);
        assert_eq!(catalog.created, 72);

        let second = provision(&config(), &mut catalog).unwrap();
        assert_eq!(second, first);
        assert_eq!(catalog.created, 72);
        assert_eq!(catalog.tables.len(), 72);
    }

    #[test]
    fn test_failure_applies_nothing() {
        let mut catalog = FakeCatalog {
            fail_on: Some("order_items_2024_06".to_string()),
            ..FakeCatalog::default()
        };

        let err = provision(&config(), &mut catalog).unwrap_err();
        assert!(matches!(err, ProvisionError::Statement { ref partition, .. } if partition == "order_items_2024_06"));
        assert!(catalog.tables.is_empty());
    }

    #[test]
    fn test_custom_window_and_parents() {
        let cfg = ProvisionerConfig {
            first_month: YearMonth::new(2024, 11),
            last_month: YearMonth::new(2025, 2),
            parents: vec!["events".to_string()],
            ..config()
        };
        let mut catalog = FakeCatalog::default();

        let summary = provision(&cfg, &mut catalog).unwrap();
        assert_eq!(
            summary.partitions,
            vec!["events_2024_11", "events_2024_12", "events_2025_01", "events_2025_02"]
        );
    }

    #[test]
    fn test_invalid_parent_never_reaches_the_sink() {
        let cfg = ProvisionerConfig {
            parents: vec!["orders; drop".to_string()],
            ..config()
        };
        let mut catalog = FakeCatalog::default();

        assert!(provision(&cfg, &mut catalog).is_err());
        assert_eq!(catalog.created, 0);
    }
}
