//! DDL for monthly range partitions.
//!
//! Identifiers cannot be bound as query parameters, so parent names are
//! checked against a plain-identifier pattern before being interpolated.

use crate::config::ProvisionerConfig;
use crate::error::ProvisionError;
use crate::partitions::months::{months, YearMonth};

/// One `CREATE TABLE IF NOT EXISTS ... PARTITION OF ...` statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionStatement {
    pub parent: String,
    pub partition: String,
    pub month: YearMonth,
    pub sql: String,
}

/// `<parent>_<yyyy>_<mm>`
pub fn partition_name(parent: &str, month: YearMonth) -> String {
    format!("{}_{:04}_{:02}", parent, month.year(), month.month())
}

pub fn validate_identifier(name: &str) -> Result<(), ProvisionError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(ProvisionError::InvalidIdentifier(name.to_string()))
    }
}

pub fn partition_statement(parent: &str, month: YearMonth) -> Result<PartitionStatement, ProvisionError> {
    validate_identifier(parent)?;

    let out_of_range = || ProvisionError::InvalidWindow(format!("{} has no calendar bounds", month));
    let from = month.first_day().ok_or_else(out_of_range)?;
    let to = month.next_first_day().ok_or_else(out_of_range)?;

    let partition = partition_name(parent, month);
    let sql = format!(
        "CREATE TABLE IF NOT EXISTS {partition} PARTITION OF {parent} FOR VALUES FROM ('{from}') TO ('{to}')",
        partition = partition,
        parent = parent,
        from = from.format("%Y-%m-%d"),
        to = to.format("%Y-%m-%d"),
    );

    Ok(PartitionStatement {
        parent: parent.to_string(),
        partition,
        month,
        sql,
    })
}

/// Statements for every month in the window, parents in configured order within each month
pub fn partition_statements(config: &ProvisionerConfig) -> Result<Vec<PartitionStatement>, ProvisionError> {
    if config.first_month > config.last_month {
        return Err(ProvisionError::InvalidWindow(format!(
            "{} is after {}",
            config.first_month, config.last_month
        )));
    }
    if config.parents.is_empty() {
        return Err(ProvisionError::InvalidWindow("no parent tables given".to_string()));
    }

    let mut statements = Vec::new();
    for month in months(config.first_month, config.last_month) {
        for parent in &config.parents {
            statements.push(partition_statement(parent, month)?);
        }
    }
    Ok(statements)
}
