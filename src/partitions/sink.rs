//! Destinations for partition DDL.
//!
//! [`PgSink`] runs the statements on a single PostgreSQL connection inside
//! one transaction; [`DryRunSink`] writes them out as a SQL script.

use std::io::Write;

use crate::error::ProvisionError;
use crate::partitions::ddl::PartitionStatement;

/// Something that can apply a batch of partition statements
pub trait StatementSink {
    /// Apply every statement, or none of them
    fn apply(&mut self, statements: &[PartitionStatement]) -> Result<(), ProvisionError>;
}

/// Prints statements instead of executing them
pub struct DryRunSink<W: Write> {
    out: W,
}

impl<W: Write> DryRunSink<W> {
    pub fn new(out: W) -> Self {
        DryRunSink { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatementSink for DryRunSink<W> {
    fn apply(&mut self, statements: &[PartitionStatement]) -> Result<(), ProvisionError> {
        writeln!(self.out, "BEGIN;")?;
        for stmt in statements {
            writeln!(self.out, "{};", stmt.sql)?;
        }
        writeln!(self.out, "COMMIT;")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(feature = "postgres")]
pub use self::pg::PgSink;

#[cfg(feature = "postgres")]
mod pg {
    use diesel::pg::PgConnection;
    use diesel::prelude::*;

    use super::StatementSink;
    use crate::error::ProvisionError;
    use crate::partitions::ddl::PartitionStatement;

    /// Single PostgreSQL connection used for the whole run
    pub struct PgSink {
        conn: PgConnection,
    }

    impl PgSink {
        /// Open a connection
        ///
        /// # Arguments
        /// * `database_url` - e.g. "postgres://postgres@localhost/mcp_demo"
        pub fn connect(database_url: &str) -> Result<Self, ProvisionError> {
            let conn = PgConnection::establish(database_url)?;
            tracing::info!("Connected to PostgreSQL");
            Ok(PgSink { conn })
        }

        /// Test database connectivity
        pub fn test_connection(&mut self) -> Result<(), ProvisionError> {
            diesel::sql_query("SELECT 1")
                .execute(&mut self.conn)
                .map_err(connection_failed)?;
            Ok(())
        }
    }

    /// A failed liveness query means the connection is unusable
    pub(super) fn connection_failed(err: diesel::result::Error) -> ProvisionError {
        ProvisionError::Connection(err.to_string())
    }

    impl StatementSink for PgSink {
        fn apply(&mut self, statements: &[PartitionStatement]) -> Result<(), ProvisionError> {
            // Any error returned from the closure rolls the whole batch back.
            self.conn.transaction::<_, ProvisionError, _>(|conn| {
                for stmt in statements {
                    tracing::debug!("{}", stmt.sql);
                    diesel::sql_query(stmt.sql.as_str())
                        .execute(conn)
                        .map_err(|e| ProvisionError::Statement {
                            partition: stmt.partition.clone(),
                            reason: e.to_string(),
                        })?;
                }
                Ok(())
            })
        }
    }
}
