//! Error types for dataset generation, partition provisioning and config loading.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for configuration loading and validation
#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        path: PathBuf,
        reason: String,
    },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, reason } => {
                write!(f, "Failed to parse {}: {}", path.display(), reason)
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Error type for dataset generation
#[derive(Debug)]
pub enum GenerateError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Csv {
        path: PathBuf,
        source: csv::Error,
    },
    Config(ConfigError),
    /// The fake email source kept producing addresses already handed out.
    UniqueExhausted {
        customer_id: u64,
        attempts: u32,
    },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            GenerateError::Csv { path, source } => {
                write!(f, "CSV error on {}: {}", path.display(), source)
            }
            GenerateError::Config(err) => write!(f, "{}", err),
            GenerateError::UniqueExhausted { customer_id, attempts } => write!(
                f,
                "Could not find a unique email for customer {} after {} attempts",
                customer_id, attempts
            ),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Io { source, .. } => Some(source),
            GenerateError::Csv { source, .. } => Some(source),
            GenerateError::Config(err) => Some(err),
            GenerateError::UniqueExhausted { .. } => None,
        }
    }
}

impl From<ConfigError> for GenerateError {
    fn from(err: ConfigError) -> Self {
        GenerateError::Config(err)
    }
}

/// Error type for partition provisioning
#[derive(Debug)]
pub enum ProvisionError {
    Connection(String),
    Statement {
        partition: String,
        reason: String,
    },
    Transaction(String),
    InvalidIdentifier(String),
    InvalidWindow(String),
    Output(io::Error),
}

impl fmt::Display for ProvisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvisionError::Connection(msg) => write!(f, "Database connection failed: {}", msg),
            ProvisionError::Statement { partition, reason } => {
                write!(f, "Failed to create partition '{}': {}", partition, reason)
            }
            ProvisionError::Transaction(msg) => write!(f, "Transaction failed: {}", msg),
            ProvisionError::InvalidIdentifier(name) => {
                write!(f, "'{}' is not a plain SQL identifier", name)
            }
            ProvisionError::InvalidWindow(msg) => write!(f, "Invalid partition window: {}", msg),
            ProvisionError::Output(err) => write!(f, "Failed to write statements: {}", err),
        }
    }
}

impl std::error::Error for ProvisionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProvisionError::Output(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ProvisionError {
    fn from(err: io::Error) -> Self {
        ProvisionError::Output(err)
    }
}

impl From<diesel::result::Error> for ProvisionError {
    fn from(err: diesel::result::Error) -> Self {
        ProvisionError::Transaction(err.to_string())
    }
}

impl From<diesel::ConnectionError> for ProvisionError {
    fn from(err: diesel::ConnectionError) -> Self {
        ProvisionError::Connection(err.to_string())
    }
}
