//! Runtime configuration for the generator and the partition provisioner.
//!
//! Generator settings resolve with precedence CLI flag > YAML profile >
//! built-in default. The provisioner reads `DATABASE_URL` from the
//! environment (a `.env` file is honoured by the binaries).

use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::datagen::records::TIMESTAMP_FORMAT;
use crate::error::ConfigError;
use crate::partitions::months::YearMonth;

pub const DEFAULT_OUT_DIR: &str = "/tmp/mcp_data";
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_DATABASE_URL: &str = "postgres://postgres@localhost/mcp_demo";

/// Fully resolved generator settings
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub out_dir: PathBuf,
    pub customers: u64,
    pub categories: u64,
    pub products: u64,
    pub orders: u64,
    pub chunk_size: u64,
    pub seed: u64,
    /// The "now" that every trailing date window is measured back from
    pub anchor: NaiveDateTime,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            customers: 2_000_000,
            categories: 1_000,
            products: 100_000,
            orders: 10_000_000,
            chunk_size: 100_000,
            seed: DEFAULT_SEED,
            anchor: Local::now().naive_local(),
        }
    }
}

impl GeneratorConfig {
    /// Defaults, then the YAML profile, then command line overrides
    pub fn resolve(
        profile: Option<&GeneratorProfile>,
        overrides: &GeneratorProfile,
    ) -> Result<GeneratorConfig, ConfigError> {
        let mut config = GeneratorConfig::default();
        if let Some(profile) = profile {
            config.apply_profile(profile)?;
        }
        config.apply_profile(overrides)?;
        Ok(config)
    }

    /// Overlay every field the profile sets
    pub fn apply_profile(&mut self, profile: &GeneratorProfile) -> Result<(), ConfigError> {
        if let Some(out) = &profile.out {
            self.out_dir = out.clone();
        }
        if let Some(n) = profile.customers {
            self.customers = n;
        }
        if let Some(n) = profile.categories {
            self.categories = n;
        }
        if let Some(n) = profile.products {
            self.products = n;
        }
        if let Some(n) = profile.orders {
            self.orders = n;
        }
        if let Some(n) = profile.chunk {
            self.chunk_size = n;
        }
        if let Some(seed) = profile.seed {
            self.seed = seed;
        }
        if let Some(anchor) = &profile.anchor {
            self.anchor = parse_anchor(anchor)?;
        }
        Ok(())
    }

    /// Reject counts that would leave foreign keys without a target
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk size must be at least 1".to_string()));
        }
        if self.orders > 0 && self.customers == 0 {
            return Err(ConfigError::Invalid(
                "orders need at least one customer".to_string(),
            ));
        }
        if self.orders > 0 && self.products == 0 {
            return Err(ConfigError::Invalid(
                "orders need at least one product".to_string(),
            ));
        }
        if self.products > 0 && self.categories == 0 {
            return Err(ConfigError::Invalid(
                "products need at least one category".to_string(),
            ));
        }
        Ok(())
    }
}

/// Optional YAML profile; every field may be omitted
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorProfile {
    #[serde(default)]
    pub out: Option<PathBuf>,
    #[serde(default)]
    pub customers: Option<u64>,
    #[serde(default)]
    pub categories: Option<u64>,
    #[serde(default)]
    pub products: Option<u64>,
    #[serde(default)]
    pub orders: Option<u64>,
    #[serde(default)]
    pub chunk: Option<u64>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub anchor: Option<String>,
}

impl GeneratorProfile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let profile: GeneratorProfile =
            serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if let Some(anchor) = &profile.anchor {
            parse_anchor(anchor).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        }
        Ok(profile)
    }
}

/// Parse a `YYYY-MM-DD HH:MM:SS` anchor
pub fn parse_anchor(value: &str) -> Result<NaiveDateTime, ConfigError> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        ConfigError::Invalid(format!(
            "anchor '{}' is not YYYY-MM-DD HH:MM:SS: {}",
            value, e
        ))
    })
}

/// Partition provisioner settings
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionerConfig {
    pub database_url: String,
    pub first_month: YearMonth,
    /// Inclusive
    pub last_month: YearMonth,
    pub parents: Vec<String>,
    pub dry_run: bool,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        ProvisionerConfig {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            first_month: YearMonth::new(2023, 1),
            last_month: YearMonth::new(2025, 12),
            parents: vec!["orders".to_string(), "order_items".to_string()],
            dry_run: false,
        }
    }
}
