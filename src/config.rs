use std::path::PathBuf;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use tripbudget::models::Currency;

use crate::input::{parse_days, try_parse_money};

pub(crate) const DEFAULT_TOTAL: i64 = 1000;
pub(crate) const DEFAULT_DAYS: i64 = 7;

/// Starting values for a planning session, read from `TRIPBUDGET_*` variables.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) total_budget: Decimal,
    pub(crate) duration: i64,
    pub(crate) currency: Currency,
    pub(crate) export_dir: PathBuf,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Malformed numbers fall back the same
    /// way typed input does; an unknown currency code is an error.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let total_budget = match lookup("TRIPBUDGET_TOTAL") {
            Some(raw) => try_parse_money(&raw).unwrap_or_else(|| {
                warn!(value = %raw, "TRIPBUDGET_TOTAL is not a number, using 0");
                Decimal::ZERO
            }),
            None => Decimal::from(DEFAULT_TOTAL),
        };

        let duration = match lookup("TRIPBUDGET_DAYS") {
            Some(raw) => {
                if raw.trim().parse::<i64>().is_err() {
                    warn!(value = %raw, "TRIPBUDGET_DAYS is not a number, using 1");
                }
                parse_days(&raw)
            }
            None => DEFAULT_DAYS,
        };

        let currency = match lookup("TRIPBUDGET_CURRENCY") {
            Some(raw) => Currency::parse(&raw).ok_or_else(|| {
                let codes: Vec<&str> = Currency::all().iter().map(|c| c.code()).collect();
                anyhow::anyhow!(
                    "Unknown TRIPBUDGET_CURRENCY '{raw}'. Supported: {}",
                    codes.join(", ")
                )
            })?,
            None => Currency::Usd,
        };

        let export_dir = match lookup("TRIPBUDGET_EXPORT_DIR") {
            Some(dir) => PathBuf::from(crate::run::shellexpand(&dir)),
            None => default_export_dir()?,
        };

        let config = Self {
            total_budget,
            duration,
            currency,
            export_dir,
        };
        debug!(?config, "loaded configuration");
        Ok(config)
    }
}

fn default_export_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "tripbudget", "TripBudget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
