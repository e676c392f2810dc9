//! Configuration module for usage-service.

use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Lookback used when `MAX_RAW_USAGE_PREVIOUS_PERIOD` is not set.
pub const DEFAULT_MAX_RAW_USAGE_PREVIOUS_PERIOD: u32 = 2;

#[derive(Debug, Clone)]
pub struct UsageConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub invoice: InvoiceConfig,
}

/// Invoice generation settings consumed by the raw usage optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceConfig {
    /// Number of billing periods re-read before the latest invoiced usage
    /// charge of each period. `0` disables the optimization.
    pub max_raw_usage_previous_period: u32,
}

impl InvoiceConfig {
    /// Build from a signed value, rejecting negative lookbacks.
    pub fn new(max_raw_usage_previous_period: i64) -> Result<Self, AppError> {
        let max_raw_usage_previous_period = u32::try_from(max_raw_usage_previous_period)
            .map_err(|_| {
                AppError::ConfigError(anyhow::anyhow!(
                    "MAX_RAW_USAGE_PREVIOUS_PERIOD must be between 0 and {}, got {}",
                    u32::MAX,
                    max_raw_usage_previous_period
                ))
            })?;

        Ok(Self {
            max_raw_usage_previous_period,
        })
    }

    pub fn is_optimization_enabled(&self) -> bool {
        self.max_raw_usage_previous_period > 0
    }

    fn from_raw(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(Self::default()),
            Some(value) => {
                let parsed: i64 = value.parse().map_err(|e| {
                    AppError::ConfigError(anyhow::anyhow!(
                        "MAX_RAW_USAGE_PREVIOUS_PERIOD is not an integer ({}): {}",
                        value,
                        e
                    ))
                })?;
                Self::new(parsed)
            }
        }
    }
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            max_raw_usage_previous_period: DEFAULT_MAX_RAW_USAGE_PREVIOUS_PERIOD,
        }
    }
}

impl UsageConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "usage-service".to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            invoice: InvoiceConfig::from_raw(
                env::var("MAX_RAW_USAGE_PREVIOUS_PERIOD").ok().as_deref(),
            )?,
        })
    }
}
