//! Process-level setup for hosts embedding usage-service.

use crate::config::UsageConfig;
use crate::services::init_metrics;
use service_core::error::AppError;
use service_core::observability::init_tracing;

/// Install tracing and register metrics for `config`.
///
/// Fails if a global tracing subscriber is already installed.
pub fn init_observability(config: &UsageConfig) -> Result<(), AppError> {
    init_tracing(
        &config.service_name,
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    )?;

    init_metrics();

    tracing::info!(
        service_name = %config.service_name,
        version = %config.service_version,
        environment = %config.common.environment,
        max_raw_usage_previous_period = config.invoice.max_raw_usage_previous_period,
        optimization_enabled = config.invoice.is_optimization_enabled(),
        "Usage service initialised"
    );

    Ok(())
}
