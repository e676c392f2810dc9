//! Raw usage retrieval for arrears usage invoicing.

use crate::config::InvoiceConfig;
use crate::models::{RawUsage, UsageCatalog, UsageCharge};
use crate::services::error::UsageWindowError;
use crate::services::metrics::{record_error, record_raw_rows_fetched, record_window_computation};
use crate::services::raw_usage::RawUsageProvider;
use crate::services::usage_window::optimized_raw_usage_start_date;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Fetches the raw usage an invoice run needs, reading as little history
/// as the already invoiced usage charges allow.
#[derive(Clone)]
pub struct RawUsageOptimizer {
    config: InvoiceConfig,
    usage_api: Arc<dyn RawUsageProvider>,
}

impl RawUsageOptimizer {
    pub fn new(config: InvoiceConfig, usage_api: Arc<dyn RawUsageProvider>) -> Self {
        Self { config, usage_api }
    }

    /// Lower bound for the raw usage read. With the optimization disabled
    /// this is `first_event_start_date` as is.
    pub fn raw_usage_start_date(
        &self,
        first_event_start_date: NaiveDate,
        target_date: NaiveDate,
        existing_usage_charges: &[UsageCharge],
        known_usage: &UsageCatalog,
    ) -> Result<NaiveDate, UsageWindowError> {
        if !self.config.is_optimization_enabled() {
            record_window_computation("disabled", 0);
            return Ok(first_event_start_date);
        }

        let start_date = optimized_raw_usage_start_date(
            first_event_start_date,
            target_date,
            existing_usage_charges,
            known_usage,
            self.config.max_raw_usage_previous_period,
        )
        .inspect_err(|e| {
            record_error(e.error_type());
            tracing::error!(error = %e, "Raw usage window rejected invoiced usage charges");
        })?;

        let outcome = if existing_usage_charges.is_empty() {
            "no_history"
        } else {
            "optimized"
        };
        record_window_computation(
            outcome,
            (start_date - first_event_start_date).num_days(),
        );

        Ok(start_date)
    }

    /// Raw usage for `account_id` in `[start, target_date)`, where `start`
    /// comes from [`Self::raw_usage_start_date`]. An empty window yields no
    /// rows without calling the provider.
    #[instrument(skip(self, existing_usage_charges, known_usage), fields(service = "usage-service"))]
    pub async fn consumable_in_arrear_usage(
        &self,
        account_id: Uuid,
        first_event_start_date: NaiveDate,
        target_date: NaiveDate,
        existing_usage_charges: &[UsageCharge],
        known_usage: &UsageCatalog,
    ) -> Result<Vec<RawUsage>, UsageWindowError> {
        let start_date = self.raw_usage_start_date(
            first_event_start_date,
            target_date,
            existing_usage_charges,
            known_usage,
        )?;

        if start_date >= target_date {
            tracing::debug!(
                account_id = %account_id,
                start_date = %start_date,
                target_date = %target_date,
                "Raw usage window is empty"
            );
            return Ok(Vec::new());
        }

        let rows = self
            .usage_api
            .raw_usage_for_account(account_id, start_date, target_date)
            .await
            .map_err(|e| {
                record_error("provider");
                tracing::error!(error = %e, account_id = %account_id, "Failed to fetch raw usage");
                UsageWindowError::from(e)
            })?;

        record_raw_rows_fetched(rows.len());
        tracing::debug!(
            account_id = %account_id,
            start_date = %start_date,
            rows = rows.len(),
            "Raw usage loaded for arrears invoicing"
        );

        Ok(rows)
    }
}
