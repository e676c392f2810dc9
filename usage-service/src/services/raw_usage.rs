//! Raw usage provider seam.

use crate::models::RawUsage;
use crate::services::error::ProviderError;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Source of raw metered usage for an account.
#[async_trait]
pub trait RawUsageProvider: Send + Sync {
    /// Rows with `start_date <= record_date < end_date`.
    async fn raw_usage_for_account(
        &self,
        account_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<RawUsage>, ProviderError>;
}

/// A range requested from [`InMemoryRawUsageProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedRange {
    pub account_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Provider backed by rows held in memory, keyed by account.
#[derive(Default)]
pub struct InMemoryRawUsageProvider {
    rows: RwLock<Vec<(Uuid, RawUsage)>>,
    requests: RwLock<Vec<RequestedRange>>,
}

impl InMemoryRawUsageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, account_id: Uuid, usage: RawUsage) {
        self.rows.write().await.push((account_id, usage));
    }

    /// Ranges requested so far, oldest first.
    pub async fn requests(&self) -> Vec<RequestedRange> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl RawUsageProvider for InMemoryRawUsageProvider {
    async fn raw_usage_for_account(
        &self,
        account_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<RawUsage>, ProviderError> {
        if start_date > end_date {
            return Err(ProviderError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }

        self.requests.write().await.push(RequestedRange {
            account_id,
            start_date,
            end_date,
        });

        let mut rows: Vec<RawUsage> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|(owner, usage)| {
                *owner == account_id
                    && usage.record_date >= start_date
                    && usage.record_date < end_date
            })
            .map(|(_, usage)| usage.clone())
            .collect();
        rows.sort_by_key(|usage| usage.record_date);

        tracing::debug!(
            account_id = %account_id,
            start_date = %start_date,
            end_date = %end_date,
            rows = rows.len(),
            "Raw usage fetched from memory"
        );

        Ok(rows)
    }
}
