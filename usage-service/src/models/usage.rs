//! Usage catalog and raw usage models.

use super::BillingPeriod;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// Usage section of a catalog plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageDefinition {
    pub name: String,
    pub billing_period: BillingPeriod,
}

impl UsageDefinition {
    pub fn new(name: impl Into<String>, billing_period: BillingPeriod) -> Self {
        Self {
            name: name.into(),
            billing_period,
        }
    }
}

/// Known usage for one invoice run, keyed by usage name.
///
/// Built once before the run and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct UsageCatalog {
    usages: HashMap<String, UsageDefinition>,
}

impl UsageCatalog {
    /// Later definitions replace earlier ones with the same name.
    pub fn new(definitions: impl IntoIterator<Item = UsageDefinition>) -> Self {
        let usages = definitions
            .into_iter()
            .map(|definition| (definition.name.clone(), definition))
            .collect();
        Self { usages }
    }

    pub fn get(&self, usage_name: &str) -> Option<&UsageDefinition> {
        self.usages.get(usage_name)
    }

    pub fn billing_period_of(&self, usage_name: &str) -> Option<BillingPeriod> {
        self.get(usage_name).map(|usage| usage.billing_period)
    }

    /// Billing periods referenced by at least one usage definition.
    pub fn active_billing_periods(&self) -> BTreeSet<BillingPeriod> {
        self.usages
            .values()
            .map(|usage| usage.billing_period)
            .collect()
    }
}

impl FromIterator<UsageDefinition> for UsageCatalog {
    fn from_iter<I: IntoIterator<Item = UsageDefinition>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Raw metered usage row, before it is rated into an invoice item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUsage {
    pub subscription_id: Uuid,
    pub unit_type: String,
    pub record_date: NaiveDate,
    pub amount: Decimal,
    pub tracking_id: String,
}
