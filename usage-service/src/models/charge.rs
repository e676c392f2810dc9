//! Invoiced usage charge model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Usage invoice item already generated for the subscription in scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageCharge {
    pub invoice_item_id: Uuid,
    pub usage_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub amount: Decimal,
}

impl UsageCharge {
    /// Charge with a zero amount and a fresh item id.
    pub fn new(usage_name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            invoice_item_id: Uuid::new_v4(),
            usage_name: usage_name.into(),
            start_date,
            end_date,
            amount: Decimal::ZERO,
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }
}
