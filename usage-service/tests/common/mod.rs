//! Test helper module for usage-service integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use usage_service::models::{BillingPeriod, RawUsage, UsageCatalog, UsageCharge, UsageDefinition};
use uuid::Uuid;

pub const TEST_ACCOUNT_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const TEST_SUBSCRIPTION_ID: &str = "22222222-2222-2222-2222-222222222222";

pub fn account_id() -> Uuid {
    Uuid::parse_str(TEST_ACCOUNT_ID).unwrap()
}

pub fn subscription_id() -> Uuid {
    Uuid::parse_str(TEST_SUBSCRIPTION_ID).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Catalog from `(usage name, billing period)` pairs.
pub fn catalog(entries: &[(&str, BillingPeriod)]) -> UsageCatalog {
    entries
        .iter()
        .map(|(name, period)| UsageDefinition::new(*name, *period))
        .collect()
}

/// Invoiced usage charge covering the month that ends on `end_date`.
pub fn charge(usage_name: &str, end_date: NaiveDate) -> UsageCharge {
    let start_date = end_date
        .checked_sub_months(chrono::Months::new(1))
        .unwrap_or(end_date);
    UsageCharge::new(usage_name, start_date, end_date).with_amount(Decimal::new(1250, 2))
}

pub fn raw_usage(unit_type: &str, record_date: NaiveDate, amount: i64) -> RawUsage {
    RawUsage {
        subscription_id: subscription_id(),
        unit_type: unit_type.to_string(),
        record_date,
        amount: Decimal::from(amount),
        tracking_id: format!("{}-{}", unit_type, record_date),
    }
}
