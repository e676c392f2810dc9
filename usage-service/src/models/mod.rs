//! Domain models for usage-service.

mod billing_period;
mod charge;
mod usage;

pub use billing_period::BillingPeriod;
pub use charge::UsageCharge;
pub use usage::{RawUsage, UsageCatalog, UsageDefinition};
