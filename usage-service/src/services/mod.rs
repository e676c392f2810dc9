//! Services module for usage-service.

pub mod error;
pub mod metrics;
pub mod raw_usage;
pub mod raw_usage_optimizer;
pub mod usage_window;

pub use error::{ProviderError, UsageWindowError};
pub use metrics::{get_metrics, init_metrics};
pub use raw_usage::{InMemoryRawUsageProvider, RawUsageProvider, RequestedRange};
pub use raw_usage_optimizer::RawUsageOptimizer;
pub use usage_window::{optimized_raw_usage_start_date, PeriodSlot, PeriodSlots};
