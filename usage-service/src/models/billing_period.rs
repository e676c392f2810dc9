//! Billing period model.

use serde::{Deserialize, Serialize};

/// Cadence at which a usage section of the catalog is billed.
///
/// Variants are ordered by declaration only; the ordering carries no
/// business meaning and exists so periods can key ordered collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    Biennial,
    NoBillingPeriod,
}

impl BillingPeriod {
    /// Every variant, in declaration order.
    pub const ALL: [BillingPeriod; 6] = [
        BillingPeriod::Monthly,
        BillingPeriod::Quarterly,
        BillingPeriod::SemiAnnual,
        BillingPeriod::Annual,
        BillingPeriod::Biennial,
        BillingPeriod::NoBillingPeriod,
    ];

    pub fn months_per_period(&self) -> u32 {
        match self {
            BillingPeriod::Monthly => 1,
            BillingPeriod::Quarterly => 3,
            BillingPeriod::SemiAnnual => 6,
            BillingPeriod::Annual => 12,
            BillingPeriod::Biennial => 24,
            BillingPeriod::NoBillingPeriod => 0,
        }
    }

    /// Months covered by `periods` consecutive periods, `None` on overflow.
    pub fn lookback_months(&self, periods: u32) -> Option<u32> {
        self.months_per_period().checked_mul(periods)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "monthly",
            BillingPeriod::Quarterly => "quarterly",
            BillingPeriod::SemiAnnual => "semi_annual",
            BillingPeriod::Annual => "annual",
            BillingPeriod::Biennial => "biennial",
            BillingPeriod::NoBillingPeriod => "no_billing_period",
        }
    }
}

impl std::fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
