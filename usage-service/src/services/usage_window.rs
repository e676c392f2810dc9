//! Raw usage window computation.
//!
//! Each billing period used by the catalog has a high-water mark: the most
//! recent end date among the usage charges already invoiced for it. Raw
//! usage only needs to be re-read from `max_raw_usage_previous_period`
//! periods before the earliest of those marks.

use crate::models::{BillingPeriod, UsageCatalog, UsageCharge};
use crate::services::error::UsageWindowError;
use chrono::{Months, NaiveDate};
use std::collections::BTreeMap;

/// High-water mark state of one billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodSlot {
    /// No usage in the catalog is billed on this period.
    Inactive,
    /// The catalog bills usage on this period but no invoiced charge uses it.
    Unmatched,
    /// Latest end date among invoiced charges billed on this period.
    MatchedAt(NaiveDate),
}

impl PeriodSlot {
    fn is_settled(&self) -> bool {
        !matches!(self, PeriodSlot::Unmatched)
    }
}

/// Per-period high-water marks, one slot for every [`BillingPeriod`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSlots {
    slots: BTreeMap<BillingPeriod, PeriodSlot>,
}

impl PeriodSlots {
    /// Scan `charges` against `known_usage`.
    ///
    /// Fails on the first charge whose usage name is not in the catalog,
    /// whatever its position in the input.
    pub fn build(
        charges: &[UsageCharge],
        known_usage: &UsageCatalog,
    ) -> Result<Self, UsageWindowError> {
        let active = known_usage.active_billing_periods();
        let mut slots: BTreeMap<BillingPeriod, PeriodSlot> = BillingPeriod::ALL
            .iter()
            .map(|period| {
                let slot = if active.contains(period) {
                    PeriodSlot::Unmatched
                } else {
                    PeriodSlot::Inactive
                };
                (*period, slot)
            })
            .collect();

        let mut resolved = charges
            .iter()
            .map(|charge| {
                known_usage
                    .billing_period_of(&charge.usage_name)
                    .map(|period| (charge.end_date, period))
                    .ok_or_else(|| UsageWindowError::UnknownUsage {
                        usage_name: charge.usage_name.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        resolved.sort_by_key(|(end_date, _)| *end_date);

        // Newest first; stop once every slot is settled.
        for (end_date, period) in resolved.into_iter().rev() {
            if let Some(slot) = slots.get_mut(&period) {
                if *slot == PeriodSlot::Unmatched {
                    *slot = PeriodSlot::MatchedAt(end_date);
                    if slots.values().all(PeriodSlot::is_settled) {
                        break;
                    }
                }
            }
        }

        Ok(Self { slots })
    }

    pub fn get(&self, period: BillingPeriod) -> PeriodSlot {
        self.slots
            .get(&period)
            .copied()
            .unwrap_or(PeriodSlot::Inactive)
    }

    /// Earliest rewound high-water mark across billing periods.
    ///
    /// `NoBillingPeriod` never contributes, even when the catalog uses it.
    pub fn lowest_start_date(&self, max_raw_usage_previous_period: u32) -> Option<NaiveDate> {
        self.slots
            .iter()
            .filter(|(period, _)| **period != BillingPeriod::NoBillingPeriod)
            .filter_map(|(period, slot)| match slot {
                PeriodSlot::MatchedAt(end_date) => Some(rewind(
                    *end_date,
                    *period,
                    max_raw_usage_previous_period,
                )),
                PeriodSlot::Inactive | PeriodSlot::Unmatched => None,
            })
            .min()
    }
}

/// `end_date` moved back by `periods` billing periods. Month arithmetic
/// clamps to month end; underflow saturates at the earliest date.
fn rewind(end_date: NaiveDate, period: BillingPeriod, periods: u32) -> NaiveDate {
    period
        .lookback_months(periods)
        .and_then(|months| end_date.checked_sub_months(Months::new(months)))
        .unwrap_or(NaiveDate::MIN)
}

/// Start date from which raw usage must be re-read to recompute arrears
/// usage charges up to `target_date`.
///
/// The result is never earlier than `first_event_start_date` and, unless
/// `first_event_start_date` is itself later, never after `target_date`.
/// Without invoiced charges, or without any binding period, it is
/// `first_event_start_date`.
pub fn optimized_raw_usage_start_date(
    first_event_start_date: NaiveDate,
    target_date: NaiveDate,
    existing_usage_charges: &[UsageCharge],
    known_usage: &UsageCatalog,
    max_raw_usage_previous_period: u32,
) -> Result<NaiveDate, UsageWindowError> {
    if existing_usage_charges.is_empty() {
        return Ok(first_event_start_date);
    }

    let slots = PeriodSlots::build(existing_usage_charges, known_usage)?;
    let result = match slots.lowest_start_date(max_raw_usage_previous_period) {
        Some(start_date) => start_date.min(target_date).max(first_event_start_date),
        None => first_event_start_date,
    };

    tracing::info!(
        raw_usage_start_date = %result,
        first_event_start_date = %first_event_start_date,
        target_date = %target_date,
        existing_usage_charges = existing_usage_charges.len(),
        "Raw usage window computed"
    );

    Ok(result)
}
