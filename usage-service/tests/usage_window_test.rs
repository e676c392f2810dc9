//! Raw usage window computation tests for usage-service.

mod common;

use common::{catalog, charge, date};
use usage_service::models::BillingPeriod;
use usage_service::services::{optimized_raw_usage_start_date, UsageWindowError};

#[test]
fn empty_history_returns_first_event_date() {
    let known_usage = catalog(&[
        ("api_calls", BillingPeriod::Monthly),
        ("storage", BillingPeriod::Annual),
    ]);

    for lookback in [0, 1, 2, 12] {
        let start = optimized_raw_usage_start_date(
            date(2015, 1, 1),
            date(2015, 6, 1),
            &[],
            &known_usage,
            lookback,
        )
        .unwrap();
        assert_eq!(start, date(2015, 1, 1), "lookback {}", lookback);
    }
}

#[test]
fn single_monthly_period_rewinds_from_latest_charge() {
    let known_usage = catalog(&[("api_calls", BillingPeriod::Monthly)]);
    let charges = vec![charge("api_calls", date(2015, 3, 15))];

    let start = optimized_raw_usage_start_date(
        date(2015, 1, 1),
        date(2015, 4, 15),
        &charges,
        &known_usage,
        2,
    )
    .unwrap();

    assert_eq!(start, date(2015, 1, 15));
}

#[test]
fn result_never_precedes_first_event_date() {
    let known_usage = catalog(&[("api_calls", BillingPeriod::Monthly)]);
    let charges = vec![charge("api_calls", date(2015, 3, 15))];

    let start = optimized_raw_usage_start_date(
        date(2015, 2, 20),
        date(2015, 4, 15),
        &charges,
        &known_usage,
        2,
    )
    .unwrap();

    assert_eq!(start, date(2015, 2, 20));
}

#[test]
fn earliest_period_candidate_wins() {
    let known_usage = catalog(&[
        ("api_calls", BillingPeriod::Monthly),
        ("seats", BillingPeriod::Quarterly),
    ]);
    let charges = vec![
        charge("api_calls", date(2015, 3, 1)),
        charge("seats", date(2015, 2, 1)),
        charge("api_calls", date(2015, 4, 1)),
        charge("seats", date(2014, 11, 1)),
    ];

    let start = optimized_raw_usage_start_date(
        date(2014, 1, 1),
        date(2015, 5, 1),
        &charges,
        &known_usage,
        1,
    )
    .unwrap();

    // Monthly: 2015-04-01 - 1 month; quarterly: 2015-02-01 - 3 months.
    assert_eq!(start, date(2014, 11, 1));
}

#[test]
fn earliest_period_candidate_is_still_floored() {
    let known_usage = catalog(&[
        ("api_calls", BillingPeriod::Monthly),
        ("seats", BillingPeriod::Quarterly),
    ]);
    let charges = vec![
        charge("api_calls", date(2015, 4, 1)),
        charge("seats", date(2015, 2, 1)),
    ];

    let start = optimized_raw_usage_start_date(
        date(2015, 1, 1),
        date(2015, 5, 1),
        &charges,
        &known_usage,
        1,
    )
    .unwrap();

    assert_eq!(start, date(2015, 1, 1));
}

#[test]
fn period_unused_by_catalog_never_binds() {
    // Only monthly usage is defined; the annual slot must stay out of the
    // minimum no matter what the monthly history looks like.
    let known_usage = catalog(&[("api_calls", BillingPeriod::Monthly)]);
    let charges = vec![charge("api_calls", date(2015, 3, 1))];

    for lookback in [1, 3, 10] {
        let start = optimized_raw_usage_start_date(
            date(2010, 1, 1),
            date(2015, 4, 1),
            &charges,
            &known_usage,
            lookback,
        )
        .unwrap();
        let expected = date(2015, 3, 1)
            .checked_sub_months(chrono::Months::new(lookback))
            .unwrap();
        assert_eq!(start, expected, "lookback {}", lookback);
    }
}

#[test]
fn active_period_without_charges_does_not_reset_result() {
    let known_usage = catalog(&[
        ("api_calls", BillingPeriod::Monthly),
        ("storage", BillingPeriod::Annual),
    ]);
    let charges = vec![charge("api_calls", date(2015, 6, 1))];

    let start = optimized_raw_usage_start_date(
        date(2014, 1, 1),
        date(2015, 7, 1),
        &charges,
        &known_usage,
        2,
    )
    .unwrap();

    assert_eq!(start, date(2015, 4, 1));
}

#[test]
fn catalog_with_only_no_billing_period_falls_back() {
    let known_usage = catalog(&[("setup_fee", BillingPeriod::NoBillingPeriod)]);
    let charges = vec![charge("setup_fee", date(2015, 3, 1))];

    let start = optimized_raw_usage_start_date(
        date(2015, 1, 1),
        date(2015, 4, 1),
        &charges,
        &known_usage,
        2,
    )
    .unwrap();

    assert_eq!(start, date(2015, 1, 1));
}

#[test]
fn same_inputs_give_same_result() {
    let known_usage = catalog(&[
        ("api_calls", BillingPeriod::Monthly),
        ("seats", BillingPeriod::Quarterly),
        ("archive", BillingPeriod::Annual),
    ]);
    let charges = vec![
        charge("archive", date(2014, 12, 31)),
        charge("api_calls", date(2015, 4, 30)),
        charge("seats", date(2015, 3, 31)),
    ];

    let first = optimized_raw_usage_start_date(
        date(2013, 1, 1),
        date(2015, 5, 31),
        &charges,
        &known_usage,
        1,
    )
    .unwrap();
    let second = optimized_raw_usage_start_date(
        date(2013, 1, 1),
        date(2015, 5, 31),
        &charges,
        &known_usage,
        1,
    )
    .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, date(2013, 12, 31));
}

#[test]
fn charge_for_unknown_usage_is_rejected() {
    let known_usage = catalog(&[("api_calls", BillingPeriod::Monthly)]);
    let charges = vec![
        charge("api_calls", date(2015, 3, 1)),
        charge("legacy_minutes", date(2015, 2, 1)),
    ];

    let result = optimized_raw_usage_start_date(
        date(2015, 1, 1),
        date(2015, 4, 1),
        &charges,
        &known_usage,
        1,
    );

    match result {
        Err(UsageWindowError::UnknownUsage { usage_name }) => {
            assert_eq!(usage_name, "legacy_minutes")
        }
        other => panic!("expected UnknownUsage, got {:?}", other),
    }
}
