//! Property-based tests for the calendar windows that reports and budgets
//! are computed over.

use chrono::{Datelike, NaiveDate, TimeDelta};
use pennywise_core::budgets::{BudgetHealth, BudgetPeriod};
use pennywise_core::utils::{week_range, MonthPeriod};
use proptest::prelude::*;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// A valid (year, month) pair well inside chrono's supported range.
fn arb_year_month() -> impl Strategy<Value = (i32, u32)> {
    (1900i32..2200, 1u32..=12)
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (arb_year_month(), 1u32..=31).prop_map(|((year, month), day)| {
        let period = MonthPeriod::new(year, month).unwrap();
        let day = day.min(period.last_day().day());
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    })
}

fn arb_period() -> impl Strategy<Value = BudgetPeriod> {
    prop_oneof![
        Just(BudgetPeriod::Weekly),
        Just(BudgetPeriod::Monthly),
        Just(BudgetPeriod::Yearly),
    ]
}

// =============================================================================
// Month windows
// =============================================================================

proptest! {
    #[test]
    fn month_window_covers_exactly_one_month((year, month) in arb_year_month()) {
        let period = MonthPeriod::new(year, month).unwrap();
        prop_assert_eq!(period.first_day().day(), 1);
        prop_assert_eq!(period.first_day().month(), month);
        prop_assert_eq!(period.last_day().month(), month);
        prop_assert_ne!(period.last_day().succ_opt().unwrap().month(), month);
        let days = (period.last_day() - period.first_day()).num_days() + 1;
        prop_assert!((28..=31).contains(&days));
    }

    #[test]
    fn every_date_falls_in_its_own_month(date in arb_date()) {
        let period = MonthPeriod::containing(date).unwrap();
        prop_assert!(period.contains(date));
        prop_assert!(!period.offset(1).unwrap().contains(date));
        prop_assert!(!period.offset(-1).unwrap().contains(date));
    }

    #[test]
    fn trailing_months_are_consecutive((year, month) in arb_year_month(), count in 1u32..24) {
        let end = MonthPeriod::new(year, month).unwrap();
        let months = end.trailing(count).unwrap();
        prop_assert_eq!(months.len(), count as usize);
        prop_assert_eq!(*months.last().unwrap(), end);
        for pair in months.windows(2) {
            prop_assert_eq!(pair[0].last_day().succ_opt().unwrap(), pair[1].first_day());
        }
    }

    #[test]
    fn offset_round_trips((year, month) in arb_year_month(), shift in -60i32..60) {
        let period = MonthPeriod::new(year, month).unwrap();
        prop_assert_eq!(period.offset(shift).unwrap().offset(-shift).unwrap(), period);
    }

    #[test]
    fn out_of_range_months_are_rejected(year in 1900i32..2200, month in 13u32..1000) {
        prop_assert!(MonthPeriod::new(year, month).is_err());
        prop_assert!(MonthPeriod::new(year, 0).is_err());
    }
}

// =============================================================================
// Budget period windows
// =============================================================================

proptest! {
    #[test]
    fn budget_window_contains_anchor_date(date in arb_date(), period in arb_period()) {
        let window = period.window_containing(date).unwrap();
        prop_assert!(window.contains(date));
        prop_assert!(window.start <= window.end);
    }

    #[test]
    fn weeks_start_on_monday_and_span_seven_days(date in arb_date()) {
        let week = week_range(date).unwrap();
        prop_assert_eq!(week.start.weekday(), chrono::Weekday::Mon);
        prop_assert_eq!(week.end - week.start, TimeDelta::days(6));
    }

    #[test]
    fn health_is_monotonic_in_percentage(a in 0u32..500, b in 0u32..500) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let rank = |h: BudgetHealth| match h {
            BudgetHealth::Ok => 0,
            BudgetHealth::Warning => 1,
            BudgetHealth::Exceeded => 2,
        };
        prop_assert!(
            rank(BudgetHealth::from_percentage(Decimal::from(low)))
                <= rank(BudgetHealth::from_percentage(Decimal::from(high)))
        );
    }
}
