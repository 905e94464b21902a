use chrono::{Datelike, Months, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Earliest and latest years accepted in report queries.
pub const MIN_REPORT_YEAR: i32 = 1;
pub const MAX_REPORT_YEAR: i32 = 9999;

/// Today's date in UTC. Report windows and budget periods are anchored here.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A calendar month, used as the unit of every monthly report.
///
/// Both bounds are computed once at construction so that a `MonthPeriod`
/// can never describe a month chrono cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    first: NaiveDate,
    last: NaiveDate,
}

impl MonthPeriod {
    /// Builds the period for `month` (1-12) of `year`, with `year` limited to
    /// the report range.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid_input(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(MIN_REPORT_YEAR..=MAX_REPORT_YEAR).contains(&year) {
            return Err(Error::invalid_input(format!(
                "Year must be between {} and {}, got {}",
                MIN_REPORT_YEAR, MAX_REPORT_YEAR, year
            )));
        }
        Self::from_parts(year, month)
    }

    /// Any month chrono can represent. Offsets from a valid report month may
    /// step outside the report year range.
    fn from_parts(year: i32, month: u32) -> Result<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::invalid_input(format!("Invalid month {}-{}", year, month)))?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| Error::invalid_input(format!("Invalid month {}-{}", year, month)))?;
        Ok(MonthPeriod { first, last })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month())
    }

    /// Resolves optional `month`/`year` query values, defaulting each to the
    /// month containing `today`.
    pub fn resolve(month: Option<u32>, year: Option<i32>, today: NaiveDate) -> Result<Self> {
        Self::new(
            year.unwrap_or_else(|| today.year()),
            month.unwrap_or_else(|| today.month()),
        )
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.first, self.last)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.range().contains(date)
    }

    /// The month `months` away from this one (negative goes back in time).
    pub fn offset(&self, months: i32) -> Result<Self> {
        let index = self.year() as i64 * 12 + (self.month() as i64 - 1) + months as i64;
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) + 1;
        let year = i32::try_from(year)
            .map_err(|_| Error::invalid_input(format!("Year {} is out of range", year)))?;
        Self::from_parts(year, month as u32)
    }

    /// `count` consecutive months ending with (and including) this one,
    /// oldest first.
    pub fn trailing(&self, count: u32) -> Result<Vec<Self>> {
        (0..count as i32)
            .rev()
            .map(|back| self.offset(-back))
            .collect()
    }
}

/// Monday through Sunday of the ISO week containing `date`.
pub fn week_range(date: NaiveDate) -> Option<DateRange> {
    let from_monday = date.weekday().num_days_from_monday() as i64;
    let start = date.checked_sub_signed(TimeDelta::days(from_monday))?;
    let end = start.checked_add_signed(TimeDelta::days(6))?;
    Some(DateRange::new(start, end))
}

/// January 1st through December 31st of `year`.
pub fn year_range(year: i32) -> Option<DateRange> {
    Some(DateRange::new(
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}
