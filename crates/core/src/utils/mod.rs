pub mod decimal_utils;
pub mod time_utils;

pub use decimal_utils::round_display;
pub use time_utils::{today_utc, week_range, year_range, DateRange, MonthPeriod};
