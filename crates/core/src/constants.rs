/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Preference defaults for newly registered users
pub const DEFAULT_CURRENCY: &str = "AED";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Goal defaults
pub const DEFAULT_GOAL_CATEGORY: &str = "General Savings";
pub const DEFAULT_GOAL_ICON: &str = "piggy-bank";

/// Number of months covered by the monthly trend report
pub const TREND_MONTHS: u32 = 6;

/// Spending share (in percent) at which a budget is flagged as `warning`
pub const BUDGET_WARNING_PERCENT: u32 = 80;

/// Spending share (in percent) at which a budget is flagged as `exceeded`
pub const BUDGET_EXCEEDED_PERCENT: u32 = 100;
