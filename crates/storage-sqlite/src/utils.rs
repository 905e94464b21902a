//! Helpers shared by the SQLite repositories.

use log::error;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Upper bound on bound parameters per `IN (...)` query, safely below
/// SQLite's `SQLITE_MAX_VARIABLE_NUMBER`.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits `items` into slices small enough for a single `IN (...)` clause.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}

/// Parses a monetary column stored as text. Values are always written by
/// this crate, so a parse failure means the row was edited by hand; it is
/// logged and read as zero.
pub fn parse_decimal(value: &str, column: &str) -> Decimal {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .unwrap_or_else(|e| {
            error!("Invalid decimal '{}' in column {}: {}", value, column, e);
            Decimal::ZERO
        })
}

/// Canonical text form for a monetary column.
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Parses an enum stored as text, falling back to its default on bad data.
pub fn parse_enum<T>(value: &str, column: &str) -> T
where
    T: FromStr + Default,
    T::Err: std::fmt::Display,
{
    value.parse().unwrap_or_else(|e| {
        error!("Invalid value '{}' in column {}: {}", value, column, e);
        T::default()
    })
}
