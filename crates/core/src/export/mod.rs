//! Export module - CSV downloads.

mod csv_export;
mod export_service;

pub use csv_export::{write_budgets_csv, write_goals_csv, write_transactions_csv};
pub use export_service::{ExportService, ExportServiceTrait};
