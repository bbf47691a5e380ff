pub mod budget;
pub mod employee;
pub mod macros;
pub mod planning;
pub mod project;
pub mod rate;
pub mod time_entry;

// Re-export all models for easy importing
pub use budget::*;
pub use employee::*;
pub use planning::*;
pub use project::*;
pub use rate::*;
pub use time_entry::*;

use crate::error::AppError;

/// Trims a required text field, rejecting missing or blank values.
pub(crate) fn required_text(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| missing_field(field))
}

pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| missing_field(field))
}

fn missing_field(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing required field: {}", field))
}
