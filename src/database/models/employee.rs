use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::required_text;
use crate::error::AppError;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub position: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Request body for creating or replacing an employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
}

/// Employee fields that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    pub position: String,
    pub is_active: bool,
}

impl EmployeeInput {
    pub fn validate(self) -> Result<EmployeeDraft, AppError> {
        let name = required_text(self.name, "name")?;
        let email = required_text(self.email, "email")?.to_lowercase();
        let position = required_text(self.position, "position")?;

        if !EMAIL_PATTERN.is_match(&email) {
            return Err(AppError::BadRequest(format!("'{}' is not a valid email address", email)));
        }

        Ok(EmployeeDraft {
            name,
            email,
            position,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct EmployeeListQuery {
    pub active_only: Option<bool>,
}

/// Planned vs actual hours for one week of an employee's assignments.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeeklyWorkload {
    pub week_start_date: NaiveDate,
    pub total_planned_hours: f64,
    pub total_actual_hours: f64,
    pub project_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub email: String,
}
