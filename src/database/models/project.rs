use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{macros::string_enum, required_text};
use crate::error::AppError;

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum ProjectStatus {
        Active => "active",
        Inactive => "inactive",
        Completed => "completed",
        OnHold => "on_hold",
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Active
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: Option<String>,
    pub code: Option<String>,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Project fields that passed validation. `status` stays optional so an
/// update without one keeps the stored status.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub code: String,
    pub status: Option<ProjectStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProjectInput {
    pub fn validate(self) -> Result<ProjectDraft, AppError> {
        let name = required_text(self.name, "name")?;
        let code = required_text(self.code, "code")?;

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(AppError::BadRequest(
                    "Start date cannot be later than end date".to_string(),
                ));
            }
        }

        Ok(ProjectDraft {
            name,
            code,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub status: Option<ProjectStatus>,
    pub active_only: Option<bool>,
}

impl ProjectListQuery {
    /// `active_only=true` wins over an explicit status filter.
    pub fn effective_status(&self) -> Option<ProjectStatus> {
        if self.active_only.unwrap_or(false) {
            Some(ProjectStatus::Active)
        } else {
            self.status
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamQuery {
    pub week_start_date: Option<NaiveDate>,
}
