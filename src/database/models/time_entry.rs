use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{macros::string_enum, required};
use crate::{error::AppError, services::week};

pub const MAX_HOURS_PER_ENTRY: f64 = 24.0;
pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimeEntry {
    pub id: i64,
    pub employee_id: i64,
    pub project_id: i64,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A time entry joined with employee and project display fields.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimeEntryDetail {
    pub id: i64,
    pub employee_id: i64,
    pub project_id: i64,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub employee_name: String,
    pub project_name: String,
    pub project_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeEntryInput {
    pub employee_id: Option<i64>,
    pub project_id: Option<i64>,
    pub work_date: Option<NaiveDate>,
    pub hours_worked: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntryDraft {
    pub employee_id: i64,
    pub project_id: i64,
    pub work_date: NaiveDate,
    pub hours_worked: f64,
    pub description: Option<String>,
}

impl TimeEntryInput {
    pub fn validate(self) -> Result<TimeEntryDraft, AppError> {
        let employee_id = required(self.employee_id, "employee_id")?;
        let project_id = required(self.project_id, "project_id")?;
        let work_date = required(self.work_date, "work_date")?;
        let hours_worked = required(self.hours_worked, "hours_worked")?;

        if !(hours_worked > 0.0 && hours_worked <= MAX_HOURS_PER_ENTRY) {
            return Err(AppError::BadRequest("Hours worked must be between 0 and 24".to_string()));
        }

        // the entry's week has to be representable for the actual-hours rollup
        week::week_bounds(work_date)?;

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(TimeEntryDraft {
            employee_id,
            project_id,
            work_date,
            hours_worked,
            description,
        })
    }
}

/// The (employee, project, day) a time entry contributes its hours to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryTarget {
    pub employee_id: i64,
    pub project_id: i64,
    pub work_date: NaiveDate,
}

impl From<&TimeEntry> for EntryTarget {
    fn from(entry: &TimeEntry) -> Self {
        Self {
            employee_id: entry.employee_id,
            project_id: entry.project_id,
            work_date: entry.work_date,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEntryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub employee_id: Option<i64>,
    pub project_id: Option<i64>,
    pub limit: Option<i64>,
}

impl TimeEntryQuery {
    pub fn effective_limit(&self) -> i64 {
        clamp_limit(self.limit)
    }
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT)
}

#[derive(Debug, Deserialize)]
pub struct ProjectTimeEntryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

string_enum! {
    #[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum SummaryGroup {
        Employee => "employee",
        Project => "project",
    }
}

#[derive(Debug, Deserialize)]
pub struct TimeSummaryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub group_by: Option<String>,
}

impl TimeSummaryQuery {
    pub fn group(&self) -> Result<SummaryGroup, AppError> {
        match self.group_by.as_deref() {
            None => Ok(SummaryGroup::Employee),
            Some(raw) => raw.parse().map_err(|_| {
                AppError::BadRequest(
                    "Invalid group_by parameter. Use \"employee\" or \"project\"".to_string(),
                )
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeTimeSummary {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub total_hours: f64,
    pub total_entries: i64,
    pub avg_hours_per_entry: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectTimeSummary {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub total_hours: f64,
    pub total_entries: i64,
    pub unique_employees: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TimeSummary {
    Employee(Vec<EmployeeTimeSummary>),
    Project(Vec<ProjectTimeSummary>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn input(hours: f64) -> TimeEntryInput {
        TimeEntryInput {
            employee_id: Some(1),
            project_id: Some(1),
            work_date: Some("2024-03-05".parse().unwrap()),
            hours_worked: Some(hours),
            description: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_hours_bounds() {
        assert!(input(25.0).validate().is_err());
        assert!(input(0.0).validate().is_err());
        assert!(input(-3.0).validate().is_err());
        assert!(input(f64::NAN).validate().is_err());
        assert!(input(24.0).validate().is_ok());
        assert!(input(0.25).validate().is_ok());
    }

    #[test]
    fn test_work_date_at_the_calendar_edge_is_rejected() {
        let err = TimeEntryInput {
            work_date: Some(NaiveDate::MAX),
            ..input(8.0)
        }
        .validate()
        .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_blank_description_becomes_none() {
        let draft = input(8.0).validate().unwrap();
        assert_eq!(draft.description, None);
    }

    #[test]
    fn test_limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), 100);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(25)), 25);
        assert_eq!(clamp_limit(Some(50_000)), 1000);
    }

    #[test]
    fn test_group_by_parsing() {
        let query = |g: Option<&str>| TimeSummaryQuery {
            start_date: None,
            end_date: None,
            group_by: g.map(str::to_string),
        };

        assert_eq!(query(None).group().unwrap(), SummaryGroup::Employee);
        assert_eq!(
            query(Some("project")).group().unwrap(),
            SummaryGroup::Project
        );
        assert!(query(Some("team")).group().is_err());
    }
}
