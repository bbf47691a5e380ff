use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{BudgetLine, required};
use crate::{error::AppError, services::week};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeeklyPlanning {
    pub id: i64,
    pub employee_id: i64,
    pub project_id: i64,
    pub week_start_date: NaiveDate,
    pub planned_hours: f64,
    pub actual_hours: f64,
    pub created_by_manager_id: Option<i64>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanningInput {
    pub employee_id: Option<i64>,
    pub project_id: Option<i64>,
    pub week_start_date: Option<NaiveDate>,
    pub planned_hours: Option<f64>,
    pub created_by_manager_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanningDraft {
    pub employee_id: i64,
    pub project_id: i64,
    pub week_start_date: NaiveDate,
    pub planned_hours: f64,
    pub created_by_manager_id: Option<i64>,
}

impl PlanningInput {
    pub fn validate(self) -> Result<PlanningDraft, AppError> {
        let employee_id = required(self.employee_id, "employee_id")?;
        let project_id = required(self.project_id, "project_id")?;
        let week_start_date = required(self.week_start_date, "week_start_date")?;
        let planned_hours = required(self.planned_hours, "planned_hours")?;

        require_week_start(week_start_date)?;

        if !planned_hours.is_finite() || planned_hours < 0.0 {
            return Err(AppError::BadRequest("Planned hours cannot be negative".to_string()));
        }

        Ok(PlanningDraft {
            employee_id,
            project_id,
            week_start_date,
            planned_hours,
            created_by_manager_id: self.created_by_manager_id,
        })
    }
}

/// Rejects dates that do not start a planning week.
pub fn require_week_start(date: NaiveDate) -> Result<NaiveDate, AppError> {
    if !week::is_week_start(date) {
        return Err(AppError::BadRequest(format!(
            "week_start_date must be a Monday, got {} (week starts {})",
            date,
            week::week_start(date)?
        )));
    }

    week::week_end_exclusive(date)?;
    Ok(date)
}

/// A planning row joined with the employee and project it refers to.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlanningRow {
    pub id: i64,
    pub employee_id: i64,
    pub project_id: i64,
    pub week_start_date: NaiveDate,
    pub planned_hours: f64,
    pub actual_hours: f64,
    pub created_by_manager_id: Option<i64>,
    pub employee_name: String,
    pub position: String,
    pub project_name: String,
    pub project_code: String,
}

/// A planning row with its rate and budget figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningOverview {
    #[serde(flatten)]
    pub row: PlanningRow,
    #[serde(flatten)]
    pub budget: BudgetLine,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
