use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::required;
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RateHistory {
    pub id: i64,
    pub employee_id: i64,
    pub rate_per_hour: f64,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateInput {
    pub rate_per_hour: Option<f64>,
    pub effective_from: Option<NaiveDate>,
    pub effective_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateDraft {
    pub rate_per_hour: f64,
    pub effective_from: NaiveDate,
    pub effective_to: Option<NaiveDate>,
}

impl RateDraft {
    /// An open-ended rate supersedes the employee's current open row.
    pub fn is_open_ended(&self) -> bool {
        self.effective_to.is_none()
    }
}

impl RateInput {
    pub fn validate(self) -> Result<RateDraft, AppError> {
        let rate_per_hour = required(self.rate_per_hour, "rate_per_hour")?;
        let effective_from = required(self.effective_from, "effective_from")?;

        if !rate_per_hour.is_finite() || rate_per_hour <= 0.0 {
            return Err(AppError::BadRequest("Rate per hour must be greater than 0".to_string()));
        }

        if let Some(effective_to) = self.effective_to {
            if effective_to < effective_from {
                return Err(AppError::BadRequest(
                    "effective_to cannot be earlier than effective_from".to_string(),
                ));
            }
        }

        Ok(RateDraft {
            rate_per_hour,
            effective_from,
            effective_to: self.effective_to,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct RateLookupQuery {
    pub date: Option<NaiveDate>,
}

/// The rate in effect for an employee on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EffectiveRate {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub rate_per_hour: f64,
}
