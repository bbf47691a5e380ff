use anyhow::Result;
use chrono::{Days, NaiveDate};
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::database::{
    models::{RateDraft, RateHistory},
    transaction::DatabaseTransaction,
};
use crate::error::AppError;
use crate::services::rates::resolve_rate;

#[derive(Clone)]
pub struct RateHistoryRepository {
    pool: SqlitePool,
}

impl RateHistoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list_for_employee(&self, employee_id: i64) -> Result<Vec<RateHistory>> {
        let rates = sqlx::query_as::<_, RateHistory>(
            r#"
            SELECT
                id,
                employee_id,
                rate_per_hour,
                effective_from,
                effective_to,
                created_at
            FROM
                rate_history
            WHERE
                employee_id = ?
            ORDER BY
                effective_from DESC,
                id DESC
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rates)
    }

    /// Adds a rate for the employee. An open-ended rate first closes the
    /// currently open row on the day before it takes effect.
    pub async fn add_rate(&self, employee_id: i64, draft: RateDraft) -> Result<RateHistory> {
        let rate = DatabaseTransaction::run(&self.pool, |tx| {
            Box::pin(async move {
                if !super::employee_exists(&mut **tx, employee_id).await? {
                    return Err(AppError::NotFound(format!("Employee {} not found", employee_id)));
                }

                if draft.is_open_ended() {
                    close_open_rate(tx, employee_id, draft.effective_from).await?;
                }

                Ok(insert_rate(tx, employee_id, &draft).await?)
            })
        })
        .await?;

        log::info!(
            "Added rate {} for employee {} effective {}",
            rate.rate_per_hour,
            employee_id,
            rate.effective_from
        );

        Ok(rate)
    }

    pub async fn rate_on(&self, employee_id: i64, date: NaiveDate) -> Result<f64> {
        Ok(resolve_rate(&self.pool, employee_id, date).await?)
    }
}

/// Ends the employee's open rate the day before `new_from`.
///
/// Backdated rates are not rejected: an open row that starts on or after
/// `new_from` ends up with an empty interval and never resolves again.
pub async fn close_open_rate(
    tx: &mut Transaction<'_, Sqlite>,
    employee_id: i64,
    new_from: NaiveDate,
) -> Result<u64, AppError> {
    let close_on = new_from
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| AppError::BadRequest("effective_from is out of range".to_string()))?;

    let result = sqlx::query(
        r#"
        UPDATE
            rate_history
        SET
            effective_to = ?
        WHERE
            employee_id = ?
            AND effective_to IS NULL
        "#,
    )
    .bind(close_on)
    .bind(employee_id)
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() > 0 {
        log::debug!(
            "Closed {} open rate(s) for employee {} on {}",
            result.rows_affected(),
            employee_id,
            close_on
        );
    }

    Ok(result.rows_affected())
}

pub async fn insert_rate(
    tx: &mut Transaction<'_, Sqlite>,
    employee_id: i64,
    draft: &RateDraft,
) -> Result<RateHistory, sqlx::Error> {
    sqlx::query_as::<_, RateHistory>(
        r#"
        INSERT INTO
            rate_history (employee_id, rate_per_hour, effective_from, effective_to)
        VALUES
            (?, ?, ?, ?)
        RETURNING
            id,
            employee_id,
            rate_per_hour,
            effective_from,
            effective_to,
            created_at
        "#,
    )
    .bind(employee_id)
    .bind(draft.rate_per_hour)
    .bind(draft.effective_from)
    .bind(draft.effective_to)
    .fetch_one(&mut **tx)
    .await
}
