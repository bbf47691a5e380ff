use chrono::NaiveDate;
use sqlx::SqliteConnection;

use super::week::week_bounds;
use crate::error::AppError;

/// Rewrites `actual_hours` on the planning row for the week containing
/// `any_date` from the employee's time entries on that project.
///
/// Returns the number of planning rows touched. Time logged against a week
/// with no planning row is not an error; the update simply matches nothing.
pub async fn recompute_actual_hours(
    conn: &mut SqliteConnection,
    employee_id: i64,
    project_id: i64,
    any_date: NaiveDate,
) -> Result<u64, AppError> {
    let (start, end) = week_bounds(any_date)?;

    let result = sqlx::query(
        r#"
        UPDATE
            weekly_planning
        SET
            actual_hours = (
                SELECT
                    CAST(COALESCE(SUM(hours_worked), 0) AS REAL)
                FROM
                    time_entries
                WHERE
                    employee_id = ?
                    AND project_id = ?
                    AND work_date >= ?
                    AND work_date < ?
            ),
            updated_at = CURRENT_TIMESTAMP
        WHERE
            employee_id = ?
            AND project_id = ?
            AND week_start_date = ?
        "#,
    )
    .bind(employee_id)
    .bind(project_id)
    .bind(start)
    .bind(end)
    .bind(employee_id)
    .bind(project_id)
    .bind(start)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        log::debug!(
            "No planning row for employee {} on project {} in week {}, actual hours not stored",
            employee_id,
            project_id,
            start
        );
    }

    Ok(result.rows_affected())
}
