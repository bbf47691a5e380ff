use chrono::NaiveDate;
use sqlx::{Executor, Sqlite};

/// Hourly rate in effect for `employee_id` on `on_date`.
///
/// Among the rate rows whose interval contains the date, the one with the
/// latest `effective_from` wins, ties going to the most recently inserted
/// row. An employee with no matching row resolves to 0.
pub async fn resolve_rate<'e, E>(
    executor: E,
    employee_id: i64,
    on_date: NaiveDate,
) -> Result<f64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rate = sqlx::query_scalar::<_, f64>(
        r#"
        SELECT
            rate_per_hour
        FROM
            rate_history
        WHERE
            employee_id = ?
            AND effective_from <= ?
            AND (effective_to IS NULL OR effective_to >= ?)
        ORDER BY
            effective_from DESC,
            id DESC
        LIMIT 1
        "#,
    )
    .bind(employee_id)
    .bind(on_date)
    .bind(on_date)
    .fetch_optional(executor)
    .await?;

    Ok(rate.unwrap_or(0.0))
}
