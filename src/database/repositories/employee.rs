use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::database::models::{Employee, EmployeeDraft, WeeklyWorkload};
use crate::error::AppError;

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT
                id,
                name,
                email,
                position,
                is_active,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                (? = 0 OR is_active = 1)
            ORDER BY
                name
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            r#"
            SELECT
                id,
                name,
                email,
                position,
                is_active,
                created_at,
                updated_at
            FROM
                employees
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        Ok(super::employee_exists(&self.pool, id).await?)
    }

    /// Whether another employee already uses `email`.
    pub async fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM employees WHERE email = ? AND (? IS NULL OR id != ?)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    pub async fn create(&self, draft: EmployeeDraft) -> Result<Employee> {
        if self.email_taken(&draft.email, None).await? {
            return Err(duplicate_email().into());
        }

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO
                employees (name, email, position, is_active)
            VALUES
                (?, ?, ?, ?)
            RETURNING
                id,
                name,
                email,
                position,
                is_active,
                created_at,
                updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.position)
        .bind(draft.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(employee)
    }

    pub async fn update(&self, id: i64, draft: EmployeeDraft) -> Result<Option<Employee>> {
        if self.email_taken(&draft.email, Some(id)).await? {
            return Err(duplicate_email().into());
        }

        let employee = sqlx::query_as::<_, Employee>(
            r#"
            UPDATE
                employees
            SET
                name = ?,
                email = ?,
                position = ?,
                is_active = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE
                id = ?
            RETURNING
                id,
                name,
                email,
                position,
                is_active,
                created_at,
                updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.position)
        .bind(draft.is_active)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Soft delete. Returns false when no such employee exists.
    pub async fn deactivate(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE
                employees
            SET
                is_active = 0,
                updated_at = CURRENT_TIMESTAMP
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Planned and actual hours per week across all of the employee's projects.
    pub async fn workload(
        &self,
        employee_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<WeeklyWorkload>> {
        let workload = sqlx::query_as::<_, WeeklyWorkload>(
            r#"
            SELECT
                week_start_date,
                CAST(COALESCE(SUM(planned_hours), 0) AS REAL) AS total_planned_hours,
                CAST(COALESCE(SUM(actual_hours), 0) AS REAL) AS total_actual_hours,
                COUNT(DISTINCT project_id) AS project_count
            FROM
                weekly_planning
            WHERE
                employee_id = ?
                AND (? IS NULL OR week_start_date >= ?)
                AND (? IS NULL OR week_start_date <= ?)
            GROUP BY
                week_start_date
            ORDER BY
                week_start_date DESC
            "#,
        )
        .bind(employee_id)
        .bind(start_date)
        .bind(start_date)
        .bind(end_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(workload)
    }
}

fn duplicate_email() -> AppError {
    AppError::Conflict("Employee with this email already exists".to_string())
}
