use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::database::models::{PlanningDraft, PlanningRow, WeeklyPlanning};

#[derive(Clone)]
pub struct PlanningRepository {
    pool: SqlitePool,
}

impl PlanningRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts the planning row, or overwrites `planned_hours` on the row
    /// already holding this (employee, project, week) key. Derived
    /// `actual_hours` and `created_by_manager_id` are left untouched.
    pub async fn upsert(&self, draft: PlanningDraft) -> Result<WeeklyPlanning> {
        let mut conn = self.pool.acquire().await?;
        super::ensure_assignment_targets(&mut conn, draft.employee_id, draft.project_id).await?;

        let planning = sqlx::query_as::<_, WeeklyPlanning>(
            r#"
            INSERT INTO
                weekly_planning (
                    employee_id,
                    project_id,
                    week_start_date,
                    planned_hours,
                    created_by_manager_id
                )
            VALUES
                (?, ?, ?, ?, ?)
            ON CONFLICT (employee_id, project_id, week_start_date) DO UPDATE
            SET
                planned_hours = excluded.planned_hours,
                updated_at = CURRENT_TIMESTAMP
            RETURNING
                id,
                employee_id,
                project_id,
                week_start_date,
                planned_hours,
                actual_hours,
                created_by_manager_id,
                created_at,
                updated_at
            "#,
        )
        .bind(draft.employee_id)
        .bind(draft.project_id)
        .bind(draft.week_start_date)
        .bind(draft.planned_hours)
        .bind(draft.created_by_manager_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(planning)
    }

    pub async fn find_by_key(
        &self,
        employee_id: i64,
        project_id: i64,
        week_start_date: NaiveDate,
    ) -> Result<Option<WeeklyPlanning>> {
        let planning = sqlx::query_as::<_, WeeklyPlanning>(
            r#"
            SELECT
                id,
                employee_id,
                project_id,
                week_start_date,
                planned_hours,
                actual_hours,
                created_by_manager_id,
                created_at,
                updated_at
            FROM
                weekly_planning
            WHERE
                employee_id = ?
                AND project_id = ?
                AND week_start_date = ?
            "#,
        )
        .bind(employee_id)
        .bind(project_id)
        .bind(week_start_date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(planning)
    }

    pub async fn list_for_week(&self, week_start_date: NaiveDate) -> Result<Vec<PlanningRow>> {
        let rows = sqlx::query_as::<_, PlanningRow>(
            r#"
            SELECT
                wp.id,
                wp.employee_id,
                wp.project_id,
                wp.week_start_date,
                wp.planned_hours,
                wp.actual_hours,
                wp.created_by_manager_id,
                e.name AS employee_name,
                e.position,
                p.name AS project_name,
                p.code AS project_code
            FROM
                weekly_planning wp
                JOIN employees e ON e.id = wp.employee_id
                JOIN projects p ON p.id = wp.project_id
            WHERE
                wp.week_start_date = ?
            ORDER BY
                e.name,
                p.name
            "#,
        )
        .bind(week_start_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_for_project(
        &self,
        project_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<PlanningRow>> {
        let rows = sqlx::query_as::<_, PlanningRow>(
            r#"
            SELECT
                wp.id,
                wp.employee_id,
                wp.project_id,
                wp.week_start_date,
                wp.planned_hours,
                wp.actual_hours,
                wp.created_by_manager_id,
                e.name AS employee_name,
                e.position,
                p.name AS project_name,
                p.code AS project_code
            FROM
                weekly_planning wp
                JOIN employees e ON e.id = wp.employee_id
                JOIN projects p ON p.id = wp.project_id
            WHERE
                wp.project_id = ?
                AND (? IS NULL OR wp.week_start_date >= ?)
                AND (? IS NULL OR wp.week_start_date <= ?)
            ORDER BY
                wp.week_start_date DESC,
                e.name
            "#,
        )
        .bind(project_id)
        .bind(start_date)
        .bind(start_date)
        .bind(end_date)
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns false when no row had this id.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM weekly_planning WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
