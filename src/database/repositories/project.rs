use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::database::models::{Project, ProjectDraft, ProjectStatus, TeamMember};
use crate::error::AppError;

#[derive(Clone)]
pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<ProjectStatus>) -> Result<Vec<Project>> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT
                id,
                name,
                code,
                status,
                start_date,
                end_date,
                created_at,
                updated_at
            FROM
                projects
            WHERE
                (? IS NULL OR status = ?)
            ORDER BY
                name
            "#,
        )
        .bind(status)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Project>> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT
                id,
                name,
                code,
                status,
                start_date,
                end_date,
                created_at,
                updated_at
            FROM
                projects
            WHERE
                id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    pub async fn exists(&self, id: i64) -> Result<bool> {
        Ok(super::project_exists(&self.pool, id).await?)
    }

    pub async fn code_taken(&self, code: &str, exclude_id: Option<i64>) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM projects WHERE code = ? AND (? IS NULL OR id != ?)
            )
            "#,
        )
        .bind(code)
        .bind(exclude_id)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }

    pub async fn create(&self, draft: ProjectDraft) -> Result<Project> {
        if self.code_taken(&draft.code, None).await? {
            return Err(duplicate_code().into());
        }

        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO
                projects (name, code, status, start_date, end_date)
            VALUES
                (?, ?, ?, ?, ?)
            RETURNING
                id,
                name,
                code,
                status,
                start_date,
                end_date,
                created_at,
                updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.code)
        .bind(draft.status.unwrap_or_default())
        .bind(draft.start_date)
        .bind(draft.end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    /// Replaces the project's fields. A draft without a status keeps the
    /// stored one.
    pub async fn update(&self, id: i64, draft: ProjectDraft) -> Result<Option<Project>> {
        if self.code_taken(&draft.code, Some(id)).await? {
            return Err(duplicate_code().into());
        }

        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE
                projects
            SET
                name = ?,
                code = ?,
                status = COALESCE(?, status),
                start_date = ?,
                end_date = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE
                id = ?
            RETURNING
                id,
                name,
                code,
                status,
                start_date,
                end_date,
                created_at,
                updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.code)
        .bind(draft.status)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    pub async fn deactivate(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE
                projects
            SET
                status = ?,
                updated_at = CURRENT_TIMESTAMP
            WHERE
                id = ?
            "#,
        )
        .bind(ProjectStatus::Inactive)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Employees with at least one planning row on the project.
    pub async fn team(
        &self,
        project_id: i64,
        week_start_date: Option<NaiveDate>,
    ) -> Result<Vec<TeamMember>> {
        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT DISTINCT
                e.id,
                e.name,
                e.position,
                e.email
            FROM
                weekly_planning wp
                JOIN employees e ON e.id = wp.employee_id
            WHERE
                wp.project_id = ?
                AND (? IS NULL OR wp.week_start_date = ?)
            ORDER BY
                e.name
            "#,
        )
        .bind(project_id)
        .bind(week_start_date)
        .bind(week_start_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }
}

fn duplicate_code() -> AppError {
    AppError::Conflict("Project with this code already exists".to_string())
}
