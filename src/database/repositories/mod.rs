pub mod employee;
pub mod planning;
pub mod project;
pub mod rate_history;
pub mod time_entry;

pub use employee::EmployeeRepository;
pub use planning::PlanningRepository;
pub use project::ProjectRepository;
pub use rate_history::RateHistoryRepository;
pub use time_entry::TimeEntryRepository;

use sqlx::{Executor, Sqlite};

use crate::error::AppError;

pub async fn employee_exists<'e, E>(executor: E, employee_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM employees WHERE id = ?)")
        .bind(employee_id)
        .fetch_one(executor)
        .await
}

pub async fn project_exists<'e, E>(executor: E, project_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM projects WHERE id = ?)")
        .bind(project_id)
        .fetch_one(executor)
        .await
}

/// Errors with NotFound unless both referenced rows exist.
pub async fn ensure_assignment_targets(
    conn: &mut sqlx::SqliteConnection,
    employee_id: i64,
    project_id: i64,
) -> Result<(), AppError> {
    if !employee_exists(&mut *conn, employee_id).await? {
        return Err(AppError::NotFound(format!("Employee {} not found", employee_id)));
    }
    if !project_exists(&mut *conn, project_id).await? {
        return Err(AppError::NotFound(format!("Project {} not found", project_id)));
    }
    Ok(())
}
