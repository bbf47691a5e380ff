use anyhow::Result;
use chrono::NaiveDate;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::database::{
    models::{
        EmployeeTimeSummary, EntryTarget, ProjectTimeSummary, SummaryGroup, TimeEntry,
        TimeEntryDetail, TimeEntryDraft, TimeEntryQuery, TimeSummary,
    },
    transaction::DatabaseTransaction,
};
use crate::error::AppError;
use crate::services::hours::recompute_actual_hours;

#[derive(Clone)]
pub struct TimeEntryRepository {
    pool: SqlitePool,
}

impl TimeEntryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &TimeEntryQuery) -> Result<Vec<TimeEntryDetail>> {
        let entries = sqlx::query_as::<_, TimeEntryDetail>(
            r#"
            SELECT
                te.id,
                te.employee_id,
                te.project_id,
                te.work_date,
                te.hours_worked,
                te.description,
                te.created_at,
                e.name AS employee_name,
                p.name AS project_name,
                p.code AS project_code
            FROM
                time_entries te
                JOIN employees e ON e.id = te.employee_id
                JOIN projects p ON p.id = te.project_id
            WHERE
                (? IS NULL OR te.work_date >= ?)
                AND (? IS NULL OR te.work_date <= ?)
                AND (? IS NULL OR te.employee_id = ?)
                AND (? IS NULL OR te.project_id = ?)
            ORDER BY
                te.work_date DESC,
                e.name
            LIMIT ?
            "#,
        )
        .bind(query.start_date)
        .bind(query.start_date)
        .bind(query.end_date)
        .bind(query.end_date)
        .bind(query.employee_id)
        .bind(query.employee_id)
        .bind(query.project_id)
        .bind(query.project_id)
        .bind(query.effective_limit())
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<TimeEntryDetail>> {
        let entry = sqlx::query_as::<_, TimeEntryDetail>(
            r#"
            SELECT
                te.id,
                te.employee_id,
                te.project_id,
                te.work_date,
                te.hours_worked,
                te.description,
                te.created_at,
                e.name AS employee_name,
                p.name AS project_name,
                p.code AS project_code
            FROM
                time_entries te
                JOIN employees e ON e.id = te.employee_id
                JOIN projects p ON p.id = te.project_id
            WHERE
                te.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Records the entry and refreshes the planning row for its week.
    pub async fn create(&self, draft: TimeEntryDraft) -> Result<TimeEntry> {
        let entry = DatabaseTransaction::run(&self.pool, |tx| {
            Box::pin(async move {
                super::ensure_assignment_targets(&mut **tx, draft.employee_id, draft.project_id)
                    .await?;

                let entry = insert_entry(tx, &draft).await?;
                recompute_actual_hours(
                    &mut **tx,
                    entry.employee_id,
                    entry.project_id,
                    entry.work_date,
                )
                .await?;

                Ok(entry)
            })
        })
        .await?;

        Ok(entry)
    }

    /// Rewrites the entry. Both the week it left and the week it moved to
    /// get their actual hours recomputed.
    pub async fn update(&self, id: i64, draft: TimeEntryDraft) -> Result<Option<TimeEntry>> {
        let entry = DatabaseTransaction::run(&self.pool, |tx| {
            Box::pin(async move {
                let Some(existing) = fetch_entry(tx, id).await? else {
                    return Ok(None);
                };

                super::ensure_assignment_targets(&mut **tx, draft.employee_id, draft.project_id)
                    .await?;

                let updated = update_entry(tx, id, &draft).await?;

                let before = EntryTarget::from(&existing);
                let after = EntryTarget::from(&updated);
                recompute_target(tx, before).await?;
                if before != after {
                    recompute_target(tx, after).await?;
                }

                Ok(Some(updated))
            })
        })
        .await?;

        Ok(entry)
    }

    /// Removes the entry, returning it, or None when no such entry exists.
    pub async fn delete(&self, id: i64) -> Result<Option<TimeEntry>> {
        let entry = DatabaseTransaction::run(&self.pool, |tx| {
            Box::pin(async move {
                let Some(existing) = fetch_entry(tx, id).await? else {
                    return Ok(None);
                };

                sqlx::query("DELETE FROM time_entries WHERE id = ?")
                    .bind(id)
                    .execute(&mut **tx)
                    .await?;

                recompute_target(tx, EntryTarget::from(&existing)).await?;

                Ok(Some(existing))
            })
        })
        .await?;

        Ok(entry)
    }

    pub async fn summary(
        &self,
        group: SummaryGroup,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<TimeSummary> {
        let summary = match group {
            SummaryGroup::Employee => TimeSummary::Employee(
                sqlx::query_as::<_, EmployeeTimeSummary>(
                    r#"
                    SELECT
                        e.id,
                        e.name,
                        e.position,
                        CAST(COALESCE(SUM(te.hours_worked), 0) AS REAL) AS total_hours,
                        COUNT(te.id) AS total_entries,
                        CAST(COALESCE(AVG(te.hours_worked), 0) AS REAL) AS avg_hours_per_entry
                    FROM
                        employees e
                        LEFT JOIN time_entries te ON te.employee_id = e.id
                        AND (? IS NULL OR te.work_date >= ?)
                        AND (? IS NULL OR te.work_date <= ?)
                    GROUP BY
                        e.id,
                        e.name,
                        e.position
                    ORDER BY
                        total_hours DESC,
                        e.name
                    "#,
                )
                .bind(start_date)
                .bind(start_date)
                .bind(end_date)
                .bind(end_date)
                .fetch_all(&self.pool)
                .await?,
            ),
            SummaryGroup::Project => TimeSummary::Project(
                sqlx::query_as::<_, ProjectTimeSummary>(
                    r#"
                    SELECT
                        p.id,
                        p.name,
                        p.code,
                        CAST(COALESCE(SUM(te.hours_worked), 0) AS REAL) AS total_hours,
                        COUNT(te.id) AS total_entries,
                        COUNT(DISTINCT te.employee_id) AS unique_employees
                    FROM
                        projects p
                        LEFT JOIN time_entries te ON te.project_id = p.id
                        AND (? IS NULL OR te.work_date >= ?)
                        AND (? IS NULL OR te.work_date <= ?)
                    GROUP BY
                        p.id,
                        p.name,
                        p.code
                    ORDER BY
                        total_hours DESC,
                        p.name
                    "#,
                )
                .bind(start_date)
                .bind(start_date)
                .bind(end_date)
                .bind(end_date)
                .fetch_all(&self.pool)
                .await?,
            ),
        };

        Ok(summary)
    }
}

pub async fn fetch_entry(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> Result<Option<TimeEntry>, sqlx::Error> {
    sqlx::query_as::<_, TimeEntry>(
        r#"
        SELECT
            id,
            employee_id,
            project_id,
            work_date,
            hours_worked,
            description,
            created_at
        FROM
            time_entries
        WHERE
            id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await
}

pub async fn insert_entry(
    tx: &mut Transaction<'_, Sqlite>,
    draft: &TimeEntryDraft,
) -> Result<TimeEntry, sqlx::Error> {
    sqlx::query_as::<_, TimeEntry>(
        r#"
        INSERT INTO
            time_entries (employee_id, project_id, work_date, hours_worked, description)
        VALUES
            (?, ?, ?, ?, ?)
        RETURNING
            id,
            employee_id,
            project_id,
            work_date,
            hours_worked,
            description,
            created_at
        "#,
    )
    .bind(draft.employee_id)
    .bind(draft.project_id)
    .bind(draft.work_date)
    .bind(draft.hours_worked)
    .bind(&draft.description)
    .fetch_one(&mut **tx)
    .await
}

pub async fn update_entry(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    draft: &TimeEntryDraft,
) -> Result<TimeEntry, sqlx::Error> {
    sqlx::query_as::<_, TimeEntry>(
        r#"
        UPDATE
            time_entries
        SET
            employee_id = ?,
            project_id = ?,
            work_date = ?,
            hours_worked = ?,
            description = ?
        WHERE
            id = ?
        RETURNING
            id,
            employee_id,
            project_id,
            work_date,
            hours_worked,
            description,
            created_at
        "#,
    )
    .bind(draft.employee_id)
    .bind(draft.project_id)
    .bind(draft.work_date)
    .bind(draft.hours_worked)
    .bind(&draft.description)
    .bind(id)
    .fetch_one(&mut **tx)
    .await
}

async fn recompute_target(
    tx: &mut Transaction<'_, Sqlite>,
    target: EntryTarget,
) -> Result<u64, AppError> {
    recompute_actual_hours(
        &mut **tx,
        target.employee_id,
        target.project_id,
        target.work_date,
    )
    .await
}
