use anyhow::Result;
use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::rates::resolve_rate;
use crate::database::{
    models::{
        BudgetLine, BudgetPeriod, BudgetSummary, PlanningOverview, PlanningRow, ProjectBudget,
        WeekBudget,
    },
    repositories::PlanningRepository,
};

/// Prices planning rows with the rate in effect at the start of their week.
#[derive(Clone)]
pub struct BudgetCalculator {
    pool: SqlitePool,
    planning: PlanningRepository,
}

impl BudgetCalculator {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            planning: PlanningRepository::new(pool.clone()),
            pool,
        }
    }

    pub async fn price_rows(&self, rows: Vec<PlanningRow>) -> Result<Vec<PlanningOverview>> {
        let mut conn = self.pool.acquire().await?;
        let mut priced = Vec::with_capacity(rows.len());

        for row in rows {
            let rate = resolve_rate(&mut *conn, row.employee_id, row.week_start_date).await?;
            let budget = BudgetLine::compute(row.planned_hours, row.actual_hours, rate);
            priced.push(PlanningOverview { row, budget });
        }

        Ok(priced)
    }

    /// Planning rows for the week, each with its rate and budget figures.
    pub async fn week_overview(&self, week_start_date: NaiveDate) -> Result<Vec<PlanningOverview>> {
        let rows = self.planning.list_for_week(week_start_date).await?;
        self.price_rows(rows).await
    }

    pub async fn week_budget(&self, week_start_date: NaiveDate) -> Result<WeekBudget> {
        let details = self.week_overview(week_start_date).await?;

        Ok(WeekBudget {
            week_start_date,
            summary: BudgetSummary::from_overviews(&details),
            details,
        })
    }

    pub async fn project_budget(
        &self,
        project_id: i64,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<ProjectBudget> {
        let rows = self
            .planning
            .list_for_project(project_id, start_date, end_date)
            .await?;
        let priced = self.price_rows(rows).await?;

        Ok(ProjectBudget {
            project_id,
            period: BudgetPeriod {
                start_date,
                end_date,
            },
            summary: BudgetSummary::from_overviews(&priced),
        })
    }
}
