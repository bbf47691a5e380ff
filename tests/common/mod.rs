#![allow(dead_code)]

use actix_web::{body::MessageBody, dev::ServiceResponse, http::StatusCode, test};
use anyhow::Result;
use chrono::NaiveDate;
use fake::{
    Fake,
    faker::{company::en::CompanyName, name::en::Name},
};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;

use resource_planning::database::init_database;
use resource_planning::database::models::{
    Employee, EmployeeInput, PlanningInput, Project, ProjectInput, RateInput, TimeEntry,
    TimeEntryInput, WeeklyPlanning,
};
use resource_planning::{AppState, Config};

// Each context owns its own SQLite file, removed with the temp dir
pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub state: AppState,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());
        let config = Config::test_config(&database_url);

        let pool = init_database(&config.database_url, config.database_max_connections).await?;
        let state = AppState::new(pool.clone());

        Ok(TestContext {
            pool,
            config,
            state,
            temp_dir,
        })
    }

    pub async fn seed_employee(&self) -> Employee {
        let name: String = Name().fake();
        self.seed_employee_named(&name).await
    }

    pub async fn seed_employee_named(&self, name: &str) -> Employee {
        let draft = EmployeeInput {
            name: Some(name.to_string()),
            email: Some(format!("{}@example.com", Uuid::new_v4().simple())),
            position: Some("Engineer".to_string()),
            is_active: None,
        }
        .validate()
        .expect("valid employee");

        self.state
            .employee_repository
            .create(draft)
            .await
            .expect("Failed to seed employee")
    }

    pub async fn seed_project(&self) -> Project {
        let name: String = CompanyName().fake();
        self.seed_project_named(&name).await
    }

    pub async fn seed_project_named(&self, name: &str) -> Project {
        let draft = ProjectInput {
            name: Some(name.to_string()),
            code: Some(format!("P-{}", &Uuid::new_v4().simple().to_string()[..8])),
            ..Default::default()
        }
        .validate()
        .expect("valid project");

        self.state
            .project_repository
            .create(draft)
            .await
            .expect("Failed to seed project")
    }

    pub async fn seed_rate(&self, employee_id: i64, rate: f64, from: &str) {
        let draft = RateInput {
            rate_per_hour: Some(rate),
            effective_from: Some(date(from)),
            effective_to: None,
        }
        .validate()
        .expect("valid rate");

        self.state
            .rate_history_repository
            .add_rate(employee_id, draft)
            .await
            .expect("Failed to seed rate");
    }

    pub async fn seed_planning(
        &self,
        employee_id: i64,
        project_id: i64,
        week: &str,
        planned_hours: f64,
    ) -> WeeklyPlanning {
        let draft = PlanningInput {
            employee_id: Some(employee_id),
            project_id: Some(project_id),
            week_start_date: Some(date(week)),
            planned_hours: Some(planned_hours),
            created_by_manager_id: None,
        }
        .validate()
        .expect("valid planning");

        self.state
            .planning_repository
            .upsert(draft)
            .await
            .expect("Failed to seed planning")
    }

    pub async fn seed_time_entry(
        &self,
        employee_id: i64,
        project_id: i64,
        work_date: &str,
        hours: f64,
    ) -> TimeEntry {
        let draft = TimeEntryInput {
            employee_id: Some(employee_id),
            project_id: Some(project_id),
            work_date: Some(date(work_date)),
            hours_worked: Some(hours),
            description: None,
        }
        .validate()
        .expect("valid time entry");

        self.state
            .time_entry_repository
            .create(draft)
            .await
            .expect("Failed to seed time entry")
    }

    pub async fn actual_hours(&self, employee_id: i64, project_id: i64, week: &str) -> f64 {
        self.state
            .planning_repository
            .find_by_key(employee_id, project_id, date(week))
            .await
            .expect("Failed to load planning")
            .expect("planning row exists")
            .actual_hours
    }
}

pub fn setup_test_env() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("valid ISO date")
}

/// Status plus parsed JSON envelope of a response.
pub async fn read_json<B: MessageBody>(resp: ServiceResponse<B>) -> (StatusCode, Value) {
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

pub async fn assert_record_count(pool: &SqlitePool, table: &str, expected_count: i64) {
    let query = format!("SELECT COUNT(*) FROM {}", table);
    let count = sqlx::query_scalar::<_, i64>(&query)
        .fetch_one(pool)
        .await
        .expect("Failed to count records");

    assert_eq!(
        count, expected_count,
        "Expected {} records in {} table, but found {}",
        expected_count, table, count
    );
}
