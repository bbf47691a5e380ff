use actix_web::web;
use sqlx::SqlitePool;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::AppError;

use database::repositories::{
    EmployeeRepository, PlanningRepository, ProjectRepository, RateHistoryRepository,
    TimeEntryRepository,
};
use services::BudgetCalculator;

/// Shared handles registered as app data on every worker.
#[derive(Clone)]
pub struct AppState {
    pub pool: web::Data<SqlitePool>,
    pub employee_repository: web::Data<EmployeeRepository>,
    pub project_repository: web::Data<ProjectRepository>,
    pub rate_history_repository: web::Data<RateHistoryRepository>,
    pub planning_repository: web::Data<PlanningRepository>,
    pub time_entry_repository: web::Data<TimeEntryRepository>,
    pub budget_calculator: web::Data<BudgetCalculator>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            employee_repository: web::Data::new(EmployeeRepository::new(pool.clone())),
            project_repository: web::Data::new(ProjectRepository::new(pool.clone())),
            rate_history_repository: web::Data::new(RateHistoryRepository::new(pool.clone())),
            planning_repository: web::Data::new(PlanningRepository::new(pool.clone())),
            time_entry_repository: web::Data::new(TimeEntryRepository::new(pool.clone())),
            budget_calculator: web::Data::new(BudgetCalculator::new(pool.clone())),
            pool: web::Data::new(pool),
        }
    }

    /// Registers app data and all routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.pool.clone())
            .app_data(self.employee_repository.clone())
            .app_data(self.project_repository.clone())
            .app_data(self.rate_history_repository.clone())
            .app_data(self.planning_repository.clone())
            .app_data(self.time_entry_repository.clone())
            .app_data(self.budget_calculator.clone())
            .configure(routes::configure);
    }
}
