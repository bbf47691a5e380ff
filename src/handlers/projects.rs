use actix_web::{HttpRequest, HttpResponse, web};

use crate::database::models::{
    DateRangeQuery, ProjectInput, ProjectListQuery, ProjectTimeEntryQuery, TeamQuery,
    TimeEntryQuery,
};
use crate::database::repositories::{PlanningRepository, ProjectRepository, TimeEntryRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;
use crate::services::BudgetCalculator;

fn project_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Project {} not found", id))
}

async fn ensure_project(repo: &ProjectRepository, id: i64) -> Result<(), AppError> {
    if repo.exists(id).await? {
        Ok(())
    } else {
        Err(project_not_found(id))
    }
}

pub async fn list_projects(
    repo: web::Data<ProjectRepository>,
    query: web::Query<ProjectListQuery>,
) -> Result<HttpResponse, AppError> {
    let projects = repo.list(query.effective_status()).await?;
    Ok(ApiResponse::ok(projects))
}

pub async fn get_project(
    repo: web::Data<ProjectRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let project = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    Ok(ApiResponse::ok(project))
}

pub async fn create_project(
    req: HttpRequest,
    repo: web::Data<ProjectRepository>,
    input: web::Json<ProjectInput>,
) -> Result<HttpResponse, AppError> {
    let draft = input.into_inner().validate()?;
    let project = repo.create(draft).await?;

    log::info!(
        "[{}] Created project {} ({})",
        req.correlation_id(),
        project.id,
        project.code
    );

    Ok(ApiResponse::created(project))
}

pub async fn update_project(
    req: HttpRequest,
    repo: web::Data<ProjectRepository>,
    path: web::Path<i64>,
    input: web::Json<ProjectInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let draft = input.into_inner().validate()?;
    let project = repo
        .update(id, draft)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    log::info!("[{}] Updated project {}", req.correlation_id(), id);

    Ok(ApiResponse::ok(project))
}

pub async fn deactivate_project(
    req: HttpRequest,
    repo: web::Data<ProjectRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !repo.deactivate(id).await? {
        return Err(project_not_found(id));
    }

    log::info!("[{}] Deactivated project {}", req.correlation_id(), id);

    Ok(ApiResponse::<()>::message("Project deactivated successfully"))
}

/// Employees planned on the project, optionally for a single week
pub async fn project_team(
    repo: web::Data<ProjectRepository>,
    path: web::Path<i64>,
    query: web::Query<TeamQuery>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    ensure_project(&repo, project_id).await?;

    let team = repo.team(project_id, query.week_start_date).await?;
    Ok(ApiResponse::ok(team))
}

pub async fn project_planning(
    project_repo: web::Data<ProjectRepository>,
    planning_repo: web::Data<PlanningRepository>,
    path: web::Path<i64>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    ensure_project(&project_repo, project_id).await?;

    let rows = planning_repo
        .list_for_project(project_id, query.start_date, query.end_date)
        .await?;
    Ok(ApiResponse::ok(rows))
}

pub async fn project_time_entries(
    project_repo: web::Data<ProjectRepository>,
    time_entry_repo: web::Data<TimeEntryRepository>,
    path: web::Path<i64>,
    query: web::Query<ProjectTimeEntryQuery>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    ensure_project(&project_repo, project_id).await?;

    let query = query.into_inner();
    let entries = time_entry_repo
        .list(&TimeEntryQuery {
            start_date: query.start_date,
            end_date: query.end_date,
            employee_id: None,
            project_id: Some(project_id),
            limit: query.limit,
        })
        .await?;
    Ok(ApiResponse::ok(entries))
}

pub async fn project_budget(
    project_repo: web::Data<ProjectRepository>,
    calculator: web::Data<BudgetCalculator>,
    path: web::Path<i64>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse, AppError> {
    let project_id = path.into_inner();
    ensure_project(&project_repo, project_id).await?;

    let budget = calculator
        .project_budget(project_id, query.start_date, query.end_date)
        .await?;
    Ok(ApiResponse::ok(budget))
}
