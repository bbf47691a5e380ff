use actix_web::{HttpRequest, HttpResponse, web};
use chrono::NaiveDate;

use crate::database::models::{PlanningInput, require_week_start};
use crate::database::repositories::PlanningRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;
use crate::services::BudgetCalculator;

/// Planning rows for the week with rate and budget per row
pub async fn week_planning(
    calculator: web::Data<BudgetCalculator>,
    path: web::Path<NaiveDate>,
) -> Result<HttpResponse, AppError> {
    let week_start_date = require_week_start(path.into_inner())?;
    let rows = calculator.week_overview(week_start_date).await?;
    Ok(ApiResponse::ok(rows))
}

pub async fn upsert_planning(
    req: HttpRequest,
    repo: web::Data<PlanningRepository>,
    input: web::Json<PlanningInput>,
) -> Result<HttpResponse, AppError> {
    let draft = input.into_inner().validate()?;
    let planning = repo.upsert(draft).await?;

    log::info!(
        "[{}] Planned {}h for employee {} on project {} in week {}",
        req.correlation_id(),
        planning.planned_hours,
        planning.employee_id,
        planning.project_id,
        planning.week_start_date
    );

    Ok(ApiResponse::ok(planning))
}

pub async fn week_budget(
    calculator: web::Data<BudgetCalculator>,
    path: web::Path<NaiveDate>,
) -> Result<HttpResponse, AppError> {
    let week_start_date = require_week_start(path.into_inner())?;
    let budget = calculator.week_budget(week_start_date).await?;
    Ok(ApiResponse::ok(budget))
}

pub async fn delete_planning(
    req: HttpRequest,
    repo: web::Data<PlanningRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !repo.delete(id).await? {
        return Err(AppError::NotFound(format!("Planning entry {} not found", id)));
    }

    log::info!("[{}] Deleted planning entry {}", req.correlation_id(), id);

    Ok(ApiResponse::<()>::message("Planning entry deleted successfully"))
}
