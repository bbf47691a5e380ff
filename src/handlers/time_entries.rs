use actix_web::{HttpRequest, HttpResponse, web};

use crate::database::models::{TimeEntryInput, TimeEntryQuery, TimeSummaryQuery};
use crate::database::repositories::TimeEntryRepository;
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;

fn entry_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Time entry {} not found", id))
}

pub async fn list_time_entries(
    repo: web::Data<TimeEntryRepository>,
    query: web::Query<TimeEntryQuery>,
) -> Result<HttpResponse, AppError> {
    let entries = repo.list(&query).await?;
    Ok(ApiResponse::ok(entries))
}

pub async fn get_time_entry(
    repo: web::Data<TimeEntryRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let entry = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| entry_not_found(id))?;

    Ok(ApiResponse::ok(entry))
}

pub async fn create_time_entry(
    req: HttpRequest,
    repo: web::Data<TimeEntryRepository>,
    input: web::Json<TimeEntryInput>,
) -> Result<HttpResponse, AppError> {
    let draft = input.into_inner().validate()?;
    let entry = repo.create(draft).await?;

    log::info!(
        "[{}] Logged {}h for employee {} on project {} ({})",
        req.correlation_id(),
        entry.hours_worked,
        entry.employee_id,
        entry.project_id,
        entry.work_date
    );

    Ok(ApiResponse::created(entry))
}

pub async fn update_time_entry(
    req: HttpRequest,
    repo: web::Data<TimeEntryRepository>,
    path: web::Path<i64>,
    input: web::Json<TimeEntryInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let draft = input.into_inner().validate()?;
    let entry = repo
        .update(id, draft)
        .await?
        .ok_or_else(|| entry_not_found(id))?;

    log::info!("[{}] Updated time entry {}", req.correlation_id(), id);

    Ok(ApiResponse::ok(entry))
}

pub async fn delete_time_entry(
    req: HttpRequest,
    repo: web::Data<TimeEntryRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    repo.delete(id).await?.ok_or_else(|| entry_not_found(id))?;

    log::info!("[{}] Deleted time entry {}", req.correlation_id(), id);

    Ok(ApiResponse::<()>::message("Time entry deleted successfully"))
}

/// Hours per employee or per project over an optional date range
pub async fn time_summary(
    repo: web::Data<TimeEntryRepository>,
    query: web::Query<TimeSummaryQuery>,
) -> Result<HttpResponse, AppError> {
    let group = query.group()?;
    let summary = repo
        .summary(group, query.start_date, query.end_date)
        .await?;
    Ok(ApiResponse::ok(summary))
}
