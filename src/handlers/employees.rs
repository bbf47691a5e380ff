use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;

use crate::database::models::{
    DateRangeQuery, EffectiveRate, EmployeeInput, EmployeeListQuery, RateInput, RateLookupQuery,
};
use crate::database::repositories::{EmployeeRepository, RateHistoryRepository};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::middleware::RequestIdExt;

fn employee_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Employee {} not found", id))
}

async fn ensure_employee(repo: &EmployeeRepository, id: i64) -> Result<(), AppError> {
    if repo.exists(id).await? {
        Ok(())
    } else {
        Err(employee_not_found(id))
    }
}

/// List employees, active ones only unless `active_only=false`
pub async fn list_employees(
    repo: web::Data<EmployeeRepository>,
    query: web::Query<EmployeeListQuery>,
) -> Result<HttpResponse, AppError> {
    let employees = repo.list(query.active_only.unwrap_or(true)).await?;
    Ok(ApiResponse::ok(employees))
}

pub async fn get_employee(
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let employee = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;

    Ok(ApiResponse::ok(employee))
}

pub async fn create_employee(
    req: HttpRequest,
    repo: web::Data<EmployeeRepository>,
    input: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    let draft = input.into_inner().validate()?;
    let employee = repo.create(draft).await?;

    log::info!(
        "[{}] Created employee {} ({})",
        req.correlation_id(),
        employee.id,
        employee.email
    );

    Ok(ApiResponse::created(employee))
}

pub async fn update_employee(
    req: HttpRequest,
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
    input: web::Json<EmployeeInput>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let draft = input.into_inner().validate()?;
    let employee = repo
        .update(id, draft)
        .await?
        .ok_or_else(|| employee_not_found(id))?;

    log::info!("[{}] Updated employee {}", req.correlation_id(), id);

    Ok(ApiResponse::ok(employee))
}

/// Soft delete: the employee stays referenced by planning and time entries
pub async fn deactivate_employee(
    req: HttpRequest,
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    if !repo.deactivate(id).await? {
        return Err(employee_not_found(id));
    }

    log::info!("[{}] Deactivated employee {}", req.correlation_id(), id);

    Ok(ApiResponse::<()>::message("Employee deactivated successfully"))
}

pub async fn list_rates(
    employee_repo: web::Data<EmployeeRepository>,
    rate_repo: web::Data<RateHistoryRepository>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    ensure_employee(&employee_repo, employee_id).await?;

    let rates = rate_repo.list_for_employee(employee_id).await?;
    Ok(ApiResponse::ok(rates))
}

pub async fn add_rate(
    req: HttpRequest,
    rate_repo: web::Data<RateHistoryRepository>,
    path: web::Path<i64>,
    input: web::Json<RateInput>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    let draft = input.into_inner().validate()?;
    let rate = rate_repo.add_rate(employee_id, draft).await?;

    log::info!(
        "[{}] Rate {} recorded for employee {}",
        req.correlation_id(),
        rate.id,
        employee_id
    );

    Ok(ApiResponse::created(rate))
}

/// Rate in effect on `date`, today when omitted
pub async fn current_rate(
    employee_repo: web::Data<EmployeeRepository>,
    rate_repo: web::Data<RateHistoryRepository>,
    path: web::Path<i64>,
    query: web::Query<RateLookupQuery>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    ensure_employee(&employee_repo, employee_id).await?;

    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let rate_per_hour = rate_repo.rate_on(employee_id, date).await?;

    Ok(ApiResponse::ok(EffectiveRate {
        employee_id,
        date,
        rate_per_hour,
    }))
}

pub async fn workload(
    repo: web::Data<EmployeeRepository>,
    path: web::Path<i64>,
    query: web::Query<DateRangeQuery>,
) -> Result<HttpResponse, AppError> {
    let employee_id = path.into_inner();
    ensure_employee(&repo, employee_id).await?;

    let weeks = repo
        .workload(employee_id, query.start_date, query.end_date)
        .await?;
    Ok(ApiResponse::ok(weeks))
}
