use actix_web::{HttpRequest, error, web};

use crate::error::AppError;
use crate::handlers::health;

pub mod employees;
pub mod planning;
pub mod projects;
pub mod time_entries;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("/health", web::get().to(health::health))
        .service(
            web::scope("/api")
                .configure(employees::configure)
                .configure(projects::configure)
                .configure(planning::configure)
                .configure(time_entries::configure),
        );
}

// Malformed bodies, query strings and path segments are client errors
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        let message = format!("Invalid request body: {}", err);
        error::Error::from(AppError::BadRequest(message))
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        let message = format!("Invalid query parameters: {}", err);
        error::Error::from(AppError::BadRequest(message))
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        let message = format!("Invalid path parameter: {}", err);
        error::Error::from(AppError::BadRequest(message))
    })
}
