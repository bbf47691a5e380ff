use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

use crate::error::AppError;

pub async fn health(pool: web::Data<SqlitePool>) -> Result<HttpResponse, AppError> {
    sqlx::query("SELECT 1").execute(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    })))
}
