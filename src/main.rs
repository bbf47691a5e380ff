use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, middleware::Logger};
use anyhow::Result;

use resource_planning::database::init_database;
use resource_planning::middleware::{CORRELATION_ID_HEADER, RequestIdMiddleware};
use resource_planning::{AppState, Config};

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (.env first, then the process environment)
    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!(
        "Starting resource planning API (environment: {})",
        config.environment
    );

    let pool = init_database(&config.database_url, config.database_max_connections).await?;
    log::info!("Database initialized");

    let state = AppState::new(pool.clone());
    let cors_origin = config.cors_origin.clone();
    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        let state = state.clone();

        App::new()
            .wrap(
                Cors::default()
                    .allowed_origin(&cors_origin)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        header::CONTENT_TYPE,
                        header::ACCEPT,
                        header::HeaderName::from_static(CORRELATION_ID_HEADER),
                    ])
                    .expose_headers(vec![header::HeaderName::from_static(CORRELATION_ID_HEADER)])
                    .max_age(3600),
            )
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
            .configure(move |cfg| state.configure(cfg))
    })
    .bind(&server_address)?
    .run()
    .await?;

    log::info!("Server stopped, closing database pool");
    pool.close().await;

    Ok(())
}
