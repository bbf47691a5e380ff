use actix_web::web;

use crate::handlers::planning;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/planning")
            .route("", web::post().to(planning::upsert_planning))
            .route("/entry/{id}", web::delete().to(planning::delete_planning))
            .route("/{week}", web::get().to(planning::week_planning))
            .route("/{week}/budget", web::get().to(planning::week_budget)),
    );
}
