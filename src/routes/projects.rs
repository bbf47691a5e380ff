use actix_web::web;

use crate::handlers::projects;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::list_projects))
            .route("", web::post().to(projects::create_project))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::put().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::deactivate_project))
            .route("/{id}/team", web::get().to(projects::project_team))
            .route("/{id}/planning", web::get().to(projects::project_planning))
            .route(
                "/{id}/time-entries",
                web::get().to(projects::project_time_entries),
            )
            .route("/{id}/budget", web::get().to(projects::project_budget)),
    );
}
