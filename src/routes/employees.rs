use actix_web::web;

use crate::handlers::employees;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employees")
            .route("", web::get().to(employees::list_employees))
            .route("", web::post().to(employees::create_employee))
            .route("/{id}", web::get().to(employees::get_employee))
            .route("/{id}", web::put().to(employees::update_employee))
            .route("/{id}", web::delete().to(employees::deactivate_employee))
            .route("/{id}/rates", web::get().to(employees::list_rates))
            .route("/{id}/rates", web::post().to(employees::add_rate))
            .route("/{id}/rates/current", web::get().to(employees::current_rate))
            .route("/{id}/workload", web::get().to(employees::workload)),
    );
}
