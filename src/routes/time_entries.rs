use actix_web::web;

use crate::handlers::time_entries;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/time-entries")
            .route("", web::get().to(time_entries::list_time_entries))
            .route("", web::post().to(time_entries::create_time_entry))
            // Must precede /{id}
            .route("/summary", web::get().to(time_entries::time_summary))
            .route("/{id}", web::get().to(time_entries::get_time_entry))
            .route("/{id}", web::put().to(time_entries::update_time_entry))
            .route("/{id}", web::delete().to(time_entries::delete_time_entry)),
    );
}
