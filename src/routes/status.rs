use actix_web::{get, web, HttpResponse};
use sqlx::SqlitePool;

use crate::handlers::status_handler;

#[get("/health")]
async fn health(pool: web::Data<SqlitePool>) -> HttpResponse {
    status_handler::health(pool).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/status")
            .service(health)
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(status_handler::list_status_checks))
                    .route(web::post().to(status_handler::create_status_check)),
            )
            .service(web::resource("/{id}").route(web::get().to(status_handler::get_status_check))),
    );
}
