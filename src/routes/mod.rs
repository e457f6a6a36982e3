use actix_web::web;

pub mod auth;
pub mod football;
pub mod officiating;
pub mod shuffle;
pub mod status;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(auth::configure)
            .configure(status::configure)
            .configure(football::configure)
            .configure(officiating::configure)
            .configure(shuffle::configure),
    );
}
