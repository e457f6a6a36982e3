use actix_web::web;

use crate::handlers::shuffle_handler;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/shuffle")
            .service(web::resource(["", "/"]).route(web::post().to(shuffle_handler::shuffle)))
            .service(web::resource("/players").route(web::post().to(shuffle_handler::shuffle_by_ids)))
            .service(
                web::resource("/announcement")
                    .route(web::post().to(shuffle_handler::announcement)),
            ),
    );
}
