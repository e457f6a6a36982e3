//! Ratings and analyses; every route needs an Admin or Referee token.

use actix_web::web;

use crate::handlers::{analysis_handler, rating_handler};
use crate::middleware::RoleMiddleware;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/playerratings")
            .wrap(RoleMiddleware::staff())
            .service(
                web::resource(["", "/"]).route(web::post().to(rating_handler::create_rating)),
            )
            .service(web::resource("/top-rated").route(web::get().to(rating_handler::top_rated)))
            .service(
                web::resource("/man-of-match")
                    .route(web::get().to(rating_handler::man_of_the_match)),
            )
            .service(
                web::resource("/match/{match_id}")
                    .route(web::get().to(rating_handler::ratings_for_match)),
            )
            .service(
                web::resource("/player/{player_id}")
                    .route(web::get().to(rating_handler::ratings_for_player)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(rating_handler::get_rating))
                    .route(web::put().to(rating_handler::update_rating))
                    .route(web::delete().to(rating_handler::delete_rating)),
            ),
    );

    cfg.service(
        web::scope("/matchanalysis")
            .wrap(RoleMiddleware::staff())
            .service(web::resource("/pending").route(web::get().to(analysis_handler::pending)))
            .service(
                web::resource("/match/{match_id}")
                    .route(web::get().to(analysis_handler::get_for_match))
                    .route(web::post().to(analysis_handler::create_analysis)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(analysis_handler::update_analysis))
                    .route(web::delete().to(analysis_handler::delete_analysis)),
            ),
    );
}
