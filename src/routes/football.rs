//! Public reads over the club data; writes check the caller's role in
//! the handler.

use actix_web::web;

use crate::handlers::{
    match_handler, performance_handler, player_handler, statistics_handler, team_handler,
    tournament_handler,
};

fn teams(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/teams")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(team_handler::list_teams))
                    .route(web::post().to(team_handler::create_team)),
            )
            .service(
                web::resource("/{id}/players").route(web::get().to(team_handler::get_team_players)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(team_handler::get_team))
                    .route(web::put().to(team_handler::update_team))
                    .route(web::delete().to(team_handler::delete_team)),
            ),
    );
}

fn players(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/players")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(player_handler::list_players))
                    .route(web::post().to(player_handler::create_player)),
            )
            .service(
                web::resource("/import").route(web::post().to(player_handler::import_players)),
            )
            .service(
                web::resource("/{id}/statistics")
                    .route(web::get().to(player_handler::get_player_statistics)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(player_handler::get_player))
                    .route(web::put().to(player_handler::update_player))
                    .route(web::delete().to(player_handler::delete_player)),
            ),
    );
}

fn matches(cfg: &mut web::ServiceConfig) {
    // Fixed segments go before `/{id}`.
    cfg.service(
        web::scope("/matches")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(match_handler::list_matches))
                    .route(web::post().to(match_handler::create_match)),
            )
            .service(web::resource("/upcoming").route(web::get().to(match_handler::upcoming_matches)))
            .service(web::resource("/recent").route(web::get().to(match_handler::recent_matches)))
            .service(web::resource("/{id}/score").route(web::put().to(match_handler::update_score)))
            .service(web::resource("/{id}/status").route(web::put().to(match_handler::update_status)))
            .service(
                web::resource("/{id}/performances")
                    .route(web::get().to(performance_handler::list_performances))
                    .route(web::post().to(performance_handler::add_performance)),
            )
            .service(
                web::resource("/{id}/performances/{player_id}")
                    .route(web::delete().to(performance_handler::delete_performance)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(match_handler::get_match))
                    .route(web::delete().to(match_handler::delete_match)),
            ),
    );
}

fn tournaments(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tournaments")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(tournament_handler::list_tournaments))
                    .route(web::post().to(tournament_handler::create_tournament)),
            )
            .service(
                web::resource("/{id}/standings")
                    .route(web::get().to(tournament_handler::get_standings)),
            )
            .service(
                web::resource("/{id}/status")
                    .route(web::put().to(tournament_handler::update_tournament_status)),
            )
            .service(
                web::resource("/{id}/teams/{team_id}")
                    .route(web::post().to(tournament_handler::add_team))
                    .route(web::delete().to(tournament_handler::remove_team)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(tournament_handler::get_tournament))
                    .route(web::put().to(tournament_handler::update_tournament))
                    .route(web::delete().to(tournament_handler::delete_tournament)),
            ),
    );
}

fn statistics(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/statistics")
            .service(
                web::resource(["", "/"])
                    .route(web::get().to(statistics_handler::list_statistics))
                    .route(web::post().to(statistics_handler::create_statistics)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(statistics_handler::get_statistics))
                    .route(web::delete().to(statistics_handler::delete_statistics)),
            ),
    );
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(teams)
        .configure(players)
        .configure(matches)
        .configure(tournaments)
        .configure(statistics);
}
