use actix_web::{http::header, HttpResponse};
use serde::Serialize;

use crate::models::common::{ApiResponse, Page};

pub mod analysis_handler;
pub mod auth_handler;
pub mod match_handler;
pub mod performance_handler;
pub mod player_handler;
pub mod rating_handler;
pub mod shuffle_handler;
pub mod statistics_handler;
pub mod status_handler;
pub mod team_handler;
pub mod tournament_handler;

pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// 201 with a `Location` header pointing at the new resource.
pub(crate) fn created<T: Serialize>(location: String, message: &str, data: T) -> HttpResponse {
    HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(ApiResponse::success(message, data))
}

/// One page of a list, with the unpaged total in `X-Total-Count`.
pub(crate) fn paged<T: Serialize>(page: Page<T>, message: &str) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((TOTAL_COUNT_HEADER, page.total.to_string()))
        .json(ApiResponse::success(message, page.items))
}

pub(crate) fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(message, data))
}
