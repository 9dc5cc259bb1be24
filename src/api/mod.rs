mod books;
mod users;

use axum::{
    extract::{FromRequest, FromRequestParts, Json, Query},
    Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::repo::{BookRepo, UserRepo};

/// A JSON request body whose rejections go through [`ApiError`]
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// A query string whose rejections go through [`ApiError`]
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

#[derive(Serialize)]
pub struct MessageBody {
    message: &'static str,
}

pub fn build_app(book_repo: impl BookRepo, user_repo: impl UserRepo) -> Router {
    Router::new()
        .merge(books::routes(book_repo))
        .merge(users::routes(user_repo))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}
