//! HTTP request handlers

use axum::{
    Router,
    http::Uri,
    routing::{get, post},
};
use cwbridge_api::{ApiEndpoint, ApiError, DiscoverRequest, InvokeFunctionRequest};

pub mod discover;
pub mod function;

use crate::state::AppState;

/// Build all routes. Anything unmatched, including a wrong method on a known
/// path, is a 404. `HEAD` gets its own route: axum serves it from `GET`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            DiscoverRequest::PATH,
            get(discover::discover)
                .head(not_found)
                .fallback(not_found),
        )
        .route(
            InvokeFunctionRequest::PATH,
            post(function::invoke_function).fallback(not_found),
        )
        .fallback(not_found)
}

pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!("No route for {}", uri.path());
    ApiError::not_found(uri.path())
}
