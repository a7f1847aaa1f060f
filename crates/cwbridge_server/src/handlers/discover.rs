//! Discovery endpoint

use axum::{Json, extract::State};
use cwbridge_api::DiscoveryDocument;
use std::sync::Arc;

use crate::state::AppState;

pub async fn discover(State(state): State<AppState>) -> Json<Arc<DiscoveryDocument>> {
    tracing::debug!("Serving discovery document");
    Json(Arc::clone(&state.discovery))
}
