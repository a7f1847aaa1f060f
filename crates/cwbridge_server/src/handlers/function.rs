//! Function invocation endpoint

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use cwbridge_api::{ApiError, InvocationRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

use crate::{config::InvalidBodyStyle, state::AppState};

/// `POST /function/{name}`
///
/// The function is resolved before the body is looked at, so unknown names
/// are always 404.
pub async fn invoke_function(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if !state.registry.contains(&name) {
        debug!("Unknown function {}", name);
        return Err(ApiError::not_found(name));
    }

    let request = parse_body(&body, state.config.invalid_body_style)?;
    debug!("Processing {} request", name);

    // Spawned so a dropped connection does not cancel the upstream call.
    let registry = Arc::clone(&state.registry);
    let function = name.clone();
    let outcome = tokio::spawn(async move { registry.invoke(&function, request.parameters).await })
        .await
        .map_err(|e| ApiError::internal(format!("{name} task failed: {e}")))?;

    match outcome {
        Ok(result) => {
            debug!("Sent {} response", name);
            Ok(Json(result))
        }
        Err(e) => {
            let e = ApiError::from(e);
            if e.status_code() >= 500 {
                error!("Error processing {}: {}", name, e);
            }
            Err(e)
        }
    }
}

fn parse_body(body: &[u8], style: InvalidBodyStyle) -> Result<InvocationRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Error parsing request body: {}", e);
        match style {
            InvalidBodyStyle::Reject => ApiError::InvalidBody {
                detail: e.to_string(),
            },
            InvalidBodyStyle::Report => ApiError::BodyParse {
                message: e.to_string(),
            },
        }
    })
}
