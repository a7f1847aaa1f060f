//! API error types
//!
//! Every error reaches the caller as `{ "error": "<message>" }`; the message
//! is the `Display` text of the variant.

use cwbridge_core::CoreError;
use miette::{Diagnostic, JSONReportHandler};

#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum ApiError {
    /// Body was not valid JSON (generic 400 style)
    #[error("Invalid request body")]
    #[diagnostic(
        code(api::invalid_body),
        help("Send a JSON object of the form {{\"parameters\": {{...}}}}")
    )]
    InvalidBody { detail: String },

    /// Body was not valid JSON (500 style that reports the parser message)
    #[error("{message}")]
    #[diagnostic(code(api::body_parse_error))]
    BodyParse { message: String },

    /// A parameter is missing or has the wrong type
    #[error("{message}")]
    #[diagnostic(
        code(api::validation_error),
        help("Check the function's parameter schema in the discovery document")
    )]
    ValidationError { message: String },

    /// Unknown route or function
    #[error("Not Found")]
    #[diagnostic(code(api::not_found))]
    NotFound { resource: String },

    /// The ConnectWise call failed
    #[error("{message}")]
    #[diagnostic(code(api::upstream_error), help("ConnectWise request failed"))]
    Upstream { message: String, json: String },

    #[error("Internal server error")]
    #[diagnostic(code(api::internal_error))]
    Internal { message: String },
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidBody { .. } => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::NotFound { .. } => 404,
            ApiError::BodyParse { .. } => 500,
            ApiError::Upstream { .. } => 500,
            ApiError::Internal { .. } => 500,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::FunctionNotFound { name, .. } => Self::not_found(name),
            CoreError::MissingParameter { .. }
            | CoreError::InvalidParameter { .. }
            | CoreError::InvalidInput { .. } => Self::validation(err.to_string()),
            CoreError::DuplicateFunction { .. } => Self::internal(err.to_string()),
            CoreError::Upstream(upstream) => {
                let handler = JSONReportHandler::new();
                let message = upstream.to_string();
                let mut json = String::new();
                handler.render_report(&mut json, &upstream).unwrap_or_default();

                Self::Upstream { message, json }
            }
        }
    }
}

// Server-side response conversion
#[cfg(feature = "server")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match &self {
            ApiError::InvalidBody { detail } => tracing::debug!("Invalid request body: {}", detail),
            ApiError::Upstream { json, .. } => tracing::debug!("Upstream failure: {}", json),
            ApiError::Internal { message } => tracing::error!("Internal error: {}", message),
            _ => {}
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cwbridge_core::UpstreamError;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_parameter_is_a_400_with_plain_message() {
        let err: ApiError = CoreError::missing_parameter("cw_get_ticket", "ticket_id").into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "ticket_id is required");
    }

    #[test]
    fn unknown_function_is_not_found() {
        let err: ApiError = CoreError::function_not_found("cw_nope", vec![]).into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Not Found");
    }

    #[test]
    fn upstream_failure_keeps_message() {
        let err: ApiError = CoreError::from(UpstreamError::Status {
            url: "https://example.invalid".to_string(),
            status: 500,
            body: String::new(),
        })
        .into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }

    #[test]
    fn body_errors_have_two_styles() {
        let generic = ApiError::InvalidBody {
            detail: "EOF while parsing".to_string(),
        };
        assert_eq!(generic.status_code(), 400);
        assert_eq!(generic.to_string(), "Invalid request body");

        let report = ApiError::BodyParse {
            message: "EOF while parsing an object at line 1 column 1".to_string(),
        };
        assert_eq!(report.status_code(), 500);
        assert_eq!(
            report.to_string(),
            "EOF while parsing an object at line 1 column 1"
        );
    }
}
