use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Diagnostic, Debug)]
pub enum CoreError {
    #[error("Function not found: {name}")]
    #[diagnostic(
        code(cwbridge_core::function_not_found),
        help("Available functions: {}", available_functions.join(", "))
    )]
    FunctionNotFound {
        name: String,
        available_functions: Vec<String>,
    },

    #[error("Function already registered: {name}")]
    #[diagnostic(
        code(cwbridge_core::duplicate_function),
        help("Every function name in the catalog must be unique")
    )]
    DuplicateFunction { name: String },

    #[error("{parameter} is required")]
    #[diagnostic(
        code(cwbridge_core::missing_parameter),
        help("Function '{function}' cannot run without '{parameter}'")
    )]
    MissingParameter { function: String, parameter: String },

    #[error("{parameter} must be {expected}")]
    #[diagnostic(
        code(cwbridge_core::invalid_parameter),
        help("Function '{function}' received {provided} for '{parameter}'")
    )]
    InvalidParameter {
        function: String,
        parameter: String,
        expected: String,
        provided: serde_json::Value,
    },

    #[error("Invalid parameters: {cause}")]
    #[diagnostic(
        code(cwbridge_core::invalid_input),
        help("Check the parameters of '{function}' against its discovery schema")
    )]
    InvalidInput {
        function: String,
        #[source]
        cause: serde_json::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Upstream(#[from] UpstreamError),
}

impl CoreError {
    pub fn function_not_found(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::FunctionNotFound {
            name: name.into(),
            available_functions: available,
        }
    }

    pub fn missing_parameter(function: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            function: function.into(),
            parameter: parameter.into(),
        }
    }

    pub fn invalid_parameter(
        function: impl Into<String>,
        parameter: impl Into<String>,
        expected: impl Into<String>,
        provided: serde_json::Value,
    ) -> Self {
        Self::InvalidParameter {
            function: function.into(),
            parameter: parameter.into(),
            expected: expected.into(),
            provided,
        }
    }
}

/// Failures talking to the ConnectWise REST API.
///
/// The `Display` text of each variant is what callers of get/create/update
/// functions see in the `error` field of a 500 response.
#[derive(Error, Diagnostic, Debug)]
pub enum UpstreamError {
    #[error("Failed to build HTTP client: {cause}")]
    #[diagnostic(
        code(cwbridge_core::client_build_failed),
        help("The TLS backend or timeout configuration was rejected by reqwest")
    )]
    ClientBuild {
        #[source]
        cause: reqwest::Error,
    },

    #[error("{cause}")]
    #[diagnostic(
        code(cwbridge_core::upstream_request_failed),
        help("Check network connectivity to {url}")
    )]
    Request {
        url: String,
        #[source]
        cause: reqwest::Error,
    },

    #[error("Request failed with status code {status}")]
    #[diagnostic(
        code(cwbridge_core::upstream_status),
        help("ConnectWise answered {status} for {url}")
    )]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response body from {url}: {cause}")]
    #[diagnostic(
        code(cwbridge_core::upstream_decode_failed),
        help("ConnectWise returned a body that is not valid JSON")
    )]
    Decode {
        url: String,
        #[source]
        cause: serde_json::Error,
    },

    #[error("Unexpected response from {path}: expected {expected}")]
    #[diagnostic(code(cwbridge_core::upstream_unexpected_shape))]
    UnexpectedShape { path: String, expected: String },

    #[error("Failed to encode request body: {0}")]
    #[diagnostic(code(cwbridge_core::encode_failed))]
    Encode(#[source] serde_json::Error),
}

impl UpstreamError {
    /// HTTP status returned by ConnectWise, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request { cause, .. } => cause.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
