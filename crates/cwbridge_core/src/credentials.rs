//! ConnectWise API credentials and the Basic-Auth token derived from them

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Host used when `CW_URL` is not set
pub const DEFAULT_BASE_HOST: &str = "api-na.myconnectwise.net";

/// REST root below the host
pub const API_ROOT: &str = "/v4_6_release/apis/3.0";

/// Credentials for the ConnectWise Manage REST API.
///
/// Empty fields are not rejected here. Requests made with incomplete
/// credentials are still sent and fail upstream with an authentication error.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamCredentials {
    pub company_id: String,
    pub public_key: String,
    pub private_key: String,
    pub base_host: String,
}

impl UpstreamCredentials {
    pub fn new(
        company_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
        base_host: impl Into<String>,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            base_host: base_host.into(),
        }
    }

    /// `base64("{company_id}+{public_key}:{private_key}")`
    pub fn basic_auth_token(&self) -> String {
        STANDARD.encode(format!(
            "{}+{}:{}",
            self.company_id, self.public_key, self.private_key
        ))
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.basic_auth_token())
    }

    /// Root URL every API path is appended to.
    ///
    /// A bare host gets `https://`; a host that already names a scheme is
    /// used as given.
    pub fn base_url(&self) -> String {
        let host = self.base_host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{host}{API_ROOT}")
        } else {
            format!("https://{host}{API_ROOT}")
        }
    }

    /// Names of the key fields that are empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("CW_COMPANY_ID", &self.company_id),
            ("CW_PUBLIC_KEY", &self.public_key),
            ("CW_PRIVATE_KEY", &self.private_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl Default for UpstreamCredentials {
    fn default() -> Self {
        Self {
            company_id: String::new(),
            public_key: String::new(),
            private_key: String::new(),
            base_host: DEFAULT_BASE_HOST.to_string(),
        }
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for UpstreamCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamCredentials")
            .field("company_id", &self.company_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("base_host", &self.base_host)
            .finish()
    }
}
