//! Server configuration

use cwbridge_core::UpstreamCredentials;
use cwbridge_core::credentials::DEFAULT_BASE_HOST;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{ServerError, ServerResult};

pub const DEFAULT_PORT: u16 = 3456;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to listen on
    pub host: String,

    pub port: u16,

    /// ConnectWise credentials and host
    pub credentials: UpstreamCredentials,

    /// Timeout for each ConnectWise request, in seconds
    pub upstream_timeout_secs: u64,

    /// How an unparseable invocation body is reported
    pub invalid_body_style: InvalidBodyStyle,
}

/// Response to an invocation body that is not valid JSON
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidBodyStyle {
    /// 400 `{"error": "Invalid request body"}`
    #[default]
    Reject,
    /// 500 `{"error": "<parser message>"}`
    Report,
}

impl FromStr for InvalidBodyStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "report" => Ok(Self::Report),
            other => Err(format!("expected 'reject' or 'report', got '{other}'")),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            credentials: UpstreamCredentials::default(),
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            invalid_body_style: InvalidBodyStyle::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> ServerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key/value source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> ServerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let credentials = UpstreamCredentials::new(
            get("CW_COMPANY_ID").unwrap_or_default(),
            get("CW_PUBLIC_KEY").unwrap_or_default(),
            get("CW_PRIVATE_KEY").unwrap_or_default(),
            get("CW_URL").unwrap_or_else(|| DEFAULT_BASE_HOST.to_string()),
        );

        let timeout = parse_var::<NonZeroU64>("CW_TIMEOUT_SECS", get("CW_TIMEOUT_SECS"))?;

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_var("PORT", get("PORT"))?.unwrap_or(defaults.port),
            credentials,
            upstream_timeout_secs: timeout.map_or(defaults.upstream_timeout_secs, NonZeroU64::get),
            invalid_body_style: parse_var("INVALID_BODY_STYLE", get("INVALID_BODY_STYLE"))?
                .unwrap_or(defaults.invalid_body_style),
        })
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T>(key: &str, value: Option<String>) -> ServerResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse::<T>().map_err(|e| ServerError::Config {
                key: key.to_string(),
                message: format!("invalid value '{v}': {e}"),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3456);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.credentials.base_host, "api-na.myconnectwise.net");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(config.invalid_body_style, InvalidBodyStyle::Reject);
        assert!(!config.credentials.is_complete());
    }

    #[test]
    fn reads_recognised_keys() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("CW_COMPANY_ID", "acme"),
            ("CW_PUBLIC_KEY", "pub"),
            ("CW_PRIVATE_KEY", "priv"),
            ("CW_URL", "api-eu.myconnectwise.net"),
            ("PORT", "8080"),
            ("CW_TIMEOUT_SECS", "3"),
            ("INVALID_BODY_STYLE", "report"),
        ]))
        .unwrap();

        assert_eq!(
            config.credentials,
            UpstreamCredentials::new("acme", "pub", "priv", "api-eu.myconnectwise.net")
        );
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(3));
        assert_eq!(config.invalid_body_style, InvalidBodyStyle::Report);
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("CW_URL", ""), ("PORT", " ")])).unwrap();
        assert_eq!(config.credentials.base_host, DEFAULT_BASE_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ServerError::Config { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn zero_timeout_is_a_config_error() {
        let err = ServerConfig::from_lookup(lookup(&[("CW_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ServerError::Config { ref key, .. } if key == "CW_TIMEOUT_SECS"));
    }
}
