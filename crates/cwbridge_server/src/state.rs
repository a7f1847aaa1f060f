//! Application state

use cwbridge_api::DiscoveryDocument;
use cwbridge_core::{ConnectWiseClient, FunctionRegistry, connectwise_registry};
use std::sync::Arc;

use crate::{config::ServerConfig, error::ServerResult};

/// Read-only state shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub registry: Arc<FunctionRegistry>,
    pub discovery: Arc<DiscoveryDocument>,
}

impl AppState {
    /// State talking to the ConnectWise host named in `config`
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let client =
            ConnectWiseClient::from_credentials(&config.credentials, config.upstream_timeout())?;
        Self::with_client(config, client)
    }

    pub fn with_client(config: ServerConfig, client: ConnectWiseClient) -> ServerResult<Self> {
        let registry = connectwise_registry(Arc::new(client))?;
        Ok(Self::with_registry(config, registry))
    }

    /// The discovery document is built here, once.
    pub fn with_registry(config: ServerConfig, registry: FunctionRegistry) -> Self {
        let discovery = DiscoveryDocument::new(registry.descriptors());
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            discovery: Arc::new(discovery),
        }
    }
}
