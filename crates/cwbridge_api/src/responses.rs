//! API response types

use cwbridge_core::FunctionDescriptor;
use serde::Serialize;

/// Body of `GET /discover`
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryDocument {
    pub name: String,
    pub version: String,
    pub description: String,
    pub functions: Vec<FunctionDescriptor>,
}

impl DiscoveryDocument {
    pub fn new(functions: Vec<FunctionDescriptor>) -> Self {
        Self {
            name: crate::SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: crate::SERVER_DESCRIPTION.to_string(),
            functions,
        }
    }
}
