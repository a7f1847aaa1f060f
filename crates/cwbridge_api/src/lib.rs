//! cwbridge API types
//!
//! Request/response shapes of the discover + invoke protocol, shared between
//! the server and anything that talks to it.

pub mod error;
pub mod requests;
pub mod responses;

pub use error::ApiError;
pub use requests::{ApiEndpoint, DiscoverRequest, InvocationRequest, InvokeFunctionRequest};
pub use responses::DiscoveryDocument;

/// Name advertised by the discovery document
pub const SERVER_NAME: &str = "connectwise-mcp-server";

/// Description advertised by the discovery document
pub const SERVER_DESCRIPTION: &str = "MCP server for integrating with ConnectWise Manage API";
