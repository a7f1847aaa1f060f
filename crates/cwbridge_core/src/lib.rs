//! cwbridge core
//!
//! ConnectWise Manage client, credentials, and the registry of functions the
//! adapter server exposes.

pub mod catalog;
pub mod client;
pub mod credentials;
pub mod error;
pub mod function;
pub mod ticket;
pub mod transport;

pub use catalog::{ConnectWiseFunction, ConnectWiseOperation, connectwise_registry};
pub use client::{ConnectWiseClient, SearchQuery};
pub use credentials::UpstreamCredentials;
pub use error::{CoreError, Result, UpstreamError};
pub use function::{Function, FunctionDescriptor, FunctionRegistry};
pub use transport::{HttpTransport, UpstreamTransport};
