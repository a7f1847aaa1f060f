//! API request types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A route of the protocol
pub trait ApiEndpoint {
    const PATH: &'static str;
}

/// `GET /discover`
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscoverRequest;

impl ApiEndpoint for DiscoverRequest {
    const PATH: &'static str = "/discover";
}

/// `POST /function/{name}`, body [`InvocationRequest`]
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokeFunctionRequest;

impl ApiEndpoint for InvokeFunctionRequest {
    const PATH: &'static str = "/function/:name";
}

/// Body of a function invocation.
///
/// `parameters` is kept as raw JSON; a missing or `null` value means no
/// parameters, anything other than an object is rejected at dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    #[serde(default)]
    pub parameters: Value,
}

impl InvocationRequest {
    pub fn new(parameters: Value) -> Self {
        Self { parameters }
    }
}
