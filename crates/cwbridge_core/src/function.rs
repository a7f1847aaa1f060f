use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::{CoreError, Result};

mod descriptor;
pub mod input;
pub mod schema;

pub use descriptor::FunctionDescriptor;

/// A function callers can discover and invoke by name
#[async_trait]
pub trait Function: Send + Sync + Debug {
    /// Name, description and parameter schema
    fn descriptor(&self) -> &FunctionDescriptor;

    fn name(&self) -> &str {
        &self.descriptor().name
    }

    /// Check raw `parameters` against the descriptor
    fn validate_params(&self, params: Value) -> Result<Map<String, Value>> {
        input::prepare(self.descriptor(), params)
    }

    /// Run the function on validated parameters.
    ///
    /// Returns the full response object, e.g. `{ "ticket": {...} }`.
    async fn invoke(&self, params: Map<String, Value>) -> Result<Value>;
}

/// Functions in registration order, indexed by name
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: Vec<Arc<dyn Function>>,
    index: HashMap<String, usize>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function; names must be unique
    pub fn register(&mut self, function: Arc<dyn Function>) -> Result<()> {
        let name = function.name().to_string();
        if self.index.contains_key(&name) {
            return Err(CoreError::DuplicateFunction { name });
        }
        self.index.insert(name, self.functions.len());
        self.functions.push(function);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Function>> {
        self.index.get(name).map(|&i| &self.functions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn list_functions(&self) -> Vec<String> {
        self.functions.iter().map(|f| f.name().to_string()).collect()
    }

    pub fn descriptors(&self) -> Vec<FunctionDescriptor> {
        self.functions
            .iter()
            .map(|f| f.descriptor().clone())
            .collect()
    }

    /// Look up, validate parameters, then run
    pub async fn invoke(&self, name: &str, params: Value) -> Result<Value> {
        let function = self
            .get(name)
            .ok_or_else(|| CoreError::function_not_found(name, self.list_functions()))?;

        let params = function.validate_params(params)?;

        tracing::debug!("Invoking {}", name);
        function.invoke(params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct EchoInput {
        /// A test message
        message: String,
    }

    #[derive(Debug)]
    struct EchoFunction {
        descriptor: FunctionDescriptor,
    }

    impl EchoFunction {
        fn new(name: &str) -> Self {
            Self {
                descriptor: FunctionDescriptor::for_input::<EchoInput>(name, "Echoes its message"),
            }
        }
    }

    #[async_trait]
    impl Function for EchoFunction {
        fn descriptor(&self) -> &FunctionDescriptor {
            &self.descriptor
        }

        async fn invoke(&self, params: Map<String, Value>) -> Result<Value> {
            let input: EchoInput = input::parse_input(self.name(), params)?;
            Ok(json!({ "echo": input.message }))
        }
    }

    #[tokio::test]
    async fn test_function_registry() {
        let mut registry = FunctionRegistry::new();
        registry.register(Arc::new(EchoFunction::new("b_echo"))).unwrap();
        registry.register(Arc::new(EchoFunction::new("a_echo"))).unwrap();

        assert_eq!(registry.list_functions(), vec!["b_echo", "a_echo"]);
        assert_eq!(registry.descriptors().len(), 2);

        let result = registry
            .invoke("a_echo", json!({ "message": "Hello, world!" }))
            .await
            .unwrap();
        assert_eq!(result, json!({ "echo": "Hello, world!" }));
    }

    #[tokio::test]
    async fn unknown_function_is_not_found() {
        let registry = FunctionRegistry::new();
        let err = registry.invoke("nope", json!({})).await.unwrap_err();
        assert!(matches!(err, CoreError::FunctionNotFound { .. }));
    }

    #[tokio::test]
    async fn missing_required_parameter_is_rejected_before_invoke() {
        let mut registry = FunctionRegistry::new();
        registry.register(Arc::new(EchoFunction::new("echo"))).unwrap();

        let err = registry
            .invoke("echo", json!({ "other": 1 }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "message is required");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = FunctionRegistry::new();
        registry.register(Arc::new(EchoFunction::new("echo"))).unwrap();
        let err = registry
            .register(Arc::new(EchoFunction::new("echo")))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateFunction { .. }));
    }
}
