//! Discovery-facing description of a function

use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;

use super::schema::parameters_schema;

/// A function as listed by discovery
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDescriptor {
    pub name: String,
    pub description: String,
    /// `{ "type": "object", "properties": {...}, "required": [...] }`
    pub parameters: Value,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Descriptor whose parameters are the schema of `T`
    pub fn for_input<T: JsonSchema>(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, description, parameters_schema::<T>())
    }

    pub fn required_parameters(&self) -> Vec<&str> {
        self.parameters["required"]
            .as_array()
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Advertised JSON type of one parameter
    pub fn parameter_type(&self, name: &str) -> Option<&str> {
        self.parameters["properties"][name]["type"].as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct LookupInput {
        /// The ID of the ticket
        ticket_id: u64,
        /// Filter
        #[serde(default)]
        conditions: Option<String>,
    }

    #[test]
    fn serializes_name_description_and_schema() {
        let descriptor = FunctionDescriptor::for_input::<LookupInput>("cw_lookup", "Look one up");
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({
                "name": "cw_lookup",
                "description": "Look one up",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "ticket_id": { "type": "number", "description": "The ID of the ticket" },
                        "conditions": { "type": "string", "description": "Filter" }
                    },
                    "required": ["ticket_id"]
                }
            })
        );
    }

    #[test]
    fn reads_required_names_and_types() {
        let descriptor = FunctionDescriptor::for_input::<LookupInput>("cw_lookup", "Look one up");
        assert_eq!(descriptor.required_parameters(), vec!["ticket_id"]);
        assert_eq!(descriptor.parameter_type("ticket_id"), Some("number"));
        assert_eq!(descriptor.parameter_type("conditions"), Some("string"));
        assert_eq!(descriptor.parameter_type("absent"), None);
    }
}
