//! Parameter schemas for discovery
//!
//! schemars output is reduced to the plain shape callers expect: an object
//! with `properties` of `type` `number` or `string`, optional `description`
//! and `default`, and a `required` list.

use schemars::{JsonSchema, schema_for};
use serde_json::{Map, Value, json};

/// Discovery schema for the input type `T`
pub fn parameters_schema<T: JsonSchema>() -> Value {
    simplify_parameters(schema_for!(T).to_value())
}

/// Strip a generated object schema down to `type`, `properties` and `required`
pub fn simplify_parameters(schema: Value) -> Value {
    let properties: Map<String, Value> = match schema.get("properties") {
        Some(Value::Object(props)) => props
            .iter()
            .map(|(name, prop)| (name.clone(), simplify_property(prop)))
            .collect(),
        _ => Map::new(),
    };
    let required = schema.get("required").cloned().unwrap_or_else(|| json!([]));

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn simplify_property(property: &Value) -> Value {
    let mut simplified = Map::new();
    if let Some(kind) = property.get("type") {
        simplified.insert("type".to_string(), simplify_type(kind.clone()));
    }
    if let Some(description) = property.get("description") {
        simplified.insert("description".to_string(), description.clone());
    }
    // `Option` fields with `#[serde(default)]` carry `"default": null`
    match property.get("default") {
        None | Some(Value::Null) => {}
        Some(default) => {
            simplified.insert("default".to_string(), default.clone());
        }
    }
    Value::Object(simplified)
}

/// `["integer", "null"]` becomes `"number"`
fn simplify_type(type_value: Value) -> Value {
    match type_value {
        Value::Array(types) => types
            .into_iter()
            .find(|t| t != "null")
            .map(simplify_type)
            .unwrap_or_else(|| json!("string")),
        Value::String(t) if t == "integer" => json!("number"),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn nullable_integers_become_numbers() {
        let schema = json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "title": "PageInput",
            "type": "object",
            "properties": {
                "page": {
                    "description": "Page number",
                    "type": "integer",
                    "format": "uint32",
                    "minimum": 0,
                    "default": 1
                },
                "contact_id": {
                    "type": ["integer", "null"],
                    "format": "uint64",
                    "default": null
                }
            }
        });

        assert_eq!(
            simplify_parameters(schema),
            json!({
                "type": "object",
                "properties": {
                    "page": { "type": "number", "description": "Page number", "default": 1 },
                    "contact_id": { "type": "number" }
                },
                "required": []
            })
        );
    }

    #[test]
    fn nullable_strings_become_strings() {
        assert_eq!(simplify_type(json!(["string", "null"])), json!("string"));
        assert_eq!(simplify_type(json!("string")), json!("string"));
    }
}
