//! Checking an invocation's `parameters` before they become a typed input

use serde::de::{self, Deserialize, DeserializeOwned, Deserializer, Unexpected};
use serde_json::{Map, Value};

use super::FunctionDescriptor;
use crate::{CoreError, Result};

const POSITIVE_INTEGER: &str = "a positive integer";

/// Absent, `null`, `""`, `0` and `false` all count as not provided
pub fn is_provided(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        _ => true,
    }
}

/// A positive integer, given as a number or a string of digits
pub fn as_positive_integer(value: &Value) -> Option<u64> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed.filter(|&n| n > 0)
}

/// Provided values of `params`, checked against the descriptor's schema.
///
/// `params` must be an object or `null`. Values that are not provided are
/// dropped, then the first missing required parameter (in schema order) and
/// then any value of the wrong JSON type is reported.
pub fn prepare(descriptor: &FunctionDescriptor, params: Value) -> Result<Map<String, Value>> {
    let function = descriptor.name.as_str();
    let mut values = match params {
        Value::Object(values) => values,
        Value::Null => Map::new(),
        other => {
            return Err(CoreError::invalid_parameter(
                function,
                "parameters",
                "an object",
                other,
            ));
        }
    };
    values.retain(|_, value| is_provided(value));

    if let Some(missing) = descriptor
        .required_parameters()
        .into_iter()
        .find(|name| !values.contains_key(*name))
    {
        return Err(CoreError::missing_parameter(function, missing));
    }

    for (name, value) in &values {
        let expected = match descriptor.parameter_type(name) {
            Some("number") if as_positive_integer(value).is_none() => POSITIVE_INTEGER,
            Some("string") if !value.is_string() => "a string",
            _ => continue,
        };
        return Err(CoreError::invalid_parameter(
            function,
            name,
            expected,
            value.clone(),
        ));
    }

    Ok(values)
}

/// Deserialize prepared values into the function's input type
pub fn parse_input<T: DeserializeOwned>(function: &str, values: Map<String, Value>) -> Result<T> {
    serde_json::from_value(Value::Object(values)).map_err(|cause| CoreError::InvalidInput {
        function: function.to_string(),
        cause,
    })
}

/// `deserialize_with` helper for id and paging fields
pub fn positive_integer<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    let value = Value::deserialize(deserializer)?;
    match as_positive_integer(&value).and_then(|n| T::try_from(n).ok()) {
        Some(n) => Ok(n),
        None => {
            let shown = value.to_string();
            Err(<D::Error as de::Error>::invalid_value(
                Unexpected::Other(&shown),
                &POSITIVE_INTEGER,
            ))
        }
    }
}

/// [`positive_integer`] for fields that may be left out
pub fn optional_positive_integer<'de, D, T>(
    deserializer: D,
) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u64>,
{
    positive_integer(deserializer).map(Some)
}
