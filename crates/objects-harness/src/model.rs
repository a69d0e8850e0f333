//! The resource round-tripped through the objects API.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Attribute map carried in an object's `data` field.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A single attribute value.
///
/// Table input is typed once at ingestion via [`AttributeValue::parse`]; the
/// tag is what later comparisons branch on. Numbers keep their JSON form, so
/// an integer read from a response is sent back as that same integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(Number),
    Text(String),
    /// Anything else the server handed back (booleans, nested maps, lists).
    Other(Value),
}

impl AttributeValue {
    /// Numeric if `raw` parses as one, text otherwise.
    ///
    /// Integral input stays an integer; everything else numeric is a float.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let number = trimmed
            .parse::<i64>()
            .map(Number::from)
            .or_else(|_| trimmed.parse::<u64>().map(Number::from))
            .ok()
            .or_else(|| trimmed.parse::<f64>().ok().and_then(Number::from_f64));

        match number {
            Some(n) => AttributeValue::Number(n),
            None => AttributeValue::Text(raw.to_string()),
        }
    }

    /// Re-types a value read from a response body without altering it.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => AttributeValue::Number(n.clone()),
            Value::String(s) => AttributeValue::Text(s.clone()),
            other => AttributeValue::Other(other.clone()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

/// Non-finite floats have no JSON form and become `null`.
impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        Number::from_f64(n)
            .map(AttributeValue::Number)
            .unwrap_or(AttributeValue::Other(Value::Null))
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Number(n.into())
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => f.write_str(s),
            AttributeValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Converts a response `data` map into typed attributes.
pub fn attributes_from_json(data: &serde_json::Map<String, Value>) -> Attributes {
    data.iter()
        .map(|(k, v)| (k.clone(), AttributeValue::from_json(v)))
        .collect()
}

/// An object as sent to and returned by the API.
///
/// `id`, `name` and the timestamps are omitted from the JSON when absent;
/// `data` is always written, empty or not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Attributes,

    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Attributes, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Attributes>::deserialize(deserializer)?.unwrap_or_default())
}

impl DomainObject {
    /// An object with a name and no attributes.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// An object deliberately carrying no name.
    pub fn unnamed() -> Self {
        Self::default()
    }

    pub fn with_data(mut self, data: Attributes) -> Self {
        self.data = data;
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn clear_data(&mut self) {
        self.data.clear();
    }
}
