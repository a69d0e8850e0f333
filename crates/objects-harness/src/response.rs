//! Captured API responses and path-based value extraction.

use serde_json::{Map, Value};

use crate::error::{TestError, TestResult};

/// One step of a value-extraction path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Parses an extraction path into segments.
///
/// Segments are separated by `.` at the top level only. A dotted segment may
/// contain spaces (`data.CPU model`); bracketed segments take a quoted key
/// (`data['CPU model']`, `data["a.b"]`) or an index (`items[0]`). A bare
/// numeric segment indexes into arrays and also matches numeric-looking keys.
/// `$` and the empty string address the root.
pub fn parse_path(path: &str) -> TestResult<Vec<PathSegment>> {
    let invalid = |reason: &str| TestError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = path.trim();
    let rest = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = rest.chars().peekable();

    // Set after a closing bracket so `a[0].b` does not yield an empty key.
    let mut after_bracket = false;

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if current.is_empty() {
                    if !after_bracket && !segments.is_empty() {
                        return Err(invalid("empty segment"));
                    }
                } else {
                    segments.push(dotted_segment(std::mem::take(&mut current)));
                }
                after_bracket = false;
            }
            '[' => {
                if !current.is_empty() {
                    segments.push(dotted_segment(std::mem::take(&mut current)));
                }
                let mut inner = String::new();
                let mut closed = false;
                match chars.peek().copied() {
                    Some(quote @ ('\'' | '"')) => {
                        chars.next();
                        let mut terminated = false;
                        for c in chars.by_ref() {
                            if c == quote {
                                terminated = true;
                                break;
                            }
                            inner.push(c);
                        }
                        if !terminated {
                            return Err(invalid("unterminated quoted key"));
                        }
                        if chars.next() == Some(']') {
                            closed = true;
                        }
                        if closed {
                            segments.push(PathSegment::Key(inner));
                        }
                    }
                    _ => {
                        for c in chars.by_ref() {
                            if c == ']' {
                                closed = true;
                                break;
                            }
                            inner.push(c);
                        }
                        if closed {
                            let index = inner
                                .trim()
                                .parse::<usize>()
                                .map_err(|_| invalid("bracket index must be a non-negative integer"))?;
                            segments.push(PathSegment::Index(index));
                        }
                    }
                }
                if !closed {
                    return Err(invalid("missing ']'"));
                }
                after_bracket = true;
            }
            _ => {
                if after_bracket {
                    return Err(invalid("expected '.' or '[' after ']'"));
                }
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        segments.push(dotted_segment(current));
    } else if rest.ends_with('.') {
        return Err(invalid("trailing '.'"));
    }

    Ok(segments)
}

fn dotted_segment(raw: String) -> PathSegment {
    match raw.parse::<usize>() {
        Ok(index) => PathSegment::Index(index),
        Err(_) => PathSegment::Key(raw),
    }
}

/// Walks `segments` from `root`.
pub fn lookup<'a>(root: &'a Value, segments: &[PathSegment]) -> Option<&'a Value> {
    segments.iter().try_fold(root, |node, segment| match (segment, node) {
        (PathSegment::Key(key), Value::Object(map)) => map.get(key),
        (PathSegment::Index(i), Value::Array(items)) => items.get(*i),
        (PathSegment::Index(i), Value::Object(map)) => map.get(&i.to_string()),
        _ => None,
    })
}

/// Name of a JSON value's runtime type, for failure messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An HTTP response captured by the transport.
///
/// Never mutated after construction. The body is parsed once; a body that is
/// not JSON still keeps its raw text and status.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSnapshot {
    status: u16,
    body: String,
    json: Option<Value>,
}

impl ResponseSnapshot {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let json = serde_json::from_str(&body).ok();
        Self { status, body, json }
    }

    /// Snapshot of a JSON body, for tests and the in-memory server.
    pub fn from_json(status: u16, value: Value) -> Self {
        Self {
            status,
            body: value.to_string(),
            json: Some(value),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The parsed body, if it was valid JSON.
    pub fn json(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Looks up `path` in the parsed body. See [`parse_path`] for the syntax.
    pub fn value_at(&self, path: &str) -> TestResult<Option<&Value>> {
        let segments = parse_path(path)?;
        Ok(self.json.as_ref().and_then(|root| lookup(root, &segments)))
    }

    /// A top-level field, `None` when absent or null.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.json
            .as_ref()
            .and_then(|root| root.get(name))
            .filter(|v| !v.is_null())
    }

    /// A top-level field rendered as text; numbers are stringified.
    pub fn text(&self, name: &str) -> Option<String> {
        self.field(name).and_then(scalar_text)
    }

    /// The object id, if the body carries one.
    pub fn id(&self) -> Option<String> {
        self.text("id").filter(|id| !id.is_empty())
    }

    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    /// The `data` map, if present and an object.
    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.field("data").and_then(Value::as_object)
    }

    /// The root array, if the body is one.
    pub fn items(&self) -> Option<&Vec<Value>> {
        self.json.as_ref().and_then(Value::as_array)
    }

    /// Projects `field` over every element of an array root.
    pub fn pluck(&self, field: &str) -> Option<Vec<&Value>> {
        self.items()
            .map(|items| items.iter().filter_map(|item| item.get(field)).collect())
    }
}

/// Renders a scalar as text; containers and null yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
