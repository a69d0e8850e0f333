//! Assertion steps. They read the context and never change it.

use serde_json::Value;

use crate::context::ScenarioContext;
use crate::error::{TestError, TestResult};
use crate::model::AttributeValue;
use crate::response::json_type_name;

use super::NUMERIC_TOLERANCE;

/// Characters the injection/escaping scenarios look for in names.
pub const SPECIAL_CHARACTERS: [char; 4] = ['&', '<', '>', '"'];

fn ensure(condition: bool, message: impl FnOnce() -> String) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(TestError::Assertion(message()))
    }
}

fn within_tolerance(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= NUMERIC_TOLERANCE
}

/// Normalizes an integer, float or numeric string to `f64`.
///
/// Any other type fails, naming `field` and the runtime type.
pub fn coerce_number(field: &str, value: Option<&Value>) -> TestResult<f64> {
    match value {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| TestError::assertion(format!("Property {} is not representable as f64: {}", field, n))),
        Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| {
            TestError::assertion(format!("Property {} holds a non-numeric string: {:?}", field, s))
        }),
        Some(other) => Err(TestError::assertion(format!(
            "Unexpected type for property {}: {}",
            field,
            json_type_name(other)
        ))),
        None => Err(TestError::assertion(format!("Unexpected type for property {}: missing", field))),
    }
}

pub fn status_is(ctx: &ScenarioContext, expected: u16) -> TestResult {
    let response = ctx.require_current_response()?;
    let actual = response.status();
    ensure(actual == expected, || {
        format!(
            "Response status code should be {} but was {}; response body: {}",
            expected,
            actual,
            response.body()
        )
    })
}

pub fn has_valid_id(ctx: &ScenarioContext) -> TestResult {
    let response = ctx.require_current_response()?;
    ensure(response.id().is_some(), || {
        format!("Response should contain a non-empty id; body: {}", response.body())
    })
}

/// The top-level `name` equals `expected`.
pub fn name_is(ctx: &ScenarioContext, expected: &str) -> TestResult {
    let actual = ctx.require_current_response()?.name();
    ensure(actual == Some(expected), || {
        format!("Object name should be {:?} but was {:?}", expected, actual)
    })
}

/// The value at `path` is a string exactly equal to `expected`.
pub fn property_text_is(ctx: &ScenarioContext, path: &str, expected: &str) -> TestResult {
    let value = ctx.require_current_response()?.value_at(path)?;
    let actual = value.and_then(Value::as_str);
    ensure(actual == Some(expected), || {
        format!("Property {} should be {:?} but was {:?}", path, expected, value)
    })
}

/// The value at `path` is within tolerance of `expected`.
pub fn property_number_is(ctx: &ScenarioContext, path: &str, expected: f64) -> TestResult {
    let value = ctx.require_current_response()?.value_at(path)?;
    let actual = coerce_number(path, value)?;
    ensure(within_tolerance(actual, expected), || {
        format!("Property {} should be {} (±{}) but was {}", path, expected, NUMERIC_TOLERANCE, actual)
    })
}

/// Every attribute of the held object appears in the response `data`.
pub fn has_all_attributes(ctx: &ScenarioContext) -> TestResult {
    let expected = &ctx.require_current_object()?.data;
    let response = ctx.require_current_response()?;
    let actual = response
        .data()
        .ok_or_else(|| TestError::assertion(format!("Response should contain data; body: {}", response.body())))?;

    for (key, expected_value) in expected {
        let actual_value = actual
            .get(key)
            .ok_or_else(|| TestError::assertion(format!("Data should contain key: {}", key)))?;
        ensure(attribute_matches(expected_value, actual_value), || {
            format!("Value for {} should be {} but was {}", key, expected_value, actual_value)
        })?;
    }
    Ok(())
}

fn attribute_matches(expected: &AttributeValue, actual: &Value) -> bool {
    match (expected, actual) {
        (AttributeValue::Number(_), Value::Number(a)) => match (expected.as_f64(), a.as_f64()) {
            (Some(e), Some(a)) => within_tolerance(a, e),
            _ => false,
        },
        (AttributeValue::Number(_), _) => false,
        (AttributeValue::Text(e), Value::String(a)) => e == a,
        (AttributeValue::Text(_), _) => false,
        (AttributeValue::Other(e), a) => e == a,
    }
}

fn require_items(ctx: &ScenarioContext) -> TestResult<&Vec<Value>> {
    let response = ctx.require_current_response()?;
    response.items().ok_or_else(|| {
        TestError::assertion(format!("Response should be a JSON array; body: {}", response.body()))
    })
}

pub fn has_at_least(ctx: &ScenarioContext, min: usize) -> TestResult {
    let count = require_items(ctx)?.len();
    ensure(count >= min, || {
        format!("Response should contain at least {} objects but had {}", min, count)
    })
}

/// Some element of the list response is named `name`.
pub fn list_includes(ctx: &ScenarioContext, name: &str) -> TestResult {
    let response = ctx.require_current_response()?;
    let names = response.pluck("name").ok_or_else(|| {
        TestError::assertion(format!("Response should be a JSON array; body: {}", response.body()))
    })?;
    ensure(names.iter().any(|n| n.as_str() == Some(name)), || {
        format!("List should include {:?}", name)
    })
}

pub fn is_json_array(ctx: &ScenarioContext) -> TestResult {
    require_items(ctx).map(|_| ())
}

/// Every list element has both `id` and `name` keys.
pub fn each_has_required_fields(ctx: &ScenarioContext) -> TestResult {
    for (index, item) in require_items(ctx)?.iter().enumerate() {
        let object = item.as_object().ok_or_else(|| {
            TestError::assertion(format!("Element {} should be an object but was {}", index, json_type_name(item)))
        })?;
        for field in ["id", "name"] {
            ensure(object.contains_key(field), || {
                format!("Object at index {} should have '{}' field", index, field)
            })?;
        }
    }
    Ok(())
}

/// `data` of the previous and current responses are deep-equal.
pub fn responses_have_identical_data(ctx: &ScenarioContext) -> TestResult {
    let previous = ctx.require_previous_response()?.data();
    let current = ctx.require_current_response()?.data();
    ensure(previous == current, || {
        format!("Both responses should have identical data: {:?} vs {:?}", previous, current)
    })
}

pub fn responses_have_same_id(ctx: &ScenarioContext) -> TestResult {
    let previous = ctx.require_previous_response()?.id();
    let current = ctx.require_current_response()?.id();
    ensure(previous.is_some() && previous == current, || {
        format!("Both responses should have the same id: {:?} vs {:?}", previous, current)
    })
}

pub fn name_has_special_characters(ctx: &ScenarioContext) -> TestResult {
    let name = ctx.require_current_response()?.name();
    ensure(name.is_some_and(|n| n.contains(SPECIAL_CHARACTERS)), || {
        format!("Name should contain one of {:?} but was {:?}", SPECIAL_CHARACTERS, name)
    })
}

/// A non-null `field` is present at the top level.
pub fn has_field(ctx: &ScenarioContext, field: &str) -> TestResult {
    let response = ctx.require_current_response()?;
    ensure(response.field(field).is_some(), || {
        format!("Response should contain a {}; body: {}", field, response.body())
    })
}

pub fn has_message(ctx: &ScenarioContext) -> TestResult {
    has_field(ctx, "message")
}

pub fn has_error(ctx: &ScenarioContext) -> TestResult {
    has_field(ctx, "error")
}

/// Scratch value under `key` equals `expected`.
pub fn remembered_is(ctx: &ScenarioContext, key: &str, expected: &str) -> TestResult {
    let actual = ctx.scratch(key);
    ensure(actual.and_then(Value::as_str) == Some(expected), || {
        format!("Remembered {} should be {:?} but was {:?}", key, expected, actual)
    })
}

pub fn nothing_remembered(ctx: &ScenarioContext, key: &str) -> TestResult {
    ensure(ctx.scratch(key).is_none(), || format!("Nothing should be remembered as {}", key))
}

pub fn tracked_count_is(ctx: &ScenarioContext, expected: usize) -> TestResult {
    let actual = ctx.created_ids().len();
    ensure(actual == expected, || {
        format!("{} objects should be tracked for cleanup but {} are", expected, actual)
    })
}
