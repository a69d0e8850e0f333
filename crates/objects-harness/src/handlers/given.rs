//! Setup steps: build the object under test before any request is made.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::client::RestApiClient;
use crate::config::TestConfig;
use crate::context::ScenarioContext;
use crate::error::{TestError, TestResult};
use crate::model::{AttributeValue, DomainObject};

use super::when::submit_create;

/// Column of a bulk-creation table holding the object name.
pub const NAME_COLUMN: &str = "name";

/// Points the scenario at `base_url`.
pub fn set_base_url(ctx: &mut ScenarioContext, base_url: &str, config: &TestConfig) -> TestResult {
    let client = RestApiClient::with_timeout(base_url, config.request_timeout)?;
    info!(%base_url, "API client initialised");
    ctx.set_api_client(Arc::new(client));
    Ok(())
}

pub fn item_named(ctx: &mut ScenarioContext, name: &str) {
    debug!(%name, "Building object");
    ctx.set_current_object(DomainObject::named(name));
}

pub fn unnamed_object(ctx: &mut ScenarioContext) {
    ctx.set_current_object(DomainObject::unnamed());
}

pub fn with_attribute(
    ctx: &mut ScenarioContext,
    key: &str,
    value: impl Into<AttributeValue>,
) -> TestResult {
    ctx.current_object_mut()?.set_attribute(key, value);
    Ok(())
}

/// Adds `key` as a number; unlike table input there is no text fallback.
pub fn with_numeric_attribute(ctx: &mut ScenarioContext, key: &str, raw: &str) -> TestResult {
    let value = parse_number(key, raw)?;
    with_attribute(ctx, key, value)
}

/// Adds every `(key, value)` pair, typing each value as a number when it
/// parses as one and as text otherwise.
pub fn with_attributes<'a, I>(ctx: &mut ScenarioContext, rows: I) -> TestResult
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let object = ctx.current_object_mut()?;
    for (key, raw) in rows {
        object.set_attribute(key, AttributeValue::parse(raw));
    }
    Ok(())
}

pub fn with_empty_data(ctx: &mut ScenarioContext) -> TestResult {
    ctx.current_object_mut()?.clear_data();
    Ok(())
}

/// Creates one object per row right away, tracking each id for cleanup.
///
/// The `name` column names the object; every other non-empty cell becomes an
/// attribute typed as in [`with_attributes`].
pub async fn create_items(ctx: &mut ScenarioContext, rows: &[HashMap<String, String>]) -> TestResult {
    for row in rows {
        let mut object = match row.get(NAME_COLUMN) {
            Some(name) => DomainObject::named(name.as_str()),
            None => DomainObject::unnamed(),
        };
        for (key, raw) in row.iter().filter(|(k, v)| *k != NAME_COLUMN && !v.is_empty()) {
            object.set_attribute(key.as_str(), AttributeValue::parse(raw));
        }

        ctx.set_current_object(object.clone());
        submit_create(ctx, &object).await?;
    }
    info!(count = rows.len(), "Bulk items created");
    Ok(())
}

/// Stores `value` in the scratch space under `key`.
pub fn remember(ctx: &mut ScenarioContext, key: &str, value: &str) {
    ctx.set_scratch(key, value);
}

/// Parses a step literal that must be numeric.
pub fn parse_number(field: &str, raw: &str) -> TestResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| TestError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}
