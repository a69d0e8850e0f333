//! Action steps: one API call each, with the response stored as current.

use tracing::debug;

use crate::context::ScenarioContext;
use crate::error::{TestError, TestResult};
use crate::model::{attributes_from_json, Attributes, DomainObject};
use crate::response::ResponseSnapshot;

use super::given::parse_number;
use super::CREATED_STATUS;

/// Body sent by the malformed-create step.
pub const MALFORMED_BODY: &str = "{invalid json structure}";

/// Attribute rewritten by [`update_price`].
pub const PRICE_ATTRIBUTE: &str = "price";

/// Creates `object`, stores the response and tracks the id on success.
pub(crate) async fn submit_create(ctx: &mut ScenarioContext, object: &DomainObject) -> TestResult {
    let client = ctx.api_client()?;
    let response = client.create(object).await?;
    let id = (response.status() == CREATED_STATUS)
        .then(|| response.id())
        .flatten();
    ctx.set_current_response(response);
    ctx.track_created_id(id.as_deref());
    Ok(())
}

fn current_id(ctx: &ScenarioContext) -> TestResult<String> {
    ctx.require_current_response()?
        .id()
        .ok_or_else(|| TestError::MissingField("id".to_string()))
}

fn current_data(response: &ResponseSnapshot) -> Attributes {
    response.data().map(attributes_from_json).unwrap_or_default()
}

/// Sends the current object as a new resource.
pub async fn create_current(ctx: &mut ScenarioContext) -> TestResult {
    let object = ctx.require_current_object()?.clone();
    submit_create(ctx, &object).await
}

/// Fetches the object whose id the current response carries.
pub async fn retrieve_created(ctx: &mut ScenarioContext) -> TestResult {
    let id = current_id(ctx)?;
    retrieve_by_id(ctx, &id).await
}

/// A second read of the same object; the id again comes from the current
/// response, which the previous read replaced.
pub async fn retrieve_again(ctx: &mut ScenarioContext) -> TestResult {
    let id = current_id(ctx)?;
    retrieve_by_id(ctx, &id).await
}

pub async fn list_all(ctx: &mut ScenarioContext) -> TestResult {
    let response = ctx.api_client()?.list_all().await?;
    ctx.set_current_response(response);
    Ok(())
}

pub async fn delete_created(ctx: &mut ScenarioContext) -> TestResult {
    let id = current_id(ctx)?;
    delete_by_id(ctx, &id).await
}

/// Reads the most recently tracked id.
///
/// The delete response has replaced the current one by now and need not carry
/// an id, so the tracked list is the source.
pub async fn retrieve_deleted(ctx: &mut ScenarioContext) -> TestResult {
    let id = ctx
        .last_created_id()
        .map(str::to_string)
        .ok_or(TestError::MissingState("tracked object id"))?;
    retrieve_by_id(ctx, &id).await
}

/// Full replace with a new name, keeping the current attributes.
pub async fn update_name(ctx: &mut ScenarioContext, name: &str) -> TestResult {
    let id = current_id(ctx)?;
    let data = current_data(ctx.require_current_response()?);
    let object = DomainObject::named(name).with_data(data);

    let response = ctx.api_client()?.update(&id, &object).await?;
    ctx.set_current_response(response);
    Ok(())
}

/// Full replace that changes only `price`.
pub async fn update_price(ctx: &mut ScenarioContext, raw_price: &str) -> TestResult {
    let price = parse_number(PRICE_ATTRIBUTE, raw_price)?;
    let current = ctx.require_current_response()?;
    let id = current_id(ctx)?;

    let mut object = DomainObject::unnamed().with_data(current_data(current));
    object.name = current.name().map(str::to_string);
    object.set_attribute(PRICE_ATTRIBUTE, price);

    let response = ctx.api_client()?.update(&id, &object).await?;
    ctx.set_current_response(response);
    Ok(())
}

/// Partial update of the name, sending the current attributes along.
pub async fn patch_name(ctx: &mut ScenarioContext, name: &str) -> TestResult {
    let id = current_id(ctx)?;
    let data = current_data(ctx.require_current_response()?);
    let object = DomainObject::named(name).with_data(data);

    let response = ctx.api_client()?.patch(&id, &object).await?;
    ctx.set_current_response(response);
    Ok(())
}

/// Reads `id` whatever its outcome; a 404 is an expected result here.
pub async fn retrieve_by_id(ctx: &mut ScenarioContext, id: &str) -> TestResult {
    debug!(%id, "Retrieving object");
    let response = ctx.api_client()?.get_by_id(id).await?;
    ctx.set_current_response(response);
    Ok(())
}

pub async fn delete_by_id(ctx: &mut ScenarioContext, id: &str) -> TestResult {
    debug!(%id, "Deleting object");
    let response = ctx.api_client()?.delete(id).await?;
    ctx.set_current_response(response);
    Ok(())
}

/// Posts `raw_body` untouched.
pub async fn create_raw(ctx: &mut ScenarioContext, raw_body: &str) -> TestResult {
    let response = ctx.api_client()?.create_raw(raw_body).await?;
    ctx.set_current_response(response);
    Ok(())
}

pub async fn create_malformed(ctx: &mut ScenarioContext) -> TestResult {
    create_raw(ctx, MALFORMED_BODY).await
}

/// Drops everything in the scratch space.
pub fn forget_remembered(ctx: &mut ScenarioContext) {
    ctx.clear_scratch();
}
