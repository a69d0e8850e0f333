use cucumber::gherkin::Step;
use cucumber::given;
use objects_harness::handlers::given as handlers;
use objects_harness::TestResult;

use crate::steps::world::{parse_pairs, parse_table, ObjectsWorld};

#[given(expr = "the API base URL is {string}")]
fn api_base_url(world: &mut ObjectsWorld, base_url: String) -> TestResult {
    handlers::set_base_url(&mut world.context, &base_url, &world.config)
}

#[given("the objects API test server is running")]
async fn test_server_running(world: &mut ObjectsWorld) -> TestResult {
    world.start_server().await
}

#[given(expr = "a {string} item is created")]
fn item_is_created(world: &mut ObjectsWorld, name: String) {
    handlers::item_named(&mut world.context, &name);
}

#[given(expr = "is a {string} CPU model")]
fn cpu_model(world: &mut ObjectsWorld, model: String) -> TestResult {
    handlers::with_attribute(&mut world.context, "CPU model", model)
}

#[given(expr = "has a price of {string}")]
fn price_of(world: &mut ObjectsWorld, price: String) -> TestResult {
    handlers::with_numeric_attribute(&mut world.context, "price", &price)
}

#[given("has the following attributes:")]
fn following_attributes(world: &mut ObjectsWorld, step: &Step) -> TestResult {
    let pairs = parse_pairs(step);
    handlers::with_attributes(
        &mut world.context,
        pairs.iter().map(|(key, value)| (key.as_str(), value.as_str())),
    )
}

#[given("has empty data attributes")]
fn empty_data(world: &mut ObjectsWorld) -> TestResult {
    handlers::with_empty_data(&mut world.context)
}

#[given("an object with no name is created")]
fn object_without_name(world: &mut ObjectsWorld) {
    handlers::unnamed_object(&mut world.context);
}

#[given("the following items are created:")]
async fn following_items(world: &mut ObjectsWorld, step: &Step) -> TestResult {
    let rows = parse_table(step);
    handlers::create_items(&mut world.context, &rows).await
}

#[given(expr = "I remember {string} as {string}")]
fn remember(world: &mut ObjectsWorld, value: String, key: String) {
    handlers::remember(&mut world.context, &key, &value);
}
