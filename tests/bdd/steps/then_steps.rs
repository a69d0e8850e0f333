use cucumber::then;
use objects_harness::handlers::then as handlers;
use objects_harness::TestResult;

use crate::steps::world::ObjectsWorld;

#[then(expr = "a {int} response code is returned")]
fn response_code(world: &mut ObjectsWorld, status: u16) -> TestResult {
    handlers::status_is(&world.context, status)
}

#[then("the response contains a valid object id")]
fn valid_id(world: &mut ObjectsWorld) -> TestResult {
    handlers::has_valid_id(&world.context)
}

#[then(expr = "a {string} is created")]
fn name_created(world: &mut ObjectsWorld, name: String) -> TestResult {
    handlers::name_is(&world.context, &name)
}

#[then(expr = "a {string} is returned")]
fn name_returned(world: &mut ObjectsWorld, name: String) -> TestResult {
    handlers::name_is(&world.context, &name)
}

#[then(expr = "the object has property {string} with value {string}")]
fn property_text(world: &mut ObjectsWorld, path: String, expected: String) -> TestResult {
    handlers::property_text_is(&world.context, &path, &expected)
}

#[then(expr = "the object has property {string} with value {float}")]
fn property_number(world: &mut ObjectsWorld, path: String, expected: f64) -> TestResult {
    handlers::property_number_is(&world.context, &path, expected)
}

#[then("the object has all specified attributes")]
fn all_attributes(world: &mut ObjectsWorld) -> TestResult {
    handlers::has_all_attributes(&world.context)
}

#[then(expr = "the response contains at least {int} objects")]
fn at_least(world: &mut ObjectsWorld, min: usize) -> TestResult {
    handlers::has_at_least(&world.context, min)
}

#[then(expr = "the list includes {string}")]
fn list_includes(world: &mut ObjectsWorld, name: String) -> TestResult {
    handlers::list_includes(&world.context, &name)
}

#[then("the response contains a success message")]
fn success_message(world: &mut ObjectsWorld) -> TestResult {
    handlers::has_message(&world.context)
}

#[then("the response contains an error message")]
fn error_message(world: &mut ObjectsWorld) -> TestResult {
    handlers::has_error(&world.context)
}

#[then("the response contains a validation error")]
fn validation_error(world: &mut ObjectsWorld) -> TestResult {
    handlers::has_error(&world.context)
}

#[then("the object name contains special characters")]
fn special_characters(world: &mut ObjectsWorld) -> TestResult {
    handlers::name_has_special_characters(&world.context)
}

#[then("both responses have identical data")]
fn identical_data(world: &mut ObjectsWorld) -> TestResult {
    handlers::responses_have_identical_data(&world.context)
}

#[then("both responses contain the same object id")]
fn same_id(world: &mut ObjectsWorld) -> TestResult {
    handlers::responses_have_same_id(&world.context)
}

#[then("the response is a valid JSON array")]
fn json_array(world: &mut ObjectsWorld) -> TestResult {
    handlers::is_json_array(&world.context)
}

#[then("each object in the list has required fields")]
fn required_fields(world: &mut ObjectsWorld) -> TestResult {
    handlers::each_has_required_fields(&world.context)
}

#[then(expr = "{string} is remembered as {string}")]
fn remembered(world: &mut ObjectsWorld, value: String, key: String) -> TestResult {
    handlers::remembered_is(&world.context, &key, &value)
}

#[then(expr = "nothing is remembered as {string}")]
fn nothing_remembered(world: &mut ObjectsWorld, key: String) -> TestResult {
    handlers::nothing_remembered(&world.context, &key)
}

#[then(expr = "{int} objects are tracked for cleanup")]
fn tracked(world: &mut ObjectsWorld, count: usize) -> TestResult {
    handlers::tracked_count_is(&world.context, count)
}
