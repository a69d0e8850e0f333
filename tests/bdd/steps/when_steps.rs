use cucumber::when;
use objects_harness::handlers::when as handlers;
use objects_harness::TestResult;

use crate::steps::world::ObjectsWorld;

#[when("the request to add the item is made")]
async fn add_item(world: &mut ObjectsWorld) -> TestResult {
    handlers::create_current(&mut world.context).await
}

#[when("I retrieve the created object by its id")]
async fn retrieve_created(world: &mut ObjectsWorld) -> TestResult {
    handlers::retrieve_created(&mut world.context).await
}

#[when("I retrieve the same object again")]
async fn retrieve_again(world: &mut ObjectsWorld) -> TestResult {
    handlers::retrieve_again(&mut world.context).await
}

#[when("I request to list all objects")]
async fn list_all(world: &mut ObjectsWorld) -> TestResult {
    handlers::list_all(&mut world.context).await
}

#[when("I delete the created object")]
async fn delete_created(world: &mut ObjectsWorld) -> TestResult {
    handlers::delete_created(&mut world.context).await
}

#[when("I attempt to retrieve the deleted object")]
async fn retrieve_deleted(world: &mut ObjectsWorld) -> TestResult {
    handlers::retrieve_deleted(&mut world.context).await
}

#[when(expr = "I update the object with name {string}")]
async fn update_name(world: &mut ObjectsWorld, name: String) -> TestResult {
    handlers::update_name(&mut world.context, &name).await
}

#[when(expr = "I update the object with price {string}")]
async fn update_price(world: &mut ObjectsWorld, price: String) -> TestResult {
    handlers::update_price(&mut world.context, &price).await
}

#[when(expr = "I patch the object with name {string}")]
async fn patch_name(world: &mut ObjectsWorld, name: String) -> TestResult {
    handlers::patch_name(&mut world.context, &name).await
}

#[when(expr = "I attempt to retrieve an object with id {string}")]
async fn retrieve_by_id(world: &mut ObjectsWorld, id: String) -> TestResult {
    handlers::retrieve_by_id(&mut world.context, &id).await
}

#[when(expr = "I attempt to delete an object with id {string}")]
async fn delete_by_id(world: &mut ObjectsWorld, id: String) -> TestResult {
    handlers::delete_by_id(&mut world.context, &id).await
}

#[when("I send an invalid JSON request to create an object")]
async fn invalid_json(world: &mut ObjectsWorld) -> TestResult {
    handlers::create_malformed(&mut world.context).await
}

#[when("I forget everything I remembered")]
fn forget(world: &mut ObjectsWorld) {
    handlers::forget_remembered(&mut world.context);
}
