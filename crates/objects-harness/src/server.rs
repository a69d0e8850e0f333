//! In-memory implementation of the objects API, served by the test server.

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use parking_lot::RwLock;
use serde_json::{json, Value};
use std::fmt;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::model::{attributes_from_json, DomainObject};

/// Error text for bodies that are not a JSON object.
pub const BAD_BODY_ERROR: &str =
    "400 Bad Request. The request body is missing or is not a valid JSON object.";

/// Thread-safe, insertion-ordered object store.
#[derive(Clone, Default)]
pub struct ObjectStore {
    objects: Arc<RwLock<Vec<DomainObject>>>,
}

impl fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `object` under a fresh id and returns the stored copy.
    pub fn insert(&self, mut object: DomainObject) -> DomainObject {
        object.id = Some(Uuid::new_v4().simple().to_string());
        object.created_at = Some(timestamp());
        object.updated_at = None;
        self.objects.write().push(object.clone());
        object
    }

    pub fn get(&self, id: &str) -> Option<DomainObject> {
        self.objects
            .read()
            .iter()
            .find(|o| o.id.as_deref() == Some(id))
            .cloned()
    }

    pub fn list(&self) -> Vec<DomainObject> {
        self.objects.read().clone()
    }

    /// Replaces name and data of `id`.
    pub fn replace(&self, id: &str, object: DomainObject) -> Option<DomainObject> {
        let mut objects = self.objects.write();
        let stored = objects.iter_mut().find(|o| o.id.as_deref() == Some(id))?;
        stored.name = object.name;
        stored.data = object.data;
        stored.updated_at = Some(timestamp());
        Some(stored.clone())
    }

    /// Replaces the name if given and merges data keys.
    pub fn merge(&self, id: &str, object: DomainObject) -> Option<DomainObject> {
        let mut objects = self.objects.write();
        let stored = objects.iter_mut().find(|o| o.id.as_deref() == Some(id))?;
        if object.name.is_some() {
            stored.name = object.name;
        }
        stored.data.extend(object.data);
        stored.updated_at = Some(timestamp());
        Some(stored.clone())
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut objects = self.objects.write();
        let before = objects.len();
        objects.retain(|o| o.id.as_deref() != Some(id));
        objects.len() != before
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Router serving the objects endpoints from `store`.
pub fn objects_router(store: ObjectStore) -> Router {
    Router::new()
        .route("/objects", get(list_objects_handler).post(create_object_handler))
        .route(
            "/objects/:id",
            get(get_object_handler)
                .put(replace_object_handler)
                .patch(patch_object_handler)
                .delete(delete_object_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(store))
}

fn not_found(id: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Object with id={} was not found.", id) })),
    )
}

fn to_json(object: &DomainObject) -> Value {
    // DomainObject's Serialize impl cannot fail: keys are strings.
    serde_json::to_value(object).unwrap_or(Value::Null)
}

/// Decodes a request body, accepting only a JSON object.
///
/// Non-scalar attribute values are kept as they came.
fn parse_body(bytes: &Bytes) -> Result<DomainObject, (StatusCode, Json<Value>)> {
    let bad_request = || (StatusCode::BAD_REQUEST, Json(json!({ "error": BAD_BODY_ERROR })));

    let value: Value = serde_json::from_slice(bytes).map_err(|_| bad_request())?;
    let body = value.as_object().ok_or_else(bad_request)?;

    let name = match body.get("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(bad_request()),
    };
    let data = match body.get("data") {
        None | Some(Value::Null) => Default::default(),
        Some(Value::Object(map)) => attributes_from_json(map),
        Some(_) => return Err(bad_request()),
    };

    Ok(DomainObject {
        name,
        data,
        ..DomainObject::default()
    })
}

async fn list_objects_handler(Extension(store): Extension<ObjectStore>) -> Json<Value> {
    Json(Value::Array(store.list().iter().map(to_json).collect()))
}

async fn create_object_handler(Extension(store): Extension<ObjectStore>, bytes: Bytes) -> ApiResult {
    let object = parse_body(&bytes)?;
    Ok(Json(to_json(&store.insert(object))))
}

async fn get_object_handler(Extension(store): Extension<ObjectStore>, Path(id): Path<String>) -> ApiResult {
    store
        .get(&id)
        .map(|o| Json(to_json(&o)))
        .ok_or_else(|| not_found(&id))
}

async fn replace_object_handler(
    Extension(store): Extension<ObjectStore>,
    Path(id): Path<String>,
    bytes: Bytes,
) -> ApiResult {
    let object = parse_body(&bytes)?;
    store
        .replace(&id, object)
        .map(|o| Json(to_json(&o)))
        .ok_or_else(|| not_found(&id))
}

async fn patch_object_handler(
    Extension(store): Extension<ObjectStore>,
    Path(id): Path<String>,
    bytes: Bytes,
) -> ApiResult {
    let object = parse_body(&bytes)?;
    store
        .merge(&id, object)
        .map(|o| Json(to_json(&o)))
        .ok_or_else(|| not_found(&id))
}

async fn delete_object_handler(Extension(store): Extension<ObjectStore>, Path(id): Path<String>) -> ApiResult {
    if store.remove(&id) {
        Ok(Json(json!({ "message": format!("Object with id {} has been deleted.", id) })))
    } else {
        Err(not_found(&id))
    }
}
