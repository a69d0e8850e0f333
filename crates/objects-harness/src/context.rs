//! Per-scenario state shared by every step handler.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::client::ObjectTransport;
use crate::error::{TestError, TestResult};
use crate::model::DomainObject;
use crate::response::ResponseSnapshot;

/// Mutable state threaded through one scenario's steps.
///
/// Each scenario owns its own instance; it is never shared between scenarios
/// running concurrently. Responses form a one-deep history: storing a new
/// current response moves the old one into `previous`.
#[derive(Default)]
pub struct ScenarioContext {
    api_client: Option<Arc<dyn ObjectTransport>>,
    current_object: Option<DomainObject>,
    current_response: Option<ResponseSnapshot>,
    previous_response: Option<ResponseSnapshot>,
    created_ids: Vec<String>,
    scratch: HashMap<String, Value>,
}

impl fmt::Debug for ScenarioContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioContext")
            .field("api_client", &self.api_client.as_ref().map(|c| c.base_url()))
            .field("current_object", &self.current_object)
            .field("current_response", &self.current_response)
            .field("previous_response", &self.previous_response)
            .field("created_ids", &self.created_ids)
            .field("scratch", &self.scratch)
            .finish()
    }
}

impl ScenarioContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_client(&mut self, client: Arc<dyn ObjectTransport>) {
        self.api_client = Some(client);
    }

    pub fn api_client(&self) -> TestResult<Arc<dyn ObjectTransport>> {
        self.api_client
            .clone()
            .ok_or(TestError::MissingState("API client (set the base URL first)"))
    }

    pub fn set_current_object(&mut self, object: DomainObject) {
        self.current_object = Some(object);
    }

    pub fn current_object(&self) -> Option<&DomainObject> {
        self.current_object.as_ref()
    }

    pub fn require_current_object(&self) -> TestResult<&DomainObject> {
        self.current_object
            .as_ref()
            .ok_or(TestError::MissingState("current object"))
    }

    pub fn current_object_mut(&mut self) -> TestResult<&mut DomainObject> {
        self.current_object
            .as_mut()
            .ok_or(TestError::MissingState("current object"))
    }

    /// Stores `response` as current, shifting the old current into previous.
    pub fn set_current_response(&mut self, response: ResponseSnapshot) {
        self.previous_response = self.current_response.replace(response);
    }

    pub fn current_response(&self) -> Option<&ResponseSnapshot> {
        self.current_response.as_ref()
    }

    pub fn previous_response(&self) -> Option<&ResponseSnapshot> {
        self.previous_response.as_ref()
    }

    pub fn require_current_response(&self) -> TestResult<&ResponseSnapshot> {
        self.current_response
            .as_ref()
            .ok_or(TestError::MissingState("current response"))
    }

    pub fn require_previous_response(&self) -> TestResult<&ResponseSnapshot> {
        self.previous_response
            .as_ref()
            .ok_or(TestError::MissingState("previous response"))
    }

    /// Records `id` for deletion at scenario end. Absent or empty ids are ignored.
    pub fn track_created_id(&mut self, id: Option<&str>) {
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            self.created_ids.push(id.to_string());
        }
    }

    /// Tracked ids in creation order.
    pub fn created_ids(&self) -> &[String] {
        &self.created_ids
    }

    pub fn last_created_id(&self) -> Option<&str> {
        self.created_ids.last().map(String::as_str)
    }

    pub fn set_scratch(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.scratch.insert(key.into(), value.into());
    }

    pub fn scratch(&self, key: &str) -> Option<&Value> {
        self.scratch.get(key)
    }

    pub fn clear_scratch(&mut self) {
        self.scratch.clear();
    }

    /// Clears the object, both responses and scratch data.
    ///
    /// Tracked ids survive: teardown still needs them.
    pub fn reset(&mut self) {
        self.current_object = None;
        self.current_response = None;
        self.previous_response = None;
        self.scratch.clear();
    }

    /// Forgets tracked ids, then resets.
    pub fn cleanup(&mut self) {
        self.created_ids.clear();
        self.reset();
    }
}
