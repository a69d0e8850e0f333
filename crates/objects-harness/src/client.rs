//! HTTP transport for the objects API.

use async_trait::async_trait;
use mockall::automock;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder};
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::error::{TestError, TestResult};
use crate::model::DomainObject;
use crate::response::ResponseSnapshot;

const OBJECTS_ENDPOINT: &str = "/objects";
const JSON: &str = "application/json";

/// Request/response transport against one base endpoint.
///
/// Non-2xx statuses come back as ordinary snapshots. Only failures below
/// HTTP (connection refused, timeouts) are errors.
#[automock]
#[async_trait]
pub trait ObjectTransport: Send + Sync {
    /// `POST /objects` with the serialized object.
    async fn create(&self, object: &DomainObject) -> TestResult<ResponseSnapshot>;

    /// `POST /objects` with `raw_body` sent verbatim.
    async fn create_raw(&self, raw_body: &str) -> TestResult<ResponseSnapshot>;

    async fn get_by_id(&self, id: &str) -> TestResult<ResponseSnapshot>;

    async fn list_all(&self) -> TestResult<ResponseSnapshot>;

    /// `PUT /objects/{id}`, full replace.
    async fn update(&self, id: &str, object: &DomainObject) -> TestResult<ResponseSnapshot>;

    /// `PATCH /objects/{id}`, partial merge.
    async fn patch(&self, id: &str, object: &DomainObject) -> TestResult<ResponseSnapshot>;

    async fn delete(&self, id: &str) -> TestResult<ResponseSnapshot>;

    fn base_url(&self) -> String;
}

/// reqwest-backed [`ObjectTransport`].
#[derive(Clone)]
pub struct RestApiClient {
    client: Client,
    base_url: String,
}

impl fmt::Debug for RestApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RestApiClient {
    /// Client with reqwest's defaults (no request timeout).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> TestResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Wraps an existing client, e.g. the one handed out by the test server.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => format!("{}{}/{}", self.base_url, OBJECTS_ENDPOINT, id),
            None => format!("{}{}", self.base_url, OBJECTS_ENDPOINT),
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
    }

    async fn send(&self, method: Method, url: String, body: Option<String>) -> TestResult<ResponseSnapshot> {
        debug!(%method, %url, body = body.as_deref().unwrap_or(""), "Sending request");

        let mut request = self.request(method.clone(), &url);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        debug!(%method, %url, status, %body, "Received response");
        Ok(ResponseSnapshot::new(status, body))
    }
}

fn transport_error(err: reqwest::Error) -> TestError {
    if err.is_timeout() {
        TestError::Timeout(err.to_string())
    } else {
        TestError::HttpClient(err)
    }
}

#[async_trait]
impl ObjectTransport for RestApiClient {
    async fn create(&self, object: &DomainObject) -> TestResult<ResponseSnapshot> {
        let body = serde_json::to_string(object)?;
        self.send(Method::POST, self.url(None), Some(body)).await
    }

    async fn create_raw(&self, raw_body: &str) -> TestResult<ResponseSnapshot> {
        self.send(Method::POST, self.url(None), Some(raw_body.to_string())).await
    }

    async fn get_by_id(&self, id: &str) -> TestResult<ResponseSnapshot> {
        self.send(Method::GET, self.url(Some(id)), None).await
    }

    async fn list_all(&self) -> TestResult<ResponseSnapshot> {
        self.send(Method::GET, self.url(None), None).await
    }

    async fn update(&self, id: &str, object: &DomainObject) -> TestResult<ResponseSnapshot> {
        let body = serde_json::to_string(object)?;
        self.send(Method::PUT, self.url(Some(id)), Some(body)).await
    }

    async fn patch(&self, id: &str, object: &DomainObject) -> TestResult<ResponseSnapshot> {
        let body = serde_json::to_string(object)?;
        self.send(Method::PATCH, self.url(Some(id)), Some(body)).await
    }

    async fn delete(&self, id: &str) -> TestResult<ResponseSnapshot> {
        self.send(Method::DELETE, self.url(Some(id)), None).await
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }
}
