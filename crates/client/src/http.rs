//! Base HTTP accessor - uniform GET/POST/PUT/DELETE against a base URL

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Per-call options merged into every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach `Authorization: Bearer <token>` when a token is supplied
    pub fn bearer(self, token: Option<&str>) -> Self {
        match token {
            Some(token) => self.header(AUTHORIZATION.as_str(), format!("Bearer {}", token)),
            None => self,
        }
    }

    /// Add a query string parameter
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append everything from `other`; later entries win on the server side
    pub fn merge(mut self, other: RequestOptions) -> Self {
        self.headers.extend(other.headers);
        self.query.extend(other.query);
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    fn header_map(&self) -> ClientResult<HeaderMap> {
        let mut map = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ClientError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| ClientError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            map.append(header_name, header_value);
        }
        Ok(map)
    }
}

/// Raw response with the body already read
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Build a response from parts (used by tests and replays)
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body into a typed value
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode the body as untyped JSON
    pub fn json_value(&self) -> ClientResult<serde_json::Value> {
        self.json()
    }

    /// Decode the body as untyped JSON, `Null` when it is empty or not JSON
    pub fn json_lossy(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap_or(serde_json::Value::Null)
    }
}

/// One issued request, as kept in a trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub method: String,
    pub path: String,
    pub status: Option<u16>,
    pub elapsed_ms: u64,
    pub error: Option<String>,
}

/// Shared, append-only log of the requests an accessor issued
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    entries: Arc<Mutex<Vec<TraceEntry>>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: TraceEntry) {
        self.entries.lock().push(entry);
    }

    pub fn snapshot(&self) -> Vec<TraceEntry> {
        self.entries.lock().clone()
    }

    pub fn take(&self) -> Vec<TraceEntry> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

/// Issues HTTP calls against one base URL.
///
/// Cloning is cheap: the underlying `reqwest::Client` and the optional trace
/// recorder are shared. No retries and no timeout logic live here; both belong
/// to the client the accessor was built from.
#[derive(Debug, Clone)]
pub struct HttpAccessor {
    client: reqwest::Client,
    base_url: String,
    trace: Option<TraceRecorder>,
}

impl HttpAccessor {
    /// Wrap an existing client
    pub fn new(client: reqwest::Client, base_url: &str) -> ClientResult<Self> {
        Url::parse(base_url).map_err(|source| ClientError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            trace: None,
        })
    }

    /// Build a client with a per-request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::new(client, base_url)
    }

    /// Record every call into `recorder`
    pub fn with_trace(mut self, recorder: TraceRecorder) -> Self {
        self.trace = Some(recorder);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn trace(&self) -> Option<&TraceRecorder> {
        self.trace.as_ref()
    }

    /// Resolve an endpoint against the base URL, keeping any base path prefix
    pub fn url(&self, endpoint: &str) -> ClientResult<Url> {
        let joined = if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        };
        Url::parse(&joined).map_err(|source| ClientError::InvalidUrl { url: joined, source })
    }

    pub async fn get(&self, endpoint: &str, options: RequestOptions) -> ClientResult<ApiResponse> {
        self.send(Method::GET, endpoint, None, options).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> ClientResult<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, endpoint, Some(body), options).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> ClientResult<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.send(Method::PUT, endpoint, Some(body), options).await
    }

    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> ClientResult<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.send(Method::DELETE, endpoint, Some(body), options).await
    }

    async fn send(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> ClientResult<ApiResponse> {
        let url = self.url(endpoint)?;
        let mut request = self
            .client
            .request(method.clone(), url)
            .headers(options.header_map()?);

        if !options.query_pairs().is_empty() {
            request = request.query(options.query_pairs());
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        debug!("{} {}", method, endpoint);
        let start = Instant::now();

        let result = async {
            let response = request.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response.bytes().await?.to_vec();
            Ok::<_, reqwest::Error>(ApiResponse { status, headers, body })
        }
        .await;

        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                debug!("{} {} -> {} ({} ms)", method, endpoint, response.status(), elapsed_ms);
                self.record(TraceEntry {
                    method: method.to_string(),
                    path: endpoint.to_string(),
                    status: Some(response.status()),
                    elapsed_ms,
                    error: None,
                });
                Ok(response)
            }
            Err(e) => {
                warn!("{} {} failed: {}", method, endpoint, e);
                self.record(TraceEntry {
                    method: method.to_string(),
                    path: endpoint.to_string(),
                    status: None,
                    elapsed_ms,
                    error: Some(e.to_string()),
                });
                Err(e.into())
            }
        }
    }

    fn record(&self, entry: TraceEntry) {
        if let Some(trace) = &self.trace {
            trace.record(entry);
        }
    }
}
