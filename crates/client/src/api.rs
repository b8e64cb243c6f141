use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

use model::{AccessToken, Alert, Credentials, GridCell, Unit};
use tiles::{TileError, TileFetch};

/// Network failure taxonomy for remote actions.
///
/// Every action is single-attempt: a failure surfaces to the caller, aborts
/// only that action's effects, and is never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (refused, reset, DNS, ...).
    Transport(String),
    /// The server answered with a non-2xx status.
    Http(u16),
    /// The response body was not the expected JSON shape.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "request failed: {msg}"),
            ApiError::Http(status) => write!(f, "server returned HTTP {status}"),
            ApiError::Decode(msg) => write!(f, "response decode failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Remote authority consumed by the orchestrator and the alert poller.
///
/// Futures are `Send` so the poll loop can run on a spawned task.
pub trait MapApi {
    fn fetch_grid(&self) -> impl Future<Output = Result<Vec<GridCell>, ApiError>> + Send;
    fn place_units(&self, count: u32) -> impl Future<Output = Result<Vec<Unit>, ApiError>> + Send;
    fn reset_units(&self) -> impl Future<Output = Result<(), ApiError>> + Send;
    fn report_threat(
        &self,
        cell_id: &str,
        increase: f64,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
    fn fetch_alerts(&self) -> impl Future<Output = Result<Vec<Alert>, ApiError>> + Send;
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AccessToken, ApiError>> + Send;
    fn signup(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AccessToken, ApiError>> + Send;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThreatReport<'a> {
    cell_id: &'a str,
    increase: f64,
}

/// reqwest-backed `MapApi` against the deployment's base URL.
#[derive(Debug, Clone)]
pub struct HttpMapApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpMapApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn decode_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn expect_success(resp: reqwest::Response) -> Result<(), ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Http(status.as_u16()));
        }
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode_json(resp).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode_json(resp).await
    }
}

impl MapApi for HttpMapApi {
    async fn fetch_grid(&self) -> Result<Vec<GridCell>, ApiError> {
        self.get_json("/map").await
    }

    async fn place_units(&self, count: u32) -> Result<Vec<Unit>, ApiError> {
        let resp = self
            .http
            .post(self.url(&format!("/map/domes/{count}")))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode_json(resp).await
    }

    async fn reset_units(&self) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.url("/map/reset"))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::expect_success(resp).await
    }

    async fn report_threat(&self, cell_id: &str, increase: f64) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.url("/map/threat"))
            .json(&ThreatReport { cell_id, increase })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::expect_success(resp).await
    }

    async fn fetch_alerts(&self) -> Result<Vec<Alert>, ApiError> {
        self.get_json("/pikud-haoref/alerts").await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        self.post_json("/auth/login", credentials).await
    }

    async fn signup(&self, credentials: &Credentials) -> Result<AccessToken, ApiError> {
        self.post_json("/auth/signup", credentials).await
    }
}

/// reqwest-backed tile byte source for the cached tile layer.
#[derive(Debug, Clone, Default)]
pub struct HttpTileFetch {
    http: reqwest::Client,
}

impl HttpTileFetch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TileFetch for HttpTileFetch {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TileError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TileError::Fetch(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TileError::Fetch(format!("HTTP {}", status.as_u16())));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| TileError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
