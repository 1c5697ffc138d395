//! REST client that tags every request with the active locale and
//! turns every failure into a fallback.

use async_trait::async_trait;
use campus_core::{
    config::ApiConfig,
    error::CampusError,
    fetch::{self, FetchFailure, FetchRequest, FetchResult},
    traits::ContentSource,
};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Instrument};
use url::Url;
use uuid::Uuid;

use crate::inflight::InFlight;
use crate::transport::{self, LocaleTransport};

/// Locale-aware JSON client for the content API.
///
/// There is no response cache: every call that is not joined to an
/// identical in-flight request goes to the network.
pub struct LocalizedFetchClient {
    http: reqwest::Client,
    base_url: Url,
    transport: Arc<dyn LocaleTransport>,
    inflight: Option<InFlight>,
}

impl LocalizedFetchClient {
    /// Create from config values.
    pub fn from_config(config: &ApiConfig) -> Result<Self, CampusError> {
        let mut client = Self::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            transport::from_config(config),
        )?;
        if !config.dedupe_inflight {
            client.inflight = None;
        }
        Ok(client)
    }

    pub fn new(
        base_url: &str,
        timeout: Duration,
        transport: Arc<dyn LocaleTransport>,
    ) -> Result<Self, CampusError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CampusError::Config(format!("invalid base url {base_url:?}: {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CampusError::Http(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            base_url,
            transport,
            inflight: Some(InFlight::new()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Absolute URL for an endpoint path plus caller params.
    ///
    /// The endpoint is appended to the base path rather than resolved
    /// against it, so a base of `https://host/backend` keeps its prefix.
    pub fn endpoint_url(&self, request: &FetchRequest) -> Result<Url, FetchFailure> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = request.endpoint.trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))
            .map_err(|e| FetchFailure::Network(format!("invalid url for {}: {e}", request.endpoint)))?;
        if !request.params.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.params);
        }
        Ok(url)
    }

    /// Fetch an object, or return `fallback()` of the same type.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
        fallback: impl FnOnce() -> T,
    ) -> FetchResult<T> {
        fetch::fetch_or_fallback(self, request, cancel, fallback).await
    }

    /// Fetch a list endpoint (bare array or `{results: [...]}`), or fall back.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
        fallback: impl FnOnce() -> Vec<T>,
    ) -> FetchResult<Vec<T>> {
        fetch::fetch_list_or_fallback(self, request, cancel, fallback).await
    }

    /// Check whether the backend answers at all.
    pub async fn is_available(&self) -> bool {
        match self.http.get(self.base_url.clone()).send().await {
            Ok(_) => true,
            Err(e) => {
                warn!("backend not available at {}: {e}", self.base_url);
                false
            }
        }
    }

    async fn send(&self, request: &FetchRequest) -> Result<Value, FetchFailure> {
        let url = self.endpoint_url(request)?;
        debug!("GET {url} transport={}", self.transport.name());

        let builder = self.http.get(url).header(ACCEPT, "application/json");
        let resp = self
            .transport
            .apply(builder, request.locale)
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(classify)?;
        serde_json::from_slice(&body).map_err(|e| FetchFailure::Decode(e.to_string()))
    }
}

/// Map a transport error onto the failure taxonomy.
fn classify(e: reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else if e.is_decode() {
        FetchFailure::Decode(e.to_string())
    } else {
        FetchFailure::Network(e.to_string())
    }
}

#[async_trait]
impl ContentSource for LocalizedFetchClient {
    async fn get_json(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, FetchFailure> {
        let span = tracing::debug_span!("fetch", request_id = %Uuid::new_v4(), endpoint = %request.endpoint, locale = %request.locale);
        let work = async {
            match &self.inflight {
                Some(inflight) => inflight.run(request, || self.send(request)).await,
                None => self.send(request).await,
            }
        };
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("{request}: cancelled");
                Err(FetchFailure::Cancelled)
            }
            outcome = work.instrument(span) => outcome,
        }
    }
}
