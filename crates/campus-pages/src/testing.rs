//! Scripted content source shared by page tests.

use async_trait::async_trait;
use campus_core::fetch::{FetchFailure, FetchRequest};
use campus_core::locale::Locale;
use campus_core::traits::ContentSource;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Answers by endpoint and records every call.
#[derive(Default)]
pub struct ScriptedSource {
    routes: HashMap<String, Result<Value, FetchFailure>>,
    delay: Duration,
    calls: Mutex<Vec<(String, Locale)>>,
    cancelled: Mutex<usize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, endpoint: &str, body: Value) -> Self {
        self.routes.insert(endpoint.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, endpoint: &str, failure: FetchFailure) -> Self {
        self.routes.insert(endpoint.to_string(), Err(failure));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<(String, Locale)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls().iter().filter(|(e, _)| e == endpoint).count()
    }

    pub fn cancelled(&self) -> usize {
        *self.cancelled.lock().unwrap()
    }
}

#[async_trait]
impl ContentSource for ScriptedSource {
    async fn get_json(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, FetchFailure> {
        self.calls
            .lock()
            .unwrap()
            .push((request.endpoint.clone(), request.locale));
        tokio::select! {
            _ = cancel.cancelled() => {
                *self.cancelled.lock().unwrap() += 1;
                return Err(FetchFailure::Cancelled);
            }
            _ = tokio::time::sleep(self.delay) => {}
        }
        self.routes
            .get(&request.endpoint)
            .cloned()
            .unwrap_or(Err(FetchFailure::Status(404)))
    }
}
