//! Fetch outcomes and the fetch-or-fallback contract.
//!
//! Page code never sees a fetch error: every failure is logged and
//! replaced by a locally authored fallback of the same type.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::locale::Locale;
use crate::traits::ContentSource;

/// Why a fetch fell back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    /// Connection, DNS, or other transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Non-2xx status.
    #[error("http status {0}")]
    Status(u16),

    /// Body was not JSON or did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The consuming page went away before the request settled.
    #[error("cancelled")]
    Cancelled,
}

/// Result of a fetch: live data, or a fallback of the same shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    Live(T),
    Fallback { value: T, failure: FetchFailure },
}

impl<T> FetchResult<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Live(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Self::Live(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Live(_) => None,
            Self::Fallback { failure, .. } => Some(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchResult<U> {
        match self {
            Self::Live(value) => FetchResult::Live(f(value)),
            Self::Fallback { value, failure } => FetchResult::Fallback {
                value: f(value),
                failure,
            },
        }
    }
}

/// One GET against the content API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchRequest {
    pub endpoint: String,
    pub locale: Locale,
    pub params: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn new(endpoint: impl Into<String>, locale: Locale) -> Self {
        Self {
            endpoint: endpoint.into(),
            locale,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replace the session locale with a caller-supplied one.
    pub fn with_override(mut self, locale: Option<Locale>) -> Self {
        if let Some(locale) = locale {
            self.locale = locale;
        }
        self
    }
}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {} [{}]", self.endpoint, self.locale)
    }
}

/// Unwrap `{"results": [...]}` or accept a bare `[...]`.
pub fn normalize_envelope(body: Value) -> Result<Vec<Value>, FetchFailure> {
    match body {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(FetchFailure::Decode(
                "expected a list or a {results: [...]} envelope".to_string(),
            )),
        },
        other => Err(FetchFailure::Decode(format!(
            "expected a list, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, FetchFailure> {
    serde_json::from_value(value).map_err(|e| FetchFailure::Decode(e.to_string()))
}

fn settle<T>(request: &FetchRequest, outcome: Result<T, FetchFailure>, fallback: impl FnOnce() -> T) -> FetchResult<T> {
    match outcome {
        Ok(value) => FetchResult::Live(value),
        Err(failure) => {
            if failure != FetchFailure::Cancelled {
                warn!("{request} failed, using fallback: {failure}");
            }
            FetchResult::Fallback {
                value: fallback(),
                failure,
            }
        }
    }
}

/// Fetch a single object, or fall back.
pub async fn fetch_or_fallback<T: DeserializeOwned>(
    source: &dyn ContentSource,
    request: &FetchRequest,
    cancel: &CancellationToken,
    fallback: impl FnOnce() -> T,
) -> FetchResult<T> {
    let outcome = match source.get_json(request, cancel).await {
        Ok(body) => decode(body),
        Err(e) => Err(e),
    };
    settle(request, outcome, fallback)
}

/// Fetch a list endpoint, normalising its envelope, or fall back.
pub async fn fetch_list_or_fallback<T: DeserializeOwned>(
    source: &dyn ContentSource,
    request: &FetchRequest,
    cancel: &CancellationToken,
    fallback: impl FnOnce() -> Vec<T>,
) -> FetchResult<Vec<T>> {
    let outcome = match source.get_json(request, cancel).await {
        Ok(body) => normalize_envelope(body)
            .and_then(|items| items.into_iter().map(decode).collect::<Result<Vec<T>, _>>()),
        Err(e) => Err(e),
    };
    settle(request, outcome, fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    struct Canned(Result<Value, FetchFailure>);

    #[async_trait]
    impl ContentSource for Canned {
        async fn get_json(
            &self,
            _request: &FetchRequest,
            _cancel: &CancellationToken,
        ) -> Result<Value, FetchFailure> {
            self.0.clone()
        }
    }

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Item {
        id: u32,
    }

    fn req() -> FetchRequest {
        FetchRequest::new("/api/news/", Locale::Ru)
    }

    #[test]
    fn test_normalize_results_envelope() {
        let body = json!({"count": 3, "results": [{"id": 1}, {"id": 2}, {"id": 3}]});
        assert_eq!(normalize_envelope(body).unwrap().len(), 3);
    }

    #[test]
    fn test_normalize_bare_array() {
        let body = json!([{"id": 1}, {"id": 2}, {"id": 3}]);
        assert_eq!(normalize_envelope(body).unwrap().len(), 3);
    }

    #[test]
    fn test_normalize_rejects_other_shapes() {
        assert!(matches!(
            normalize_envelope(json!({"data": []})),
            Err(FetchFailure::Decode(_))
        ));
        assert!(matches!(
            normalize_envelope(json!({"results": "nope"})),
            Err(FetchFailure::Decode(_))
        ));
        assert!(matches!(normalize_envelope(json!(null)), Err(FetchFailure::Decode(_))));
    }

    #[test]
    fn test_with_override() {
        let r = req().with_override(Some(Locale::En));
        assert_eq!(r.locale, Locale::En);
        let r = req().with_override(None);
        assert_eq!(r.locale, Locale::Ru);
    }

    #[tokio::test]
    async fn test_list_envelope_shapes_agree() {
        let cancel = CancellationToken::new();
        for body in [
            json!({"results": [{"id": 1}, {"id": 2}, {"id": 3}]}),
            json!([{"id": 1}, {"id": 2}, {"id": 3}]),
        ] {
            let source = Canned(Ok(body));
            let res: FetchResult<Vec<Item>> =
                fetch_list_or_fallback(&source, &req(), &cancel, Vec::new).await;
            assert!(res.is_ok());
            assert_eq!(res.value().len(), 3);
        }
    }

    #[tokio::test]
    async fn test_failure_yields_fallback_of_same_shape() {
        let cancel = CancellationToken::new();
        let source = Canned(Err(FetchFailure::Status(500)));
        let res = fetch_list_or_fallback(&source, &req(), &cancel, || vec![Item { id: 9 }]).await;
        assert!(!res.is_ok());
        assert_eq!(res.failure(), Some(&FetchFailure::Status(500)));
        assert_eq!(res.value(), &vec![Item { id: 9 }]);
    }

    #[tokio::test]
    async fn test_malformed_item_falls_back() {
        let cancel = CancellationToken::new();
        let source = Canned(Ok(json!([{"id": "not a number"}])));
        let res: FetchResult<Vec<Item>> =
            fetch_list_or_fallback(&source, &req(), &cancel, Vec::new).await;
        assert!(matches!(res.failure(), Some(FetchFailure::Decode(_))));
        assert!(res.value().is_empty());
    }

    #[tokio::test]
    async fn test_object_fetch() {
        let cancel = CancellationToken::new();
        let source = Canned(Ok(json!({"id": 4})));
        let res = fetch_or_fallback(&source, &req(), &cancel, || Item { id: 0 }).await;
        assert_eq!(res, FetchResult::Live(Item { id: 4 }));
        assert_eq!(res.map(|i| i.id * 2).into_value(), 8);
    }
}
