use crate::{
    error::CampusError,
    fetch::{FetchFailure, FetchRequest},
};
use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Where page data comes from.
///
/// The HTTP client implements this against the REST backend; tests
/// implement it with canned or counting sources. Implementations must
/// return `FetchFailure::Cancelled` promptly once `cancel` fires.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// GET `request.endpoint` tagged with `request.locale`, parsed as JSON.
    async fn get_json(
        &self,
        request: &FetchRequest,
        cancel: &CancellationToken,
    ) -> Result<Value, FetchFailure>;
}

/// Persisted user preferences (language choice and the like).
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CampusError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), CampusError>;
}
