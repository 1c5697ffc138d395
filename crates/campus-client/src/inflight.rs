//! Collapses identical concurrent requests into one.
//!
//! An entry lives only while its request is pending; settled results
//! are never served to later callers.

use campus_core::fetch::{FetchFailure, FetchRequest};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::OnceCell;
use tracing::debug;

type Outcome = Result<Value, FetchFailure>;
type Slot = Arc<OnceCell<Outcome>>;
type Pending = HashMap<FetchRequest, Slot>;

#[derive(Default)]
pub struct InFlight {
    pending: Mutex<Pending>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Pending> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `fetch` for `key`, or join a pending run of the same key.
    ///
    /// If the caller driving the request is dropped, a joined caller
    /// takes over with its own `fetch`.
    pub async fn run<F, Fut>(&self, key: &FetchRequest, fetch: F) -> Outcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome>,
    {
        let slot = self.claim(key);
        let _release = Release {
            inflight: self,
            key,
            slot: &slot,
        };
        slot.get_or_init(fetch).await.clone()
    }

    /// Pending slot for `key`. A settled slot is never joined: it is
    /// replaced so the caller goes to the network.
    fn claim(&self, key: &FetchRequest) -> Slot {
        let mut pending = self.lock();
        match pending.get(key) {
            Some(slot) if !slot.initialized() => {
                debug!("{key}: joining in-flight request");
                Arc::clone(slot)
            }
            _ => {
                let slot = Slot::default();
                pending.insert(key.clone(), Arc::clone(&slot));
                slot
            }
        }
    }

    /// Number of distinct requests currently pending.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Drops the map entry as soon as its request settles, or once the last
/// waiter goes away, whether the caller finished or was cancelled.
struct Release<'a> {
    inflight: &'a InFlight,
    key: &'a FetchRequest,
    slot: &'a Slot,
}

impl Drop for Release<'_> {
    fn drop(&mut self) {
        let mut pending = self.inflight.lock();
        let Some(current) = pending.get(self.key) else {
            return;
        };
        // The map and this guard hold two references; more means
        // another caller is still waiting on an unsettled slot.
        let abandoned = Arc::strong_count(self.slot) <= 2;
        if Arc::ptr_eq(current, self.slot) && (self.slot.initialized() || abandoned) {
            pending.remove(self.key);
        }
    }
}
