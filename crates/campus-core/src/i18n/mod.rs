//! UI labels and the active-language state.
//!
//! `t(key, locale)` looks up static labels, falling back to Russian
//! (the content baseline) and then to the key itself. [`Translator`]
//! owns the current language and notifies mounted pages when it changes.

mod labels;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::CampusError;
use crate::locale::{Locale, PREFERENCE_KEY};
use crate::traits::PreferenceStore;

/// Return the label for `key` in `locale`.
pub fn t(key: &str, locale: Locale) -> &str {
    labels::lookup(key, locale)
        .or_else(|| labels::lookup(key, Locale::Ru))
        .unwrap_or(key)
}

/// Holds the active UI language.
///
/// Subscribers receive every change; setting the current language
/// again is not a change.
pub struct Translator {
    current: watch::Sender<Locale>,
    store: Option<Arc<dyn PreferenceStore>>,
    preference_key: String,
}

impl Translator {
    /// Translator without persistence.
    pub fn new(initial: Locale) -> Self {
        let (current, _) = watch::channel(initial);
        Self {
            current,
            store: None,
            preference_key: PREFERENCE_KEY.to_string(),
        }
    }

    /// Translator that persists language changes under `preference_key`.
    pub fn with_store(
        initial: Locale,
        store: Arc<dyn PreferenceStore>,
        preference_key: impl Into<String>,
    ) -> Self {
        let mut translator = Self::new(initial);
        translator.store = Some(store);
        translator.preference_key = preference_key.into();
        translator
    }

    pub fn language(&self) -> Locale {
        *self.current.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Locale> {
        self.current.subscribe()
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        t(key, self.language())
    }

    /// Switch language from a UI tag (`en`, `ky`, `ru-RU`, ...).
    ///
    /// The choice is persisted before subscribers are notified. A
    /// persistence failure is logged and does not block the switch.
    pub async fn change_language(&self, tag: &str) -> Result<Locale, CampusError> {
        let locale: Locale = tag.parse()?;
        if let Some(store) = &self.store {
            if let Err(e) = store.set(&self.preference_key, locale.code()).await {
                warn!("failed to persist language {locale}: {e}");
            }
        }
        let changed = self.current.send_if_modified(|current| {
            if *current == locale {
                false
            } else {
                *current = locale;
                true
            }
        });
        if changed {
            info!("language changed to {locale}");
        }
        Ok(locale)
    }
}
