use super::*;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl PreferenceStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CampusError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CampusError> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

struct FailingStore;

#[async_trait]
impl PreferenceStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, CampusError> {
        Err(CampusError::Store("unavailable".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), CampusError> {
        Err(CampusError::Store("unavailable".into()))
    }
}

#[test]
fn test_all_keys_have_russian_baseline() {
    let keys = [
        "management.title",
        "management.organizationTitle",
        "management.loadingStructure",
        "management.teachers",
        "management.university",
        "management.rector",
        "management.rectorBio",
        "news.title",
        "news.featured",
        "news.fallbackNews.0.title",
        "news.fallbackNews.1.summary",
        "news.events.title",
        "mission.title",
        "research.management.title",
        "research.management.noData",
        "common.offline",
    ];
    for key in keys {
        assert!(labels::lookup(key, Locale::Ru).is_some(), "missing ru for {key}");
    }
}

#[test]
fn test_t_per_locale() {
    assert_eq!(t("management.title", Locale::Ru), "Руководство");
    assert_eq!(t("management.title", Locale::En), "Management");
    assert_eq!(t("management.title", Locale::Kg), "Жетекчилик");
}

#[test]
fn test_t_missing_translation_falls_back_to_ru() {
    assert_eq!(t("management.rectorBio", Locale::Kg), "Ректор университета");
}

#[test]
fn test_t_unknown_key_returns_key() {
    assert_eq!(t("no.such.key", Locale::En), "no.such.key");
}

#[tokio::test]
async fn test_change_language_notifies_and_persists() {
    let store = Arc::new(MemoryStore::default());
    let translator = Translator::with_store(Locale::Ru, store.clone(), "i18nextLng");
    let mut rx = translator.subscribe();

    let locale = translator.change_language("ky").await.unwrap();
    assert_eq!(locale, Locale::Kg);
    assert_eq!(translator.language(), Locale::Kg);
    assert!(rx.has_changed().unwrap());
    assert_eq!(*rx.borrow_and_update(), Locale::Kg);
    assert_eq!(
        store.get("i18nextLng").await.unwrap().as_deref(),
        Some("kg")
    );
    assert_eq!(translator.t("management.title"), "Жетекчилик");
}

#[tokio::test]
async fn test_same_language_does_not_notify() {
    let translator = Translator::new(Locale::En);
    let rx = translator.subscribe();
    translator.change_language("en-GB").await.unwrap();
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test]
async fn test_unsupported_language_rejected() {
    let translator = Translator::new(Locale::Ru);
    let err = translator.change_language("de").await.unwrap_err();
    assert!(matches!(err, CampusError::Locale(_)));
    assert_eq!(translator.language(), Locale::Ru);
}

#[tokio::test]
async fn test_store_failure_does_not_block_switch() {
    let translator = Translator::with_store(Locale::Ru, Arc::new(FailingStore), "lang");
    assert_eq!(translator.change_language("en").await.unwrap(), Locale::En);
    assert_eq!(translator.language(), Locale::En);
}
