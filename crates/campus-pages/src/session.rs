//! Page lifecycle: `Idle → Loading → Ready`, reloading on language change.
//!
//! A mounted page owns a cancellation token. Unmounting (or dropping
//! the session) cancels in-flight fetches, and nothing is published
//! after that point.

use async_trait::async_trait;
use campus_core::i18n::Translator;
use campus_core::locale::Locale;
use campus_core::traits::ContentSource;
use std::sync::Arc;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Loaded page content.
pub trait PageData: Clone + Send + Sync + 'static {
    /// True when every endpoint returned live data.
    fn is_live(&self) -> bool;
}

/// One page of the site and how it loads its content.
#[async_trait]
pub trait Page: Send + Sync + 'static {
    type Data: PageData;

    fn name(&self) -> &'static str;

    /// Endpoints this page reads, for diagnostics.
    fn endpoints(&self) -> &'static [&'static str];

    /// Load every endpoint for `locale`. Never fails: each endpoint
    /// settles to live data or its fallback.
    async fn load(
        &self,
        source: &dyn ContentSource,
        locale: Locale,
        cancel: &CancellationToken,
    ) -> Self::Data;
}

/// Coarse lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<D> {
    Idle,
    Loading { locale: Locale },
    Ready { locale: Locale, data: D },
}

impl<D: PageData> PageState<D> {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Idle => Phase::Idle,
            Self::Loading { .. } => Phase::Loading,
            Self::Ready { data, .. } if data.is_live() => Phase::Success,
            Self::Ready { .. } => Phase::Fallback,
        }
    }

    pub fn data(&self) -> Option<&D> {
        match self {
            Self::Ready { data, .. } => Some(data),
            _ => None,
        }
    }

    pub fn locale(&self) -> Option<Locale> {
        match self {
            Self::Idle => None,
            Self::Loading { locale } | Self::Ready { locale, .. } => Some(*locale),
        }
    }
}

/// A mounted page.
pub struct PageSession<P: Page> {
    name: &'static str,
    state: watch::Receiver<PageState<P::Data>>,
    retry: Arc<Notify>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl<P: Page> PageSession<P> {
    /// Mount `page`: load once for the current language, then reload
    /// once per language change until unmounted.
    pub fn mount(page: P, source: Arc<dyn ContentSource>, translator: &Translator) -> Self {
        let name = page.name();
        let endpoints = page.endpoints().join(", ");
        let (state_tx, state) = watch::channel(PageState::Idle);
        let retry = Arc::new(Notify::new());
        let cancel = CancellationToken::new();

        let task = tokio::spawn(run(
            page,
            source,
            translator.subscribe(),
            state_tx,
            retry.clone(),
            cancel.clone(),
        ));

        debug!("{name}: mounted, reads {endpoints}");
        Self {
            name,
            state,
            retry,
            cancel,
            task: Some(task),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> PageState<P::Data> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PageState<P::Data>> {
        self.state.clone()
    }

    /// Wait until the page has settled for `locale`.
    ///
    /// Returns `None` if the session ended first.
    pub async fn ready_for(&mut self, locale: Locale) -> Option<P::Data> {
        let state = self
            .state
            .wait_for(|s| matches!(s, PageState::Ready { locale: l, .. } if *l == locale))
            .await
            .ok()?;
        state.data().cloned()
    }

    /// Wait until the page has settled for whatever language is active.
    pub async fn ready(&mut self) -> Option<(Locale, P::Data)> {
        let state = self
            .state
            .wait_for(|s| matches!(s, PageState::Ready { .. }))
            .await
            .ok()?;
        match &*state {
            PageState::Ready { locale, data } => Some((*locale, data.clone())),
            _ => None,
        }
    }

    /// Reload with the current language (the "try again" action).
    pub fn retry(&self) {
        self.retry.notify_one();
    }

    /// Tear the page down, cancelling any in-flight fetch, and wait for
    /// the session task to exit.
    pub async fn unmount(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        debug!("{}: unmounted", self.name);
    }
}

impl<P: Page> Drop for PageSession<P> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run<P: Page>(
    page: P,
    source: Arc<dyn ContentSource>,
    mut language: watch::Receiver<Locale>,
    state: watch::Sender<PageState<P::Data>>,
    retry: Arc<Notify>,
    cancel: CancellationToken,
) {
    let name = page.name();
    loop {
        let locale = *language.borrow_and_update();
        state.send_replace(PageState::Loading { locale });

        let data = page.load(source.as_ref(), locale, &cancel).await;
        if cancel.is_cancelled() {
            debug!("{name}: dropped result after unmount");
            return;
        }
        let live = data.is_live();
        state.send_replace(PageState::Ready { locale, data });
        if live {
            debug!("{name}: ready [{locale}]");
        } else {
            info!("{name}: ready with fallback content [{locale}]");
        }

        tokio::select! {
            _ = cancel.cancelled() => return,
            changed = language.changed() => {
                if changed.is_err() {
                    // Translator gone; nothing can change any more.
                    cancel.cancelled().await;
                    return;
                }
                debug!("{name}: language changed, reloading");
            }
            _ = retry.notified() => debug!("{name}: retry requested"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::{EventsPage, ManagementPage};
    use crate::testing::ScriptedSource;
    use campus_core::fetch::FetchFailure;
    use serde_json::json;
    use std::time::Duration;

    const EVENTS: &str = "/api/events/";

    async fn wait_until(cond: impl Fn() -> bool) {
        tokio::time::timeout(Duration::from_secs(2), async {
            while !cond() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    fn events_source() -> Arc<ScriptedSource> {
        Arc::new(ScriptedSource::new().route(EVENTS, json!([{"id": 1, "title_ru": "А"}])))
    }

    #[tokio::test]
    async fn test_mount_loads_once() {
        let source = events_source();
        let translator = Translator::new(Locale::Ru);
        let mut session = PageSession::mount(EventsPage, source.clone(), &translator);

        let data = session.ready_for(Locale::Ru).await.unwrap();
        assert!(data.is_live());
        assert_eq!(session.state().phase(), Phase::Success);
        assert_eq!(session.name(), "events");
        assert_eq!(source.calls(), vec![(EVENTS.to_string(), Locale::Ru)]);
    }

    #[tokio::test]
    async fn test_language_switch_refetches_mounted_pages_once() {
        let source = Arc::new(
            ScriptedSource::new()
                .route(EVENTS, json!([]))
                .route("/api/management/", json!([{"id": 1}]))
                .route("/api/teachers/", json!([])),
        );
        let translator = Translator::new(Locale::Ru);
        let mut events = PageSession::mount(EventsPage, source.clone(), &translator);
        let mut management = PageSession::mount(ManagementPage, source.clone(), &translator);
        events.ready_for(Locale::Ru).await.unwrap();
        management.ready_for(Locale::Ru).await.unwrap();

        translator.change_language("en").await.unwrap();
        events.ready_for(Locale::En).await.unwrap();
        management.ready_for(Locale::En).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert_eq!(source.calls_to(EVENTS), 2);
        assert_eq!(source.calls_to("/api/management/"), 2);
        assert_eq!(source.calls_to("/api/teachers/"), 2);
        // Unmounted pages never fetch.
        assert_eq!(source.calls_to("/api/news/"), 0);
        let english = source.calls().iter().filter(|(_, l)| *l == Locale::En).count();
        assert_eq!(english, 3);
    }

    #[tokio::test]
    async fn test_same_language_does_not_reload() {
        let source = events_source();
        let translator = Translator::new(Locale::En);
        let mut session = PageSession::mount(EventsPage, source.clone(), &translator);
        session.ready_for(Locale::En).await.unwrap();

        translator.change_language("en-US").await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(source.calls_to(EVENTS), 1);
    }

    #[tokio::test]
    async fn test_unmount_cancels_in_flight_fetch() {
        let source = Arc::new(
            ScriptedSource::new()
                .route(EVENTS, json!([]))
                .delayed(Duration::from_secs(30)),
        );
        let translator = Translator::new(Locale::Ru);
        let session = PageSession::mount(EventsPage, source.clone(), &translator);
        let state = session.subscribe();

        let calls = source.clone();
        wait_until(move || calls.calls_to(EVENTS) == 1).await;
        session.unmount().await;

        assert_eq!(source.cancelled(), 1);
        assert_eq!(state.borrow().phase(), Phase::Loading);
    }

    #[tokio::test]
    async fn test_retry_reloads_with_current_language() {
        let source = events_source();
        let translator = Translator::new(Locale::Kg);
        let mut session = PageSession::mount(EventsPage, source.clone(), &translator);
        session.ready_for(Locale::Kg).await.unwrap();

        session.retry();
        let calls = source.clone();
        wait_until(move || calls.calls_to(EVENTS) == 2).await;
        assert!(source.calls().iter().all(|(_, l)| *l == Locale::Kg));
        session.unmount().await;
    }

    #[tokio::test]
    async fn test_failed_fetch_reports_fallback_phase() {
        let source = Arc::new(ScriptedSource::new().fail(EVENTS, FetchFailure::Status(500)));
        let translator = Translator::new(Locale::Ru);
        let mut session = PageSession::mount(EventsPage, source, &translator);

        let (locale, data) = session.ready().await.unwrap();
        assert_eq!(locale, Locale::Ru);
        assert_eq!(data.events.value().len(), 2);
        assert_eq!(session.state().phase(), Phase::Fallback);
        assert_eq!(session.state().locale(), Some(Locale::Ru));
    }
}
