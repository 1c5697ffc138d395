//! Event listing with an upcoming/past filter.

use async_trait::async_trait;
use campus_core::fetch::{self, FetchRequest, FetchResult};
use campus_core::locale::Locale;
use campus_core::model::EventItem;
use campus_core::traits::ContentSource;
use std::str::FromStr;
use tokio_util::sync::CancellationToken;

use crate::fixtures;
use crate::session::{Page, PageData};

const EVENTS: &str = "/api/events/";

#[derive(Debug, Clone, Copy, Default)]
pub struct EventsPage;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventFilter {
    All,
    #[default]
    Upcoming,
    Past,
}

impl FromStr for EventFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            other => Err(format!("unknown event filter: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventsData {
    pub events: FetchResult<Vec<EventItem>>,
}

impl EventsData {
    pub fn filtered(&self, filter: EventFilter) -> Vec<&EventItem> {
        self.events
            .value()
            .iter()
            .filter(|e| match filter {
                EventFilter::All => true,
                EventFilter::Upcoming => e.status() == "upcoming",
                EventFilter::Past => e.status() == "past",
            })
            .collect()
    }
}

impl PageData for EventsData {
    fn is_live(&self) -> bool {
        self.events.is_ok()
    }
}

#[async_trait]
impl Page for EventsPage {
    type Data = EventsData;

    fn name(&self) -> &'static str {
        "events"
    }

    fn endpoints(&self) -> &'static [&'static str] {
        &[EVENTS]
    }

    async fn load(
        &self,
        source: &dyn ContentSource,
        locale: Locale,
        cancel: &CancellationToken,
    ) -> EventsData {
        let request = FetchRequest::new(EVENTS, locale);
        EventsData {
            events: fetch::fetch_list_or_fallback(source, &request, cancel, fixtures::events).await,
        }
    }
}
