//! Mission, history, values, priorities and achievements, delivered as
//! one aggregate response.

use async_trait::async_trait;
use campus_core::fetch::{self, FetchRequest, FetchResult};
use campus_core::locale::Locale;
use campus_core::model::MissionData;
use campus_core::traits::ContentSource;
use tokio_util::sync::CancellationToken;

use crate::fixtures;
use crate::session::{Page, PageData};

const COMPLETE: &str = "/api/mission/api/complete/";

#[derive(Debug, Clone, Copy, Default)]
pub struct MissionPage;

#[derive(Debug, Clone)]
pub struct MissionContent {
    pub mission: FetchResult<MissionData>,
}

impl PageData for MissionContent {
    fn is_live(&self) -> bool {
        self.mission.is_ok()
    }
}

#[async_trait]
impl Page for MissionPage {
    type Data = MissionContent;

    fn name(&self) -> &'static str {
        "mission"
    }

    fn endpoints(&self) -> &'static [&'static str] {
        &[COMPLETE]
    }

    async fn load(
        &self,
        source: &dyn ContentSource,
        locale: Locale,
        cancel: &CancellationToken,
    ) -> MissionContent {
        let request = FetchRequest::new(COMPLETE, locale);
        MissionContent {
            mission: fetch::fetch_or_fallback(source, &request, cancel, fixtures::mission).await,
        }
    }
}
