//! Research leadership grouped by position type, plus councils.

use async_trait::async_trait;
use campus_core::fetch::{self, FetchRequest, FetchResult};
use campus_core::locale::Locale;
use campus_core::model::{Council, ResearchPositionGroup};
use campus_core::traits::ContentSource;
use tokio_util::sync::CancellationToken;

use crate::fixtures;
use crate::session::{Page, PageData};

const BY_TYPE: &str = "/research/api/management/by_type/";
const COUNCILS: &str = "/research/api/councils/";

#[derive(Debug, Clone, Copy, Default)]
pub struct ResearchManagementPage;

#[derive(Debug, Clone)]
pub struct ResearchData {
    pub groups: FetchResult<Vec<ResearchPositionGroup>>,
    pub councils: FetchResult<Vec<Council>>,
}

impl ResearchData {
    /// True when there is nothing to show at all.
    pub fn is_empty(&self) -> bool {
        self.groups.value().iter().all(|g| g.positions.is_empty()) && self.councils.value().is_empty()
    }
}

impl PageData for ResearchData {
    fn is_live(&self) -> bool {
        self.groups.is_ok() && self.councils.is_ok()
    }
}

#[async_trait]
impl Page for ResearchManagementPage {
    type Data = ResearchData;

    fn name(&self) -> &'static str {
        "research"
    }

    fn endpoints(&self) -> &'static [&'static str] {
        &[BY_TYPE, COUNCILS]
    }

    async fn load(
        &self,
        source: &dyn ContentSource,
        locale: Locale,
        cancel: &CancellationToken,
    ) -> ResearchData {
        let groups = FetchRequest::new(BY_TYPE, locale);
        let councils = FetchRequest::new(COUNCILS, locale);
        let (groups, councils) = tokio::join!(
            fetch::fetch_list_or_fallback(source, &groups, cancel, fixtures::research_groups),
            fetch::fetch_list_or_fallback(source, &councils, cancel, fixtures::councils),
        );
        ResearchData { groups, councils }
    }
}
