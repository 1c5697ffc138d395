//! Leadership structure and teaching staff.

use async_trait::async_trait;
use campus_core::fetch::{self, FetchFailure, FetchRequest, FetchResult};
use campus_core::hierarchy::OrgChart;
use campus_core::locale::Locale;
use campus_core::model::{OrgNode, Teacher};
use campus_core::traits::ContentSource;
use tokio_util::sync::CancellationToken;

use crate::fixtures;
use crate::session::{Page, PageData};

const HIERARCHY: &str = "/api/management/";
const TEACHERS: &str = "/api/teachers/";

#[derive(Debug, Clone, Copy, Default)]
pub struct ManagementPage;

#[derive(Debug, Clone)]
pub struct ManagementData {
    /// Root of the organisation tree.
    pub hierarchy: FetchResult<OrgNode>,
    pub teachers: FetchResult<Vec<Teacher>>,
}

impl ManagementData {
    pub fn chart(&self, locale: Locale) -> OrgChart {
        OrgChart::build(self.hierarchy.value(), locale)
    }
}

impl PageData for ManagementData {
    fn is_live(&self) -> bool {
        self.hierarchy.is_ok() && self.teachers.is_ok()
    }
}

/// The endpoint returns a list of roots; the page shows the first.
fn first_root(roots: FetchResult<Vec<OrgNode>>) -> FetchResult<OrgNode> {
    match roots {
        FetchResult::Live(roots) => match roots.into_iter().next() {
            Some(root) => FetchResult::Live(root),
            None => FetchResult::Fallback {
                value: fixtures::management_root(),
                failure: FetchFailure::Decode("empty hierarchy".to_string()),
            },
        },
        FetchResult::Fallback { value, failure } => FetchResult::Fallback {
            value: value
                .into_iter()
                .next()
                .unwrap_or_else(fixtures::management_root),
            failure,
        },
    }
}

#[async_trait]
impl Page for ManagementPage {
    type Data = ManagementData;

    fn name(&self) -> &'static str {
        "management"
    }

    fn endpoints(&self) -> &'static [&'static str] {
        &[HIERARCHY, TEACHERS]
    }

    async fn load(
        &self,
        source: &dyn ContentSource,
        locale: Locale,
        cancel: &CancellationToken,
    ) -> ManagementData {
        let hierarchy = FetchRequest::new(HIERARCHY, locale);
        let teachers = FetchRequest::new(TEACHERS, locale);
        let (roots, teachers) = tokio::join!(
            fetch::fetch_list_or_fallback(source, &hierarchy, cancel, || vec![
                fixtures::management_root()
            ]),
            fetch::fetch_list_or_fallback(source, &teachers, cancel, fixtures::teachers),
        );
        ManagementData {
            hierarchy: first_root(roots),
            teachers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedSource;
    use serde_json::json;

    #[tokio::test]
    async fn test_server_error_yields_single_root_fallback() {
        let source = ScriptedSource::new()
            .fail(HIERARCHY, FetchFailure::Status(500))
            .route(TEACHERS, json!([]));
        let data = ManagementPage
            .load(&source, Locale::Ru, &CancellationToken::new())
            .await;

        assert!(!data.is_live());
        assert_eq!(data.hierarchy.failure(), Some(&FetchFailure::Status(500)));
        let chart = data.chart(Locale::Ru);
        assert_eq!(chart.levels.len(), 1);
        assert_eq!(chart.card_count(), 1);
        assert_eq!(chart.levels[0][0].name, "Университет");
        assert_eq!(chart.levels[0][0].head, "Ректор");
        assert!(data.hierarchy.value().children.is_empty());
    }

    #[tokio::test]
    async fn test_live_tree_takes_first_root() {
        let source = ScriptedSource::new()
            .route(
                HIERARCHY,
                json!({"results": [{
                    "id": 1,
                    "position_ru": "Ректорат",
                    "position_en": "Rectorate",
                    "full_name_ru": "Иванов И.И.",
                    "children": [
                        {"id": 2, "position_ru": "Проректор", "children": null},
                        {"id": 3, "position_ru": "Проректор"}
                    ]
                }, {"id": 99}]}),
            )
            .route(
                TEACHERS,
                json!([{"id": 5, "full_name_ru": "Петров", "email": "p@example.kg"}]),
            );
        let data = ManagementPage
            .load(&source, Locale::En, &CancellationToken::new())
            .await;

        assert!(data.is_live());
        assert_eq!(data.hierarchy.value().id, "1");
        let chart = data.chart(Locale::En);
        assert_eq!(chart.levels.len(), 2);
        assert_eq!(chart.levels[0][0].name, "Rectorate");
        // No English name: falls back to Russian.
        assert_eq!(chart.levels[0][0].head, "Иванов И.И.");
        assert_eq!(chart.levels[1].len(), 2);
        assert_eq!(data.teachers.value().len(), 1);
        assert_eq!(source.calls_to(HIERARCHY), 1);
        assert!(source.calls().iter().all(|(_, l)| *l == Locale::En));
    }

    #[tokio::test]
    async fn test_empty_root_list_falls_back() {
        let source = ScriptedSource::new()
            .route(HIERARCHY, json!([]))
            .route(TEACHERS, json!([]));
        let data = ManagementPage
            .load(&source, Locale::Ru, &CancellationToken::new())
            .await;
        assert!(matches!(
            data.hierarchy.failure(),
            Some(FetchFailure::Decode(_))
        ));
        assert_eq!(data.hierarchy.value().id, "university");
        assert!(data.teachers.is_ok());
    }
}
