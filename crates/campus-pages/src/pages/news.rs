//! News feed with a featured strip.

use async_trait::async_trait;
use campus_core::fetch::{self, FetchRequest, FetchResult};
use campus_core::locale::Locale;
use campus_core::model::NewsItem;
use campus_core::traits::ContentSource;
use tokio_util::sync::CancellationToken;

use crate::fixtures;
use crate::session::{Page, PageData};

const NEWS: &str = "/api/news/";
const FEATURED: &str = "/api/news/featured/";

#[derive(Debug, Clone, Copy, Default)]
pub struct NewsPage;

#[derive(Debug, Clone)]
pub struct NewsData {
    pub news: FetchResult<Vec<NewsItem>>,
    pub featured: FetchResult<Vec<NewsItem>>,
}

impl NewsData {
    /// Featured items from their own endpoint, or the feed's flagged
    /// items when that endpoint returned nothing.
    pub fn featured_items(&self) -> Vec<&NewsItem> {
        let featured = self.featured.value();
        if self.featured.is_ok() && !featured.is_empty() {
            return featured.iter().collect();
        }
        self.news.value().iter().filter(|n| n.is_featured).collect()
    }

    /// Feed items in `category` (matched by slug or plain name).
    pub fn in_category(&self, category: &str) -> Vec<&NewsItem> {
        self.news
            .value()
            .iter()
            .filter(|n| {
                n.category.as_ref().is_some_and(|c| {
                    c.text.plain("slug").or_else(|| c.text.plain("name")) == Some(category)
                })
            })
            .collect()
    }
}

impl PageData for NewsData {
    fn is_live(&self) -> bool {
        self.news.is_ok() && self.featured.is_ok()
    }
}

#[async_trait]
impl Page for NewsPage {
    type Data = NewsData;

    fn name(&self) -> &'static str {
        "news"
    }

    fn endpoints(&self) -> &'static [&'static str] {
        &[NEWS, FEATURED]
    }

    async fn load(
        &self,
        source: &dyn ContentSource,
        locale: Locale,
        cancel: &CancellationToken,
    ) -> NewsData {
        let news = FetchRequest::new(NEWS, locale);
        let featured = FetchRequest::new(FEATURED, locale);
        let (news, featured) = tokio::join!(
            fetch::fetch_list_or_fallback(source, &news, cancel, fixtures::news),
            fetch::fetch_list_or_fallback(source, &featured, cancel, Vec::<NewsItem>::new),
        );
        NewsData { news, featured }
    }
}
