//! Content loaders, one per page of the site.

mod events;
mod management;
mod mission;
mod news;
mod research;

pub use events::{EventFilter, EventsData, EventsPage};
pub use management::{ManagementData, ManagementPage};
pub use mission::{MissionContent, MissionPage};
pub use news::{NewsData, NewsPage};
pub use research::{ResearchData, ResearchManagementPage};

/// Every page name the CLI accepts.
pub const PAGE_NAMES: [&str; 5] = ["management", "news", "events", "mission", "research"];
