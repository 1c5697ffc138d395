//! # campus-pages
//!
//! Page sessions, centralised fallback fixtures, and the content
//! loaders for each page of the site.

pub mod fixtures;
pub mod pages;
pub mod session;

#[cfg(test)]
mod testing;

pub use pages::{
    EventsPage, ManagementPage, MissionPage, NewsPage, ResearchManagementPage,
};
pub use session::{Page, PageData, PageSession, PageState, Phase};
