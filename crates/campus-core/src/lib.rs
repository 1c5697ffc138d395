//! # campus-core
//!
//! Core types, locale handling, hierarchy resolution, configuration, and
//! error handling for the Campus content client.

pub mod config;
pub mod error;
pub mod fetch;
pub mod hierarchy;
pub mod i18n;
pub mod locale;
pub mod model;
pub mod traits;

pub use config::shellexpand;
