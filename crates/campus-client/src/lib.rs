//! # campus-client
//!
//! Locale-aware REST client for the Campus backend.

pub mod client;
pub mod inflight;
pub mod transport;


pub use client::LocalizedFetchClient;
pub use transport::{HeaderTransport, LocaleTransport, QueryTransport};
