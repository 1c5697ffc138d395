//! # campus-store
//!
//! SQLite-backed persistence for user preferences such as the chosen
//! UI language.

pub mod store;

pub use store::Store;
