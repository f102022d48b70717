//! Read-only client for the MediaWiki query API.
//!
//! [`WikiClient`] maps each supported query kind onto a single GET against a
//! wiki's `api.php` endpoint and normalizes the partially-optional response
//! shapes into the value records in [`types`]. It holds no mutable state, so
//! one instance can be shared across concurrent callers.

pub mod client;
pub mod config;
pub mod error;
pub mod params;
mod response;
pub mod types;

pub use client::WikiClient;
pub use config::WikiConfig;
pub use error::{ConfigError, WikiError};
pub use types::{
    Category, CategoryMember, PageContent, RecentChange, Revision, SearchResult,
};
