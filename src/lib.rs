// Library interface for libgen_scraper
// The binary and the integration tests both go through these modules

pub mod config;
pub mod helpers;
pub mod http_client;
pub mod mirrors;
pub mod models;
pub mod parser;
pub mod search;
pub mod source_utils;

pub use mirrors::{MirrorError, MirrorSelector};
pub use models::{BookRecord, SearchColumn};
pub use search::{LibgenClient, SearchError};
pub use source_utils::{FetchError, NoDelay, Pacer, PageFetcher, RandomDelay};
