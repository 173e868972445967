//! # weibo-timeline
//!
//! Concurrent timeline fetching and aggregation for Weibo-style microblog APIs.
//!
//! ## Design Philosophy
//!
//! weibo-timeline is designed to be:
//! - **Parallel by default** - one worker per page, bounded by a concurrency ceiling
//! - **Bounded in memory** - fixed-capacity buffers between workers and collector
//! - **Fault-tolerant** - a failed page degrades yield, it never fails the job
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use weibo_timeline::{
//!     AggregatorConfig, ApiClient, ApiConfig, ApiPageFetcher, Subject, TimelineAggregator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(ApiClient::new(&ApiConfig::default())?);
//!     let fetcher = Arc::new(ApiPageFetcher::new(client, "your-access-token"));
//!     let aggregator = TimelineAggregator::new(fetcher, AggregatorConfig::default());
//!
//!     let statuses = aggregator
//!         .fetch_timeline(
//!             &Subject::screen_name("some_user"),
//!             500,
//!             Some(Duration::from_secs(10)),
//!         )
//!         .await?;
//!
//!     println!("fetched {} unique statuses", statuses.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Parallel paginated fetch-and-merge engine
pub mod aggregator;
/// REST API client and OAuth2 authentication
pub mod client;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Page fetching seam between the engine and the REST client
pub mod fetcher;
/// Core wire types
pub mod types;

// Re-export commonly used types
pub use aggregator::TimelineAggregator;
pub use client::{ApiClient, Authenticator};
pub use config::{AggregatorConfig, ApiConfig, Config, MAX_PAGE_SIZE};
pub use error::{Error, Result};
pub use fetcher::{ApiPageFetcher, PageFetcher};
pub use types::{AccessToken, PicUrl, Status, Subject, Timeline, User};
