pub mod aggregator;
pub mod apis;
pub mod config;
pub mod constants;
pub mod dedup;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod types;

// Layered boundaries: ports live in app, concrete adapters in infra
pub mod app;
pub mod infra;

pub use aggregator::{AggregationReport, ShowAggregator};
pub use config::{Config, ServiceCredentials};
pub use error::{Result, ShowFinderError};
pub use types::{ArtistRef, NormalizedShow, ShowListing, ShowsByArtist, SourceAdapter, SourceTag};
