use crate::apis::factory::create_adapters;
use crate::app::ports::HttpTransport;
use crate::config::{Config, ServiceCredentials};
use crate::dedup::dedupe_counted;
use crate::metrics::record_duplicates_removed;
use crate::types::{ArtistRef, ShowListing, ShowsByArtist, SourceAdapter, SourceTag};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Summary of one aggregation run
#[derive(Debug, Default, Clone, Serialize)]
pub struct AggregationReport {
    pub location: String,
    pub sources_run: Vec<&'static str>,
    /// Number of artists each source contributed at least one show for
    pub artists_with_shows: BTreeMap<SourceTag, usize>,
    pub duplicates_removed: usize,
    pub total_shows: usize,
    pub duration_ms: u128,
}

/// Fans a search out to every applicable source, waits for all of them, then
/// merges and dedupes the results.
pub struct ShowAggregator {
    adapters: Vec<Box<dyn SourceAdapter>>,
}

impl ShowAggregator {
    /// Adapters are merged in the order given.
    pub fn new(adapters: Vec<Box<dyn SourceAdapter>>) -> Self {
        Self { adapters }
    }

    pub fn from_config(
        config: &Config,
        credentials: &ServiceCredentials,
        transport: Arc<dyn HttpTransport>,
        only: Option<&[String]>,
    ) -> Self {
        Self::new(create_adapters(config, credentials, transport, only))
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.source_name()).collect()
    }

    /// Shows per artist id as display strings. Every requested artist id is a
    /// key of the result, with an empty list when no source found anything.
    pub async fn get_all_shows(&self, artists: &[ArtistRef], location: &str) -> ShowListing {
        let (shows, _) = self.get_all_shows_detailed(artists, location).await;
        render(&shows)
    }

    /// Same search as `get_all_shows`, keeping the structured records.
    #[instrument(skip(self, artists), fields(artists = artists.len()))]
    pub async fn get_all_shows_detailed(
        &self,
        artists: &[ArtistRef],
        location: &str,
    ) -> (ShowsByArtist, AggregationReport) {
        let started = Instant::now();
        let location = location.trim().to_lowercase();

        let applicable: Vec<&dyn SourceAdapter> = self
            .adapters
            .iter()
            .map(|a| a.as_ref())
            .filter(|a| {
                let covered = a.covers(&location);
                if !covered {
                    debug!(source = a.source_name(), location = %location, "Source does not cover location");
                }
                covered
            })
            .collect();

        let mut report = AggregationReport {
            location: location.clone(),
            sources_run: applicable.iter().map(|a| a.source_name()).collect(),
            ..AggregationReport::default()
        };

        // Join barrier: nothing is merged until every source has settled
        let partials = join_all(
            applicable
                .iter()
                .map(|adapter| adapter.fetch_shows(artists, &location)),
        )
        .await;

        let mut merged: ShowsByArtist = artists
            .iter()
            .map(|artist| (artist.id.clone(), Vec::new()))
            .collect();
        for (adapter, partial) in applicable.iter().zip(partials) {
            report.artists_with_shows.insert(adapter.tag(), partial.len());
            for (artist_id, shows) in partial {
                merged.entry(artist_id).or_default().extend(shows);
            }
        }

        let (deduped, removed) = dedupe_counted(merged);
        record_duplicates_removed(removed);

        report.duplicates_removed = removed;
        report.total_shows = deduped.values().map(Vec::len).sum();
        report.duration_ms = started.elapsed().as_millis();
        info!(
            location = %report.location,
            sources = ?report.sources_run,
            artists_with_shows = ?report.artists_with_shows,
            duplicates_removed = report.duplicates_removed,
            total_shows = report.total_shows,
            duration_ms = report.duration_ms as u64,
            "Show search finished"
        );

        (deduped, report)
    }
}

/// Collapse each artist's shows into display strings, keeping order.
pub fn render(shows: &ShowsByArtist) -> ShowListing {
    shows
        .iter()
        .map(|(artist_id, shows)| {
            (
                artist_id.clone(),
                shows.iter().map(|show| show.display()).collect(),
            )
        })
        .collect()
}
