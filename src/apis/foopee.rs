use crate::apis::base::{append_shows, AdapterSettings};
use crate::apis::pagination::{PaginationStyle, Paginator};
use crate::apis::parsers::foopee::{band_key, foopee_page_envelope};
use crate::apis::parsers::{parse_foopee_page, FoopeeListing};
use crate::apis::queries;
use crate::app::ports::HttpTransport;
use crate::constants::FOOPEE_API;
use crate::metrics::SourcesMetrics;
use crate::types::{ArtistRef, ShowsByArtist, SourceAdapter, SourceTag};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Scrapes The List's by-band pages. The listing already groups shows by
/// band, so one walk over the pages serves every artist at once.
pub struct FoopeeAdapter {
    transport: Arc<dyn HttpTransport>,
    covered_location: String,
    settings: AdapterSettings,
    reference_date: Option<NaiveDate>,
}

impl FoopeeAdapter {
    pub fn new(transport: Arc<dyn HttpTransport>, covered_location: impl Into<String>, settings: AdapterSettings) -> Self {
        Self {
            transport,
            covered_location: covered_location.into().trim().to_lowercase(),
            settings,
            reference_date: None,
        }
    }

    /// Pin "today" for year inference instead of using the local clock.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    async fn fetch_listing(&self) -> Option<FoopeeListing> {
        let paginator = Paginator::new(
            self.transport.as_ref(),
            FOOPEE_API,
            PaginationStyle::Cursor,
            self.settings.max_pages,
        );
        let first_page = |_page: u32| queries::foopee_by_band(&self.settings.base_url, 0);

        let pages = match paginator.fetch_all(first_page, foopee_page_envelope).await {
            Ok(pages) => pages,
            Err(e) => {
                warn!(error = %e, "Foopee listing unavailable");
                return None;
            }
        };

        let today = self.reference_date.unwrap_or_else(|| Local::now().date_naive());
        let mut listing = FoopeeListing::new();
        for page in &pages {
            for (band, shows) in parse_foopee_page(page, today) {
                listing.entry(band).or_default().extend(shows);
            }
        }
        Some(listing)
    }
}

#[async_trait::async_trait]
impl SourceAdapter for FoopeeAdapter {
    fn source_name(&self) -> &'static str {
        FOOPEE_API
    }

    fn tag(&self) -> SourceTag {
        SourceTag::Foopee
    }

    fn covers(&self, location: &str) -> bool {
        location.trim().eq_ignore_ascii_case(&self.covered_location)
    }

    #[instrument(skip(self, artists), fields(artists = artists.len()))]
    async fn fetch_shows(&self, artists: &[ArtistRef], location: &str) -> ShowsByArtist {
        let mut found = ShowsByArtist::new();
        if !self.covers(location) {
            return found;
        }

        info!("Getting Foopee artist shows");
        let Some(listing) = self.fetch_listing().await else {
            return found;
        };

        for artist in artists {
            if let Some(shows) = listing.get(&band_key(&artist.name)) {
                SourcesMetrics::record_shows_parsed(FOOPEE_API, shows.len());
                append_shows(&mut found, &artist.id, shows.clone());
            }
        }

        info!("Added or appended shows for {} artists from Foopee", found.len());
        found
    }
}
