use crate::apis::base::{append_shows, instrument_call, shows_from_outcome, AdapterSettings};
use crate::apis::pagination::{PaginationStyle, Paginator};
use crate::apis::parsers::songkick::songkick_page_envelope;
use crate::apis::parsers::{parse_songkick_artist_id, parse_songkick_calendar};
use crate::apis::queries;
use crate::app::ports::HttpTransport;
use crate::constants::SONGKICK_API;
use crate::types::{ArtistRef, NormalizedShow, ShowsByArtist, SourceAdapter, SourceTag};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Two-phase source: resolve the Songkick artist id, then page through the
/// artist's calendar.
pub struct SongkickAdapter {
    transport: Arc<dyn HttpTransport>,
    api_key: String,
    settings: AdapterSettings,
}

impl SongkickAdapter {
    pub fn new(transport: Arc<dyn HttpTransport>, api_key: impl Into<String>, settings: AdapterSettings) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            settings,
        }
    }

    async fn resolve_artist_id(&self, artist: &ArtistRef) -> Option<String> {
        let request = queries::songkick_artist_search(&self.settings.base_url, &self.api_key, &artist.name);
        let body = instrument_call(self.transport.as_ref(), SONGKICK_API, &request)
            .await
            .ok()?;
        match parse_songkick_artist_id(&body) {
            Ok(Some(id)) => Some(id),
            Ok(None) => {
                debug!(artist = %artist.name, "No Songkick artist matched");
                None
            }
            Err(reason) => {
                warn!(artist = %artist.name, reason = %reason, "Songkick artist search failed");
                None
            }
        }
    }

    async fn shows_for_artist(&self, artist: &ArtistRef, location: &str) -> Vec<NormalizedShow> {
        let Some(songkick_id) = self.resolve_artist_id(artist).await else {
            return Vec::new();
        };

        let per_page = self.settings.per_page;
        let paginator = Paginator::new(
            self.transport.as_ref(),
            SONGKICK_API,
            PaginationStyle::OffsetCount { per_page },
            self.settings.max_pages,
        );
        let build = |page: u32| {
            queries::songkick_calendar(&self.settings.base_url, &self.api_key, &songkick_id, page, per_page)
        };

        match paginator
            .fetch_all(build, |body, _| songkick_page_envelope(body))
            .await
        {
            Ok(pages) => pages
                .iter()
                .flat_map(|body| {
                    shows_from_outcome(SONGKICK_API, &artist.name, parse_songkick_calendar(body, location))
                })
                .collect(),
            Err(e) => {
                warn!(artist = %artist.name, error = %e, "Abandoning Songkick calendar for artist");
                Vec::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl SourceAdapter for SongkickAdapter {
    fn source_name(&self) -> &'static str {
        SONGKICK_API
    }

    fn tag(&self) -> SourceTag {
        SourceTag::Songkick
    }

    #[instrument(skip(self, artists), fields(artists = artists.len()))]
    async fn fetch_shows(&self, artists: &[ArtistRef], location: &str) -> ShowsByArtist {
        info!("Getting Songkick artist ids and shows");
        // Each artist runs its own id lookup then calendar walk; artists proceed independently
        let lookups = artists.iter().map(|artist| async move {
            let shows = self.shows_for_artist(artist, location).await;
            (artist.id.as_str(), shows)
        });

        let mut found = ShowsByArtist::new();
        for (artist_id, shows) in join_all(lookups).await {
            append_shows(&mut found, artist_id, shows);
        }

        info!("Added or appended shows for {} artists from Songkick", found.len());
        found
    }
}
