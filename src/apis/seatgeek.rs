use crate::apis::base::{append_shows, instrument_call, shows_from_outcome, AdapterSettings};
use crate::apis::pagination::{PaginationStyle, Paginator};
use crate::apis::parsers::seatgeek::seatgeek_page_envelope;
use crate::apis::parsers::{parse_seatgeek_events, parse_seatgeek_performer_id};
use crate::apis::queries;
use crate::app::ports::HttpTransport;
use crate::constants::SEATGEEK_API;
use crate::types::{ArtistRef, NormalizedShow, ShowsByArtist, SourceAdapter, SourceTag};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Two-phase source: resolve the SeatGeek performer id, then page through
/// `/events` using the `meta.total` envelope.
pub struct SeatGeekAdapter {
    transport: Arc<dyn HttpTransport>,
    auth: String,
    settings: AdapterSettings,
}

impl SeatGeekAdapter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        client_id: &str,
        client_secret: Option<&str>,
        settings: AdapterSettings,
    ) -> Self {
        Self {
            transport,
            auth: queries::seatgeek_auth(client_id, client_secret),
            settings,
        }
    }

    async fn resolve_performer_id(&self, artist: &ArtistRef) -> Option<String> {
        let request = queries::seatgeek_performers(&self.settings.base_url, &self.auth, &artist.name);
        let body = instrument_call(self.transport.as_ref(), SEATGEEK_API, &request)
            .await
            .ok()?;
        let id = parse_seatgeek_performer_id(&body);
        if id.is_none() {
            debug!(artist = %artist.name, "No SeatGeek performer matched");
        }
        id
    }

    async fn shows_for_artist(&self, artist: &ArtistRef, location: &str) -> Vec<NormalizedShow> {
        let Some(performer_id) = self.resolve_performer_id(artist).await else {
            return Vec::new();
        };

        let per_page = self.settings.per_page;
        let paginator = Paginator::new(
            self.transport.as_ref(),
            SEATGEEK_API,
            PaginationStyle::OffsetCount { per_page },
            self.settings.max_pages,
        );
        let build = |page: u32| {
            queries::seatgeek_events(&self.settings.base_url, &self.auth, &performer_id, page, per_page)
        };

        match paginator
            .fetch_all(build, |body, _| seatgeek_page_envelope(body))
            .await
        {
            Ok(pages) => pages
                .iter()
                .flat_map(|body| {
                    shows_from_outcome(SEATGEEK_API, &artist.name, parse_seatgeek_events(body, location))
                })
                .collect(),
            Err(e) => {
                warn!(artist = %artist.name, error = %e, "Abandoning SeatGeek events for artist");
                Vec::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl SourceAdapter for SeatGeekAdapter {
    fn source_name(&self) -> &'static str {
        SEATGEEK_API
    }

    fn tag(&self) -> SourceTag {
        SourceTag::SeatGeek
    }

    #[instrument(skip(self, artists), fields(artists = artists.len()))]
    async fn fetch_shows(&self, artists: &[ArtistRef], location: &str) -> ShowsByArtist {
        info!("Getting SeatGeek performer ids and shows");
        let lookups = artists.iter().map(|artist| async move {
            let shows = self.shows_for_artist(artist, location).await;
            (artist.id.as_str(), shows)
        });

        let mut found = ShowsByArtist::new();
        for (artist_id, shows) in join_all(lookups).await {
            append_shows(&mut found, artist_id, shows);
        }

        info!("Added or appended shows for {} artists from SeatGeek", found.len());
        found
    }
}
