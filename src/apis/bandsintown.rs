use crate::apis::base::{append_shows, shows_from_outcome, AdapterSettings};
use crate::apis::pagination::{PageEnvelope, PaginationStyle, Paginator};
use crate::apis::parsers::parse_bandsintown_events;
use crate::apis::queries;
use crate::app::ports::HttpTransport;
use crate::constants::BANDSINTOWN_API;
use crate::types::{ArtistRef, NormalizedShow, ShowsByArtist, SourceAdapter, SourceTag};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, instrument};

/// One events lookup per artist, no id resolution and no paging.
pub struct BandsInTownAdapter {
    transport: Arc<dyn HttpTransport>,
    app_id: String,
    settings: AdapterSettings,
}

impl BandsInTownAdapter {
    pub fn new(transport: Arc<dyn HttpTransport>, app_id: impl Into<String>, settings: AdapterSettings) -> Self {
        Self {
            transport,
            app_id: app_id.into(),
            settings,
        }
    }

    async fn shows_for_artist(&self, artist: &ArtistRef, location: &str) -> Vec<NormalizedShow> {
        let paginator = Paginator::new(
            self.transport.as_ref(),
            BANDSINTOWN_API,
            PaginationStyle::None,
            self.settings.max_pages,
        );
        let build = |_page: u32| queries::bandsintown_events(&self.settings.base_url, &self.app_id, &artist.name);

        match paginator.fetch_all(build, |_, _| PageEnvelope::default()).await {
            Ok(bodies) => bodies
                .iter()
                .flat_map(|body| {
                    shows_from_outcome(BANDSINTOWN_API, &artist.name, parse_bandsintown_events(body, location))
                })
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl SourceAdapter for BandsInTownAdapter {
    fn source_name(&self) -> &'static str {
        BANDSINTOWN_API
    }

    fn tag(&self) -> SourceTag {
        SourceTag::BandsInTown
    }

    #[instrument(skip(self, artists), fields(artists = artists.len()))]
    async fn fetch_shows(&self, artists: &[ArtistRef], location: &str) -> ShowsByArtist {
        info!("Getting BandsInTown artist shows");
        let lookups = artists.iter().map(|artist| async move {
            let shows = self.shows_for_artist(artist, location).await;
            (artist.id.as_str(), shows)
        });

        let mut found = ShowsByArtist::new();
        for (artist_id, shows) in join_all(lookups).await {
            append_shows(&mut found, artist_id, shows);
        }

        info!("Added shows for {} artists from BandsInTown", found.len());
        found
    }
}
