use crate::apis::bandsintown::BandsInTownAdapter;
use crate::apis::base::AdapterSettings;
use crate::apis::foopee::FoopeeAdapter;
use crate::apis::seatgeek::SeatGeekAdapter;
use crate::apis::songkick::SongkickAdapter;
use crate::app::ports::HttpTransport;
use crate::config::{Config, ServiceCredentials, SourceConfig};
use crate::constants::*;
use crate::types::SourceAdapter;
use std::sync::Arc;
use tracing::{debug, warn};

fn settings(config: &Config, source: &SourceConfig, default_base_url: &str) -> AdapterSettings {
    AdapterSettings {
        base_url: source.base_url_or(default_base_url),
        per_page: source.per_page(),
        max_pages: config.http.max_pages,
    }
}

/// Build the adapter for one source name.
///
/// Returns `None` for unknown names, disabled sources, and sources whose
/// required credentials are missing.
pub fn create_adapter(
    source_name: &str,
    config: &Config,
    credentials: &ServiceCredentials,
    transport: Arc<dyn HttpTransport>,
) -> Option<Box<dyn SourceAdapter>> {
    let sources = &config.sources;
    match source_name {
        BANDSINTOWN_API if sources.bandsintown.enabled => {
            let Some(app_id) = credentials.bandsintown_app_id.as_deref() else {
                warn!("{} is not set, skipping BandsInTown", BANDSINTOWN_APP_ID_ENV);
                return None;
            };
            Some(Box::new(BandsInTownAdapter::new(
                transport,
                app_id,
                settings(config, &sources.bandsintown, BANDSINTOWN_BASE_URL),
            )))
        }
        SONGKICK_API if sources.songkick.enabled => {
            let Some(api_key) = credentials.songkick_api_key.as_deref() else {
                warn!("{} is not set, skipping Songkick", SONGKICK_API_KEY_ENV);
                return None;
            };
            Some(Box::new(SongkickAdapter::new(
                transport,
                api_key,
                settings(config, &sources.songkick, SONGKICK_BASE_URL),
            )))
        }
        SEATGEEK_API if sources.seatgeek.enabled => {
            let Some(client_id) = credentials.seatgeek_client_id.as_deref() else {
                warn!("{} is not set, skipping SeatGeek", SEATGEEK_CLIENT_ID_ENV);
                return None;
            };
            Some(Box::new(SeatGeekAdapter::new(
                transport,
                client_id,
                credentials.seatgeek_client_secret.as_deref(),
                settings(config, &sources.seatgeek, SEATGEEK_BASE_URL),
            )))
        }
        FOOPEE_API if sources.foopee.enabled => {
            let covered = sources
                .foopee
                .covered_location
                .as_deref()
                .unwrap_or(FOOPEE_COVERED_LOCATION);
            Some(Box::new(FoopeeAdapter::new(
                transport,
                covered,
                settings(config, &sources.foopee, FOOPEE_BASE_URL),
            )))
        }
        other => {
            debug!(source = other, "Source unknown or disabled");
            None
        }
    }
}

/// Build every usable adapter in merge order, optionally restricted to `only`.
pub fn create_adapters(
    config: &Config,
    credentials: &ServiceCredentials,
    transport: Arc<dyn HttpTransport>,
    only: Option<&[String]>,
) -> Vec<Box<dyn SourceAdapter>> {
    get_supported_sources()
        .into_iter()
        .filter(|name| {
            only.map_or(true, |wanted| {
                wanted.iter().any(|w| w.trim().eq_ignore_ascii_case(name))
            })
        })
        .filter_map(|name| create_adapter(name, config, credentials, transport.clone()))
        .collect()
}
