use crate::app::ports::HttpTransport;
use crate::error::{Result, ShowFinderError};
use crate::metrics::SourcesMetrics;
use crate::types::{NormalizedShow, ParseOutcome, ShowsByArtist, SourceRequest};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static SECRET_PARAM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(apikey|app_id|client_id|client_secret)=[^&#]*").expect("static regex")
});

/// Strip credentials from a URL before it is logged.
pub fn loggable_url(url: &str) -> String {
    SECRET_PARAM.replace_all(url, "$1=***").into_owned()
}

/// Connection settings shared by every adapter
#[derive(Debug, Clone)]
pub struct AdapterSettings {
    pub base_url: String,
    pub per_page: u32,
    pub max_pages: u32,
}

/// Send one request and hand back the body of a successful response.
///
/// Non-success statuses and transport failures are logged with the target
/// and status, counted, and returned as errors for the adapter to absorb.
pub async fn instrument_call(
    transport: &dyn HttpTransport,
    source: &'static str,
    request: &SourceRequest,
) -> Result<String> {
    SourcesMetrics::record_request(source);
    let url = loggable_url(&request.url);

    match transport.call(request).await {
        Ok(resp) if resp.success => {
            debug!(source, url = %url, status = resp.status, "Request succeeded");
            Ok(resp.body)
        }
        Ok(resp) => {
            SourcesMetrics::record_request_error(source);
            warn!(source, url = %url, status = resp.status, "Request returned non-success status");
            Err(ShowFinderError::Status {
                url,
                status: resp.status,
            })
        }
        Err(e) => {
            SourcesMetrics::record_request_error(source);
            warn!(source, url = %url, error = %e, "Request failed");
            Err(e)
        }
    }
}

/// Unwrap a parse outcome, logging malformed bodies.
pub fn shows_from_outcome(source: &'static str, artist: &str, outcome: ParseOutcome) -> Vec<NormalizedShow> {
    if let ParseOutcome::Malformed(reason) = &outcome {
        warn!(source, artist, reason = %reason, "Dropping malformed response");
    }
    let shows = outcome.into_shows();
    SourcesMetrics::record_shows_parsed(source, shows.len());
    shows
}

/// Append shows to an artist's list, creating it if needed. Empty lists are not inserted.
pub fn append_shows(map: &mut ShowsByArtist, artist_id: &str, shows: Vec<NormalizedShow>) {
    if shows.is_empty() {
        return;
    }
    map.entry(artist_id.to_string()).or_default().extend(shows);
}
