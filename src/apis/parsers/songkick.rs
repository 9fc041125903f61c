use super::{city_matches, id_to_string, parse_service_date};
use crate::apis::pagination::PageEnvelope;
use crate::types::{NormalizedShow, ParseOutcome, SourceTag};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SongkickBody {
    #[serde(rename = "resultsPage")]
    results_page: Option<ResultsPage>,
}

#[derive(Debug, Deserialize)]
struct ResultsPage {
    status: Option<String>,
    #[serde(default)]
    results: Value,
    error: Option<Value>,
    #[serde(rename = "totalEntries")]
    total_entries: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SongkickEvent {
    start: Option<SongkickStart>,
    venue: Option<SongkickVenue>,
    location: Option<SongkickLocation>,
}

#[derive(Debug, Deserialize)]
struct SongkickStart {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SongkickVenue {
    #[serde(rename = "displayName")]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SongkickLocation {
    city: Option<String>,
}

fn results_page(body: &str) -> Result<ResultsPage, String> {
    let parsed: SongkickBody =
        serde_json::from_str(body).map_err(|e| format!("Songkick body is not JSON: {e}"))?;
    let page = parsed
        .results_page
        .ok_or_else(|| "Songkick body has no resultsPage".to_string())?;
    if page.status.as_deref() == Some("error") {
        let message = page
            .error
            .as_ref()
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        return Err(format!("Songkick returned an error: {message}"));
    }
    Ok(page)
}

/// Pick the Songkick id of the first artist in a search response.
/// The search is fuzzy; the first hit is nearly always the intended artist.
///
/// `Ok(None)` means the search found nobody. `Err` carries Songkick's own
/// error message (a bad api key, for one) or says the body was unreadable.
pub fn parse_songkick_artist_id(body: &str) -> Result<Option<String>, String> {
    let page = results_page(body)?;
    Ok(page
        .results
        .get("artist")
        .and_then(Value::as_array)
        .and_then(|artists| artists.first())
        .and_then(|artist| artist.get("id"))
        .and_then(id_to_string))
}

/// Parse one page of a Songkick artist calendar.
pub fn parse_songkick_calendar(body: &str, location: &str) -> ParseOutcome {
    let page = match results_page(body) {
        Ok(page) => page,
        Err(message) => return ParseOutcome::Malformed(message),
    };

    // An artist with nothing scheduled comes back with an empty `results` object
    let Some(events) = page.results.get("event").and_then(Value::as_array) else {
        return ParseOutcome::NoShows;
    };

    let shows = events
        .iter()
        .filter_map(|raw| {
            let event: SongkickEvent = serde_json::from_value(raw.clone()).ok()?;
            if !city_matches(event.location?.city.as_deref()?, location) {
                return None;
            }
            let date = parse_service_date(event.start?.date.as_deref()?)?;
            let name = event.venue?.display_name?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(NormalizedShow::new(date, name, SourceTag::Songkick))
        })
        .collect();

    ParseOutcome::from_shows(shows)
}

/// Pagination envelope: `totalEntries` and the number of events on this page.
pub fn songkick_page_envelope(body: &str) -> PageEnvelope {
    let Ok(page) = results_page(body) else {
        return PageEnvelope::default();
    };
    let records = page
        .results
        .get("event")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0);
    PageEnvelope {
        total: page.total_entries,
        records,
        next: None,
    }
}
