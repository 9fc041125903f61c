use super::{city_matches, id_to_string, parse_service_date};
use crate::apis::pagination::PageEnvelope;
use crate::types::{NormalizedShow, ParseOutcome, SourceTag};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct EventsBody {
    events: Option<Vec<Value>>,
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SeatGeekEvent {
    datetime_local: Option<String>,
    venue: Option<SeatGeekVenue>,
}

#[derive(Debug, Deserialize)]
struct SeatGeekVenue {
    name: Option<String>,
    city: Option<String>,
}

/// Pick the SeatGeek performer id of the first hit in a `/performers` search.
pub fn parse_seatgeek_performer_id(body: &str) -> Option<String> {
    let data: Value = serde_json::from_str(body).ok()?;
    data.get("performers")?
        .as_array()?
        .first()
        .and_then(|performer| performer.get("id"))
        .and_then(id_to_string)
}

/// Parse one page of SeatGeek `/events`.
pub fn parse_seatgeek_events(body: &str, location: &str) -> ParseOutcome {
    let parsed: EventsBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => return ParseOutcome::Malformed(format!("SeatGeek body is not an events page: {e}")),
    };
    let Some(events) = parsed.events else {
        return ParseOutcome::Malformed("SeatGeek body has no events list".to_string());
    };

    let shows = events
        .into_iter()
        .filter_map(|raw| {
            let event: SeatGeekEvent = serde_json::from_value(raw).ok()?;
            let venue = event.venue?;
            if !city_matches(venue.city.as_deref()?, location) {
                return None;
            }
            let date = parse_service_date(event.datetime_local.as_deref()?)?;
            let name = venue.name?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(NormalizedShow::new(date, name, SourceTag::SeatGeek))
        })
        .collect();

    ParseOutcome::from_shows(shows)
}

/// Pagination envelope from `meta.total` and the size of `events`.
pub fn seatgeek_page_envelope(body: &str) -> PageEnvelope {
    let Ok(parsed) = serde_json::from_str::<EventsBody>(body) else {
        return PageEnvelope::default();
    };
    PageEnvelope {
        total: parsed.meta.and_then(|m| m.total),
        records: parsed.events.map(|e| e.len()).unwrap_or(0),
        next: None,
    }
}
