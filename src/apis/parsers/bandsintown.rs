use super::{city_matches, parse_service_date};
use crate::types::{NormalizedShow, ParseOutcome, SourceTag};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct BandsInTownEvent {
    datetime: Option<String>,
    venue: Option<BandsInTownVenue>,
}

#[derive(Debug, Deserialize)]
struct BandsInTownVenue {
    name: Option<String>,
    city: Option<String>,
}

/// Parse a BandsInTown `/artists/{name}/events` body.
///
/// The body is a JSON array of events. An unknown artist comes back as an
/// object such as `{"warn": "Not found"}` or `{"errorMessage": "..."}`, which
/// is reported as `NoShows`.
pub fn parse_bandsintown_events(body: &str, location: &str) -> ParseOutcome {
    let data: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => return ParseOutcome::Malformed(format!("BandsInTown body is not JSON: {e}")),
    };

    let events = match data {
        Value::Array(events) => events,
        Value::Object(obj) if obj.contains_key("warn") || obj.contains_key("errorMessage") => {
            debug!("BandsInTown reported artist not found");
            return ParseOutcome::NoShows;
        }
        other => {
            return ParseOutcome::Malformed(format!(
                "expected an event array from BandsInTown, got {}",
                kind_of(&other)
            ))
        }
    };

    let shows = events
        .into_iter()
        .filter_map(|raw| {
            let event: BandsInTownEvent = serde_json::from_value(raw).ok()?;
            let venue = event.venue?;
            if !city_matches(venue.city.as_deref()?, location) {
                return None;
            }
            let date = parse_service_date(event.datetime.as_deref()?)?;
            let name = venue.name?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(NormalizedShow::new(date, name, SourceTag::BandsInTown))
        })
        .collect();

    ParseOutcome::from_shows(shows)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn keeps_only_shows_in_location() {
        let body = json!([
            {"datetime": "2024-05-01T19:00:00", "venue": {"name": "Venue A", "city": "San Francisco"}},
            {"datetime": "2024-05-03T19:00:00", "venue": {"name": "Venue B", "city": "Oakland"}}
        ])
        .to_string();

        let shows = parse_bandsintown_events(&body, "san francisco").into_shows();
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0].title, "Venue A");
        assert_eq!(shows[0].date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(shows[0].source, SourceTag::BandsInTown);
    }

    #[test]
    fn records_with_missing_fields_are_dropped() {
        let body = json!([
            {"venue": {"name": "No Date", "city": "San Francisco"}},
            {"datetime": "not a date", "venue": {"name": "Bad Date", "city": "San Francisco"}},
            {"datetime": "2024-05-02T20:00:00", "venue": {"city": "San Francisco"}},
            {"datetime": 5, "venue": "nope"},
            {"datetime": "2024-05-04T20:00:00", "venue": {"name": "Good", "city": "San Francisco"}}
        ])
        .to_string();

        let shows = parse_bandsintown_events(&body, "san francisco").into_shows();
        assert_eq!(shows.len(), 1);
        assert_eq!(shows[0].title, "Good");
    }

    #[test]
    fn not_found_marker_is_no_shows() {
        assert_eq!(
            parse_bandsintown_events(r#"{"warn":"Not found"}"#, "chicago"),
            ParseOutcome::NoShows
        );
        assert_eq!(
            parse_bandsintown_events(r#"{"errorMessage":"[NotFound] The artist was not found"}"#, "chicago"),
            ParseOutcome::NoShows
        );
        assert_eq!(parse_bandsintown_events("[]", "chicago"), ParseOutcome::NoShows);
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            parse_bandsintown_events("<html>", "chicago"),
            ParseOutcome::Malformed(_)
        ));
        assert!(matches!(
            parse_bandsintown_events(r#"{"data": []}"#, "chicago"),
            ParseOutcome::Malformed(_)
        ));
    }
}
