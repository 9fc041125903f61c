pub mod bandsintown;
pub mod foopee;
pub mod seatgeek;
pub mod songkick;

pub use bandsintown::parse_bandsintown_events;
pub use foopee::{parse_foopee_page, FoopeeListing};
pub use seatgeek::{parse_seatgeek_events, parse_seatgeek_performer_id};
pub use songkick::{parse_songkick_artist_id, parse_songkick_calendar};

use chrono::NaiveDate;
use serde_json::Value;

/// Parse the calendar date out of `2024-05-01` or `2024-05-01T19:00:00`.
pub(crate) fn parse_service_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().split('T').next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Compare a service's city string against the requested location.
/// Only the part before the first comma counts, so "San Francisco, CA, US"
/// matches "san francisco".
pub(crate) fn city_matches(service_city: &str, location: &str) -> bool {
    let city = service_city.split(',').next().unwrap_or_default().trim();
    !city.is_empty() && city.eq_ignore_ascii_case(location.trim())
}

/// Ids come back as numbers from some services and strings from others.
pub(crate) fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
