//! Request builders for every source. Pure: same inputs, same request.

use crate::types::SourceRequest;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use urlencoding::encode;

pub fn bandsintown_events(base_url: &str, app_id: &str, artist_name: &str) -> SourceRequest {
    SourceRequest::get(format!(
        "{}/artists/{}/events?app_id={}",
        base_url,
        encode(artist_name),
        encode(app_id)
    ))
}

pub fn songkick_artist_search(base_url: &str, api_key: &str, artist_name: &str) -> SourceRequest {
    SourceRequest::get(format!(
        "{}/search/artists.json?apikey={}&query={}",
        base_url,
        encode(api_key),
        encode(artist_name)
    ))
}

pub fn songkick_calendar(
    base_url: &str,
    api_key: &str,
    songkick_id: &str,
    page: u32,
    per_page: u32,
) -> SourceRequest {
    SourceRequest::get(format!(
        "{}/artists/{}/calendar.json?apikey={}&page={}&per_page={}",
        base_url,
        encode(songkick_id),
        encode(api_key),
        page,
        per_page
    ))
}

/// SeatGeek takes HTTP basic auth with the client id as user and the
/// (optional) secret as password.
pub fn seatgeek_auth(client_id: &str, client_secret: Option<&str>) -> String {
    let pair = format!("{}:{}", client_id, client_secret.unwrap_or(""));
    format!("Basic {}", STANDARD.encode(pair))
}

pub fn seatgeek_performers(base_url: &str, auth: &str, artist_name: &str) -> SourceRequest {
    SourceRequest::get(format!("{}/performers?q={}", base_url, encode(artist_name)))
        .with_header("Authorization", auth)
}

pub fn seatgeek_events(
    base_url: &str,
    auth: &str,
    performer_id: &str,
    page: u32,
    per_page: u32,
) -> SourceRequest {
    SourceRequest::get(format!(
        "{}/events?performers.id={}&per_page={}&page={}",
        base_url,
        encode(performer_id),
        per_page,
        page
    ))
    .with_header("Authorization", auth)
}

/// Foopee's by-band listing is split across numbered pages starting at 0.
pub fn foopee_by_band(base_url: &str, index: u32) -> SourceRequest {
    let mut req = SourceRequest::get(format!("{}/by-band.{}.html", base_url, index));
    req.headers.clear();
    req
}
