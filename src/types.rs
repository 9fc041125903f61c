use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An artist to search for. `id` is opaque to the finder and is only used to
/// correlate results from every source back to the caller's artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

impl ArtistRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Which service a show came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceTag {
    BandsInTown,
    Songkick,
    SeatGeek,
    Foopee,
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceTag::BandsInTown => "BandsInTown",
            SourceTag::Songkick => "Songkick",
            SourceTag::SeatGeek => "SeatGeek",
            SourceTag::Foopee => "Foopee",
        };
        f.write_str(name)
    }
}

/// Source-agnostic show record produced by a response parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedShow {
    pub date: NaiveDate,
    /// Venue name as the source reports it
    pub title: String,
    pub source: SourceTag,
}

impl NormalizedShow {
    pub fn new(date: NaiveDate, title: impl Into<String>, source: SourceTag) -> Self {
        Self {
            date,
            title: title.into(),
            source,
        }
    }

    /// The line shown to a person, e.g. `Venue A show on 2024-05-01`.
    pub fn display(&self) -> String {
        format!("{} show on {}", self.title, self.date.format("%Y-%m-%d"))
    }
}

/// Shows keyed by `ArtistRef::id`
pub type ShowsByArtist = BTreeMap<String, Vec<NormalizedShow>>;

/// Final caller-facing result: artist id to display strings
pub type ShowListing = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully built outbound request. Query builders produce these without any I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl SourceRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Same request against a different URL (used to follow pagination cursors)
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What a single HTTP call produced. A non-2xx status is not a transport error:
/// it comes back here with `success == false`.
#[derive(Debug, Clone)]
pub struct RawServiceResponse {
    pub success: bool,
    pub status: u16,
    pub body: String,
}

/// Result of parsing one service response
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// At least one show survived the location filter
    Shows(Vec<NormalizedShow>),
    /// Zero matching shows, or the service's artist-not-found marker
    NoShows,
    /// The body did not have the shape the service documents
    Malformed(String),
}

impl ParseOutcome {
    pub(crate) fn from_shows(shows: Vec<NormalizedShow>) -> Self {
        if shows.is_empty() {
            ParseOutcome::NoShows
        } else {
            ParseOutcome::Shows(shows)
        }
    }

    pub fn into_shows(self) -> Vec<NormalizedShow> {
        match self {
            ParseOutcome::Shows(shows) => shows,
            ParseOutcome::NoShows | ParseOutcome::Malformed(_) => Vec::new(),
        }
    }
}

/// Core trait every show-listing source implements
#[async_trait::async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Name used in logs, metrics and the CLI
    fn source_name(&self) -> &'static str;

    fn tag(&self) -> SourceTag;

    /// Whether this source covers the given (lowercase) location at all
    fn covers(&self, _location: &str) -> bool {
        true
    }

    /// Fetch shows for every artist. Never fails: problems are logged and the
    /// affected artists simply get nothing from this source.
    async fn fetch_shows(&self, artists: &[ArtistRef], location: &str) -> ShowsByArtist;
}
