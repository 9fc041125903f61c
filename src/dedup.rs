//! Per-artist duplicate removal.
//!
//! Two shows are the same when their dates match and their titles match after
//! trimming and lowercasing. The source tag is ignored, so the same show
//! reported by two services collapses to whichever was seen first.

use crate::types::{NormalizedShow, ShowsByArtist};
use chrono::NaiveDate;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    date: NaiveDate,
    title: String,
}

impl DedupKey {
    pub fn of(show: &NormalizedShow) -> Self {
        Self {
            date: show.date,
            title: show.title.trim().to_lowercase(),
        }
    }
}

/// Keep the first occurrence of every key, in order. `seen` is updated with
/// every kept key, so callers can continue a dedup across several batches.
pub fn dedupe_shows(shows: Vec<NormalizedShow>, seen: &mut HashSet<DedupKey>) -> Vec<NormalizedShow> {
    shows
        .into_iter()
        .filter(|show| seen.insert(DedupKey::of(show)))
        .collect()
}

/// Dedupe every artist's list independently.
pub fn dedupe(shows_by_artist: ShowsByArtist) -> ShowsByArtist {
    dedupe_counted(shows_by_artist).0
}

/// Like `dedupe`, also returning how many entries were removed.
pub fn dedupe_counted(shows_by_artist: ShowsByArtist) -> (ShowsByArtist, usize) {
    let mut removed = 0;
    let cleaned = shows_by_artist
        .into_iter()
        .map(|(artist_id, shows)| {
            let before = shows.len();
            let mut seen = HashSet::with_capacity(before);
            let kept = dedupe_shows(shows, &mut seen);
            removed += before - kept.len();
            (artist_id, kept)
        })
        .collect();
    (cleaned, removed)
}
