use crate::apis::pagination::PageEnvelope;
use crate::types::{NormalizedShow, SourceTag};
use chrono::{Datelike, Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use tracing::debug;

/// Shows from one by-band page keyed by lowercased band name
pub type FoopeeListing = BTreeMap<String, Vec<NormalizedShow>>;

static BAND_ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[name]").expect("static selector"));
static SHOW_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("ul > li").expect("static selector"));
static DATE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="by-date"]"#).expect("static selector"));
static CLUB_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="by-club"]"#).expect("static selector"));
static ANY_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})\b")
        .expect("static regex")
});
static PAGE_INDEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"by-band\.(\d+)\.html").expect("static regex"));

fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Key a band name the way the listing is keyed: whitespace collapsed, lowercase.
pub fn band_key(name: &str) -> String {
    collapse_ws(name).to_lowercase()
}

fn element_text(el: &ElementRef) -> String {
    collapse_ws(&el.text().collect::<String>())
}

/// Foopee dates look like `Sat Mar 15` and carry no year. The date is placed
/// in the earliest year where it is at most 31 days behind `today`.
pub(crate) fn infer_show_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = MONTH_DAY.captures(text)?;
    let month = match caps.get(1)?.as_str().to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;

    // Earliest of last/this/next year that is not more than a month behind today
    let cutoff = today - Duration::days(31);
    (today.year() - 1..=today.year() + 1)
        .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
        .find(|date| *date >= cutoff)
}

/// Parse one by-band page of The List.
///
/// Each band is an `<li>` holding `<a name=..><b>Band</b></a>` followed by a
/// nested list whose items link to the date and the club.
pub fn parse_foopee_page(body: &str, today: NaiveDate) -> FoopeeListing {
    let document = Html::parse_document(body);
    let mut listing = FoopeeListing::new();

    for anchor in document.select(&BAND_ANCHOR) {
        let band = element_text(&anchor);
        if band.is_empty() {
            continue;
        }
        let Some(band_item) = anchor.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        if band_item.value().name() != "li" {
            continue;
        }

        for show_item in band_item.select(&SHOW_ITEM) {
            let date_text = show_item.select(&DATE_LINK).next().map(|a| element_text(&a));
            let club = show_item.select(&CLUB_LINK).next().map(|a| element_text(&a));
            let (Some(date_text), Some(club)) = (date_text, club) else {
                debug!(band = %band, "Skipping Foopee show without date or club link");
                continue;
            };
            let Some(date) = infer_show_date(&date_text, today) else {
                debug!(band = %band, date = %date_text, "Unparseable Foopee date");
                continue;
            };
            if club.is_empty() {
                continue;
            }
            listing
                .entry(band_key(&band))
                .or_default()
                .push(NormalizedShow::new(date, club, SourceTag::Foopee));
        }
    }

    listing
}

/// Cursor envelope: the next page is `by-band.{n+1}.html` when this page links to it.
pub fn foopee_page_envelope(body: &str, current_url: &str) -> PageEnvelope {
    let document = Html::parse_document(body);
    let records = document.select(&BAND_ANCHOR).count();

    let next = PAGE_INDEX
        .captures(current_url)
        .and_then(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .and_then(|index| {
            let wanted = format!("by-band.{}.html", index + 1);
            let linked = document
                .select(&ANY_LINK)
                .filter_map(|a| a.value().attr("href"))
                .any(|href| href.split('#').next().unwrap_or_default().ends_with(&wanted));
            linked.then(|| {
                PAGE_INDEX
                    .replace(current_url, wanted.as_str())
                    .into_owned()
            })
        });

    PageEnvelope {
        total: None,
        records,
        next,
    }
}
