//! Page-walking for paginated sources.
//!
//! Each source declares its `PaginationStyle` up front; the loop below never
//! guesses the style from the shape of a response.

use crate::apis::base::instrument_call;
use crate::app::ports::HttpTransport;
use crate::error::Result;
use crate::types::SourceRequest;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationStyle {
    /// A single request returns everything
    None,
    /// Each response may carry a pointer to the next page
    Cursor,
    /// Numbered pages starting at 1, with the total count reported in every response
    OffsetCount { per_page: u32 },
}

/// What a response says about its position in the result set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageEnvelope {
    pub total: Option<u64>,
    /// Records on this page
    pub records: usize,
    /// Absolute URL of the next page (cursor style only)
    pub next: Option<String>,
}

/// Walks the pages of one query.
pub struct Paginator<'a> {
    transport: &'a dyn HttpTransport,
    source: &'static str,
    style: PaginationStyle,
    max_pages: u32,
}

impl<'a> Paginator<'a> {
    pub fn new(
        transport: &'a dyn HttpTransport,
        source: &'static str,
        style: PaginationStyle,
        max_pages: u32,
    ) -> Self {
        Self {
            transport,
            source,
            style,
            max_pages: max_pages.max(1),
        }
    }

    /// Fetch every page and return their bodies in page order.
    ///
    /// `build` makes the request for a 1-based page number (cursor style only
    /// calls it for the first page). `envelope` reads the position of a page
    /// from its body and the URL it came from. Any failed page fails the whole
    /// walk; bodies already collected are dropped with it.
    pub async fn fetch_all<B, E>(&self, build: B, envelope: E) -> Result<Vec<String>>
    where
        B: Fn(u32) -> SourceRequest,
        E: Fn(&str, &str) -> PageEnvelope,
    {
        let mut bodies = Vec::new();
        let mut request = build(1);
        let mut page: u32 = 1;

        loop {
            let body = instrument_call(self.transport, self.source, &request).await?;
            let position = envelope(&body, &request.url);
            bodies.push(body);

            let next = match self.style {
                PaginationStyle::None => None,
                PaginationStyle::Cursor => position
                    .next
                    .filter(|url| !url.trim().is_empty())
                    .map(|url| request.with_url(url)),
                PaginationStyle::OffsetCount { per_page } => {
                    let total = position.total.unwrap_or(0);
                    if position.records == 0 || u64::from(per_page) * u64::from(page) > total {
                        None
                    } else {
                        Some(build(page + 1))
                    }
                }
            };

            let Some(next) = next else {
                break;
            };
            if page >= self.max_pages {
                warn!(
                    source = self.source,
                    url = %request.url,
                    max_pages = self.max_pages,
                    "Stopping pagination at page limit"
                );
                break;
            }
            page += 1;
            request = next;
        }

        debug!(source = self.source, pages = bodies.len(), "Pagination finished");
        Ok(bodies)
    }
}
