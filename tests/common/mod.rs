#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use show_finder::app::ports::HttpTransport;
use show_finder::error::{Result, ShowFinderError};
use show_finder::types::{RawServiceResponse, SourceRequest};
use std::sync::Mutex;

enum Reply {
    Body(u16, String),
    Fail,
}

/// Transport that answers from canned routes. The first route whose pattern
/// is a substring of the request URL wins; anything else is a 404.
#[derive(Default)]
pub struct RoutingTransport {
    routes: Vec<(String, Reply)>,
    calls: Mutex<Vec<String>>,
}

impl RoutingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, pattern: &str, body: impl Into<String>) -> Self {
        self.routes.push((pattern.to_string(), Reply::Body(200, body.into())));
        self
    }

    pub fn respond_status(mut self, pattern: &str, status: u16, body: impl Into<String>) -> Self {
        self.routes.push((pattern.to_string(), Reply::Body(status, body.into())));
        self
    }

    pub fn fail(mut self, pattern: &str) -> Self {
        self.routes.push((pattern.to_string(), Reply::Fail));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_matching(&self, pattern: &str) -> Vec<String> {
        self.calls().into_iter().filter(|url| url.contains(pattern)).collect()
    }
}

#[async_trait]
impl HttpTransport for RoutingTransport {
    async fn call(&self, request: &SourceRequest) -> Result<RawServiceResponse> {
        self.calls.lock().unwrap().push(request.url.clone());
        let route = self.routes.iter().find(|(pattern, _)| request.url.contains(pattern.as_str()));
        match route {
            Some((_, Reply::Body(status, body))) => Ok(RawServiceResponse {
                success: (200..300).contains(status),
                status: *status,
                body: body.clone(),
            }),
            Some((_, Reply::Fail)) => Err(connection_error()),
            None => Ok(RawServiceResponse {
                success: false,
                status: 404,
                body: String::new(),
            }),
        }
    }
}

/// A genuine reqwest error, the same shape the real transport fails with.
fn connection_error() -> ShowFinderError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("relative URL cannot be built");
    ShowFinderError::Http(err)
}

pub fn bandsintown_events(events: &[(&str, &str, &str)]) -> String {
    let events: Vec<Value> = events
        .iter()
        .map(|(datetime, venue, city)| {
            json!({
                "datetime": datetime,
                "venue": {"name": venue, "city": city, "country": "United States"}
            })
        })
        .collect();
    Value::Array(events).to_string()
}

pub fn songkick_search(id: u64) -> String {
    json!({"resultsPage": {"status": "ok", "results": {"artist": [{"id": id, "displayName": "match"}]}}})
        .to_string()
}

pub fn songkick_calendar(events: &[(&str, &str, &str)], total: u64) -> String {
    let events: Vec<Value> = events
        .iter()
        .map(|(date, venue, city)| {
            json!({
                "start": {"date": date},
                "venue": {"displayName": venue},
                "location": {"city": city}
            })
        })
        .collect();
    json!({"resultsPage": {"status": "ok", "results": {"event": events}, "totalEntries": total}})
        .to_string()
}

pub fn seatgeek_performers(id: u64) -> String {
    json!({"performers": [{"id": id, "name": "match"}], "meta": {"total": 1}}).to_string()
}

pub fn seatgeek_events(events: &[(&str, &str, &str)], total: u64) -> String {
    let events: Vec<Value> = events
        .iter()
        .map(|(datetime, venue, city)| {
            json!({"datetime_local": datetime, "venue": {"name": venue, "city": city}})
        })
        .collect();
    json!({"events": events, "meta": {"total": total}}).to_string()
}
