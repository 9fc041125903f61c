mod common;

use chrono::NaiveDate;
use common::*;
use show_finder::apis::base::AdapterSettings;
use show_finder::apis::FoopeeAdapter;
use show_finder::config::{Config, ServiceCredentials};
use show_finder::infra::ReqwestHttp;
use show_finder::types::{ArtistRef, SourceTag};
use show_finder::ShowAggregator;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn credentials() -> ServiceCredentials {
    ServiceCredentials {
        bandsintown_app_id: Some("test-app".into()),
        songkick_api_key: Some("test-key".into()),
        seatgeek_client_id: Some("test-client".into()),
        seatgeek_client_secret: None,
    }
}

fn only(sources: &[&str]) -> Vec<String> {
    sources.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn same_show_from_two_sources_is_reported_once() {
    let transport = Arc::new(
        RoutingTransport::new()
            .respond(
                "rest.bandsintown.com/artists/Artist%20X/events",
                bandsintown_events(&[("2024-05-01T20:00:00", "Venue A", "San Francisco")]),
            )
            .respond("search/artists.json", songkick_search(42))
            .respond(
                "artists/42/calendar.json",
                songkick_calendar(&[("2024-05-01", "venue a", "San Francisco, CA, US")], 1),
            ),
    );
    let sources = only(&["bandsintown", "songkick"]);
    let aggregator =
        ShowAggregator::from_config(&Config::default(), &credentials(), transport.clone(), Some(&sources));

    let listing = aggregator
        .get_all_shows(&[ArtistRef::new("1", "Artist X")], "san francisco")
        .await;

    let expected = serde_json::json!({"1": ["Venue A show on 2024-05-01"]});
    assert_eq!(serde_json::to_value(&listing).unwrap(), expected);
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn artists_without_shows_get_empty_lists() {
    let transport = Arc::new(
        RoutingTransport::new()
            .respond(
                "artists/Artist%20X/events",
                bandsintown_events(&[("2024-06-02T19:00:00", "The Empty Bottle", "Chicago")]),
            )
            .respond("artists/Artist%20Y/events", r#"{"warn": "Not found"}"#),
    );
    let sources = only(&["bandsintown"]);
    let aggregator =
        ShowAggregator::from_config(&Config::default(), &credentials(), transport, Some(&sources));

    let listing = aggregator
        .get_all_shows(
            &[ArtistRef::new("1", "Artist X"), ArtistRef::new("2", "Artist Y")],
            "Chicago",
        )
        .await;

    assert_eq!(listing["1"], vec!["The Empty Bottle show on 2024-06-02".to_string()]);
    assert!(listing["2"].is_empty());
}

#[tokio::test]
async fn failed_id_lookup_only_affects_that_artist() {
    let transport = Arc::new(
        RoutingTransport::new()
            .fail("query=Artist%20A")
            .respond("query=Artist%20B", songkick_search(9))
            .respond(
                "artists/9/calendar.json",
                songkick_calendar(&[("2024-07-04", "Metro", "Chicago, IL, US")], 1),
            ),
    );
    let sources = only(&["songkick"]);
    let aggregator =
        ShowAggregator::from_config(&Config::default(), &credentials(), transport.clone(), Some(&sources));

    let (shows, report) = aggregator
        .get_all_shows_detailed(
            &[ArtistRef::new("a", "Artist A"), ArtistRef::new("b", "Artist B")],
            "chicago",
        )
        .await;

    assert!(shows["a"].is_empty());
    assert_eq!(shows["b"].len(), 1);
    assert_eq!(shows["b"][0].source, SourceTag::Songkick);
    assert_eq!(report.artists_with_shows[&SourceTag::Songkick], 1);
    // No calendar request is made for the artist whose id never resolved
    assert_eq!(transport.calls_matching("calendar.json").len(), 1);
}

#[tokio::test]
async fn seatgeek_walks_every_page_of_the_result_set() {
    let full_page = vec![("2024-05-01T20:00:00", "Venue S", "Philadelphia"); 25];
    let second_page = vec![("2024-05-02T20:00:00", "Venue S", "Philadelphia"); 25];
    let last_page = vec![("2024-05-03T20:00:00", "Venue T", "Philadelphia"); 10];
    let transport = Arc::new(
        RoutingTransport::new()
            .respond("seatgeek.com/2/performers", seatgeek_performers(7))
            .respond("&page=1", seatgeek_events(&full_page, 60))
            .respond("&page=2", seatgeek_events(&second_page, 60))
            .respond("&page=3", seatgeek_events(&last_page, 60)),
    );
    let sources = only(&["seatgeek"]);
    let aggregator =
        ShowAggregator::from_config(&Config::default(), &credentials(), transport.clone(), Some(&sources));

    let listing = aggregator
        .get_all_shows(&[ArtistRef::new("1", "Artist S")], "philadelphia")
        .await;

    let event_calls = transport.calls_matching("/events?");
    assert_eq!(event_calls.len(), 3);
    assert!(event_calls.iter().all(|url| url.contains("performers.id=7")));
    assert!(transport.calls_matching("&page=4").is_empty());
    assert_eq!(
        listing["1"],
        vec![
            "Venue S show on 2024-05-01".to_string(),
            "Venue S show on 2024-05-02".to_string(),
            "Venue T show on 2024-05-03".to_string(),
        ]
    );
}

#[tokio::test]
async fn failed_page_only_drops_that_artist() {
    let full_page = vec![("2024-05-01T20:00:00", "V1", "Philadelphia"); 25];
    let transport = Arc::new(
        RoutingTransport::new()
            .respond("performers?q=Artist%20A", seatgeek_performers(1))
            .respond("performers?q=Artist%20B", seatgeek_performers(2))
            .respond("performers.id=1&per_page=25&page=1", seatgeek_events(&full_page, 60))
            .respond_status("performers.id=1&per_page=25&page=2", 500, "")
            .respond(
                "performers.id=2&per_page=25&page=1",
                seatgeek_events(&[("2024-05-02T20:00:00", "V2", "Philadelphia")], 1),
            ),
    );
    let sources = only(&["seatgeek"]);
    let aggregator =
        ShowAggregator::from_config(&Config::default(), &credentials(), transport.clone(), Some(&sources));

    let listing = aggregator
        .get_all_shows(
            &[ArtistRef::new("a", "Artist A"), ArtistRef::new("b", "Artist B")],
            "philadelphia",
        )
        .await;

    let expected = serde_json::json!({"a": [], "b": ["V2 show on 2024-05-02"]});
    assert_eq!(serde_json::to_value(&listing).unwrap(), expected);
    // The walk for A stops at the failed page
    assert!(transport.calls_matching("performers.id=1&per_page=25&page=3").is_empty());
}

const LIST_PAGE_0: &str = r##"
<html><body><ul>
<li><a name="Someone Else"><b>Someone Else</b></a>
  <ul><li><a href="by-date.0.html#Sat_May_4"><b>Sat May 4</b></a>
      <a href="by-club.1.html#Chapel"><b>The Chapel, S.F.</b></a></li></ul>
</li>
</ul>
<a href="by-band.1.html">more bands</a>
</body></html>
"##;

const LIST_PAGE_1: &str = r##"
<html><body><ul>
<li><a name="Artist X"><b>Artist X</b></a>
  <ul><li><a href="by-date.0.html#Sun_May_5"><b>Sun May 5</b></a>
      <a href="by-club.2.html#Bottom"><b>Bottom of the Hill, S.F.</b></a></li></ul>
</li>
</ul></body></html>
"##;

fn foopee_aggregator(transport: Arc<RoutingTransport>) -> ShowAggregator {
    let settings = AdapterSettings {
        base_url: "http://list.test/punk".to_string(),
        per_page: 25,
        max_pages: 20,
    };
    let adapter = FoopeeAdapter::new(transport, "san francisco", settings)
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 4, 20).unwrap());
    ShowAggregator::new(vec![Box::new(adapter)])
}

#[tokio::test]
async fn local_listing_is_only_consulted_for_its_city() {
    let transport = Arc::new(
        RoutingTransport::new()
            .respond("by-band.0.html", LIST_PAGE_0)
            .respond("by-band.1.html", LIST_PAGE_1),
    );
    let aggregator = foopee_aggregator(transport.clone());
    let artists = [ArtistRef::new("1", " artist  X ")];

    let listing = aggregator.get_all_shows(&artists, "new york").await;
    assert!(listing["1"].is_empty());
    assert!(transport.calls().is_empty());

    let listing = aggregator.get_all_shows(&artists, "san francisco").await;
    assert_eq!(listing["1"], vec!["Bottom of the Hill, S.F. show on 2024-05-05".to_string()]);
    assert_eq!(
        transport.calls(),
        vec![
            "http://list.test/punk/by-band.0.html".to_string(),
            "http://list.test/punk/by-band.1.html".to_string(),
        ]
    );
}

#[tokio::test]
async fn full_run_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", mockito::Matcher::Regex(r"^/artists/Artist(%20| )X/events".to_string()))
        .match_query(mockito::Matcher::UrlEncoded("app_id".into(), "test-app".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(bandsintown_events(&[("2024-05-01T20:00:00", "Venue A", "Houston")]))
        .create_async()
        .await;

    let mut config = Config::default();
    config.sources.bandsintown.base_url = Some(server.url());
    let transport = Arc::new(ReqwestHttp::new(&config.http).unwrap());
    let sources = only(&["bandsintown"]);
    let aggregator = ShowAggregator::from_config(&config, &credentials(), transport, Some(&sources));

    let listing = aggregator
        .get_all_shows(&[ArtistRef::new("1", "Artist X")], "houston")
        .await;

    mock.assert_async().await;
    assert_eq!(listing["1"], vec!["Venue A show on 2024-05-01".to_string()]);
}

#[tokio::test]
async fn hung_source_is_cut_off_by_the_request_timeout() {
    // Accepts connections and never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let mut config = Config::default();
    config.http.timeout_seconds = 1;
    config.sources.bandsintown.base_url = Some(format!("http://{addr}"));
    let transport = Arc::new(ReqwestHttp::new(&config.http).unwrap());
    let sources = only(&["bandsintown"]);
    let aggregator = ShowAggregator::from_config(&config, &credentials(), transport, Some(&sources));

    let started = Instant::now();
    let listing = aggregator
        .get_all_shows(&[ArtistRef::new("1", "Artist X")], "houston")
        .await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert!(listing["1"].is_empty());
}
