/// Source name constants to ensure consistency across the codebase.
/// These are the names accepted by the CLI and used in logs and metric labels.
pub const BANDSINTOWN_API: &str = "bandsintown";
pub const SONGKICK_API: &str = "songkick";
pub const SEATGEEK_API: &str = "seatgeek";
pub const FOOPEE_API: &str = "foopee";

// Production endpoints; each can be overridden per source in the config file
pub const BANDSINTOWN_BASE_URL: &str = "https://rest.bandsintown.com";
pub const SONGKICK_BASE_URL: &str = "https://api.songkick.com/api/3.0";
pub const SEATGEEK_BASE_URL: &str = "https://api.seatgeek.com/2";
pub const FOOPEE_BASE_URL: &str = "http://www.foopee.com/punk/the-list";

/// Foopee only lists bay-area shows.
pub const FOOPEE_COVERED_LOCATION: &str = "san francisco";

pub const DEFAULT_PER_PAGE: u32 = 25;
pub const DEFAULT_MAX_PAGES: u32 = 20;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "show_finder/0.1";

// Credential environment variables
pub const BANDSINTOWN_APP_ID_ENV: &str = "BANDSINTOWN_APP_ID";
pub const SONGKICK_API_KEY_ENV: &str = "SONGKICK_API_KEY";
pub const SEATGEEK_CLIENT_ID_ENV: &str = "SEATGEEK_CLIENT_ID";
pub const SEATGEEK_CLIENT_SECRET_ENV: &str = "SEATGEEK_CLIENT_SECRET";

/// A city the finder can search in. `value` is the lowercase key used for
/// location filtering, `display_name` is what a person reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub value: &'static str,
    pub display_name: &'static str,
}

pub const SUPPORTED_LOCATIONS: &[Location] = &[
    Location { value: "san francisco", display_name: "San Francisco" },
    Location { value: "los angeles", display_name: "Los Angeles" },
    Location { value: "washington", display_name: "Washington DC" },
    Location { value: "new york", display_name: "New York" },
    Location { value: "chicago", display_name: "Chicago" },
    Location { value: "houston", display_name: "Houston" },
    Location { value: "philadelphia", display_name: "Philadelphia" },
];

/// Look up a supported location by its value, ignoring case and surrounding whitespace.
pub fn find_location(value: &str) -> Option<&'static Location> {
    let wanted = value.trim();
    SUPPORTED_LOCATIONS
        .iter()
        .find(|loc| loc.value.eq_ignore_ascii_case(wanted))
}

/// Get all supported source names, in merge order
pub fn get_supported_sources() -> Vec<&'static str> {
    vec![BANDSINTOWN_API, SONGKICK_API, SEATGEEK_API, FOOPEE_API]
}
