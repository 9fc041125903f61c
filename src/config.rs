use crate::constants::{
    BANDSINTOWN_APP_ID_ENV, DEFAULT_MAX_PAGES, DEFAULT_PER_PAGE, DEFAULT_TIMEOUT_SECONDS,
    DEFAULT_USER_AGENT, SEATGEEK_CLIENT_ID_ENV, SEATGEEK_CLIENT_SECRET_ENV, SONGKICK_API_KEY_ENV,
};
use crate::error::{Result, ShowFinderError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "show_finder.toml";
const CONFIG_PATH_ENV: &str = "SHOW_FINDER_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
    /// Upper bound on pages fetched for one paginated query
    pub max_pages: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub bandsintown: SourceConfig,
    pub songkick: SourceConfig,
    pub seatgeek: SourceConfig,
    pub foopee: SourceConfig,
}

/// Per-source overrides. Unset values fall back to the source's built-in defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub enabled: bool,
    pub base_url: Option<String>,
    pub per_page: Option<u32>,
    /// Only meaningful for location-gated sources
    pub covered_location: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
            per_page: None,
            covered_location: None,
        }
    }
}

impl SourceConfig {
    pub fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ShowFinderError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `$SHOW_FINDER_CONFIG`, then `./show_finder.toml`, else defaults.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
            return Self::load(Path::new(&p));
        }
        let path = PathBuf::from(DEFAULT_CONFIG_PATH);
        if path.exists() {
            return Self::load(&path);
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }
}

/// API keys for every source, read once at startup and shared read-only.
#[derive(Clone, Default)]
pub struct ServiceCredentials {
    pub bandsintown_app_id: Option<String>,
    pub songkick_api_key: Option<String>,
    pub seatgeek_client_id: Option<String>,
    pub seatgeek_client_secret: Option<String>,
}

impl std::fmt::Debug for ServiceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn mask(v: &Option<String>) -> &'static str {
            if v.is_some() {
                "<set>"
            } else {
                "<unset>"
            }
        }
        f.debug_struct("ServiceCredentials")
            .field("bandsintown_app_id", &mask(&self.bandsintown_app_id))
            .field("songkick_api_key", &mask(&self.songkick_api_key))
            .field("seatgeek_client_id", &mask(&self.seatgeek_client_id))
            .field("seatgeek_client_secret", &mask(&self.seatgeek_client_secret))
            .finish()
    }
}

impl ServiceCredentials {
    /// Read credentials from the process environment (a `.env` file is honored).
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            bandsintown_app_id: get(BANDSINTOWN_APP_ID_ENV),
            songkick_api_key: get(SONGKICK_API_KEY_ENV),
            seatgeek_client_id: get(SEATGEEK_CLIENT_ID_ENV),
            seatgeek_client_secret: get(SEATGEEK_CLIENT_SECRET_ENV),
        }
    }
}
