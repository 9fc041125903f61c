use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use show_finder::aggregator::ShowAggregator;
use show_finder::app::ports::HttpTransport;
use show_finder::config::{Config, ServiceCredentials};
use show_finder::constants::{self, SUPPORTED_LOCATIONS};
use show_finder::error::ShowFinderError;
use show_finder::infra::ReqwestHttp;
use show_finder::types::ArtistRef;
use show_finder::{logging, metrics};

#[derive(Parser)]
#[command(name = "show_finder")]
#[command(about = "Find upcoming live shows for a list of artists")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search every source for upcoming shows and print them as JSON
    Find {
        /// Artist names (comma-separated)
        #[arg(long)]
        artists: String,
        /// City to search in, see `locations`
        #[arg(long)]
        location: String,
        /// Path to a show_finder.toml
        #[arg(long)]
        config: Option<PathBuf>,
        /// Specific sources to query (comma-separated). Available: bandsintown, songkick, seatgeek, foopee
        #[arg(long)]
        sources: Option<String>,
    },
    /// List the supported locations
    Locations,
    /// List the sources and whether their credentials are configured
    Sources,
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Artist ids are their 1-based position on the command line
fn artist_refs(names: &[String]) -> Vec<ArtistRef> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| ArtistRef::new((i + 1).to_string(), name.as_str()))
        .collect()
}

fn credential_status(source: &str, creds: &ServiceCredentials) -> &'static str {
    let configured = match source {
        constants::BANDSINTOWN_API => creds.bandsintown_app_id.is_some(),
        constants::SONGKICK_API => creds.songkick_api_key.is_some(),
        constants::SEATGEEK_API => creds.seatgeek_client_id.is_some(),
        _ => true,
    };
    if configured {
        "ready"
    } else {
        "missing credentials"
    }
}

async fn run_find(
    artists: String,
    location: String,
    config: Option<PathBuf>,
    sources: Option<String>,
) -> anyhow::Result<()> {
    let Some(location) = constants::find_location(&location) else {
        return Err(ShowFinderError::UnsupportedLocation(location).into());
    };

    let config = match config {
        Some(path) => Config::load(&path)?,
        None => Config::load_default()?,
    };
    let credentials = ServiceCredentials::from_env();
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestHttp::new(&config.http)?);

    let only = sources.as_deref().map(split_list);
    let aggregator = ShowAggregator::from_config(&config, &credentials, transport, only.as_deref());
    if aggregator.source_names().is_empty() {
        anyhow::bail!("No sources are enabled and configured; see `show_finder sources`");
    }

    let artists = artist_refs(&split_list(&artists));
    info!(
        location = location.value,
        artists = artists.len(),
        sources = ?aggregator.source_names(),
        "Starting show search"
    );
    let listing = aggregator.get_all_shows(&artists, location.value).await;

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();
    metrics::init_metrics();

    let cli = Cli::parse();

    match cli.command {
        Commands::Find {
            artists,
            location,
            config,
            sources,
        } => {
            if let Err(e) = run_find(artists, location, config, sources).await {
                error!("Show search failed: {}", e);
                return Err(e);
            }
        }
        Commands::Locations => {
            for loc in SUPPORTED_LOCATIONS {
                println!("{:<15} {}", loc.value, loc.display_name);
            }
        }
        Commands::Sources => {
            let credentials = ServiceCredentials::from_env();
            for source in constants::get_supported_sources() {
                println!("{:<12} {}", source, credential_status(source, &credentials));
            }
        }
    }
    Ok(())
}
