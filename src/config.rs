// config.rs
use crate::fx::DEFAULT_FX_API_URL;
use clap::Parser;
use std::path::PathBuf;

/// Scrape auction results and publish a market snapshot per vehicle.
#[derive(Debug, Parser)]
#[command(name = "vehicle_market", version, about)]
pub struct Cli {
    /// CSV with name,year,make,model,variant,classic_market_url columns
    #[arg(long, default_value = "vehicles.csv")]
    pub vehicles: PathBuf,

    /// Directory for the per-vehicle JSON files and snapshot.json
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Endpoint the snapshot is POSTed to; publishing is skipped when unset
    #[arg(long, env = "MARKET_API_URL")]
    pub market_api_url: Option<String>,

    #[arg(long, env = "MARKET_API_TOKEN", hide_env_values = true)]
    pub market_api_token: Option<String>,

    #[arg(long, env = "FX_API_URL", default_value = DEFAULT_FX_API_URL)]
    pub fx_api_url: String,

    /// Fetch pages through ZenRows instead of hitting the sites directly
    #[arg(long, env = "ZENROWS_API_KEY", hide_env_values = true)]
    pub zenrows_api_key: Option<String>,

    /// Also record Bring a Trailer auctions that ended on a bid
    #[arg(long)]
    pub include_bid_to: bool,

    /// Cap on Bring a Trailer results per vehicle
    #[arg(long, default_value_t = 150)]
    pub max_results: usize,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub vehicles_path: PathBuf,
    pub out_dir: PathBuf,
    pub market_api_url: Option<String>,
    pub market_api_token: Option<String>,
    pub fx_api_url: String,
    pub zenrows_api_key: Option<String>,
    pub include_bid_to: bool,
    pub max_results: usize,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        // Empty env vars mean "not configured".
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Self {
            vehicles_path: cli.vehicles,
            out_dir: cli.out_dir,
            market_api_url: non_empty(cli.market_api_url),
            market_api_token: non_empty(cli.market_api_token),
            fx_api_url: cli.fx_api_url,
            zenrows_api_key: non_empty(cli.zenrows_api_key),
            include_bid_to: cli.include_bid_to,
            max_results: cli.max_results,
        }
    }
}

impl Config {
    pub fn from_args() -> Self {
        Cli::parse().into()
    }
}
