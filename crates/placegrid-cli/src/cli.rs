use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// placegrid - coverage-search scraper for business listings
#[derive(Parser, Debug)]
#[command(name = "placegrid")]
#[command(about = "Coverage-search scraper for business listings", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML config file (defaults to ./placegrid.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Plan the search points for a region without issuing any queries
    Plan(PlanArgs),

    /// Run the full pipeline: plan, query every point, deduplicate, export
    Scrape(ScrapeArgs),

    /// Issue one diagnostic query to verify the API key and connectivity
    Probe(ProbeArgs),

    /// Merge per-category CSV exports into one file
    Merge(MergeArgs),
}

#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Region boundary file (.shp, .geojson, .json)
    pub boundary: PathBuf,

    /// Search category; repeat for several profiles (overrides config profiles)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Search radius in meters for categories given on the command line
    #[arg(long, default_value_t = 2000.0)]
    pub radius_m: f64,

    /// Circle-overlap factor applied to the grid spacing
    #[arg(long)]
    pub overlap_factor: Option<f64>,

    /// Vertex count of the circle approximation
    #[arg(long)]
    pub circle_vertices: Option<u32>,

    /// Disable coverage-gap filling
    #[arg(long)]
    pub no_gap_fill: bool,

    /// Maximum gap-fill passes per profile
    #[arg(long)]
    pub max_gap_passes: Option<u32>,

    /// Write the planned points to this CSV file
    #[arg(long)]
    pub points_out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ScrapeArgs {
    /// Region boundary file (.shp, .geojson, .json)
    pub boundary: PathBuf,

    /// Output CSV file
    #[arg(long, default_value = "places.csv")]
    pub output: PathBuf,

    /// API key for the places service
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the places service
    #[arg(long, default_value = "https://maps.googleapis.com/")]
    pub base_url: String,

    /// Search category; repeat for several profiles (overrides config profiles)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Search radius in meters for categories given on the command line
    #[arg(long, default_value_t = 2000.0)]
    pub radius_m: f64,

    /// Circle-overlap factor applied to the grid spacing
    #[arg(long)]
    pub overlap_factor: Option<f64>,

    /// Vertex count of the circle approximation
    #[arg(long)]
    pub circle_vertices: Option<u32>,

    /// Disable coverage-gap filling
    #[arg(long)]
    pub no_gap_fill: bool,

    /// Maximum gap-fill passes per profile
    #[arg(long)]
    pub max_gap_passes: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct ProbeArgs {
    /// Latitude of the probe location
    #[arg(long, default_value_t = 24.8607)]
    pub lat: f64,

    /// Longitude of the probe location
    #[arg(long, default_value_t = 67.0011)]
    pub lon: f64,

    /// Category to probe with
    #[arg(long, default_value = "hospital")]
    pub category: String,

    /// Probe radius in meters
    #[arg(long, default_value_t = 1000.0)]
    pub radius_m: f64,

    /// API key for the places service
    #[arg(long, env = "GOOGLE_PLACES_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the places service
    #[arg(long, default_value = "https://maps.googleapis.com/")]
    pub base_url: String,
}

#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Folder containing per-category CSV files
    pub input_dir: PathBuf,

    /// Output CSV file
    #[arg(long, default_value = "merged.csv")]
    pub output: PathBuf,
}
