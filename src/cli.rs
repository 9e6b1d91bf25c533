use std::path::PathBuf;

/// Seed-and-grow districting CLI (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "seedmander", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate a district plan from census block units
    Generate(GenerateArgs),

    /// Score an existing plan of dissolved districts
    Score(ScoreArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// GeoJSON FeatureCollection of units (GEOID*, population, polygon)
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub units: PathBuf,

    /// Block population CSV joined by GEOID when units carry no population column
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub population_csv: Option<PathBuf>,

    /// JSON config file; flags below override its values
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Number of districts
    #[arg(short, long)]
    pub districts: Option<usize>,

    /// Population tolerance as a fraction, e.g. 0.05
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Random seed for seed selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum boundary repair iterations (0 disables repair)
    #[arg(long)]
    pub max_iters: Option<usize>,

    /// Refuse repair moves that split a district
    #[arg(long)]
    pub preserve_contiguity: bool,

    /// Output directory, defaults to "."
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ScoreArgs {
    /// GeoJSON of dissolved districts with `district` and population properties
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub plan: PathBuf,

    /// Ideal district population
    #[arg(long)]
    pub target: f64,

    /// Write the score table as JSON here instead of only printing it
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}
