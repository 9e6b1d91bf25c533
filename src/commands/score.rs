use anyhow::{Context, Result};
use seedmander::{io, score_districts, DistrictingConfig};
use tracing::info;

use crate::cli::{Cli, ScoreArgs};

pub fn run(_cli: &Cli, args: &ScoreArgs) -> Result<()> {
    info!("[score] loading districts from {}", args.plan.display());
    let columns = DistrictingConfig::default().population_columns;
    let districts = io::geojson::read_districts(&args.plan, &columns)
        .with_context(|| format!("[score] failed to load {}", args.plan.display()))?;

    let score = score_districts(&districts, args.target);
    if let Some(path) = &args.output {
        io::json::write_score(&score, path)
            .with_context(|| format!("[score] failed to write {}", path.display()))?;
    }

    crate::commands::print_score(&score);
    Ok(())
}
