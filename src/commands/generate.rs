use std::path::PathBuf;

use anyhow::{Context, Result};
use seedmander::{io, DistrictingConfig, Plan, UnitStore};
use tracing::info;

use crate::cli::{Cli, GenerateArgs};

/// Merge the optional config file with command-line overrides.
fn resolve_config(args: &GenerateArgs) -> Result<DistrictingConfig> {
    let mut config = match &args.config {
        Some(path) => DistrictingConfig::from_json_file(path)
            .with_context(|| format!("[generate] failed to read config {}", path.display()))?,
        None => DistrictingConfig::default(),
    };

    if let Some(districts) = args.districts { config.num_districts = districts }
    if let Some(tolerance) = args.tolerance { config.tolerance = tolerance }
    if let Some(seed) = args.seed { config.seed = Some(seed) }
    if let Some(max_iters) = args.max_iters { config.max_repair_iters = max_iters }
    if args.preserve_contiguity { config.preserve_contiguity = true }

    config.validate().context("[generate] invalid configuration")?;
    Ok(config)
}

pub fn run(_cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let out_dir = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("[generate] cannot create {}", out_dir.display()))?;

    info!("[generate] loading units from {}", args.units.display());
    let units = match &args.population_csv {
        Some(csv) => io::geojson::read_units_with_population(&args.units, csv, &config.population_columns),
        None => io::geojson::read_units(&args.units, &config.population_columns),
    }
    .with_context(|| format!("[generate] failed to load {}", args.units.display()))?;
    let store = UnitStore::new(units)?;
    info!(units = store.len(), population = store.total_population(), "[generate] unit store ready");

    let plan = Plan::generate(store, &config)?;
    let score = plan.score();

    let districts_path = out_dir.join("districts.geojson");
    io::geojson::write_districts(&plan, &districts_path)
        .with_context(|| format!("[generate] failed to write {}", districts_path.display()))?;
    io::json::write_assignments(&plan, &out_dir.join("assignments.json"))?;
    io::json::write_report(&plan, &score, &out_dir.join("report.json"))?;
    info!("[generate] wrote plan to {}", out_dir.display());

    println!("Achieved pops per district: {:?}", plan.district_populations());
    crate::commands::print_score(&score);
    Ok(())
}
