use std::{fs::File, io::BufWriter, path::Path};

use serde::Serialize;

use crate::{
    common::Result,
    partition::{GrowthReport, LeftoverReport, RepairOutcome},
    plan::{Plan, PlanScore},
};

/// One row of a block assignment file.
#[derive(Debug, Serialize)]
struct AssignmentRecord<'a> {
    geoid: &'a str,
    district: u32,
}

/// Run diagnostics written next to the score table.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    seeds: Vec<&'a str>,
    growth: &'a GrowthReport,
    leftovers: &'a LeftoverReport,
    repair: &'a RepairOutcome,
    score: &'a PlanScore,
}

fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), value)?;
    Ok(())
}

/// Write the unit → district assignment as a JSON array, in unit id order.
pub fn write_assignments(plan: &Plan, path: &Path) -> Result<()> {
    let records = plan.assignments().into_iter()
        .map(|(geoid, district)| AssignmentRecord { geoid, district })
        .collect::<Vec<_>>();
    write_json(path, &records)
}

/// Write a plan score (summary plus per-district table).
pub fn write_score(score: &PlanScore, path: &Path) -> Result<()> {
    write_json(path, score)
}

/// Write the score together with seed, growth, leftover, and repair diagnostics.
pub fn write_report(plan: &Plan, score: &PlanScore, path: &Path) -> Result<()> {
    let report = RunReport {
        seeds: plan.seeds().iter().map(|&unit| plan.store().id(unit)).collect(),
        growth: plan.growth(),
        leftovers: plan.leftovers(),
        repair: plan.repair(),
        score,
    };
    write_json(path, &report)
}
