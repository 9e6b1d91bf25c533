use geo::MultiPolygon;
use serde::Serialize;

use crate::{
    geom::{area, perimeter, perimeter_area_ratio, polsby_popper},
    partition::relative_deviation,
};

/// A finished district: its index, population, and dissolved geometry.
/// `geometry` is `None` for a district with no members.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictShape {
    pub district: u32,
    pub population: u64,
    pub geometry: Option<MultiPolygon<f64>>,
}

/// One row of the per-district score table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictScore {
    pub district: u32,
    pub pop: u64,
    pub area: f64,
    pub perimeter: f64,
    /// Polsby–Popper compactness; 0 for degenerate or empty districts.
    pub pp: f64,
    pub perimeter_area_ratio: f64,
}

/// Plan-level population and compactness statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub n_districts: usize,
    pub pop_target: f64,
    pub pop_max_dev: f64,
    pub pop_mean_dev: f64,
    pub pp_mean: f64,
    pub pp_min: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanScore {
    pub summary: PlanSummary,
    pub districts: Vec<DistrictScore>,
}

/// Score a set of districts against a target population.
///
/// Numerical edge cases never fail: zero-perimeter shapes score 0, a zero
/// target gives 0 deviations, and an empty district list gives all-zero stats.
pub fn score_districts(shapes: &[DistrictShape], target: f64) -> PlanScore {
    let districts = shapes.iter()
        .map(|shape| {
            let (area, perimeter) = shape.geometry.as_ref()
                .map_or((0.0, 0.0), |geometry| (area(geometry), perimeter(geometry)));
            DistrictScore {
                district: shape.district,
                pop: shape.population,
                area,
                perimeter,
                pp: polsby_popper(area, perimeter),
                perimeter_area_ratio: perimeter_area_ratio(area, perimeter),
            }
        })
        .collect::<Vec<_>>();

    let n = districts.len();
    let deviations = districts.iter().map(|d| relative_deviation(d.pop, target)).collect::<Vec<_>>();
    let mean = |sum: f64| if n == 0 { 0.0 } else { sum / n as f64 };

    let summary = PlanSummary {
        n_districts: n,
        pop_target: target,
        pop_max_dev: deviations.iter().copied().fold(0.0, f64::max),
        pop_mean_dev: mean(deviations.iter().sum()),
        pp_mean: mean(districts.iter().map(|d| d.pp).sum()),
        pp_min: districts.iter().map(|d| d.pp).reduce(f64::min).unwrap_or(0.0),
    };

    PlanScore { summary, districts }
}
