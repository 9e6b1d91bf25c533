#![doc = "Seed-and-grow districting: contiguity graphs over census blocks, \
population-balanced region growth, boundary repair, and plan scoring."]
mod common;
mod geom;
mod graph;
mod partition;
mod plan;
mod unit;

pub mod io;

#[doc(inline)]
pub use common::{DistrictError, DistrictingConfig, Result};

#[doc(inline)]
pub use geom::{area, perimeter, perimeter_area_ratio, polsby_popper};

#[doc(inline)]
pub use graph::Graph;

#[doc(inline)]
pub use partition::{
    select_seeds, GrowthReport, LeftoverReport, Partition, RepairOutcome, RepairReport,
    RepairSkipReason, RepairTermination, WeightedSampler,
};

#[doc(inline)]
pub use plan::{score_districts, DistrictScore, DistrictShape, Plan, PlanScore, PlanSummary};

#[doc(inline)]
pub use unit::{Unit, UnitStore};
