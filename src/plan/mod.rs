mod plan;
mod score;

pub use plan::Plan;
pub use score::{score_districts, DistrictScore, DistrictShape, PlanScore, PlanSummary};
