mod contiguity;
#[cfg(test)]
mod fixtures;
mod grow;
mod leftover;
mod partition;
mod partition_set;
mod repair;
mod sampler;
mod seed;

use partition_set::PartitionSet;
pub use grow::GrowthReport;
pub use leftover::LeftoverReport;
pub use partition::Partition;
pub(crate) use partition::relative_deviation;
pub use repair::{RepairOutcome, RepairReport, RepairSkipReason, RepairTermination};
pub use sampler::WeightedSampler;
pub use seed::select_seeds;
