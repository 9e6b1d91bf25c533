use rand::Rng;
use tracing::debug;

use crate::{
    common::{DistrictError, Result},
    graph::Graph,
    partition::WeightedSampler,
};

/// Choose `k` distinct seed nodes, sampled without replacement with weight
/// `max(population, 1)`. Seed `r` starts region `r`.
pub fn select_seeds<R: Rng>(graph: &Graph, k: usize, rng: &mut R) -> Result<Vec<usize>> {
    if k == 0 {
        return Err(DistrictError::InvalidConfig("cannot select seeds for zero regions".into()));
    }
    if k > graph.node_count() {
        return Err(DistrictError::InsufficientUnits { requested: k, available: graph.node_count() });
    }

    let mut sampler = WeightedSampler::new(graph.populations().iter().map(|&p| p.max(1)));
    let seeds = (0..k)
        .map(|_| sampler.take(rng))
        .collect::<Option<Vec<_>>>()
        .ok_or(DistrictError::InsufficientUnits { requested: k, available: graph.node_count() })?;

    debug!(?seeds, "selected seeds");
    Ok(seeds)
}
