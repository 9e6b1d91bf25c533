use serde::Serialize;
use smallvec::SmallVec;
use tracing::{info, warn};

use crate::partition::Partition;

/// Outcome of leftover resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeftoverReport {
    /// Units assigned by the resolver.
    pub resolved: usize,
    /// Units with no assigned neighbor, placed in the lightest region overall.
    /// These may be non-contiguous with their region.
    pub non_adjacent: usize,
}

impl Partition {
    /// Assign every unassigned node, in ascending node order, to the lightest
    /// region among its assigned neighbors (ties to the lowest region index).
    ///
    /// A node with no assigned neighbor falls back to the lightest region of
    /// all, ignoring contiguity; each such placement is logged and counted.
    pub fn resolve_leftovers(&mut self) -> LeftoverReport {
        let mut leftovers = self.unassigned().to_vec();
        leftovers.sort_unstable();

        let mut report = LeftoverReport::default();
        for node in leftovers {
            let mut candidates = self.graph().edges(node)
                .filter_map(|v| self.region(v))
                .collect::<SmallVec<[u32; 8]>>();

            if candidates.is_empty() {
                candidates.extend(0..self.num_regions() as u32);
                report.non_adjacent += 1;
                warn!(node, "leftover unit has no assigned neighbor; assigning to lightest region");
            }

            let Some(region) = candidates.into_iter()
                .min_by_key(|&region| (self.region_population(region), region))
            else { continue };

            self.assign(node, region);
            report.resolved += 1;
        }

        if report.resolved > 0 {
            info!(resolved = report.resolved, non_adjacent = report.non_adjacent, "resolved leftover units");
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::Graph, partition::fixtures::path_graph};

    #[test]
    fn isolated_node_goes_to_lighter_region() {
        let graph = Graph::new(&[vec![1], vec![0], vec![]], vec![50, 30, 7]);
        let mut partition = Partition::new(2, graph);
        partition.seed(&[0, 1]);
        partition.grow(1000.0, 0.1);

        let report = partition.resolve_leftovers();

        assert_eq!(report, LeftoverReport { resolved: 1, non_adjacent: 1 });
        assert_eq!(partition.region(2), Some(1));
        assert_eq!(partition.region_populations(), &[50, 37]);
        assert!(partition.is_complete());
    }

    #[test]
    fn adjacent_regions_are_preferred() {
        // Node 2 touches only region 0, even though region 1 is lighter.
        let graph = Graph::new(&[vec![2], vec![], vec![0]], vec![50, 5, 1]);
        let mut partition = Partition::new(2, graph);
        partition.seed(&[0, 1]);

        let report = partition.resolve_leftovers();

        assert_eq!(report, LeftoverReport { resolved: 1, non_adjacent: 0 });
        assert_eq!(partition.region(2), Some(0));
    }

    #[test]
    fn ties_go_to_lowest_region() {
        let mut partition = Partition::new(2, path_graph(vec![10, 1, 10]));
        partition.seed(&[2, 0]);

        partition.resolve_leftovers();
        assert_eq!(partition.region(1), Some(0));
    }

    #[test]
    fn earlier_leftovers_anchor_later_ones() {
        let mut partition = Partition::new(2, path_graph(vec![1, 1, 1, 1]));
        partition.seed(&[0, 3]);

        let report = partition.resolve_leftovers();
        assert_eq!(report.non_adjacent, 0);
        assert!(partition.is_complete());
        assert_eq!(partition.region_populations().iter().sum::<u64>(), 4);
    }
}
