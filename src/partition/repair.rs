use serde::Serialize;
use tracing::{debug, info};

use crate::partition::{relative_deviation, Partition};

/// Result of boundary repair: either the local search ran, or it was not
/// applicable to this partition and the assignment was left untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RepairOutcome {
    Repaired(RepairReport),
    Skipped(RepairSkipReason),
}

impl RepairOutcome {
    /// Number of committed moves (0 when skipped).
    pub fn moves(&self) -> usize {
        match self {
            RepairOutcome::Repaired(report) => report.moves,
            RepairOutcome::Skipped(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepairReport {
    pub iterations: usize,
    pub moves: usize,
    /// Improving moves refused because they would split the donor region.
    pub contiguity_rejections: usize,
    pub initial_max_deviation: f64,
    pub final_max_deviation: f64,
    pub termination: RepairTermination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RepairTermination {
    /// A full scan of the worst region's border found no improving move.
    LocalOptimum,
    /// The iteration bound was reached first.
    IterationCap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RepairSkipReason {
    /// The iteration bound is 0.
    Disabled,
    /// There is no second region to move units into.
    SingleRegion,
    /// Total population is 0, so deviations are undefined.
    ZeroTarget,
    /// Some units are still unassigned.
    Incomplete { unassigned: usize },
}

impl Partition {
    /// Region with the highest relative deviation (ties to the lowest index).
    pub fn worst_region(&self, target: f64) -> u32 {
        let mut worst = 0;
        for region in 1..self.num_regions() as u32 {
            if self.deviation(region, target) > self.deviation(worst, target) { worst = region }
        }
        worst
    }

    /// Local search that moves border units out of the worst region while
    /// doing so strictly lowers the plan's maximum relative deviation.
    ///
    /// Each iteration scans the worst region's border units in node order,
    /// targets the lightest neighboring region, and commits the first move
    /// that improves the maximum deviation. The search ends when a scan finds
    /// nothing or after `max_iters` iterations. Only population is optimized:
    /// unless `preserve_contiguity` is set, a move may disconnect the donor.
    pub fn repair(&mut self, target: f64, max_iters: usize, preserve_contiguity: bool) -> RepairOutcome {
        if max_iters == 0 { return RepairOutcome::Skipped(RepairSkipReason::Disabled) }
        if self.num_regions() < 2 { return RepairOutcome::Skipped(RepairSkipReason::SingleRegion) }
        if target <= 0.0 { return RepairOutcome::Skipped(RepairSkipReason::ZeroTarget) }
        if !self.is_complete() {
            let unassigned = self.unassigned().len();
            return RepairOutcome::Skipped(RepairSkipReason::Incomplete { unassigned });
        }

        let mut report = RepairReport {
            iterations: 0,
            moves: 0,
            contiguity_rejections: 0,
            initial_max_deviation: self.max_deviation(target),
            final_max_deviation: 0.0,
            termination: RepairTermination::IterationCap,
        };

        while report.iterations < max_iters {
            report.iterations += 1;
            if !self.repair_step(target, preserve_contiguity, &mut report) {
                report.termination = RepairTermination::LocalOptimum;
                break;
            }
            report.moves += 1;
        }

        report.final_max_deviation = self.max_deviation(target);
        info!(
            iterations = report.iterations,
            moves = report.moves,
            before = report.initial_max_deviation,
            after = report.final_max_deviation,
            termination = ?report.termination,
            "boundary repair finished"
        );
        RepairOutcome::Repaired(report)
    }

    /// Try to commit one improving move out of the worst region.
    fn repair_step(&mut self, target: f64, preserve_contiguity: bool, report: &mut RepairReport) -> bool {
        let worst = self.worst_region(target);
        let current = self.deviation(worst, target);

        let border = self.sorted_members(worst).into_iter()
            .filter(|&node| self.is_border(node))
            .collect::<Vec<_>>();

        for node in border {
            let Some(dest) = self.graph().edges(node)
                .filter_map(|v| self.region(v))
                .filter(|&region| region != worst)
                .min_by_key(|&region| (self.region_population(region), region))
            else { continue };

            let population = self.graph().population(node);
            let donor = self.region_population(worst) - population;
            let receiver = self.region_population(dest) + population;
            let moved = (0..self.num_regions() as u32)
                .map(|region| match region {
                    r if r == worst => relative_deviation(donor, target),
                    r if r == dest => relative_deviation(receiver, target),
                    r => self.deviation(r, target),
                })
                .fold(0.0, f64::max);

            if moved >= current { continue }
            if preserve_contiguity && !self.check_node_contiguity(node) {
                report.contiguity_rejections += 1;
                continue;
            }

            debug!(node, from = worst, to = dest, max_deviation = moved, "repair move");
            self.assign(node, dest);
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::{
        graph::Graph,
        partition::{fixtures::{grid_graph, path_graph}, select_seeds},
    };

    fn report(outcome: RepairOutcome) -> RepairReport {
        match outcome {
            RepairOutcome::Repaired(report) => report,
            RepairOutcome::Skipped(reason) => panic!("repair skipped: {reason:?}"),
        }
    }

    #[test]
    fn single_improving_move_is_applied_once() {
        let mut partition = Partition::new(2, path_graph(vec![110, 10, 80]));
        partition.set_assignments(&[0, 0, 1]);

        let report = report(partition.repair(100.0, 5000, false));

        assert_eq!(report.moves, 1);
        assert_eq!(report.termination, RepairTermination::LocalOptimum);
        assert!((report.initial_max_deviation - 0.20).abs() < 1e-12);
        assert!((report.final_max_deviation - 0.10).abs() < 1e-12);
        assert_eq!(partition.region(1), Some(1));
        assert_eq!(partition.region_populations(), &[110, 90]);
    }

    #[test]
    fn only_border_units_move() {
        // Region 0 is {0, 1, 2}; 0 is interior, 2 borders region 1 = {3}.
        let mut partition = Partition::new(2, path_graph(vec![5, 60, 20, 15]));
        partition.set_assignments(&[0, 0, 0, 1]);

        let report = report(partition.repair(50.0, 5000, false));

        assert_eq!(report.moves, 1);
        assert_eq!(partition.region(0), Some(0));
        assert_eq!(partition.region(1), Some(0));
        assert_eq!(partition.region(2), Some(1));
        assert_eq!(partition.region_populations(), &[65, 35]);
    }

    #[test]
    fn iteration_cap_stops_search() {
        let mut partition = Partition::new(2, path_graph(vec![10; 10]));
        partition.set_assignments(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);

        let report = report(partition.repair(50.0, 2, false));
        assert_eq!(report.iterations, 2);
        assert_eq!(report.moves, 2);
        assert_eq!(report.termination, RepairTermination::IterationCap);
        assert_eq!(partition.region_populations(), &[70, 30]);
    }

    #[test]
    fn repair_balances_a_lopsided_path() {
        let mut partition = Partition::new(2, path_graph(vec![10; 10]));
        partition.set_assignments(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);

        let report = report(partition.repair(50.0, 5000, false));
        assert_eq!(report.final_max_deviation, 0.0);
        assert_eq!(partition.region_populations(), &[50, 50]);
        assert!(partition.is_contiguous());
    }

    #[test]
    fn contiguity_guard_rejects_cut_units() {
        // 0 - 1 - 2 in region 0, with 3 (region 1) hanging off the middle.
        let graph = Graph::new(&[vec![1], vec![0, 2, 3], vec![1], vec![1]], vec![50, 20, 50, 40]);

        let mut unguarded = Partition::new(2, graph.clone());
        unguarded.set_assignments(&[0, 0, 0, 1]);
        let free = report(unguarded.repair(80.0, 100, false));
        assert_eq!(free.moves, 1);
        assert!(!unguarded.is_region_contiguous(0));

        let mut guarded = Partition::new(2, graph);
        guarded.set_assignments(&[0, 0, 0, 1]);
        let held = report(guarded.repair(80.0, 100, true));
        assert_eq!(held.moves, 0);
        assert_eq!(held.contiguity_rejections, 1);
        assert!(guarded.is_contiguous());
    }

    #[test]
    fn never_increases_max_deviation() {
        let graph = grid_graph(8, 8, 3);
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..20 {
            let seeds = select_seeds(&graph, 5, &mut rng).unwrap();
            let mut partition = Partition::new(5, graph.clone());
            partition.seed(&seeds);
            let target = graph.total_population() as f64 / 5.0;
            partition.grow(target, 0.05);
            partition.resolve_leftovers();

            let before = partition.max_deviation(target);
            let report = report(partition.repair(target, 500, false));
            assert!(report.final_max_deviation <= before);
            assert_eq!(report.initial_max_deviation, before);
            assert_eq!(partition.region_populations().iter().sum::<u64>(), graph.total_population());
        }
    }

    #[test]
    fn skip_reasons() {
        let mut partition = Partition::new(2, path_graph(vec![1, 1, 1]));
        partition.set_assignments(&[0, 0, 1]);
        assert_eq!(partition.repair(1.5, 0, false), RepairOutcome::Skipped(RepairSkipReason::Disabled));
        assert_eq!(partition.repair(0.0, 10, false), RepairOutcome::Skipped(RepairSkipReason::ZeroTarget));

        let mut single = Partition::new(1, path_graph(vec![1, 1]));
        single.set_assignments(&[0, 0]);
        assert_eq!(single.repair(2.0, 10, false), RepairOutcome::Skipped(RepairSkipReason::SingleRegion));

        let mut partial = Partition::new(2, path_graph(vec![1, 1, 1]));
        partial.seed(&[0, 2]);
        assert_eq!(
            partial.repair(1.5, 10, false),
            RepairOutcome::Skipped(RepairSkipReason::Incomplete { unassigned: 1 })
        );
        assert_eq!(partial.repair(1.5, 10, false).moves(), 0);
    }

    #[test]
    fn worst_region_prefers_lowest_index_on_ties() {
        let mut partition = Partition::new(3, path_graph(vec![120, 100, 80]));
        partition.set_assignments(&[0, 1, 2]);
        assert_eq!(partition.worst_region(100.0), 0);
    }
}
