use std::sync::Arc;

use crate::{graph::Graph, partition::PartitionSet};

/// Assignment of graph nodes to regions, with running region populations.
///
/// This is the single state object threaded through seeding, growth,
/// leftover resolution and repair. Region populations are maintained
/// incrementally on every move and always equal the sum of member populations.
#[derive(Debug, Clone)]
pub struct Partition {
    parts: PartitionSet,     // sets 0..k are regions, set k holds unassigned nodes
    populations: Vec<u64>,   // running population of each region
    graph: Arc<Graph>,
}

impl Partition {
    /// Construct an empty partition of `graph` into `num_regions` regions.
    pub fn new(num_regions: usize, graph: impl Into<Arc<Graph>>) -> Self {
        assert!(num_regions > 0, "num_regions must be at least 1");
        let graph: Arc<Graph> = graph.into();

        Self {
            parts: PartitionSet::new(num_regions + 1, graph.node_count()),
            populations: vec![0; num_regions],
            graph,
        }
    }

    /// Get the number of regions.
    #[inline] pub fn num_regions(&self) -> usize { self.populations.len() }

    /// Get the number of nodes in the underlying graph.
    #[inline] pub fn num_nodes(&self) -> usize { self.graph.node_count() }

    /// Get a reference to the underlying graph.
    #[inline] pub fn graph(&self) -> &Graph { &self.graph }

    /// Index of the set holding unassigned nodes.
    #[inline] fn pool(&self) -> usize { self.num_regions() }

    /// Region of a node, or `None` if it is not yet assigned.
    #[inline]
    pub fn region(&self, node: usize) -> Option<u32> {
        let set = self.parts.find(node);
        (set != self.pool()).then_some(set as u32)
    }

    /// Check whether a node has been assigned to a region.
    #[inline] pub fn is_assigned(&self, node: usize) -> bool { self.parts.find(node) != self.pool() }

    /// Members of a region, in no particular order.
    #[inline]
    pub fn members(&self, region: u32) -> &[usize] {
        assert!((region as usize) < self.num_regions(), "region {region} out of range");
        self.parts.get(region as usize)
    }

    /// Members of a region in ascending node order.
    pub fn sorted_members(&self, region: u32) -> Vec<usize> {
        let mut members = self.members(region).to_vec();
        members.sort_unstable();
        members
    }

    /// Nodes not yet assigned, in no particular order.
    #[inline] pub fn unassigned(&self) -> &[usize] { self.parts.get(self.pool()) }

    /// Check whether every node has been assigned.
    #[inline] pub fn is_complete(&self) -> bool { self.unassigned().is_empty() }

    /// Running population of a region.
    #[inline] pub fn region_population(&self, region: u32) -> u64 { self.populations[region as usize] }

    /// Running populations of all regions.
    #[inline] pub fn region_populations(&self) -> &[u64] { &self.populations }

    /// Region of every node, in node order.
    pub fn assignments(&self) -> Vec<Option<u32>> {
        (0..self.num_nodes()).map(|node| self.region(node)).collect()
    }

    /// Assign (or reassign) a node to a region, updating both region totals.
    pub fn assign(&mut self, node: usize, region: u32) {
        assert!(node < self.num_nodes(), "node {node} out of range");
        assert!((region as usize) < self.num_regions(), "region {region} out of range");

        let population = self.graph.population(node);
        if let Some(prev) = self.region(node) {
            if prev == region { return }
            self.populations[prev as usize] -= population;
        }
        self.populations[region as usize] += population;
        self.parts.move_to(node, region as usize);
    }

    /// Assign each seed node to its own region: `seeds[r]` starts region `r`.
    pub fn seed(&mut self, seeds: &[usize]) {
        assert!(seeds.len() == self.num_regions(), "expected one seed per region");
        for (region, &node) in seeds.iter().enumerate() {
            assert!(!self.is_assigned(node), "node {node} seeds more than one region");
            self.assign(node, region as u32);
        }
    }

    /// Replace the whole assignment with a complete region-per-node vector.
    pub fn set_assignments(&mut self, assignments: &[u32]) {
        assert!(assignments.len() == self.num_nodes(), "assignments.len() must equal number of nodes");
        for (node, &region) in assignments.iter().enumerate() {
            self.assign(node, region);
        }
    }

    /// Check whether a node has a neighbor outside its own region.
    pub fn is_border(&self, node: usize) -> bool {
        let region = self.region(node);
        self.graph.edges(node).any(|v| self.region(v) != region)
    }

    /// Relative deviation `|population - target| / target` of a region.
    #[inline]
    pub fn deviation(&self, region: u32, target: f64) -> f64 {
        relative_deviation(self.region_population(region), target)
    }

    /// Largest relative deviation across all regions.
    pub fn max_deviation(&self, target: f64) -> f64 {
        self.populations.iter()
            .map(|&population| relative_deviation(population, target))
            .fold(0.0, f64::max)
    }
}

/// Relative deviation of a population from a target; 0 when the target is 0.
#[inline]
pub(crate) fn relative_deviation(population: u64, target: f64) -> f64 {
    if target <= 0.0 { return 0.0 }
    (population as f64 - target).abs() / target
}
