use std::collections::VecDeque;

use crate::partition::Partition;

impl Partition {
    /// Check if removing `node` from its region keeps the rest of the region
    /// connected, i.e. all of its same-region neighbors still reach each other.
    pub fn check_node_contiguity(&self, node: usize) -> bool {
        assert!(node < self.num_nodes(), "node {node} out of range");
        let Some(region) = self.region(node) else { return true };

        let neighbors = self.graph().edges(node)
            .filter(|&v| self.region(v) == Some(region))
            .collect::<Vec<_>>();

        // With fewer than 2 same-region neighbors, removal cannot disconnect the region.
        if neighbors.len() <= 1 { return true }

        let mut targets = vec![false; self.num_nodes()];
        neighbors.iter().for_each(|&v| targets[v] = true);

        // BFS from one neighbor within the region, forbidding `node`.
        let mut visited = vec![false; self.num_nodes()];
        visited[node] = true;
        visited[neighbors[0]] = true;

        let mut remaining = neighbors.len() - 1;
        let mut queue = VecDeque::from([neighbors[0]]);
        while let Some(u) = queue.pop_front() {
            for v in self.graph().edges(u) {
                if !visited[v] && self.region(v) == Some(region) {
                    visited[v] = true;
                    queue.push_back(v);

                    if targets[v] { remaining -= 1; if remaining == 0 { return true } }
                }
            }
        }

        false
    }

    /// Check if the members of `region` form one connected component.
    /// An empty region counts as contiguous.
    pub fn is_region_contiguous(&self, region: u32) -> bool {
        let members = self.members(region);
        let Some(&start) = members.first() else { return true };

        let mut visited = vec![false; self.num_nodes()];
        visited[start] = true;
        let mut seen = 1;
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            for v in self.graph().edges(u) {
                if !visited[v] && self.region(v) == Some(region) {
                    visited[v] = true;
                    seen += 1;
                    queue.push_back(v);
                }
            }
        }

        seen == members.len()
    }

    /// Check if every region is contiguous.
    pub fn is_contiguous(&self) -> bool {
        (0..self.num_regions() as u32).all(|region| self.is_region_contiguous(region))
    }
}
