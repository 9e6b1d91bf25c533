use std::collections::VecDeque;

/// Undirected unit contiguity graph in compressed sparse row format,
/// with unit populations as node weights.
///
/// Node indices are stable positions in the unit store (sorted by unit id),
/// and every neighbor list is sorted, so iteration order is reproducible.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    size: usize,
    offsets: Vec<u32>,
    edges: Vec<u32>,
    populations: Vec<u64>,
}

impl Graph {
    /// Construct a graph from symmetric adjacency lists and node populations.
    pub fn new(adjacencies: &[Vec<u32>], populations: Vec<u64>) -> Self {
        assert!(adjacencies.len() == populations.len(), "adjacencies.len() must equal populations.len()");
        let size = populations.len();

        let mut edges = Vec::with_capacity(adjacencies.iter().map(Vec::len).sum());
        let mut offsets = Vec::with_capacity(size + 1);
        offsets.push(0u32);
        for (node, neighbors) in adjacencies.iter().enumerate() {
            let start = edges.len();
            edges.extend(neighbors.iter().copied());
            edges[start..].sort_unstable();
            let mut end = start;
            for k in start..edges.len() {
                assert!((edges[k] as usize) < size, "edge {node} -> {} out of range", edges[k]);
                assert!(edges[k] as usize != node, "self-loop on node {node}");
                if end == start || edges[end - 1] != edges[k] { edges[end] = edges[k]; end += 1 }
            }
            edges.truncate(end);
            offsets.push(edges.len() as u32);
        }

        let graph = Self { size, offsets, edges, populations };
        debug_assert!(
            (0..size).all(|u| graph.edges(u).all(|v| graph.contains_edge(v, u))),
            "adjacency lists must be symmetric"
        );
        graph
    }

    /// Get the number of nodes in the graph.
    #[inline] pub fn node_count(&self) -> usize { self.size }

    /// Get the number of undirected edges in the graph.
    #[inline] pub fn edge_count(&self) -> usize { self.edges.len() / 2 }

    #[inline]
    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize .. self.offsets[node + 1] as usize
    }

    /// Get the degree (number of neighbors) of a given node.
    #[inline] pub fn degree(&self, node: usize) -> usize { self.range(node).len() }

    /// Get an iterator over the neighbors of a given node, in ascending order.
    #[inline]
    pub fn edges(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.range(node).map(move |v| self.edges[v] as usize)
    }

    /// Check whether `a` and `b` are adjacent.
    #[inline]
    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.edges[self.range(a)].binary_search(&(b as u32)).is_ok()
    }

    /// Population of a node.
    #[inline] pub fn population(&self, node: usize) -> u64 { self.populations[node] }

    /// Populations of all nodes.
    #[inline] pub fn populations(&self) -> &[u64] { &self.populations }

    /// Sum of all node populations.
    pub fn total_population(&self) -> u64 { self.populations.iter().sum() }

    /// All undirected edges as `(a, b)` pairs with `a < b`, in ascending order.
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        (0..self.size)
            .flat_map(|a| self.edges(a).filter(move |&b| a < b).map(move |b| (a, b)))
            .collect()
    }

    /// Label each node with the index of its connected component.
    /// Components are numbered in order of their smallest node.
    pub fn components(&self) -> Vec<u32> {
        let mut labels = vec![u32::MAX; self.size];
        let mut next = 0;
        let mut queue = VecDeque::new();

        for root in 0..self.size {
            if labels[root] != u32::MAX { continue }
            labels[root] = next;
            queue.push_back(root);
            while let Some(u) = queue.pop_front() {
                for v in self.edges(u) {
                    if labels[v] == u32::MAX {
                        labels[v] = next;
                        queue.push_back(v);
                    }
                }
            }
            next += 1;
        }

        labels
    }

    /// Number of connected components.
    pub fn num_components(&self) -> usize {
        self.components().iter().max().map_or(0, |&max| max as usize + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_graph() -> Graph {
        Graph::new(
            &[
                vec![2, 1],       // 0
                vec![0, 2],       // 1
                vec![3, 0, 1],    // 2
                vec![2],          // 3
            ],
            vec![10, 20, 30, 40],
        )
    }

    #[test]
    fn csr_graph_construction() {
        let graph = make_test_graph();

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);

        // Offsets are cumulative neighbor counts, len = nodes + 1
        assert_eq!(graph.offsets, vec![0, 2, 4, 7, 8]);

        // Neighbor lists are sorted within each row
        assert_eq!(graph.edges, vec![1, 2, 0, 2, 0, 1, 3, 2]);
        for window in graph.offsets.windows(2) { assert!(window[0] <= window[1]) }
    }

    #[test]
    fn degree_and_neighbors() {
        let graph = make_test_graph();

        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(2), 3);
        assert_eq!(graph.degree(3), 1);
        assert_eq!(graph.edges(2).collect::<Vec<_>>(), vec![0, 1, 3]);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let graph = make_test_graph();
        for (a, b) in graph.edge_pairs() {
            assert!(graph.contains_edge(a, b));
            assert!(graph.contains_edge(b, a));
        }
        assert!(!graph.contains_edge(0, 3));
    }

    #[test]
    fn duplicate_neighbors_collapse() {
        let graph = Graph::new(&[vec![1, 1], vec![0, 0]], vec![1, 1]);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(0), 1);
    }

    #[test]
    fn populations_and_total() {
        let graph = make_test_graph();
        assert_eq!(graph.population(3), 40);
        assert_eq!(graph.total_population(), 100);
    }

    #[test]
    fn components_with_isolated_node() {
        let graph = Graph::new(&[vec![1], vec![0], vec![]], vec![5, 5, 5]);
        assert_eq!(graph.components(), vec![0, 0, 1]);
        assert_eq!(graph.num_components(), 2);
    }

    #[test]
    fn empty_graph_is_valid() {
        let graph = Graph::new(&[], vec![]);

        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.offsets, vec![0]);
        assert_eq!(graph.num_components(), 0);
    }

    #[test]
    #[should_panic(expected = "adjacencies.len() must equal populations.len()")]
    fn new_panics_when_lengths_mismatch() {
        Graph::new(&[vec![]], vec![]);
    }

    #[test]
    #[should_panic(expected = "self-loop on node 0")]
    fn new_panics_on_self_loop() {
        Graph::new(&[vec![0]], vec![1]);
    }

    #[test]
    #[should_panic]
    fn degree_panics_for_out_of_bounds_node() {
        let graph = make_test_graph();
        graph.degree(graph.node_count());
    }
}
