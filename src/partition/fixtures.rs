use crate::graph::Graph;

/// Path graph `0 - 1 - ... - n-1` with the given populations.
pub(crate) fn path_graph(populations: Vec<u64>) -> Graph {
    let n = populations.len();
    let adjacencies = (0..n)
        .map(|i| {
            let mut neighbors = Vec::new();
            if i > 0 { neighbors.push(i as u32 - 1) }
            if i + 1 < n { neighbors.push(i as u32 + 1) }
            neighbors
        })
        .collect::<Vec<_>>();
    Graph::new(&adjacencies, populations)
}

/// `rows` x `cols` rook grid, node `r * cols + c`, uniform population.
pub(crate) fn grid_graph(rows: usize, cols: usize, population: u64) -> Graph {
    let adjacencies = (0..rows * cols)
        .map(|i| {
            let (r, c) = (i / cols, i % cols);
            let mut neighbors = Vec::new();
            if r > 0 { neighbors.push((i - cols) as u32) }
            if c > 0 { neighbors.push((i - 1) as u32) }
            if c + 1 < cols { neighbors.push((i + 1) as u32) }
            if r + 1 < rows { neighbors.push((i + cols) as u32) }
            neighbors
        })
        .collect::<Vec<_>>();
    Graph::new(&adjacencies, vec![population; rows * cols])
}
