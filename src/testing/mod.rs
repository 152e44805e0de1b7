//! Graph generators shared by the tests.

use petgraph::graph::NodeIndex;

use crate::{EdgeLabel, UnGraph};

pub(crate) mod graph_enumerator;
pub(crate) mod random_graphs;
pub(crate) mod rotation_systems;

pub(crate) fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> UnGraph {
    let mut graph = UnGraph::new_undirected();
    for i in 0..n {
        graph.add_node(i as u32);
    }
    for &(u, v) in edges {
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), EdgeLabel::Real);
    }
    graph
}

pub(crate) fn complete_graph(n: usize) -> UnGraph {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in u + 1..n {
            edges.push((u, v));
        }
    }
    graph_from_edges(n, &edges)
}

/// Grid with `rows * cols` vertices, vertex `r * cols + c` sits in row `r` and column `c`.
pub(crate) fn grid_graph(rows: usize, cols: usize) -> UnGraph {
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if r + 1 < rows {
                edges.push((r * cols + c, (r + 1) * cols + c));
            }
            if c + 1 < cols {
                edges.push((r * cols + c, r * cols + c + 1));
            }
        }
    }
    graph_from_edges(rows * cols, &edges)
}
