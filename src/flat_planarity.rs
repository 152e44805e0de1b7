use petgraph::visit::EdgeRef;

use crate::flat_planarity_blocks::{
    lr::test_constraints,
    orientation::{orient, sort_by_nesting_depth},
    structures::{Constraints, LrGraph, NONE},
};

/// Implements the LR planarity test. The graph does not need to be connected, multi-edges and
/// self-loops are ignored.
///
/// Used to tell a non-planar input apart from a planar one without a cluster-respecting embedding.
/// The DFS passes are recursive, their depth is the height of the DFS tree.
///
/// Reference:
/// [The Left-Right Planarity Test](https://acm.math.spbu.ru/~sk1/download/papers/planar//brandes2010-planarity.pdf)
pub fn is_planar<N, E>(graph: &petgraph::graph::UnGraph<N, E>) -> bool {
    let n = graph.node_count();
    let mut g = LrGraph::new(n, graph.edge_count());
    for e in graph.edge_references() {
        g.add_edge(e.source().index(), e.target().index());
    }

    if n > 2 && g.m() > 3 * n - 6 {
        return false;
    }

    let mut roots = Vec::new();
    for u in 0..n {
        if g.height[u] == NONE {
            roots.push(u);
            g.height[u] = 0;
            orient(&mut g, u);
        }
    }

    sort_by_nesting_depth(&mut g);

    let mut constraints = Constraints::new(g.m());
    roots.into_iter().all(|u| test_constraints(&g, &mut constraints, u))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{complete_graph, graph_from_edges, grid_graph};

    fn k33() -> crate::UnGraph {
        let mut edges = Vec::new();
        for a in 0..3 {
            for b in 3..6 {
                edges.push((a, b));
            }
        }
        graph_from_edges(6, &edges)
    }

    #[test]
    fn test_small_complete_graphs() {
        for n in 0..=4 {
            assert!(is_planar(&complete_graph(n)), "K{} is planar", n);
        }
        assert!(!is_planar(&complete_graph(5)));
        assert!(!is_planar(&complete_graph(6)));
    }

    #[test]
    fn test_k33() {
        assert!(!is_planar(&k33()));
        let mut g = k33();
        g.remove_edge(petgraph::graph::EdgeIndex::new(0));
        assert!(is_planar(&g));
    }

    #[test]
    fn test_grid() {
        assert!(is_planar(&grid_graph(6, 7)));
    }

    #[test]
    fn test_multi_edges_and_loops_are_ignored() {
        let g = graph_from_edges(4, &[(0, 1), (1, 0), (0, 1), (1, 2), (2, 2), (2, 3), (3, 0), (0, 2), (1, 3)]);
        assert!(is_planar(&g));
    }

    #[test]
    fn test_disconnected() {
        // K5 plus a separate triangle
        let mut edges = Vec::new();
        for a in 0..5 {
            for b in a + 1..5 {
                edges.push((a, b));
            }
        }
        edges.extend([(5, 6), (6, 7), (7, 5)]);
        assert!(!is_planar(&graph_from_edges(8, &edges)));
        assert!(is_planar(&graph_from_edges(6, &[(0, 1), (2, 3), (3, 4), (4, 2)])));
    }

    #[test]
    fn test_petersen_graph() {
        let mut edges = Vec::new();
        for i in 0..5 {
            edges.push((i, (i + 1) % 5));
            edges.push((i, i + 5));
            edges.push((5 + i, 5 + (i + 2) % 5));
        }
        assert!(!is_planar(&graph_from_edges(10, &edges)));
    }

    #[test]
    fn test_subdivided_k5() {
        // every edge of K5 gets a middle vertex
        let mut edges = Vec::new();
        let mut next = 5;
        for a in 0..5 {
            for b in a + 1..5 {
                edges.push((a, next));
                edges.push((next, b));
                next += 1;
            }
        }
        assert!(!is_planar(&graph_from_edges(next, &edges)));
    }
}
