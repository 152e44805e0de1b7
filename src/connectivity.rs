use fixedbitset::FixedBitSet;
use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;

use crate::{
    UnGraph,
    cluster_graph::{ClusterGraph, ClusterId},
};

/// Returns true if the graph is connected. Graphs with at most one vertex are connected.
pub fn is_connected(graph: &UnGraph) -> bool {
    graph.node_count() <= 1 || connected_components(graph) == 1
}

/// Returns true if the subgraph induced by `nodes` is connected.
pub fn is_induced_connected(graph: &UnGraph, nodes: &[NodeIndex]) -> bool {
    if nodes.len() <= 1 {
        return true;
    }

    let mut inside = FixedBitSet::with_capacity(graph.node_count());
    for v in nodes {
        inside.insert(v.index());
    }

    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    let mut stack = vec![nodes[0]];
    visited.insert(nodes[0].index());
    let mut reached = 1;

    while let Some(u) = stack.pop() {
        for w in graph.neighbors(u) {
            if inside.contains(w.index()) && !visited.contains(w.index()) {
                visited.insert(w.index());
                reached += 1;
                stack.push(w);
            }
        }
    }

    // duplicates in `nodes` are impossible for cluster member lists
    reached == nodes.len()
}

/// Returns the first cluster (in post-order) whose induced subgraph is disconnected.
pub fn first_disconnected_cluster(cg: &ClusterGraph) -> Option<ClusterId> {
    cg.post_order()
        .into_iter()
        .find(|&c| !is_induced_connected(cg.graph(), &cg.all_nodes(c)))
}

/// Returns true if every cluster induces a connected subgraph.
pub fn is_c_connected(cg: &ClusterGraph) -> bool {
    first_disconnected_cluster(cg).is_none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::graph_from_edges;

    #[test]
    fn test_is_connected() {
        assert!(is_connected(&graph_from_edges(0, &[])));
        assert!(is_connected(&graph_from_edges(1, &[])));
        assert!(is_connected(&graph_from_edges(3, &[(0, 1), (1, 2)])));
        assert!(!is_connected(&graph_from_edges(4, &[(0, 1), (2, 3)])));
    }

    #[test]
    fn test_c_connectivity() {
        // 0 - 1 - 2 - 3, cluster {0, 2} has no internal edge
        let g = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let n: Vec<NodeIndex> = g.node_indices().collect();
        let mut cg = ClusterGraph::new(g.clone());
        cg.create_cluster(cg.root(), &[n[0], n[1], n[2]]).unwrap();
        assert!(is_c_connected(&cg));

        let mut cg = ClusterGraph::new(g);
        let bad = cg.create_cluster(cg.root(), &[n[0], n[2]]).unwrap();
        assert_eq!(first_disconnected_cluster(&cg), Some(bad));
        assert!(!is_c_connected(&cg));
    }

    #[test]
    fn test_nested_cluster_uses_recursive_members() {
        // outer = {1, 2, 3}, inner = {2}; outer is only connected through inner's vertex
        let g = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let n: Vec<NodeIndex> = g.node_indices().collect();
        let mut cg = ClusterGraph::new(g);
        let outer = cg.create_cluster(cg.root(), &[n[1], n[2], n[3]]).unwrap();
        cg.create_cluster(outer, &[n[2]]).unwrap();
        assert!(is_c_connected(&cg));
    }
}
