use std::collections::VecDeque;

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{
    cluster_blocks::{
        parallel_edges::ParallelEdges,
        structures::{LocalGraph, WorkEdge, WorkGraph},
    },
    pq_tree::{NodeKind, PqNodeId, PqTree},
};

struct WheelBuilder<'a> {
    work: &'a mut WorkGraph,
    local: &'a LocalGraph,
    parallel: &'a ParallelEdges,
    new_nodes: Vec<NodeIndex>,
}

impl WheelBuilder<'_> {
    fn add_node(&mut self) -> NodeIndex {
        let v = self.work.add_node(None);
        self.new_nodes.push(v);
        v
    }

    /// Joins `v` to the outside endpoint of the boundary edge behind a leaf.
    ///
    /// A folded representative is expanded into one edge per member of its group.
    fn connect_outside(&mut self, v: NodeIndex, leaf: EdgeIndex) {
        let Some(local_edge) = self.local.edge_weight(leaf) else {
            return;
        };
        let Some(outside) = local_edge.outside else {
            debug_assert!(false, "leaf of the kept tree is not a boundary edge");
            return;
        };
        let Some(&boundary) = self.work.edge_weight(local_edge.work) else {
            return;
        };
        let Some(origin) = boundary.origin else {
            debug_assert!(false, "boundary edge without an input edge");
            return;
        };

        match self.parallel.group(origin).filter(|_| boundary.folded) {
            Some(group) => {
                for &e in group {
                    self.work.add_edge(v, outside, WorkEdge::real(e, false));
                }
            }
            None => {
                self.work.add_edge(v, outside, WorkEdge::real(origin, false));
            }
        }
    }
}

/// Replaces a tested cluster by a graph that allows exactly the boundary edge orders of `tree`.
///
/// Walks the tree breadth-first, every node gets a corresponding vertex. A P-node's vertex
/// is a cut vertex shared by its children, a Q-node becomes a wheel whose rim holds the
/// corresponding vertex and one spoke per child in the Q-node's order. Leaves are edges to
/// the outside endpoints. Returns the new vertices, all of them belong to the parent cluster.
pub(crate) fn construct_wheel_graph(
    tree: &PqTree<EdgeIndex>,
    local: &LocalGraph,
    work: &mut WorkGraph,
    parallel: &ParallelEdges,
) -> Vec<NodeIndex> {
    let mut builder = WheelBuilder {
        work,
        local,
        parallel,
        new_nodes: Vec::new(),
    };
    let Some(root) = tree.root() else {
        return builder.new_nodes;
    };

    let correspond = builder.add_node();
    let mut queue: VecDeque<(PqNodeId, NodeIndex)> = VecDeque::from([(root, correspond)]);

    while let Some((x, c)) = queue.pop_front() {
        match tree.kind(x) {
            NodeKind::Leaf => {
                if let Some(key) = tree.key(x) {
                    builder.connect_outside(c, key);
                }
            }
            NodeKind::P => {
                for &child in tree.children(x) {
                    match tree.key(child) {
                        Some(key) => builder.connect_outside(c, key),
                        None => {
                            let w = builder.add_node();
                            builder.work.add_edge(c, w, WorkEdge::virtual_edge());
                            queue.push_back((child, w));
                        }
                    }
                }
            }
            NodeKind::Q => {
                let hub = builder.add_node();
                builder.work.add_edge(c, hub, WorkEdge::virtual_edge());
                let mut prev = c;
                for &child in tree.children(x) {
                    let spoke = builder.add_node();
                    builder.work.add_edge(hub, spoke, WorkEdge::virtual_edge());
                    builder.work.add_edge(prev, spoke, WorkEdge::virtual_edge());
                    prev = spoke;
                    match tree.key(child) {
                        Some(key) => builder.connect_outside(spoke, key),
                        None => queue.push_back((child, spoke)),
                    }
                }
                builder.work.add_edge(prev, c, WorkEdge::virtual_edge());
            }
        }
    }

    tracing::trace!("wheel graph with {} vertices", builder.new_nodes.len());
    builder.new_nodes
}
