use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableUnGraph;
use petgraph::visit::EdgeRef;

use crate::{
    EdgeLabel, UnGraph,
    cluster_blocks::parallel_edges::ParallelEdges,
    cluster_graph::{Cluster, ClusterId},
};

/// Edge of the working graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WorkEdge {
    pub label: EdgeLabel,
    /// Input edge this edge stands for, `None` for wheel-internal edges.
    pub origin: Option<EdgeIndex>,
    /// Set on the representative of a parallel group until the group is expanded again.
    pub folded: bool,
}

impl WorkEdge {
    pub fn real(origin: EdgeIndex, folded: bool) -> Self {
        WorkEdge {
            label: EdgeLabel::Real,
            origin: Some(origin),
            folded,
        }
    }

    pub fn virtual_edge() -> Self {
        WorkEdge {
            label: EdgeLabel::Virtual,
            origin: None,
            folded: false,
        }
    }
}

/// Working graph, node weights are the input vertex (`None` for wheel vertices).
///
/// Stable indices let the vertices of a tested cluster be deleted without touching the rest.
pub(crate) type WorkGraph = StableUnGraph<Option<NodeIndex>, WorkEdge>;

/// Edge of a cluster's local test graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LocalEdge {
    pub work: EdgeIndex,
    /// Endpoint outside the cluster, set for edges towards the super-sink.
    pub outside: Option<NodeIndex>,
}

/// Local test graph of one cluster, node weights are working graph vertices (`None` for the super-sink).
pub(crate) type LocalGraph = petgraph::graph::UnGraph<Option<NodeIndex>, LocalEdge>;

/// One block of a local graph, edge weights are the local edges they come from.
pub(crate) type BlockGraph = petgraph::graph::UnGraph<(), EdgeIndex>;

/// Mutable state of one run: the working graph and the current direct members of every cluster.
pub(crate) struct WorkingCopy {
    pub graph: WorkGraph,
    pub parents: Vec<Option<ClusterId>>,
    pub children: Vec<Vec<ClusterId>>,
    /// Direct members in working graph indices. Wheels of tested children are added to their parent.
    pub members: Vec<Vec<NodeIndex>>,
}

impl WorkingCopy {
    /// Copies the input graph without self-loops and without edges folded into a representative.
    ///
    /// Vertex indices of the working graph start out equal to the input ones.
    pub fn new(input: &UnGraph, clusters: Vec<Cluster>, parallel: &ParallelEdges) -> Self {
        let mut graph = WorkGraph::with_capacity(input.node_count(), input.edge_count());
        for v in input.node_indices() {
            let w = graph.add_node(Some(v));
            debug_assert_eq!(v, w);
        }
        for e in input.edge_references() {
            if e.source() == e.target() || parallel.is_parallel(e.id()) {
                continue;
            }
            let folded = parallel.group(e.id()).is_some();
            graph.add_edge(e.source(), e.target(), WorkEdge::real(e.id(), folded));
        }

        let mut parents = Vec::with_capacity(clusters.len());
        let mut children = Vec::with_capacity(clusters.len());
        let mut members = Vec::with_capacity(clusters.len());
        for cluster in clusters {
            parents.push(cluster.parent);
            children.push(cluster.children);
            members.push(cluster.nodes);
        }

        WorkingCopy {
            graph,
            parents,
            children,
            members,
        }
    }

    /// Input edges a working edge stands for, a folded representative stands for its whole group.
    pub fn origins(&self, e: EdgeIndex, parallel: &ParallelEdges) -> Vec<EdgeIndex> {
        let Some(weight) = self.graph.edge_weight(e) else {
            return Vec::new();
        };
        match weight.origin {
            Some(o) if weight.folded => parallel.group(o).map_or_else(|| vec![o], |g| g.to_vec()),
            Some(o) => vec![o],
            None => Vec::new(),
        }
    }
}
