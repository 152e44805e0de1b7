use petgraph::graph::NodeIndex;
use thiserror::Error;

use crate::UnGraph;

/// Identifier of a cluster inside a [`ClusterGraph`]. The root always has index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    pub fn new(index: usize) -> Self {
        ClusterId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Errors raised while building a cluster hierarchy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClusterGraphError {
    #[error("cluster {0:?} does not exist")]
    UnknownCluster(ClusterId),
    #[error("node {0:?} does not exist in the underlying graph")]
    UnknownNode(NodeIndex),
    #[error("node {node:?} is not a direct member of cluster {cluster:?}")]
    NotDirectMember { node: NodeIndex, cluster: ClusterId },
}

/// One record of the cluster tree.
#[derive(Debug, Clone, Default)]
pub struct Cluster {
    pub parent: Option<ClusterId>,
    pub children: Vec<ClusterId>,
    /// Direct members only, nodes of child clusters are not listed here.
    pub nodes: Vec<NodeIndex>,
}

/// A graph together with a rooted tree of clusters over its vertices.
///
/// Every vertex is a direct member of exactly one cluster, so the clusters form
/// a laminar family and the root contains (recursively) all vertices.
///
/// ```
/// use cluster_planarity::{EdgeLabel, UnGraph, cluster_graph::ClusterGraph};
///
/// let mut g = UnGraph::new_undirected();
/// let a = g.add_node(0);
/// let b = g.add_node(1);
/// let c = g.add_node(2);
/// g.add_edge(a, b, EdgeLabel::Real);
/// g.add_edge(b, c, EdgeLabel::Real);
///
/// let mut cg = ClusterGraph::new(g);
/// let inner = cg.create_cluster(cg.root(), &[a, b]).unwrap();
/// assert_eq!(cg.parent(inner), Some(cg.root()));
/// assert_eq!(cg.all_nodes(cg.root()).len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ClusterGraph {
    graph: UnGraph,
    clusters: Vec<Cluster>,
    node_cluster: Vec<ClusterId>,
}

impl ClusterGraph {
    /// Creates a cluster graph with a single root cluster holding every vertex.
    pub fn new(graph: UnGraph) -> Self {
        let root = Cluster {
            parent: None,
            children: Vec::new(),
            nodes: graph.node_indices().collect(),
        };
        let node_cluster = vec![ClusterId(0); graph.node_count()];

        ClusterGraph {
            graph,
            clusters: vec![root],
            node_cluster,
        }
    }

    pub fn graph(&self) -> &UnGraph {
        &self.graph
    }

    pub fn root(&self) -> ClusterId {
        ClusterId(0)
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn cluster_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        (0..self.clusters.len()).map(ClusterId)
    }

    pub fn cluster(&self, c: ClusterId) -> Option<&Cluster> {
        self.clusters.get(c.0)
    }

    pub fn parent(&self, c: ClusterId) -> Option<ClusterId> {
        self.clusters.get(c.0).and_then(|cl| cl.parent)
    }

    pub fn children(&self, c: ClusterId) -> &[ClusterId] {
        self.clusters
            .get(c.0)
            .map_or(&[][..], |cl| cl.children.as_slice())
    }

    /// Direct members of `c`.
    pub fn nodes(&self, c: ClusterId) -> &[NodeIndex] {
        self.clusters
            .get(c.0)
            .map_or(&[][..], |cl| cl.nodes.as_slice())
    }

    /// All vertices of the subtree rooted at `c`.
    pub fn all_nodes(&self, c: ClusterId) -> Vec<NodeIndex> {
        let mut result = Vec::new();
        let mut stack = vec![c];
        while let Some(cur) = stack.pop() {
            if let Some(cl) = self.clusters.get(cur.0) {
                result.extend_from_slice(&cl.nodes);
                stack.extend(cl.children.iter().copied());
            }
        }
        result
    }

    /// Cluster that has `v` as a direct member.
    pub fn cluster_of(&self, v: NodeIndex) -> Option<ClusterId> {
        self.node_cluster.get(v.index()).copied()
    }

    /// Depth of `c` in the cluster tree, the root has depth 0.
    pub fn depth(&self, c: ClusterId) -> usize {
        let mut depth = 0;
        let mut cur = c;
        while let Some(p) = self.parent(cur) {
            depth += 1;
            cur = p;
        }
        depth
    }

    /// Clusters in post-order, children before their parent.
    pub fn post_order(&self) -> Vec<ClusterId> {
        fn visit(cg: &ClusterGraph, c: ClusterId, out: &mut Vec<ClusterId>) {
            for &child in cg.children(c) {
                visit(cg, child, out);
            }
            out.push(c);
        }

        let mut order = Vec::with_capacity(self.clusters.len());
        visit(self, self.root(), &mut order);
        order
    }

    /// Creates a new child of `parent` and moves `nodes` into it.
    ///
    /// Every node has to be a direct member of `parent`, which keeps the family laminar.
    pub fn create_cluster(
        &mut self,
        parent: ClusterId,
        nodes: &[NodeIndex],
    ) -> Result<ClusterId, ClusterGraphError> {
        if parent.0 >= self.clusters.len() {
            return Err(ClusterGraphError::UnknownCluster(parent));
        }
        for (i, &v) in nodes.iter().enumerate() {
            if v.index() >= self.node_cluster.len() {
                return Err(ClusterGraphError::UnknownNode(v));
            }
            // a repeated node would be moved twice
            if self.node_cluster[v.index()] != parent || nodes[..i].contains(&v) {
                return Err(ClusterGraphError::NotDirectMember {
                    node: v,
                    cluster: parent,
                });
            }
        }

        let id = ClusterId(self.clusters.len());
        self.clusters[parent.0]
            .nodes
            .retain(|v| !nodes.contains(v));
        self.clusters[parent.0].children.push(id);
        for &v in nodes {
            self.node_cluster[v.index()] = id;
        }
        self.clusters.push(Cluster {
            parent: Some(parent),
            children: Vec::new(),
            nodes: nodes.to_vec(),
        });

        Ok(id)
    }

    pub(crate) fn into_parts(self) -> (UnGraph, Vec<Cluster>) {
        (self.graph, self.clusters)
    }
}
