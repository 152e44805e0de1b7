use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::{EdgeIndexable, EdgeRef, NodeIndexable};
use tracing::{debug, trace};

use crate::{
    UnGraph,
    block_cut::biconnected_components,
    cluster_blocks::{
        block_test::{BlockVerdict, do_test},
        parallel_edges::{ParallelEdges, prepare_parallel_edges},
        structures::{BlockGraph, LocalEdge, LocalGraph, WorkingCopy},
        wheel::construct_wheel_graph,
    },
    cluster_graph::{Cluster, ClusterGraph, ClusterId},
    connectivity::{first_disconnected_cluster, is_connected},
    flat_planarity::is_planar,
    pq_tree::PqTree,
    st_numbering::{is_st_numbering, st_numbering},
    types::ErrorCode,
};

/// Local graph of a cluster together with its super-sink, if the cluster has boundary edges.
struct Preparation {
    local: LocalGraph,
    sink: Option<NodeIndex>,
}

/// C-planarity test for c-connected clustered graphs.
///
/// Clusters are tested bottom-up: every cluster's local graph (its direct members, the wheels of
/// its already tested children and a super-sink standing for the outside) is tested block by
/// block with a PQ-tree, then the cluster is replaced in its parent by a wheel graph allowing
/// exactly the orders of boundary edges the test left open.
///
/// ```
/// use cluster_planarity::{ClusterGraph, ClusterPlanarityTest, EdgeLabel, ErrorCode, UnGraph};
///
/// let mut g = UnGraph::new_undirected();
/// let v: Vec<_> = (0..4).map(|i| g.add_node(i)).collect();
/// for (a, b) in [(0, 1), (1, 2), (0, 2), (2, 3)] {
///     g.add_edge(v[a], v[b], EdgeLabel::Real);
/// }
/// let mut cg = ClusterGraph::new(g);
/// cg.create_cluster(cg.root(), &[v[0], v[1], v[2]]).unwrap();
///
/// let mut test = ClusterPlanarityTest::new();
/// assert!(test.call(&cg));
/// assert_eq!(test.err_code(), ErrorCode::None);
/// ```
///
/// Reference: S. Cornelsen, D. Wagner, M. Cohen, Q.-W. Feng, P. Eades,
/// *Planarity for clustered graphs*, 1995.
#[derive(Debug, Clone, Default)]
pub struct ClusterPlanarityTest {
    err_code: ErrorCode,
    frontiers: HashMap<ClusterId, Vec<EdgeIndex>>,
}

impl ClusterPlanarityTest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classification of the last run, `ErrorCode::None` if it succeeded.
    pub fn err_code(&self) -> ErrorCode {
        self.err_code
    }

    /// Input edges leaving `cluster`, in a cyclic order admissible for a c-planar embedding.
    ///
    /// Available after a successful run for every non-root cluster that has boundary edges.
    pub fn frontier(&self, cluster: ClusterId) -> Option<&[EdgeIndex]> {
        self.frontiers.get(&cluster).map(|f| f.as_slice())
    }

    /// Tests whether `cg` is c-planar. The cluster graph is left untouched.
    pub fn call(&mut self, cg: &ClusterGraph) -> bool {
        self.reset();
        if !self.check_preconditions(cg) {
            return false;
        }
        let clusters: Vec<Cluster> = cg.cluster_ids().filter_map(|c| cg.cluster(c).cloned()).collect();
        self.run(cg.graph(), clusters)
    }

    /// Same as [`ClusterPlanarityTest::call`], but takes the cluster graph apart instead of copying it.
    pub fn call_destructive(&mut self, cg: ClusterGraph) -> bool {
        self.reset();
        if !self.check_preconditions(&cg) {
            return false;
        }
        let (graph, clusters) = cg.into_parts();
        self.run(&graph, clusters)
    }

    fn reset(&mut self) {
        self.err_code = ErrorCode::None;
        self.frontiers.clear();
    }

    fn check_preconditions(&mut self, cg: &ClusterGraph) -> bool {
        if !is_connected(cg.graph()) {
            debug!("graph is not connected");
            self.err_code = ErrorCode::NonConnected;
            return false;
        }
        if let Some(c) = first_disconnected_cluster(cg) {
            debug!("cluster {} induces a disconnected subgraph", c.index());
            self.err_code = ErrorCode::NonCConnected;
            return false;
        }
        true
    }

    fn run(&mut self, graph: &UnGraph, clusters: Vec<Cluster>) -> bool {
        let parallel = prepare_parallel_edges(graph);
        trace!("{} groups of parallel edges folded", parallel.group_count());

        let mut copy = WorkingCopy::new(graph, clusters, &parallel);
        let root = ClusterId::new(0);
        if self.planarity_test(&mut copy, &parallel, root) {
            debug!("clustered graph is c-planar");
            return true;
        }

        self.frontiers.clear();
        self.err_code = if is_planar(graph) {
            ErrorCode::NonCPlanar
        } else {
            ErrorCode::NonPlanar
        };
        debug!("clustered graph is not c-planar: {}", self.err_code);
        false
    }

    /// Tests the subtree of cluster `c` bottom-up, replacing each tested child by its wheel.
    fn planarity_test(&mut self, copy: &mut WorkingCopy, parallel: &ParallelEdges, c: ClusterId) -> bool {
        let children = copy.children[c.index()].clone();
        for child in children {
            if !self.planarity_test(copy, parallel, child) {
                return false;
            }
        }

        let is_root = copy.parents[c.index()].is_none();
        let prep = preparation(copy, c);
        let Some(kept) = test_blocks(&prep, is_root) else {
            debug!("cluster {} failed", c.index());
            return false;
        };
        trace!(
            "cluster {} passed with {} vertices and {} edges",
            c.index(),
            prep.local.node_count(),
            prep.local.edge_count()
        );

        let Some(parent) = copy.parents[c.index()] else {
            return true;
        };

        if let Some(tree) = kept {
            let frontier: Vec<EdgeIndex> = tree
                .frontier()
                .into_iter()
                .filter_map(|leaf| prep.local.edge_weight(leaf))
                .flat_map(|le| copy.origins(le.work, parallel))
                .collect();
            self.frontiers.insert(c, frontier);

            let wheel = construct_wheel_graph(&tree, &prep.local, &mut copy.graph, parallel);
            copy.members[parent.index()].extend(wheel);
        }

        for v in std::mem::take(&mut copy.members[c.index()]) {
            copy.graph.remove_node(v);
        }
        true
    }
}

/// Builds the local graph of `c`: the subgraph induced by its current direct members, plus a
/// super-sink joined once for every working edge leaving the cluster.
fn preparation(copy: &WorkingCopy, c: ClusterId) -> Preparation {
    let members = &copy.members[c.index()];
    let bound = copy.graph.node_bound();

    let mut local_id = vec![NodeIndex::end(); bound];
    let mut local = LocalGraph::with_capacity(members.len() + 1, 0);
    for &v in members {
        local_id[v.index()] = local.add_node(Some(v));
    }

    let mut seen = FixedBitSet::with_capacity(copy.graph.edge_bound());
    let mut sink = None;
    for &v in members {
        for e in copy.graph.edges(v) {
            if seen.put(e.id().index()) {
                continue;
            }
            let w = if e.source() == v { e.target() } else { e.source() };
            let (a, b, outside) = if local_id[w.index()] != NodeIndex::end() {
                (local_id[v.index()], local_id[w.index()], None)
            } else {
                let s = *sink.get_or_insert_with(|| local.add_node(None));
                (local_id[v.index()], s, Some(w))
            };
            local.add_edge(a, b, LocalEdge { work: e.id(), outside });
        }
    }

    Preparation { local, sink }
}

/// Runs the vertex addition test on every block of the local graph.
///
/// Returns `None` if some block fails, otherwise the reduced tree of the block holding the
/// super-sink (kept only for non-root clusters).
fn test_blocks(prep: &Preparation, is_root: bool) -> Option<Option<PqTree<EdgeIndex>>> {
    let local = &prep.local;
    let blocks = biconnected_components(local);
    let mut kept = None;

    for i in 0..blocks.blocks.len() {
        let nodes = blocks.block_nodes(local, i);
        let mut block_id = vec![NodeIndex::end(); local.node_count()];
        let mut block = BlockGraph::with_capacity(nodes.len(), blocks.blocks[i].len());
        for &v in &nodes {
            block_id[v.index()] = block.add_node(());
        }
        for &e in &blocks.blocks[i] {
            if let Some((s, t)) = local.edge_endpoints(e) {
                block.add_edge(block_id[s.index()], block_id[t.index()], e);
            }
        }

        let t = prep.sink.map(|s| block_id[s.index()]).filter(|&t| t != NodeIndex::end());
        let num = st_numbering(&block, t);
        debug_assert!(is_st_numbering(&block, &num));

        match do_test(&block, &num, t.is_some() && !is_root) {
            BlockVerdict::NonPlanar => {
                trace!("block {} with {} vertices is not planar", i, nodes.len());
                return None;
            }
            BlockVerdict::Frontier(tree) => {
                debug_assert!(kept.is_none(), "super-sink is a cut vertex");
                kept = Some(tree);
            }
            BlockVerdict::Planar => {}
        }
    }

    debug_assert!(is_root || prep.sink.is_none() || kept.is_some());
    Some(kept)
}

/// Tests whether `cg` is c-planar.
pub fn is_cluster_planar(cg: &ClusterGraph) -> bool {
    ClusterPlanarityTest::new().call(cg)
}

/// Tests whether `cg` is c-planar, consuming it.
pub fn is_cluster_planar_destructive(cg: ClusterGraph) -> bool {
    ClusterPlanarityTest::new().call_destructive(cg)
}
