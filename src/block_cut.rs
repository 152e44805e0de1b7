use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

/// Undirected petgraph graph with arbitrary weights, the blocks algorithm does not look at them.
type Graph<N, E> = petgraph::graph::UnGraph<N, E>;

/// Biconnected components of a graph, each given by the set of its edges.
///
/// A block is defined by edges, this way cut vertices can belong to several blocks
/// without any special treatment. Self-loops belong to no block.
#[derive(Debug, Clone)]
pub struct Blocks {
    pub blocks: Vec<Vec<EdgeIndex>>,
    /// Marks vertices that are cut vertices of the graph.
    pub is_cut: Vec<bool>,
}

impl Blocks {
    /// Distinct vertices of block `i`, in order of first appearance.
    pub fn block_nodes<N, E>(&self, graph: &Graph<N, E>, i: usize) -> Vec<NodeIndex> {
        let mut seen = vec![false; graph.node_count()];
        let mut nodes = Vec::new();
        for &e in &self.blocks[i] {
            if let Some((s, t)) = graph.edge_endpoints(e) {
                for v in [s, t] {
                    if !seen[v.index()] {
                        seen[v.index()] = true;
                        nodes.push(v);
                    }
                }
            }
        }
        nodes
    }
}

struct BlockSearch {
    time: usize,
    preorder: Vec<usize>,
    vertex_stack: Vec<usize>,
    blocks: Vec<Vec<EdgeIndex>>,
    is_cut: Vec<bool>,
}

/// Vertex on the explicit DFS stack.
struct Frame {
    u: usize,
    parent_edge: Option<EdgeIndex>,
    next: usize,
    /// Lowest preorder reachable from the subtree of u [lowpoint].
    low: usize,
    is_potential_cut: bool,
}

impl BlockSearch {
    fn enter(&mut self, u: usize, parent_edge: Option<EdgeIndex>) -> Frame {
        self.preorder[u] = self.time;
        self.time += 1;
        self.vertex_stack.push(u);
        Frame {
            u,
            parent_edge,
            next: 0,
            low: self.preorder[u],
            is_potential_cut: parent_edge.is_some(),
        }
    }

    /// Called on `parent` once its tree child `v` with lowpoint `low_v` is finished.
    fn child_done<N, E>(&mut self, graph: &Graph<N, E>, parent: &mut Frame, v: usize, low_v: usize) {
        let u = parent.u;
        parent.low = parent.low.min(low_v);
        if low_v >= self.preorder[u] {
            if parent.is_potential_cut {
                self.is_cut[u] = true;
            }
            // everything above u on the stack forms a block together with u
            let mut block = Vec::new();
            while let Some(w) = self.vertex_stack.pop() {
                collect_lower_edges(graph, w, &self.preorder, &mut block);
                if w == v {
                    break;
                }
            }
            self.blocks.push(block);
        }
        // if in root this will handle >2 dfs tree children case
        parent.is_potential_cut = true;
    }

    fn dfs<N, E>(&mut self, graph: &Graph<N, E>, adj: &[Vec<(usize, EdgeIndex)>], root: usize) {
        let mut stack = vec![self.enter(root, None)];

        while let Some(frame) = stack.last_mut() {
            let u = frame.u;
            let Some(&(v, e)) = adj[u].get(frame.next) else {
                let low_u = frame.low;
                stack.pop();
                if let Some(parent) = stack.last_mut() {
                    self.child_done(graph, parent, u, low_u);
                }
                continue;
            };
            frame.next += 1;
            if Some(e) == frame.parent_edge || v == u {
                continue;
            }

            if self.preorder[v] == usize::MAX {
                let child = self.enter(v, Some(e));
                stack.push(child);
            } else {
                // back edge, or the second copy of a multi-edge towards the parent
                frame.low = frame.low.min(self.preorder[v]);
            }
        }
    }
}

/// Pushes the edges from `w` towards already discovered vertices of lower preorder.
///
/// Every edge of a block is seen exactly once this way, from its deeper endpoint.
fn collect_lower_edges<N, E>(graph: &Graph<N, E>, w: usize, preorder: &[usize], block: &mut Vec<EdgeIndex>) {
    for e in graph.edges(NodeIndex::new(w)) {
        let x = if e.source().index() == w { e.target().index() } else { e.source().index() };
        if preorder[x] < preorder[w] {
            block.push(e.id());
        }
    }
}

/// Computes the biconnected components of a graph (which does not need to be connected).
pub fn biconnected_components<N, E>(graph: &Graph<N, E>) -> Blocks {
    let n = graph.node_count();
    let mut st = BlockSearch {
        time: 0,
        preorder: vec![usize::MAX; n],
        vertex_stack: Vec::with_capacity(n),
        blocks: Vec::new(),
        is_cut: vec![false; n],
    };

    let adj: Vec<Vec<(usize, EdgeIndex)>> = graph
        .node_indices()
        .map(|u| {
            graph
                .edges(u)
                .map(|e| {
                    let v = if e.source() == u { e.target() } else { e.source() };
                    (v.index(), e.id())
                })
                .collect()
        })
        .collect();

    for u in 0..n {
        if st.preorder[u] == usize::MAX {
            st.dfs(graph, &adj, u);
            st.vertex_stack.clear();
        }
    }

    Blocks {
        blocks: st.blocks,
        is_cut: st.is_cut,
    }
}
