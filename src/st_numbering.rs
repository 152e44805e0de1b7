use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

type Graph<N, E> = petgraph::graph::UnGraph<N, E>;

const NIL: usize = usize::MAX;

/// Doubly linked list over vertex ids, used to build the st-order by insertions.
#[derive(Debug, Clone)]
struct LinkedOrder {
    prev: Vec<usize>,
    next: Vec<usize>,
    head: usize,
}

impl LinkedOrder {
    fn new(n: usize, first: usize, second: usize) -> Self {
        let mut list = Self {
            prev: vec![NIL; n],
            next: vec![NIL; n],
            head: first,
        };
        list.next[first] = second;
        list.prev[second] = first;
        list
    }

    fn insert_before(&mut self, x: usize, anchor: usize) {
        let p = self.prev[anchor];
        self.prev[x] = p;
        self.next[x] = anchor;
        self.prev[anchor] = x;
        if p == NIL {
            self.head = x;
        } else {
            self.next[p] = x;
        }
    }

    fn insert_after(&mut self, x: usize, anchor: usize) {
        let n = self.next[anchor];
        self.next[x] = n;
        self.prev[x] = anchor;
        self.next[anchor] = x;
        if n != NIL {
            self.prev[n] = x;
        }
    }

    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(Some(self.head), move |&v| {
            let n = self.next[v];
            if n == NIL { None } else { Some(n) }
        })
    }
}

struct PalmSearch {
    time: usize,
    preorder: Vec<usize>,
    order: Vec<usize>,
    parent: Vec<usize>,
    // vertex with the lowest preorder reachable by tree edges and one back edge
    low: Vec<usize>,
}

/// Vertex on the explicit DFS stack, `next` indexes into its adjacency list.
struct Frame {
    u: usize,
    parent_edge: Option<usize>,
    next: usize,
}

impl PalmSearch {
    fn visit(&mut self, u: usize) {
        self.preorder[u] = self.time;
        self.order.push(u);
        self.low[u] = u;
        self.time += 1;
    }

    /// Palm tree DFS from `root` on an explicit stack.
    fn dfs(&mut self, adj: &[Vec<(usize, usize)>], root: usize, root_edge: Option<usize>) {
        self.visit(root);
        let mut stack = vec![Frame {
            u: root,
            parent_edge: root_edge,
            next: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let u = frame.u;
            let Some(&(v, e)) = adj[u].get(frame.next) else {
                stack.pop();
                if let Some(parent) = stack.last() {
                    let p = parent.u;
                    if self.preorder[self.low[u]] < self.preorder[self.low[p]] {
                        self.low[p] = self.low[u];
                    }
                }
                continue;
            };
            frame.next += 1;
            if Some(e) == frame.parent_edge {
                continue;
            }

            if self.preorder[v] == NIL {
                self.parent[v] = u;
                self.visit(v);
                stack.push(Frame {
                    u: v,
                    parent_edge: Some(e),
                    next: 0,
                });
            } else if self.preorder[v] < self.preorder[self.low[u]] {
                self.low[u] = v;
            }
        }
    }
}

/// Computes an st-numbering of a biconnected graph.
///
/// Returns `num` indexed by vertex, with values `1..=n`, such that `t` gets `n`, the chosen
/// `s` (first neighbour of `t`) gets 1, and every other vertex has both a lower and a higher
/// numbered neighbour. If `t` is `None`, vertex 0 is used.
///
/// Self-loops and multi-edges are allowed. The graph must be biconnected, otherwise the
/// result is not an st-numbering.
///
/// Reference: R. E. Tarjan, *Two streamlined depth-first search algorithms*, 1986.
pub fn st_numbering<N, E>(graph: &Graph<N, E>, t: Option<NodeIndex>) -> Vec<usize> {
    let n = graph.node_count();
    if n == 0 {
        return Vec::new();
    }
    let t = t.map_or(0, |t| t.index());
    if n == 1 {
        return vec![1];
    }

    let s = graph
        .edges(NodeIndex::new(t))
        .map(|e| if e.source().index() == t { e.target().index() } else { e.source().index() })
        .find(|&v| v != t);
    let Some(s) = s else {
        debug_assert!(false, "t has no neighbour, graph is not biconnected");
        return (1..=n).collect();
    };

    let mut ps = PalmSearch {
        time: 1,
        preorder: vec![NIL; n],
        order: Vec::with_capacity(n),
        parent: vec![NIL; n],
        low: vec![NIL; n],
    };
    // s is the root and t its only child
    ps.preorder[s] = 0;
    ps.order.push(s);
    ps.low[s] = s;
    ps.parent[t] = s;
    let st_edge = graph
        .edges(NodeIndex::new(s))
        .find(|e| e.source().index() == t || e.target().index() == t)
        .map(|e| e.id().index());
    let adj: Vec<Vec<(usize, usize)>> = graph
        .node_indices()
        .map(|u| {
            graph
                .edges(u)
                .map(|e| {
                    let v = if e.source() == u { e.target() } else { e.source() };
                    (v.index(), e.id().index())
                })
                .collect()
        })
        .collect();
    ps.dfs(&adj, t, st_edge);

    // false = '-', true = '+'
    let mut sign = vec![false; n];
    let mut list = LinkedOrder::new(n, s, t);

    for &v in ps.order.iter().skip(2) {
        let p = ps.parent[v];
        if !sign[ps.low[v]] {
            list.insert_before(v, p);
            sign[p] = true;
        } else {
            list.insert_after(v, p);
            sign[p] = false;
        }
    }

    let mut num = vec![0; n];
    for (i, v) in list.iter().enumerate() {
        num[v] = i + 1;
    }
    debug_assert!(num.iter().all(|&x| x > 0), "graph is not connected");
    num
}

/// Checks the st-numbering property, used by tests and debug assertions.
pub fn is_st_numbering<N, E>(graph: &Graph<N, E>, num: &[usize]) -> bool {
    let n = graph.node_count();
    if num.len() != n {
        return false;
    }
    let mut seen = vec![false; n + 1];
    for &x in num {
        if x == 0 || x > n || seen[x] {
            return false;
        }
        seen[x] = true;
    }

    graph.node_indices().all(|v| {
        let x = num[v.index()];
        if x == 1 || x == n {
            return true;
        }
        let neighbours: Vec<usize> = graph.neighbors(v).map(|w| num[w.index()]).collect();
        neighbours.iter().any(|&y| y < x) && neighbours.iter().any(|&y| y > x)
    })
}
