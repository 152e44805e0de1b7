use hashbrown::HashSet;

pub(crate) const NONE: usize = usize::MAX;

/// Range of back edges sharing one side, given by its lowest and highest edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Interval {
    pub ends: Option<(usize, usize)>,
}

impl Interval {
    pub fn new(lo: usize, hi: usize) -> Self {
        Interval { ends: Some((lo, hi)) }
    }

    pub fn empty() -> Self {
        Interval { ends: None }
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_none()
    }

    pub fn lo(&self) -> usize {
        self.ends.map_or(NONE, |(lo, _)| lo)
    }

    pub fn hi(&self) -> usize {
        self.ends.map_or(NONE, |(_, hi)| hi)
    }
}

/// Two intervals that have to be placed on opposite sides.
#[derive(Debug, Clone, PartialEq)]
pub struct ConflictPair {
    pub l: Interval,
    pub r: Interval,
}

impl ConflictPair {
    pub fn empty() -> Self {
        ConflictPair {
            l: Interval::empty(),
            r: Interval::empty(),
        }
    }

    pub fn flip(&mut self) {
        std::mem::swap(&mut self.l, &mut self.r);
    }

    pub fn is_empty(&self) -> bool {
        self.l.is_empty() && self.r.is_empty()
    }

    pub fn lowest(&self, g: &LrGraph) -> usize {
        [self.l, self.r]
            .iter()
            .filter(|i| !i.is_empty())
            .map(|i| g.low1[i.lo()])
            .min()
            .unwrap_or(NONE)
    }
}

/// Simple graph in adjacency list form, with the per-edge values of the DFS orientation.
///
/// Multi-edges and self-loops are dropped when adding edges, they do not affect planarity.
#[derive(Debug, Clone)]
pub struct LrGraph {
    pub n: usize,
    pub adj: Vec<Vec<usize>>,       // indices into `edges`
    pub edges: Vec<(usize, usize)>, // oriented (source, target) after the first search

    pub low1: Vec<usize>,
    pub low2: Vec<usize>,
    pub nesting_depth: Vec<isize>,

    pub parent: Vec<Option<usize>>, // tree edge entering the vertex
    pub height: Vec<usize>,

    seen: HashSet<(usize, usize)>,
}

impl LrGraph {
    pub fn new(n: usize, m: usize) -> Self {
        LrGraph {
            n,
            adj: vec![Vec::new(); n],
            edges: Vec::with_capacity(m),
            low1: Vec::with_capacity(m),
            low2: Vec::with_capacity(m),
            nesting_depth: Vec::with_capacity(m),
            parent: vec![None; n],
            height: vec![NONE; n],
            seen: HashSet::new(),
        }
    }

    pub fn m(&self) -> usize {
        self.edges.len()
    }

    pub fn other_end(&self, eid: usize, u: usize) -> usize {
        let (s, t) = self.edges[eid];
        if s == u { t } else { s }
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        if u == v || !self.seen.insert((u.min(v), u.max(v))) {
            return;
        }
        let eid = self.edges.len();
        self.adj[u].push(eid);
        self.adj[v].push(eid);
        self.edges.push((u, v));
        self.low1.push(NONE);
        self.low2.push(NONE);
        self.nesting_depth.push(isize::MAX);
    }
}

/// State of the constraint search: the conflict pair stack and the interval links.
pub struct Constraints {
    pub stack: Vec<ConflictPair>,
    pub stack_bottom: Vec<Option<ConflictPair>>,
    pub lowpt_edge: Vec<usize>,
    pub ref_edge: Vec<usize>,
}

impl Constraints {
    pub fn new(m: usize) -> Self {
        Constraints {
            stack: Vec::new(),
            stack_bottom: vec![None; m],
            lowpt_edge: vec![0; m],
            ref_edge: vec![NONE; m],
        }
    }

    fn merge_intervals(&mut self, p: &mut Interval, q: &Interval) {
        match (p.ends.as_mut(), q.ends) {
            (Some((p_lo, _)), Some((lo, hi))) => {
                self.ref_edge[*p_lo] = hi;
                *p_lo = lo;
            }
            (None, _) => p.ends = q.ends,
            (Some(_), None) => {}
        }
    }

    /// Joins the constraints of the subtree behind `eid` with the ones already on the stack.
    ///
    /// Returns false on two intervals that would have to be on the same side and on opposite ones.
    pub fn merge(&mut self, g: &LrGraph, eid: usize) -> bool {
        let u = g.edges[eid].0;
        let Some(par_eid) = g.parent[u] else {
            return true;
        };

        let mut p = ConflictPair::empty();
        loop {
            // everything returning from the subtree of eid lies on one side of the cycle through it
            let Some(mut q) = self.stack.pop() else {
                return false;
            };
            if !q.l.is_empty() {
                q.flip();
            }
            if !q.l.is_empty() {
                return false;
            }

            let lo = q.r.lo();
            if g.low1[lo] > g.low1[par_eid] {
                self.merge_intervals(&mut p.r, &q.r);
            } else {
                self.ref_edge[lo] = self.lowpt_edge[par_eid];
            }

            if self.stack.last() == self.stack_bottom[eid].as_ref() {
                break;
            }
        }

        let conflicting = |interval: &Interval| !interval.is_empty() && g.low1[interval.hi()] > g.low1[eid];

        while let Some(top) = self.stack.last() {
            if !(conflicting(&top.l) || conflicting(&top.r)) {
                break;
            }
            let Some(mut q) = self.stack.pop() else {
                break;
            };
            if conflicting(&q.r) {
                q.flip();
            }
            if conflicting(&q.r) {
                return false;
            }
            self.merge_intervals(&mut p.r, &q.r);
            self.merge_intervals(&mut p.l, &q.l);
        }

        if !p.is_empty() {
            self.stack.push(p);
        }
        true
    }

    fn trim_interval(&mut self, p: &mut Interval, u: usize, g: &LrGraph, other: &Interval) {
        if p.is_empty() {
            return;
        }
        while p.hi() != NONE && g.edges[p.hi()].1 == u {
            p.ends = Some((p.lo(), self.ref_edge[p.hi()]));
        }
        if p.hi() == NONE {
            if !other.is_empty() {
                self.ref_edge[p.lo()] = other.lo();
            }
            *p = Interval::empty();
        }
    }

    /// Drops the back edges ending at the parent of `par_eid`'s target, they constrain nothing above.
    pub fn trim(&mut self, g: &LrGraph, par_eid: usize) {
        let u = g.edges[par_eid].0;

        while let Some(q) = self.stack.last() {
            if q.lowest(g) != g.height[u] {
                break;
            }
            self.stack.pop();
        }

        if let Some(mut p) = self.stack.pop() {
            self.trim_interval(&mut p.l, u, g, &p.r);
            self.trim_interval(&mut p.r, u, g, &p.l);
            if !p.is_empty() {
                self.stack.push(p);
            }
        }
    }
}
