use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::EdgeIndex;
use petgraph::visit::EdgeRef;
use radsort::sort_by_key;

use crate::UnGraph;

/// Groups of parallel input edges, each stored under its representative.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParallelEdges {
    /// Representative to the whole group, representative first and the rest in input order.
    groups: HashMap<EdgeIndex, Vec<EdgeIndex>>,
    /// Edges folded into some representative.
    is_parallel: FixedBitSet,
}

impl ParallelEdges {
    pub fn group(&self, representative: EdgeIndex) -> Option<&[EdgeIndex]> {
        self.groups.get(&representative).map(|g| g.as_slice())
    }

    pub fn is_parallel(&self, e: EdgeIndex) -> bool {
        self.is_parallel.contains(e.index())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

/// Finds every pair of vertices joined by more than one edge.
///
/// The lowest indexed edge of a group becomes its representative. Self-loops are skipped.
pub(crate) fn prepare_parallel_edges(graph: &UnGraph) -> ParallelEdges {
    let mut keyed: Vec<(u64, EdgeIndex)> = graph
        .edge_references()
        .filter(|e| e.source() != e.target())
        .map(|e| {
            let (a, b) = (e.source().index() as u64, e.target().index() as u64);
            ((a.min(b) << 32) | a.max(b), e.id())
        })
        .collect();
    // stable, so each group stays in input order
    sort_by_key(&mut keyed, |&(key, _)| key);

    let mut result = ParallelEdges {
        groups: HashMap::new(),
        is_parallel: FixedBitSet::with_capacity(graph.edge_count()),
    };

    for run in keyed.chunk_by(|a, b| a.0 == b.0) {
        if run.len() < 2 {
            continue;
        }
        let group: Vec<EdgeIndex> = run.iter().map(|&(_, e)| e).collect();
        for e in &group[1..] {
            result.is_parallel.insert(e.index());
        }
        result.groups.insert(group[0], group);
    }

    result
}
