use petgraph::visit::NodeIndexable;

use crate::{EdgeLabel, UnGraph};

/// Iterates over all simple graphs on `n` labelled vertices, one bit per vertex pair.
pub(crate) struct GraphEnumeratorState {
    pub n: usize,
    pub mask: usize,
    pub last_mask: usize,
}

impl GraphEnumeratorState {
    pub fn new(n: usize) -> Self {
        GraphEnumeratorState {
            n,
            mask: 0,
            last_mask: 1 << (n * n.saturating_sub(1) / 2),
        }
    }
}

impl Iterator for GraphEnumeratorState {
    type Item = UnGraph;

    fn next(&mut self) -> Option<Self::Item> {
        if self.mask == self.last_mask {
            return None;
        }

        let mut graph = UnGraph::new_undirected();
        for i in 0..self.n {
            graph.add_node(i as u32);
        }

        let mut bit = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if self.mask & (1 << bit) != 0 {
                    graph.add_edge(graph.from_index(i), graph.from_index(j), EdgeLabel::Real);
                }
                bit += 1;
            }
        }

        self.mask += 1;
        Some(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumerates_every_graph_once() {
        let graphs: Vec<UnGraph> = GraphEnumeratorState::new(4).collect();
        assert_eq!(graphs.len(), 64);
        assert_eq!(graphs[0].edge_count(), 0);
        assert_eq!(graphs[63].edge_count(), 6);
    }
}
