use petgraph::graph::NodeIndex;
use petgraph::visit::NodeIndexable;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::block_cut::biconnected_components;
use crate::{ClusterGraph, ClusterId, EdgeLabel, UnGraph};

/// Random connected graph: a random spanning tree plus `m - n + 1` random edges,
/// which may be loops or parallel.
pub(crate) fn random_graph(n: usize, m: usize, seed: usize) -> UnGraph {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = UnGraph::new_undirected();

    for i in 0..n {
        graph.add_node(i as u32);
        if i > 0 {
            let j = rng.random_range(0..i);
            graph.add_edge(graph.from_index(i), graph.from_index(j), EdgeLabel::Real);
        }
    }

    for _ in n.saturating_sub(1)..m {
        let s = rng.random_range(0..n);
        let t = rng.random_range(0..n);
        graph.add_edge(graph.from_index(s), graph.from_index(t), EdgeLabel::Real);
    }

    graph
}

/// Largest block of a random graph, relabelled to consecutive vertex ids.
pub(crate) fn random_biconnected_graph(n: usize, m: usize, seed: usize) -> UnGraph {
    let graph = random_graph(n, m, seed);
    let blocks = biconnected_components(&graph);

    let Some(largest) = (0..blocks.blocks.len()).max_by_key(|&i| blocks.block_nodes(&graph, i).len()) else {
        return graph;
    };

    let mut new_id = vec![usize::MAX; graph.node_count()];
    let mut block = UnGraph::new_undirected();
    for v in blocks.block_nodes(&graph, largest) {
        new_id[v.index()] = block.add_node(v.index() as u32).index();
    }
    for &e in &blocks.blocks[largest] {
        if let Some((s, t)) = graph.edge_endpoints(e) {
            block.add_edge(
                NodeIndex::new(new_id[s.index()]),
                NodeIndex::new(new_id[t.index()]),
                EdgeLabel::Real,
            );
        }
    }
    block
}

/// Random planar graph: a grid with random diagonals in some of its cells, so it stays planar.
pub(crate) fn random_planar_graph(rows: usize, cols: usize, seed: usize) -> UnGraph {
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = crate::testing::grid_graph(rows, cols);
    for r in 0..rows.saturating_sub(1) {
        for c in 0..cols.saturating_sub(1) {
            match rng.random_range(0..3) {
                0 => {
                    graph.add_edge(
                        NodeIndex::new(r * cols + c),
                        NodeIndex::new((r + 1) * cols + c + 1),
                        EdgeLabel::Real,
                    );
                }
                1 => {
                    graph.add_edge(
                        NodeIndex::new(r * cols + c + 1),
                        NodeIndex::new((r + 1) * cols + c),
                        EdgeLabel::Real,
                    );
                }
                _ => {}
            }
        }
    }
    graph
}

/// Random connected simple graph with maximum degree 4 and up to `clusters` random clusters.
///
/// Every cluster is grown breadth-first inside the direct members of a random existing cluster,
/// so the result is always c-connected.
pub(crate) fn random_clustered_graph(n: usize, extra_edges: usize, clusters: usize, seed: usize) -> ClusterGraph {
    const MAX_DEGREE: usize = 4;
    let mut rng = StdRng::seed_from_u64(seed as u64);
    let mut graph = UnGraph::new_undirected();
    let mut degree = vec![0; n];

    for i in 0..n {
        graph.add_node(i as u32);
        if i > 0 {
            // a tree always has a vertex of degree below 4
            let candidates: Vec<usize> = (0..i).filter(|&j| degree[j] < MAX_DEGREE).collect();
            let j = candidates[rng.random_range(0..candidates.len())];
            graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), EdgeLabel::Real);
            degree[i] += 1;
            degree[j] += 1;
        }
    }

    for _ in 0..extra_edges {
        let s = rng.random_range(0..n);
        let t = rng.random_range(0..n);
        if s == t || degree[s] >= MAX_DEGREE || degree[t] >= MAX_DEGREE {
            continue;
        }
        if graph.find_edge(NodeIndex::new(s), NodeIndex::new(t)).is_some() {
            continue;
        }
        graph.add_edge(NodeIndex::new(s), NodeIndex::new(t), EdgeLabel::Real);
        degree[s] += 1;
        degree[t] += 1;
    }

    let mut cg = ClusterGraph::new(graph);
    for _ in 0..clusters {
        let parent = ClusterId::new(rng.random_range(0..cg.cluster_count()));
        let members = cg.nodes(parent).to_vec();
        if members.is_empty() {
            continue;
        }
        let size = rng.random_range(1..=members.len());

        let mut chosen = vec![members[rng.random_range(0..members.len())]];
        let mut i = 0;
        while i < chosen.len() && chosen.len() < size {
            let mut neighbours: Vec<NodeIndex> = cg
                .graph()
                .neighbors(chosen[i])
                .filter(|w| members.contains(w) && !chosen.contains(w))
                .collect();
            neighbours.shuffle(&mut rng);
            for w in neighbours {
                if chosen.len() < size && !chosen.contains(&w) {
                    chosen.push(w);
                }
            }
            i += 1;
        }
        cg.create_cluster(parent, &chosen).unwrap();
    }
    cg
}
