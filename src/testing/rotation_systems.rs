//! Brute force c-planarity by trying every rotation system of a small graph.

use fixedbitset::FixedBitSet;
use petgraph::visit::EdgeRef;

use crate::{ClusterGraph, ErrorCode};

/// All cyclic orders of `darts`, the first dart stays in front.
fn rotations(darts: &[usize]) -> Vec<Vec<usize>> {
    fn permute(items: &mut Vec<usize>, k: usize, out: &mut Vec<Vec<usize>>) {
        if k == items.len() {
            out.push(items.clone());
            return;
        }
        for i in k..items.len() {
            items.swap(k, i);
            permute(items, k + 1, out);
            items.swap(k, i);
        }
    }

    let Some((&first, rest)) = darts.split_first() else {
        return vec![Vec::new()];
    };
    let mut orders = Vec::new();
    permute(&mut rest.to_vec(), 0, &mut orders);
    orders
        .into_iter()
        .map(|order| std::iter::once(first).chain(order).collect())
        .collect()
}

/// Face of every dart in `darts`, faces being the orbits of `d -> succ[d ^ 1]`.
fn trace_faces(darts: impl Iterator<Item = usize>, succ: &[usize], face: &mut [usize]) -> usize {
    face.fill(usize::MAX);
    let mut count = 0;
    for d in darts {
        if face[d] != usize::MAX {
            continue;
        }
        let mut x = d;
        while face[x] == usize::MAX {
            face[x] = count;
            x = succ[x ^ 1];
        }
        count += 1;
    }
    count
}

/// Classifies a connected, c-connected clustered graph without multi-edges or self-loops.
///
/// Tries every rotation system. A rotation system is a planar embedding if `V - E + F = 2`, and it
/// respects a cluster `C` if every dart leaving `C` sits in the same face of `G[C]`. Exponential in
/// the degrees, meant for graphs with a handful of vertices.
pub(crate) fn brute_force_c_planarity(cg: &ClusterGraph) -> ErrorCode {
    let g = cg.graph();
    let n = g.node_count();
    let m = g.edge_count();
    if m == 0 {
        return ErrorCode::None;
    }

    // dart 2e leaves the source of e, dart 2e + 1 leaves its target
    let mut head = vec![0; 2 * m];
    let mut around = vec![Vec::new(); n];
    for e in g.edge_references() {
        let (s, t, i) = (e.source().index(), e.target().index(), e.id().index());
        head[2 * i] = t;
        head[2 * i + 1] = s;
        around[s].push(2 * i);
        around[t].push(2 * i + 1);
    }
    let tail = |d: usize| head[d ^ 1];

    let clusters: Vec<FixedBitSet> = cg
        .cluster_ids()
        .filter(|&c| c != cg.root())
        .map(|c| cg.all_nodes(c))
        .filter(|nodes| nodes.len() > 1)
        .map(|nodes| {
            let mut inside = FixedBitSet::with_capacity(n);
            for v in nodes {
                inside.insert(v.index());
            }
            inside
        })
        .collect();

    let choices: Vec<Vec<Vec<usize>>> = around.iter().map(|d| rotations(d)).collect();
    let mut pick = vec![0; n];
    let mut next = vec![0; 2 * m];
    let mut inner_next = vec![0; 2 * m];
    let mut face = vec![0; 2 * m];
    let mut planar = false;

    loop {
        for v in 0..n {
            let order = &choices[v][pick[v]];
            for (i, &d) in order.iter().enumerate() {
                next[d] = order[(i + 1) % order.len()];
            }
        }

        let faces = trace_faces(0..2 * m, &next, &mut face);
        if n + faces == m + 2 {
            planar = true;
            let respected = clusters.iter().all(|inside| {
                let is_inner = |d: usize| inside.contains(tail(d)) && inside.contains(head[d]);
                for d in (0..2 * m).filter(|&d| is_inner(d)) {
                    let mut x = next[d];
                    while !inside.contains(head[x]) {
                        x = next[x];
                    }
                    inner_next[d] = x;
                }
                trace_faces((0..2 * m).filter(|&d| is_inner(d)), &inner_next, &mut face);

                let mut outer_face = None;
                (0..2 * m)
                    .filter(|&d| inside.contains(tail(d)) && !inside.contains(head[d]))
                    .all(|d| {
                        let mut x = next[d];
                        while !inside.contains(head[x]) {
                            x = next[x];
                        }
                        *outer_face.get_or_insert(face[x]) == face[x]
                    })
            });
            if respected {
                return ErrorCode::None;
            }
        }

        let mut v = 0;
        while v < n {
            pick[v] += 1;
            if pick[v] < choices[v].len() {
                break;
            }
            pick[v] = 0;
            v += 1;
        }
        if v == n {
            break;
        }
    }

    if planar {
        ErrorCode::NonCPlanar
    } else {
        ErrorCode::NonPlanar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{complete_graph, graph_from_edges};
    use petgraph::graph::NodeIndex;

    #[test]
    fn test_rotations_fix_the_first_dart() {
        assert_eq!(rotations(&[]), vec![Vec::<usize>::new()]);
        assert_eq!(rotations(&[7]), vec![vec![7]]);
        let mut orders = rotations(&[1, 2, 3]);
        orders.sort();
        assert_eq!(orders, vec![vec![1, 2, 3], vec![1, 3, 2]]);
    }

    #[test]
    fn test_flat_classification() {
        assert_eq!(brute_force_c_planarity(&ClusterGraph::new(complete_graph(4))), ErrorCode::None);
        assert_eq!(brute_force_c_planarity(&ClusterGraph::new(complete_graph(5))), ErrorCode::NonPlanar);
    }

    #[test]
    fn test_cluster_inside_a_triangle() {
        // 3 and 4 have to sit on different sides of the triangle 0 1 2
        let g = graph_from_edges(5, &[(0, 1), (1, 2), (2, 0), (3, 0), (3, 1), (3, 2), (4, 0), (4, 1), (4, 2)]);
        assert_eq!(brute_force_c_planarity(&ClusterGraph::new(g.clone())), ErrorCode::None);

        let mut cg = ClusterGraph::new(g);
        let nodes: Vec<NodeIndex> = [0, 1, 2].into_iter().map(NodeIndex::new).collect();
        cg.create_cluster(cg.root(), &nodes).unwrap();
        assert_eq!(brute_force_c_planarity(&cg), ErrorCode::NonCPlanar);
    }
}
