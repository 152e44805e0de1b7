use crate::flat_planarity_blocks::structures::{LrGraph, NONE};

/// First search: orients the edges along a DFS and computes lowpoints and nesting depths.
pub fn orient(g: &mut LrGraph, u: usize) {
    let incident = g.adj[u].clone();

    for eid in incident {
        if g.low1[eid] != NONE {
            // already oriented from the other end
            continue;
        }

        let to = g.other_end(eid, u);
        if g.edges[eid].0 == to {
            g.edges[eid] = (u, to);
        }

        g.low1[eid] = g.height[u];
        g.low2[eid] = g.height[u];

        if g.height[to] == NONE {
            g.parent[to] = Some(eid);
            g.height[to] = g.height[u] + 1;
            orient(g, to);
        } else {
            g.low1[eid] = g.height[to];
        }

        g.nesting_depth[eid] = 2 * g.low1[eid] as isize;
        if g.low2[eid] < g.height[u] {
            // chordal
            g.nesting_depth[eid] += 1;
        }

        if let Some(par) = g.parent[u] {
            if g.low1[eid] < g.low1[par] {
                g.low2[par] = g.low1[par].min(g.low2[eid]);
                g.low1[par] = g.low1[eid];
            } else if g.low1[eid] != g.low1[par] {
                g.low2[par] = g.low2[par].min(g.low1[eid]);
            } else {
                g.low2[par] = g.low2[par].min(g.low2[eid]);
            }
        }
    }
}

/// Rebuilds outgoing adjacency lists ordered by nesting depth, with a bucket sort.
pub fn sort_by_nesting_depth(g: &mut LrGraph) {
    if g.n == 0 {
        return;
    }
    let offset = 2 * (g.n - 1) + 1;
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); 2 * offset + 1];

    for eid in 0..g.m() {
        let depth = offset as isize + g.nesting_depth[eid];
        buckets[depth as usize].push(eid);
    }

    let mut adj = vec![Vec::new(); g.n];
    for eid in buckets.into_iter().flatten() {
        adj[g.edges[eid].0].push(eid);
    }
    g.adj = adj;
}
