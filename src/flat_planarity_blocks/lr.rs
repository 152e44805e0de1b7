use crate::flat_planarity_blocks::structures::{ConflictPair, Constraints, Interval, LrGraph};

/// Second search: collects the left/right constraints of back edges bottom-up.
///
/// Returns false as soon as two constraints contradict each other.
pub fn test_constraints(g: &LrGraph, c: &mut Constraints, u: usize) -> bool {
    for (i, &eid) in g.adj[u].iter().enumerate() {
        let to = g.other_end(eid, u);
        c.stack_bottom[eid] = c.stack.last().cloned();

        if g.parent[to] == Some(eid) {
            if !test_constraints(g, c, to) {
                return false;
            }
        } else {
            c.lowpt_edge[eid] = eid;
            c.stack.push(ConflictPair {
                l: Interval::empty(),
                r: Interval::new(eid, eid),
            });
        }

        if g.low1[eid] < g.height[u] {
            let Some(par_eid) = g.parent[u] else {
                continue;
            };
            if i == 0 {
                c.lowpt_edge[par_eid] = c.lowpt_edge[eid];
            } else if !c.merge(g, eid) {
                return false;
            }
        }
    }

    if let Some(par_eid) = g.parent[u] {
        c.trim(g, par_eid);
        let to = g.other_end(par_eid, u);

        if g.low1[par_eid] < g.height[to] {
            if let Some(top) = c.stack.last() {
                let (hl, hr) = (top.l.ends.map(|(_, h)| h), top.r.ends.map(|(_, h)| h));
                let highest = match (hl, hr) {
                    (Some(hl), Some(hr)) if g.low1[hl] > g.low1[hr] => Some(hl),
                    (Some(_), Some(hr)) => Some(hr),
                    (Some(hl), None) => Some(hl),
                    (None, hr) => hr,
                };
                if let Some(h) = highest {
                    c.ref_edge[par_eid] = h;
                }
            }
        }
    }

    true
}
