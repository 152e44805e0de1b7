use std::hash::Hash;

use crate::{
    pq_blocks::structures::{Mark, ReplaceTarget},
    pq_tree::{NodeKind, PqNodeId, PqTree},
};

/// Checks that marks read `Empty* Partial? Full*`, i.e. the pertinent part sits at the right end.
fn is_right_aligned(marks: &[Mark]) -> bool {
    let n = marks.len();
    let mut i = 0;
    while i < n && marks[i] == Mark::Empty {
        i += 1;
    }
    if i < n && marks[i] == Mark::Partial {
        i += 1;
    }
    while i < n && marks[i] == Mark::Full {
        i += 1;
    }
    i == n
}

impl<K: Copy + Eq + Hash> PqTree<K> {
    fn split_by_mark(&self, v: PqNodeId) -> (Vec<PqNodeId>, Vec<PqNodeId>, Vec<PqNodeId>) {
        let mut full = Vec::new();
        let mut partial = Vec::new();
        let mut empty = Vec::new();
        for &c in &self.nodes[v].children {
            match self.nodes[c].mark {
                Mark::Full => full.push(c),
                Mark::Partial => partial.push(c),
                Mark::Empty => empty.push(c),
            }
        }
        (full, partial, empty)
    }

    /// Reduces the pertinent subtree rooted at `v` bottom-up.
    ///
    /// Every partial node produced below the pertinent root is a Q-node whose
    /// full children are at its right end, so parents can splice it in directly.
    /// Returns false if no template applies.
    pub(crate) fn reduce_subtree(&mut self, v: PqNodeId, is_root: bool) -> bool {
        if self.nodes[v].kind == NodeKind::Leaf {
            self.nodes[v].mark = Mark::Full;
            if is_root {
                self.target = Some(ReplaceTarget::Node(v));
            }
            return true;
        }

        let children = self.nodes[v].children.clone();
        for c in children {
            if self.nodes[c].pertinent > 0 && !self.reduce_subtree(c, false) {
                return false;
            }
        }

        match (self.nodes[v].kind, is_root) {
            (NodeKind::P, false) => self.template_p(v),
            (NodeKind::P, true) => self.template_p_root(v),
            (NodeKind::Q, false) => self.template_q(v),
            (NodeKind::Q, true) => self.template_q_root(v),
            (NodeKind::Leaf, _) => unreachable!(),
        }
    }

    /// Templates P1, P3 and P5.
    fn template_p(&mut self, v: PqNodeId) -> bool {
        let (full, partial, empty) = self.split_by_mark(v);

        if partial.is_empty() && empty.is_empty() {
            self.nodes[v].mark = Mark::Full;
            return true;
        }

        match partial.len() {
            0 => {
                let e = self.group(empty, Mark::Empty);
                let f = self.group(full, Mark::Full);
                self.become_q(v, vec![e, f]);
            }
            1 => {
                let q = partial[0];
                let mut seq = Vec::new();
                if !empty.is_empty() {
                    seq.push(self.group(empty, Mark::Empty));
                }
                seq.extend(self.take_children(q));
                if !full.is_empty() {
                    seq.push(self.group(full, Mark::Full));
                }
                self.free_node(q);
                self.become_q(v, seq);
            }
            _ => return false,
        }

        self.nodes[v].mark = Mark::Partial;
        true
    }

    /// Templates P1, P2, P4 and P6 for the pertinent root.
    fn template_p_root(&mut self, v: PqNodeId) -> bool {
        let (full, partial, empty) = self.split_by_mark(v);

        if partial.is_empty() && empty.is_empty() {
            self.nodes[v].mark = Mark::Full;
            self.target = Some(ReplaceTarget::Node(v));
            return true;
        }

        match partial.len() {
            0 => {
                let f = self.group(full, Mark::Full);
                let mut children = empty;
                children.push(f);
                self.set_children(v, children);
                self.target = Some(ReplaceTarget::Node(f));
            }
            1 => {
                let q = partial[0];
                if !full.is_empty() {
                    let f = self.group(full, Mark::Full);
                    self.nodes[f].parent = Some(q);
                    self.nodes[q].children.push(f);
                }
                if empty.is_empty() {
                    let seq = self.take_children(q);
                    self.free_node(q);
                    self.become_q(v, seq);
                    self.target = Some(ReplaceTarget::Run(v));
                } else {
                    let mut children = empty;
                    children.push(q);
                    self.set_children(v, children);
                    self.target = Some(ReplaceTarget::Run(q));
                }
            }
            2 => {
                let (q1, q2) = (partial[0], partial[1]);
                let mut seq = self.take_children(q1);
                if !full.is_empty() {
                    seq.push(self.group(full, Mark::Full));
                }
                let mut tail = self.take_children(q2);
                tail.reverse();
                seq.extend(tail);
                self.free_node(q1);
                self.free_node(q2);

                if empty.is_empty() {
                    self.become_q(v, seq);
                    self.target = Some(ReplaceTarget::Run(v));
                } else {
                    let m = self.alloc_inner(NodeKind::Q, seq, Mark::Partial);
                    let mut children = empty;
                    children.push(m);
                    self.set_children(v, children);
                    self.target = Some(ReplaceTarget::Run(m));
                }
            }
            _ => return false,
        }

        self.nodes[v].mark = Mark::Partial;
        true
    }

    /// Templates Q1 and Q2.
    fn template_q(&mut self, v: PqNodeId) -> bool {
        let mut children = self.nodes[v].children.clone();
        let mut marks: Vec<Mark> = children.iter().map(|&c| self.nodes[c].mark).collect();

        if marks.iter().all(|&m| m == Mark::Full) {
            self.nodes[v].mark = Mark::Full;
            return true;
        }

        if !is_right_aligned(&marks) {
            children.reverse();
            marks.reverse();
            if !is_right_aligned(&marks) {
                return false;
            }
        }

        let mut seq = Vec::with_capacity(children.len() + 2);
        for (c, mark) in children.into_iter().zip(marks) {
            if mark == Mark::Partial {
                seq.extend(self.take_children(c));
                self.free_node(c);
            } else {
                seq.push(c);
            }
        }
        self.become_q(v, seq);
        self.nodes[v].mark = Mark::Partial;
        true
    }

    /// Templates Q1 and Q3 for the pertinent root.
    fn template_q_root(&mut self, v: PqNodeId) -> bool {
        let children = self.nodes[v].children.clone();
        let marks: Vec<Mark> = children.iter().map(|&c| self.nodes[c].mark).collect();

        if marks.iter().all(|&m| m == Mark::Full) {
            self.nodes[v].mark = Mark::Full;
            self.target = Some(ReplaceTarget::Node(v));
            return true;
        }

        let Some(first) = marks.iter().position(|&m| m != Mark::Empty) else {
            return false;
        };
        let last = marks.iter().rposition(|&m| m != Mark::Empty).unwrap_or(first);
        if marks[first + 1..last].iter().any(|&m| m != Mark::Full) {
            return false;
        }

        let mut seq = Vec::with_capacity(children.len() + 4);
        for (i, &c) in children.iter().enumerate() {
            if marks[i] != Mark::Partial {
                seq.push(c);
                continue;
            }
            let mut grand = self.take_children(c);
            // the left partial child keeps its full end on the right, the right one is mirrored
            if i == last && i != first {
                grand.reverse();
            }
            seq.extend(grand);
            self.free_node(c);
        }
        self.become_q(v, seq);
        self.nodes[v].mark = Mark::Partial;
        self.target = Some(ReplaceTarget::Run(v));
        true
    }
}
