use std::hash::Hash;

use hashbrown::HashMap;

use crate::pq_blocks::structures::{Mark, PqNode, ReplaceTarget};

pub type PqNodeId = usize;

/// Kind of a node of a [`PqTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Children may be permuted arbitrarily.
    P,
    /// Children may only be reversed.
    Q,
    Leaf,
}

/// PQ-tree of Booth and Lueker, representing a family of permissible orders of its leaves.
///
/// Each leaf carries a key of type `K` (an edge id in the planarity test). Nodes are kept in
/// an arena and addressed by [`PqNodeId`], freed slots get reused.
///
/// After [`PqTree::reduce`] returns false the tree is in an undefined state and must be dropped.
///
/// Reference: K. S. Booth, G. S. Lueker, *Testing for the consecutive ones property, interval
/// graphs, and graph planarity using PQ-tree algorithms*, 1976.
#[derive(Debug, Clone)]
pub struct PqTree<K> {
    pub(crate) nodes: Vec<PqNode<K>>,
    pub(crate) free: Vec<PqNodeId>,
    pub(crate) root: Option<PqNodeId>,
    pub(crate) leaves: HashMap<K, PqNodeId>,
    /// What the last successful reduction made consecutive.
    pub(crate) target: Option<ReplaceTarget>,
}

impl<K: Copy + Eq + Hash> PqTree<K> {
    /// Creates the universal tree over `keys`: a P-node with one leaf per key.
    pub fn new(keys: &[K]) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            leaves: HashMap::new(),
            target: None,
        };
        tree.root = tree.new_subtree(keys);
        tree
    }

    pub fn root(&self) -> Option<PqNodeId> {
        self.root
    }

    pub fn kind(&self, v: PqNodeId) -> NodeKind {
        self.nodes[v].kind
    }

    pub fn children(&self, v: PqNodeId) -> &[PqNodeId] {
        &self.nodes[v].children
    }

    pub fn key(&self, v: PqNodeId) -> Option<K> {
        self.nodes[v].key
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Keys of the leaves from left to right.
    pub fn frontier(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.leaves.len());
        let mut stack: Vec<PqNodeId> = self.root.into_iter().collect();
        while let Some(v) = stack.pop() {
            let node = &self.nodes[v];
            if let Some(key) = node.key {
                keys.push(key);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        keys
    }

    fn new_subtree(&mut self, keys: &[K]) -> Option<PqNodeId> {
        match keys {
            [] => None,
            [key] => Some(self.alloc_leaf(*key)),
            _ => {
                let leaves = keys.iter().map(|&k| self.alloc_leaf(k)).collect();
                Some(self.alloc_inner(NodeKind::P, leaves, Mark::Empty))
            }
        }
    }

    /// Restricts the tree to the orders in which the leaves of `keys` are consecutive.
    ///
    /// Returns false if no represented order has them consecutive. Unknown keys also fail
    /// the reduction.
    pub fn reduce(&mut self, keys: &[K]) -> bool {
        self.target = None;
        if keys.is_empty() {
            return true;
        }

        let mut ids = Vec::with_capacity(keys.len());
        for key in keys {
            match self.leaves.get(key) {
                Some(&id) => ids.push(id),
                None => return false,
            }
        }
        ids.sort_unstable();
        ids.dedup();

        self.clear_marks();
        for &leaf in &ids {
            let mut v = Some(leaf);
            while let Some(x) = v {
                self.nodes[x].pertinent += 1;
                v = self.nodes[x].parent;
            }
        }

        let total = ids.len();
        let mut pertinent_root = ids[0];
        while self.nodes[pertinent_root].pertinent < total {
            match self.nodes[pertinent_root].parent {
                Some(p) => pertinent_root = p,
                None => return false,
            }
        }

        self.reduce_subtree(pertinent_root, true)
    }

    /// Replaces the leaves made consecutive by the last successful [`PqTree::reduce`] with
    /// new leaves for `keys`, grouped under a P-node if there are several.
    pub fn replace_pertinent(&mut self, keys: &[K]) {
        let Some(target) = self.target.take() else {
            debug_assert!(false, "replace_pertinent called without a reduction");
            return;
        };

        match target {
            ReplaceTarget::Node(x) => {
                let parent = self.nodes[x].parent;
                let position = parent.and_then(|p| self.nodes[p].children.iter().position(|&c| c == x));
                self.free_subtree(x);
                let new = self.new_subtree(keys);

                match (parent, position) {
                    (Some(p), Some(i)) => match new {
                        Some(y) => {
                            self.nodes[p].children[i] = y;
                            self.nodes[y].parent = Some(p);
                        }
                        None => {
                            self.nodes[p].children.remove(i);
                            self.normalize(p);
                        }
                    },
                    _ => self.root = new,
                }
            }
            ReplaceTarget::Run(q) => {
                let children = self.take_children(q);
                let Some(first) = children.iter().position(|&c| self.nodes[c].mark == Mark::Full) else {
                    self.set_children(q, children);
                    return;
                };
                let last = children
                    .iter()
                    .rposition(|&c| self.nodes[c].mark == Mark::Full)
                    .unwrap_or(first);

                for &c in &children[first..=last] {
                    self.free_subtree(c);
                }
                let mut kept: Vec<PqNodeId> = children[..first].to_vec();
                kept.extend(self.new_subtree(keys));
                kept.extend_from_slice(&children[last + 1..]);
                self.set_children(q, kept);
                self.normalize(q);
            }
        }
    }
}
