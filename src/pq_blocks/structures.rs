use std::hash::Hash;

use crate::pq_tree::{NodeKind, PqNodeId, PqTree};

/// Label given to a node during a reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mark {
    Empty,
    Partial,
    Full,
}

/// Part of the tree that a successful reduction made consecutive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReplaceTarget {
    /// The whole subtree of the node is full.
    Node(PqNodeId),
    /// The full children of this Q-node form one consecutive run.
    Run(PqNodeId),
}

#[derive(Debug, Clone)]
pub(crate) struct PqNode<K> {
    pub kind: NodeKind,
    pub key: Option<K>,
    /// For Q-nodes the order matters, for P-nodes it does not.
    pub children: Vec<PqNodeId>,
    pub parent: Option<PqNodeId>,
    pub mark: Mark,
    pub pertinent: usize, // pertinent leaves in the subtree, valid during a reduction
}

impl<K: Copy + Eq + Hash> PqTree<K> {
    fn alloc(&mut self, node: PqNode<K>) -> PqNodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id] = node;
            id
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    pub(crate) fn alloc_leaf(&mut self, key: K) -> PqNodeId {
        let id = self.alloc(PqNode {
            kind: NodeKind::Leaf,
            key: Some(key),
            children: Vec::new(),
            parent: None,
            mark: Mark::Empty,
            pertinent: 0,
        });
        self.leaves.insert(key, id);
        id
    }

    pub(crate) fn alloc_inner(&mut self, kind: NodeKind, children: Vec<PqNodeId>, mark: Mark) -> PqNodeId {
        debug_assert!(kind != NodeKind::Leaf);
        let id = self.alloc(PqNode {
            kind,
            key: None,
            children: Vec::new(),
            parent: None,
            mark,
            pertinent: 0,
        });
        self.set_children(id, children);
        id
    }

    pub(crate) fn set_children(&mut self, v: PqNodeId, children: Vec<PqNodeId>) {
        for &c in &children {
            self.nodes[c].parent = Some(v);
        }
        self.nodes[v].children = children;
    }

    /// Detaches and returns the children of `v`, their parent links are fixed by the caller.
    pub(crate) fn take_children(&mut self, v: PqNodeId) -> Vec<PqNodeId> {
        std::mem::take(&mut self.nodes[v].children)
    }

    /// Turns `v` into a Q-node with the given children, keeping its place in the tree.
    pub(crate) fn become_q(&mut self, v: PqNodeId, children: Vec<PqNodeId>) {
        self.nodes[v].kind = NodeKind::Q;
        self.set_children(v, children);
    }

    /// Groups nodes under a new P-node, a single node is returned as is.
    pub(crate) fn group(&mut self, nodes: Vec<PqNodeId>, mark: Mark) -> PqNodeId {
        debug_assert!(!nodes.is_empty());
        if nodes.len() == 1 {
            nodes[0]
        } else {
            self.alloc_inner(NodeKind::P, nodes, mark)
        }
    }

    pub(crate) fn free_node(&mut self, v: PqNodeId) {
        let node = &mut self.nodes[v];
        if let Some(key) = node.key.take() {
            if self.leaves.get(&key) == Some(&v) {
                self.leaves.remove(&key);
            }
        }
        node.children.clear();
        node.parent = None;
        self.free.push(v);
    }

    pub(crate) fn free_subtree(&mut self, v: PqNodeId) {
        let mut stack = vec![v];
        while let Some(x) = stack.pop() {
            stack.extend(self.nodes[x].children.iter().copied());
            self.free_node(x);
        }
    }

    /// Puts `new` where `old` was, either in the parent's child list or as the root.
    pub(crate) fn replace_in_parent(&mut self, old: PqNodeId, new: PqNodeId) {
        let parent = self.nodes[old].parent;
        self.nodes[new].parent = parent;
        match parent {
            Some(p) => {
                if let Some(slot) = self.nodes[p].children.iter_mut().find(|c| **c == old) {
                    *slot = new;
                }
            }
            None => self.root = Some(new),
        }
        self.nodes[old].parent = None;
    }

    /// Restores the shape invariants upwards from `v` after children were removed:
    /// inner nodes without children disappear, a single child takes its parent's place
    /// and a Q-node with two children is the same as a P-node.
    pub(crate) fn normalize(&mut self, mut v: PqNodeId) {
        loop {
            if self.nodes[v].kind == NodeKind::Leaf {
                return;
            }
            let parent = self.nodes[v].parent;
            match self.nodes[v].children.len() {
                0 => {
                    self.free_node(v);
                    match parent {
                        Some(p) => {
                            self.nodes[p].children.retain(|&c| c != v);
                            v = p;
                        }
                        None => {
                            self.root = None;
                            return;
                        }
                    }
                }
                1 => {
                    let child = self.nodes[v].children[0];
                    self.replace_in_parent(v, child);
                    self.nodes[v].children.clear();
                    self.free_node(v);
                    return;
                }
                2 => {
                    self.nodes[v].kind = NodeKind::P;
                    return;
                }
                _ => return,
            }
        }
    }

    /// Resets marks and pertinent counters of every node.
    pub(crate) fn clear_marks(&mut self) {
        for node in self.nodes.iter_mut() {
            node.mark = Mark::Empty;
            node.pertinent = 0;
        }
    }
}
