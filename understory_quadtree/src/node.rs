// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree nodes and the arena that owns them.
//!
//! Nodes carry structure only: a rectangle, four child slots, a parent link,
//! and the objects stored directly at the node. All split/merge policy lives
//! in [`QuadTree`](crate::QuadTree).

use alloc::vec::Vec;
use kurbo::Rect;

use crate::arena::Arena;
use crate::types::{NodeId, ObjectId, Quadrant};

#[derive(Clone, Debug)]
pub(crate) struct Node {
    rect: Rect,
    parent: Option<NodeId>,
    children: [Option<NodeId>; 4],
    pub(crate) objects: Vec<ObjectId>,
}

impl Node {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            parent: None,
            children: [None; 4],
            objects: Vec::new(),
        }
    }

    pub(crate) fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub(crate) fn child(&self, q: Quadrant) -> Option<NodeId> {
        self.children[q.index()]
    }

    /// Children are all-or-nothing, so the first slot decides.
    pub(crate) fn has_children(&self) -> bool {
        self.children[Quadrant::NorthWest.index()].is_some()
    }

    /// All four children, or `None` for a leaf.
    pub(crate) fn children(&self) -> Option<[NodeId; 4]> {
        if !self.has_children() {
            return None;
        }
        let [nw, ne, sw, se] = self.children;
        Some([
            nw.expect("child slots are all-or-nothing"),
            ne.expect("child slots are all-or-nothing"),
            sw.expect("child slots are all-or-nothing"),
            se.expect("child slots are all-or-nothing"),
        ])
    }
}

/// Owner of every node of one tree.
#[derive(Clone, Debug, Default)]
pub(crate) struct Nodes {
    arena: Arena<Node>,
}

impl Nodes {
    pub(crate) fn alloc(&mut self, rect: Rect) -> NodeId {
        self.arena.insert(Node::new(rect))
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        self.arena.get(id).expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        self.arena.get_mut(id).expect("dangling NodeId")
    }

    pub(crate) fn len(&self) -> usize {
        self.arena.len()
    }

    pub(crate) fn clear(&mut self) {
        self.arena.clear();
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.arena.iter::<NodeId>()
    }

    /// Install `child` in `parent`'s slot `q` and point it back at `parent`.
    ///
    /// Passing `None` empties the slot without touching the previous child;
    /// detaching that child is a separate step.
    pub(crate) fn set_child(&mut self, parent: NodeId, q: Quadrant, child: Option<NodeId>) {
        self.get_mut(parent).children[q.index()] = child;
        if let Some(c) = child {
            self.get_mut(c).parent = Some(parent);
        }
    }

    /// Clear the parent link of `id`, making it a detached subtree root.
    pub(crate) fn detach(&mut self, id: NodeId) {
        self.get_mut(id).parent = None;
    }

    /// Create the four quarters of `id` around its center. `id` must be a leaf.
    pub(crate) fn subdivide(&mut self, id: NodeId) -> [NodeId; 4] {
        let rect = self.get(id).rect;
        debug_assert!(!self.get(id).has_children(), "subdivide on an internal node");
        let split = rect.center();
        Quadrant::ALL.map(|q| {
            let child = self.alloc(q.sub_rect(rect, split));
            self.set_child(id, q, Some(child));
            child
        })
    }

    /// Node ids of the subtree under `id`, excluding `id` itself.
    pub(crate) fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.get(id).children().into_iter().flatten().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.get(n).children().into_iter().flatten());
        }
        out
    }

    /// Free `id` and its whole subtree. Objects stored there must have been moved out.
    pub(crate) fn free_subtree(&mut self, id: NodeId) {
        let mut doomed = self.descendants(id);
        doomed.push(id);
        for n in doomed {
            let node = self.arena.remove(n).expect("dangling NodeId");
            debug_assert!(node.objects.is_empty(), "freed a node that still holds objects");
        }
    }

    /// Free the children of `id` and their subtrees, turning `id` into a leaf.
    pub(crate) fn free_children(&mut self, id: NodeId) {
        let Some(children) = self.get(id).children() else {
            return;
        };
        for (q, c) in Quadrant::ALL.into_iter().zip(children) {
            self.set_child(id, q, None);
            self.detach(c);
            self.free_subtree(c);
        }
    }

    /// Total objects stored under `id`, counting at most up to `limit + 1`.
    ///
    /// Returns `true` once the subtree is known to hold more than `limit`.
    pub(crate) fn subtree_exceeds(&self, id: NodeId, limit: usize) -> bool {
        let mut total = 0_usize;
        let mut stack = Vec::from([id]);
        while let Some(n) = stack.pop() {
            let node = self.get(n);
            total += node.objects.len();
            if total > limit {
                return true;
            }
            stack.extend(node.children().into_iter().flatten());
        }
        false
    }

    /// Whether no object is stored anywhere under `id`.
    pub(crate) fn subtree_is_empty(&self, id: NodeId) -> bool {
        !self.subtree_exceeds(id, 0)
    }

    /// Number of nodes in the subtree rooted at `id`, including `id`.
    pub(crate) fn subtree_len(&self, id: NodeId) -> usize {
        1 + self.descendants(id).len()
    }
}
