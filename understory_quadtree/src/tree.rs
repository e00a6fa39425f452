// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: insert/split, root expansion, remove/merge-back, queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect, Size};
use log::{debug, trace};

use crate::arena::Arena;
use crate::bounded::Bounded;
use crate::config::QuadTreeConfig;
use crate::error::QuadTreeError;
use crate::node::Nodes;
use crate::types::{NodeId, ObjectId, Quadrant, QuadrantMask};
use crate::util::{ceil_non_negative, contains_point, contains_rect, is_finite_rect, overlaps};

#[derive(Clone, Debug)]
struct Entry<O> {
    object: O,
    /// Bounds as last reported by the object.
    bounds: Rect,
    /// The node that stores this object directly.
    node: NodeId,
}

/// Adaptive region quadtree over [`Bounded`] objects.
///
/// See the [crate docs](crate) for the split, merge and expansion rules.
#[derive(Clone)]
pub struct QuadTree<O> {
    config: QuadTreeConfig,
    root: Option<NodeId>,
    nodes: Nodes,
    objects: Arena<Entry<O>>,
}

impl<O> core::fmt::Debug for QuadTree<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("config", &self.config)
            .field("root_bounds", &self.root_bounds())
            .field("objects", &self.objects.len())
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

impl<O: Bounded> Default for QuadTree<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Bounded> QuadTree<O> {
    /// Create an empty tree with the default [`QuadTreeConfig`].
    pub fn new() -> Self {
        Self {
            config: QuadTreeConfig::default(),
            root: None,
            nodes: Nodes::default(),
            objects: Arena::default(),
        }
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: QuadTreeConfig) -> Result<Self, QuadTreeError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Insert an object and return its handle.
    ///
    /// The root is created on the first insert and doubled toward the object
    /// as often as needed until it contains the object's bounds.
    /// Leaves that overflow on the way down are split.
    pub fn insert(&mut self, object: O) -> ObjectId {
        let bounds = object.bounds().abs();
        let node = self.place(bounds);
        let id: ObjectId = self.objects.insert(Entry {
            object,
            bounds,
            node,
        });
        self.nodes.get_mut(node).objects.push(id);
        id
    }

    /// Remove an object and return it.
    ///
    /// Subtrees left at or below the split threshold merge back into their top node.
    pub fn remove(&mut self, id: ObjectId) -> Result<O, QuadTreeError> {
        let entry = self.objects.remove(id).ok_or(QuadTreeError::NotFound(id))?;
        self.unlink_object(entry.node, id);
        self.merge_from(entry.node);
        Ok(entry.object)
    }

    /// React to a change of the object's bounds.
    ///
    /// Call this after mutating an object through interior mutability (for example
    /// an `Rc<Cell<Rect>>`). If the new bounds still fit the object's leaf nothing
    /// structural happens; otherwise the object is re-inserted from the root and the
    /// subtree it left is merge-checked.
    ///
    /// Returns `true` if the object moved to a different node.
    pub fn relocate(&mut self, id: ObjectId) -> Result<bool, QuadTreeError> {
        let entry = self.objects.get_mut(id).ok_or(QuadTreeError::NotFound(id))?;
        let bounds = entry.object.bounds().abs();
        entry.bounds = bounds;
        let old = entry.node;
        let node = self.nodes.get(old);
        if !node.has_children() && contains_rect(node.rect(), bounds) {
            trace!("object {id:?} still fits leaf {old:?}");
            return Ok(false);
        }

        self.unlink_object(old, id);
        let target = self.place(bounds);
        self.link_object(target, id);
        self.merge_from(old);
        // A merge may have pulled the object back up into `old`.
        let now = self.objects.get(id).expect("relocated object vanished").node;
        trace!("object {id:?} relocated from {old:?} to {now:?}");
        Ok(now != old)
    }

    /// Mutate an object in place and then [`relocate`](Self::relocate) it.
    pub fn modify<R>(
        &mut self,
        id: ObjectId,
        f: impl FnOnce(&mut O) -> R,
    ) -> Result<R, QuadTreeError> {
        let entry = self.objects.get_mut(id).ok_or(QuadTreeError::NotFound(id))?;
        let out = f(&mut entry.object);
        self.relocate(id)?;
        Ok(out)
    }

    /// Objects whose bounds intersect `rect`. Touching edges count as intersecting.
    ///
    /// The result is exact: subtrees are pruned by node bounds and every candidate
    /// is tested against its own bounds. Order is unspecified.
    pub fn query(&self, rect: Rect) -> impl Iterator<Item = (ObjectId, &O)> + '_ {
        self.hits(move |r| overlaps(r, rect)).into_iter()
    }

    /// Objects whose bounds contain `pt`. Edges are inclusive.
    pub fn query_point(&self, pt: Point) -> impl Iterator<Item = (ObjectId, &O)> + '_ {
        self.hits(move |r| contains_point(r, pt)).into_iter()
    }

    /// Grow the root if needed and descend to the node that should store `bounds`,
    /// splitting full leaves on the way.
    fn place(&mut self, bounds: Rect) -> NodeId {
        debug_assert!(is_finite_rect(bounds), "object bounds must be finite");
        let mut node = self.grow_to_fit(bounds);
        loop {
            let n = self.nodes.get(node);
            if !n.has_children() && n.objects.len() + 1 > self.config.max_objects_per_leaf {
                self.split(node);
            }
            match self.child_containing(node, bounds) {
                Some(child) => node = child,
                None => return node,
            }
        }
    }
}

impl<O> QuadTree<O> {
    /// Look up an object.
    pub fn get(&self, id: ObjectId) -> Option<&O> {
        self.objects.get(id).map(|e| &e.object)
    }

    /// Returns true if `id` refers to an object currently in the tree.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.is_alive(id)
    }

    /// Iterate all stored objects.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &O)> + '_ {
        self.objects.iter::<ObjectId>().map(|(id, e)| (id, &e.object))
    }

    /// Number of stored objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if no objects are stored.
    pub fn is_empty(&self) -> bool {
        self.objects.len() == 0
    }

    /// Number of nodes reachable from the root, counting the root. Zero before the first insert.
    pub fn node_count(&self) -> usize {
        self.root.map_or(0, |root| self.nodes.subtree_len(root))
    }

    /// Current bounds of the root node, if any object was ever inserted.
    pub fn root_bounds(&self) -> Option<Rect> {
        self.root.map(|r| self.nodes.get(r).rect())
    }

    /// Remove every object and node. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.nodes.clear();
        self.root = None;
    }

    /// Objects whose bounds satisfy `hit`, pruning nodes whose bounds do not.
    fn hits(&self, hit: impl Fn(Rect) -> bool) -> Vec<(ObjectId, &O)> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(id);
            if !hit(node.rect()) {
                continue;
            }
            for &oid in &node.objects {
                let entry = self.objects.get(oid).expect("node lists a dead object");
                if hit(entry.bounds) {
                    out.push((oid, &entry.object));
                }
            }
            stack.extend(node.children().into_iter().flatten());
        }
        out
    }

    fn grow_to_fit(&mut self, bounds: Rect) -> NodeId {
        let mut root = match self.root {
            Some(root) => root,
            None => {
                let root = self.nodes.alloc(self.initial_root_rect(bounds));
                debug!("created root {:?}", self.nodes.get(root).rect());
                self.root = Some(root);
                root
            }
        };
        while !contains_rect(self.nodes.get(root).rect(), bounds) {
            root = self.expand_root(root, bounds);
        }
        root
    }

    /// A square number of minimum leaves wide enough for `bounds`, centered on it.
    fn initial_root_rect(&self, bounds: Rect) -> Rect {
        let min = self.config.min_leaf_size;
        let multiplier = ceil_non_negative(bounds.width() / min.width)
            .max(ceil_non_negative(bounds.height() / min.height))
            .max(1.0);
        Rect::from_center_size(
            bounds.center(),
            Size::new(min.width * multiplier, min.height * multiplier),
        )
    }

    /// Double the root toward `bounds`, keeping the old root as the opposite quadrant.
    fn expand_root(&mut self, old_root: NodeId, bounds: Rect) -> NodeId {
        let old = self.nodes.get(old_root).rect();
        // Compare origins: growth goes toward whichever side the object starts on.
        let west = bounds.x0 < old.x0;
        let north = bounds.y0 < old.y0;
        let (x0, x1) = if west {
            (old.x0 - old.width(), old.x1)
        } else {
            (old.x0, old.x1 + old.width())
        };
        let (y0, y1) = if north {
            (old.y0 - old.height(), old.y1)
        } else {
            (old.y0, old.y1 + old.height())
        };
        let rect = Rect::new(x0, y0, x1, y1);
        // Split at the old root's corner so it becomes an exact quadrant.
        let split = Point::new(
            if west { old.x0 } else { old.x1 },
            if north { old.y0 } else { old.y1 },
        );
        let kept = Quadrant::toward(north, west).opposite();

        let new_root = self.nodes.alloc(rect);
        for q in Quadrant::ALL {
            let child = if q == kept {
                old_root
            } else {
                self.nodes.alloc(q.sub_rect(rect, split))
            };
            self.nodes.set_child(new_root, q, Some(child));
        }
        self.root = Some(new_root);
        debug!("expanded root to {rect:?}, old root kept as {kept:?}");
        new_root
    }

    /// Split a leaf into four quarters and push down the objects that fit one.
    ///
    /// Does nothing if the quarters would be smaller than the minimum leaf size.
    fn split(&mut self, id: NodeId) {
        let rect = self.nodes.get(id).rect();
        let min = self.config.min_leaf_size;
        if rect.width() / 2.0 < min.width || rect.height() / 2.0 < min.height {
            return;
        }
        self.nodes.subdivide(id);
        let objects = core::mem::take(&mut self.nodes.get_mut(id).objects);
        let mut kept = Vec::new();
        for oid in objects {
            let bounds = self.objects.get(oid).expect("node lists a dead object").bounds;
            match self.child_containing(id, bounds) {
                Some(child) => self.link_object(child, oid),
                None => kept.push(oid),
            }
        }
        debug!(
            "split node {rect:?}, {} object(s) stay at the parent",
            kept.len()
        );
        self.nodes.get_mut(id).objects = kept;
    }

    fn child_containing(&self, id: NodeId, bounds: Rect) -> Option<NodeId> {
        self.nodes
            .get(id)
            .children()?
            .into_iter()
            .find(|&c| contains_rect(self.nodes.get(c).rect(), bounds))
    }

    fn link_object(&mut self, node: NodeId, oid: ObjectId) {
        self.nodes.get_mut(node).objects.push(oid);
        self.objects.get_mut(oid).expect("linking a dead object").node = node;
    }

    fn unlink_object(&mut self, node: NodeId, oid: ObjectId) {
        let objects = &mut self.nodes.get_mut(node).objects;
        let pos = objects
            .iter()
            .position(|&o| o == oid)
            .expect("object missing from the node that should hold it");
        objects.swap_remove(pos);
    }

    /// Merge-check after an object left `node`.
    ///
    /// An internal node may itself have dropped to the threshold, so checking starts
    /// there; a leaf cannot merge, so checking starts at its parent.
    fn merge_from(&mut self, node: NodeId) {
        let start = if self.nodes.get(node).has_children() {
            Some(node)
        } else {
            self.nodes.get(node).parent()
        };
        if let Some(start) = start {
            self.merge_check(start);
        }
    }

    /// Collapse underpopulated subtrees from `node` up to the root.
    fn merge_check(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.root == Some(id) {
                self.merge_root();
                return;
            }
            if !self
                .nodes
                .subtree_exceeds(id, self.config.max_objects_per_leaf)
            {
                self.collapse(id);
            }
            current = self.nodes.get(id).parent();
        }
    }

    /// Shrink the root while only one quadrant is populated, then collapse it if small enough.
    ///
    /// Shrink eligibility is decided from the live children before any slot is cleared.
    fn merge_root(&mut self) {
        while let Some(root) = self.root {
            let Some(children) = self.nodes.get(root).children() else {
                return;
            };
            if let Some(q) = self.sole_populated_quadrant(root, children) {
                self.shrink_root(root, q);
                continue;
            }
            if !self
                .nodes
                .subtree_exceeds(root, self.config.max_objects_per_leaf)
            {
                self.collapse(root);
            }
            return;
        }
    }

    /// The one quadrant holding every object of the tree, if there is one.
    fn sole_populated_quadrant(&self, root: NodeId, children: [NodeId; 4]) -> Option<Quadrant> {
        if !self.nodes.get(root).objects.is_empty() {
            return None;
        }
        let mut populated = QuadrantMask::empty();
        for (q, c) in Quadrant::ALL.into_iter().zip(children) {
            if !self.nodes.subtree_is_empty(c) {
                populated |= q.into();
            }
        }
        populated.single()
    }

    fn shrink_root(&mut self, root: NodeId, keep: Quadrant) {
        let new_root = self
            .nodes
            .get(root)
            .child(keep)
            .expect("shrinking a root without children");
        for q in Quadrant::ALL {
            let Some(c) = self.nodes.get(root).child(q) else {
                continue;
            };
            self.nodes.set_child(root, q, None);
            self.nodes.detach(c);
            if q != keep {
                self.nodes.free_subtree(c);
            }
        }
        self.nodes.free_subtree(root);
        self.root = Some(new_root);
        debug!(
            "shrank root to its {keep:?} quadrant {:?}",
            self.nodes.get(new_root).rect()
        );
    }

    /// Move every object under `id` into `id` itself and drop its children.
    fn collapse(&mut self, id: NodeId) {
        if !self.nodes.get(id).has_children() {
            return;
        }
        let mut moved = 0_usize;
        for d in self.nodes.descendants(id) {
            let objects = core::mem::take(&mut self.nodes.get_mut(d).objects);
            moved += objects.len();
            for oid in objects {
                self.link_object(id, oid);
            }
        }
        self.nodes.free_children(id);
        debug!(
            "merged children of {:?} back, {moved} object(s) moved up",
            self.nodes.get(id).rect()
        );
    }
}
