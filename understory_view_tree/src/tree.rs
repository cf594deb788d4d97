// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, coordinate queries.

use alloc::{vec, vec::Vec};
use kurbo::{Affine, Point, Rect, Size};

use crate::types::{LocalView, NodeId, ViewFlags};

/// A hierarchy of views with frames, scroll offsets, and flags.
///
/// Unlike a box tree with a spatial index, every change takes effect
/// immediately: coordinate queries walk the parent chain on demand. View
/// hierarchies that host text input are shallow, so the walk is cheap.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect, Size};
/// use understory_view_tree::{LocalView, Tree};
///
/// let mut tree = Tree::new();
/// let screen = tree.insert(None, LocalView::with_frame(Rect::new(0.0, 0.0, 320.0, 640.0)));
/// let scroll = tree.insert(
///     Some(screen),
///     LocalView::scroll_container(Rect::new(0.0, 40.0, 320.0, 640.0), Size::new(320.0, 1200.0)),
/// );
/// let field = tree.insert(Some(scroll), LocalView::text_input(Rect::new(10.0, 300.0, 310.0, 340.0)));
///
/// tree.set_bounds_origin(scroll, Point::new(0.0, 100.0));
///
/// // The field's origin in screen space accounts for the scroll offset.
/// let origin = tree.convert_point(Point::ZERO, field, screen).unwrap();
/// assert_eq!(origin, Point::new(10.0, 240.0));
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalView,
}

impl Node {
    fn new(generation: u32, local: LocalView) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new view as the last child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalView) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a view and its subtree. Stale identifiers are ignored.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.parent_of(id) {
            self.unlink_parent(id, parent);
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes[current.idx()].take() {
                stack.extend(node.children);
                self.free_list.push(current.idx());
            }
        }
    }

    /// Move `id` under `new_parent` (or make it a root).
    ///
    /// Moving a view under itself or one of its descendants is rejected and
    /// leaves the hierarchy unchanged. Returns whether the view was moved.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(p) = new_parent
            && self.is_ancestor_of(id, p)
        {
            return false;
        }
        if let Some(parent) = self.parent_of(id) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        true
    }

    /// Update the frame of a view.
    pub fn set_frame(&mut self, id: NodeId, frame: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.frame = frame;
        }
    }

    /// Update the bounds origin (content offset) of a view.
    pub fn set_bounds_origin(&mut self, id: NodeId, origin: Point) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.bounds_origin = origin;
        }
    }

    /// Update the scrollable content size of a view.
    pub fn set_content_size(&mut self, id: NodeId, size: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.content_size = size;
        }
    }

    /// Update view flags.
    pub fn set_flags(&mut self, id: NodeId, flags: ViewFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is live if its slot exists and its generation matches the
    /// generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Returns the local data of a live view.
    pub fn local(&self, id: NodeId) -> Option<&LocalView> {
        self.node_opt(id).map(|n| &n.local)
    }

    /// Returns the frame of a live view in its parent's space.
    pub fn frame(&self, id: NodeId) -> Option<Rect> {
        self.local(id).map(|l| l.frame)
    }

    /// Returns the bounds origin (content offset) of a live view.
    pub fn bounds_origin(&self, id: NodeId) -> Option<Point> {
        self.local(id).map(|l| l.bounds_origin)
    }

    /// Returns the scrollable content size of a live view.
    pub fn content_size(&self, id: NodeId) -> Option<Size> {
        self.local(id).map(|l| l.content_size)
    }

    /// Returns the flags of a live view.
    pub fn flags(&self, id: NodeId) -> Option<ViewFlags> {
        self.local(id).map(|l| l.flags)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of a node, or empty slice if node is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent_of(node);
        }
        false
    }

    /// Transform from a view's own space into the space of its root.
    ///
    /// Returns `None` for stale identifiers.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        let mut tf = self.local(id)?.to_parent();
        let mut current = self.parent_of(id);
        while let Some(parent) = current {
            let node = self.node_opt(parent)?;
            tf = node.local.to_parent() * tf;
            current = node.parent;
        }
        Some(tf)
    }

    /// Frame of a view expressed in the space of its root.
    pub fn world_frame(&self, id: NodeId) -> Option<Rect> {
        let frame = self.frame(id)?;
        let parent_tf = match self.parent_of(id) {
            Some(parent) => self.world_transform(parent)?,
            None => Affine::IDENTITY,
        };
        Some(parent_tf.transform_rect_bbox(frame))
    }

    /// Convert a point from the space of `from` into the space of `to`.
    ///
    /// Both views must be live and share a root; otherwise `None`.
    pub fn convert_point(&self, point: Point, from: NodeId, to: NodeId) -> Option<Point> {
        if self.root_of(from)? != self.root_of(to)? {
            return None;
        }
        let from_tf = self.world_transform(from)?;
        let to_tf = self.world_transform(to)?;
        Some(to_tf.inverse() * (from_tf * point))
    }

    /// Convert a rectangle from the space of `from` into the space of `to`.
    pub fn convert_rect(&self, rect: Rect, from: NodeId, to: NodeId) -> Option<Rect> {
        let origin = self.convert_point(rect.origin(), from, to)?;
        Some(Rect::from_origin_size(origin, rect.size()))
    }

    /// Returns the root of a live view.
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        if !self.is_alive(id) {
            return None;
        }
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            current = parent;
        }
        Some(current)
    }

    /// Iterate over `root` and all of its descendants in depth-first pre-order.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        let stack = if self.is_alive(root) {
            vec![root]
        } else {
            Vec::new()
        };
        Descendants { tree: self, stack }
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }
}

/// Depth-first pre-order iterator over a subtree, see [`Tree::descendants`].
#[derive(Debug)]
pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Reversed so children come out in insertion order.
        self.stack
            .extend(self.tree.children_of(id).iter().rev().copied());
        Some(id)
    }
}
