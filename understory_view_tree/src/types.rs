// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the view tree: node identifiers, flags, and local geometry.

use kurbo::{Affine, Point, Rect, Size};

/// Identifier for a node in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// View flags describing what a node can do.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u8 {
        /// View is visible.
        const VISIBLE    = 0b0000_0001;
        /// View accepts text entry (a text field or text area).
        const TEXT_INPUT = 0b0000_0010;
        /// View scrolls its content by moving its bounds origin.
        const SCROLLABLE = 0b0000_0100;
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Local geometry for a view.
#[derive(Clone, Debug)]
pub struct LocalView {
    /// Frame in the parent's coordinate space.
    pub frame: Rect,
    /// Origin of this view's own coordinate space.
    ///
    /// For scroll containers this is the content offset: scrolling down by
    /// 100 moves the bounds origin to `(0, 100)`.
    pub bounds_origin: Point,
    /// Size of the scrollable content. Only meaningful for
    /// [`ViewFlags::SCROLLABLE`] views.
    pub content_size: Size,
    /// Capability flags.
    pub flags: ViewFlags,
}

impl LocalView {
    /// A visible view with the given frame.
    pub fn with_frame(frame: Rect) -> Self {
        Self {
            frame,
            ..Self::default()
        }
    }

    /// A visible text-entry view with the given frame.
    pub fn text_input(frame: Rect) -> Self {
        Self {
            frame,
            flags: ViewFlags::VISIBLE | ViewFlags::TEXT_INPUT,
            ..Self::default()
        }
    }

    /// A visible scroll container with the given frame and content size.
    pub fn scroll_container(frame: Rect, content_size: Size) -> Self {
        Self {
            frame,
            content_size,
            flags: ViewFlags::VISIBLE | ViewFlags::SCROLLABLE,
            ..Self::default()
        }
    }

    /// Transform from this view's own space into its parent's space.
    pub fn to_parent(&self) -> Affine {
        Affine::translate(self.frame.origin() - self.bounds_origin)
    }
}

impl Default for LocalView {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            bounds_origin: Point::ZERO,
            content_size: Size::ZERO,
            flags: ViewFlags::default(),
        }
    }
}
