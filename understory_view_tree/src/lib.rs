// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_tree --heading-base-level=0

//! Understory View Tree: a Kurbo-native view hierarchy for input assistance.
//!
//! Understory View Tree models the part of a host UI that keyboard assistance
//! needs to reason about: nested views with frames, scroll containers with a
//! content offset and content size, and which views accept text entry.
//!
//! - Each view has a frame in its parent's space and a bounds origin that
//!   shifts its own coordinate space (the scroll offset of a scroll container).
//! - [`Tree::convert_point`] and [`Tree::convert_rect`] map geometry between
//!   any two views that share a root.
//! - [`Tree::descendants`] walks a subtree depth-first, which is how
//!   automatic discovery of text inputs collects candidates.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything. Upstream code computes
//! frames with whatever layout system it uses and mirrors the results here.
//! Changes take effect immediately; there is no commit step.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing views.
//! - [`LocalView`]: per-view local data (frame, bounds origin, content size, flags).
//! - [`ViewFlags`]: visibility, text entry, and scrolling capabilities.
//! - [`NodeId`]: generational handle of a view.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Descendants, Tree};
pub use types::{LocalView, NodeId, ViewFlags};
