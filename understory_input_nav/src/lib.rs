// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_input_nav --heading-base-level=0

//! Understory Input Nav: ordered navigation between the inputs of a form.
//!
//! A form is a sequence of input targets (text fields and text areas). This
//! crate keeps that sequence, tracks which target is focused, and moves focus
//! in response to:
//!
//! - the keyboard's return key ([`InputNavigator::should_return`]), which
//!   walks forward and finishes on the last target,
//! - a previous/next/done accessory shown above the keyboard
//!   ([`InputNavigator::accessory_action`]), which may wrap around.
//!
//! The seven [`NavigatorKind`]s pick which of the two drive navigation and
//! where the accessory comes from.
//!
//! ## Host integration
//!
//! The navigator never touches views directly. It is generic over a small,
//! copyable view handle `K` and talks to the UI through [`InputHost`]: wiring
//! editing callbacks and accessories, asking targets to take or resign focus,
//! and labelling return keys. The host, in turn, reports editing events back
//! to the navigator.
//!
//! A single focus listener ([`InputNavigator::set_focus_listener`]) is told
//! about every focus change, synchronously.
//!
//! ## Navigation order
//!
//! Insertion order is navigation order. [`reading_order`] sorts targets
//! top-to-bottom, then left-to-right, from rectangles in one shared
//! coordinate space, which is usually what a form wants. The order of
//! overlapping targets and right-to-left layouts is not specified.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` + `alloc` builds that rely on `libm` for floating-point math.
//! - `view_tree_adapter`: enables [`adapters::view_tree`], which discovers
//!   text inputs in an `understory_view_tree::Tree` and returns them in
//!   reading order.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "view_tree_adapter")]
pub mod adapters;

mod host;
mod kind;
mod navigator;
mod order;

pub use host::{AccessoryAction, AccessoryController, InputHost, ReturnKey};
pub use kind::{AccessorySource, NavigatorKind};
pub use navigator::{FocusChange, FocusListener, InputNavigator, Navigation};
pub use order::{reading_order, sort_reading_order};
