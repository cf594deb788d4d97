// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_keyboard_assist --heading-base-level=0

//! Understory Keyboard Assist: keep the focused input above the keyboard.
//!
//! [`KeyboardAssistant`] combines an
//! [`understory_keyboard::KeyboardObserver`] with an
//! [`understory_input_nav::InputNavigator`] and reacts to both:
//!
//! - while the keyboard shows and hides, a bottom layout constraint follows
//!   its height, so a scroll container shrinks to the visible area;
//! - whenever a target gains focus with the keyboard up, or the keyboard
//!   height changes, the focused target is brought into view.
//!
//! ## Modes
//!
//! - [`RepositionMode::AutomaticScrollContainer`]: the assistant scrolls a
//!   scroll container itself, aligning the target per a
//!   [`PositionConstraint`] and gap ([`ScrollPlacement`]).
//! - [`RepositionMode::ManualWithLayoutConstraint`]: the constraint is still
//!   managed, placement goes to a [`RepositionDelegate`].
//! - [`RepositionMode::ManualUnconstrained`]: everything goes to the
//!   delegate.
//!
//! A delegate can reuse [`KeyboardAssistant::reposition`] for any view, such
//! as the target after the focused one.
//!
//! ## Host integration
//!
//! The assistant never touches views. The host implements
//! [`RepositionHost`] (which extends [`understory_input_nav::InputHost`]) and
//! pumps events in:
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_input_nav::{InputHost, InputNavigator};
//! use understory_keyboard::{KeyboardInfo, KeyboardNotification};
//! use understory_keyboard_assist::{
//!     BottomConstraint, ConstraintId, KeyboardAssistant, RepositionHost, ScrollPlacement,
//!     Transition,
//! };
//!
//! const SCROLL: u32 = 0;
//! const SCREEN: u32 = 1;
//!
//! /// Fields are direct children of the scroll container, 60 units apart.
//! #[derive(Default)]
//! struct Screen {
//!     content_offset: f64,
//! }
//!
//! impl InputHost<u32> for Screen {
//!     fn set_editing_delegate(&mut self, _: u32, _: bool) {}
//!     fn set_input_accessory(&mut self, _: u32, _: Option<u32>) {}
//!     fn become_focused(&mut self, _: u32) -> bool {
//!         true
//!     }
//!     fn resign_focus(&mut self, _: u32) {}
//! }
//!
//! impl RepositionHost<u32> for Screen {
//!     fn frame(&self, view: u32) -> Option<Rect> {
//!         Some(match view {
//!             SCROLL | SCREEN => Rect::new(0.0, 0.0, 320.0, 600.0),
//!             field => Rect::new(0.0, 60.0 * field as f64, 320.0, 60.0 * field as f64 + 40.0),
//!         })
//!     }
//!     fn convert_point(&self, point: Point, from: u32, _to: u32) -> Option<Point> {
//!         let origin = self.frame(from)?.origin();
//!         Some(point + origin.to_vec2())
//!     }
//!     fn content_size(&self, _: u32) -> Option<Size> {
//!         Some(Size::new(320.0, 2000.0))
//!     }
//!     fn set_content_offset(&mut self, _: u32, offset: Point, _: Option<Transition>) -> bool {
//!         self.content_offset = offset.y;
//!         true
//!     }
//!     fn set_constraint_constant(&mut self, _: ConstraintId, _: f64) -> bool {
//!         true
//!     }
//!     fn layout_if_needed(&mut self, _: u32, _: Option<Transition>) -> bool {
//!         true
//!     }
//! }
//!
//! let mut screen = Screen::default();
//! let mut navigator = InputNavigator::with_keyboard_navigation();
//! navigator.add_input_items([2, 3, 4], &mut screen);
//!
//! let bottom = BottomConstraint { constraint: ConstraintId(1), layout_view: SCREEN };
//! let mut assistant =
//!     KeyboardAssistant::auto_scroll(navigator, SCROLL, ScrollPlacement::default(), bottom);
//! assistant.start();
//!
//! let keyboard = KeyboardInfo::with_end_frame(Rect::new(0.0, 340.0, 320.0, 640.0));
//! assistant.handle_keyboard_notification(&KeyboardNotification::WillShow(keyboard), &mut screen);
//! assistant.handle_keyboard_notification(&KeyboardNotification::DidShow(keyboard), &mut screen);
//!
//! // Field 3 starts at y = 180; the default placement leaves a 20 unit gap.
//! assistant.did_begin_editing(3, &mut screen);
//! assert_eq!(screen.content_offset, 160.0);
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade under the
//! `understory_keyboard_assist` target. Verbose traces are only emitted with
//! [`AssistantOptions::logging_enabled`] set.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod assistant;
mod geometry;
mod host;
mod options;

pub use assistant::KeyboardAssistant;
pub use geometry::{clamp_scroll_offset, desired_offset};
pub use host::{ConstraintId, RepositionDelegate, RepositionHost, Transition};
pub use options::{
    AssistantOptions, BottomConstraint, PositionConstraint, RepositionMode, ScrollPlacement,
};
