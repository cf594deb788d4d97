// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host seams for repositioning.

use kurbo::{Point, Rect, Size};
use understory_input_nav::InputHost;

use crate::assistant::KeyboardAssistant;

/// Host handle of a layout constraint, such as the one pinning a scroll
/// container's bottom edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstraintId(pub u64);

/// An ease-out animation the host should run a change under.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    /// Duration in seconds.
    pub duration: f64,
}

impl Transition {
    /// Ease-out transition lasting `duration` seconds.
    pub const fn ease_out(duration: f64) -> Self {
        Self { duration }
    }
}

/// Geometry and layout operations the assistant needs from the host UI.
///
/// Every view and constraint is referenced by handle and may have been torn
/// down by the host at any time. Queries then return `None` and mutations
/// return `false`; the assistant skips the affected step.
pub trait RepositionHost<K>: InputHost<K> {
    /// Frame of `view` in its parent's coordinate space.
    fn frame(&self, view: K) -> Option<Rect>;

    /// Convert `point`, expressed in `from`'s coordinate space, into `to`'s.
    fn convert_point(&self, point: Point, from: K, to: K) -> Option<Point>;

    /// Content size of a scroll container.
    fn content_size(&self, scroll_container: K) -> Option<Size>;

    /// Move a scroll container's content offset, animated when a
    /// transition is given.
    fn set_content_offset(
        &mut self,
        scroll_container: K,
        offset: Point,
        transition: Option<Transition>,
    ) -> bool;

    /// Set a layout constraint's constant. Takes effect on the next layout.
    fn set_constraint_constant(&mut self, constraint: ConstraintId, constant: f64) -> bool;

    /// Lay out `view` now, animating the change when a transition is given.
    fn layout_if_needed(&mut self, view: K, transition: Option<Transition>) -> bool;
}

/// Custom placement for the manual modes.
///
/// Called whenever a target should be brought into view, with the keyboard
/// height at that moment. Implementations often call
/// [`KeyboardAssistant::reposition`] with a different target, for example the
/// one after the focused target, to keep it visible too.
pub trait RepositionDelegate<K> {
    /// Bring `target` into view.
    fn manually_reposition(
        &mut self,
        assistant: &KeyboardAssistant<K>,
        host: &mut dyn RepositionHost<K>,
        target: K,
        keyboard_height: f64,
    );
}

impl<K, F> RepositionDelegate<K> for F
where
    F: FnMut(&KeyboardAssistant<K>, &mut dyn RepositionHost<K>, K, f64),
{
    fn manually_reposition(
        &mut self,
        assistant: &KeyboardAssistant<K>,
        host: &mut dyn RepositionHost<K>,
        target: K,
        keyboard_height: f64,
    ) {
        self(assistant, host, target, keyboard_height);
    }
}
