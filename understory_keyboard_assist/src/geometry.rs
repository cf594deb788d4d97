// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll offset arithmetic for automatic placement.
//!
//! All values are vertical extents in the scroll container's content space.

use crate::options::PositionConstraint;

/// Unclamped content offset that aligns a target per `constraint`.
///
/// `target_y` is the target's top edge in content space and
/// `visible_height` the height of the scroll container's frame.
pub fn desired_offset(
    target_y: f64,
    target_height: f64,
    visible_height: f64,
    constraint: PositionConstraint,
    offset: f64,
) -> f64 {
    match constraint {
        PositionConstraint::TopAlignToScreenTop => target_y - offset,
        PositionConstraint::BottomAlignToKeyboardTop => {
            (target_y - visible_height) + target_height + offset
        }
    }
}

/// Keep a content offset inside the scrollable range.
///
/// Never past the end of the content, then never before its start; content
/// shorter than the container therefore always yields `0`.
///
/// ```
/// use understory_keyboard_assist::clamp_scroll_offset;
///
/// assert_eq!(clamp_scroll_offset(700.0, 1000.0, 600.0), 400.0);
/// assert_eq!(clamp_scroll_offset(-50.0, 1000.0, 600.0), 0.0);
/// ```
pub fn clamp_scroll_offset(desired: f64, content_height: f64, visible_height: f64) -> f64 {
    let mut offset = desired;
    if content_height - offset < visible_height {
        offset = content_height - visible_height;
    }
    offset.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_alignment_subtracts_gap() {
        let y = desired_offset(150.0, 40.0, 600.0, PositionConstraint::TopAlignToScreenTop, 20.0);
        assert_eq!(y, 130.0);
    }

    #[test]
    fn bottom_alignment_projects_onto_keyboard_top() {
        let y = desired_offset(
            150.0,
            40.0,
            600.0,
            PositionConstraint::BottomAlignToKeyboardTop,
            30.0,
        );
        assert_eq!(y, -380.0);
        assert_eq!(clamp_scroll_offset(y, 1000.0, 600.0), 0.0);
    }

    #[test]
    fn clamps_to_scrollable_range() {
        assert_eq!(clamp_scroll_offset(700.0, 1000.0, 600.0), 400.0);
        assert_eq!(clamp_scroll_offset(-50.0, 1000.0, 600.0), 0.0);
        assert_eq!(clamp_scroll_offset(250.0, 1000.0, 600.0), 250.0);
        assert_eq!(clamp_scroll_offset(100.0, 300.0, 600.0), 0.0);
    }
}
