// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration of a keyboard assistant.

use crate::host::ConstraintId;

/// Which edge of the focused target is aligned when scrolling automatically.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PositionConstraint {
    /// Put the target's top edge `offset` below the top of the scroll
    /// container.
    #[default]
    TopAlignToScreenTop,
    /// Put the target's bottom edge `offset` above the keyboard.
    BottomAlignToKeyboardTop,
}

/// How the assistant brings the focused target into view.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RepositionMode {
    /// Scroll a scroll container and manage its bottom constraint.
    AutomaticScrollContainer,
    /// Manage a bottom constraint and delegate placement.
    ManualWithLayoutConstraint,
    /// Delegate placement, manage no constraint.
    ManualUnconstrained,
}

/// Automatic placement parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollPlacement {
    /// Alignment rule.
    pub constraint: PositionConstraint,
    /// Gap between the aligned edge and its reference, in view units.
    pub offset: f64,
}

impl ScrollPlacement {
    /// Placement with the given rule and gap.
    pub const fn new(constraint: PositionConstraint, offset: f64) -> Self {
        Self { constraint, offset }
    }
}

impl Default for ScrollPlacement {
    fn default() -> Self {
        Self::new(PositionConstraint::TopAlignToScreenTop, 20.0)
    }
}

/// A bottom layout constraint and the view whose layout it affects.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BottomConstraint<K> {
    /// The constraint whose constant follows the keyboard.
    pub constraint: ConstraintId,
    /// The view laid out after the constant changes.
    pub layout_view: K,
}

/// Tunables shared by every mode.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AssistantOptions {
    /// Duration of automatic scrolling, in seconds.
    pub animation_duration: f64,
    /// Apply the keyboard height to the bottom constraint as `-height`
    /// rather than `height`.
    ///
    /// Which one is right depends on how the host anchored the constraint:
    /// a container pinned to the safe-area bottom needs the inverted value.
    pub invert_bottom_constraint_constant: bool,
    /// Constant restored when the keyboard hides.
    pub reset_bottom_constraint_constant: f64,
    /// Log verbose diagnostics.
    pub logging_enabled: bool,
}

impl AssistantOptions {
    /// Set [`animation_duration`](Self::animation_duration).
    pub const fn with_animation_duration(mut self, seconds: f64) -> Self {
        self.animation_duration = seconds;
        self
    }

    /// Set [`invert_bottom_constraint_constant`](Self::invert_bottom_constraint_constant).
    pub const fn with_invert_bottom_constraint_constant(mut self, invert: bool) -> Self {
        self.invert_bottom_constraint_constant = invert;
        self
    }

    /// Set [`reset_bottom_constraint_constant`](Self::reset_bottom_constraint_constant).
    pub const fn with_reset_bottom_constraint_constant(mut self, constant: f64) -> Self {
        self.reset_bottom_constraint_constant = constant;
        self
    }

    /// Set [`logging_enabled`](Self::logging_enabled).
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }
}

impl Default for AssistantOptions {
    fn default() -> Self {
        Self {
            animation_duration: 0.3,
            invert_bottom_constraint_constant: true,
            reset_bottom_constraint_constant: 0.0,
            logging_enabled: false,
        }
    }
}
