// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigator configurations.

/// Where a navigator gets the accessory view it attaches to each target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessorySource {
    /// No accessory view.
    None,
    /// The host's stock control, see [`InputHost::default_accessory`](crate::InputHost::default_accessory).
    Default,
    /// A view supplied at construction.
    Supplied,
}

/// How a navigator is driven.
///
/// Keyboard variants install the navigator as each target's editing delegate
/// so the return key advances focus. The other part of the name selects the
/// accessory attached above the keyboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavigatorKind {
    /// The host's stock previous/next/done control.
    DefaultController,
    /// A caller-supplied previous/next/done control.
    Controller,
    /// A caller-supplied custom accessory view.
    CustomAccessoryView,
    /// Return-key navigation only, no accessory.
    Keyboard,
    /// Return-key navigation plus the host's stock control.
    KeyboardAndDefaultController,
    /// Return-key navigation plus a caller-supplied control.
    KeyboardAndController,
    /// Return-key navigation plus a caller-supplied custom accessory view.
    KeyboardAndCustomAccessoryView,
}

impl NavigatorKind {
    /// Every kind.
    pub const ALL: [Self; 7] = [
        Self::DefaultController,
        Self::Controller,
        Self::CustomAccessoryView,
        Self::Keyboard,
        Self::KeyboardAndDefaultController,
        Self::KeyboardAndController,
        Self::KeyboardAndCustomAccessoryView,
    ];

    /// Whether the return key drives navigation.
    pub const fn uses_keyboard_navigation(self) -> bool {
        matches!(
            self,
            Self::Keyboard
                | Self::KeyboardAndDefaultController
                | Self::KeyboardAndController
                | Self::KeyboardAndCustomAccessoryView
        )
    }

    /// Where the accessory view comes from.
    pub const fn accessory_source(self) -> AccessorySource {
        match self {
            Self::Keyboard => AccessorySource::None,
            Self::DefaultController | Self::KeyboardAndDefaultController => {
                AccessorySource::Default
            }
            Self::Controller
            | Self::CustomAccessoryView
            | Self::KeyboardAndController
            | Self::KeyboardAndCustomAccessoryView => AccessorySource::Supplied,
        }
    }

    /// Whether accessory actions can arrive at all.
    pub const fn has_accessory(self) -> bool {
        !matches!(self.accessory_source(), AccessorySource::None)
    }

    /// The kind to use when a supplied accessory is missing.
    pub(crate) const fn without_supplied_accessory(self) -> Self {
        if self.uses_keyboard_navigation() {
            Self::KeyboardAndDefaultController
        } else {
            Self::DefaultController
        }
    }
}
