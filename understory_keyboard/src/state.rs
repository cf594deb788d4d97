// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard visibility states and the events the observer emits.

/// Visibility state of the on-screen keyboard.
///
/// The legal cycle is `DidHide → WillShow → DidShow → WillHide → DidHide`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyboardState {
    /// The keyboard is about to appear.
    WillShow,
    /// The keyboard is about to disappear.
    WillHide,
    /// The keyboard is fully visible.
    DidShow,
    /// The keyboard is fully hidden. This is the initial state.
    #[default]
    DidHide,
}

/// A keyboard state transition together with the height known at that time.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct KeyboardStateChange {
    /// The state that was entered.
    pub state: KeyboardState,
    /// Keyboard height when the state was entered.
    pub height: f64,
}

/// An event produced while handling a single notification.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KeyboardEvent {
    /// The keyboard entered a new state.
    StateChanged(KeyboardStateChange),
    /// The keyboard height changed to a new value.
    HeightChanged(f64),
}
