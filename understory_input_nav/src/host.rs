// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between the navigator and the host UI toolkit.

/// Label of the return key on the keyboard while a target is focused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReturnKey {
    /// More targets follow.
    Next,
    /// The focused target is the last one.
    Done,
}

/// An action issued by an accessory control (a previous/next/done strip).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AccessoryAction {
    /// Move focus to the previous target.
    Previous,
    /// Move focus to the next target.
    Next,
    /// Finish editing and clear focus.
    Done,
}

/// A host-rendered control that exposes previous/next/done actions.
///
/// The navigator never draws anything. It only needs a handle to the view
/// that should be attached above the keyboard; the host routes the control's
/// taps to [`InputNavigator::accessory_action`](crate::InputNavigator::accessory_action).
pub trait AccessoryController<K> {
    /// Handle of the view presented with each focused target.
    fn accessory_view(&self) -> K;
}

/// Operations the navigator asks of the host UI.
///
/// `K` is the host's handle for a view. The navigator never owns the views
/// behind these handles; their lifetime is the host's business.
pub trait InputHost<K> {
    /// Route (or stop routing) `target`'s editing callbacks, such as the
    /// return key, to the navigator.
    fn set_editing_delegate(&mut self, target: K, attached: bool);

    /// Attach `accessory` above the keyboard while `target` is focused, or
    /// detach any accessory when `None`.
    fn set_input_accessory(&mut self, target: K, accessory: Option<K>);

    /// The host's stock previous/next/done control, if it has one.
    fn default_accessory(&mut self) -> Option<K> {
        None
    }

    /// Ask `target` to take input focus.
    ///
    /// Return `true` when focus moved synchronously; the navigator then
    /// records it exactly as if `target` had reported that it began editing.
    /// Hosts that learn about focus later return `false` and forward the
    /// begin-editing report when it arrives.
    fn become_focused(&mut self, target: K) -> bool;

    /// Ask `target` to give up input focus.
    fn resign_focus(&mut self, target: K);

    /// Label `target`'s return key.
    fn set_return_key(&mut self, target: K, key: ReturnKey) {
        let _ = (target, key);
    }
}
