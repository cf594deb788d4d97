// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The input navigator: ordered targets, current focus, and stepping between them.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::host::{AccessoryAction, AccessoryController, InputHost, ReturnKey};
use crate::kind::{AccessorySource, NavigatorKind};

const LOG_TARGET: &str = "understory_input_nav";

/// Sequential navigation direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next target in sequence order.
    Next,
    /// Move to the previous target in sequence order.
    Prev,
}

/// A change of the focused target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FocusChange<K> {
    /// Target focused before the change.
    pub previous: Option<K>,
    /// Target focused after the change.
    pub current: Option<K>,
}

/// Callback notified synchronously whenever the focused target is set.
pub type FocusListener<K> = Box<dyn FnMut(FocusChange<K>)>;

/// Ordered list of input targets with at most one focused.
///
/// Insertion order is navigation order and a target appears at most once.
/// The navigator holds handles only; the views themselves belong to the host,
/// which is told about every wiring change through an [`InputHost`].
///
/// Focus is tracked from the host's reports: a target that began editing is
/// passed to [`did_begin_editing`](Self::did_begin_editing), which makes it
/// the focused target. Return-key presses go to
/// [`should_return`](Self::should_return) and accessory taps to
/// [`accessory_action`](Self::accessory_action); both share one code path and
/// differ only in whether they may loop.
///
/// ```
/// use understory_input_nav::{InputHost, InputNavigator, NavigatorKind};
///
/// #[derive(Default)]
/// struct Fields {
///     focused: Option<u32>,
/// }
///
/// impl InputHost<u32> for Fields {
///     fn set_editing_delegate(&mut self, _: u32, _: bool) {}
///     fn set_input_accessory(&mut self, _: u32, _: Option<u32>) {}
///     fn become_focused(&mut self, target: u32) -> bool {
///         self.focused = Some(target);
///         true
///     }
///     fn resign_focus(&mut self, target: u32) {
///         if self.focused == Some(target) {
///             self.focused = None;
///         }
///     }
/// }
///
/// let mut host = Fields::default();
/// let mut nav = InputNavigator::<u32>::with_keyboard_navigation();
/// nav.add_input_items([1, 2, 3], &mut host);
///
/// nav.did_begin_editing(2, &mut host);
/// nav.should_return(2, &mut host);
/// assert_eq!(nav.focused_item(), Some(3));
///
/// // Return on the last target finishes instead of wrapping.
/// nav.should_return(3, &mut host);
/// assert_eq!(nav.focused_item(), None);
/// assert_eq!(host.focused, None);
/// ```
pub struct InputNavigator<K> {
    kind: NavigatorKind,
    accessory: Option<K>,
    items: Vec<K>,
    focused: Option<K>,
    /// Whether accessory previous/next wrap around at the ends.
    ///
    /// Only consulted for kinds with an accessory; return-key navigation
    /// never loops.
    pub should_loop_accessory_navigation: bool,
    logging_enabled: bool,
    focus_listener: Option<FocusListener<K>>,
}

impl<K: Copy + Eq + fmt::Debug> InputNavigator<K> {
    /// Create an empty navigator of the given kind.
    ///
    /// Kinds that need a supplied accessory fall back to the host's default
    /// control (keeping return-key navigation if requested) when `accessory`
    /// is `None`. An accessory passed to a kind that has no use for it is
    /// ignored.
    pub fn new(kind: NavigatorKind, accessory: Option<K>) -> Self {
        let kind = match (kind.accessory_source(), accessory) {
            (AccessorySource::Supplied, None) => {
                let fallback = kind.without_supplied_accessory();
                log::warn!(
                    target: LOG_TARGET,
                    "{kind:?} needs an accessory view but none was supplied, using {fallback:?}"
                );
                fallback
            }
            (AccessorySource::None | AccessorySource::Default, Some(view)) => {
                log::warn!(
                    target: LOG_TARGET,
                    "{kind:?} does not use a supplied accessory, ignoring {view:?}"
                );
                kind
            }
            _ => kind,
        };
        let accessory = match kind.accessory_source() {
            AccessorySource::Supplied => accessory,
            AccessorySource::None | AccessorySource::Default => None,
        };
        Self {
            kind,
            accessory,
            items: Vec::new(),
            focused: None,
            should_loop_accessory_navigation: true,
            logging_enabled: false,
            focus_listener: None,
        }
    }

    /// Navigation through the host's stock previous/next/done control.
    pub fn with_default_controller() -> Self {
        Self::new(NavigatorKind::DefaultController, None)
    }

    /// Navigation through a caller-supplied previous/next/done control.
    pub fn with_controller(controller: &impl AccessoryController<K>) -> Self {
        Self::new(NavigatorKind::Controller, Some(controller.accessory_view()))
    }

    /// Navigation through a caller-supplied custom accessory view.
    pub fn with_custom_accessory_view(view: K) -> Self {
        Self::new(NavigatorKind::CustomAccessoryView, Some(view))
    }

    /// Return-key navigation without any accessory.
    pub fn with_keyboard_navigation() -> Self {
        Self::new(NavigatorKind::Keyboard, None)
    }

    /// Return-key navigation plus the host's stock control.
    pub fn with_keyboard_and_default_controller() -> Self {
        Self::new(NavigatorKind::KeyboardAndDefaultController, None)
    }

    /// Return-key navigation plus a caller-supplied control.
    pub fn with_keyboard_and_controller(controller: &impl AccessoryController<K>) -> Self {
        Self::new(
            NavigatorKind::KeyboardAndController,
            Some(controller.accessory_view()),
        )
    }

    /// Return-key navigation plus a caller-supplied custom accessory view.
    pub fn with_keyboard_and_custom_accessory_view(view: K) -> Self {
        Self::new(NavigatorKind::KeyboardAndCustomAccessoryView, Some(view))
    }

    /// The effective kind, after any fallback.
    pub fn kind(&self) -> NavigatorKind {
        self.kind
    }

    /// The supplied accessory view, if the kind uses one.
    pub fn accessory(&self) -> Option<K> {
        self.accessory
    }

    /// Whether verbose diagnostics are logged.
    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// Enable or disable verbose diagnostics.
    pub fn set_logging_enabled(&mut self, enabled: bool) {
        self.logging_enabled = enabled;
    }

    /// Install the single focus listener, replacing any previous one.
    pub fn set_focus_listener(&mut self, listener: impl FnMut(FocusChange<K>) + 'static) {
        self.focus_listener = Some(Box::new(listener));
    }

    /// Remove the focus listener.
    pub fn clear_focus_listener(&mut self) {
        self.focus_listener = None;
    }

    /// Registered targets in navigation order.
    pub fn input_items(&self) -> &[K] {
        &self.items
    }

    /// Whether `target` is registered.
    pub fn contains(&self, target: K) -> bool {
        self.items.contains(&target)
    }

    /// Currently focused target.
    pub fn focused_item(&self) -> Option<K> {
        self.focused
    }

    /// Append `target` and wire it up.
    ///
    /// Keyboard kinds route the target's editing callbacks to the navigator;
    /// kinds with an accessory attach it. Returns `false` (and touches
    /// nothing) if the target is already registered.
    pub fn add_input_item<H: InputHost<K> + ?Sized>(&mut self, target: K, host: &mut H) -> bool {
        if self.contains(target) {
            self.trace(format_args!("{target:?} already registered"));
            return false;
        }
        self.items.push(target);
        if self.kind.uses_keyboard_navigation() {
            host.set_editing_delegate(target, true);
        }
        match self.accessory_view(host) {
            Some(view) => host.set_input_accessory(target, Some(view)),
            None if self.kind.has_accessory() => {
                self.trace(format_args!("no accessory available for {target:?}"));
            }
            None => {}
        }
        self.trace(format_args!("added {target:?}"));
        true
    }

    /// Append every target in order, skipping ones already registered.
    ///
    /// Returns how many were added.
    pub fn add_input_items<H: InputHost<K> + ?Sized>(
        &mut self,
        targets: impl IntoIterator<Item = K>,
        host: &mut H,
    ) -> usize {
        let mut added = 0;
        for target in targets {
            if self.add_input_item(target, host) {
                added += 1;
            }
        }
        added
    }

    /// Unwire and remove `target`. No-op if it is not registered.
    ///
    /// A focused target loses focus first; the resulting change is returned.
    pub fn remove_input_item<H: InputHost<K> + ?Sized>(
        &mut self,
        target: K,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        let index = self.items.iter().position(|&k| k == target)?;
        let change = if self.focused == Some(target) {
            self.set_focused_item(None, host)
        } else {
            None
        };
        if self.kind.uses_keyboard_navigation() {
            host.set_editing_delegate(target, false);
        }
        if self.kind.has_accessory() {
            host.set_input_accessory(target, None);
        }
        self.items.remove(index);
        self.trace(format_args!("removed {target:?}"));
        change
    }

    /// Remove every target, last registered first.
    pub fn remove_input_items<H: InputHost<K> + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        let mut change = None;
        while let Some(&last) = self.items.last() {
            if let Some(c) = self.remove_input_item(last, host) {
                change = Some(c);
            }
        }
        change
    }

    /// Target after `from`, wrapping to the first if `should_loop`.
    ///
    /// `None` at the end without looping, or if `from` is not registered.
    pub fn next_input_item(&self, from: K, should_loop: bool) -> Option<K> {
        self.adjacent(from, Navigation::Next, should_loop)
    }

    /// Target before `from`, wrapping to the last if `should_loop`.
    ///
    /// `None` at the start without looping, or if `from` is not registered.
    pub fn previous_input_item(&self, from: K, should_loop: bool) -> Option<K> {
        self.adjacent(from, Navigation::Prev, should_loop)
    }

    /// Target adjacent to `from` in the given direction.
    pub fn adjacent(&self, from: K, direction: Navigation, should_loop: bool) -> Option<K> {
        let index = self.items.iter().position(|&k| k == from)?;
        let last = self.items.len() - 1;
        let target = match direction {
            Navigation::Next if index < last => index + 1,
            Navigation::Next if should_loop => 0,
            Navigation::Prev if index > 0 => index - 1,
            Navigation::Prev if should_loop => last,
            Navigation::Next | Navigation::Prev => return None,
        };
        self.items.get(target).copied()
    }

    /// Ask the target after the focused one to take focus.
    ///
    /// No-op without focus or without a next target.
    pub fn goto_next_item<H: InputHost<K> + ?Sized>(
        &mut self,
        should_loop: bool,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        self.goto_item(Navigation::Next, should_loop, host)
    }

    /// Ask the target before the focused one to take focus.
    ///
    /// No-op without focus or without a previous target.
    pub fn goto_previous_item<H: InputHost<K> + ?Sized>(
        &mut self,
        should_loop: bool,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        self.goto_item(Navigation::Prev, should_loop, host)
    }

    /// Ask the target adjacent to the focused one to take focus.
    pub fn goto_item<H: InputHost<K> + ?Sized>(
        &mut self,
        direction: Navigation,
        should_loop: bool,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        let from = self.focused?;
        let target = self.adjacent(from, direction, should_loop)?;
        self.request_focus(target, host)
    }

    /// Set or clear the focused target.
    ///
    /// The focus listener is notified synchronously. Clearing focus also asks
    /// the previously focused target to resign. Returns `None` without
    /// changing anything if `item` is not registered.
    pub fn set_focused_item<H: InputHost<K> + ?Sized>(
        &mut self,
        item: Option<K>,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        if let Some(target) = item {
            if !self.contains(target) {
                log::warn!(target: LOG_TARGET, "cannot focus unregistered {target:?}");
                return None;
            }
        }
        let previous = core::mem::replace(&mut self.focused, item);
        let change = FocusChange {
            previous,
            current: item,
        };
        self.trace(format_args!("focus {previous:?} -> {item:?}"));
        if let Some(listener) = self.focus_listener.as_mut() {
            listener(change);
        }
        if let (Some(previous), None) = (previous, item) {
            host.resign_focus(previous);
        }
        Some(change)
    }

    /// The host reports that `target` began editing.
    ///
    /// Under return-key navigation the return key is labelled first:
    /// [`ReturnKey::Done`] on the last target, [`ReturnKey::Next`] elsewhere.
    /// Reports from unregistered targets are ignored.
    pub fn did_begin_editing<H: InputHost<K> + ?Sized>(
        &mut self,
        target: K,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        if !self.contains(target) {
            self.trace(format_args!("ignoring begin editing from {target:?}"));
            return None;
        }
        if self.kind.uses_keyboard_navigation() {
            let key = if self.items.last() == Some(&target) {
                ReturnKey::Done
            } else {
                ReturnKey::Next
            };
            host.set_return_key(target, key);
        }
        self.set_focused_item(Some(target), host)
    }

    /// The host reports a return-key press on `target`.
    ///
    /// Focus moves to the next target; on the last one focus is cleared.
    /// Never loops.
    pub fn should_return<H: InputHost<K> + ?Sized>(
        &mut self,
        target: K,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        if !self.contains(target) {
            self.trace(format_args!("ignoring return from {target:?}"));
            return None;
        }
        self.advance(target, false, host)
    }

    /// The host reports a tap on the accessory control.
    ///
    /// Previous and next loop when
    /// [`should_loop_accessory_navigation`](Self::should_loop_accessory_navigation)
    /// is set. Done, or next past the end, clears focus. Previous at the
    /// start without looping does nothing.
    pub fn accessory_action<H: InputHost<K> + ?Sized>(
        &mut self,
        action: AccessoryAction,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        let from = self.focused?;
        let should_loop = self.should_loop_accessory_navigation && self.kind.has_accessory();
        self.trace(format_args!("accessory {action:?} from {from:?}"));
        match action {
            AccessoryAction::Previous => {
                let target = self.previous_input_item(from, should_loop)?;
                self.request_focus(target, host)
            }
            AccessoryAction::Next => self.advance(from, should_loop, host),
            AccessoryAction::Done => self.set_focused_item(None, host),
        }
    }

    fn advance<H: InputHost<K> + ?Sized>(
        &mut self,
        from: K,
        should_loop: bool,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        match self.next_input_item(from, should_loop) {
            Some(next) => self.request_focus(next, host),
            None => self.set_focused_item(None, host),
        }
    }

    fn request_focus<H: InputHost<K> + ?Sized>(
        &mut self,
        target: K,
        host: &mut H,
    ) -> Option<FocusChange<K>> {
        if host.become_focused(target) {
            self.did_begin_editing(target, host)
        } else {
            self.trace(format_args!("waiting for {target:?} to begin editing"));
            None
        }
    }

    fn accessory_view<H: InputHost<K> + ?Sized>(&self, host: &mut H) -> Option<K> {
        match self.kind.accessory_source() {
            AccessorySource::None => None,
            AccessorySource::Default => host.default_accessory(),
            AccessorySource::Supplied => self.accessory,
        }
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        if self.logging_enabled {
            log::debug!(target: LOG_TARGET, "{args}");
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for InputNavigator<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputNavigator")
            .field("kind", &self.kind)
            .field("accessory", &self.accessory)
            .field("items", &self.items)
            .field("focused", &self.focused)
            .field(
                "should_loop_accessory_navigation",
                &self.should_loop_accessory_navigation,
            )
            .field("logging_enabled", &self.logging_enabled)
            .field("has_focus_listener", &self.focus_listener.is_some())
            .finish()
    }
}
