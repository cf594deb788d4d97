// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The keyboard assistant: keyboard events in, constraint and scroll updates out.
//!
//! ## Reactions
//!
//! | Event | Reaction |
//! |---|---|
//! | `WillShow` | Set the bottom constraint to the keyboard height, unanimated. |
//! | `DidShow` | Reposition to the focused target. |
//! | `WillHide` | Animate the bottom constraint back to its reset constant. |
//! | `DidHide` | Nothing. |
//! | Height change | Set the bottom constraint, then reposition to the focused target. |
//! | Focus moved to a target | Reposition to it. |
//!
//! Repositioning only has an effect while the keyboard is up.

use alloc::boxed::Box;
use core::fmt;

use kurbo::Point;
use understory_input_nav::{AccessoryAction, FocusChange, InputNavigator, Navigation};
use understory_keyboard::{
    KeyboardEvent, KeyboardEvents, KeyboardNotification, KeyboardObserver, KeyboardState,
    KeyboardStateChange,
};

use crate::geometry::{clamp_scroll_offset, desired_offset};
use crate::host::{RepositionDelegate, RepositionHost, Transition};
use crate::options::{
    AssistantOptions, BottomConstraint, PositionConstraint, RepositionMode, ScrollPlacement,
};

const LOG_TARGET: &str = "understory_keyboard_assist";

/// Duration of the constraint update when the keyboard height is applied
/// with animation.
const SHOW_CONSTRAINT_DURATION: f64 = 0.2;
/// Duration of the constraint update when it is reset.
const RESET_CONSTRAINT_DURATION: f64 = 0.3;

/// Keeps the focused input visible while the on-screen keyboard is up.
///
/// The assistant owns a [`KeyboardObserver`] and an [`InputNavigator`]. The
/// host forwards platform keyboard notifications to
/// [`handle_keyboard_notification`](Self::handle_keyboard_notification) and
/// editing events to [`did_begin_editing`](Self::did_begin_editing),
/// [`should_return`](Self::should_return) and
/// [`accessory_action`](Self::accessory_action).
///
/// Scroll containers, constraints and layout views are referenced by handle
/// only. The host must call [`stop`](Self::stop) before tearing them down for
/// good; until then a missing collaborator just skips the affected step.
pub struct KeyboardAssistant<K> {
    observer: KeyboardObserver,
    navigator: InputNavigator<K>,
    mode: RepositionMode,
    scroll_container: Option<K>,
    placement: ScrollPlacement,
    bottom_constraint: Option<BottomConstraint<K>>,
    delegate: Option<Box<dyn RepositionDelegate<K>>>,
    options: AssistantOptions,
    started: bool,
}

impl<K: Copy + Eq + fmt::Debug> KeyboardAssistant<K> {
    fn with_parts(
        navigator: InputNavigator<K>,
        mode: RepositionMode,
        scroll_container: Option<K>,
        placement: ScrollPlacement,
        bottom_constraint: Option<BottomConstraint<K>>,
        delegate: Option<Box<dyn RepositionDelegate<K>>>,
    ) -> Self {
        Self {
            observer: KeyboardObserver::new(false),
            navigator,
            mode,
            scroll_container,
            placement,
            bottom_constraint,
            delegate,
            options: AssistantOptions::default(),
            started: false,
        }
    }

    /// Scroll `scroll_container` so the focused target sits per `placement`,
    /// and pin `bottom_constraint` to the keyboard.
    pub fn auto_scroll(
        navigator: InputNavigator<K>,
        scroll_container: K,
        placement: ScrollPlacement,
        bottom_constraint: BottomConstraint<K>,
    ) -> Self {
        Self::with_parts(
            navigator,
            RepositionMode::AutomaticScrollContainer,
            Some(scroll_container),
            placement,
            Some(bottom_constraint),
            None,
        )
    }

    /// Pin `bottom_constraint` to the keyboard and leave placement to
    /// `delegate`.
    pub fn manual_with_bottom_constraint(
        navigator: InputNavigator<K>,
        delegate: impl RepositionDelegate<K> + 'static,
        bottom_constraint: BottomConstraint<K>,
    ) -> Self {
        Self::with_parts(
            navigator,
            RepositionMode::ManualWithLayoutConstraint,
            None,
            ScrollPlacement::default(),
            Some(bottom_constraint),
            Some(Box::new(delegate)),
        )
    }

    /// Leave placement to `delegate` and manage no constraint.
    pub fn manual(
        navigator: InputNavigator<K>,
        delegate: impl RepositionDelegate<K> + 'static,
    ) -> Self {
        Self::with_parts(
            navigator,
            RepositionMode::ManualUnconstrained,
            None,
            ScrollPlacement::default(),
            None,
            Some(Box::new(delegate)),
        )
    }

    /// Replace the options, builder style.
    pub fn with_options(mut self, options: AssistantOptions) -> Self {
        self.set_options(options);
        self
    }

    /// Replace the options.
    ///
    /// The logging switch also applies to the owned observer and navigator.
    pub fn set_options(&mut self, options: AssistantOptions) {
        self.options = options;
        self.observer.set_logging_enabled(options.logging_enabled);
        self.navigator.set_logging_enabled(options.logging_enabled);
    }

    /// Current options.
    pub fn options(&self) -> &AssistantOptions {
        &self.options
    }

    /// The configured mode.
    pub fn mode(&self) -> RepositionMode {
        self.mode
    }

    /// Scroll container of the automatic mode.
    pub fn scroll_container(&self) -> Option<K> {
        self.scroll_container
    }

    /// Placement of the automatic mode.
    pub fn placement(&self) -> ScrollPlacement {
        self.placement
    }

    /// Managed bottom constraint, if the mode has one.
    pub fn bottom_constraint(&self) -> Option<BottomConstraint<K>> {
        self.bottom_constraint
    }

    /// The owned keyboard observer.
    pub fn observer(&self) -> &KeyboardObserver {
        &self.observer
    }

    /// The owned keyboard observer, for subscribing to its streams.
    pub fn observer_mut(&mut self) -> &mut KeyboardObserver {
        &mut self.observer
    }

    /// The owned navigator.
    pub fn navigator(&self) -> &InputNavigator<K> {
        &self.navigator
    }

    /// The owned navigator, for registering targets.
    ///
    /// Focus changes made directly on the navigator do not reposition. Use
    /// [`set_focused_item`](Self::set_focused_item) and the other focus
    /// methods on the assistant instead.
    pub fn navigator_mut(&mut self) -> &mut InputNavigator<K> {
        &mut self.navigator
    }

    /// Whether [`start`](Self::start) was called without a later
    /// [`stop`](Self::stop).
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Begin reacting to keyboard notifications and focus changes.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.observer.start_observing();
        self.trace(format_args!("started in {:?}", self.mode));
    }

    /// Clear focus and stop reacting. Safe to call repeatedly.
    pub fn stop(&mut self, host: &mut dyn RepositionHost<K>) {
        self.close_keyboard(host);
        if !self.started {
            return;
        }
        self.started = false;
        self.observer.stop_observing();
        self.trace(format_args!("stopped"));
    }

    /// Clear focus, which dismisses the keyboard.
    ///
    /// Does nothing when no target is focused; the navigator's focus listener
    /// is only told about an actual change.
    pub fn close_keyboard(
        &mut self,
        host: &mut dyn RepositionHost<K>,
    ) -> Option<FocusChange<K>> {
        if self.navigator.focused_item().is_none() {
            return None;
        }
        self.navigator.set_focused_item(None, host)
    }

    /// Forward one platform keyboard notification.
    ///
    /// Returns the events the observer produced, after reacting to them.
    pub fn handle_keyboard_notification(
        &mut self,
        notification: &KeyboardNotification,
        host: &mut dyn RepositionHost<K>,
    ) -> KeyboardEvents {
        let events = self.observer.handle(notification);
        for event in &events {
            match *event {
                KeyboardEvent::StateChanged(change) => self.on_state_change(change, host),
                KeyboardEvent::HeightChanged(height) => self.on_height_change(height, host),
            }
        }
        events
    }

    /// Forward a target's begin-editing report to the navigator.
    pub fn did_begin_editing(
        &mut self,
        target: K,
        host: &mut dyn RepositionHost<K>,
    ) -> Option<FocusChange<K>> {
        let change = self.navigator.did_begin_editing(target, host);
        self.on_focus_change(change, host);
        change
    }

    /// Forward a return-key press to the navigator.
    pub fn should_return(
        &mut self,
        target: K,
        host: &mut dyn RepositionHost<K>,
    ) -> Option<FocusChange<K>> {
        let change = self.navigator.should_return(target, host);
        self.on_focus_change(change, host);
        change
    }

    /// Forward an accessory tap to the navigator.
    pub fn accessory_action(
        &mut self,
        action: AccessoryAction,
        host: &mut dyn RepositionHost<K>,
    ) -> Option<FocusChange<K>> {
        let change = self.navigator.accessory_action(action, host);
        self.on_focus_change(change, host);
        change
    }

    /// Focus `item` (or clear focus with `None`) and bring it into view.
    ///
    /// Unregistered targets are rejected, as with
    /// [`InputNavigator::set_focused_item`].
    pub fn set_focused_item(
        &mut self,
        item: Option<K>,
        host: &mut dyn RepositionHost<K>,
    ) -> Option<FocusChange<K>> {
        let change = self.navigator.set_focused_item(item, host);
        self.on_focus_change(change, host);
        change
    }

    /// Move focus to the target after the focused one.
    pub fn goto_next_item(
        &mut self,
        should_loop: bool,
        host: &mut dyn RepositionHost<K>,
    ) -> Option<FocusChange<K>> {
        self.goto_item(Navigation::Next, should_loop, host)
    }

    /// Move focus to the target before the focused one.
    pub fn goto_previous_item(
        &mut self,
        should_loop: bool,
        host: &mut dyn RepositionHost<K>,
    ) -> Option<FocusChange<K>> {
        self.goto_item(Navigation::Prev, should_loop, host)
    }

    /// Move focus next to the focused target.
    pub fn goto_item(
        &mut self,
        direction: Navigation,
        should_loop: bool,
        host: &mut dyn RepositionHost<K>,
    ) -> Option<FocusChange<K>> {
        let change = self.navigator.goto_item(direction, should_loop, host);
        self.on_focus_change(change, host);
        change
    }

    /// Set the managed bottom constraint to the keyboard height.
    ///
    /// The height is negated when
    /// [`invert_bottom_constraint_constant`](AssistantOptions::invert_bottom_constraint_constant)
    /// is set. Returns `false` when there is no constraint or the host could
    /// not apply it.
    pub fn set_bottom_constraint_to_keyboard(
        &self,
        keyboard_height: f64,
        animated: bool,
        host: &mut dyn RepositionHost<K>,
    ) -> bool {
        let constant = if self.options.invert_bottom_constraint_constant {
            -keyboard_height
        } else {
            keyboard_height
        };
        self.apply_bottom_constraint(constant, animated.then_some(SHOW_CONSTRAINT_DURATION), host)
    }

    /// Restore the managed bottom constraint to `constant`.
    pub fn reset_bottom_constraint(
        &self,
        constant: f64,
        animated: bool,
        host: &mut dyn RepositionHost<K>,
    ) -> bool {
        self.apply_bottom_constraint(constant, animated.then_some(RESET_CONSTRAINT_DURATION), host)
    }

    /// Scroll `scroll_container` so that `target` is aligned per `constraint`.
    ///
    /// Does nothing unless the keyboard is up. `target` need not be one of
    /// the navigator's targets, which lets a [`RepositionDelegate`] position
    /// any view. Returns the content offset that was applied, or `None` when
    /// skipped.
    pub fn reposition(
        &self,
        host: &mut dyn RepositionHost<K>,
        scroll_container: K,
        target: K,
        constraint: PositionConstraint,
        offset: f64,
    ) -> Option<f64> {
        if !self.observer.is_up() {
            self.trace(format_args!("keyboard is down, not repositioning to {target:?}"));
            return None;
        }
        let Some(frame) = host.frame(target) else {
            self.trace(format_args!("no frame for {target:?}"));
            return None;
        };
        let Some(container) = host.frame(scroll_container) else {
            self.trace(format_args!("no frame for scroll container {scroll_container:?}"));
            return None;
        };
        let Some(content) = host.content_size(scroll_container) else {
            self.trace(format_args!("no content size for {scroll_container:?}"));
            return None;
        };
        // Converting the frame origin from the target's own space counts the
        // origin twice.
        let Some(converted) = host.convert_point(frame.origin(), target, scroll_container) else {
            self.trace(format_args!("{target:?} is not in {scroll_container:?}'s hierarchy"));
            return None;
        };
        let target_y = converted.y - frame.y0;

        let visible_height = container.height();
        let desired = desired_offset(target_y, frame.height(), visible_height, constraint, offset);
        let applied = clamp_scroll_offset(desired, content.height, visible_height);
        self.trace(format_args!(
            "reposition {target:?}: constraint {constraint:?}, offset {offset}, \
             target y {target_y}, desired {desired}, applied {applied}"
        ));

        let transition = Transition::ease_out(self.options.animation_duration);
        if !host.set_content_offset(scroll_container, Point::new(0.0, applied), Some(transition)) {
            self.trace(format_args!("scroll container {scroll_container:?} is gone"));
            return None;
        }
        Some(applied)
    }

    fn on_state_change(&mut self, change: KeyboardStateChange, host: &mut dyn RepositionHost<K>) {
        self.trace(format_args!("keyboard state changed: {:?}", change.state));
        match change.state {
            KeyboardState::WillShow => {
                self.set_bottom_constraint_to_keyboard(change.height, false, host);
            }
            KeyboardState::DidShow => self.reposition_to_focused(host),
            KeyboardState::WillHide => {
                let constant = self.options.reset_bottom_constraint_constant;
                self.reset_bottom_constraint(constant, true, host);
            }
            KeyboardState::DidHide => {}
        }
    }

    fn on_height_change(&mut self, height: f64, host: &mut dyn RepositionHost<K>) {
        self.trace(format_args!("keyboard height changed: {height}"));
        self.set_bottom_constraint_to_keyboard(height, false, host);
        self.reposition_to_focused(host);
    }

    fn on_focus_change(
        &mut self,
        change: Option<FocusChange<K>>,
        host: &mut dyn RepositionHost<K>,
    ) {
        if !self.started {
            return;
        }
        if let Some(FocusChange {
            current: Some(target),
            ..
        }) = change
        {
            self.trace(format_args!("input focus changed to {target:?}"));
            self.reposition_to_target(target, host);
        }
    }

    fn reposition_to_focused(&mut self, host: &mut dyn RepositionHost<K>) {
        if let Some(target) = self.navigator.focused_item() {
            self.reposition_to_target(target, host);
        }
    }

    fn reposition_to_target(&mut self, target: K, host: &mut dyn RepositionHost<K>) {
        match self.mode {
            RepositionMode::AutomaticScrollContainer => {
                let Some(scroll_container) = self.scroll_container else {
                    self.trace(format_args!("no scroll container"));
                    return;
                };
                let ScrollPlacement { constraint, offset } = self.placement;
                self.reposition(host, scroll_container, target, constraint, offset);
            }
            RepositionMode::ManualWithLayoutConstraint | RepositionMode::ManualUnconstrained => {
                let Some(mut delegate) = self.delegate.take() else {
                    self.trace(format_args!("no reposition delegate"));
                    return;
                };
                let height = self.observer.height();
                delegate.manually_reposition(self, host, target, height);
                self.delegate = Some(delegate);
            }
        }
    }

    fn apply_bottom_constraint(
        &self,
        constant: f64,
        duration: Option<f64>,
        host: &mut dyn RepositionHost<K>,
    ) -> bool {
        let Some(bottom) = self.bottom_constraint else {
            self.trace(format_args!("no bottom constraint"));
            return false;
        };
        if !host.set_constraint_constant(bottom.constraint, constant) {
            self.trace(format_args!("bottom constraint {:?} is gone", bottom.constraint));
            return false;
        }
        self.trace(format_args!("bottom constraint constant {constant}"));
        host.layout_if_needed(bottom.layout_view, duration.map(Transition::ease_out))
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        if self.options.logging_enabled {
            log::debug!(target: LOG_TARGET, "{args}");
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for KeyboardAssistant<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardAssistant")
            .field("observer", &self.observer)
            .field("navigator", &self.navigator)
            .field("mode", &self.mode)
            .field("scroll_container", &self.scroll_container)
            .field("placement", &self.placement)
            .field("bottom_constraint", &self.bottom_constraint)
            .field("has_delegate", &self.delegate.is_some())
            .field("options", &self.options)
            .field("started", &self.started)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    use kurbo::{Rect, Size};
    use understory_input_nav::{InputHost, NavigatorKind};
    use understory_keyboard::KeyboardInfo;
    use understory_view_tree::{LocalView, NodeId, Tree};

    use crate::host::ConstraintId;

    const BOTTOM: ConstraintId = ConstraintId(7);

    /// A sign-up form: three fields in a 600-tall scroll container with
    /// 1000 units of content.
    struct Form {
        tree: Tree,
        screen: NodeId,
        scroll: NodeId,
        first_name: NodeId,
        last_name: NodeId,
        email: NodeId,
        focused: Option<NodeId>,
        resigned: Vec<NodeId>,
        offsets: Vec<(f64, Option<Transition>)>,
        constants: Vec<(ConstraintId, f64)>,
        layouts: Vec<(NodeId, Option<Transition>)>,
    }

    impl Form {
        fn new() -> Self {
            let mut tree = Tree::new();
            let screen = tree.insert(None, LocalView::with_frame(Rect::new(0.0, 0.0, 320.0, 640.0)));
            let scroll = tree.insert(
                Some(screen),
                LocalView::scroll_container(
                    Rect::new(0.0, 0.0, 320.0, 600.0),
                    Size::new(320.0, 1000.0),
                ),
            );
            let field = |y: f64| LocalView::text_input(Rect::new(10.0, y, 310.0, y + 40.0));
            let first_name = tree.insert(Some(scroll), field(50.0));
            let last_name = tree.insert(Some(scroll), field(150.0));
            let email = tree.insert(Some(scroll), field(250.0));
            Self {
                tree,
                screen,
                scroll,
                first_name,
                last_name,
                email,
                focused: None,
                resigned: Vec::new(),
                offsets: Vec::new(),
                constants: Vec::new(),
                layouts: Vec::new(),
            }
        }

        fn fields(&self) -> [NodeId; 3] {
            [self.first_name, self.last_name, self.email]
        }

        fn bottom(&self) -> BottomConstraint<NodeId> {
            BottomConstraint {
                constraint: BOTTOM,
                layout_view: self.screen,
            }
        }

        fn auto(&mut self, placement: ScrollPlacement) -> KeyboardAssistant<NodeId> {
            let mut nav = InputNavigator::with_keyboard_navigation();
            nav.add_input_items(self.fields(), self);
            let mut assistant =
                KeyboardAssistant::auto_scroll(nav, self.scroll, placement, self.bottom());
            assistant.start();
            assistant
        }
    }

    impl InputHost<NodeId> for Form {
        fn set_editing_delegate(&mut self, _: NodeId, _: bool) {}

        fn set_input_accessory(&mut self, _: NodeId, _: Option<NodeId>) {}

        fn become_focused(&mut self, target: NodeId) -> bool {
            self.focused = Some(target);
            true
        }

        fn resign_focus(&mut self, target: NodeId) {
            self.resigned.push(target);
            if self.focused == Some(target) {
                self.focused = None;
            }
        }
    }

    impl RepositionHost<NodeId> for Form {
        fn frame(&self, view: NodeId) -> Option<Rect> {
            self.tree.frame(view)
        }

        fn convert_point(&self, point: Point, from: NodeId, to: NodeId) -> Option<Point> {
            self.tree.convert_point(point, from, to)
        }

        fn content_size(&self, scroll_container: NodeId) -> Option<Size> {
            self.tree.content_size(scroll_container)
        }

        fn set_content_offset(
            &mut self,
            scroll_container: NodeId,
            offset: Point,
            transition: Option<Transition>,
        ) -> bool {
            if !self.tree.is_alive(scroll_container) {
                return false;
            }
            self.tree.set_bounds_origin(scroll_container, offset);
            self.offsets.push((offset.y, transition));
            true
        }

        fn set_constraint_constant(&mut self, constraint: ConstraintId, constant: f64) -> bool {
            self.constants.push((constraint, constant));
            true
        }

        fn layout_if_needed(&mut self, view: NodeId, transition: Option<Transition>) -> bool {
            self.layouts.push((view, transition));
            true
        }
    }

    fn keyboard(height: f64) -> KeyboardInfo {
        KeyboardInfo::with_end_frame(Rect::new(0.0, 640.0 - height, 320.0, 640.0)).animated(0.25)
    }

    fn send(
        assistant: &mut KeyboardAssistant<NodeId>,
        form: &mut Form,
        notification: KeyboardNotification,
    ) -> KeyboardEvents {
        assistant.handle_keyboard_notification(&notification, form)
    }

    fn show(assistant: &mut KeyboardAssistant<NodeId>, form: &mut Form, height: f64) {
        send(assistant, form, KeyboardNotification::WillShow(keyboard(height)));
        send(assistant, form, KeyboardNotification::DidShow(keyboard(height)));
    }

    #[test]
    fn top_alignment_scrolls_focused_field_under_gap() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::new(
            PositionConstraint::TopAlignToScreenTop,
            20.0,
        ));
        show(&mut assistant, &mut form, 300.0);

        let last_name = form.last_name;
        assistant.did_begin_editing(last_name, &mut form);
        assert_eq!(form.offsets, [(130.0, Some(Transition::ease_out(0.3)))]);
    }

    #[test]
    fn bottom_alignment_clamps_at_content_start() {
        let mut form = Form::new();
        let assistant_placement =
            ScrollPlacement::new(PositionConstraint::BottomAlignToKeyboardTop, 30.0);
        let mut assistant = form.auto(assistant_placement);
        show(&mut assistant, &mut form, 300.0);

        let (scroll, last_name) = (form.scroll, form.last_name);
        let applied = assistant.reposition(
            &mut form,
            scroll,
            last_name,
            PositionConstraint::BottomAlignToKeyboardTop,
            30.0,
        );
        assert_eq!(applied, Some(0.0));
    }

    #[test]
    fn focus_before_keyboard_repositions_on_did_show() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::default());
        let email = form.email;
        assistant.did_begin_editing(email, &mut form);
        assert!(form.offsets.is_empty(), "keyboard is still down");

        show(&mut assistant, &mut form, 300.0);
        assert_eq!(form.offsets.len(), 1);
        assert_eq!(form.offsets[0].0, 230.0);
    }

    #[test]
    fn reposition_is_noop_while_keyboard_down() {
        let mut form = Form::new();
        let assistant = form.auto(ScrollPlacement::default());
        let (scroll, email) = (form.scroll, form.email);
        let applied = assistant.reposition(
            &mut form,
            scroll,
            email,
            PositionConstraint::TopAlignToScreenTop,
            20.0,
        );
        assert_eq!(applied, None);
        assert!(form.offsets.is_empty());
    }

    #[test]
    fn bottom_constraint_follows_keyboard() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::default());
        show(&mut assistant, &mut form, 300.0);
        // Once for the new height, once for the will-show state.
        assert_eq!(form.constants, [(BOTTOM, -300.0), (BOTTOM, -300.0)]);
        assert_eq!(form.layouts, [(form.screen, None), (form.screen, None)]);

        send(&mut assistant, &mut form, KeyboardNotification::WillHide(keyboard(300.0)));
        send(&mut assistant, &mut form, KeyboardNotification::DidHide(keyboard(300.0)));
        assert_eq!(form.constants.last(), Some(&(BOTTOM, 0.0)));
        assert_eq!(form.constants.len(), 3);
        assert_eq!(
            form.layouts[2],
            (form.screen, Some(Transition::ease_out(RESET_CONSTRAINT_DURATION)))
        );
        assert_eq!(assistant.observer().animation_duration(), 0.25);
    }

    #[test]
    fn uninverted_constant_and_custom_reset() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::default()).with_options(
            AssistantOptions::default()
                .with_invert_bottom_constraint_constant(false)
                .with_reset_bottom_constraint_constant(12.0),
        );
        show(&mut assistant, &mut form, 280.0);
        send(&mut assistant, &mut form, KeyboardNotification::WillHide(keyboard(280.0)));
        assert_eq!(
            form.constants,
            [(BOTTOM, 280.0), (BOTTOM, 280.0), (BOTTOM, 12.0)]
        );

        assert!(assistant.set_bottom_constraint_to_keyboard(100.0, true, &mut form));
        assert_eq!(
            form.layouts.last(),
            Some(&(form.screen, Some(Transition::ease_out(SHOW_CONSTRAINT_DURATION))))
        );
    }

    #[test]
    fn height_change_while_up_adjusts_and_repositions() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::default());
        show(&mut assistant, &mut form, 300.0);
        let first_name = form.first_name;
        assistant.did_begin_editing(first_name, &mut form);
        assert_eq!(form.offsets.len(), 1);

        let events = send(
            &mut assistant,
            &mut form,
            KeyboardNotification::DidChangeFrame(keyboard(340.0)),
        );
        assert_eq!(events.as_slice(), [KeyboardEvent::HeightChanged(340.0)]);
        assert_eq!(form.constants.last(), Some(&(BOTTOM, -340.0)));
        assert_eq!(form.offsets.len(), 2);
        assert_eq!(form.offsets[1].0, 30.0);

        // Same height again: nothing new.
        send(
            &mut assistant,
            &mut form,
            KeyboardNotification::DidChangeFrame(keyboard(340.0)),
        );
        assert_eq!(form.offsets.len(), 2);
    }

    #[test]
    fn return_on_last_field_clears_focus_without_scrolling() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::default());
        show(&mut assistant, &mut form, 300.0);
        let [first_name, last_name, email] = form.fields();

        assistant.did_begin_editing(first_name, &mut form);
        assistant.should_return(first_name, &mut form);
        assert_eq!(assistant.navigator().focused_item(), Some(last_name));
        assistant.goto_item(Navigation::Next, false, &mut form);
        assert_eq!(form.focused, Some(email));
        let scrolled = form.offsets.len();
        assert_eq!(scrolled, 3);

        let change = assistant.should_return(email, &mut form);
        assert_eq!(change.and_then(|c| c.current), None);
        assert_eq!(assistant.navigator().focused_item(), None);
        assert_eq!(form.resigned, [email]);
        assert_eq!(form.offsets.len(), scrolled);
    }

    #[test]
    fn torn_down_scroll_container_is_skipped() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::default());
        show(&mut assistant, &mut form, 300.0);
        form.tree.remove(form.scroll);

        let last_name = form.last_name;
        assert!(assistant.did_begin_editing(last_name, &mut form).is_some());
        assert!(form.offsets.is_empty());
    }

    #[test]
    fn manual_delegate_positions_next_field() {
        let mut form = Form::new();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let scroll = form.scroll;

        let mut nav = InputNavigator::new(NavigatorKind::Keyboard, None);
        nav.add_input_items(form.fields(), &mut form);
        let bottom = form.bottom();
        let mut assistant = KeyboardAssistant::manual_with_bottom_constraint(
            nav,
            move |assistant: &KeyboardAssistant<NodeId>,
                  host: &mut dyn RepositionHost<NodeId>,
                  target: NodeId,
                  height: f64| {
                let next = assistant
                    .navigator()
                    .next_input_item(target, false)
                    .unwrap_or(target);
                let applied = assistant.reposition(
                    host,
                    scroll,
                    next,
                    PositionConstraint::BottomAlignToKeyboardTop,
                    10.0,
                );
                sink.borrow_mut().push((target, height, applied));
            },
            bottom,
        );
        assistant.start();
        show(&mut assistant, &mut form, 300.0);

        let first_name = form.first_name;
        assistant.did_begin_editing(first_name, &mut form);
        // Last name: 150 - 600 + 40 + 10 = -400, clamped.
        assert_eq!(*calls.borrow(), [(first_name, 300.0, Some(0.0))]);
        assert_eq!(assistant.mode(), RepositionMode::ManualWithLayoutConstraint);
        assert_eq!(form.constants, [(BOTTOM, -300.0), (BOTTOM, -300.0)]);
    }

    #[test]
    fn unconstrained_mode_never_touches_constraints() {
        let mut form = Form::new();
        let calls = Rc::new(RefCell::new(0_u32));
        let sink = Rc::clone(&calls);

        let mut nav = InputNavigator::with_keyboard_navigation();
        nav.add_input_items(form.fields(), &mut form);
        let mut assistant = KeyboardAssistant::manual(
            nav,
            move |_: &KeyboardAssistant<NodeId>,
                  _: &mut dyn RepositionHost<NodeId>,
                  _: NodeId,
                  _: f64| {
                *sink.borrow_mut() += 1;
            },
        );
        assistant.start();
        show(&mut assistant, &mut form, 300.0);
        send(&mut assistant, &mut form, KeyboardNotification::WillHide(keyboard(300.0)));
        assert!(form.constants.is_empty());
        assert!(form.layouts.is_empty());

        let email = form.email;
        assistant.did_begin_editing(email, &mut form);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn stop_clears_focus_and_ignores_later_events() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::default());
        let email = form.email;
        assistant.did_begin_editing(email, &mut form);

        assistant.stop(&mut form);
        assert!(!assistant.is_started());
        assert!(!assistant.observer().is_observing());
        assert_eq!(assistant.navigator().focused_item(), None);
        assert_eq!(form.resigned, [email]);

        assistant.stop(&mut form);
        assert_eq!(form.resigned, [email]);

        let events = send(
            &mut assistant,
            &mut form,
            KeyboardNotification::WillShow(keyboard(300.0)),
        );
        assert!(events.is_empty());
        assert!(form.constants.is_empty());
    }

    #[test]
    fn programmatic_focus_scrolls_while_keyboard_up() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::default());
        show(&mut assistant, &mut form, 300.0);

        let email = form.email;
        let change = assistant.set_focused_item(Some(email), &mut form);
        assert_eq!(change.and_then(|c| c.current), Some(email));
        assert_eq!(form.offsets, [(230.0, Some(Transition::ease_out(0.3)))]);

        let last_name = form.last_name;
        let change = assistant.goto_previous_item(false, &mut form);
        assert_eq!(change.and_then(|c| c.current), Some(last_name));
        assert_eq!(form.offsets.last().map(|o| o.0), Some(130.0));

        assistant.goto_next_item(false, &mut form);
        assert_eq!(form.offsets.last().map(|o| o.0), Some(230.0));
        assert_eq!(form.offsets.len(), 3);

        assert_eq!(assistant.goto_next_item(false, &mut form), None);
        assert_eq!(assistant.navigator().focused_item(), Some(email));
        assert_eq!(form.offsets.len(), 3);
    }

    #[test]
    fn close_keyboard_resigns_focused_field() {
        let mut form = Form::new();
        let mut assistant = form.auto(ScrollPlacement::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        assistant
            .navigator_mut()
            .set_focus_listener(move |change: FocusChange<NodeId>| sink.borrow_mut().push(change));
        assert_eq!(assistant.close_keyboard(&mut form), None);
        assert!(seen.borrow().is_empty(), "nothing was focused");

        let last_name = form.last_name;
        assistant.did_begin_editing(last_name, &mut form);
        let change = assistant.close_keyboard(&mut form);
        assert_eq!(change.and_then(|c| c.previous), Some(last_name));
        assert_eq!(form.focused, None);
        assert!(assistant.is_started());
        assert_eq!(seen.borrow().len(), 2);
    }
}
