// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A sign-up form scrolled above the keyboard.
//!
//! This example shows how to combine:
//! - `understory_view_tree` as the host's view hierarchy,
//! - `understory_input_nav` to discover the form's text inputs in reading order,
//! - `understory_keyboard_assist` to keep the focused input visible while the
//!   keyboard shows, changes height, and hides.
//!
//! Run:
//! - `cargo run -p understory_demos --example sign_up_form`

use kurbo::{Point, Rect, Size};
use log::{Level, LevelFilter, Log, Metadata, Record};
use understory_input_nav::adapters::view_tree::input_targets;
use understory_input_nav::{InputHost, InputNavigator, ReturnKey};
use understory_keyboard::{KeyboardInfo, KeyboardNotification};
use understory_keyboard_assist::{
    AssistantOptions, BottomConstraint, ConstraintId, KeyboardAssistant, PositionConstraint,
    RepositionHost, ScrollPlacement, Transition,
};
use understory_view_tree::{LocalView, NodeId, Tree};

/// Prints every record to stdout.
struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            println!("  [{} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StdoutLogger = StdoutLogger;

const SCREEN_HEIGHT: f64 = 640.0;
const KEYBOARD_CONSTRAINT: ConstraintId = ConstraintId(1);

/// The host side: a view tree plus the bits of UI state the assistant drives.
struct SignUpScreen {
    tree: Tree,
    root: NodeId,
    scroll: NodeId,
    names: Vec<(NodeId, &'static str)>,
    focused: Option<NodeId>,
}

impl SignUpScreen {
    fn new() -> Self {
        let mut tree = Tree::new();
        let root = tree.insert(
            None,
            LocalView::with_frame(Rect::new(0.0, 0.0, 320.0, SCREEN_HEIGHT)),
        );
        let scroll = tree.insert(
            Some(root),
            LocalView::scroll_container(
                Rect::new(0.0, 0.0, 320.0, SCREEN_HEIGHT),
                Size::new(320.0, 1200.0),
            ),
        );
        let mut names = Vec::new();
        // Inserted out of order on purpose; discovery sorts them.
        let rows = [
            ("password", Rect::new(16.0, 700.0, 304.0, 740.0)),
            ("first name", Rect::new(16.0, 150.0, 156.0, 190.0)),
            ("last name", Rect::new(164.0, 150.0, 304.0, 190.0)),
            ("email", Rect::new(16.0, 420.0, 304.0, 460.0)),
        ];
        for (name, frame) in rows {
            names.push((tree.insert(Some(scroll), LocalView::text_input(frame)), name));
        }
        Self {
            tree,
            root,
            scroll,
            names,
            focused: None,
        }
    }

    fn name(&self, id: NodeId) -> &'static str {
        self.names
            .iter()
            .find(|(n, _)| *n == id)
            .map_or("?", |(_, name)| *name)
    }

    fn content_offset(&self) -> f64 {
        self.tree.bounds_origin(self.scroll).map_or(0.0, |p| p.y)
    }
}

impl InputHost<NodeId> for SignUpScreen {
    fn set_editing_delegate(&mut self, _: NodeId, _: bool) {}

    fn set_input_accessory(&mut self, _: NodeId, _: Option<NodeId>) {}

    fn become_focused(&mut self, target: NodeId) -> bool {
        self.focused = Some(target);
        true
    }

    fn resign_focus(&mut self, target: NodeId) {
        println!("{} resigns focus", self.name(target));
        if self.focused == Some(target) {
            self.focused = None;
        }
    }

    fn set_return_key(&mut self, target: NodeId, key: ReturnKey) {
        println!("{} return key: {key:?}", self.name(target));
    }
}

impl RepositionHost<NodeId> for SignUpScreen {
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
        let duration = transition.map_or(0.0, |t| t.duration);
        println!("scroll to y = {} over {duration} s", offset.y);
        self.tree.set_bounds_origin(scroll_container, offset);
        true
    }

    fn set_constraint_constant(&mut self, _: ConstraintId, constant: f64) -> bool {
        // The scroll container is pinned to the screen bottom; a negative
        // constant lifts its bottom edge.
        let Some(mut frame) = self.tree.frame(self.scroll) else {
            return false;
        };
        frame.y1 = SCREEN_HEIGHT + constant;
        self.tree.set_frame(self.scroll, frame);
        true
    }

    fn layout_if_needed(&mut self, _: NodeId, _: Option<Transition>) -> bool {
        true
    }
}

fn keyboard(height: f64) -> KeyboardInfo {
    KeyboardInfo::with_end_frame(Rect::new(0.0, SCREEN_HEIGHT - height, 320.0, SCREEN_HEIGHT))
        .animated(0.25)
}

fn send(
    assistant: &mut KeyboardAssistant<NodeId>,
    screen: &mut SignUpScreen,
    notification: KeyboardNotification,
) {
    assistant.handle_keyboard_notification(&notification, screen);
}

fn main() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }

    let mut screen = SignUpScreen::new();
    let targets = input_targets(&screen.tree, screen.root);
    let order: Vec<&str> = targets.iter().map(|&id| screen.name(id)).collect();
    println!("navigation order: {order:?}");

    let mut navigator = InputNavigator::with_keyboard_navigation();
    navigator.add_input_items(targets.iter().copied(), &mut screen);

    let bottom = BottomConstraint {
        constraint: KEYBOARD_CONSTRAINT,
        layout_view: screen.root,
    };
    let mut assistant = KeyboardAssistant::auto_scroll(
        navigator,
        screen.scroll,
        ScrollPlacement::new(PositionConstraint::TopAlignToScreenTop, 20.0),
        bottom,
    )
    .with_options(AssistantOptions::default().with_logging(true));
    assistant.start();

    println!("\n-- tap {} --", screen.name(targets[1]));
    assistant.did_begin_editing(targets[1], &mut screen);
    send(&mut assistant, &mut screen, KeyboardNotification::WillShow(keyboard(300.0)));
    send(&mut assistant, &mut screen, KeyboardNotification::DidShow(keyboard(300.0)));

    println!("\n-- return --");
    assistant.should_return(targets[1], &mut screen);
    println!("content offset {}", screen.content_offset());

    println!("\n-- keyboard grows (emoji bar) --");
    send(
        &mut assistant,
        &mut screen,
        KeyboardNotification::DidChangeFrame(keyboard(340.0)),
    );

    println!("\n-- return, return --");
    if let Some(focused) = screen.focused {
        assistant.should_return(focused, &mut screen);
    }
    if let Some(focused) = screen.focused {
        assistant.should_return(focused, &mut screen);
    }
    println!("focused: {:?}", screen.focused.map(|id| screen.name(id)));

    println!("\n-- keyboard hides --");
    send(&mut assistant, &mut screen, KeyboardNotification::WillHide(keyboard(340.0)));
    send(&mut assistant, &mut screen, KeyboardNotification::DidHide(keyboard(340.0)));

    assistant.stop(&mut screen);
}
