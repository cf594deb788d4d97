// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard observer: turns raw notifications into clean state and height events.
//!
//! Platforms deliver keyboard notifications redundantly: `DidShow` can arrive
//! twice, frame changes repeat the same height, and payloads are sometimes
//! incomplete. [`KeyboardObserver`] reduces that stream to two independent
//! event streams:
//!
//! - **State changes** following `WillShow → DidShow → WillHide → DidHide`.
//!   A `DidShow` without a pending `WillShow` is dropped.
//! - **Height changes**, emitted only when the height differs from the last
//!   recorded one.
//!
//! ## Handling rules
//!
//! | Notification | Effect |
//! |---|---|
//! | `WillShow` | Ignored while the keyboard is up. Otherwise enter `WillShow`, refresh the height, then emit the state change. |
//! | `DidShow` | Mark the keyboard up. Emit only if the previous state was `WillShow`. |
//! | `WillHide` | Mark the keyboard down, always emit. |
//! | `DidHide` | Always emit. |
//! | `DidChangeFrame` | While the keyboard is up, refresh the height. |
//!
//! A notification without a usable frame keeps the previous height.
//!
//! ## Usage
//!
//! ```
//! use kurbo::Rect;
//! use understory_keyboard::{
//!     KeyboardEvent, KeyboardInfo, KeyboardNotification, KeyboardObserver, KeyboardState,
//! };
//!
//! let mut observer = KeyboardObserver::new(false);
//! observer.start_observing();
//!
//! let info = KeyboardInfo::with_end_frame(Rect::new(0.0, 340.0, 320.0, 640.0));
//! let events = observer.handle(&KeyboardNotification::WillShow(info));
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[0], KeyboardEvent::HeightChanged(300.0));
//!
//! observer.handle(&KeyboardNotification::DidShow(info));
//! assert!(observer.is_up());
//! assert_eq!(observer.state(), KeyboardState::DidShow);
//!
//! // A duplicate `DidShow` is swallowed.
//! assert!(observer.handle(&KeyboardNotification::DidShow(info)).is_empty());
//! ```

use smallvec::SmallVec;

use crate::notification::{KeyboardInfo, KeyboardNotification};
use crate::signal::Signal;
use crate::state::{KeyboardEvent, KeyboardState, KeyboardStateChange};

const LOG_TARGET: &str = "understory_keyboard";

/// Events produced by a single call to [`KeyboardObserver::handle`].
///
/// At most a height change followed by a state change.
pub type KeyboardEvents = SmallVec<[KeyboardEvent; 2]>;

/// Normalizes platform keyboard notifications.
///
/// The observer does not subscribe to anything by itself: the host forwards
/// every platform notification to [`KeyboardObserver::handle`]. While not
/// observing, notifications are ignored and no state is touched.
#[derive(Debug)]
pub struct KeyboardObserver {
    state: KeyboardState,
    height: f64,
    animation_duration: f64,
    is_up: bool,
    observing: bool,
    logging_enabled: bool,
    state_changes: Signal<KeyboardStateChange>,
    height_changes: Signal<f64>,
}

impl KeyboardObserver {
    /// Create an idle observer with the keyboard hidden and zero height.
    pub fn new(logging_enabled: bool) -> Self {
        Self {
            state: KeyboardState::DidHide,
            height: 0.0,
            animation_duration: 0.0,
            is_up: false,
            observing: false,
            logging_enabled,
            state_changes: Signal::new(),
            height_changes: Signal::new(),
        }
    }

    /// Begin reacting to notifications. Does nothing if already observing.
    pub fn start_observing(&mut self) {
        if self.observing {
            return;
        }
        self.observing = true;
        self.trace(format_args!("start observing"));
    }

    /// Stop reacting to notifications. Does nothing if not observing.
    ///
    /// The last known state and height are kept.
    pub fn stop_observing(&mut self) {
        if !self.observing {
            return;
        }
        self.observing = false;
        self.trace(format_args!("stop observing"));
    }

    /// Whether notifications are currently processed.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Last recorded keyboard state.
    pub fn state(&self) -> KeyboardState {
        self.state
    }

    /// Last recorded keyboard height (never negative).
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Whether the keyboard is fully shown and not yet hiding.
    pub fn is_up(&self) -> bool {
        self.is_up
    }

    /// Most recently reported keyboard transition duration, in seconds.
    pub fn animation_duration(&self) -> f64 {
        self.animation_duration
    }

    /// Whether verbose diagnostics are logged.
    pub fn logging_enabled(&self) -> bool {
        self.logging_enabled
    }

    /// Enable or disable verbose diagnostics.
    pub fn set_logging_enabled(&mut self, enabled: bool) {
        self.logging_enabled = enabled;
    }

    /// Stream of state changes.
    pub fn state_changes(&mut self) -> &mut Signal<KeyboardStateChange> {
        &mut self.state_changes
    }

    /// Stream of height changes.
    pub fn height_changes(&mut self) -> &mut Signal<f64> {
        &mut self.height_changes
    }

    /// Process one platform notification.
    ///
    /// Returns the events it produced, in emission order, after delivering
    /// them to the subscribers of [`state_changes`](Self::state_changes) and
    /// [`height_changes`](Self::height_changes).
    pub fn handle(&mut self, notification: &KeyboardNotification) -> KeyboardEvents {
        let mut events = KeyboardEvents::new();
        if !self.observing {
            return events;
        }
        self.trace(format_args!("handle {notification:?}"));

        let info = notification.info();
        if let Some(duration) = info.duration() {
            self.animation_duration = duration;
        }

        match notification {
            KeyboardNotification::WillShow(_) => {
                if self.is_up {
                    self.trace(format_args!("ignoring will-show, keyboard already up"));
                } else {
                    self.state = KeyboardState::WillShow;
                    self.refresh_height(info, &mut events);
                    events.push(self.state_event());
                }
            }
            KeyboardNotification::DidShow(_) => {
                self.is_up = true;
                let previous = core::mem::replace(&mut self.state, KeyboardState::DidShow);
                if previous == KeyboardState::WillShow {
                    events.push(self.state_event());
                } else {
                    self.trace(format_args!(
                        "dropping did-show without pending will-show (was {previous:?})"
                    ));
                }
            }
            KeyboardNotification::WillHide(_) => {
                self.is_up = false;
                self.state = KeyboardState::WillHide;
                events.push(self.state_event());
            }
            KeyboardNotification::DidHide(_) => {
                self.state = KeyboardState::DidHide;
                events.push(self.state_event());
            }
            KeyboardNotification::DidChangeFrame(_) => {
                if self.is_up {
                    self.refresh_height(info, &mut events);
                }
            }
        }

        for event in &events {
            match event {
                KeyboardEvent::StateChanged(change) => self.state_changes.emit(change),
                KeyboardEvent::HeightChanged(height) => self.height_changes.emit(height),
            }
        }
        events
    }

    fn state_event(&self) -> KeyboardEvent {
        KeyboardEvent::StateChanged(KeyboardStateChange {
            state: self.state,
            height: self.height,
        })
    }

    fn refresh_height(&mut self, info: &KeyboardInfo, events: &mut KeyboardEvents) {
        let Some(new_height) = info.height() else {
            self.trace(format_args!("no usable keyboard frame, keeping height {}", self.height));
            return;
        };
        self.trace(format_args!(
            "last height {}, new height {new_height}",
            self.height
        ));
        if new_height != self.height {
            self.height = new_height;
            events.push(KeyboardEvent::HeightChanged(new_height));
        }
    }

    fn trace(&self, args: core::fmt::Arguments<'_>) {
        if self.logging_enabled {
            log::debug!(target: LOG_TARGET, "{args}");
        }
    }
}

impl Default for KeyboardObserver {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Rect;

    use crate::signal::SubscriberId;

    fn frame(height: f64) -> KeyboardInfo {
        KeyboardInfo::with_end_frame(Rect::new(0.0, 640.0 - height, 320.0, 640.0))
    }

    fn observing() -> KeyboardObserver {
        let mut observer = KeyboardObserver::new(false);
        observer.start_observing();
        observer
    }

    fn states(events: &KeyboardEvents) -> Vec<KeyboardState> {
        events
            .iter()
            .filter_map(|e| match e {
                KeyboardEvent::StateChanged(c) => Some(c.state),
                KeyboardEvent::HeightChanged(_) => None,
            })
            .collect()
    }

    #[test]
    fn full_cycle_emits_one_state_change_per_step() {
        let mut observer = observing();
        let info = frame(300.0);

        let events = observer.handle(&KeyboardNotification::WillShow(info));
        assert_eq!(
            events.as_slice(),
            [
                KeyboardEvent::HeightChanged(300.0),
                KeyboardEvent::StateChanged(KeyboardStateChange {
                    state: KeyboardState::WillShow,
                    height: 300.0,
                }),
            ]
        );
        assert!(!observer.is_up(), "keyboard is only up after did-show");

        let events = observer.handle(&KeyboardNotification::DidShow(info));
        assert_eq!(states(&events), [KeyboardState::DidShow]);
        assert!(observer.is_up());

        let events = observer.handle(&KeyboardNotification::WillHide(info));
        assert_eq!(states(&events), [KeyboardState::WillHide]);
        assert!(!observer.is_up());

        let events = observer.handle(&KeyboardNotification::DidHide(info));
        assert_eq!(states(&events), [KeyboardState::DidHide]);
        assert_eq!(observer.state(), KeyboardState::DidHide);
        // Hiding keeps the last known height.
        assert_eq!(observer.height(), 300.0);
    }

    #[test]
    fn did_show_without_will_show_is_dropped() {
        let mut observer = observing();
        let info = frame(300.0);

        assert!(observer.handle(&KeyboardNotification::DidShow(info)).is_empty());
        // The keyboard is still marked up; only the emission is suppressed.
        assert!(observer.is_up());

        observer.handle(&KeyboardNotification::WillHide(info));
        observer.handle(&KeyboardNotification::DidHide(info));
        observer.handle(&KeyboardNotification::WillShow(info));
        assert_eq!(
            states(&observer.handle(&KeyboardNotification::DidShow(info))),
            [KeyboardState::DidShow]
        );
        assert!(observer.handle(&KeyboardNotification::DidShow(info)).is_empty());
    }

    #[test]
    fn will_show_while_up_is_ignored() {
        let mut observer = observing();
        observer.handle(&KeyboardNotification::WillShow(frame(300.0)));
        observer.handle(&KeyboardNotification::DidShow(frame(300.0)));

        let events = observer.handle(&KeyboardNotification::WillShow(frame(260.0)));
        assert!(events.is_empty());
        assert_eq!(observer.height(), 300.0);
        assert_eq!(observer.state(), KeyboardState::DidShow);
    }

    #[test]
    fn height_changes_are_deduplicated() {
        let mut observer = observing();
        observer.handle(&KeyboardNotification::WillShow(frame(216.0)));
        observer.handle(&KeyboardNotification::DidShow(frame(216.0)));

        let mut heights = Vec::new();
        for h in [216.0, 260.0, 260.0, 216.0, 216.0, 300.0] {
            for event in observer.handle(&KeyboardNotification::DidChangeFrame(frame(h))) {
                if let KeyboardEvent::HeightChanged(h) = event {
                    heights.push(h);
                }
            }
        }
        assert_eq!(heights, [260.0, 216.0, 300.0]);
    }

    #[test]
    fn frame_changes_while_down_are_ignored() {
        let mut observer = observing();
        assert!(
            observer
                .handle(&KeyboardNotification::DidChangeFrame(frame(300.0)))
                .is_empty()
        );
        assert_eq!(observer.height(), 0.0);
    }

    #[test]
    fn malformed_payload_keeps_height_and_transitions() {
        let mut observer = observing();
        observer.handle(&KeyboardNotification::WillShow(frame(300.0)));
        observer.handle(&KeyboardNotification::DidShow(frame(300.0)));
        observer.handle(&KeyboardNotification::WillHide(KeyboardInfo::default()));
        observer.handle(&KeyboardNotification::DidHide(KeyboardInfo::default()));

        let events = observer.handle(&KeyboardNotification::WillShow(KeyboardInfo::default()));
        assert_eq!(
            events.as_slice(),
            [KeyboardEvent::StateChanged(KeyboardStateChange {
                state: KeyboardState::WillShow,
                height: 300.0,
            })]
        );
    }

    #[test]
    fn not_observing_ignores_everything() {
        let mut observer = KeyboardObserver::new(false);
        assert!(
            observer
                .handle(&KeyboardNotification::WillShow(frame(300.0)))
                .is_empty()
        );
        assert_eq!(observer.state(), KeyboardState::DidHide);

        observer.start_observing();
        observer.start_observing();
        observer.handle(&KeyboardNotification::WillShow(frame(300.0)));
        observer.stop_observing();
        observer.stop_observing();
        assert!(!observer.is_observing());
        // Stopping keeps what was learned.
        assert_eq!(observer.state(), KeyboardState::WillShow);
        assert_eq!(observer.height(), 300.0);
        assert!(
            observer
                .handle(&KeyboardNotification::DidShow(frame(300.0)))
                .is_empty()
        );
    }

    #[test]
    fn animation_duration_tracks_latest_report() {
        let mut observer = observing();
        observer.handle(&KeyboardNotification::WillShow(frame(300.0).animated(0.25)));
        assert_eq!(observer.animation_duration(), 0.25);
        observer.handle(&KeyboardNotification::DidShow(KeyboardInfo::default()));
        assert_eq!(observer.animation_duration(), 0.25);
    }

    #[test]
    fn subscribers_see_both_streams() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observer = observing();

        let sink = seen.clone();
        observer
            .state_changes()
            .subscribe(SubscriberId(1), move |c| sink.borrow_mut().push(alloc::format!("{:?}", c.state)));
        let sink = seen.clone();
        observer
            .height_changes()
            .subscribe(SubscriberId(1), move |h| sink.borrow_mut().push(alloc::format!("{h}")));

        observer.handle(&KeyboardNotification::WillShow(frame(300.0)));
        observer.handle(&KeyboardNotification::DidShow(frame(300.0)));
        assert_eq!(*seen.borrow(), ["300", "WillShow", "DidShow"]);

        observer.state_changes().unsubscribe(SubscriberId(1));
        observer.handle(&KeyboardNotification::WillHide(frame(300.0)));
        assert_eq!(seen.borrow().len(), 3);
    }
}
