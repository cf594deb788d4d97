// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_keyboard --heading-base-level=0

//! Understory Keyboard: a clean view of the on-screen keyboard.
//!
//! Touch platforms report the virtual keyboard through a noisy sequence of
//! will-show/did-show/will-hide/did-hide and frame-change notifications.
//! This crate reduces that sequence to:
//!
//! - a [`KeyboardState`] that only moves along the legal cycle
//!   `DidHide → WillShow → DidShow → WillHide → DidHide`,
//! - a non-negative keyboard height that only reports real changes,
//! - two independent event streams ([`KeyboardObserver::state_changes`] and
//!   [`KeyboardObserver::height_changes`]) built on [`Signal`].
//!
//! The host forwards each platform notification as a [`KeyboardNotification`]
//! to [`KeyboardObserver::handle`], which also returns the produced
//! [`KeyboardEvent`]s so an owner can react without subscribing.
//!
//! Everything runs on the UI thread; nothing here blocks or spawns.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade under the `understory_keyboard`
//! target, and only when the observer was created with logging enabled.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod notification;
mod observer;
mod signal;
mod state;

pub use notification::{KeyboardInfo, KeyboardNotification};
pub use observer::{KeyboardEvents, KeyboardObserver};
pub use signal::{Signal, SubscriberId};
pub use state::{KeyboardEvent, KeyboardState, KeyboardStateChange};
