// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw keyboard notifications as delivered by the platform.

use kurbo::Rect;

/// Payload carried by a platform keyboard notification.
///
/// Every field is optional: platforms omit some of them, and a notification
/// with an empty payload is still a valid state transition.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct KeyboardInfo {
    /// Keyboard frame at the start of the transition, in screen space.
    pub begin_frame: Option<Rect>,
    /// Keyboard frame at the end of the transition, in screen space.
    pub end_frame: Option<Rect>,
    /// Duration of the keyboard's own transition animation, in seconds.
    pub animation_duration: Option<f64>,
}

impl KeyboardInfo {
    /// Payload with only an end frame.
    pub fn with_end_frame(end_frame: Rect) -> Self {
        Self {
            end_frame: Some(end_frame),
            ..Self::default()
        }
    }

    /// Set the animation duration.
    #[must_use]
    pub fn animated(mut self, duration: f64) -> Self {
        self.animation_duration = Some(duration);
        self
    }

    /// Keyboard height implied by this payload.
    ///
    /// The end frame is authoritative; the begin frame is used only when the
    /// end frame is missing or unusable. Returns `None` when neither frame
    /// yields a finite height.
    pub fn height(&self) -> Option<f64> {
        self.end_frame
            .and_then(frame_height)
            .or_else(|| self.begin_frame.and_then(frame_height))
    }

    /// Animation duration, if present and usable.
    pub fn duration(&self) -> Option<f64> {
        self.animation_duration
            .filter(|d| d.is_finite() && *d >= 0.0)
    }
}

fn frame_height(frame: Rect) -> Option<f64> {
    let height = (frame.y1 - frame.y0).abs();
    height.is_finite().then_some(height)
}

/// A platform keyboard notification.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum KeyboardNotification {
    /// The keyboard is about to appear.
    WillShow(KeyboardInfo),
    /// The keyboard finished appearing.
    DidShow(KeyboardInfo),
    /// The keyboard is about to disappear.
    WillHide(KeyboardInfo),
    /// The keyboard finished disappearing.
    DidHide(KeyboardInfo),
    /// The keyboard frame changed (for example after switching input language).
    DidChangeFrame(KeyboardInfo),
}

impl KeyboardNotification {
    /// The payload of this notification.
    pub fn info(&self) -> &KeyboardInfo {
        match self {
            Self::WillShow(info)
            | Self::DidShow(info)
            | Self::WillHide(info)
            | Self::DidHide(info)
            | Self::DidChangeFrame(info) => info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_frame_wins_over_begin_frame() {
        let info = KeyboardInfo {
            begin_frame: Some(Rect::new(0.0, 640.0, 320.0, 900.0)),
            end_frame: Some(Rect::new(0.0, 424.0, 320.0, 640.0)),
            animation_duration: None,
        };
        assert_eq!(info.height(), Some(216.0));
    }

    #[test]
    fn begin_frame_is_the_fallback() {
        let info = KeyboardInfo {
            begin_frame: Some(Rect::new(0.0, 340.0, 320.0, 640.0)),
            ..KeyboardInfo::default()
        };
        assert_eq!(info.height(), Some(300.0));

        let unusable_end = KeyboardInfo {
            end_frame: Some(Rect::new(0.0, f64::NAN, 320.0, 640.0)),
            ..info
        };
        assert_eq!(unusable_end.height(), Some(300.0));
    }

    #[test]
    fn empty_payload_has_no_height() {
        assert_eq!(KeyboardInfo::default().height(), None);
        assert_eq!(KeyboardInfo::default().animated(-1.0).duration(), None);
    }
}
