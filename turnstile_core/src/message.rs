// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Result message bookkeeping.
//!
//! Every shown message gets a fresh [`MessageId`] and schedules its own
//! hide. [`MessageBoard::expire`] only clears the panel when the id still
//! names the most recent message, so a stale timer from an earlier message
//! can never hide a newer one.

use crate::locale::MessageKey;

/// Visual style of the result panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    /// Positive feedback.
    Success,
    /// Negative feedback.
    Failure,
    /// Informational, unstyled.
    Neutral,
}

impl Classification {
    /// CSS class used by the reference page.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Neutral => "neutral",
        }
    }
}

/// Identifies one shown message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

/// The message currently on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShownMessage {
    /// Identifier allocated when shown.
    pub id: MessageId,
    /// Which catalog message.
    pub key: MessageKey,
    /// Panel style.
    pub classification: Classification,
}

/// Tracks the visible message and hands out identifiers.
#[derive(Clone, Debug, Default)]
pub struct MessageBoard {
    next: u64,
    current: Option<ShownMessage>,
}

impl MessageBoard {
    /// Creates an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next: 0,
            current: None,
        }
    }

    /// Records a newly shown message, superseding any previous one.
    pub fn show(&mut self, key: MessageKey, classification: Classification) -> MessageId {
        let id = MessageId(self.next);
        self.next += 1;
        self.current = Some(ShownMessage {
            id,
            key,
            classification,
        });
        id
    }

    /// Clears the board if `id` is the current message.
    ///
    /// Returns `true` if the panel should be hidden.
    pub fn expire(&mut self, id: MessageId) -> bool {
        match self.current {
            Some(shown) if shown.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    /// Returns the visible message, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&ShownMessage> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase() {
        let mut board = MessageBoard::new();
        let a = board.show(MessageKey::CameraStarted, Classification::Success);
        let b = board.show(MessageKey::ScanFailure, Classification::Failure);
        assert!(b > a);
        assert_eq!(board.current().map(|m| m.id), Some(b));
    }

    #[test]
    fn stale_expiry_keeps_newer_message() {
        let mut board = MessageBoard::new();
        let first = board.show(MessageKey::CameraStarted, Classification::Success);
        let second = board.show(MessageKey::ScanSuccess, Classification::Success);

        assert!(!board.expire(first));
        assert_eq!(board.current().map(|m| m.key), Some(MessageKey::ScanSuccess));

        assert!(board.expire(second));
        assert!(board.current().is_none());
        assert!(!board.expire(second));
    }
}
