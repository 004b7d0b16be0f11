// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the scanner controller.
//!
//! This module provides a [`TraceSink`] trait with one method per controller
//! event. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] owns an optional boxed sink. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use alloc::boxed::Box;

use crate::audio::{AudioError, CueResult};
use crate::camera::{CameraError, CaptureConstraints};
use crate::locale::{Language, MessageKey};
use crate::message::{Classification, MessageId};
use crate::outcome::{ScanDraw, ScanId, ScanOutcome};
use crate::preview::PreviewFit;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the active language is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LanguageEvent {
    /// Language before the change.
    pub from: Language,
    /// Language after the change (may equal `from`).
    pub to: Language,
}

/// Emitted when a scan completes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScanFinishedEvent {
    /// The completed scan.
    pub id: ScanId,
    /// The uniform sample that decided it.
    pub sample: f64,
    /// The classified outcome.
    pub outcome: ScanOutcome,
}

impl ScanFinishedEvent {
    /// Creates the event from a scan id and its draw.
    #[must_use]
    pub const fn new(id: ScanId, draw: ScanDraw) -> Self {
        Self {
            id,
            sample: draw.sample,
            outcome: draw.outcome,
        }
    }
}

/// Emitted when a result message is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageShownEvent {
    /// Identifier of the message.
    pub id: MessageId,
    /// Catalog key.
    pub key: MessageKey,
    /// Panel style.
    pub classification: Classification,
    /// Language the text was resolved in.
    pub language: Language,
}

/// Emitted when a message hide timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageExpiredEvent {
    /// Identifier carried by the timer.
    pub id: MessageId,
    /// `false` when the timer was stale and a newer message stays visible.
    pub hidden: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the scanner controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after the language was set and the page re-rendered.
    fn on_language_changed(&mut self, e: &LanguageEvent) {
        _ = e;
    }

    /// Called when a camera stream is requested from the host.
    fn on_camera_requested(&mut self, constraints: &CaptureConstraints) {
        _ = constraints;
    }

    /// Called when the camera became active.
    fn on_camera_started(&mut self) {}

    /// Called when the camera request failed.
    fn on_camera_failed(&mut self, error: &CameraError) {
        _ = error;
    }

    /// Called when the camera was stopped.
    fn on_camera_stopped(&mut self, tracks_released: usize) {
        _ = tracks_released;
    }

    /// Called when a stream arrived with no request pending and was
    /// released straight away.
    fn on_stale_stream(&mut self, tracks_released: usize) {
        _ = tracks_released;
    }

    /// Called when a scan starts.
    fn on_scan_started(&mut self, id: ScanId) {
        _ = id;
    }

    /// Called when a scan request is ignored because `in_flight` is running.
    fn on_scan_ignored(&mut self, in_flight: ScanId) {
        _ = in_flight;
    }

    /// Called when a scan completes.
    fn on_scan_finished(&mut self, e: &ScanFinishedEvent) {
        _ = e;
    }

    /// Called when a result message is shown.
    fn on_message_shown(&mut self, e: &MessageShownEvent) {
        _ = e;
    }

    /// Called when a message hide timer fires.
    fn on_message_expired(&mut self, e: &MessageExpiredEvent) {
        _ = e;
    }

    /// Called when the audio context was created.
    fn on_audio_armed(&mut self) {}

    /// Called when creating the audio context failed.
    fn on_audio_unavailable(&mut self, error: &AudioError) {
        _ = error;
    }

    /// Called after an outcome cue was requested.
    fn on_cue(&mut self, outcome: ScanOutcome, result: &CueResult) {
        _ = (outcome, result);
    }

    /// Called when page visibility changes.
    fn on_visibility_changed(&mut self, hidden: bool) {
        _ = hidden;
    }

    /// Called after a refit; `None` when the geometry was not yet known.
    fn on_preview_refit(&mut self, fit: Option<&PreviewFit>) {
        _ = fit;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owner of an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing and
/// an installed sink is never called.
#[derive(Default)]
pub struct Tracer {
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer")
            .field("installed", &self.sink.is_some())
            .finish()
    }
}

macro_rules! dispatch {
    ($self:ident, |$sink:ident| $body:expr) => {{
        #[cfg(feature = "trace")]
        if let Some($sink) = $self.sink.as_deref_mut() {
            $body;
        }
    }};
}

#[cfg_attr(
    not(feature = "trace"),
    allow(unused_variables, reason = "method bodies are compiled out")
)]
impl Tracer {
    /// Creates a tracer that dispatches to `sink`.
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        Self { sink: Some(sink) }
    }

    /// Creates a tracer that discards all events.
    #[must_use]
    pub fn none() -> Self {
        Self { sink: None }
    }

    /// Emits [`TraceSink::on_language_changed`].
    #[inline]
    pub fn language_changed(&mut self, e: &LanguageEvent) {
        dispatch!(self, |s| s.on_language_changed(e));
    }

    /// Emits [`TraceSink::on_camera_requested`].
    #[inline]
    pub fn camera_requested(&mut self, constraints: &CaptureConstraints) {
        dispatch!(self, |s| s.on_camera_requested(constraints));
    }

    /// Emits [`TraceSink::on_camera_started`].
    #[inline]
    pub fn camera_started(&mut self) {
        dispatch!(self, |s| s.on_camera_started());
    }

    /// Emits [`TraceSink::on_camera_failed`].
    #[inline]
    pub fn camera_failed(&mut self, error: &CameraError) {
        dispatch!(self, |s| s.on_camera_failed(error));
    }

    /// Emits [`TraceSink::on_camera_stopped`].
    #[inline]
    pub fn camera_stopped(&mut self, tracks_released: usize) {
        dispatch!(self, |s| s.on_camera_stopped(tracks_released));
    }

    /// Emits [`TraceSink::on_stale_stream`].
    #[inline]
    pub fn stale_stream(&mut self, tracks_released: usize) {
        dispatch!(self, |s| s.on_stale_stream(tracks_released));
    }

    /// Emits [`TraceSink::on_scan_started`].
    #[inline]
    pub fn scan_started(&mut self, id: ScanId) {
        dispatch!(self, |s| s.on_scan_started(id));
    }

    /// Emits [`TraceSink::on_scan_ignored`].
    #[inline]
    pub fn scan_ignored(&mut self, in_flight: ScanId) {
        dispatch!(self, |s| s.on_scan_ignored(in_flight));
    }

    /// Emits [`TraceSink::on_scan_finished`].
    #[inline]
    pub fn scan_finished(&mut self, e: &ScanFinishedEvent) {
        dispatch!(self, |s| s.on_scan_finished(e));
    }

    /// Emits [`TraceSink::on_message_shown`].
    #[inline]
    pub fn message_shown(&mut self, e: &MessageShownEvent) {
        dispatch!(self, |s| s.on_message_shown(e));
    }

    /// Emits [`TraceSink::on_message_expired`].
    #[inline]
    pub fn message_expired(&mut self, e: &MessageExpiredEvent) {
        dispatch!(self, |s| s.on_message_expired(e));
    }

    /// Emits [`TraceSink::on_audio_armed`].
    #[inline]
    pub fn audio_armed(&mut self) {
        dispatch!(self, |s| s.on_audio_armed());
    }

    /// Emits [`TraceSink::on_audio_unavailable`].
    #[inline]
    pub fn audio_unavailable(&mut self, error: &AudioError) {
        dispatch!(self, |s| s.on_audio_unavailable(error));
    }

    /// Emits [`TraceSink::on_cue`].
    #[inline]
    pub fn cue(&mut self, outcome: ScanOutcome, result: &CueResult) {
        dispatch!(self, |s| s.on_cue(outcome, result));
    }

    /// Emits [`TraceSink::on_visibility_changed`].
    #[inline]
    pub fn visibility_changed(&mut self, hidden: bool) {
        dispatch!(self, |s| s.on_visibility_changed(hidden));
    }

    /// Emits [`TraceSink::on_preview_refit`].
    #[inline]
    pub fn preview_refit(&mut self, fit: Option<&PreviewFit>) {
        dispatch!(self, |s| s.on_preview_refit(fit));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_camera_started();
        sink.on_scan_started(ScanId(0));
        sink.on_message_expired(&MessageExpiredEvent {
            id: MessageId(3),
            hidden: false,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.camera_started();
        tracer.scan_ignored(ScanId(1));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::rc::Rc;
        use alloc::vec::Vec;
        use core::cell::RefCell;

        struct RecordingSink {
            scans: Rc<RefCell<Vec<u64>>>,
        }
        impl TraceSink for RecordingSink {
            fn on_scan_started(&mut self, id: ScanId) {
                self.scans.borrow_mut().push(id.0);
            }
        }

        let scans = Rc::new(RefCell::new(Vec::new()));
        let mut tracer = Tracer::new(Box::new(RecordingSink {
            scans: Rc::clone(&scans),
        }));
        tracer.scan_started(ScanId(42));
        tracer.camera_started();
        assert_eq!(*scans.borrow(), [42]);
    }
}
