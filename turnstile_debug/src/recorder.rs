// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and appends every event, with a
//! sequence number, to a shared log. The sink is moved into the controller;
//! the [`Recording`] handle obtained from [`RecorderSink::recording`] stays
//! with the caller and reads the log back.

use std::cell::RefCell;
use std::rc::Rc;

use turnstile_core::audio::{AudioError, CueResult};
use turnstile_core::camera::{CameraError, CaptureConstraints};
use turnstile_core::outcome::{ScanId, ScanOutcome};
use turnstile_core::preview::PreviewFit;
use turnstile_core::trace::{
    LanguageEvent, MessageExpiredEvent, MessageShownEvent, ScanFinishedEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// RecordedEvent
// ---------------------------------------------------------------------------

/// A recorded trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_language_changed`].
    LanguageChanged(LanguageEvent),
    /// See [`TraceSink::on_camera_requested`].
    CameraRequested(CaptureConstraints),
    /// See [`TraceSink::on_camera_started`].
    CameraStarted,
    /// See [`TraceSink::on_camera_failed`].
    CameraFailed(CameraError),
    /// See [`TraceSink::on_camera_stopped`].
    CameraStopped {
        /// Tracks stopped with the stream.
        tracks_released: usize,
    },
    /// See [`TraceSink::on_stale_stream`].
    StaleStream {
        /// Tracks stopped with the stream.
        tracks_released: usize,
    },
    /// See [`TraceSink::on_scan_started`].
    ScanStarted(ScanId),
    /// See [`TraceSink::on_scan_ignored`].
    ScanIgnored(ScanId),
    /// See [`TraceSink::on_scan_finished`].
    ScanFinished(ScanFinishedEvent),
    /// See [`TraceSink::on_message_shown`].
    MessageShown(MessageShownEvent),
    /// See [`TraceSink::on_message_expired`].
    MessageExpired(MessageExpiredEvent),
    /// See [`TraceSink::on_audio_armed`].
    AudioArmed,
    /// See [`TraceSink::on_audio_unavailable`].
    AudioUnavailable(AudioError),
    /// See [`TraceSink::on_cue`].
    Cue {
        /// Outcome the cue belongs to.
        outcome: ScanOutcome,
        /// What the backend did with it.
        result: CueResult,
    },
    /// See [`TraceSink::on_visibility_changed`].
    VisibilityChanged {
        /// Whether the page is now hidden.
        hidden: bool,
    },
    /// See [`TraceSink::on_preview_refit`].
    PreviewRefit(Option<PreviewFit>),
}

impl RecordedEvent {
    /// Short event name used in exports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LanguageChanged(_) => "LanguageChanged",
            Self::CameraRequested(_) => "CameraRequested",
            Self::CameraStarted => "CameraStarted",
            Self::CameraFailed(_) => "CameraFailed",
            Self::CameraStopped { .. } => "CameraStopped",
            Self::StaleStream { .. } => "StaleStream",
            Self::ScanStarted(_) => "ScanStarted",
            Self::ScanIgnored(_) => "ScanIgnored",
            Self::ScanFinished(_) => "ScanFinished",
            Self::MessageShown(_) => "MessageShown",
            Self::MessageExpired(_) => "MessageExpired",
            Self::AudioArmed => "AudioArmed",
            Self::AudioUnavailable(_) => "AudioUnavailable",
            Self::Cue { .. } => "Cue",
            Self::VisibilityChanged { .. } => "VisibilityChanged",
            Self::PreviewRefit(_) => "PreviewRefit",
        }
    }
}

/// An event with its position in the session.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// Zero-based sequence number.
    pub seq: u64,
    /// The event.
    pub event: RecordedEvent,
}

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that records typed events in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    log: Rc<RefCell<Vec<Entry>>>,
}

/// Read handle for the log of a [`RecorderSink`].
#[derive(Clone, Debug)]
pub struct Recording {
    log: Rc<RefCell<Vec<Entry>>>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle that reads this sink's log.
    #[must_use]
    pub fn recording(&self) -> Recording {
        Recording {
            log: Rc::clone(&self.log),
        }
    }

    fn push(&mut self, event: RecordedEvent) {
        let mut log = self.log.borrow_mut();
        let seq = log.len() as u64;
        log.push(Entry { seq, event });
    }
}

impl Recording {
    /// Returns a copy of all entries recorded so far.
    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.log.borrow().clone()
    }

    /// Returns the recorded events without sequence numbers.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.log.borrow().iter().map(|e| e.event.clone()).collect()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }

    /// Returns how many finished scans succeeded and failed.
    #[must_use]
    pub fn outcome_counts(&self) -> (usize, usize) {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match &e.event {
                RecordedEvent::ScanFinished(f) => Some(f.outcome),
                _ => None,
            })
            .fold((0, 0), |(ok, bad), outcome| match outcome {
                ScanOutcome::Success => (ok + 1, bad),
                ScanOutcome::Failure => (ok, bad + 1),
            })
    }

    /// Drops all recorded entries. Sequence numbers restart at zero.
    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_language_changed(&mut self, e: &LanguageEvent) {
        self.push(RecordedEvent::LanguageChanged(*e));
    }

    fn on_camera_requested(&mut self, constraints: &CaptureConstraints) {
        self.push(RecordedEvent::CameraRequested(*constraints));
    }

    fn on_camera_started(&mut self) {
        self.push(RecordedEvent::CameraStarted);
    }

    fn on_camera_failed(&mut self, error: &CameraError) {
        self.push(RecordedEvent::CameraFailed(error.clone()));
    }

    fn on_camera_stopped(&mut self, tracks_released: usize) {
        self.push(RecordedEvent::CameraStopped { tracks_released });
    }

    fn on_stale_stream(&mut self, tracks_released: usize) {
        self.push(RecordedEvent::StaleStream { tracks_released });
    }

    fn on_scan_started(&mut self, id: ScanId) {
        self.push(RecordedEvent::ScanStarted(id));
    }

    fn on_scan_ignored(&mut self, in_flight: ScanId) {
        self.push(RecordedEvent::ScanIgnored(in_flight));
    }

    fn on_scan_finished(&mut self, e: &ScanFinishedEvent) {
        self.push(RecordedEvent::ScanFinished(*e));
    }

    fn on_message_shown(&mut self, e: &MessageShownEvent) {
        self.push(RecordedEvent::MessageShown(*e));
    }

    fn on_message_expired(&mut self, e: &MessageExpiredEvent) {
        self.push(RecordedEvent::MessageExpired(*e));
    }

    fn on_audio_armed(&mut self) {
        self.push(RecordedEvent::AudioArmed);
    }

    fn on_audio_unavailable(&mut self, error: &AudioError) {
        self.push(RecordedEvent::AudioUnavailable(error.clone()));
    }

    fn on_cue(&mut self, outcome: ScanOutcome, result: &CueResult) {
        self.push(RecordedEvent::Cue {
            outcome,
            result: result.clone(),
        });
    }

    fn on_visibility_changed(&mut self, hidden: bool) {
        self.push(RecordedEvent::VisibilityChanged { hidden });
    }

    fn on_preview_refit(&mut self, fit: Option<&PreviewFit>) {
        self.push(RecordedEvent::PreviewRefit(fit.copied()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use turnstile_core::audio::{AudioBackend, ToneCue};
    use turnstile_core::camera::MediaStream;
    use turnstile_core::config::{KioskConfig, ValidatedConfig};
    use turnstile_core::controller::ScannerController;
    use turnstile_core::effect::{Effect, Wake};
    use turnstile_core::locale::Language;
    use turnstile_core::message::Classification;
    use turnstile_core::outcome::Lcg64;
    use turnstile_core::preview::PreviewGeometry;
    use turnstile_core::view::{Control, Overlay, View};

    pub(crate) struct OneTrack;

    impl MediaStream for OneTrack {
        fn stop_tracks(&mut self) -> usize {
            1
        }
    }

    /// A view that renders nothing.
    pub(crate) struct Headless;

    impl View for Headless {
        type Stream = OneTrack;

        fn set_text(&mut self, _: Control, _: &str) {}
        fn set_enabled(&mut self, _: Control, _: bool) {}
        fn set_active(&mut self, _: Control, _: bool) {}
        fn show_result(&mut self, _: &str, _: Classification) {}
        fn hide_result(&mut self) {}
        fn set_overlay(&mut self, _: Overlay) {}
        fn attach_preview(&mut self, _: &OneTrack) {}
        fn detach_preview(&mut self) {}
        fn preview_geometry(&self) -> Option<PreviewGeometry> {
            None
        }
        fn apply_preview_fit(&mut self, _: &PreviewFit) {}
    }

    pub(crate) struct Silent;

    impl AudioBackend for Silent {
        type Context = ();

        fn create_context(&mut self) -> Result<(), AudioError> {
            Ok(())
        }

        fn play(&mut self, _: &(), _: &ToneCue) -> Result<(), AudioError> {
            Ok(())
        }
    }

    /// Runs a short session against a recorder and returns its handle.
    pub(crate) fn record_session(seed: u64, scans: usize) -> Recording {
        let sink = RecorderSink::new();
        let recording = sink.recording();
        let mut kiosk = ScannerController::new(
            ValidatedConfig::reference(),
            Headless,
            Lcg64::new(seed),
            Silent,
        )
        .with_trace_sink(sink);

        kiosk.note_user_interaction();
        kiosk.set_language(Language::De);
        kiosk.toggle_camera();
        kiosk.camera_opened(OneTrack);
        for _ in 0..scans {
            kiosk.perform_scan();
            kiosk.perform_scan();
            let wakes: Vec<Wake> = std::iter::from_fn(|| kiosk.poll_effect())
                .filter_map(|effect| match effect {
                    Effect::Schedule {
                        wake: wake @ Wake::ScanComplete(_),
                        ..
                    } => Some(wake),
                    _ => None,
                })
                .collect();
            for wake in wakes {
                kiosk.wake(wake);
            }
        }
        kiosk.stop_camera();
        recording
    }

    #[test]
    fn records_controller_session_in_order() {
        let recording = record_session(7, 1);
        let names: Vec<&str> = recording.events().iter().map(RecordedEvent::name).collect();
        assert_eq!(
            names,
            [
                "AudioArmed",
                "LanguageChanged",
                "CameraRequested",
                "CameraStarted",
                "MessageShown",
                "ScanStarted",
                "ScanIgnored",
                "ScanFinished",
                "MessageShown",
                "Cue",
                "CameraStopped",
                "MessageShown",
            ]
        );
        let seqs: Vec<u64> = recording.entries().iter().map(|e| e.seq).collect();
        assert_eq!(seqs, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn records_cue_results() {
        let recording = record_session(11, 3);
        let (ok, bad) = recording.outcome_counts();
        assert_eq!(ok + bad, 3);
        assert!(recording.events().iter().all(|e| match e {
            RecordedEvent::Cue { result, .. } => *result == CueResult::Played,
            _ => true,
        }));
    }

    #[test]
    fn clear_restarts_sequence() {
        let mut sink = RecorderSink::new();
        let recording = sink.recording();
        sink.on_visibility_changed(true);
        sink.on_camera_failed(&CameraError::NotFound);
        assert_eq!(recording.len(), 2);

        recording.clear();
        assert!(recording.is_empty());
        sink.on_visibility_changed(false);
        assert_eq!(recording.entries()[0].seq, 0);
    }

    #[test]
    fn config_bias_shapes_recorded_outcomes() {
        let config = KioskConfig::reference()
            .with_success_bias(0.999_999)
            .validate()
            .unwrap();
        let sink = RecorderSink::new();
        let recording = sink.recording();
        let mut kiosk =
            ScannerController::new(config, Headless, Lcg64::new(3), Silent).with_trace_sink(sink);
        kiosk.toggle_camera();
        kiosk.camera_opened(OneTrack);
        for _ in 0..20 {
            let id = kiosk.perform_scan().unwrap();
            kiosk.wake(Wake::ScanComplete(id));
        }
        assert_eq!(recording.outcome_counts(), (20, 0));
    }
}
