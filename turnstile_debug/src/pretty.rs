// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Each line
//! starts with a bracketed category tag.

use std::io::Write;

use turnstile_core::audio::{AudioError, CueResult};
use turnstile_core::camera::{CameraError, CaptureConstraints};
use turnstile_core::outcome::{ScanId, ScanOutcome};
use turnstile_core::preview::PreviewFit;
use turnstile_core::trace::{
    LanguageEvent, MessageExpiredEvent, MessageShownEvent, ScanFinishedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn outcome_name(outcome: ScanOutcome) -> &'static str {
    match outcome {
        ScanOutcome::Success => "success",
        ScanOutcome::Failure => "failure",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_language_changed(&mut self, e: &LanguageEvent) {
        let _ = writeln!(self.writer, "[locale] {} -> {}", e.from, e.to);
    }

    fn on_camera_requested(&mut self, c: &CaptureConstraints) {
        let _ = writeln!(
            self.writer,
            "[camera] request facing={} width={}..{} height={}..{} audio={}",
            c.facing.as_str(),
            c.width.ideal,
            c.width.max,
            c.height.ideal,
            c.height.max,
            c.audio,
        );
    }

    fn on_camera_started(&mut self) {
        let _ = writeln!(self.writer, "[camera] active");
    }

    fn on_camera_failed(&mut self, error: &CameraError) {
        let _ = writeln!(self.writer, "[camera] failed: {error}");
    }

    fn on_camera_stopped(&mut self, tracks_released: usize) {
        let _ = writeln!(
            self.writer,
            "[camera] stopped tracks_released={tracks_released}"
        );
    }

    fn on_stale_stream(&mut self, tracks_released: usize) {
        let _ = writeln!(
            self.writer,
            "[camera] stale stream released tracks={tracks_released}"
        );
    }

    fn on_scan_started(&mut self, id: ScanId) {
        let _ = writeln!(self.writer, "[scan] #{} start", id.0);
    }

    fn on_scan_ignored(&mut self, in_flight: ScanId) {
        let _ = writeln!(self.writer, "[scan] ignored (#{} in flight)", in_flight.0);
    }

    fn on_scan_finished(&mut self, e: &ScanFinishedEvent) {
        let _ = writeln!(
            self.writer,
            "[scan] #{} {} sample={:.4}",
            e.id.0,
            outcome_name(e.outcome),
            e.sample,
        );
    }

    fn on_message_shown(&mut self, e: &MessageShownEvent) {
        let _ = writeln!(
            self.writer,
            "[message] #{} show {} class={} lang={}",
            e.id.0,
            e.key.as_str(),
            e.classification.css_class(),
            e.language,
        );
    }

    fn on_message_expired(&mut self, e: &MessageExpiredEvent) {
        let verdict = if e.hidden { "hidden" } else { "stale" };
        let _ = writeln!(self.writer, "[message] #{} expire {verdict}", e.id.0);
    }

    fn on_audio_armed(&mut self) {
        let _ = writeln!(self.writer, "[audio] armed");
    }

    fn on_audio_unavailable(&mut self, error: &AudioError) {
        let _ = writeln!(self.writer, "[audio] unavailable: {error}");
    }

    fn on_cue(&mut self, outcome: ScanOutcome, result: &CueResult) {
        let status = match result {
            CueResult::Played => "played".to_owned(),
            CueResult::Skipped => "skipped".to_owned(),
            CueResult::Failed(error) => format!("failed: {error}"),
        };
        let _ = writeln!(
            self.writer,
            "[audio] {} cue {status}",
            outcome_name(outcome)
        );
    }

    fn on_visibility_changed(&mut self, hidden: bool) {
        let _ = writeln!(self.writer, "[page] hidden={hidden}");
    }

    fn on_preview_refit(&mut self, fit: Option<&PreviewFit>) {
        let _ = match fit {
            Some(fit) => writeln!(
                self.writer,
                "[preview] scale={:.3} visible=({:.0},{:.0})-({:.0},{:.0})",
                fit.scale, fit.visible.x0, fit.visible.y0, fit.visible.x1, fit.visible.y1,
            ),
            None => writeln!(self.writer, "[preview] no geometry"),
        };
    }
}
