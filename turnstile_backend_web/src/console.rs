// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace sink.

use alloc::format;
use alloc::string::String;

use turnstile_core::audio::{AudioError, CueResult};
use turnstile_core::camera::{CameraError, CaptureConstraints};
use turnstile_core::outcome::{ScanId, ScanOutcome};
use turnstile_core::preview::PreviewFit;
use turnstile_core::trace::{
    LanguageEvent, MessageExpiredEvent, MessageShownEvent, ScanFinishedEvent, TraceSink,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// A [`TraceSink`] that writes one console line per event.
///
/// Failures go to `console.warn`, everything else to `console.debug`.
#[derive(Clone, Debug)]
pub struct ConsoleSink {
    prefix: &'static str,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new("[turnstile]")
    }
}

impl ConsoleSink {
    /// Creates a sink that prepends `prefix` to every line.
    #[must_use]
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix }
    }

    fn debug(&self, line: String) {
        console::debug_1(&JsValue::from_str(&format!("{} {line}", self.prefix)));
    }

    fn warn(&self, line: String) {
        console::warn_1(&JsValue::from_str(&format!("{} {line}", self.prefix)));
    }
}

impl TraceSink for ConsoleSink {
    fn on_language_changed(&mut self, e: &LanguageEvent) {
        self.debug(format!("language {} -> {}", e.from, e.to));
    }

    fn on_camera_requested(&mut self, c: &CaptureConstraints) {
        self.debug(format!(
            "camera requested facing={} ideal={}x{}",
            c.facing.as_str(),
            c.width.ideal,
            c.height.ideal
        ));
    }

    fn on_camera_started(&mut self) {
        self.debug(String::from("camera started"));
    }

    fn on_camera_failed(&mut self, error: &CameraError) {
        self.warn(format!("camera error: {error}"));
    }

    fn on_camera_stopped(&mut self, tracks_released: usize) {
        self.debug(format!("camera stopped, {tracks_released} track(s) released"));
    }

    fn on_stale_stream(&mut self, tracks_released: usize) {
        self.warn(format!(
            "unrequested stream released ({tracks_released} track(s))"
        ));
    }

    fn on_scan_started(&mut self, id: ScanId) {
        self.debug(format!("scan #{} started", id.0));
    }

    fn on_scan_ignored(&mut self, in_flight: ScanId) {
        self.debug(format!("scan ignored, #{} in flight", in_flight.0));
    }

    fn on_scan_finished(&mut self, e: &ScanFinishedEvent) {
        self.debug(format!(
            "scan #{} {:?} (sample {:.4})",
            e.id.0, e.outcome, e.sample
        ));
    }

    fn on_message_shown(&mut self, e: &MessageShownEvent) {
        self.debug(format!(
            "message #{} {} [{}] in {}",
            e.id.0,
            e.key.as_str(),
            e.classification.css_class(),
            e.language
        ));
    }

    fn on_message_expired(&mut self, e: &MessageExpiredEvent) {
        if e.hidden {
            self.debug(format!("message #{} hidden", e.id.0));
        }
    }

    fn on_audio_armed(&mut self) {
        self.debug(String::from("audio armed"));
    }

    fn on_audio_unavailable(&mut self, error: &AudioError) {
        self.warn(format!("audio unavailable: {error}"));
    }

    fn on_cue(&mut self, outcome: ScanOutcome, result: &CueResult) {
        if let CueResult::Failed(error) = result {
            self.warn(format!("{outcome:?} cue failed: {error}"));
        }
    }

    fn on_visibility_changed(&mut self, hidden: bool) {
        self.debug(format!("page {}", if hidden { "hidden" } else { "visible" }));
    }

    fn on_preview_refit(&mut self, fit: Option<&PreviewFit>) {
        match fit {
            Some(fit) => self.debug(format!("preview refit, scale {:.3}", fit.scale)),
            None => self.debug(String::from("preview refit skipped, no metadata yet")),
        }
    }
}
