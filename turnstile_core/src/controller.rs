// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scanner state machine.
//!
//! [`ScannerController`] owns the kiosk session: current language, camera
//! lifecycle, the in-flight scan, the visible message, and the lazily armed
//! audio output. It is driven by user actions from the host and by the
//! completions of the [`Effect`]s it queued earlier.
//!
//! # Driving the controller
//!
//! ```rust,ignore
//! let mut kiosk = ScannerController::new(config, view, random, audio);
//! kiosk.set_language(Language::detect(browser_tag).unwrap_or_default());
//!
//! // On every user action or completion:
//! kiosk.perform_scan();
//! while let Some(effect) = kiosk.poll_effect() {
//!     match effect {
//!         Effect::Schedule { after, wake } => set_timeout(after, move || kiosk.wake(wake)),
//!         Effect::RequestCamera(c) => spawn(async move {
//!             match get_user_media(c).await {
//!                 Ok(stream) => kiosk.camera_opened(stream),
//!                 Err(err) => kiosk.camera_failed(err),
//!             }
//!         }),
//!     }
//! }
//! ```
//!
//! # Invariants
//!
//! - A stream is held iff the camera state is [`CameraState::Active`].
//! - At most one scan is in flight; [`perform_scan`] is a no-op otherwise.
//! - The scan control is enabled iff the camera is active and no scan is
//!   in flight.
//! - Only the most recent message can be hidden by its timer.
//!
//! [`perform_scan`]: ScannerController::perform_scan

use alloc::boxed::Box;
use alloc::collections::VecDeque;
use core::fmt;
use core::mem;

use crate::audio::{AudioBackend, AudioFeedback};
use crate::camera::{CameraError, CameraState, MediaStream};
use crate::config::{KioskConfig, ValidatedConfig};
use crate::effect::{Effect, Wake};
use crate::locale::{Language, MessageKey, Strings};
use crate::message::{Classification, MessageBoard, MessageId, ShownMessage};
use crate::outcome::{OutcomeSimulator, ScanId, ScanOutcome, UniformSource};
use crate::preview::cover_fit;
use crate::trace::{
    LanguageEvent, MessageExpiredEvent, MessageShownEvent, ScanFinishedEvent, TraceSink, Tracer,
};
use crate::view::{Control, Overlay, View};

enum Camera<S> {
    Idle,
    Requesting,
    Active(S),
}

/// The kiosk session state machine.
///
/// Generic over the presentation surface `V`, the random source `R`, and the
/// audio backend `B`, all injected at construction.
pub struct ScannerController<V: View, R: UniformSource, B: AudioBackend> {
    config: KioskConfig,
    simulator: OutcomeSimulator,
    view: V,
    random: R,
    audio: AudioFeedback<B>,
    language: Language,
    camera: Camera<V::Stream>,
    scan: Option<ScanId>,
    next_scan: u64,
    messages: MessageBoard,
    effects: VecDeque<Effect>,
    tracer: Tracer,
}

impl<V: View, R: UniformSource, B: AudioBackend> fmt::Debug for ScannerController<V, R, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScannerController")
            .field("language", &self.language)
            .field("camera", &self.camera_state())
            .field("scan", &self.scan)
            .field("message", &self.messages.current())
            .field("pending_effects", &self.effects.len())
            .field("audio", &self.audio)
            .finish_non_exhaustive()
    }
}

impl<V: View, R: UniformSource, B: AudioBackend> ScannerController<V, R, B> {
    /// Creates the controller and renders the initial page state.
    ///
    /// The page starts in the configured default language with the camera
    /// idle, the scan control disabled, and the result panel hidden.
    pub fn new(config: ValidatedConfig, view: V, random: R, audio: B) -> Self {
        let mut controller = Self {
            config: *config.get(),
            simulator: OutcomeSimulator::new(&config),
            view,
            random,
            audio: AudioFeedback::new(audio),
            language: config.get().default_language,
            camera: Camera::Idle,
            scan: None,
            next_scan: 0,
            messages: MessageBoard::new(),
            effects: VecDeque::new(),
            tracer: Tracer::none(),
        };
        controller.render_language();
        controller.view.set_enabled(Control::ScanButton, false);
        controller.view.set_overlay(Overlay::Resting);
        controller.view.hide_result();
        controller
    }

    /// Installs a trace sink. Events are only delivered with the `trace`
    /// feature enabled.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.tracer = Tracer::new(Box::new(sink));
        self
    }

    // -- accessors ----------------------------------------------------------

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &KioskConfig {
        &self.config
    }

    /// Returns the active language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns the camera lifecycle state.
    #[must_use]
    pub fn camera_state(&self) -> CameraState {
        match self.camera {
            Camera::Idle => CameraState::Idle,
            Camera::Requesting => CameraState::Requesting,
            Camera::Active(_) => CameraState::Active,
        }
    }

    /// Returns `true` while a stream is held.
    #[must_use]
    pub fn is_camera_active(&self) -> bool {
        matches!(self.camera, Camera::Active(_))
    }

    /// Returns the in-flight scan, if any.
    #[must_use]
    pub fn scan_in_progress(&self) -> Option<ScanId> {
        self.scan
    }

    /// Returns the visible result message, if any.
    #[must_use]
    pub fn current_message(&self) -> Option<&ShownMessage> {
        self.messages.current()
    }

    /// Returns `true` once the audio context exists.
    #[must_use]
    pub fn is_audio_armed(&self) -> bool {
        self.audio.is_armed()
    }

    /// Returns the view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Returns the view mutably, for host-side updates outside the
    /// controller's concern.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Returns the audio backend.
    #[must_use]
    pub fn audio_backend(&self) -> &B {
        self.audio.backend()
    }

    /// Takes the next pending effect.
    pub fn poll_effect(&mut self) -> Option<Effect> {
        self.effects.pop_front()
    }

    // -- locale -------------------------------------------------------------

    /// Switches the language and re-renders every locale-bound control.
    ///
    /// Exactly the selector for `language` is marked active. Calling this
    /// twice with the same language yields the same page.
    pub fn set_language(&mut self, language: Language) {
        let from = self.language;
        self.language = language;
        self.render_language();
        self.tracer.language_changed(&LanguageEvent { from, to: language });
    }

    /// Switches to the language named by `code`, falling back to
    /// [`Language::DEFAULT`] for codes outside the catalog.
    pub fn set_language_code(&mut self, code: &str) -> Language {
        let language = Language::from_code_or_default(code);
        self.set_language(language);
        language
    }

    fn strings(&self) -> &'static Strings {
        self.language.strings()
    }

    fn render_language(&mut self) {
        let s = self.strings();
        self.view.set_text(Control::Title, s.title);
        self.view.set_text(Control::Subtitle, s.subtitle);
        self.view.set_text(Control::Instruction, s.instruction);
        let toggle = if self.is_camera_active() {
            s.stop_camera
        } else {
            s.start_camera
        };
        self.view.set_text(Control::CameraToggle, toggle);
        let scan = if self.scan.is_some() {
            s.scanning
        } else {
            s.scan_ticket
        };
        self.view.set_text(Control::ScanButton, scan);
        for language in Language::ALL {
            self.view
                .set_active(Control::Language(language), language == self.language);
        }
    }

    // -- audio --------------------------------------------------------------

    /// Records a genuine user gesture, arming the audio output on the first
    /// call.
    pub fn note_user_interaction(&mut self) {
        match self.audio.arm() {
            Ok(true) => self.tracer.audio_armed(),
            Ok(false) => {}
            Err(err) => self.tracer.audio_unavailable(&err),
        }
    }

    // -- camera -------------------------------------------------------------

    /// Starts the camera when idle, stops it when active.
    ///
    /// Ignored while a request is pending, so two streams are never
    /// acquired at once.
    pub fn toggle_camera(&mut self) {
        match self.camera {
            Camera::Idle => self.start_camera(),
            Camera::Active(_) => {
                self.stop_camera();
            }
            Camera::Requesting => {}
        }
    }

    /// Requests a stream from the host. No-op unless idle.
    pub fn start_camera(&mut self) {
        if !matches!(self.camera, Camera::Idle) {
            return;
        }
        self.camera = Camera::Requesting;
        let constraints = self.config.constraints;
        self.effects.push_back(Effect::RequestCamera(constraints));
        self.tracer.camera_requested(&constraints);
    }

    /// Completes a camera request with a live stream.
    ///
    /// Returns `false` if no request was pending; the stream is then
    /// released immediately.
    pub fn camera_opened(&mut self, mut stream: V::Stream) -> bool {
        if !matches!(self.camera, Camera::Requesting) {
            let released = stream.stop_tracks();
            self.tracer.stale_stream(released);
            return false;
        }
        self.view.attach_preview(&stream);
        self.camera = Camera::Active(stream);

        let s = self.strings();
        self.view.set_text(Control::CameraToggle, s.stop_camera);
        self.view
            .set_enabled(Control::ScanButton, self.scan.is_none());
        self.tracer.camera_started();
        self.show_message(MessageKey::CameraStarted, Classification::Success);
        true
    }

    /// Completes a camera request with a failure.
    ///
    /// The camera returns to idle and the localized error is shown. Returns
    /// `false` if no request was pending.
    pub fn camera_failed(&mut self, error: CameraError) -> bool {
        if !matches!(self.camera, Camera::Requesting) {
            return false;
        }
        self.camera = Camera::Idle;
        self.tracer.camera_failed(&error);
        self.show_message(MessageKey::CameraError, Classification::Failure);
        true
    }

    /// Releases the stream and returns to idle.
    ///
    /// Returns `false` without side effects when no stream is held.
    pub fn stop_camera(&mut self) -> bool {
        let mut stream = match mem::replace(&mut self.camera, Camera::Idle) {
            Camera::Active(stream) => stream,
            other => {
                self.camera = other;
                return false;
            }
        };
        let released = stream.stop_tracks();
        self.view.detach_preview();

        let s = self.strings();
        self.view.set_text(Control::CameraToggle, s.start_camera);
        self.view.set_enabled(Control::ScanButton, false);
        self.tracer.camera_stopped(released);
        self.show_message(MessageKey::CameraStopped, Classification::Success);
        true
    }

    /// Reacts to an orientation or viewport size change.
    ///
    /// While active, schedules a preview refit after the settling delay.
    /// Returns `true` if a refit was scheduled.
    pub fn viewport_changed(&mut self) -> bool {
        if !self.is_camera_active() {
            return false;
        }
        self.effects.push_back(Effect::Schedule {
            after: self.config.refit_delay,
            wake: Wake::RefitPreview,
        });
        true
    }

    /// Reacts to the page being hidden or shown.
    ///
    /// The stream is kept either way; only the user stops the camera.
    pub fn visibility_changed(&mut self, hidden: bool) {
        self.tracer.visibility_changed(hidden);
    }

    fn refit_preview(&mut self) {
        if !self.is_camera_active() {
            return;
        }
        let fit = self.view.preview_geometry().and_then(cover_fit);
        if let Some(fit) = &fit {
            self.view.apply_preview_fit(fit);
        }
        self.tracer.preview_refit(fit.as_ref());
    }

    // -- scanning -----------------------------------------------------------

    /// Starts a simulated scan.
    ///
    /// Returns `None` without touching any state when a scan is already in
    /// flight. Otherwise the scan control is disabled and relabeled, the
    /// overlay switches to its scanning treatment, and completion is
    /// scheduled after the configured scan delay.
    pub fn perform_scan(&mut self) -> Option<ScanId> {
        if let Some(in_flight) = self.scan {
            self.tracer.scan_ignored(in_flight);
            return None;
        }
        let id = ScanId(self.next_scan);
        self.next_scan += 1;
        self.scan = Some(id);

        let s = self.strings();
        self.view.set_enabled(Control::ScanButton, false);
        self.view.set_text(Control::ScanButton, s.scanning);
        self.view.set_overlay(Overlay::Scanning);
        self.effects.push_back(Effect::Schedule {
            after: self.config.scan_delay,
            wake: Wake::ScanComplete(id),
        });
        self.tracer.scan_started(id);
        Some(id)
    }

    fn complete_scan(&mut self, id: ScanId) -> Option<ScanOutcome> {
        if self.scan != Some(id) {
            return None;
        }
        let draw = self.simulator.draw(&mut self.random);
        self.tracer.scan_finished(&ScanFinishedEvent::new(id, draw));

        let outcome = draw.outcome;
        self.show_message(outcome.message_key(), outcome.classification());
        let cue = self.audio.play(&outcome.cue());
        self.tracer.cue(outcome, &cue);

        let s = self.strings();
        self.view.set_overlay(Overlay::Resting);
        self.view.set_text(Control::ScanButton, s.scan_ticket);
        self.view
            .set_enabled(Control::ScanButton, self.is_camera_active());
        self.scan = None;
        Some(outcome)
    }

    // -- messages -----------------------------------------------------------

    /// Shows a localized result message and schedules its hide.
    pub fn show_message(&mut self, key: MessageKey, classification: Classification) -> MessageId {
        let text = self.strings().message(key);
        let id = self.messages.show(key, classification);
        self.view.show_result(text, classification);
        self.effects.push_back(Effect::Schedule {
            after: self.config.message_timeout,
            wake: Wake::HideMessage(id),
        });
        self.tracer.message_shown(&MessageShownEvent {
            id,
            key,
            classification,
            language: self.language,
        });
        id
    }

    fn expire_message(&mut self, id: MessageId) {
        let hidden = self.messages.expire(id);
        if hidden {
            self.view.hide_result();
        }
        self.tracer
            .message_expired(&MessageExpiredEvent { id, hidden });
    }

    // -- completions --------------------------------------------------------

    /// Delivers a timer completion queued by [`Effect::Schedule`].
    ///
    /// Returns the scan outcome when the wake completed a scan.
    pub fn wake(&mut self, wake: Wake) -> Option<ScanOutcome> {
        match wake {
            Wake::ScanComplete(id) => self.complete_scan(id),
            Wake::HideMessage(id) => {
                self.expire_message(id);
                None
            }
            Wake::RefitPreview => {
                self.refit_preview();
                None
            }
        }
    }
}
