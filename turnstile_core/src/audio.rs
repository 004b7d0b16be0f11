// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Audio feedback cues.
//!
//! Browsers only allow an audio context to be created after a genuine user
//! gesture. [`AudioFeedback`] therefore models the context as a two-state
//! resource: it starts unarmed, is armed once by [`AudioFeedback::arm`] from
//! the first interaction, and is reused for every later cue. Playing a cue
//! while unarmed is silently skipped.

use alloc::string::String;
use core::fmt;

/// Oscillator shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Pure tone.
    Sine,
    /// Bright, hollow tone.
    Square,
    /// Harsh, buzzy tone.
    Sawtooth,
    /// Soft, flute-like tone.
    Triangle,
}

/// A single decaying tone.
///
/// Gain starts at `start_gain` and ramps exponentially to `end_gain` over
/// `duration_s`, after which the oscillator stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToneCue {
    /// Oscillator frequency.
    pub frequency_hz: f32,
    /// Length of the cue in seconds.
    pub duration_s: f64,
    /// Oscillator shape.
    pub waveform: Waveform,
    /// Gain at the start of the cue.
    pub start_gain: f32,
    /// Gain reached at the end of the cue. Must be positive for an
    /// exponential ramp.
    pub end_gain: f32,
}

impl ToneCue {
    /// Short, high, bright beep for an accepted ticket.
    pub const SUCCESS: Self = Self {
        frequency_hz: 800.0,
        duration_s: 0.3,
        waveform: Waveform::Square,
        start_gain: 0.3,
        end_gain: 0.01,
    };

    /// Longer, low, harsh buzz for a rejected ticket.
    pub const FAILURE: Self = Self {
        frequency_hz: 200.0,
        duration_s: 0.5,
        waveform: Waveform::Sawtooth,
        start_gain: 0.3,
        end_gain: 0.01,
    };
}

/// Why a cue could not be played.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AudioError {
    /// The platform has no usable audio context.
    ContextUnavailable,
    /// Creating or wiring an audio node failed.
    Node(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextUnavailable => f.write_str("audio context unavailable"),
            Self::Node(msg) => write!(f, "audio node error: {msg}"),
        }
    }
}

impl core::error::Error for AudioError {}

/// Platform audio output.
pub trait AudioBackend {
    /// The platform's audio context.
    type Context;

    /// Creates the audio context. Only called from a user gesture.
    fn create_context(&mut self) -> Result<Self::Context, AudioError>;

    /// Schedules `cue` on `context`. Must not block until the cue ends.
    fn play(&mut self, context: &Self::Context, cue: &ToneCue) -> Result<(), AudioError>;
}

/// What happened to a requested cue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CueResult {
    /// The cue was scheduled.
    Played,
    /// No audio context exists yet.
    Skipped,
    /// The backend failed; the failure is reported but otherwise ignored.
    Failed(AudioError),
}

enum ContextState<C> {
    Unarmed,
    Armed(C),
}

/// Lazily armed audio output.
pub struct AudioFeedback<B: AudioBackend> {
    backend: B,
    state: ContextState<B::Context>,
}

impl<B: AudioBackend> fmt::Debug for AudioFeedback<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioFeedback")
            .field("armed", &self.is_armed())
            .finish_non_exhaustive()
    }
}

impl<B: AudioBackend> AudioFeedback<B> {
    /// Wraps a backend; no context is created yet.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: ContextState::Unarmed,
        }
    }

    /// Returns `true` once a context exists.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, ContextState::Armed(_))
    }

    /// Creates the context if it does not exist yet.
    ///
    /// Returns `Ok(true)` when this call armed the output, `Ok(false)` when
    /// it was already armed. On error the output stays unarmed, so a later
    /// gesture may retry.
    pub fn arm(&mut self) -> Result<bool, AudioError> {
        if self.is_armed() {
            return Ok(false);
        }
        let context = self.backend.create_context()?;
        self.state = ContextState::Armed(context);
        Ok(true)
    }

    /// Plays `cue` if armed. Never fails.
    pub fn play(&mut self, cue: &ToneCue) -> CueResult {
        let ContextState::Armed(context) = &self.state else {
            return CueResult::Skipped;
        };
        match self.backend.play(context, cue) {
            Ok(()) => CueResult::Played,
            Err(err) => CueResult::Failed(err),
        }
    }

    /// Returns the backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
