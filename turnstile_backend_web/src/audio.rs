// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web Audio tone cues.

use turnstile_core::audio::{AudioBackend, AudioError, ToneCue, Waveform};
use wasm_bindgen::JsValue;
use web_sys::{AudioContext, GainNode, OscillatorType};

use crate::js_error_text;

/// [`AudioBackend`] that synthesizes cues with an oscillator and a gain
/// envelope.
///
/// Each cue gets its own oscillator and gain node, connected to the
/// context's destination and stopped after the cue's duration.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebAudio;

impl WebAudio {
    /// Creates the backend. No audio resources are allocated until the
    /// controller arms it.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl AudioBackend for WebAudio {
    type Context = AudioContext;

    fn create_context(&mut self) -> Result<AudioContext, AudioError> {
        let ctx = AudioContext::new().map_err(|_| AudioError::ContextUnavailable)?;
        // Contexts created outside a gesture start suspended on some browsers.
        let _ = ctx.resume();
        Ok(ctx)
    }

    fn play(&mut self, ctx: &AudioContext, cue: &ToneCue) -> Result<(), AudioError> {
        let node = |err: JsValue| AudioError::Node(js_error_text(&err));
        let now = ctx.current_time();
        let end = now + cue.duration_s;

        let osc = ctx.create_oscillator().map_err(node)?;
        let gain: GainNode = ctx.create_gain().map_err(node)?;

        osc.set_type(oscillator_type(cue.waveform));
        osc.frequency()
            .set_value_at_time(cue.frequency_hz, now)
            .map_err(node)?;
        gain.gain()
            .set_value_at_time(cue.start_gain, now)
            .map_err(node)?;
        gain.gain()
            .exponential_ramp_to_value_at_time(cue.end_gain, end)
            .map_err(node)?;

        osc.connect_with_audio_node(&gain).map_err(node)?;
        gain.connect_with_audio_node(&ctx.destination())
            .map_err(node)?;

        osc.start_with_when(now).map_err(node)?;
        osc.stop_with_when(end).map_err(node)?;
        Ok(())
    }
}

fn oscillator_type(waveform: Waveform) -> OscillatorType {
    match waveform {
        Waveform::Sine => OscillatorType::Sine,
        Waveform::Square => OscillatorType::Square,
        Waveform::Sawtooth => OscillatorType::Sawtooth,
        Waveform::Triangle => OscillatorType::Triangle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_cues_use_distinct_oscillators() {
        assert_eq!(
            oscillator_type(ToneCue::SUCCESS.waveform),
            OscillatorType::Square
        );
        assert_eq!(
            oscillator_type(ToneCue::FAILURE.waveform),
            OscillatorType::Sawtooth
        );
    }
}
