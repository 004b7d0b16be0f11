// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for the Turnstile kiosk.
//!
//! This crate provides the browser implementations of the seams in
//! [`turnstile_core`]:
//!
//! - [`DomView`]: [`View`] over the kiosk page's DOM elements, located by
//!   [`DomIds`]
//! - [`capture::request_stream`]: `getUserMedia` with the kiosk constraints,
//!   yielding a [`DomStream`]
//! - [`WebAudio`]: [`AudioBackend`] over an `AudioContext`
//! - [`MathRandom`]: [`UniformSource`] over `Math.random`
//! - [`ConsoleSink`]: [`TraceSink`] that logs to the browser console
//! - [`Kiosk`]: the driver that binds DOM events and performs effects
//!
//! [`View`]: turnstile_core::view::View
//! [`AudioBackend`]: turnstile_core::audio::AudioBackend
//! [`UniformSource`]: turnstile_core::outcome::UniformSource
//! [`TraceSink`]: turnstile_core::trace::TraceSink

#![no_std]

extern crate alloc;

mod audio;
pub mod capture;
mod console;
mod kiosk;
mod timer;
mod view;

pub use audio::WebAudio;
pub use capture::DomStream;
pub use console::ConsoleSink;
pub use kiosk::{Kiosk, WebController};
pub use view::{DomIds, DomView};

use turnstile_core::outcome::UniformSource;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Math, js_name = "random")]
    fn math_random() -> f64;
}

/// [`UniformSource`] backed by `Math.random()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathRandom;

impl UniformSource for MathRandom {
    fn next_unit(&mut self) -> f64 {
        math_random()
    }
}

/// Renders a thrown JS value for logs and error payloads.
pub(crate) fn js_error_text(value: &JsValue) -> alloc::string::String {
    use alloc::string::{String, ToString as _};
    use wasm_bindgen::JsCast as _;

    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        let name = String::from(err.name());
        let message = String::from(err.message());
        return alloc::format!("{name}: {message}");
    }
    value
        .as_string()
        .unwrap_or_else(|| "unknown error".to_string())
}
