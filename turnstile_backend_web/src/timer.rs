// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `setTimeout` timers.

use core::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Global binding instead of `web_sys::Window::set_timeout_*`, so scheduling
// does not need to fetch the window.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, ms: i32) -> i32;
}

/// Runs `callback` once after `delay`.
///
/// The JS closure frees itself after running.
pub(crate) fn after(delay: Duration, callback: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(callback);
    set_timeout(&callback, timeout_millis(delay));
}

/// Converts a delay to the millisecond argument of `setTimeout`, saturating
/// at `i32::MAX`.
fn timeout_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kiosk_delays_are_exact() {
        assert_eq!(timeout_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(timeout_millis(Duration::from_secs(3)), 3000);
        assert_eq!(timeout_millis(Duration::from_micros(999)), 0);
    }

    #[test]
    fn long_delays_saturate() {
        assert_eq!(timeout_millis(Duration::from_secs(u64::MAX)), i32::MAX);
    }
}
