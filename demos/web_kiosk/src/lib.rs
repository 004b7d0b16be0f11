// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pool entrance ticket-scanning kiosk.
//!
//! Mounts the Turnstile controller on `index.html`: live rear-camera preview,
//! simulated scans that succeed three times out of four, localized feedback
//! in English, German, and French, and short success/failure tones.
//!
//! Build with: `wasm-pack build --target web demos/web_kiosk`
//! Then serve `demos/web_kiosk/` over HTTPS (or localhost) and open
//! `index.html`; camera access requires a secure context.

use std::cell::RefCell;

use turnstile_backend_web::{DomIds, Kiosk};
use turnstile_core::config::KioskConfig;
use turnstile_core::locale::Language;
use wasm_bindgen::prelude::*;

thread_local! {
    static KIOSK: RefCell<Option<Kiosk>> = const { RefCell::new(None) };
}

/// Entry point for the kiosk demo.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    let config = KioskConfig::reference()
        .validate()
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    let kiosk = Kiosk::mount(config, &DomIds::KIOSK_PAGE)?;
    KIOSK.with(|slot| *slot.borrow_mut() = Some(kiosk));
    Ok(())
}

/// Switches the page language; `code` outside the catalog selects English.
///
/// Exposed for the inline `onclick` handlers of pages that predate the
/// `.lang-btn` listeners.
#[wasm_bindgen(js_name = "setLanguage")]
pub fn set_language(code: &str) {
    KIOSK.with(|slot| {
        if let Some(kiosk) = slot.borrow().as_ref() {
            kiosk.set_language(Language::from_code_or_default(code));
        }
    });
}
