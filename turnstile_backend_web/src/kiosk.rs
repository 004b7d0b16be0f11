// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The browser driver.
//!
//! [`Kiosk`] owns the controller behind `Rc<RefCell<_>>`, forwards DOM events
//! to it, and performs the effects it queues: timers through `setTimeout`,
//! camera requests through [`capture::request_stream`] on the
//! `wasm-bindgen-futures` executor. No borrow of the controller is held
//! across an await or a JS callback.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use turnstile_core::config::ValidatedConfig;
use turnstile_core::controller::ScannerController;
use turnstile_core::effect::{Effect, Wake};
use turnstile_core::locale::Language;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, Window};

use crate::capture;
use crate::console::ConsoleSink;
use crate::timer;
use crate::view::{DomIds, DomView};
use crate::{MathRandom, WebAudio};

/// The controller as assembled for the browser.
pub type WebController = ScannerController<DomView, MathRandom, WebAudio>;

/// A running kiosk page.
///
/// Event listeners keep their own handles to the controller, so dropping a
/// `Kiosk` does not stop the page.
#[derive(Clone)]
pub struct Kiosk {
    inner: Rc<RefCell<WebController>>,
}

impl core::fmt::Debug for Kiosk {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.inner.try_borrow() {
            Ok(controller) => f.debug_tuple("Kiosk").field(&*controller).finish(),
            Err(_) => f.write_str("Kiosk(<borrowed>)"),
        }
    }
}

impl Kiosk {
    /// Mounts the kiosk on the current page.
    ///
    /// Locates the elements named by `ids`, picks the browser's language
    /// when it is in the catalog, installs a [`ConsoleSink`], and binds all
    /// event listeners.
    pub fn mount(config: ValidatedConfig, ids: &DomIds) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let view = DomView::from_document(&document, ids)?;
        let mut controller = ScannerController::new(config, view, MathRandom, WebAudio::new())
            .with_trace_sink(ConsoleSink::default());
        if let Some(language) = window
            .navigator()
            .language()
            .as_deref()
            .and_then(Language::detect)
        {
            controller.set_language(language);
        }

        let kiosk = Self::new(controller);
        kiosk.bind(&window, &document)?;
        Ok(kiosk)
    }

    /// Wraps an assembled controller. Call [`bind`](Self::bind) to connect
    /// it to the page.
    #[must_use]
    pub fn new(controller: WebController) -> Self {
        Self {
            inner: Rc::new(RefCell::new(controller)),
        }
    }

    /// Returns the shared controller.
    #[must_use]
    pub fn controller(&self) -> &Rc<RefCell<WebController>> {
        &self.inner
    }

    /// Switches the language, as the language buttons do.
    pub fn set_language(&self, language: Language) {
        self.inner.borrow_mut().set_language(language);
    }

    /// Registers the page's event listeners.
    pub fn bind(&self, window: &Window, document: &Document) -> Result<(), JsValue> {
        let (toggle, scan, preview, languages) = {
            let controller = self.inner.borrow();
            let view = controller.view();
            (
                view.camera_toggle().clone(),
                view.scan_button().clone(),
                view.preview().clone(),
                view.language_buttons().to_vec(),
            )
        };

        self.on(&toggle, "click", WebController::toggle_camera)?;
        self.on(&scan, "click", |c| {
            c.perform_scan();
        })?;
        for (language, button) in &languages {
            let language = *language;
            self.on(button, "click", move |c| c.set_language(language))?;
        }

        self.on(&preview, "loadedmetadata", |c| {
            c.wake(Wake::RefitPreview);
        })?;
        self.on(window, "orientationchange", |c| {
            c.viewport_changed();
        })?;
        self.on(window, "resize", |c| {
            c.viewport_changed();
        })?;

        let page = document.clone();
        self.on(document, "visibilitychange", move |c| {
            c.visibility_changed(page.hidden());
        })?;
        // Bubbles after the button handlers, so the first tap arms audio
        // before any scan can complete.
        self.on(document, "click", WebController::note_user_interaction)?;
        Ok(())
    }

    /// Adds a listener that runs `action` on the controller and then
    /// performs the queued effects.
    fn on(
        &self,
        target: &EventTarget,
        event: &str,
        mut action: impl FnMut(&mut WebController) + 'static,
    ) -> Result<(), JsValue> {
        let inner = Rc::clone(&self.inner);
        let callback = Closure::wrap(Box::new(move |_event: Event| {
            action(&mut inner.borrow_mut());
            pump(&inner);
        }) as Box<dyn FnMut(_)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        callback.forget();
        Ok(())
    }
}

/// Performs every queued effect.
fn pump(inner: &Rc<RefCell<WebController>>) {
    loop {
        let Some(effect) = inner.borrow_mut().poll_effect() else {
            return;
        };
        match effect {
            Effect::Schedule { after, wake } => {
                let inner = Rc::clone(inner);
                timer::after(after, move || {
                    inner.borrow_mut().wake(wake);
                    pump(&inner);
                });
            }
            Effect::RequestCamera(constraints) => {
                let inner = Rc::clone(inner);
                wasm_bindgen_futures::spawn_local(async move {
                    let result = capture::request_stream(constraints).await;
                    {
                        let mut controller = inner.borrow_mut();
                        match result {
                            Ok(stream) => {
                                controller.camera_opened(stream);
                            }
                            Err(error) => {
                                controller.camera_failed(error);
                            }
                        }
                    }
                    pump(&inner);
                });
            }
        }
    }
}
