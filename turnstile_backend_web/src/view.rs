// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM presentation.
//!
//! [`DomView`] implements [`View`] over the elements of the kiosk page. The
//! page markup is owned by the host; elements are located once, by the ids in
//! [`DomIds`], when the view is created.

use alloc::format;
use alloc::vec::Vec;

use kurbo::Size;
use turnstile_core::locale::Language;
use turnstile_core::message::Classification;
use turnstile_core::preview::{PreviewFit, PreviewGeometry};
use turnstile_core::view::{Control, Overlay, View};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlButtonElement, HtmlElement, HtmlVideoElement};

use crate::capture::DomStream;

/// Element ids and selectors of the kiosk page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomIds {
    /// `<video>` showing the live preview.
    pub preview: &'static str,
    /// Camera start/stop button.
    pub camera_toggle: &'static str,
    /// Scan button.
    pub scan_button: &'static str,
    /// Result panel whose class carries the classification.
    pub result_panel: &'static str,
    /// Text node inside the result panel.
    pub result_text: &'static str,
    /// Framing overlay above the preview.
    pub overlay: &'static str,
    /// Page title.
    pub title: &'static str,
    /// Subtitle.
    pub subtitle: &'static str,
    /// Instruction over the preview.
    pub instruction: &'static str,
    /// CSS selector matching the language buttons.
    pub language_buttons: &'static str,
    /// Attribute on a language button holding its code.
    pub language_attribute: &'static str,
}

impl DomIds {
    /// Ids of the stock `index.html`.
    pub const KIOSK_PAGE: Self = Self {
        preview: "camera-preview",
        camera_toggle: "start-camera-btn",
        scan_button: "scan-btn",
        result_panel: "result-message",
        result_text: "result-text",
        overlay: "camera-overlay",
        title: "app-title",
        subtitle: "subtitle",
        instruction: "scan-instruction",
        language_buttons: ".lang-btn",
        language_attribute: "data-lang",
    };
}

impl Default for DomIds {
    fn default() -> Self {
        Self::KIOSK_PAGE
    }
}

const ACTIVE_CLASS: &str = "active";

/// [`View`] over the kiosk page's DOM.
pub struct DomView {
    preview: HtmlVideoElement,
    camera_toggle: HtmlButtonElement,
    scan_button: HtmlButtonElement,
    result_panel: HtmlElement,
    result_text: HtmlElement,
    overlay: HtmlElement,
    title: HtmlElement,
    subtitle: HtmlElement,
    instruction: HtmlElement,
    languages: Vec<(Language, HtmlElement)>,
}

impl core::fmt::Debug for DomView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomView")
            .field(
                "languages",
                &self.languages.iter().map(|(l, _)| *l).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl DomView {
    /// Locates the kiosk elements in `document`.
    ///
    /// Fails if a required element is missing or has the wrong type.
    /// Language buttons whose code is not in the catalog are skipped.
    pub fn from_document(document: &Document, ids: &DomIds) -> Result<Self, JsValue> {
        let languages = language_buttons(document, ids)?;
        Ok(Self {
            preview: by_id(document, ids.preview)?,
            camera_toggle: by_id(document, ids.camera_toggle)?,
            scan_button: by_id(document, ids.scan_button)?,
            result_panel: by_id(document, ids.result_panel)?,
            result_text: by_id(document, ids.result_text)?,
            overlay: by_id(document, ids.overlay)?,
            title: by_id(document, ids.title)?,
            subtitle: by_id(document, ids.subtitle)?,
            instruction: by_id(document, ids.instruction)?,
            languages,
        })
    }

    /// Returns the preview element.
    #[must_use]
    pub fn preview(&self) -> &HtmlVideoElement {
        &self.preview
    }

    /// Returns the camera toggle button.
    #[must_use]
    pub fn camera_toggle(&self) -> &HtmlButtonElement {
        &self.camera_toggle
    }

    /// Returns the scan button.
    #[must_use]
    pub fn scan_button(&self) -> &HtmlButtonElement {
        &self.scan_button
    }

    /// Returns the language buttons with the language each selects.
    #[must_use]
    pub fn language_buttons(&self) -> &[(Language, HtmlElement)] {
        &self.languages
    }

    fn text_target(&self, control: Control) -> Option<&HtmlElement> {
        match control {
            Control::Title => Some(&self.title),
            Control::Subtitle => Some(&self.subtitle),
            Control::Instruction => Some(&self.instruction),
            Control::CameraToggle => Some(&*self.camera_toggle),
            Control::ScanButton => Some(&*self.scan_button),
            // Selector labels are fixed in the markup.
            Control::Language(_) => None,
        }
    }

    fn button(&self, control: Control) -> Option<&HtmlButtonElement> {
        match control {
            Control::CameraToggle => Some(&self.camera_toggle),
            Control::ScanButton => Some(&self.scan_button),
            _ => None,
        }
    }

    fn language_button(&self, language: Language) -> impl Iterator<Item = &HtmlElement> {
        self.languages
            .iter()
            .filter(move |(l, _)| *l == language)
            .map(|(_, el)| el)
    }
}

impl View for DomView {
    type Stream = DomStream;

    fn set_text(&mut self, control: Control, text: &str) {
        if let Some(el) = self.text_target(control) {
            el.set_text_content(Some(text));
        }
    }

    fn set_enabled(&mut self, control: Control, enabled: bool) {
        if let Some(button) = self.button(control) {
            button.set_disabled(!enabled);
        }
    }

    fn set_active(&mut self, control: Control, active: bool) {
        let Control::Language(language) = control else {
            return;
        };
        for el in self.language_button(language) {
            let _ = el.class_list().toggle_with_force(ACTIVE_CLASS, active);
        }
    }

    fn show_result(&mut self, text: &str, classification: Classification) {
        self.result_text.set_text_content(Some(text));
        self.result_panel
            .set_class_name(&result_class(classification.css_class()));
    }

    fn hide_result(&mut self) {
        self.result_panel.set_class_name(&result_class("hidden"));
    }

    fn set_overlay(&mut self, overlay: Overlay) {
        let _ = self
            .overlay
            .style()
            .set_property("background", overlay_background(overlay));
    }

    fn attach_preview(&mut self, stream: &DomStream) {
        self.preview
            .set_src_object(Some(stream.as_media_stream()));
        let _ = self.preview.play();
        let _ = self.overlay.style().set_property("display", "flex");
    }

    fn detach_preview(&mut self) {
        self.preview.set_src_object(None);
    }

    fn preview_geometry(&self) -> Option<PreviewGeometry> {
        let video = Size::new(
            f64::from(self.preview.video_width()),
            f64::from(self.preview.video_height()),
        );
        let container = Size::new(
            f64::from(self.preview.client_width()),
            f64::from(self.preview.client_height()),
        );
        Some(PreviewGeometry { video, container })
    }

    fn apply_preview_fit(&mut self, fit: &PreviewFit) {
        let style = self.preview.style();
        let _ = style.set_property("object-fit", "cover");
        let _ = style.set_property("object-position", "50% 50%");
        let _ = style.set_property("--preview-scale", &format!("{:.4}", fit.scale));
    }
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has an unexpected type")))
}

fn language_buttons(
    document: &Document,
    ids: &DomIds,
) -> Result<Vec<(Language, HtmlElement)>, JsValue> {
    let nodes = document.query_selector_all(ids.language_buttons)?;
    let mut buttons = Vec::new();
    for i in 0..nodes.length() {
        let Some(el) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };
        let language = el
            .get_attribute(ids.language_attribute)
            .as_deref()
            .and_then(Language::from_code);
        if let Some(language) = language {
            buttons.push((language, el));
        }
    }
    Ok(buttons)
}

fn result_class(modifier: &str) -> alloc::string::String {
    format!("result-message {modifier}")
}

fn overlay_background(overlay: Overlay) -> &'static str {
    match overlay {
        Overlay::Resting => "rgba(0,0,0,0.3)",
        Overlay::Scanning => "rgba(255,255,255,0.2)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_page_ids() {
        let ids = DomIds::default();
        assert_eq!(ids.preview, "camera-preview");
        assert_eq!(ids.camera_toggle, "start-camera-btn");
        assert_eq!(ids.result_text, "result-text");
        assert_eq!(ids.language_attribute, "data-lang");
    }

    #[test]
    fn result_panel_classes() {
        assert_eq!(
            result_class(Classification::Success.css_class()),
            "result-message success"
        );
        assert_eq!(
            result_class(Classification::Failure.css_class()),
            "result-message failure"
        );
        assert_eq!(result_class("hidden"), "result-message hidden");
    }

    #[test]
    fn scanning_overlay_is_lighter() {
        assert_ne!(
            overlay_background(Overlay::Resting),
            overlay_background(Overlay::Scanning)
        );
        assert!(overlay_background(Overlay::Scanning).starts_with("rgba(255"));
    }
}
