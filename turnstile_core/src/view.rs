// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation seam.
//!
//! The controller drives the kiosk page exclusively through [`View`]. The
//! web backend implements it over DOM elements; tests implement it with a
//! recorder. Controls are addressed by [`Control`], so a host only needs
//! three capabilities per control: settable text, settable enabled state,
//! and settable active style.

use crate::camera::MediaStream;
use crate::locale::Language;
use crate::message::Classification;
use crate::preview::{PreviewFit, PreviewGeometry};

/// A locale-bound or stateful element on the kiosk page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Control {
    /// Page title.
    Title,
    /// Subtitle under the title.
    Subtitle,
    /// Instruction over the preview.
    Instruction,
    /// Button that starts and stops the camera.
    CameraToggle,
    /// Button that triggers a scan.
    ScanButton,
    /// Language selector for one language.
    Language(Language),
}

/// Treatment of the overlay drawn above the preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// Normal framing guide.
    Resting,
    /// Highlighted while a scan is in flight.
    Scanning,
}

/// Applies controller decisions to a presentation surface.
pub trait View {
    /// Stream type produced by the host's capture device.
    type Stream: MediaStream;

    /// Replaces the text of `control`.
    fn set_text(&mut self, control: Control, text: &str);

    /// Enables or disables `control`.
    fn set_enabled(&mut self, control: Control, enabled: bool);

    /// Marks `control` as active or inactive (used for language selectors).
    fn set_active(&mut self, control: Control, active: bool);

    /// Shows `text` in the result panel with the given style.
    fn show_result(&mut self, text: &str, classification: Classification);

    /// Hides the result panel.
    fn hide_result(&mut self);

    /// Switches the overlay treatment.
    fn set_overlay(&mut self, overlay: Overlay);

    /// Binds `stream` to the preview surface and starts playback.
    fn attach_preview(&mut self, stream: &Self::Stream);

    /// Unbinds the preview surface.
    fn detach_preview(&mut self);

    /// Returns the current video and container sizes, if known.
    fn preview_geometry(&self) -> Option<PreviewGeometry>;

    /// Applies a computed fit to the preview surface.
    fn apply_preview_fit(&mut self, fit: &PreviewFit);
}
