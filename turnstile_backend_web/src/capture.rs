// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera capture through `navigator.mediaDevices.getUserMedia`.
//!
//! [`request_stream`] negotiates a stream with the kiosk's
//! [`CaptureConstraints`] and maps rejections onto [`CameraError`] by their
//! `DOMException` name.

use js_sys::{Object, Reflect};
use turnstile_core::camera::{CameraError, CaptureConstraints, DimensionBounds, MediaStream};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, MediaStreamConstraints, MediaStreamTrack};

use crate::js_error_text;

/// A live `getUserMedia` stream.
#[derive(Clone, Debug)]
pub struct DomStream {
    inner: web_sys::MediaStream,
}

impl DomStream {
    /// Wraps a stream obtained elsewhere.
    #[must_use]
    pub fn new(inner: web_sys::MediaStream) -> Self {
        Self { inner }
    }

    /// Returns the underlying stream.
    #[must_use]
    pub fn as_media_stream(&self) -> &web_sys::MediaStream {
        &self.inner
    }
}

impl MediaStream for DomStream {
    fn stop_tracks(&mut self) -> usize {
        let mut stopped = 0;
        for track in self.inner.get_tracks().iter() {
            track.unchecked_into::<MediaStreamTrack>().stop();
            stopped += 1;
        }
        stopped
    }
}

/// Requests a camera stream.
///
/// Resolves once the user granted (or the browser refused) access.
pub async fn request_stream(constraints: CaptureConstraints) -> Result<DomStream, CameraError> {
    let window = web_sys::window().ok_or(CameraError::Unsupported)?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|_| CameraError::Unsupported)?;
    let constraints = constraints_object(&constraints).map_err(|err| camera_error(&err))?;
    let promise = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|err| camera_error(&err))?;
    let stream = JsFuture::from(promise)
        .await
        .map_err(|err| camera_error(&err))?;
    Ok(DomStream::new(stream.unchecked_into()))
}

fn camera_error(value: &JsValue) -> CameraError {
    match value.dyn_ref::<DomException>() {
        Some(exception) => CameraError::from_exception_name(&exception.name(), &exception.message()),
        None => CameraError::Other(js_error_text(value)),
    }
}

fn constraints_object(c: &CaptureConstraints) -> Result<MediaStreamConstraints, JsValue> {
    let video = Object::new();
    Reflect::set(&video, &"facingMode".into(), &c.facing.as_str().into())?;
    Reflect::set(&video, &"width".into(), &bounds_object(c.width)?)?;
    Reflect::set(&video, &"height".into(), &bounds_object(c.height)?)?;

    let constraints = MediaStreamConstraints::new();
    constraints.set_video(&video);
    constraints.set_audio(&JsValue::from_bool(c.audio));
    Ok(constraints)
}

fn bounds_object(bounds: DimensionBounds) -> Result<Object, JsValue> {
    let object = Object::new();
    Reflect::set(&object, &"ideal".into(), &bounds.ideal.into())?;
    Reflect::set(&object, &"max".into(), &bounds.max.into())?;
    Ok(object)
}
