// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capture device model.
//!
//! The controller never talks to a camera directly. It asks the host for a
//! stream by emitting [`Effect::RequestCamera`] with a set of
//! [`CaptureConstraints`], and the host answers with either a stream
//! implementing [`MediaStream`] or a [`CameraError`].
//!
//! [`Effect::RequestCamera`]: crate::effect::Effect::RequestCamera

use alloc::string::String;
use core::fmt;

/// Lifecycle of the capture device as seen by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CameraState {
    /// No stream held.
    #[default]
    Idle,
    /// A stream request is pending with the host.
    Requesting,
    /// A stream is held and bound to the preview.
    Active,
}

/// Which camera the kiosk prefers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FacingMode {
    /// Front camera, facing the user.
    User,
    /// Back camera, facing away from the user.
    Environment,
}

impl FacingMode {
    /// Returns the `facingMode` constraint value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Environment => "environment",
        }
    }
}

/// Preferred and maximum size along one video dimension, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DimensionBounds {
    /// Size the device should aim for.
    pub ideal: u32,
    /// Hard upper bound.
    pub max: u32,
}

/// What the kiosk asks the capture device for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CaptureConstraints {
    /// Preferred camera.
    pub facing: FacingMode,
    /// Width bounds.
    pub width: DimensionBounds,
    /// Height bounds.
    pub height: DimensionBounds,
    /// Whether an audio track is requested.
    pub audio: bool,
}

impl CaptureConstraints {
    /// Back camera, 720p preferred, capped at 1080p, video only.
    #[must_use]
    pub const fn kiosk() -> Self {
        Self {
            facing: FacingMode::Environment,
            width: DimensionBounds {
                ideal: 1280,
                max: 1920,
            },
            height: DimensionBounds {
                ideal: 720,
                max: 1080,
            },
            audio: false,
        }
    }
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self::kiosk()
    }
}

/// Why a capture device could not be opened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CameraError {
    /// The user or the platform refused camera permission.
    PermissionDenied,
    /// No matching capture device exists.
    NotFound,
    /// A device exists but cannot satisfy the constraints.
    ConstraintsRejected,
    /// The device is held by another process or failed to start.
    InUse,
    /// The platform has no capture API (or it is blocked in this context).
    Unsupported,
    /// Any other failure, with the platform's description.
    Other(String),
}

impl CameraError {
    /// Maps a `DOMException` name from `getUserMedia` to an error.
    ///
    /// Legacy Chrome names are accepted alongside the standard ones.
    #[must_use]
    pub fn from_exception_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" | "SecurityError" => {
                Self::PermissionDenied
            }
            "NotFoundError" | "DevicesNotFoundError" => Self::NotFound,
            "OverconstrainedError" | "ConstraintNotSatisfiedError" => Self::ConstraintsRejected,
            "NotReadableError" | "TrackStartError" | "AbortError" => Self::InUse,
            "NotSupportedError" => Self::Unsupported,
            _ => Self::Other(alloc::format!("{name}: {message}")),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => f.write_str("camera permission denied"),
            Self::NotFound => f.write_str("no camera found"),
            Self::ConstraintsRejected => f.write_str("camera cannot satisfy the constraints"),
            Self::InUse => f.write_str("camera is in use or failed to start"),
            Self::Unsupported => f.write_str("camera capture is not supported"),
            Self::Other(msg) => write!(f, "camera error: {msg}"),
        }
    }
}

impl core::error::Error for CameraError {}

/// A live capture stream handed to the controller by the host.
///
/// The controller owns the stream exclusively while the camera is active
/// and releases it through [`stop_tracks`](Self::stop_tracks).
pub trait MediaStream {
    /// Stops every track in the stream and returns how many were stopped.
    fn stop_tracks(&mut self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kiosk_constraints_prefer_back_camera() {
        let c = CaptureConstraints::kiosk();
        assert_eq!(c.facing.as_str(), "environment");
        assert_eq!(c.width, DimensionBounds { ideal: 1280, max: 1920 });
        assert_eq!(c.height, DimensionBounds { ideal: 720, max: 1080 });
        assert!(!c.audio);
    }

    #[test]
    fn exception_names_map_to_errors() {
        assert_eq!(
            CameraError::from_exception_name("NotAllowedError", ""),
            CameraError::PermissionDenied
        );
        assert_eq!(
            CameraError::from_exception_name("NotFoundError", ""),
            CameraError::NotFound
        );
        assert_eq!(
            CameraError::from_exception_name("OverconstrainedError", "width"),
            CameraError::ConstraintsRejected
        );
        assert_eq!(
            CameraError::from_exception_name("NotReadableError", ""),
            CameraError::InUse
        );
        assert_eq!(
            CameraError::from_exception_name("WeirdError", "boom"),
            CameraError::Other("WeirdError: boom".into())
        );
    }
}
