// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred work requested by the controller.
//!
//! The controller never blocks. Whenever the kiosk has to wait (for the
//! camera, for the simulated scan, for a message to expire) it queues an
//! [`Effect`]. The host drains effects with
//! [`ScannerController::poll_effect`], performs them asynchronously, and
//! reports completion through [`ScannerController::wake`],
//! [`ScannerController::camera_opened`], or
//! [`ScannerController::camera_failed`].
//!
//! [`ScannerController::poll_effect`]: crate::controller::ScannerController::poll_effect
//! [`ScannerController::wake`]: crate::controller::ScannerController::wake
//! [`ScannerController::camera_opened`]: crate::controller::ScannerController::camera_opened
//! [`ScannerController::camera_failed`]: crate::controller::ScannerController::camera_failed

use core::time::Duration;

use crate::camera::CaptureConstraints;
use crate::message::MessageId;
use crate::outcome::ScanId;

/// Timer completions the controller understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Wake {
    /// The simulated processing time of a scan has elapsed.
    ScanComplete(ScanId),
    /// A result message reached its display timeout.
    HideMessage(MessageId),
    /// The viewport settled after an orientation or size change.
    RefitPreview,
}

/// Work the host performs on the controller's behalf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Call [`wake`](crate::controller::ScannerController::wake) with
    /// `wake` once `after` has elapsed.
    Schedule {
        /// Delay before waking.
        after: Duration,
        /// Completion to deliver.
        wake: Wake,
    },
    /// Ask the capture device for a stream and report the result.
    RequestCamera(CaptureConstraints),
}
