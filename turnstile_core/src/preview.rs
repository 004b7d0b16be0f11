// Copyright 2026 the Turnstile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Preview fitting.
//!
//! The live preview always fills its container ("cover"), cropping whichever
//! video axis overflows. [`cover_fit`] computes the scale and the region of
//! the source frame that stays visible.

use kurbo::{Rect, Size};

/// Natural video size and on-screen container size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewGeometry {
    /// Intrinsic size of the video frames.
    pub video: Size,
    /// Client size of the preview element.
    pub container: Size,
}

/// How the video is mapped into its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewFit {
    /// Uniform scale from video pixels to container pixels.
    pub scale: f64,
    /// Region of the video frame, in video pixels, that remains visible.
    pub visible: Rect,
}

impl PreviewFit {
    /// Returns `true` if the left and right edges of the video are cropped.
    #[must_use]
    pub fn crops_width(&self, video: Size) -> bool {
        self.visible.width() < video.width
    }

    /// Returns `true` if the top and bottom edges of the video are cropped.
    #[must_use]
    pub fn crops_height(&self, video: Size) -> bool {
        self.visible.height() < video.height
    }
}

/// Computes a centered cover fit.
///
/// Returns `None` when either size is empty or not finite, which is the case
/// before the video has reported its metadata.
#[must_use]
pub fn cover_fit(geometry: PreviewGeometry) -> Option<PreviewFit> {
    let PreviewGeometry { video, container } = geometry;
    if !usable(video) || !usable(container) {
        return None;
    }
    let scale = (container.width / video.width).max(container.height / video.height);
    let visible_w = container.width / scale;
    let visible_h = container.height / scale;
    let x0 = (video.width - visible_w) / 2.0;
    let y0 = (video.height - visible_h) / 2.0;
    Some(PreviewFit {
        scale,
        visible: Rect::new(x0, y0, x0 + visible_w, y0 + visible_h),
    })
}

fn usable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn landscape_video_in_portrait_container_crops_sides() {
        let video = Size::new(1280.0, 720.0);
        let fit = cover_fit(PreviewGeometry {
            video,
            container: Size::new(360.0, 640.0),
        })
        .unwrap();
        assert!(approx(fit.scale, 640.0 / 720.0));
        assert!(fit.crops_width(video));
        assert!(!fit.crops_height(video));
        assert!(approx(fit.visible.height(), 720.0));
        // Centered crop.
        assert!(approx(fit.visible.x0, 1280.0 - fit.visible.x1));
    }

    #[test]
    fn matching_aspect_is_not_cropped() {
        let video = Size::new(1280.0, 720.0);
        let fit = cover_fit(PreviewGeometry {
            video,
            container: Size::new(640.0, 360.0),
        })
        .unwrap();
        assert!(approx(fit.scale, 0.5));
        assert!(!fit.crops_width(video));
        assert!(!fit.crops_height(video));
    }

    #[test]
    fn missing_metadata_has_no_fit() {
        let geometry = PreviewGeometry {
            video: Size::ZERO,
            container: Size::new(640.0, 360.0),
        };
        assert_eq!(cover_fit(geometry), None);
    }
}
