use captrs::{Bgr8, Capturer};
use image::RgbImage;

use crate::error::CaptureError;

/// Grab attempts before a run of unusable frames becomes fatal.
const MAX_GRAB_ATTEMPTS: u32 = 100;

/// Anything that can produce the next frame to scan. The controller only
/// depends on this, so tests feed it painted images.
pub trait FrameProvider {
    fn next_frame(&mut self) -> Result<RgbImage, CaptureError>;
}

/// captrs-backed capture of one monitor.
pub struct FrameSource {
    capturer: Capturer,
}

impl FrameSource {
    /// Opens the monitor with the given zero-based id.
    pub fn new(monitor: usize) -> Result<Self, CaptureError> {
        let capturer = Capturer::new(monitor).map_err(|e| CaptureError::Open {
            monitor,
            reason: format!("{e:?}"),
        })?;
        Ok(Self { capturer })
    }
}

impl FrameProvider for FrameSource {
    /// Grabs one frame and repacks it from BGRA to RGB, dropping alpha.
    /// All-black frames are failed grabs on some backends and get re-grabbed,
    /// as do transient capture errors.
    fn next_frame(&mut self) -> Result<RgbImage, CaptureError> {
        let (width, height) = self.capturer.geometry();
        for _ in 0..MAX_GRAB_ATTEMPTS {
            let pixels = match self.capturer.capture_frame() {
                Ok(pixels) => pixels,
                Err(_) => continue,
            };

            let mut rgb = Vec::with_capacity(pixels.len() * 3);
            for Bgr8 { r, g, b, .. } in pixels {
                rgb.extend_from_slice(&[r, g, b]);
            }

            if !rgb.iter().any(|&channel| channel != 0) {
                continue;
            }

            return RgbImage::from_raw(width, height, rgb)
                .ok_or(CaptureError::BadGeometry { width, height });
        }
        Err(CaptureError::NoFrame {
            attempts: MAX_GRAB_ATTEMPTS,
        })
    }
}
