use thiserror::Error;

use crate::config::ScreenPos;

/// Frame acquisition failures. Fatal: the run stops, there is no retry
/// beyond the capturer's own re-grab of discarded frames.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("could not open capturer for monitor {monitor}: {reason}")]
    Open { monitor: usize, reason: String },
    #[error("no usable frame after {attempts} grab attempts")]
    NoFrame { attempts: u32 },
    #[error("captured buffer does not match reported geometry {width}x{height}")]
    BadGeometry { width: u32, height: u32 },
}

/// A probe position fell outside the captured frame. The controller treats
/// this as a terminal condition, not a crash: the board the configuration
/// describes is evidently not on this screen.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("marker pixel at {0} is outside the captured frame")]
    MarkerOutOfFrame(ScreenPos),
    #[error("cell probe at {0} is outside the captured frame")]
    ProbeOutOfFrame(ScreenPos),
}
