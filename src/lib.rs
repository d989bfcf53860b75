pub use capture::{FrameProvider, FrameSource};
pub use classify::classify;
pub use color::{Color, ParseColorError};
pub use config::{Config, ScreenPos, Theme};
pub use control::{Controller, Termination};
pub use deduce::{Action, DeductionEngine};
pub use dispatch::{ActionDispatcher, ClickButton, EnigoDriver, MouseDriver};
pub use error::{CaptureError, ScanError};
pub use grid::{CellState, Grid, GridPos, GridStateStore};
pub use scan::{BoardScanner, PixelSource, ScanResult};

mod capture;
mod classify;
mod color;
mod config;
mod control;
mod deduce;
mod dispatch;
mod error;
mod grid;
mod scan;
