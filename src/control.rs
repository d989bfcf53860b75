use std::fmt;

use rand::Rng;

use crate::capture::FrameProvider;
use crate::config::{Config, Theme};
use crate::deduce::DeductionEngine;
use crate::dispatch::{ActionDispatcher, MouseDriver};
use crate::error::CaptureError;
use crate::grid::{GridPos, GridStateStore};
use crate::scan::{BoardScanner, ScanResult};

/// Why the run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    Won,
    Lost,
    IterationLimit { iterations: u32, limit: u32 },
    /// A scan could not produce a board (probe outside the frame).
    InvalidScan,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => f.write_str("Game won"),
            Self::Lost => f.write_str("Game lost"),
            Self::IterationLimit { iterations, limit } => write!(
                f,
                "Shut down for exceeding the iteration limit ({iterations}, limit: {limit})"
            ),
            Self::InvalidScan => f.write_str("Scan did not produce a board"),
        }
    }
}

/// The top-level loop: optional random opening reveal, then repeated
/// scan / deduce / act until a marker, a bad scan, or the iteration cap.
pub struct Controller<F, M> {
    config: Config,
    theme: Theme,
    frames: F,
    dispatcher: ActionDispatcher<M>,
    store: GridStateStore,
    engine: DeductionEngine,
}

impl<F: FrameProvider, M: MouseDriver> Controller<F, M> {
    pub fn new(config: Config, theme: Theme, frames: F, driver: M) -> Self {
        Self {
            config,
            theme,
            frames,
            dispatcher: ActionDispatcher::new(config, driver),
            store: GridStateStore::new(config.cols, config.rows),
            engine: DeductionEngine::new(),
        }
    }

    /// Plays until a terminal condition. Only capture failure is an error;
    /// every game outcome comes back as a [`Termination`].
    pub fn run(&mut self) -> Result<Termination, CaptureError> {
        if self.config.opening_move {
            let mut rng = rand::thread_rng();
            let pos = GridPos::new(
                rng.gen_range(0..self.config.cols),
                rng.gen_range(0..self.config.rows),
            );
            log::info!("opening reveal at {pos}");
            self.dispatcher.reveal(pos);
        }

        let scanner = BoardScanner::new(&self.config, &self.theme);
        let mut iteration: u32 = 0;
        loop {
            if iteration > self.config.max_iterations {
                return Ok(Termination::IterationLimit {
                    iterations: iteration,
                    limit: self.config.max_iterations,
                });
            }
            log::debug!("iteration {iteration}");

            let frame = self.frames.next_frame()?;
            match scanner.scan(&frame, &mut self.store) {
                Ok(ScanResult::GameOver) => return Ok(Termination::Lost),
                Ok(ScanResult::GameWon) => return Ok(Termination::Won),
                Ok(ScanResult::Board) => {}
                Err(err) => {
                    log::warn!("{err}");
                    return Ok(Termination::InvalidScan);
                }
            }
            log::debug!("board:\n{}", self.store.grid());

            for action in self.engine.run_pass(&mut self.store) {
                self.dispatcher.dispatch(action);
            }
            iteration += 1;
        }
    }
}
