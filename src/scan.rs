use image::RgbImage;
use itertools::iproduct;

use crate::classify::classify;
use crate::color::Color;
use crate::config::{Config, ScreenPos, Theme};
use crate::error::ScanError;
use crate::grid::{GridPos, GridStateStore};

/// Read-only view of one captured frame.
pub trait PixelSource {
    /// Color at an absolute pixel position, `None` outside the frame.
    fn color_at(&self, pos: ScreenPos) -> Option<Color>;
}

impl PixelSource for RgbImage {
    fn color_at(&self, pos: ScreenPos) -> Option<Color> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let (x, y) = (pos.x as u32, pos.y as u32);
        let (width, height) = self.dimensions();
        (x < width && y < height).then(|| Color::from(*self.get_pixel(x, y)))
    }
}

/// Outcome of scanning one frame. The win/loss markers short-circuit the
/// cell sweep, so the three cases are mutually exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScanResult {
    /// Cell states were written into the store.
    Board,
    GameOver,
    GameWon,
}

/// Classifies a whole frame into the grid store, one cell at a time.
pub struct BoardScanner<'a> {
    config: &'a Config,
    theme: &'a Theme,
}

impl<'a> BoardScanner<'a> {
    pub fn new(config: &'a Config, theme: &'a Theme) -> Self {
        Self { config, theme }
    }

    /// One full board read. Checks the loss then win marker first; if either
    /// matches, no cell pixel is touched. Otherwise every coordinate not in
    /// the terminal set is probed, classified, and stored, and freshly
    /// terminal results are marked so later scans skip them.
    pub fn scan(
        &self,
        frame: &impl PixelSource,
        store: &mut GridStateStore,
    ) -> Result<ScanResult, ScanError> {
        if self.marker_matches(frame, self.config.game_over_marker, self.theme.game_over)? {
            return Ok(ScanResult::GameOver);
        }
        if self.marker_matches(frame, self.config.game_won_marker, self.theme.game_won)? {
            return Ok(ScanResult::GameWon);
        }

        for (y, x) in iproduct!(0..self.config.rows, 0..self.config.cols) {
            let pos = GridPos::new(x, y);
            if store.should_skip(pos) {
                continue;
            }

            let anchor = self.config.cell_anchor(pos);
            let face = frame
                .color_at(anchor)
                .ok_or(ScanError::ProbeOutOfFrame(anchor))?;
            let probe = self.config.value_probe(anchor);
            let mark = frame
                .color_at(probe)
                .ok_or(ScanError::ProbeOutOfFrame(probe))?;

            let state = classify(self.theme, face, mark);
            store.set(pos, state);
            if state.is_terminal() {
                store.mark_terminal(pos);
            }
        }
        Ok(ScanResult::Board)
    }

    fn marker_matches(
        &self,
        frame: &impl PixelSource,
        marker: ScreenPos,
        expected: Color,
    ) -> Result<bool, ScanError> {
        let sampled = frame
            .color_at(marker)
            .ok_or(ScanError::MarkerOutOfFrame(marker))?;
        Ok(sampled == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;
    use image::Rgb;

    // Small geometry so painted frames stay tiny. Marker colors are made
    // distinct from each other and from the cell palette.
    fn test_setup() -> (Config, Theme) {
        let config = Config {
            rows: 3,
            cols: 3,
            grid_origin: ScreenPos::new(8, 8),
            cell_size: (16, 16),
            value_offset: (4, 6),
            game_over_marker: ScreenPos::new(0, 0),
            game_won_marker: ScreenPos::new(1, 0),
            ..Config::default()
        };
        let theme = Theme {
            game_over: Color::from_rgb(0xff00ff),
            game_won: Color::from_rgb(0x00ffff),
            ..Theme::default()
        };
        (config, theme)
    }

    fn put(frame: &mut RgbImage, pos: ScreenPos, color: Color) {
        frame.put_pixel(pos.x as u32, pos.y as u32, Rgb::from(color));
    }

    /// A frame whose every cell reads as `Unknown`, markers unlit.
    fn blank_frame(config: &Config, theme: &Theme) -> RgbImage {
        let mut frame = RgbImage::new(64, 64);
        for (y, x) in iproduct!(0..config.rows, 0..config.cols) {
            paint_cell(&mut frame, config, theme, GridPos::new(x, y), CellState::Unknown);
        }
        frame
    }

    fn paint_cell(
        frame: &mut RgbImage,
        config: &Config,
        theme: &Theme,
        pos: GridPos,
        state: CellState,
    ) {
        let anchor = config.cell_anchor(pos);
        let probe = config.value_probe(anchor);
        let (face, mark) = match state {
            CellState::Unknown => (theme.unknown, theme.unknown),
            CellState::SafeUnknown => (theme.unknown, theme.unknown),
            CellState::Flag => (theme.unknown, theme.flag),
            CellState::Empty => (theme.empty, theme.empty),
            CellState::Number(n) => (theme.empty, theme.numbers[usize::from(n) - 1]),
            CellState::Error => (theme.empty, Color::from_rgb(0x123456)),
        };
        put(frame, anchor, face);
        put(frame, probe, mark);
    }

    #[test]
    fn scans_full_grid_of_mixed_states() {
        let (config, theme) = test_setup();
        let scanner = BoardScanner::new(&config, &theme);
        let mut store = GridStateStore::new(config.cols, config.rows);

        let mut frame = blank_frame(&config, &theme);
        paint_cell(&mut frame, &config, &theme, GridPos::new(1, 1), CellState::Number(3));
        paint_cell(&mut frame, &config, &theme, GridPos::new(0, 2), CellState::Flag);
        paint_cell(&mut frame, &config, &theme, GridPos::new(2, 0), CellState::Empty);
        paint_cell(&mut frame, &config, &theme, GridPos::new(2, 2), CellState::Error);

        let result = scanner.scan(&frame, &mut store).unwrap();
        assert_eq!(result, ScanResult::Board);
        assert_eq!(store.get(GridPos::new(1, 1)), Some(CellState::Number(3)));
        assert_eq!(store.get(GridPos::new(0, 2)), Some(CellState::Flag));
        assert_eq!(store.get(GridPos::new(2, 0)), Some(CellState::Empty));
        assert_eq!(store.get(GridPos::new(2, 2)), Some(CellState::Error));
        assert_eq!(store.get(GridPos::new(0, 0)), Some(CellState::Unknown));
    }

    #[test]
    fn terminal_results_get_marked_and_skipped_next_scan() {
        let (config, theme) = test_setup();
        let scanner = BoardScanner::new(&config, &theme);
        let mut store = GridStateStore::new(config.cols, config.rows);

        let mut frame = blank_frame(&config, &theme);
        paint_cell(&mut frame, &config, &theme, GridPos::new(1, 0), CellState::Empty);
        scanner.scan(&frame, &mut store).unwrap();
        assert!(store.should_skip(GridPos::new(1, 0)));

        // A noisy second frame claims the cell is now a digit; the skip set
        // must keep the first, terminal classification.
        let mut noisy = blank_frame(&config, &theme);
        paint_cell(&mut noisy, &config, &theme, GridPos::new(1, 0), CellState::Number(5));
        scanner.scan(&noisy, &mut store).unwrap();
        assert_eq!(store.get(GridPos::new(1, 0)), Some(CellState::Empty));
    }

    #[test]
    fn loss_marker_short_circuits_before_any_cell() {
        let (config, theme) = test_setup();
        let scanner = BoardScanner::new(&config, &theme);
        let mut store = GridStateStore::new(config.cols, config.rows);

        // Only markers are painted; cell anchors are all black, which would
        // classify as Error if the sweep ran.
        let mut frame = RgbImage::new(64, 64);
        put(&mut frame, config.game_over_marker, theme.game_over);

        let result = scanner.scan(&frame, &mut store).unwrap();
        assert_eq!(result, ScanResult::GameOver);
        assert_eq!(store.get(GridPos::new(0, 0)), Some(CellState::Unknown));
    }

    #[test]
    fn win_marker_reports_game_won() {
        let (config, theme) = test_setup();
        let scanner = BoardScanner::new(&config, &theme);
        let mut store = GridStateStore::new(config.cols, config.rows);

        let mut frame = RgbImage::new(64, 64);
        put(&mut frame, config.game_won_marker, theme.game_won);

        assert_eq!(scanner.scan(&frame, &mut store), Ok(ScanResult::GameWon));
    }

    #[test]
    fn marker_outside_frame_is_a_scan_error() {
        let (mut config, theme) = test_setup();
        config.game_over_marker = ScreenPos::new(500, 500);
        let scanner = BoardScanner::new(&config, &theme);
        let mut store = GridStateStore::new(config.cols, config.rows);

        let frame = RgbImage::new(64, 64);
        assert_eq!(
            scanner.scan(&frame, &mut store),
            Err(ScanError::MarkerOutOfFrame(ScreenPos::new(500, 500)))
        );
    }

    #[test]
    fn cell_probe_outside_frame_is_a_scan_error() {
        let (config, theme) = test_setup();
        let scanner = BoardScanner::new(&config, &theme);
        let mut store = GridStateStore::new(config.cols, config.rows);

        // Frame covers the markers but not the grid area.
        let frame = RgbImage::new(8, 8);
        assert!(matches!(
            scanner.scan(&frame, &mut store),
            Err(ScanError::ProbeOutOfFrame(_))
        ));
    }
}
