use std::fmt;

use crate::color::Color;
use crate::grid::GridPos;

/// An absolute pixel position on the captured frame. Distinct from
/// [`GridPos`]: the two never mix without going through [`Config::cell_anchor`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScreenPos {
    pub x: i32,
    pub y: i32,
}

impl ScreenPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for ScreenPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Board geometry and run parameters, fixed at startup.
#[derive(Copy, Clone, Debug)]
pub struct Config {
    pub rows: usize,
    pub cols: usize,
    /// Top-left pixel of the top-left cell.
    pub grid_origin: ScreenPos,
    /// On-screen pixel size of one cell, x then y.
    pub cell_size: (i32, i32),
    /// Offset from a cell's anchor to the pixel where numbers and flags render.
    pub value_offset: (i32, i32),
    /// Pixel that turns [`Theme::game_over`]-colored when the game is lost.
    pub game_over_marker: ScreenPos,
    /// Pixel that turns [`Theme::game_won`]-colored when the game is won.
    pub game_won_marker: ScreenPos,
    /// Scan/deduce/act cycles allowed before the run shuts itself off.
    pub max_iterations: u32,
    /// Zero-based monitor id handed to the capturer.
    pub monitor: usize,
    /// Compute decisions and positions but never click.
    pub dry_run: bool,
    /// Reveal one uniformly random cell before the first scan.
    pub opening_move: bool,
}

impl Config {
    /// Screen anchor of a cell, the point both probes are measured from.
    pub fn cell_anchor(&self, pos: GridPos) -> ScreenPos {
        self.grid_origin.offset(
            self.cell_size.0 * pos.x as i32 + 1,
            self.cell_size.1 * pos.y as i32 + 1,
        )
    }

    /// Where the cell's number or flag glyph renders, relative to `anchor`.
    pub fn value_probe(&self, anchor: ScreenPos) -> ScreenPos {
        anchor.offset(self.value_offset.0, self.value_offset.1)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 16,
            grid_origin: ScreenPos::new(261, 248),
            cell_size: (32, 32),
            value_offset: (18, 22),
            game_over_marker: ScreenPos::new(508, 204),
            game_won_marker: ScreenPos::new(516, 190),
            max_iterations: 500,
            monitor: 0,
            dry_run: false,
            opening_move: false,
        }
    }
}

/// The color scheme of the rendered board. Plain data so a different visual
/// theme is just a different value; defaults match the classic scheme.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    /// Face color of a cell that has not been clicked yet.
    pub unknown: Color,
    /// Probe color of a revealed cell with zero adjacent mines.
    pub empty: Color,
    /// Probe color of a flag glyph.
    pub flag: Color,
    pub game_over: Color,
    pub game_won: Color,
    /// Probe colors for the digits 1 through 8, in order.
    pub numbers: [Color; 8],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            unknown: Color::from_rgb(0xffffff),
            empty: Color::from_rgb(0xbdbdbd),
            flag: Color::from_rgb(0x000000),
            game_over: Color::from_rgb(0x000000),
            game_won: Color::from_rgb(0x000000),
            numbers: [
                Color::from_rgb(0x0000ff), // 1 blue
                Color::from_rgb(0x007b00), // 2 green
                Color::from_rgb(0xff0000), // 3 red
                Color::from_rgb(0x00007b), // 4 dark blue
                Color::from_rgb(0x7b0000), // 5 dark red
                Color::from_rgb(0x007b7b), // 6 cyan
                Color::from_rgb(0x000000), // 7 black
                Color::from_rgb(0x7b7b7b), // 8 gray
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_anchor_applies_affine_map() {
        let config = Config::default();
        assert_eq!(
            config.cell_anchor(GridPos::new(0, 0)),
            ScreenPos::new(262, 249)
        );
        assert_eq!(
            config.cell_anchor(GridPos::new(3, 2)),
            ScreenPos::new(261 + 96 + 1, 248 + 64 + 1)
        );
    }

    #[test]
    fn value_probe_offsets_from_anchor() {
        let config = Config::default();
        let anchor = config.cell_anchor(GridPos::new(1, 1));
        let probe = config.value_probe(anchor);
        assert_eq!(probe, anchor.offset(18, 22));
    }
}
