use crate::color::Color;
use crate::config::Theme;
use crate::grid::CellState;

/// Classifies one cell from its two probe samples: `face` is the color at
/// the cell's anchor, `mark` the color at the inner offset where flags and
/// digits render.
///
/// Total over all inputs; anything the theme does not recognize comes back
/// as [`CellState::Error`].
pub fn classify(theme: &Theme, face: Color, mark: Color) -> CellState {
    if face == theme.unknown {
        return if mark == theme.flag {
            CellState::Flag
        } else {
            CellState::Unknown
        };
    }
    if let Some(i) = theme.numbers.iter().position(|&digit| digit == mark) {
        return CellState::Number(i as u8 + 1);
    }
    if mark == theme.empty {
        return CellState::Empty;
    }
    CellState::Error
}
