use std::fmt;

use ahash::AHashSet;

/// Classification of one cell of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CellState {
    /// Not yet revealed.
    Unknown,
    /// Deduced safe this pass; the real value shows up on the next scan.
    SafeUnknown,
    /// Revealed with zero adjacent mines.
    Empty,
    /// Marked as a mine.
    Flag,
    /// Unrecognized color sample. Inert: never counted, never acted on.
    Error,
    /// Revealed with `n` adjacent mines, `n` in 1..=8.
    Number(u8),
}

impl CellState {
    /// Terminal states never change again for the rest of the run.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Empty | Self::Flag)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("0"),
            Self::SafeUnknown => f.write_str("U"),
            Self::Empty => f.write_str("E"),
            Self::Flag => f.write_str("F"),
            Self::Error => f.write_str("?"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Cell coordinates: `x` is the column, `y` the row, both zero-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Fixed-size row-major board of cell states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![CellState::Unknown; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn index_of(&self, pos: GridPos) -> Option<usize> {
        (pos.x < self.cols && pos.y < self.rows).then(|| pos.y * self.cols + pos.x)
    }

    /// `None` outside the board; neighbor lookups probe past the edge
    /// routinely, so an out-of-bounds read is an absent cell, not a failure.
    pub fn get(&self, pos: GridPos) -> Option<CellState> {
        self.index_of(pos).map(|i| self.cells[i])
    }

    pub fn set(&mut self, pos: GridPos, state: CellState) {
        if let Some(i) = self.index_of(pos) {
            self.cells[i] = state;
        }
    }

    /// The up to 8 in-bounds cells adjacent to `pos`, including diagonals.
    pub fn neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let x = pos.x.checked_add_signed(dx)?;
            let y = pos.y.checked_add_signed(dy)?;
            let next = GridPos::new(x, y);
            self.index_of(next).map(|_| next)
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let state = self.cells[y * self.cols + x];
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{state}")?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// The board plus the set of coordinates known to be settled for good.
///
/// Terminal coordinates are append-only: once marked, the stored state can
/// no longer be written to, which is what lets the scanner skip their pixels
/// on every later frame without risking drift from a noisy sample.
pub struct GridStateStore {
    grid: Grid,
    terminal: AHashSet<usize>,
}

impl GridStateStore {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            grid: Grid::new(cols, rows),
            terminal: AHashSet::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn get(&self, pos: GridPos) -> Option<CellState> {
        self.grid.get(pos)
    }

    /// Writes are dropped for terminal coordinates.
    pub fn set(&mut self, pos: GridPos, state: CellState) {
        if self.should_skip(pos) {
            return;
        }
        self.grid.set(pos, state);
    }

    fn key(&self, pos: GridPos) -> usize {
        pos.y * self.grid.cols() + pos.x
    }

    /// The caller must already have stored the terminal state for `pos`.
    pub fn mark_terminal(&mut self, pos: GridPos) {
        let key = self.key(pos);
        self.terminal.insert(key);
    }

    pub fn should_skip(&self, pos: GridPos) -> bool {
        self.terminal.contains(&self.key(pos))
    }
}
