use ahash::AHashSet;
use itertools::iproduct;

use crate::grid::{CellState, GridPos, GridStateStore};

/// One click the dispatcher should perform.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Left-click: the cell is provably safe.
    Reveal(GridPos),
    /// Right-click: the cell is provably a mine.
    Flag(GridPos),
}

/// Applies the two neighbor-counting rules to every numbered cell.
///
/// A pass is a single row-major sweep, not a fixed-point iteration: cells
/// that only become deducible through this pass's own actions wait for the
/// next scan. Neighbor counts do read the live grid though, so a flag placed
/// early in a pass is visible to numbered cells visited later in the same
/// one, which lets chains of deductions land in fewer scans.
pub struct DeductionEngine {
    /// Numbered cells whose whole neighborhood held no `Unknown` when last
    /// visited. Nothing further can be learned from them, so later passes
    /// skip them outright.
    settled: AHashSet<GridPos>,
}

impl DeductionEngine {
    pub fn new() -> Self {
        Self {
            settled: AHashSet::new(),
        }
    }

    /// Runs one pass over the current board, mutating deduced cells in place
    /// and returning the clicks to perform, in the order they were decided.
    ///
    /// For a cell showing `n`:
    /// - if `n` neighbors are already flagged, every remaining `Unknown`
    ///   neighbor is safe: it becomes `SafeUnknown` and gets a reveal;
    /// - else if the `Unknown` and `Flag` neighbors together number exactly
    ///   `n`, every `Unknown` neighbor is a mine: it becomes `Flag`, is
    ///   marked terminal, and gets a flag click.
    ///
    /// The in-place mutation doubles as double-action protection: an acted-on
    /// cell is no longer `Unknown`, so no later cell in the pass can claim it
    /// again.
    pub fn run_pass(&mut self, store: &mut GridStateStore) -> Vec<Action> {
        let mut actions = Vec::new();
        let (rows, cols) = (store.grid().rows(), store.grid().cols());

        for (y, x) in iproduct!(0..rows, 0..cols) {
            let pos = GridPos::new(x, y);
            let Some(CellState::Number(n)) = store.get(pos) else {
                continue;
            };
            if self.settled.contains(&pos) {
                continue;
            }

            let neighbors: Vec<(GridPos, CellState)> = store
                .grid()
                .neighbors(pos)
                .filter_map(|p| store.get(p).map(|state| (p, state)))
                .collect();

            if neighbors
                .iter()
                .all(|&(_, state)| state != CellState::Unknown)
            {
                log::debug!("skip (complete) {pos}");
                self.settled.insert(pos);
                continue;
            }

            let flagged = count(&neighbors, CellState::Flag);
            if flagged == n {
                for &(neighbor, state) in &neighbors {
                    if state != CellState::Unknown {
                        continue;
                    }
                    log::debug!("safe {neighbor} from {pos}={n}");
                    store.set(neighbor, CellState::SafeUnknown);
                    actions.push(Action::Reveal(neighbor));
                }
                continue;
            }

            let unknown = count(&neighbors, CellState::Unknown);
            if unknown + flagged == n {
                for &(neighbor, state) in &neighbors {
                    if state != CellState::Unknown {
                        continue;
                    }
                    log::debug!("mine {neighbor} from {pos}={n}");
                    store.set(neighbor, CellState::Flag);
                    store.mark_terminal(neighbor);
                    actions.push(Action::Flag(neighbor));
                }
            }
        }
        actions
    }
}

impl Default for DeductionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn count(neighbors: &[(GridPos, CellState)], wanted: CellState) -> u8 {
    neighbors
        .iter()
        .filter(|&&(_, state)| state == wanted)
        .count() as u8
}
