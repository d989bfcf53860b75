use enigo::{Enigo, MouseButton, MouseControllable};

use crate::config::{Config, ScreenPos};
use crate::deduce::Action;
use crate::grid::GridPos;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickButton {
    Left,
    Right,
}

/// Mouse backend, split out so tests can record clicks instead of
/// injecting them into the desktop.
pub trait MouseDriver {
    fn move_to(&mut self, pos: ScreenPos);
    fn click(&mut self, button: ClickButton);
}

/// The real driver.
pub struct EnigoDriver(Enigo);

impl EnigoDriver {
    pub fn new() -> Self {
        Self(Enigo::new())
    }
}

impl Default for EnigoDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MouseDriver for EnigoDriver {
    fn move_to(&mut self, pos: ScreenPos) {
        self.0.mouse_move_to(pos.x, pos.y);
    }

    fn click(&mut self, button: ClickButton) {
        self.0.mouse_click(match button {
            ClickButton::Left => MouseButton::Left,
            ClickButton::Right => MouseButton::Right,
        });
    }
}

/// Turns deduced actions into clicks at the cell's screen anchor. In dry-run
/// mode the position is still computed and logged but nothing is clicked.
pub struct ActionDispatcher<M> {
    config: Config,
    driver: M,
}

impl<M: MouseDriver> ActionDispatcher<M> {
    pub fn new(config: Config, driver: M) -> Self {
        Self { config, driver }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Reveal(pos) => self.reveal(pos),
            Action::Flag(pos) => self.flag(pos),
        }
    }

    /// Left-click the cell.
    pub fn reveal(&mut self, pos: GridPos) {
        self.click_cell(pos, ClickButton::Left, "reveal");
    }

    /// Right-click the cell.
    pub fn flag(&mut self, pos: GridPos) {
        self.click_cell(pos, ClickButton::Right, "flag");
    }

    fn click_cell(&mut self, pos: GridPos, button: ClickButton, verb: &str) {
        let target = self.config.cell_anchor(pos);
        log::debug!("{verb} {pos} at screen {target}");
        if self.config.dry_run {
            return;
        }
        self.driver.move_to(target);
        self.driver.click(button);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        moves: Rc<RefCell<Vec<ScreenPos>>>,
        clicks: Rc<RefCell<Vec<ClickButton>>>,
    }

    impl MouseDriver for Recorder {
        fn move_to(&mut self, pos: ScreenPos) {
            self.moves.borrow_mut().push(pos);
        }

        fn click(&mut self, button: ClickButton) {
            self.clicks.borrow_mut().push(button);
        }
    }

    fn recorder() -> (Recorder, Rc<RefCell<Vec<ScreenPos>>>, Rc<RefCell<Vec<ClickButton>>>) {
        let rec = Recorder::default();
        (
            Recorder {
                moves: Rc::clone(&rec.moves),
                clicks: Rc::clone(&rec.clicks),
            },
            rec.moves,
            rec.clicks,
        )
    }

    #[test]
    fn reveal_moves_to_anchor_then_left_clicks() {
        let config = Config::default();
        let (driver, moves, clicks) = recorder();
        let mut dispatcher = ActionDispatcher::new(config, driver);

        dispatcher.dispatch(Action::Reveal(GridPos::new(2, 1)));

        assert_eq!(*moves.borrow(), vec![config.cell_anchor(GridPos::new(2, 1))]);
        assert_eq!(*clicks.borrow(), vec![ClickButton::Left]);
    }

    #[test]
    fn flag_right_clicks() {
        let config = Config::default();
        let (driver, _, clicks) = recorder();
        let mut dispatcher = ActionDispatcher::new(config, driver);

        dispatcher.dispatch(Action::Flag(GridPos::new(0, 0)));

        assert_eq!(*clicks.borrow(), vec![ClickButton::Right]);
    }

    #[test]
    fn dry_run_suppresses_all_mouse_traffic() {
        let config = Config {
            dry_run: true,
            ..Config::default()
        };
        let (driver, moves, clicks) = recorder();
        let mut dispatcher = ActionDispatcher::new(config, driver);

        dispatcher.reveal(GridPos::new(3, 3));
        dispatcher.flag(GridPos::new(4, 4));

        assert!(moves.borrow().is_empty());
        assert!(clicks.borrow().is_empty());
    }
}
