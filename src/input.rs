use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    /// Enter: start from the menu or play again after a game.
    Start,
    Quit,
    Ignore,
}

pub fn command_for(key: &KeyEvent) -> Command {
    if is_ctrl_c(key) {
        return Command::Quit;
    }

    match key.code {
        KeyCode::Up => Command::Steer(Direction::Up),
        KeyCode::Down => Command::Steer(Direction::Down),
        KeyCode::Left => Command::Steer(Direction::Left),
        KeyCode::Right => Command::Steer(Direction::Right),
        KeyCode::Enter => Command::Start,
        KeyCode::Esc => Command::Quit,
        _ => Command::Ignore,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
