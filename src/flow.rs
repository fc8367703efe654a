//! Screen flow: menu, a running game, and the end screen after it. Keys are
//! turned into `Command`s before they get here, so nothing in this module
//! touches the terminal.

use std::mem;
use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::input::Command;
use crate::session::{GameSession, Status, TickReport};
use crate::snake::Direction;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    GameOver,
    Won,
}

/// What a command does in a given phase.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Steer(Direction),
    /// Leave the menu or end screen for a brand new game.
    StartGame,
    Quit,
}

pub fn transition(phase: Phase, command: Command) -> Transition {
    match (phase, command) {
        (_, Command::Quit) => Transition::Quit,
        (Phase::Playing, Command::Steer(heading)) => Transition::Steer(heading),
        (phase, Command::Start) if phase != Phase::Playing => Transition::StartGame,
        _ => Transition::Stay,
    }
}

enum Screen<R: Rng> {
    Menu,
    Playing(GameSession<R>),
    Ended(GameSession<R>),
}

/// Holds the current screen and whatever game belongs to it. Starting a game
/// always builds a fresh session, nothing carries over from the last one.
pub struct Flow<R: Rng = ThreadRng> {
    screen: Screen<R>,
    new_session: fn() -> GameSession<R>,
}

impl<R: Rng> Flow<R> {
    pub fn new(new_session: fn() -> GameSession<R>) -> Self {
        Flow { screen: Screen::Menu, new_session }
    }

    pub fn phase(&self) -> Phase {
        match &self.screen {
            Screen::Menu => Phase::Menu,
            Screen::Playing(_) => Phase::Playing,
            Screen::Ended(session) if session.status() == Status::Won => Phase::Won,
            Screen::Ended(_) => Phase::GameOver,
        }
    }

    /// The running or just finished game, if any.
    pub fn session(&self) -> Option<&GameSession<R>> {
        match &self.screen {
            Screen::Menu => None,
            Screen::Playing(session) | Screen::Ended(session) => Some(session),
        }
    }

    /// Applies `command` and reports what it did. `Quit` leaves every bit of
    /// state as it was; the caller is expected to stop.
    pub fn handle(&mut self, command: Command) -> Transition {
        let result = transition(self.phase(), command);

        match result {
            Transition::StartGame => self.screen = Screen::Playing((self.new_session)()),
            Transition::Steer(heading) => {
                if let Screen::Playing(session) = &mut self.screen {
                    session.steer(heading);
                }
            }
            Transition::Stay | Transition::Quit => {}
        }

        result
    }

    /// Advances the running game by one tick, moving to the end screen when
    /// the game is over. Does nothing outside a game.
    pub fn tick(&mut self, dt: Duration) -> Option<TickReport> {
        let report = match &mut self.screen {
            Screen::Playing(session) => session.tick(dt),
            _ => return None,
        };

        if report.status != Status::Playing {
            if let Screen::Playing(session) = mem::replace(&mut self.screen, Screen::Menu) {
                self.screen = Screen::Ended(session);
            }
        }

        Some(report)
    }
}
