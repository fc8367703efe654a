use std::io;

use thiserror::Error;

use crate::TermInt;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal is {width}x{height}, the board needs at least {min_width}x{min_height}")]
    TerminalTooSmall {
        width: TermInt,
        height: TermInt,
        min_width: TermInt,
        min_height: TermInt,
    },

    #[error("writing to the terminal failed")]
    Io(#[source] io::Error),

    #[error("terminal backend failed")]
    Terminal(#[from] crossterm::ErrorKind),
}

pub type GameResult<T = ()> = Result<T, GameError>;
