mod config;
mod error;
mod flow;
mod food;
mod game;
mod input;
mod session;
mod snake;
mod term;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

pub type TermInt = u16;
/// Board position in board units, see `config::SIZE`.
pub type Coords = (i32, i32);

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut game = game::SnakeGame::new().context("could not set up the terminal")?;
    let res = game.run();

    // The terminal goes back to normal before any error gets printed
    let restored = game.restore();
    res.context("game loop failed")?;
    restored.context("could not restore the terminal")?;

    Ok(())
}

/// Logs go to stderr, which keeps stdout for the game screen. Nothing is
/// logged unless `RUST_LOG` asks for it.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
