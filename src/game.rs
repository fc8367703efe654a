use std::thread::sleep;
use std::time::{Duration, Instant};

use tracing::info;

use crate::Coords;
use crate::config::{COLLISION_PAUSE, TICK_INTERVAL};
use crate::error::GameResult;
use crate::flow::{Flow, Phase, Transition};
use crate::input::command_for;
use crate::session::{GameSession, Status};
use crate::term::TermManager;

const SNAKE_BODY_CHAR: char = '█';
const DEAD_SNAKE_CHAR: char = 'X';
const FOOD_GLYPH: [char; 2] = ['(', ')'];

const MENU_LINES: &[&str] = &[
    "SNAKE GAME",
    "",
    "Use arrow keys to move up, down, left or right",
    "Don't hit the border or yourself or you die!",
    "Every 3 seconds you survive is +1 point",
    "Every food eaten is +3 points",
    "",
    "Press Enter to play. Press Escape to quit.",
];

/// Measures the real time between ticks, which is the sleep plus polling
/// and drawing.
struct TickClock {
    last: Instant,
}

impl TickClock {
    fn start() -> Self {
        TickClock { last: Instant::now() }
    }

    /// Time since the previous lap, or since `start`.
    fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt
    }
}

/// Owns the terminal and draws whatever screen the `Flow` is on.
pub struct SnakeGame {
    term: TermManager,
}

impl SnakeGame {
    pub fn new() -> GameResult<Self> {
        let mut term = TermManager::new()?;
        term.setup()?;
        Ok(SnakeGame { term })
    }

    pub fn restore(&mut self) -> GameResult {
        self.term.restore()
    }

    pub fn run(&mut self) -> GameResult {
        let mut flow = Flow::new(GameSession::new);
        let mut clock = TickClock::start();

        self.term.clear()?;
        self.term.show_message(MENU_LINES)?;

        loop {
            let transition = if flow.phase() == Phase::Playing {
                self.play_tick(&mut flow, &mut clock)?
            } else {
                flow.handle(command_for(&self.term.read_key_blocking()?))
            };

            match transition {
                Transition::Quit => {
                    let score = flow.session().map(|s| s.score());
                    info!(phase = ?flow.phase(), ?score, "quit");
                    return Ok(());
                }
                Transition::StartGame => {
                    info!("game started");
                    if let Some(session) = flow.session() {
                        self.term.clear()?;
                        self.term.draw_board()?;
                        self.draw(session, &[], None)?;
                    }
                    clock = TickClock::start();
                }
                Transition::Steer(_) | Transition::Stay => {}
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    /// Sleeps, applies the keys pressed meanwhile, then runs one tick and
    /// redraws. Shows the end screen if the game ended on this tick.
    fn play_tick(&mut self, flow: &mut Flow, clock: &mut TickClock) -> GameResult<Transition> {
        sleep(TICK_INTERVAL);

        for key_ev in self.term.read_key_events_queue()? {
            if let Transition::Quit = flow.handle(command_for(&key_ev)) {
                return Ok(Transition::Quit);
            }
        }

        let (old_body, old_food) = match flow.session() {
            Some(session) => (session.snake().body().to_vec(), session.food().position()),
            None => return Ok(Transition::Stay),
        };
        let report = match flow.tick(clock.lap()) {
            Some(report) => report,
            None => return Ok(Transition::Stay),
        };

        if let Some(session) = flow.session() {
            self.draw(session, &old_body, Some(old_food))?;
        }
        if report.ate_food {
            self.term.bell()?;
        }

        match report.status {
            Status::Playing => {}
            Status::GameOver(_) => {
                self.term.bell()?;
                sleep(COLLISION_PAUSE);
                self.show_end_screen(flow)?;
            }
            Status::Won => self.show_end_screen(flow)?,
        }

        Ok(Transition::Stay)
    }

    fn show_end_screen(&mut self, flow: &Flow) -> GameResult {
        let score = flow.session().map_or(0, |s| s.score());
        let headline = match flow.phase() {
            Phase::Won => format!("You won! Score is {}", score),
            _ => format!("You died! Score is {}", score),
        };

        self.term.show_message(&[
            headline.as_str(),
            "",
            "Press Enter to play again.",
            "Press Escape to quit.",
        ])
    }

    /// Clears last tick's snake and food, then draws the current ones.
    fn draw(
        &mut self,
        session: &GameSession,
        old_body: &[Coords],
        old_food: Option<Coords>,
    ) -> GameResult {
        for pos in old_body.iter().chain(old_food.iter()) {
            self.term.clear_cell(*pos)?;
        }

        self.term.print_cell(session.food().position(), FOOD_GLYPH)?;

        let snake = session.snake();
        let body_char = match session.status() {
            Status::GameOver(_) => DEAD_SNAKE_CHAR,
            _ => SNAKE_BODY_CHAR,
        };
        // Tail first so the head stays visible when segments overlap
        for pos in snake.body()[1..].iter().rev() {
            self.term.print_cell(*pos, [body_char, body_char])?;
        }
        self.term.print_cell(snake.head(), [snake.head_char(), snake.head_char()])?;

        self.term.print_status(&format!("Score: {}", session.score()))?;
        self.term.flush()
    }
}
