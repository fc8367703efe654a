//! Rules of a single game: one `GameSession` lives from pressing Enter on
//! the menu until the snake dies or fills the board.

use std::time::Duration;

use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::{debug, info};

use crate::config::*;
use crate::food::Food;
use crate::snake::{Direction, Snake};
use crate::Coords;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collision {
    /// The head ran into one of its own segments.
    Body,
    /// The head left the play area.
    Wall,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Playing,
    GameOver(Collision),
    Won,
}

/// What happened during one tick, for the driver's feedback and redraw.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub ate_food: bool,
    pub status: Status,
}

pub struct GameSession<R: Rng = ThreadRng> {
    snake: Snake,
    food: Food,
    rng: R,
    pending_heading: Option<Direction>,
    survived: Duration,
    time_point: u64,
    score: u64,
    status: Status,
}

impl GameSession<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl<R: Rng> GameSession<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let snake = Snake::new(START_POSITION, INITIAL_LENGTH, Direction::Down);
        let food = Food::new(&mut rng);
        Self::from_parts(snake, food, rng)
    }

    pub fn from_parts(snake: Snake, food: Food, rng: R) -> Self {
        GameSession {
            snake,
            food,
            rng,
            pending_heading: None,
            survived: Duration::from_secs(0),
            time_point: 0,
            score: 0,
            status: Status::Playing,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Buffers a heading for the next tick. Later calls overwrite earlier
    /// ones; nothing is buffered once the game has ended.
    pub fn steer(&mut self, heading: Direction) {
        if self.status == Status::Playing {
            self.pending_heading = Some(heading);
        }
    }

    /// Runs one simulation step, `dt` being the survival time it accounts
    /// for. Once the game has ended this is a no-op.
    pub fn tick(&mut self, dt: Duration) -> TickReport {
        if self.status != Status::Playing {
            return TickReport { ate_food: false, status: self.status };
        }

        if let Some(heading) = self.pending_heading.take() {
            self.snake.set_heading(heading);
        }

        self.snake.advance();
        let head = self.snake.head();

        // Food first, then body, then walls
        let ate_food = head_hits(head, self.food.position());
        if ate_food {
            self.snake.grow();
            self.food.relocate(&mut self.rng);
            info!(length = self.snake.len(), food = ?self.food.position(), "food eaten");
        }

        let mut collision = None;
        if self.snake.body()[1..].iter().any(|&segment| head_hits(head, segment)) {
            collision = Some(Collision::Body);
        }
        if collision.is_none() && !in_play_area(head) {
            collision = Some(Collision::Wall);
        }

        self.status = if self.snake.len() >= WIN_LENGTH {
            Status::Won
        } else if let Some(collision) = collision {
            Status::GameOver(collision)
        } else {
            Status::Playing
        };

        self.survived += dt;
        self.time_point = (self.survived.as_millis() / SCORE_INTERVAL.as_millis()) as u64;
        let grown = self.snake.len().saturating_sub(INITIAL_LENGTH) as u64;
        self.score = self.time_point + FOOD_SCORE * grown;

        match self.status {
            Status::Playing => {
                debug!(?head, heading = ?self.snake.heading(), score = self.score, "tick")
            }
            Status::GameOver(collision) => {
                info!(?collision, ?head, score = self.score, "game over")
            }
            Status::Won => info!(score = self.score, "board filled"),
        }

        TickReport { ate_food, status: self.status }
    }
}

/// Box test of the head against a cell-sized square whose corner is `other`.
fn head_hits(head: Coords, other: Coords) -> bool {
    head.0 >= other.0 && head.0 < other.0 + SIZE && head.1 >= other.1 && head.1 < other.1 + SIZE
}

fn in_play_area(pos: Coords) -> bool {
    (PLAY_MIN..=PLAY_MAX).contains(&pos.0) && (PLAY_MIN..=PLAY_MAX).contains(&pos.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Always draws the lowest cell, so relocated food lands on (50, 50)
    fn fixed_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn session(body: Vec<Coords>, heading: Direction, food: Coords) -> GameSession<StepRng> {
        GameSession::from_parts(Snake::from_body(body, heading), Food::at(food), fixed_rng())
    }

    const TICK: Duration = TICK_INTERVAL;

    #[test]
    fn fresh_session_starts_at_zero() {
        let game = GameSession::with_rng(StdRng::seed_from_u64(1));
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), Status::Playing);
        assert_eq!(game.snake().len(), INITIAL_LENGTH);
        assert_eq!(game.snake().head(), START_POSITION);
        assert_eq!(game.snake().heading(), Down);
    }

    #[test]
    fn eating_grows_and_moves_food() {
        let mut game = session(vec![(150, 150), (100, 150)], Right, (200, 150));

        let report = game.tick(TICK);

        assert!(report.ate_food);
        assert_eq!(report.status, Status::Playing);
        assert_eq!(game.snake().head(), (200, 150));
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.food().position(), (50, 50));
        assert_eq!(game.score(), FOOD_SCORE);
    }

    #[test]
    fn grown_segment_settles_next_tick() {
        let mut game = session(vec![(150, 150), (100, 150)], Right, (200, 150));
        game.tick(TICK);
        let tail = *game.snake().body().last().unwrap();
        assert_eq!(tail, crate::snake::GROWN_SEGMENT);

        let report = game.tick(TICK);

        assert_eq!(report.status, Status::Playing);
        assert_eq!(game.snake().body(), &[(250, 150), (200, 150), (150, 150)]);
    }

    #[test]
    fn leaving_the_left_edge_ends_the_game() {
        let mut game = session(vec![(50, 150), (100, 150)], Left, (400, 400));

        let report = game.tick(TICK);

        assert_eq!(game.snake().head(), (0, 150));
        assert_eq!(report.status, Status::GameOver(Collision::Wall));
    }

    #[test]
    fn every_edge_is_a_wall() {
        let cases = [
            ((50, 300), Left),
            ((700, 300), Right),
            ((300, 50), Up),
            ((300, 700), Down),
        ];
        for &(head, heading) in cases.iter() {
            let mut game = session(vec![head], heading, (400, 400));
            assert_eq!(game.tick(TICK).status, Status::GameOver(Collision::Wall), "{:?}", heading);
        }
    }

    #[test]
    fn edge_cells_are_playable() {
        let mut game = session(vec![(100, 700), (150, 700)], Left, (400, 400));
        assert_eq!(game.tick(TICK).status, Status::Playing);
        assert_eq!(game.snake().head(), (50, 700));
    }

    #[test]
    fn running_into_the_body_ends_the_game() {
        // Head at (200,200) going Up into (200,150)
        let body = vec![(200, 200), (250, 200), (250, 150), (200, 150), (150, 150)];
        let mut game = session(body, Up, (600, 600));

        let report = game.tick(TICK);

        assert_eq!(report.status, Status::GameOver(Collision::Body));
    }

    #[test]
    fn reversing_into_the_neck_is_fatal() {
        let mut game = session(vec![(200, 150), (150, 150), (100, 150)], Right, (600, 600));
        game.steer(Left);

        assert_eq!(game.tick(TICK).status, Status::GameOver(Collision::Body));
    }

    #[test]
    fn last_steer_before_a_tick_wins() {
        let mut game = session(vec![(300, 300), (300, 250)], Down, (600, 600));
        game.steer(Left);
        game.steer(Right);

        game.tick(TICK);

        assert_eq!(game.snake().heading(), Right);
        assert_eq!(game.snake().head(), (350, 300));
    }

    #[test]
    fn body_collision_is_reported_before_wall() {
        // Head leaves the board onto a cell that a stale segment also covers
        let mut game = session(vec![(50, 300), (0, 300), (100, 300)], Left, (600, 600));

        assert_eq!(game.tick(TICK).status, Status::GameOver(Collision::Body));
    }

    #[test]
    fn filling_the_board_wins_over_collisions() {
        // WIN_LENGTH - 1 segments; the head leaves the board while eating
        let mut body = vec![(50, 100); WIN_LENGTH - 1];
        body[0] = (50, 50);
        let mut game = session(body, Up, (50, 0));

        let report = game.tick(TICK);

        assert!(report.ate_food);
        assert_eq!(game.snake().len(), WIN_LENGTH);
        assert_eq!(report.status, Status::Won);
    }

    #[test]
    fn finished_session_ignores_input_and_ticks() {
        let mut game = session(vec![(50, 150), (100, 150)], Left, (400, 400));
        game.tick(TICK);
        let body = game.snake().body().to_vec();
        let score = game.score();

        game.steer(Up);
        let report = game.tick(TICK);

        assert_eq!(report.status, Status::GameOver(Collision::Wall));
        assert_eq!(game.snake().body(), &body[..]);
        assert_eq!(game.snake().heading(), Left);
        assert_eq!(game.score(), score);
    }

    #[test]
    fn survival_earns_a_point_every_interval() {
        let mut game = session(vec![(100, 100)], Right, (700, 700));
        let mut points = Vec::new();

        for _ in 0..10 {
            game.tick(Duration::from_millis(1000));
            points.push(game.score());
        }

        // 10 ticks moving right from x=100 stays inside the board
        assert_eq!(points, vec![0, 0, 1, 1, 1, 2, 2, 2, 3, 3]);
    }

    #[test]
    fn score_never_decreases_while_playing() {
        let mut game = GameSession::with_rng(StdRng::seed_from_u64(3));
        let turns = [Right, Down, Left, Up];
        let mut last = game.score();

        for i in 0..40 {
            if i % 3 == 0 {
                game.steer(turns[(i / 3) % 4]);
            }
            let report = game.tick(TICK);
            assert!(game.score() >= last);
            assert_eq!(game.snake().body().len(), game.snake().len());
            last = game.score();
            if report.status != Status::Playing {
                break;
            }
        }
    }
}
