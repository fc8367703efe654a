use crate::config::SIZE;
use crate::Coords;
use Direction::*;

/// Position given to a freshly grown segment. It is off the board and gets
/// overwritten by the next `advance`.
pub const GROWN_SEGMENT: Coords = (-1, -1);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// Unit step in cells; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snake {
    body: Vec<Coords>,
    heading: Direction,
}

impl Snake {
    /// Every segment starts stacked on `pos`; they fan out as the snake moves.
    pub fn new(pos: Coords, size: usize, heading: Direction) -> Self {
        Snake { body: vec![pos; size.max(1)], heading }
    }

    #[cfg(test)]
    pub fn from_body(body: Vec<Coords>, heading: Direction) -> Self {
        assert!(!body.is_empty());
        Snake { body, heading }
    }

    /// Head first.
    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Turning straight back into the neck is allowed.
    pub fn set_heading(&mut self, heading: Direction) {
        self.heading = heading;
    }

    pub fn advance(&mut self) {
        // Tail to head, so every segment reads its neighbour before it moves
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let (dx, dy) = self.heading.delta();
        let head = &mut self.body[0];
        head.0 += dx * SIZE;
        head.1 += dy * SIZE;
    }

    pub fn grow(&mut self) {
        self.body.push(GROWN_SEGMENT);
    }

    pub fn head_char(&self) -> char {
        match self.heading {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }
}
