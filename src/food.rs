use rand::Rng;

use crate::config::{GRID_CELLS, SIZE};
use crate::Coords;

/// A single piece of food. Placement ignores the snake, so food can land
/// under the body.
#[derive(Debug, Clone)]
pub struct Food {
    position: Coords,
}

impl Food {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Food { position: random_cell(rng) }
    }

    #[cfg(test)]
    pub fn at(position: Coords) -> Self {
        Food { position }
    }

    pub fn position(&self) -> Coords {
        self.position
    }

    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.position = random_cell(rng);
    }
}

fn random_cell<R: Rng + ?Sized>(rng: &mut R) -> Coords {
    (SIZE * rng.gen_range(1..=GRID_CELLS), SIZE * rng.gen_range(1..=GRID_CELLS))
}
