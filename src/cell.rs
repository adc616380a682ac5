use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Discrete map cell. Also used as a 2d offset vector between cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Chebyshev length - the movement metric of the grid.
    pub fn length_chebyshev(self) -> i32 {
        self.x.abs().max(self.y.abs())
    }

    /// Euclidean length, used for nearest-neighbour comparisons.
    pub fn length_l2(self) -> f64 {
        f64::from(self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, other: Cell) -> Cell {
        Cell::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, other: Cell) -> Cell {
        Cell::new(self.x - other.x, self.y - other.y)
    }
}
