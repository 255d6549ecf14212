//! Compass directions used for line growth.

use serde::{Deserialize, Serialize};

/// One of the eight compass directions a line can grow in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Top,
    TopRight,
    TopLeft,
    Bottom,
    BottomRight,
    BottomLeft,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order candidates are listed before shuffling.
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::TopRight,
        Direction::TopLeft,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::BottomRight,
        Direction::Left,
        Direction::Right,
    ];

    /// Pixel offset of a step in this direction.
    pub fn offset(self, dist: i32) -> (i32, i32) {
        match self {
            Direction::Top => (0, -dist),
            Direction::TopLeft => (-dist, -dist),
            Direction::TopRight => (dist, -dist),
            Direction::Bottom => (0, dist),
            Direction::BottomLeft => (-dist, dist),
            Direction::BottomRight => (dist, dist),
            Direction::Left => (-dist, 0),
            Direction::Right => (dist, 0),
        }
    }

    /// Parent tag carried by a point reached by stepping in this direction.
    ///
    /// Diagonals and verticals map to their opposite. Horizontal steps both
    /// map to `TopLeft`; the growth pattern depends on this, so it is kept.
    pub fn back_reference(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::TopLeft => Direction::BottomRight,
            Direction::TopRight => Direction::BottomLeft,
            Direction::Bottom => Direction::Top,
            Direction::BottomLeft => Direction::TopRight,
            Direction::BottomRight => Direction::TopLeft,
            Direction::Left | Direction::Right => Direction::TopLeft,
        }
    }
}
