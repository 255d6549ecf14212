//! Points, segments and the viewport they are grown in.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Direction;

/// Canonical set-membership key of a point: its coordinates only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey(pub i32, pub i32);

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

/// A grid point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    /// Direction tag recorded when the point was reached. `None` for seeds.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub parent: Option<Direction>,
}

impl Point {
    /// Create a parent-less point.
    pub fn seed(x: i32, y: i32) -> Self {
        Self { x, y, parent: None }
    }

    /// The point one step away in `direction`, tagged with its back-reference.
    pub fn step(&self, direction: Direction, dist: i32) -> Self {
        let (dx, dy) = direction.offset(dist);
        Self {
            x: self.x + dx,
            y: self.y + dy,
            parent: Some(direction.back_reference()),
        }
    }

    pub fn key(&self) -> PointKey {
        PointKey(self.x, self.y)
    }
}

/// A straight stroke between two grown points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Unique key built from the ordered pair of endpoint keys.
    pub fn key(&self) -> String {
        format!("s{}e{}", self.from.key(), self.to.key())
    }
}

/// Size of the drawing area in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether a point lies inside the viewport, edges included.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= 0 && point.y >= 0 && point.x <= self.width && point.y <= self.height
    }
}
