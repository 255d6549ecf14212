//! Core types shared by the linefield crates.
//!
//! Points live on a pixel grid with a fixed step between neighbours. A point
//! remembers the direction it was reached from so growth does not turn
//! straight back on itself.

mod direction;
mod geometry;
mod stroke;

use std::time::Duration;

pub use direction::Direction;
pub use geometry::{LineSegment, Point, PointKey, Viewport};
pub use stroke::{LineCap, ParseRgbError, Rgb, StrokeStyle};

/// Default distance in pixels between a point and its compass neighbours.
pub const DIST: i32 = 50;

/// Offset of the first seed point on both axes.
pub const SEED_OFFSET: i32 = 100;

/// Spacing between seed points on both axes.
pub const SEED_SPACING: i32 = 500;

/// Interval between two produced waves.
pub const WAVE_INTERVAL: Duration = Duration::from_millis(100);

/// Quiet period after the last resize notification before it is acted on.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Viewport width above which every debounced resize restarts growth.
pub const WIDTH_BREAKPOINT: i32 = 768;
