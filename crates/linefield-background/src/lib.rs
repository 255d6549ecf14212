//! Growing line field background.
//!
//! Lines grow outward from a coarse grid of seed points, one breadth-first
//! wave per tick, and start over when the viewport changes size. The field
//! can be drawn into a ratatui frame or exported as SVG.

mod generator;
mod run;
mod state;
mod svg;
mod watcher;

pub use generator::{
    LineFieldGenerator, Wave, is_point_valid, random_directions, random_neighbors, seed_points,
};
pub use run::GenerationRun;
pub use state::{BackgroundState, CellScale, Settings};
pub use svg::render_svg;
pub use watcher::{ViewportWatcher, should_restart};
