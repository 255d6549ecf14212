//! Randomized breadth-first line growth.
//!
//! Seed points are laid out on a coarse grid. Each wave expands every point
//! currently in the frontier: a valid, unvisited point picks a few random
//! compass neighbours, emits a segment to each neighbour that has not been
//! visited yet and queues it for the next wave. Growth stops once the
//! frontier drains, which always happens because points outside the viewport
//! are never expanded and no point is expanded twice.

use std::collections::{HashSet, VecDeque};

use linefield_core::{Direction, LineSegment, Point, PointKey, SEED_OFFSET, SEED_SPACING, Viewport};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;

/// Segments produced by one expansion round.
pub type Wave = Vec<LineSegment>;

/// Directions kept after shuffling for a point that has a parent.
const KEEP_WITH_PARENT: usize = 4;

/// Directions kept after shuffling for a seed point.
const KEEP_FOR_SEED: usize = 3;

/// Lay out seed points every `SEED_SPACING` pixels starting at `SEED_OFFSET`.
///
/// Coordinates stay strictly below the viewport size. An empty or negative
/// viewport yields no seeds.
pub fn seed_points(viewport: Viewport) -> Vec<Point> {
    let spacing = SEED_SPACING as usize;
    (SEED_OFFSET..viewport.width.max(0))
        .step_by(spacing)
        .flat_map(|x| {
            (SEED_OFFSET..viewport.height.max(0))
                .step_by(spacing)
                .map(move |y| Point::seed(x, y))
        })
        .collect()
}

/// Whether `point` lies within `[0, width] x [0, height]`.
pub fn is_point_valid(point: &Point, viewport: Viewport) -> bool {
    viewport.contains(point)
}

/// Shuffle the candidate directions and keep a random subset.
///
/// The `incoming` direction is never a candidate. Points with a parent keep
/// 4 of the remaining 7 directions, seeds keep 3 of 8.
pub fn random_directions<R: Rng + ?Sized>(incoming: Option<Direction>, rng: &mut R) -> Vec<Direction> {
    let mut candidates: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|direction| Some(*direction) != incoming)
        .collect();
    candidates.shuffle(rng);

    let keep = if incoming.is_some() {
        KEEP_WITH_PARENT
    } else {
        KEEP_FOR_SEED
    };
    candidates.split_off(candidates.len() - keep)
}

/// Pick random neighbours of `point`, each one `step` pixels away.
pub fn random_neighbors<R: Rng + ?Sized>(point: &Point, step: i32, rng: &mut R) -> Vec<Point> {
    random_directions(point.parent, rng)
        .into_iter()
        .map(|direction| point.step(direction, step))
        .collect()
}

/// Incremental line field generator.
///
/// Each call to [`step`](Self::step) runs one wave. The generator is also an
/// [`Iterator`] over waves.
#[derive(Debug)]
pub struct LineFieldGenerator {
    /// Bounds used for the validity check at expansion time.
    viewport: Viewport,
    /// Distance between a point and its neighbours.
    step: i32,
    rng: StdRng,
    /// Points waiting to be expanded, in breadth-first order.
    frontier: VecDeque<Point>,
    /// Keys of points that have already been expanded.
    visited: HashSet<PointKey>,
    waves_produced: usize,
}

impl LineFieldGenerator {
    /// Create a generator seeded from system entropy.
    pub fn new(viewport: Viewport, step: i32) -> Self {
        Self::with_rng(viewport, step, StdRng::from_entropy())
    }

    /// Create a generator that grows the same field every time for a seed.
    pub fn with_seed(viewport: Viewport, step: i32, seed: u64) -> Self {
        Self::with_rng(viewport, step, StdRng::seed_from_u64(seed))
    }

    fn with_rng(viewport: Viewport, step: i32, rng: StdRng) -> Self {
        Self {
            viewport,
            step,
            rng,
            frontier: seed_points(viewport).into(),
            visited: HashSet::new(),
            waves_produced: 0,
        }
    }

    /// Run the next wave. Returns `None` once the frontier is empty.
    pub fn step(&mut self) -> Option<Wave> {
        if self.frontier.is_empty() {
            return None;
        }

        // Points queued during this wave wait for the next one.
        let count = self.frontier.len();
        let mut wave = Wave::new();

        for _ in 0..count {
            let Some(point) = self.frontier.pop_front() else {
                break;
            };
            if !self.visited.insert(point.key()) {
                continue;
            }
            if !is_point_valid(&point, self.viewport) {
                continue;
            }

            let neighbors: Vec<Point> = random_neighbors(&point, self.step, &mut self.rng)
                .into_iter()
                .filter(|neighbor| !self.visited.contains(&neighbor.key()))
                .collect();

            for neighbor in neighbors {
                wave.push(LineSegment::new(point, neighbor));
                self.frontier.push_back(neighbor);
            }
        }

        self.waves_produced += 1;
        trace!(
            wave = self.waves_produced,
            segments = wave.len(),
            frontier = self.frontier.len(),
            "produced wave"
        );
        Some(wave)
    }

    /// Update the bounds used for validity checks without restarting.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn waves_produced(&self) -> usize {
        self.waves_produced
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.frontier.is_empty()
    }
}

impl Iterator for LineFieldGenerator {
    type Item = Wave;

    fn next(&mut self) -> Option<Wave> {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_points_single() {
        let seeds = seed_points(Viewport::new(600, 600));
        assert_eq!(seeds, vec![Point::seed(100, 100)]);
    }

    #[test]
    fn test_seed_points_grid() {
        let seeds = seed_points(Viewport::new(1200, 700));
        let coords: Vec<(i32, i32)> = seeds.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            coords,
            vec![(100, 100), (100, 600), (600, 100), (600, 600), (1100, 100), (1100, 600)]
        );
        assert!(seeds.iter().all(|p| p.parent.is_none()));
    }

    #[test]
    fn test_seed_points_degenerate() {
        assert!(seed_points(Viewport::new(0, 0)).is_empty());
        assert!(seed_points(Viewport::new(-50, 800)).is_empty());
        assert!(seed_points(Viewport::new(100, 800)).is_empty());
        assert_eq!(seed_points(Viewport::new(101, 101)).len(), 1);
    }

    #[test]
    fn test_is_point_valid() {
        let viewport = Viewport::new(600, 600);
        assert!(is_point_valid(&Point::seed(0, 600), viewport));
        assert!(is_point_valid(&Point::seed(300, 0), viewport));
        assert!(!is_point_valid(&Point::seed(-50, 100), viewport));
        assert!(!is_point_valid(&Point::seed(650, 100), viewport));
        assert!(!is_point_valid(&Point::seed(100, 650), viewport));
    }

    #[test]
    fn test_random_directions_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            assert_eq!(random_directions(None, &mut rng).len(), 3);
        }
        for incoming in Direction::ALL {
            for _ in 0..50 {
                let directions = random_directions(Some(incoming), &mut rng);
                assert_eq!(directions.len(), 4);
                assert!(!directions.contains(&incoming));
            }
        }
    }

    #[test]
    fn test_random_directions_are_distinct() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let mut directions = random_directions(Some(Direction::Left), &mut rng);
            let len = directions.len();
            directions.sort_by_key(|d| Direction::ALL.iter().position(|a| a == d));
            directions.dedup();
            assert_eq!(directions.len(), len);
        }
    }

    #[test]
    fn test_random_directions_cover_all_candidates() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.extend(random_directions(Some(Direction::Top), &mut rng));
        }
        assert_eq!(seen.len(), 7);
        assert!(!seen.contains(&Direction::Top));
    }

    #[test]
    fn test_random_neighbors_are_one_step_away() {
        let mut rng = StdRng::seed_from_u64(4);
        let point = Point {
            x: 300,
            y: 300,
            parent: Some(Direction::Bottom),
        };
        for neighbor in random_neighbors(&point, 50, &mut rng) {
            let dx = (neighbor.x - point.x).abs();
            let dy = (neighbor.y - point.y).abs();
            assert!(dx == 50 || dx == 0);
            assert!(dy == 50 || dy == 0);
            // Stepping toward BOTTOM is excluded, so (0, +50) never appears.
            assert!(!(dx == 0 && neighbor.y > point.y));
            assert!(neighbor.parent.is_some());
        }
    }

    #[test]
    fn test_first_wave_from_single_seed() {
        let mut generator = LineFieldGenerator::with_seed(Viewport::new(600, 600), 50, 11);
        assert_eq!(generator.frontier_len(), 1);

        let wave = generator.step().unwrap();
        assert_eq!(wave.len(), 3);
        for segment in &wave {
            assert_eq!(segment.from, Point::seed(100, 100));
        }
        assert_eq!(generator.frontier_len(), 3);
        assert_eq!(generator.visited_count(), 1);
    }

    #[test]
    fn test_empty_viewport_has_no_waves() {
        let mut generator = LineFieldGenerator::with_seed(Viewport::new(0, 0), 50, 0);
        assert!(generator.is_exhausted());
        assert_eq!(generator.step(), None);
        assert_eq!(generator.waves_produced(), 0);
    }

    #[test]
    fn test_same_seed_same_field() {
        let viewport = Viewport::new(900, 700);
        let a: Vec<Wave> = LineFieldGenerator::with_seed(viewport, 50, 42).collect();
        let b: Vec<Wave> = LineFieldGenerator::with_seed(viewport, 50, 42).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_stays_exhausted() {
        let mut generator = LineFieldGenerator::with_seed(Viewport::new(300, 300), 50, 5);
        while generator.step().is_some() {}
        assert!(generator.is_exhausted());
        assert_eq!(generator.step(), None);
    }
}
