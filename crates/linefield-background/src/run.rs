//! A single generation run driven by a fixed tick.

use std::time::Instant;

use linefield_core::{LineSegment, Viewport, WAVE_INTERVAL};
use tracing::debug;

use crate::generator::LineFieldGenerator;

/// Owns everything one animation run needs: the generator, the segments
/// drawn so far and the time of the next wave.
///
/// Restarting means dropping the run and starting a new one.
#[derive(Debug)]
pub struct GenerationRun {
    generator: LineFieldGenerator,
    /// Display list, in the order segments were produced.
    segments: Vec<LineSegment>,
    /// When the next wave is due. `None` once the generator is exhausted.
    next_tick: Option<Instant>,
}

impl GenerationRun {
    /// Start a run. The first wave is due one interval after `now`.
    pub fn start(viewport: Viewport, step: i32, seed: Option<u64>, now: Instant) -> Self {
        let generator = match seed {
            Some(seed) => LineFieldGenerator::with_seed(viewport, step, seed),
            None => LineFieldGenerator::new(viewport, step),
        };
        debug!(
            width = viewport.width,
            height = viewport.height,
            seeds = generator.frontier_len(),
            "starting line field"
        );
        Self {
            generator,
            segments: Vec::new(),
            next_tick: Some(now + WAVE_INTERVAL),
        }
    }

    /// Produce at most one wave if it is due.
    ///
    /// Returns the number of segments added, or `None` when nothing was due
    /// or the run has finished.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let due = self.next_tick?;
        if now < due {
            return None;
        }

        match self.generator.step() {
            Some(wave) => {
                let added = wave.len();
                self.segments.extend(wave);
                // Never catch up with a burst of waves after a stall.
                self.next_tick = Some((due + WAVE_INTERVAL).max(now));
                Some(added)
            }
            None => {
                debug!(
                    waves = self.generator.waves_produced(),
                    segments = self.segments.len(),
                    "line field finished"
                );
                self.next_tick = None;
                None
            }
        }
    }

    /// Drive the generator to the end, ignoring the tick schedule.
    pub fn run_to_completion(mut self) -> Vec<LineSegment> {
        for wave in self.generator.by_ref() {
            self.segments.extend(wave);
        }
        self.segments
    }

    /// Change the bounds checked for points expanded from now on.
    pub fn resize_bounds(&mut self, viewport: Viewport) {
        self.generator.set_viewport(viewport);
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn viewport(&self) -> Viewport {
        self.generator.viewport()
    }

    pub fn waves(&self) -> usize {
        self.generator.waves_produced()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    pub fn is_finished(&self) -> bool {
        self.next_tick.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_before_first_interval() {
        let now = Instant::now();
        let mut run = GenerationRun::start(Viewport::new(600, 600), 50, Some(1), now);
        assert_eq!(run.tick(now), None);
        assert!(run.segments().is_empty());
        assert_eq!(run.next_deadline(), Some(now + WAVE_INTERVAL));
    }

    #[test]
    fn test_one_wave_per_tick() {
        let now = Instant::now();
        let mut run = GenerationRun::start(Viewport::new(600, 600), 50, Some(1), now);

        let first = now + WAVE_INTERVAL;
        assert_eq!(run.tick(first), Some(3));
        assert_eq!(run.waves(), 1);

        // Same instant again: the next wave is not due yet.
        assert_eq!(run.tick(first), None);
        assert_eq!(run.waves(), 1);

        assert!(run.tick(first + WAVE_INTERVAL).is_some());
        assert_eq!(run.waves(), 2);
    }

    #[test]
    fn test_late_tick_produces_single_wave() {
        let now = Instant::now();
        let mut run = GenerationRun::start(Viewport::new(600, 600), 50, Some(1), now);
        let late = now + WAVE_INTERVAL * 10;
        assert!(run.tick(late).is_some());
        assert_eq!(run.waves(), 1);
        assert_eq!(run.next_deadline(), Some(late));
    }

    #[test]
    fn test_finishes_and_matches_completion() {
        let viewport = Viewport::new(400, 300);
        let now = Instant::now();
        let mut ticked = GenerationRun::start(viewport, 50, Some(8), now);
        let mut at = now;
        while !ticked.is_finished() {
            at += WAVE_INTERVAL;
            ticked.tick(at);
        }

        let completed = GenerationRun::start(viewport, 50, Some(8), now).run_to_completion();
        assert_eq!(ticked.segments(), completed.as_slice());
        assert!(ticked.tick(at + WAVE_INTERVAL).is_none());
    }

    #[test]
    fn test_empty_viewport_finishes_on_first_tick() {
        let now = Instant::now();
        let mut run = GenerationRun::start(Viewport::new(0, 0), 50, None, now);
        assert_eq!(run.tick(now + WAVE_INTERVAL), None);
        assert!(run.is_finished());
        assert!(run.segments().is_empty());
    }
}
