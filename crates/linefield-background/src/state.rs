//! Background animation state management.

use std::time::Instant;

use linefield_core::{StrokeStyle, Viewport};
use ratatui::{
    Frame,
    layout::Rect,
    symbols::Marker,
    widgets::canvas::{Canvas, Line},
};
use tracing::debug;

use crate::run::GenerationRun;
use crate::watcher::ViewportWatcher;

/// Logical pixels covered by one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellScale {
    pub column: u16,
    pub row: u16,
}

impl Default for CellScale {
    fn default() -> Self {
        Self { column: 10, row: 20 }
    }
}

impl CellScale {
    /// Logical viewport covered by `columns` x `rows` cells.
    pub fn viewport(self, columns: u16, rows: u16) -> Viewport {
        Viewport::new(
            i32::from(columns) * i32::from(self.column),
            i32::from(rows) * i32::from(self.row),
        )
    }
}

/// Growth parameters that stay fixed across restarts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub step: i32,
    pub seed: Option<u64>,
    pub stroke: StrokeStyle,
    pub scale: CellScale,
}

/// Background animation state: the current run plus resize tracking.
#[derive(Debug)]
pub struct BackgroundState {
    settings: Settings,
    run: GenerationRun,
    watcher: ViewportWatcher,
    /// Number of runs started so far, the initial one included.
    generation: u32,
}

impl BackgroundState {
    /// Start the first run for an area of `columns` x `rows` cells.
    pub fn new(settings: Settings, columns: u16, rows: u16, now: Instant) -> Self {
        let viewport = settings.scale.viewport(columns, rows);
        let mut watcher = ViewportWatcher::new();
        watcher.mark_started(viewport);
        Self {
            run: GenerationRun::start(viewport, settings.step, settings.seed, now),
            settings,
            watcher,
            generation: 1,
        }
    }

    /// Discard the current run and grow a fresh field.
    pub fn restart(&mut self, viewport: Viewport, now: Instant) {
        self.run = GenerationRun::start(viewport, self.settings.step, self.settings.seed, now);
        self.watcher.mark_started(viewport);
        self.generation += 1;
        debug!(generation = self.generation, "restarted line field");
    }

    /// Restart with the current viewport.
    pub fn restart_now(&mut self, now: Instant) {
        let viewport = self.run.viewport();
        self.restart(viewport, now);
    }

    /// Handle a terminal resize of the drawing area.
    pub fn on_resize(&mut self, columns: u16, rows: u16, now: Instant) {
        let viewport = self.settings.scale.viewport(columns, rows);
        self.run.resize_bounds(viewport);
        self.watcher.notify(viewport, now);
    }

    /// Advance timers. Returns `true` when the display changed.
    pub fn update(&mut self, now: Instant) -> bool {
        let mut changed = false;
        if let Some(viewport) = self.watcher.poll(now) {
            self.restart(viewport, now);
            changed = true;
        }
        if self.run.tick(now).is_some() {
            changed = true;
        }
        changed
    }

    /// Earliest instant at which [`update`](Self::update) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.run.next_deadline(), self.watcher.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Render the line field into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let viewport = self.run.viewport();
        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        let color = self.settings.stroke.color.color();
        let segments = self.run.segments();

        // Canvas y grows upward, viewport y grows downward.
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(move |ctx| {
                for segment in segments {
                    ctx.draw(&Line::new(
                        f64::from(segment.from.x),
                        height - f64::from(segment.from.y),
                        f64::from(segment.to.x),
                        height - f64::from(segment.to.y),
                        color,
                    ));
                }
            });

        frame.render_widget(canvas, area);
    }

    pub fn run(&self) -> &GenerationRun {
        &self.run
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
