use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use linefield_background::{BackgroundState, CellScale, Settings};
use linefield_config::Config;
use linefield_core::Viewport;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Size},
    style::{Color, Style, Stylize},
    text::{Line, Span},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod export;

use cli::{Args, Command};

/// Longest time to block waiting for input when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    if let Some(path) = &args.log {
        init_logging(path)?;
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    match args.command {
        Some(Command::Export {
            width,
            height,
            format,
            output,
        }) => {
            let viewport = Viewport::new(width, height);
            let segments = export::generate(viewport, config.step, config.seed);
            let contents = export::render(format, viewport, &segments, &config.stroke())?;
            export::write_output(output.as_deref(), &contents)
        }
        Some(Command::Config) => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
        None => run_tui(config),
    }
}

/// Send tracing output to a file; the terminal belongs to the TUI.
fn init_logging(path: &Path) -> color_eyre::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_tui(config: Config) -> color_eyre::Result<()> {
    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, config);
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    let size = terminal.size()?;
    App::new(config, size, Instant::now()).run(terminal)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Whether the bottom row is reserved for the status line.
    show_status: bool,
    /// The growing line field.
    background: BackgroundState,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `size` cells.
    pub fn new(config: Config, size: Size, now: Instant) -> Self {
        let settings = Settings {
            step: config.step,
            seed: config.seed,
            stroke: config.stroke(),
            scale: CellScale {
                column: config.pixels_per_column,
                row: config.pixels_per_row,
            },
        };
        let show_status = config.show_status;
        let rows = canvas_rows(size.height, show_status);
        Self {
            running: false,
            show_status,
            background: BackgroundState::new(settings, size.width, rows, now),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        info!("linefield started");
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let status_height = u16::from(self.show_status);
        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(status_height)])
                .split(frame.area());

        self.background.render(frame, chunks[0]);

        if self.show_status {
            frame.render_widget(self.status_line(), chunks[1]);
        }
    }

    fn status_line(&self) -> Line<'static> {
        let color = self.background.settings().stroke.color.color();
        let run = self.background.run();
        let phase = if run.is_finished() { "done" } else { "growing" };
        let summary = format!(
            "run {}  wave {}  {} lines  {}",
            self.background.generation(),
            run.waves(),
            run.segments().len(),
            phase
        );

        Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "r".bold().fg(color),
            " restart  ".dark_gray(),
            Span::styled(summary, Style::new().fg(Color::DarkGray)),
        ])
        .centered()
    }

    /// Reads the crossterm events and advances the animation.
    /// Waits no longer than the next scheduled wave or resize.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = self
            .background
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(IDLE_POLL)
            .min(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(columns, rows) => self.on_resize(columns, rows, Instant::now()),
                _ => {}
            }
        }
        self.background.update(Instant::now());
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.background.restart_now(Instant::now()),
            _ => {}
        }
    }

    /// Forward a terminal resize to the background.
    fn on_resize(&mut self, columns: u16, rows: u16, now: Instant) {
        let rows = canvas_rows(rows, self.show_status);
        self.background.on_resize(columns, rows, now);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Terminal rows available to the line field.
fn canvas_rows(rows: u16, show_status: bool) -> u16 {
    if show_status {
        rows.saturating_sub(1)
    } else {
        rows
    }
}

#[cfg(test)]
mod tests {
    use linefield_core::WAVE_INTERVAL;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app(now: Instant) -> App {
        let config = Config {
            seed: Some(1),
            ..Default::default()
        };
        App::new(config, Size::new(80, 25), now)
    }

    #[test]
    fn test_status_row_is_reserved() {
        let now = Instant::now();
        let app = app(now);
        assert_eq!(app.background.run().viewport(), Viewport::new(800, 480));
        assert_eq!(canvas_rows(0, true), 0);
        assert_eq!(canvas_rows(10, false), 10);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(Instant::now());
        app.running = true;
        app.on_key_event(KeyEvent::from(KeyCode::Char('q')));
        assert!(!app.running);

        app.running = true;
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_restart_key_starts_new_run() {
        let now = Instant::now();
        let mut app = app(now);
        app.background.update(now + WAVE_INTERVAL);
        assert!(!app.background.run().segments().is_empty());

        app.on_key_event(KeyEvent::from(KeyCode::Char('r')));
        assert_eq!(app.background.generation(), 2);
        assert!(app.background.run().segments().is_empty());
    }

    #[test]
    fn test_resize_reserves_status_row() {
        let now = Instant::now();
        let mut app = app(now);
        app.on_resize(100, 31, now);
        assert_eq!(app.background.run().viewport(), Viewport::new(1000, 600));
    }

    #[test]
    fn test_render_status_line() {
        let now = Instant::now();
        let mut app = app(now);
        app.background.update(now + WAVE_INTERVAL);

        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let last_row: String = (0..80u16)
            .map(|x| buffer[(x, 24u16)].symbol().to_string())
            .collect();
        assert!(last_row.contains("restart"));
        assert!(last_row.contains("run 1  wave 1"));
    }
}
