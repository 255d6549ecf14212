//! Headless export of a fully grown field.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use color_eyre::eyre::WrapErr;
use linefield_background::{GenerationRun, render_svg};
use linefield_core::{LineSegment, StrokeStyle, Viewport};
use serde::Serialize;
use tracing::info;

use crate::cli::ExportFormat;

/// JSON document written by `linefield export --format json`.
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    viewport: Viewport,
    stroke_color: String,
    stroke_width: u32,
    segments: &'a [LineSegment],
}

/// Grow a field to completion.
pub fn generate(viewport: Viewport, step: i32, seed: Option<u64>) -> Vec<LineSegment> {
    GenerationRun::start(viewport, step, seed, Instant::now()).run_to_completion()
}

/// Format segments in the requested output format.
pub fn render(
    format: ExportFormat,
    viewport: Viewport,
    segments: &[LineSegment],
    stroke: &StrokeStyle,
) -> color_eyre::Result<String> {
    match format {
        ExportFormat::Svg => Ok(render_svg(viewport, segments, stroke)),
        ExportFormat::Json => {
            let document = ExportDocument {
                viewport,
                stroke_color: stroke.color.to_string(),
                stroke_width: stroke.width,
                segments,
            };
            Ok(serde_json::to_string_pretty(&document)? + "\n")
        }
    }
}

/// Write to `output`, or stdout when no path is given.
pub fn write_output(output: Option<&Path>, contents: &str) -> color_eyre::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, contents)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = contents.len(), "wrote export");
        }
        None => io::stdout().lock().write_all(contents.as_bytes())?,
    }
    Ok(())
}
