//! SVG markup for a finished or partial line field.

use linefield_core::{LineSegment, StrokeStyle, Viewport};

/// Render segments as an `<svg>` document, one `<line>` per segment.
pub fn render_svg(viewport: Viewport, segments: &[LineSegment], stroke: &StrokeStyle) -> String {
    let mut out = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" height=\"{}\" width=\"{}\" class=\"svg-background\">\n",
        viewport.height, viewport.width
    );
    for segment in segments {
        out.push_str("  ");
        out.push_str(&render_line(segment, stroke));
        out.push('\n');
    }
    out.push_str("</svg>\n");
    out
}

fn render_line(segment: &LineSegment, stroke: &StrokeStyle) -> String {
    format!(
        "<line key=\"{}\" class=\"back-line\" x1=\"{}px\" y1=\"{}px\" x2=\"{}px\" y2=\"{}px\" \
         stroke=\"{}\" stroke-linecap=\"{}\" stroke-width=\"{}px\"/>",
        segment.key(),
        segment.from.x,
        segment.from.y,
        segment.to.x,
        segment.to.y,
        stroke.color,
        stroke.cap.as_str(),
        stroke.width,
    )
}
