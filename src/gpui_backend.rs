//! GPUI painting for rebuilt series traces.
//!
//! Enabled by the `gpui` feature. Painting is clipped to the region of the
//! last rebuild; colors are supplied by the caller per pen.

use gpui::{
    BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, Rgba, Window, point,
    px, quad,
};

use crate::geom::{Point2D, Region2D};
use crate::pipeline::SeriesTraces;
use crate::style::{PenPalette, StyleId};
use crate::trace::{PointFlags, Trace};

/// Paint every trace of a series: fills first, then lines, error bars, and
/// symbols.
pub fn paint_series(
    window: &mut Window,
    series: &SeriesTraces,
    palette: &PenPalette,
    colors: impl Fn(StyleId) -> Rgba,
) {
    let Some(region) = series.region() else {
        return;
    };
    let mask = ContentMask {
        bounds: to_bounds(region),
    };
    window.with_content_mask(Some(mask), |window| {
        for trace in series.traces() {
            paint_fill(window, trace.fill(), fill_color(colors(trace.style())));
        }
        for trace in series.traces() {
            let pen = palette.pen(trace.style());
            let color = colors(trace.style());
            if pen.draws_lines() {
                paint_polyline(window, series, trace, pen.line_width, color);
            }
            paint_error_bars(window, series, trace, pen.line_width, color);
            paint_symbols(window, series, trace, pen.symbol_size, color);
        }
    });
}

fn paint_fill(window: &mut Window, polygon: &[Point2D], color: Rgba) {
    let Some((first, rest)) = polygon.split_first() else {
        return;
    };
    let mut builder = PathBuilder::fill();
    builder.move_to(to_point(*first));
    for vertex in rest {
        builder.line_to(to_point(*vertex));
    }
    builder.close();
    if let Ok(path) = builder.build() {
        window.paint_path(path, color);
    }
}

fn paint_polyline(
    window: &mut Window,
    series: &SeriesTraces,
    trace: &Trace,
    width: f32,
    color: Rgba,
) {
    if trace.len() < 2 {
        return;
    }
    let mut builder = PathBuilder::stroke(px(width.max(0.5)));
    for (i, p) in series.points(trace).enumerate() {
        let at = to_point(p.position());
        if i == 0 {
            builder.move_to(at);
        } else {
            builder.line_to(at);
        }
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, color);
    }
}

fn paint_error_bars(
    window: &mut Window,
    series: &SeriesTraces,
    trace: &Trace,
    width: f32,
    color: Rgba,
) {
    if trace.segment_count() == 0 {
        return;
    }
    let mut builder = PathBuilder::stroke(px(width.max(1.0)));
    for segment in series.segments(trace) {
        let (p, q) = segment.endpoints();
        builder.move_to(to_point(p));
        builder.line_to(to_point(q));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, color);
    }
}

fn paint_symbols(
    window: &mut Window,
    series: &SeriesTraces,
    trace: &Trace,
    size: f32,
    color: Rgba,
) {
    if size <= 0.0 {
        return;
    }
    let half = size as f64 * 0.5;
    for p in series.points(trace) {
        if !p.flags.contains(PointFlags::SYMBOL) {
            continue;
        }
        let center = p.position();
        let bounds = Bounds::from_corners(
            to_point(Point2D::new(center.x - half, center.y - half)),
            to_point(Point2D::new(center.x + half, center.y + half)),
        );
        window.paint_quad(quad(
            bounds,
            Corners::all(px(0.0)),
            color,
            Edges::all(px(0.0)),
            color,
            BorderStyle::default(),
        ));
    }
}

fn fill_color(color: Rgba) -> Rgba {
    Rgba {
        a: color.a * 0.3,
        ..color
    }
}

fn to_point(p: Point2D) -> gpui::Point<Pixels> {
    point(px(p.x as f32), px(p.y as f32))
}

fn to_bounds(region: Region2D) -> Bounds<Pixels> {
    Bounds::from_corners(
        to_point(Point2D::new(region.left, region.top)),
        to_point(Point2D::new(region.right, region.bottom)),
    )
}
