//! Fill polygons for the area under a trace.

use crate::arena::PointArena;
use crate::axis::AxisMap;
use crate::clip::clip_polygon;
use crate::geom::{Orientation, Point2D, Region2D};
use crate::trace::Trace;

/// Screen coordinate, across the trace, that fills extend to.
///
/// A data-space `baseline` is mapped through the y axis; without one, or
/// when it cannot be mapped, the fill runs to the bottom edge (left edge
/// when inverted).
pub fn fill_baseline(axes: &impl AxisMap, region: &Region2D, baseline: Option<f64>) -> f64 {
    let orientation = Orientation::from_inverted(axes.is_inverted());
    let edge = match orientation {
        Orientation::Normal => region.bottom,
        Orientation::Inverted => region.left,
    };
    let Some(value) = baseline else {
        return edge;
    };
    if !axes.y_axis().scale().accepts(value) {
        return edge;
    }
    let x = axes.x_axis().range().min;
    let mapped = axes.map(x, value);
    let across = orientation.across(mapped.x, mapped.y);
    if across.is_finite() { across } else { edge }
}

/// Closed polygon between a trace and the baseline, clipped to the region.
///
/// The first and last vertices are pushed one unit outward along the trace
/// so adjacent fills overlap instead of leaving a hairline seam. Returns an
/// empty vector when fewer than three vertices survive clipping.
pub fn fill_polygon(
    arena: &PointArena,
    trace: &Trace,
    region: &Region2D,
    orientation: Orientation,
    baseline: f64,
) -> Vec<Point2D> {
    let points: Vec<Point2D> = trace.points(arena).map(|p| p.position()).collect();
    let (Some(first), Some(last)) = (points.first().copied(), points.last().copied()) else {
        return Vec::new();
    };
    let first_along = orientation.along(first.x, first.y);
    let last_along = orientation.along(last.x, last.y);
    let outward = if last_along >= first_along { 1.0 } else { -1.0 };

    let mut polygon = Vec::with_capacity(points.len() + 2);
    let n = points.len();
    for (i, point) in points.iter().enumerate() {
        let along = orientation.along(point.x, point.y);
        let across = orientation.across(point.x, point.y);
        let shift = if i == 0 {
            -outward
        } else if i == n - 1 {
            outward
        } else {
            0.0
        };
        polygon.push(orientation.point(along + shift, across));
    }
    polygon.push(orientation.point(last_along + outward, baseline));
    polygon.push(orientation.point(first_along - outward, baseline));

    let clipped = clip_polygon(region, &polygon);
    if clipped.len() < 3 {
        tracing::trace!(vertices = clipped.len(), "fill polygon degenerate");
        return Vec::new();
    }
    clipped
}
