//! Closest-element queries over rebuilt traces.
//!
//! All distances are screen-space. Callers convert a cursor position into
//! the same space the traces were built in.

use crate::clip::{point_in_polygon, project_point_to_segment};
use crate::geom::Point2D;
use crate::pipeline::SeriesTraces;

/// Result of a nearest-element query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Position of the trace in [`SeriesTraces::traces`].
    pub trace: usize,
    /// Data index of the matched sample.
    pub index: usize,
    /// Matched screen position.
    pub point: Point2D,
    /// Distance from the query point.
    pub distance: f64,
}

/// Nearest knot within `max_distance` of `target`.
pub fn closest_point(series: &SeriesTraces, target: Point2D, max_distance: f64) -> Option<Nearest> {
    let threshold_sq = max_distance * max_distance;
    let mut best: Option<(Nearest, f64)> = None;
    for (trace_index, trace) in series.traces().iter().enumerate() {
        for point in series.points(trace).filter(|p| p.is_knot()) {
            let position = point.position();
            let dist = position.distance_sq(target);
            if dist > threshold_sq {
                continue;
            }
            if best.is_none_or(|best| dist < best.1) {
                let nearest = Nearest {
                    trace: trace_index,
                    index: point.index,
                    point: position,
                    distance: dist.sqrt(),
                };
                best = Some((nearest, dist));
            }
        }
    }
    best.map(|(nearest, _)| nearest)
}

/// Nearest point on any trace polyline within `max_distance` of `target`.
///
/// The reported index belongs to whichever segment endpoint is closer to the
/// projection.
pub fn closest_segment(
    series: &SeriesTraces,
    target: Point2D,
    max_distance: f64,
) -> Option<Nearest> {
    let threshold_sq = max_distance * max_distance;
    let mut best: Option<(Nearest, f64)> = None;
    for (trace_index, trace) in series.traces().iter().enumerate() {
        let points: Vec<_> = series.points(trace).collect();
        for pair in points.windows(2) {
            let (p, q) = (pair[0], pair[1]);
            let (p_pos, q_pos) = (p.position(), q.position());
            let projected = project_point_to_segment(target, p_pos, q_pos);
            let dist = projected.distance_sq(target);
            if dist > threshold_sq || best.is_some_and(|best| dist >= best.1) {
                continue;
            }
            let index = if projected.distance_sq(p_pos) <= projected.distance_sq(q_pos) {
                p.index
            } else {
                q.index
            };
            let nearest = Nearest {
                trace: trace_index,
                index,
                point: projected,
                distance: dist.sqrt(),
            };
            best = Some((nearest, dist));
        }
    }
    best.map(|(nearest, _)| nearest)
}

/// Position of the first trace whose fill polygon contains `target`.
pub fn area_contains(series: &SeriesTraces, target: Point2D) -> Option<usize> {
    series
        .traces()
        .iter()
        .position(|trace| point_in_polygon(target, trace.fill()))
}
