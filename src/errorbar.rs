//! Error-bar stems and caps.

use crate::arena::{PointArena, SegmentArena};
use crate::axis::AxisMap;
use crate::clip::clip_line;
use crate::error::Result;
use crate::geom::{Orientation, Point2D, Region2D};
use crate::series::SeriesData;
use crate::trace::{SegmentFlags, Trace};

/// Axis an error bar runs along, in data terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarAxis {
    X,
    Y,
}

/// Screen positions and data indices of the knots of a trace.
///
/// Collect these before clipping: bars belong to every knot of the series,
/// including knots that clipping removes.
pub fn bar_knots(points: &PointArena, trace: &Trace) -> Vec<(usize, Point2D)> {
    trace
        .points(points)
        .filter(|p| p.is_knot())
        .map(|p| (p.index, p.position()))
        .collect()
}

/// Build error bars for `knots` and attach them to `trace`.
///
/// Each bound yields a stem from the knot to the bound and a cap of
/// `cap_width` centred on the bound. Both are clipped independently; pieces
/// entirely outside the region are omitted, whether or not the knot itself
/// is visible.
pub fn error_bars(
    segments: &mut SegmentArena,
    knots: &[(usize, Point2D)],
    trace: &mut Trace,
    data: &SeriesData<'_>,
    axes: &impl AxisMap,
    region: &Region2D,
    cap_width: f32,
) -> Result<()> {
    let orientation = Orientation::from_inverted(axes.is_inverted());
    for &(index, knot) in knots {
        let (Some(&x), Some(&y)) = (data.x.get(index), data.y.get(index)) else {
            continue;
        };
        if let Some(error) = data.x_error {
            let (low, high) = error.bounds(index, x);
            let scale = axes.x_axis().scale();
            for (bound, flag) in [(low, SegmentFlags::X_LOW), (high, SegmentFlags::X_HIGH)] {
                let Some(bound) = bound.filter(|b| scale.accepts(*b)) else {
                    continue;
                };
                let end = axes.map(bound, y);
                let bar = Bar { knot, end, index, flag, axis: BarAxis::X };
                bar.emit(segments, trace, region, orientation, cap_width)?;
            }
        }
        if let Some(error) = data.y_error {
            let (low, high) = error.bounds(index, y);
            let scale = axes.y_axis().scale();
            for (bound, flag) in [(low, SegmentFlags::Y_LOW), (high, SegmentFlags::Y_HIGH)] {
                let Some(bound) = bound.filter(|b| scale.accepts(*b)) else {
                    continue;
                };
                let end = axes.map(x, bound);
                let bar = Bar { knot, end, index, flag, axis: BarAxis::Y };
                bar.emit(segments, trace, region, orientation, cap_width)?;
            }
        }
    }
    Ok(())
}

struct Bar {
    knot: Point2D,
    end: Point2D,
    index: usize,
    flag: SegmentFlags,
    axis: BarAxis,
}

impl Bar {
    fn emit(
        &self,
        segments: &mut SegmentArena,
        trace: &mut Trace,
        region: &Region2D,
        orientation: Orientation,
        cap_width: f32,
    ) -> Result<()> {
        if !self.end.is_finite() {
            return Ok(());
        }
        if self.end != self.knot {
            self.push(segments, trace, region, self.knot, self.end)?;
        }
        if cap_width > 0.0 {
            let half = cap_width as f64 * 0.5;
            let along = orientation.along(self.end.x, self.end.y);
            let across = orientation.across(self.end.x, self.end.y);
            // Caps run perpendicular to the stem.
            let (a, b) = match self.axis {
                BarAxis::X => (
                    orientation.point(along, across - half),
                    orientation.point(along, across + half),
                ),
                BarAxis::Y => (
                    orientation.point(along - half, across),
                    orientation.point(along + half, across),
                ),
            };
            self.push(segments, trace, region, a, b)?;
        }
        Ok(())
    }

    fn push(
        &self,
        segments: &mut SegmentArena,
        trace: &mut Trace,
        region: &Region2D,
        p: Point2D,
        q: Point2D,
    ) -> Result<()> {
        let Some((p, q)) = clip_line(region, p, q).segment() else {
            return Ok(());
        };
        let segment = segments.alloc_segment(
            (p.x as f32, p.y as f32),
            (q.x as f32, q.y as f32),
            self.index,
            self.flag | SegmentFlags::VISIBLE,
        )?;
        trace.push_segment(segments, segment);
        Ok(())
    }
}
