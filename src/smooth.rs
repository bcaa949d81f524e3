//! Smoothing engine: inserts generated points between knots.
//!
//! Generated points never carry `KNOT` and copy the data index of the
//! nearer knot. When a curve cannot be fit the trace is left as straight
//! segments; only arena exhaustion is reported.

use crate::arena::{PointArena, PointRef};
use crate::clip::clip_line;
use crate::config::Smoothing;
use crate::error::Result;
use crate::geom::{Orientation, Point2D, Region2D};
use crate::spline::{CatmullRom, CubicSpline, Interpolant, QuadraticSpline};
use crate::trace::{PointFlags, Trace};

/// Screen distance between samples on parametric curves.
const ARC_STEP: f64 = 2.0;

/// A generated point waiting to be spliced in.
#[derive(Debug, Clone, Copy)]
struct Sample {
    point: Point2D,
    index: usize,
}

/// Smooth one trace in place.
pub fn smooth(
    arena: &mut PointArena,
    trace: &mut Trace,
    mode: Smoothing,
    orientation: Orientation,
    region: &Region2D,
) -> Result<()> {
    if trace.len() < 2 {
        return Ok(());
    }
    let knots: Vec<PointRef> = trace.refs(arena).collect();
    let inserts = match mode {
        Smoothing::Linear => return Ok(()),
        Smoothing::Step => step_samples(arena, &knots, orientation),
        Smoothing::Natural | Smoothing::Quadratic => {
            match monotonic_samples(arena, &knots, mode, orientation, region) {
                Some(inserts) => inserts,
                None => {
                    tracing::trace!(?mode, points = knots.len(), "smoothing skipped");
                    return Ok(());
                }
            }
        }
        Smoothing::Parametric | Smoothing::CatmullRom => {
            match parametric_samples(arena, &knots, mode, region) {
                Some(inserts) => inserts,
                None => {
                    tracing::trace!(?mode, points = knots.len(), "smoothing skipped");
                    return Ok(());
                }
            }
        }
    };

    for (after, samples) in knots.iter().zip(inserts) {
        splice_samples(arena, trace, *after, &samples)?;
    }
    if trace.needs_recount() {
        trace.recount(arena);
    }
    Ok(())
}

/// Smooth every trace in a list.
pub fn smooth_traces(
    arena: &mut PointArena,
    traces: &mut [Trace],
    mode: Smoothing,
    orientation: Orientation,
    region: &Region2D,
) -> Result<()> {
    if mode == Smoothing::Linear {
        return Ok(());
    }
    let before = arena.len();
    for trace in traces.iter_mut() {
        smooth(arena, trace, mode, orientation, region)?;
    }
    tracing::debug!(
        ?mode,
        traces = traces.len(),
        generated = arena.len() - before,
        "smoothed traces"
    );
    Ok(())
}

fn splice_samples(
    arena: &mut PointArena,
    trace: &mut Trace,
    after: PointRef,
    samples: &[Sample],
) -> Result<()> {
    let mut first = None;
    let mut last: Option<PointRef> = None;
    for sample in samples {
        let point = arena.alloc_point(
            sample.point.x as f32,
            sample.point.y as f32,
            sample.index,
            PointFlags::empty(),
        )?;
        match last {
            Some(prev) => arena[prev].next = Some(point),
            None => first = Some(point),
        }
        last = Some(point);
    }
    if let (Some(first), Some(last)) = (first, last) {
        trace.splice_after(arena, after, first, last);
    }
    Ok(())
}

fn nearer_index(
    arena: &PointArena,
    p: PointRef,
    q: PointRef,
    from_p: f64,
    from_q: f64,
) -> usize {
    if from_p <= from_q {
        arena[p].index
    } else {
        arena[q].index
    }
}

/// One hold point per knot pair.
fn step_samples(
    arena: &PointArena,
    knots: &[PointRef],
    orientation: Orientation,
) -> Vec<Vec<Sample>> {
    knots
        .windows(2)
        .map(|pair| {
            let p = arena[pair[0]].position();
            let q = arena[pair[1]].position();
            let point =
                orientation.point(orientation.along(q.x, q.y), orientation.across(p.x, p.y));
            vec![Sample {
                point,
                index: arena[pair[0]].index,
            }]
        })
        .collect()
}

/// One sample per along-axis pixel inside the plot, between each knot pair.
fn monotonic_samples(
    arena: &PointArena,
    knots: &[PointRef],
    mode: Smoothing,
    orientation: Orientation,
    region: &Region2D,
) -> Option<Vec<Vec<Sample>>> {
    if knots.len() < 3 {
        return None;
    }
    let along: Vec<f64> = knots
        .iter()
        .map(|r| {
            let p = arena[*r].position();
            orientation.along(p.x, p.y)
        })
        .collect();
    let across: Vec<f64> = knots
        .iter()
        .map(|r| {
            let p = arena[*r].position();
            orientation.across(p.x, p.y)
        })
        .collect();

    // Decreasing runs are fit on the negated axis.
    let sign = if along.windows(2).all(|w| w[1] > w[0]) {
        1.0
    } else if along.windows(2).all(|w| w[1] < w[0]) {
        -1.0
    } else {
        return None;
    };
    let t: Vec<f64> = along.iter().map(|u| u * sign).collect();
    let curve: Box<dyn Interpolant> = match mode {
        Smoothing::Natural => Box::new(CubicSpline::natural(&t, &across)?),
        _ => Box::new(QuadraticSpline::new(&t, &across)?),
    };

    let (lo, hi) = orientation.along_bounds(region);
    let inserts = (0..knots.len() - 1)
        .map(|k| {
            let (u0, u1) = (along[k], along[k + 1]);
            let start = u0.min(u1).max(lo);
            let end = u0.max(u1).min(hi);
            let mut samples = Vec::new();
            if start >= end {
                return samples;
            }
            let mut pixel = start.floor() + 1.0;
            while pixel < end {
                if pixel > u0.min(u1) && pixel < u0.max(u1) {
                    let value = curve.eval_in(k, pixel * sign);
                    samples.push(Sample {
                        point: orientation.point(pixel, value),
                        index: nearer_index(
                            arena,
                            knots[k],
                            knots[k + 1],
                            (pixel - u0).abs(),
                            (pixel - u1).abs(),
                        ),
                    });
                }
                pixel += 1.0;
            }
            if sign < 0.0 {
                samples.reverse();
            }
            samples
        })
        .collect();
    Some(inserts)
}

/// Samples every `ARC_STEP` units of chord length along visible intervals.
fn parametric_samples(
    arena: &PointArena,
    knots: &[PointRef],
    mode: Smoothing,
    region: &Region2D,
) -> Option<Vec<Vec<Sample>>> {
    if knots.len() < 3 {
        return None;
    }
    let points: Vec<Point2D> = knots.iter().map(|r| arena[*r].position()).collect();
    let mut t = Vec::with_capacity(points.len());
    let mut total = 0.0;
    t.push(0.0);
    for pair in points.windows(2) {
        total += pair[0].distance_sq(pair[1]).sqrt();
        t.push(total);
    }
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let (x_curve, y_curve): (Box<dyn Interpolant>, Box<dyn Interpolant>) = match mode {
        Smoothing::Parametric => (
            Box::new(CubicSpline::natural(&t, &xs)?),
            Box::new(CubicSpline::natural(&t, &ys)?),
        ),
        _ => (
            Box::new(CatmullRom::new(&t, &xs)?),
            Box::new(CatmullRom::new(&t, &ys)?),
        ),
    };

    let inserts = (0..knots.len() - 1)
        .map(|k| {
            let (p, q) = (points[k], points[k + 1]);
            let chord = t[k + 1] - t[k];
            let clipped = clip_line(region, p, q);
            let mut samples = Vec::new();
            if !clipped.kept {
                return samples;
            }
            let start = p.distance_sq(clipped.p).sqrt();
            let end = p.distance_sq(clipped.q).sqrt();
            let steps = (chord / ARC_STEP).floor() as usize;
            if steps < 2 {
                return samples;
            }
            let step = chord / steps as f64;
            // Only the visible span, widened by one step on each side.
            let first = ((start / step).floor() as usize).max(1);
            let last = ((end / step).ceil() as usize + 1).min(steps);
            for j in first..last {
                let s = j as f64 * step;
                let param = t[k] + s;
                samples.push(Sample {
                    point: Point2D::new(x_curve.eval_in(k, param), y_curve.eval_in(k, param)),
                    index: nearer_index(arena, knots[k], knots[k + 1], s, chord - s),
                });
            }
            samples
        })
        .collect();
    Some(inserts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::tests::{coords, trace_from};

    fn region() -> Region2D {
        Region2D::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn step_inserts_hold_point() {
        let mut arena = PointArena::points(16);
        let mut trace = trace_from(&mut arena, &[(0.0, 0.0), (2.0, 4.0)]);
        smooth(&mut arena, &mut trace, Smoothing::Step, Orientation::Normal, &region())
            .expect("fits");
        assert_eq!(coords(&trace, &arena), vec![(0.0, 0.0), (2.0, 0.0), (2.0, 4.0)]);
        assert_eq!(trace.len(), 3);
        let middle = trace.points(&arena).nth(1).expect("middle point");
        assert!(!middle.is_knot());
        assert_eq!(middle.index, 0);
    }

    #[test]
    fn inverted_step_holds_along_other_axis() {
        let mut arena = PointArena::points(16);
        let mut trace = trace_from(&mut arena, &[(0.0, 0.0), (2.0, 4.0)]);
        smooth(&mut arena, &mut trace, Smoothing::Step, Orientation::Inverted, &region())
            .expect("fits");
        assert_eq!(coords(&trace, &arena)[1], (0.0, 4.0));
    }

    #[test]
    fn natural_samples_each_pixel() {
        let mut arena = PointArena::points(256);
        let mut trace = trace_from(&mut arena, &[(0.0, 50.0), (10.0, 40.0), (20.0, 60.0)]);
        smooth(&mut arena, &mut trace, Smoothing::Natural, Orientation::Normal, &region())
            .expect("fits");
        // 9 interior pixels per interval.
        assert_eq!(trace.len(), 3 + 18);
        let xs: Vec<f32> = trace.points(&arena).map(|p| p.x).collect();
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(trace.points(&arena).filter(|p| p.is_knot()).count(), 3);
    }

    #[test]
    fn natural_skips_offscreen_part() {
        let mut arena = PointArena::points(256);
        let mut trace = trace_from(&mut arena, &[(-50.0, 50.0), (10.0, 40.0), (20.0, 60.0)]);
        smooth(&mut arena, &mut trace, Smoothing::Natural, Orientation::Normal, &region())
            .expect("fits");
        assert!(trace.points(&arena).filter(|p| !p.is_knot()).all(|p| p.x > 0.0));
        assert_eq!(trace.len(), 3 + 9 + 9);
    }

    #[test]
    fn quadratic_handles_decreasing_runs() {
        let mut arena = PointArena::points(256);
        let mut trace = trace_from(&mut arena, &[(20.0, 60.0), (10.0, 40.0), (0.0, 50.0)]);
        smooth(&mut arena, &mut trace, Smoothing::Quadratic, Orientation::Normal, &region())
            .expect("fits");
        let xs: Vec<f32> = trace.points(&arena).map(|p| p.x).collect();
        assert_eq!(xs.len(), 21);
        assert!(xs.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn non_monotonic_falls_back() {
        let mut arena = PointArena::points(256);
        let input = [(0.0, 50.0), (10.0, 40.0), (5.0, 60.0)];
        let mut trace = trace_from(&mut arena, &input);
        smooth(&mut arena, &mut trace, Smoothing::Natural, Orientation::Normal, &region())
            .expect("fits");
        assert_eq!(coords(&trace, &arena), input.to_vec());
    }

    #[test]
    fn two_knots_stay_straight() {
        let mut arena = PointArena::points(256);
        let mut trace = trace_from(&mut arena, &[(0.0, 50.0), (30.0, 40.0)]);
        smooth(&mut arena, &mut trace, Smoothing::CatmullRom, Orientation::Normal, &region())
            .expect("fits");
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn catmull_rom_densifies_loops() {
        let mut arena = PointArena::points(1024);
        let input = [(10.0, 10.0), (50.0, 10.0), (50.0, 50.0), (10.0, 50.0), (30.0, 5.0)];
        let mut trace = trace_from(&mut arena, &input);
        smooth(&mut arena, &mut trace, Smoothing::CatmullRom, Orientation::Normal, &region())
            .expect("fits");
        assert!(trace.len() > 60);
        let knots: Vec<(f32, f32)> = trace
            .points(&arena)
            .filter(|p| p.is_knot())
            .map(|p| (p.x, p.y))
            .collect();
        assert_eq!(knots, input.to_vec());
        for pair in trace.points(&arena).collect::<Vec<_>>().windows(2) {
            assert!(pair[0].position().distance_sq(pair[1].position()).sqrt() < 6.0);
        }
    }

    #[test]
    fn parametric_sampling_is_bounded_by_visible_length() {
        let mut arena = PointArena::points(256);
        let input = [(-1e9, 50.0), (50.0, 40.0), (1e9, 60.0)];
        let mut trace = trace_from(&mut arena, &input);
        smooth(&mut arena, &mut trace, Smoothing::CatmullRom, Orientation::Normal, &region())
            .expect("fits");
        // Roughly 100 visible pixels at one sample per ARC_STEP, plus a step of
        // margin on each side of each clipped interval.
        let generated = trace.points(&arena).filter(|p| !p.is_knot()).count();
        assert!(generated > 0);
        assert!(generated <= 60, "generated {generated} samples");
    }

    #[test]
    fn parametric_duplicate_knots_fall_back() {
        let mut arena = PointArena::points(256);
        let input = [(10.0, 10.0), (10.0, 10.0), (50.0, 50.0)];
        let mut trace = trace_from(&mut arena, &input);
        smooth(&mut arena, &mut trace, Smoothing::Parametric, Orientation::Normal, &region())
            .expect("fits");
        assert_eq!(trace.len(), 3);
    }
}
