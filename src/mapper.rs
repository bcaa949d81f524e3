//! Visibility marking and clipping of traces against the plot region.

use crate::arena::{PointArena, PointRef};
use crate::clip::clip_line;
use crate::error::Result;
use crate::geom::{Point2D, Region2D};
use crate::series::SeriesData;
use crate::style::{PenPalette, StyleId};
use crate::trace::{PointFlags, Trace, TraceList};

/// Recompute `VISIBLE`, `SYMBOL`, and `ACTIVE` on every point.
pub fn mark_points(
    arena: &mut PointArena,
    traces: &[Trace],
    region: &Region2D,
    data: &SeriesData<'_>,
) {
    let active = data.active_set();
    for trace in traces {
        let refs: Vec<PointRef> = trace.refs(arena).collect();
        for r in refs {
            let point = &mut arena[r];
            let visible = region.contains(point.position());
            let knot = point.is_knot();
            point.flags.set(PointFlags::VISIBLE, visible);
            point.flags.set(PointFlags::SYMBOL, knot && visible);
            point.flags.set(PointFlags::ACTIVE, knot && active.contains(&point.index));
        }
    }
}

/// Allocate a synthetic boundary point standing in for `source`.
fn boundary_point(arena: &mut PointArena, source: PointRef, at: Point2D) -> Result<PointRef> {
    let index = arena[source].index;
    arena.alloc_point(at.x as f32, at.y as f32, index, PointFlags::VISIBLE)
}

/// Clip one trace, splitting it wherever it leaves the region.
///
/// Off-screen endpoints of a crossing segment are replaced by synthetic
/// points on the boundary that carry the original index but not `KNOT`.
/// Runs entirely outside the region are dropped point by point.
pub fn clip_trace(arena: &mut PointArena, trace: Trace, region: &Region2D) -> Result<TraceList> {
    let style = trace.style();
    let refs: Vec<PointRef> = trace.refs(arena).collect();
    let mut out = TraceList::new();
    if let [only] = refs.as_slice() {
        if arena[*only].is_visible() {
            out.push(trace);
        }
        return Ok(out);
    }

    let mut current: Option<Trace> = None;
    for pair in refs.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        let (p_pos, q_pos) = (arena[p].position(), arena[q].position());
        match (arena[p].is_visible(), arena[q].is_visible()) {
            (true, true) => {
                let run = open_run(arena, &mut current, style, p);
                run.push(arena, q);
            }
            (true, false) => {
                let clipped = clip_line(region, p_pos, q_pos);
                open_run(arena, &mut current, style, p);
                if clipped.kept && clipped.q != p_pos {
                    let exit = boundary_point(arena, q, clipped.q)?;
                    if let Some(run) = current.as_mut() {
                        run.push(arena, exit);
                    }
                }
                out.extend(current.take());
            }
            (false, true) => {
                let clipped = clip_line(region, p_pos, q_pos);
                let mut run = Trace::new(style);
                if clipped.kept && clipped.p != q_pos {
                    let entry = boundary_point(arena, p, clipped.p)?;
                    run.push(arena, entry);
                }
                run.push(arena, q);
                current = Some(run);
            }
            (false, false) => {
                let clipped = clip_line(region, p_pos, q_pos);
                if clipped.kept && clipped.p != clipped.q {
                    let mut run = Trace::new(style);
                    let entry = boundary_point(arena, p, clipped.p)?;
                    let exit = boundary_point(arena, q, clipped.q)?;
                    run.push(arena, entry);
                    run.push(arena, exit);
                    out.push(run);
                }
            }
        }
    }
    out.extend(current);
    Ok(out)
}

/// Current run, starting a new one at `start` when none is open.
fn open_run<'a>(
    arena: &mut PointArena,
    current: &'a mut Option<Trace>,
    style: StyleId,
    start: PointRef,
) -> &'a mut Trace {
    current.get_or_insert_with(|| {
        let mut run = Trace::new(style);
        run.push(arena, start);
        run
    })
}

/// Clip one trace unless its pen draws no lines.
///
/// Traces drawn with a zero-width pen are passed through unclipped; only
/// their symbols are drawn. Empty traces are dropped.
pub fn clip_with_pen(
    arena: &mut PointArena,
    trace: Trace,
    region: &Region2D,
    palette: &PenPalette,
) -> Result<TraceList> {
    if trace.is_empty() {
        return Ok(TraceList::new());
    }
    if !palette.pen(trace.style()).draws_lines() {
        return Ok(vec![trace]);
    }
    clip_trace(arena, trace, region)
}

/// Clip every trace of a list.
pub fn clip_traces(
    arena: &mut PointArena,
    traces: TraceList,
    region: &Region2D,
    palette: &PenPalette,
) -> Result<TraceList> {
    let before = traces.len();
    let mut out = TraceList::with_capacity(before);
    for trace in traces {
        out.extend(clip_with_pen(arena, trace, region, palette)?);
    }
    tracing::debug!(before, after = out.len(), "clipped traces");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Pen;
    use crate::trace::tests::{coords, trace_from};

    fn region() -> Region2D {
        Region2D::new(0.0, 0.0, 10.0, 10.0)
    }

    fn prepared(arena: &mut PointArena, input: &[(f32, f32)]) -> Trace {
        let trace = trace_from(arena, input);
        let xs = [0.0; 0];
        mark_points(arena, std::slice::from_ref(&trace), &region(), &SeriesData::new(&xs, &xs));
        trace
    }

    #[test]
    fn marking_sets_visibility_and_symbols() {
        let mut arena = PointArena::points(16);
        let trace = prepared(&mut arena, &[(5.0, 5.0), (15.0, 5.0)]);
        let flags: Vec<PointFlags> = trace.points(&arena).map(|p| p.flags).collect();
        assert!(flags[0].contains(PointFlags::VISIBLE | PointFlags::SYMBOL));
        assert!(!flags[1].intersects(PointFlags::VISIBLE | PointFlags::SYMBOL));
    }

    #[test]
    fn marking_flags_active_knots() {
        let mut arena = PointArena::points(16);
        let trace = trace_from(&mut arena, &[(5.0, 5.0), (6.0, 5.0)]);
        let xs = [0.0; 2];
        let active = [1];
        let data = SeriesData::new(&xs, &xs).with_active(&active);
        mark_points(&mut arena, std::slice::from_ref(&trace), &region(), &data);
        let flags: Vec<bool> = trace
            .points(&arena)
            .map(|p| p.flags.contains(PointFlags::ACTIVE))
            .collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn marking_handles_large_unsorted_active_sets() {
        let mut arena = PointArena::points(512);
        let input: Vec<(f32, f32)> = (0..300).map(|i| ((i % 10) as f32, 5.0)).collect();
        let trace = trace_from(&mut arena, &input);
        let xs = vec![0.0; 300];
        let mut active: Vec<usize> = (0..300).rev().filter(|i| i % 3 == 0).collect();
        active.extend([0, 3, 6]);
        let data = SeriesData::new(&xs, &xs).with_active(&active);
        mark_points(&mut arena, std::slice::from_ref(&trace), &region(), &data);
        for point in trace.points(&arena) {
            assert_eq!(
                point.flags.contains(PointFlags::ACTIVE),
                point.index % 3 == 0,
                "index {}",
                point.index
            );
        }
    }

    #[test]
    fn visible_trace_is_unchanged() {
        let mut arena = PointArena::points(16);
        let input = [(1.0, 1.0), (5.0, 5.0), (9.0, 1.0)];
        let trace = prepared(&mut arena, &input);
        let traces = clip_trace(&mut arena, trace, &region()).expect("fits");
        assert_eq!(traces.len(), 1);
        assert_eq!(coords(&traces[0], &arena), input.to_vec());
    }

    #[test]
    fn excursion_splits_trace() {
        let mut arena = PointArena::points(32);
        let trace = prepared(
            &mut arena,
            &[(2.0, 5.0), (4.0, 5.0), (4.0, 15.0), (6.0, 5.0), (8.0, 5.0)],
        );
        let traces = clip_trace(&mut arena, trace, &region()).expect("fits");
        assert_eq!(traces.len(), 2);
        assert_eq!(coords(&traces[0], &arena), vec![(2.0, 5.0), (4.0, 5.0), (4.0, 10.0)]);
        assert_eq!(coords(&traces[1], &arena), vec![(5.0, 10.0), (6.0, 5.0), (8.0, 5.0)]);
        let exit = traces[0].points(&arena).last().expect("exit point");
        assert!(!exit.is_knot());
        assert!(exit.is_visible());
        assert_eq!(exit.index, 2);
    }

    #[test]
    fn offscreen_lead_is_dropped() {
        let mut arena = PointArena::points(32);
        let trace = prepared(
            &mut arena,
            &[(-20.0, 5.0), (-10.0, 5.0), (-5.0, 5.0), (5.0, 5.0)],
        );
        let traces = clip_trace(&mut arena, trace, &region()).expect("fits");
        assert_eq!(traces.len(), 1);
        assert_eq!(coords(&traces[0], &arena), vec![(0.0, 5.0), (5.0, 5.0)]);
    }

    #[test]
    fn crossing_segment_between_offscreen_points_survives() {
        let mut arena = PointArena::points(32);
        let trace = prepared(&mut arena, &[(-5.0, 5.0), (15.0, 5.0)]);
        let traces = clip_trace(&mut arena, trace, &region()).expect("fits");
        assert_eq!(traces.len(), 1);
        assert_eq!(coords(&traces[0], &arena), vec![(0.0, 5.0), (10.0, 5.0)]);
    }

    #[test]
    fn offscreen_single_point_is_dropped() {
        let mut arena = PointArena::points(8);
        let trace = prepared(&mut arena, &[(50.0, 5.0)]);
        assert!(clip_trace(&mut arena, trace, &region()).expect("fits").is_empty());
    }

    #[test]
    fn zero_width_pen_skips_clipping() {
        let mut arena = PointArena::points(16);
        let trace = prepared(&mut arena, &[(5.0, 5.0), (50.0, 5.0)]);
        let palette = PenPalette::new(Pen {
            line_width: 0.0,
            ..Pen::default()
        });
        let traces = clip_traces(&mut arena, vec![trace], &region(), &palette).expect("fits");
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].len(), 2);
        assert_eq!(traces[0].style(), StyleId::NORMAL);
    }
}
