//! Trace building: raw data arrays to knot-point traces.

use crate::arena::PointArena;
use crate::axis::AxisMap;
use crate::config::PenDirection;
use crate::error::Result;
use crate::series::SeriesData;
use crate::style::StyleId;
use crate::trace::{PointFlags, Trace, TraceList};

/// Map a series to screen space and cut it into traces.
///
/// A sample is a hole when either coordinate is non-finite, invalid for a
/// log axis, or maps to a non-finite screen position. Holes are dropped
/// and end the current trace. A trace also ends where `direction` forbids
/// the step in data x.
///
/// The direction always compares data x, never screen coordinates. With
/// inverted axes data x is drawn vertically and grows upward, so an
/// increasing pen breaks where the data x values reverse even though screen
/// y falls along the whole run.
pub fn build_traces(
    arena: &mut PointArena,
    data: &SeriesData<'_>,
    axes: &impl AxisMap,
    direction: PenDirection,
) -> Result<TraceList> {
    let x_scale = axes.x_axis().scale();
    let y_scale = axes.y_axis().scale();
    let mut traces = TraceList::new();
    let mut current: Option<Trace> = None;
    let mut last_x = 0.0;
    let mut holes = 0usize;

    for index in 0..data.len() {
        let (x, y) = (data.x[index], data.y[index]);
        let screen = if x_scale.accepts(x) && y_scale.accepts(y) {
            let screen = axes.map(x, y);
            let (sx, sy) = (screen.x as f32, screen.y as f32);
            (sx.is_finite() && sy.is_finite()).then_some((sx, sy))
        } else {
            None
        };
        let Some((sx, sy)) = screen else {
            holes += 1;
            traces.extend(current.take());
            continue;
        };

        if current.is_some() && direction.breaks(last_x, x) {
            traces.extend(current.take());
        }
        let trace = current.get_or_insert_with(|| Trace::new(StyleId::NORMAL));
        let point = arena.alloc_point(sx, sy, index, PointFlags::KNOT)?;
        trace.push(arena, point);
        last_x = x;
    }
    traces.extend(current.take());

    tracing::debug!(
        samples = data.len(),
        holes,
        traces = traces.len(),
        "built traces"
    );
    Ok(traces)
}
