//! Style splitter: breaks traces where the resolved pen changes.

use std::mem;

use crate::arena::{PointArena, PointRef};
use crate::error::Result;
use crate::series::SeriesData;
use crate::style::{StyleId, WeightLookup};
use crate::trace::{PointFlags, Trace, TraceList};

/// Pen of the sample at `index`. Samples without a weight use the normal pen.
pub fn resolve_style(data: &SeriesData<'_>, lookup: &impl WeightLookup, index: usize) -> StyleId {
    data.weight(index)
        .map_or(StyleId::NORMAL, |weight| lookup.lookup(weight))
}

/// Split one trace into runs that share a pen.
///
/// At every change a non-knot copy of the first point of the new run closes
/// the previous run, so both runs meet at the same location.
pub fn split_by_style(
    arena: &mut PointArena,
    trace: Trace,
    data: &SeriesData<'_>,
    lookup: &impl WeightLookup,
) -> Result<TraceList> {
    let refs: Vec<PointRef> = trace.refs(arena).collect();
    let Some(first) = refs.first() else {
        return Ok(TraceList::new());
    };
    if data.weights.is_none() {
        let mut trace = trace;
        trace.set_style(StyleId::NORMAL);
        return Ok(vec![trace]);
    }

    let styles: Vec<StyleId> = refs
        .iter()
        .map(|r| resolve_style(data, lookup, arena[*r].index))
        .collect();
    let mut out = TraceList::new();
    let mut current = Trace::new(resolve_style(data, lookup, arena[*first].index));
    for (k, point) in refs.iter().enumerate() {
        if k > 0 && styles[k] != styles[k - 1] {
            let boundary = arena.alloc_copy(*point, PointFlags::empty())?;
            current.push(arena, boundary);
            out.push(mem::replace(&mut current, Trace::new(styles[k])));
        }
        current.push(arena, *point);
    }
    out.push(current);
    Ok(out)
}

/// Split every trace of a list by pen.
pub fn split_traces(
    arena: &mut PointArena,
    traces: TraceList,
    data: &SeriesData<'_>,
    lookup: &impl WeightLookup,
) -> Result<TraceList> {
    let before = traces.len();
    let mut out = TraceList::with_capacity(before);
    for trace in traces {
        out.extend(split_by_style(arena, trace, data, lookup)?);
    }
    tracing::debug!(before, after = out.len(), "split traces by style");
    Ok(out)
}
