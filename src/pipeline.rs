//! Per-series trace storage and the rebuild pipeline.

use crate::area::{fill_baseline, fill_polygon};
use crate::arena::{PointArena, SegmentArena};
use crate::axis::AxisMap;
use crate::build::build_traces;
use crate::config::TraceConfig;
use crate::error::Result;
use crate::errorbar::{bar_knots, error_bars};
use crate::geom::{Orientation, Region2D};
use crate::mapper::{clip_with_pen, mark_points};
use crate::series::SeriesData;
use crate::smooth::smooth_traces;
use crate::split::split_traces;
use crate::style::PenPalette;
use crate::trace::{Trace, TraceList, TracePoint, TraceSegment};

/// Screen-space traces for one series, with the arenas backing them.
///
/// Each rebuild discards the previous result. Arena capacity comes from the
/// [`TraceConfig`] passed to [`SeriesTraces::rebuild`].
#[derive(Debug, Clone)]
pub struct SeriesTraces {
    points: PointArena,
    segments: SegmentArena,
    traces: TraceList,
    region: Option<Region2D>,
}

impl Default for SeriesTraces {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesTraces {
    /// Create empty storage.
    pub fn new() -> Self {
        let capacity = TraceConfig::default().arena_capacity;
        Self {
            points: PointArena::points(capacity),
            segments: SegmentArena::segments(capacity),
            traces: TraceList::new(),
            region: None,
        }
    }

    /// Regenerate every trace of the series.
    ///
    /// On error the storage is left empty.
    pub fn rebuild(
        &mut self,
        data: &SeriesData<'_>,
        axes: &impl AxisMap,
        region: &Region2D,
        palette: &PenPalette,
        config: &TraceConfig,
    ) -> Result<()> {
        self.clear();
        self.points.set_capacity(config.arena_capacity);
        self.segments.set_capacity(config.arena_capacity);
        if !region.is_valid() || data.is_empty() {
            return Ok(());
        }
        self.region = Some(*region);
        match self.run(data, axes, region, palette, config) {
            Ok(traces) => {
                self.traces = traces;
                tracing::debug!(
                    traces = self.traces.len(),
                    points = self.points.len(),
                    segments = self.segments.len(),
                    "rebuilt series traces"
                );
                Ok(())
            }
            Err(err) => {
                tracing::debug!(error = %err, "series rebuild failed");
                self.clear();
                Err(err)
            }
        }
    }

    fn run(
        &mut self,
        data: &SeriesData<'_>,
        axes: &impl AxisMap,
        region: &Region2D,
        palette: &PenPalette,
        config: &TraceConfig,
    ) -> Result<TraceList> {
        let orientation = Orientation::from_inverted(axes.is_inverted());
        let points = &mut self.points;

        let mut traces = build_traces(points, data, axes, config.pen_direction)?;
        smooth_traces(points, &mut traces, config.smoothing, orientation, region)?;
        let traces = split_traces(points, traces, data, palette)?;
        mark_points(points, &traces, region, data);

        let before = traces.len();
        let mut out = TraceList::with_capacity(before);
        for trace in traces {
            // Bars hang off every knot, so collect them before clipping drops any.
            let knots = if data.has_errors() {
                bar_knots(points, &trace)
            } else {
                Vec::new()
            };
            let style = trace.style();
            let mut runs = clip_with_pen(points, trace, region, palette)?;
            if !knots.is_empty() {
                let cap_width = config
                    .error_bar_cap_width
                    .unwrap_or_else(|| palette.pen(style).cap_width());
                if runs.is_empty() {
                    runs.push(Trace::new(style));
                }
                let target = &mut runs[0];
                error_bars(&mut self.segments, &knots, target, data, axes, region, cap_width)?;
            }
            out.extend(
                runs.into_iter()
                    .filter(|run| !run.is_empty() || run.segment_count() > 0),
            );
        }
        tracing::debug!(before, after = out.len(), "clipped traces");

        if config.fill_area {
            let baseline = fill_baseline(axes, region, config.fill_baseline);
            for trace in out.iter_mut().filter(|trace| !trace.is_empty()) {
                let polygon = fill_polygon(points, trace, region, orientation, baseline);
                trace.set_fill(polygon);
            }
        }
        Ok(out)
    }

    /// Drop every trace and release arena items.
    pub fn clear(&mut self) {
        self.points.reset();
        self.segments.reset();
        self.traces.clear();
        self.region = None;
    }

    /// Traces from the last rebuild.
    ///
    /// A trace whose points all fall outside the region may remain with no
    /// points, carrying only the error bars that reach into the region.
    /// Traces index this storage's arenas and are only meaningful until the
    /// next rebuild or [`SeriesTraces::clear`].
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Points of one trace, in drawing order.
    pub fn points<'a>(
        &'a self,
        trace: &Trace,
    ) -> impl Iterator<Item = &'a TracePoint> + use<'a> {
        trace.points(&self.points)
    }

    /// Error-bar segments of one trace.
    pub fn segments<'a>(
        &'a self,
        trace: &Trace,
    ) -> impl Iterator<Item = &'a TraceSegment> + use<'a> {
        trace.segments(&self.segments)
    }

    /// Backing point arena.
    pub fn point_arena(&self) -> &PointArena {
        &self.points
    }

    /// Backing segment arena.
    pub fn segment_arena(&self) -> &SegmentArena {
        &self.segments
    }

    /// Region of the last successful rebuild.
    pub fn region(&self) -> Option<Region2D> {
        self.region
    }
}
