//! Trace records: arena-linked point lists and error-bar segment lists.
//!
//! A [`Trace`] owns nothing itself. It holds head/tail references into a
//! [`PointArena`], so splitting or truncating a trace is a relink of a
//! single `next` field.

use crate::arena::{PointArena, PointRef, SegmentArena, SegmentRef};
use crate::geom::Point2D;
use crate::style::StyleId;

bitset! {
    /// Per-point rendering markers.
    pub struct PointFlags: u8 {
        /// The point lies inside the plot region.
        const VISIBLE = 1 << 0;
        /// The point maps 1:1 to an original data sample.
        const KNOT = 1 << 1;
        /// A symbol should be drawn at the point.
        const SYMBOL = 1 << 2;
        /// The point is highlighted.
        const ACTIVE = 1 << 3;
    }
}

bitset! {
    /// Per-segment error-bar markers.
    pub struct SegmentFlags: u8 {
        /// Lower bound on the x axis.
        const X_LOW = 1 << 0;
        /// Upper bound on the x axis.
        const X_HIGH = 1 << 1;
        /// Lower bound on the y axis.
        const Y_LOW = 1 << 2;
        /// Upper bound on the y axis.
        const Y_HIGH = 1 << 3;
        /// The segment survived clipping.
        const VISIBLE = 1 << 4;
    }
}

/// A screen-space point in a trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    /// Screen x.
    pub x: f32,
    /// Screen y.
    pub y: f32,
    /// Index of the originating data sample.
    pub index: usize,
    /// Rendering markers.
    pub flags: PointFlags,
    /// Next point in the trace.
    pub next: Option<PointRef>,
}

impl TracePoint {
    /// Position as a double-precision point.
    pub fn position(&self) -> Point2D {
        Point2D::new(self.x as f64, self.y as f64)
    }

    /// Check whether the point is an original data sample.
    pub fn is_knot(&self) -> bool {
        self.flags.contains(PointFlags::KNOT)
    }

    /// Check whether the point lies inside the plot region.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(PointFlags::VISIBLE)
    }
}

/// An error-bar stem or cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSegment {
    /// Start x.
    pub x1: f32,
    /// Start y.
    pub y1: f32,
    /// End x.
    pub x2: f32,
    /// End y.
    pub y2: f32,
    /// Index of the data sample the bar belongs to.
    pub index: usize,
    /// Which bound the segment draws.
    pub flags: SegmentFlags,
    /// Next segment in the list.
    pub next: Option<SegmentRef>,
}

impl TraceSegment {
    /// Segment endpoints as double-precision points.
    pub fn endpoints(&self) -> (Point2D, Point2D) {
        (
            Point2D::new(self.x1 as f64, self.y1 as f64),
            Point2D::new(self.x2 as f64, self.y2 as f64),
        )
    }
}

/// A maximal run of contiguous points drawn with one pen.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    head: Option<PointRef>,
    tail: Option<PointRef>,
    count: usize,
    style: StyleId,
    fill: Vec<Point2D>,
    segments: Option<SegmentRef>,
    segments_tail: Option<SegmentRef>,
    segment_count: usize,
    recount: bool,
}

/// Ordered traces of one plotted series.
pub type TraceList = Vec<Trace>;

impl Trace {
    /// Create an empty trace drawn with `style`.
    pub fn new(style: StyleId) -> Self {
        Self {
            head: None,
            tail: None,
            count: 0,
            style,
            fill: Vec::new(),
            segments: None,
            segments_tail: None,
            segment_count: 0,
            recount: false,
        }
    }

    /// First point.
    pub fn head(&self) -> Option<PointRef> {
        self.head
    }

    /// Last point.
    pub fn tail(&self) -> Option<PointRef> {
        self.tail
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check whether the trace has no points.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Resolved pen.
    pub fn style(&self) -> StyleId {
        self.style
    }

    /// Change the resolved pen.
    pub fn set_style(&mut self, style: StyleId) {
        self.style = style;
    }

    /// Closed fill polygon, empty when no area is drawn.
    pub fn fill(&self) -> &[Point2D] {
        &self.fill
    }

    /// Replace the fill polygon.
    pub fn set_fill(&mut self, fill: Vec<Point2D>) {
        self.fill = fill;
    }

    /// Number of error-bar segments.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Check whether the point count is stale.
    pub fn needs_recount(&self) -> bool {
        self.recount
    }

    /// Append an unlinked point.
    pub fn push(&mut self, arena: &mut PointArena, point: PointRef) {
        arena[point].next = None;
        match self.tail {
            Some(tail) => arena[tail].next = Some(point),
            None => self.head = Some(point),
        }
        self.tail = Some(point);
        self.count += 1;
    }

    /// Splice the chain `first..=last` in after `after`.
    ///
    /// The chain must already be linked internally. The point count is
    /// marked stale rather than updated.
    pub fn splice_after(
        &mut self,
        arena: &mut PointArena,
        after: PointRef,
        first: PointRef,
        last: PointRef,
    ) {
        let next = arena[after].next;
        arena[after].next = Some(first);
        arena[last].next = next;
        if self.tail == Some(after) {
            self.tail = Some(last);
        }
        self.recount = true;
    }

    /// Recompute the point count by walking the list.
    pub fn recount(&mut self, arena: &PointArena) {
        self.count = self.refs(arena).count();
        self.recount = false;
    }

    /// Iterate point references in order.
    pub fn refs<'a>(&self, arena: &'a PointArena) -> PointRefs<'a> {
        PointRefs {
            arena,
            next: self.head,
        }
    }

    /// Iterate points in order.
    pub fn points<'a>(
        &self,
        arena: &'a PointArena,
    ) -> impl Iterator<Item = &'a TracePoint> + use<'a> {
        self.refs(arena).map(move |r| &arena[r])
    }

    /// Append a segment to the error-bar list.
    pub fn push_segment(&mut self, arena: &mut SegmentArena, segment: SegmentRef) {
        arena[segment].next = None;
        match self.segments_tail {
            Some(tail) => arena[tail].next = Some(segment),
            None => self.segments = Some(segment),
        }
        self.segments_tail = Some(segment);
        self.segment_count += 1;
    }

    /// Iterate error-bar segments in order.
    pub fn segments<'a>(
        &self,
        arena: &'a SegmentArena,
    ) -> impl Iterator<Item = &'a TraceSegment> + use<'a> {
        let mut next = self.segments;
        std::iter::from_fn(move || {
            let current = next?;
            let segment = &arena[current];
            next = segment.next;
            Some(segment)
        })
    }
}

/// Iterator over the point references of a trace.
#[derive(Debug, Clone)]
pub struct PointRefs<'a> {
    arena: &'a PointArena,
    next: Option<PointRef>,
}

impl Iterator for PointRefs<'_> {
    type Item = PointRef;

    fn next(&mut self) -> Option<PointRef> {
        let current = self.next?;
        self.next = self.arena[current].next;
        Some(current)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn trace_from(arena: &mut PointArena, coords: &[(f32, f32)]) -> Trace {
        let mut trace = Trace::new(StyleId::NORMAL);
        for (index, (x, y)) in coords.iter().enumerate() {
            let point = arena
                .alloc_point(*x, *y, index, PointFlags::KNOT)
                .expect("capacity available");
            trace.push(arena, point);
        }
        trace
    }

    pub(crate) fn coords(trace: &Trace, arena: &PointArena) -> Vec<(f32, f32)> {
        trace.points(arena).map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn push_links_in_order() {
        let mut arena = PointArena::points(16);
        let trace = trace_from(&mut arena, &[(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
        assert_eq!(trace.len(), 3);
        assert_eq!(coords(&trace, &arena), vec![(0.0, 0.0), (1.0, 1.0), (2.0, 4.0)]);
    }

    #[test]
    fn splice_marks_recount() {
        let mut arena = PointArena::points(16);
        let mut trace = trace_from(&mut arena, &[(0.0, 0.0), (2.0, 2.0)]);
        let head = trace.head().expect("head");
        let a = arena
            .alloc_point(1.0, 1.0, 0, PointFlags::empty())
            .expect("capacity available");
        trace.splice_after(&mut arena, head, a, a);
        assert!(trace.needs_recount());
        trace.recount(&arena);
        assert_eq!(trace.len(), 3);
        assert_eq!(coords(&trace, &arena)[1], (1.0, 1.0));
    }
}
