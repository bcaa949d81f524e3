//! Region clipping and projection helpers.
//!
//! These are pure functions over screen-space coordinates. Line clipping uses
//! the Liang–Barsky parametric method, polygon clipping the Liang–Barsky
//! polygon variant that walks each polygon edge once against the whole
//! rectangle. Every function is total: degenerate input produces degenerate
//! output, never an error.

use crate::geom::{Point2D, Region2D};

bitset! {
    /// Which endpoints `clip_line` moved.
    pub struct ClipFlags: u8 {
        /// The first endpoint was moved onto the region boundary.
        const CLIPPED_LEFT = 1 << 0;
        /// The second endpoint was moved onto the region boundary.
        const CLIPPED_RIGHT = 1 << 1;
    }
}

/// Outcome of clipping a line segment against a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipResult {
    /// Whether any part of the segment lies inside the region.
    pub kept: bool,
    /// First endpoint, clipped when `CLIPPED_LEFT` is set.
    pub p: Point2D,
    /// Second endpoint, clipped when `CLIPPED_RIGHT` is set.
    pub q: Point2D,
    /// Which endpoints moved.
    pub flags: ClipFlags,
}

impl ClipResult {
    /// The clipped segment, if any part was kept.
    pub fn segment(&self) -> Option<(Point2D, Point2D)> {
        self.kept.then_some((self.p, self.q))
    }
}

/// Narrow the parametric window `[t1, t2]` against one half-plane.
///
/// `ds` is the directional derivative towards the outside, `dr` the signed
/// distance of the start point from the boundary (positive inside).
fn clip_test(ds: f64, dr: f64, t1: &mut f64, t2: &mut f64) -> bool {
    if ds < 0.0 {
        let t = dr / ds;
        if t > *t2 {
            return false;
        }
        if t > *t1 {
            *t1 = t;
        }
    } else if ds > 0.0 {
        let t = dr / ds;
        if t < *t1 {
            return false;
        }
        if t < *t2 {
            *t2 = t;
        }
    } else if dr < 0.0 {
        return false;
    }
    true
}

fn clamp_to(region: &Region2D, point: Point2D) -> Point2D {
    Point2D::new(
        point.x.clamp(region.left, region.right),
        point.y.clamp(region.top, region.bottom),
    )
}

/// Clip the segment `p`–`q` against a region.
pub fn clip_line(region: &Region2D, p: Point2D, q: Point2D) -> ClipResult {
    let mut t1 = 0.0;
    let mut t2 = 1.0;
    let dx = q.x - p.x;
    let dy = q.y - p.y;

    let kept = clip_test(-dx, p.x - region.left, &mut t1, &mut t2)
        && clip_test(dx, region.right - p.x, &mut t1, &mut t2)
        && clip_test(-dy, p.y - region.top, &mut t1, &mut t2)
        && clip_test(dy, region.bottom - p.y, &mut t1, &mut t2);

    if !kept {
        return ClipResult {
            kept: false,
            p,
            q,
            flags: ClipFlags::empty(),
        };
    }

    let mut flags = ClipFlags::empty();
    let mut out_p = p;
    let mut out_q = q;
    if t2 < 1.0 {
        out_q = clamp_to(region, Point2D::new(p.x + t2 * dx, p.y + t2 * dy));
        flags.insert(ClipFlags::CLIPPED_RIGHT);
    }
    if t1 > 0.0 {
        out_p = clamp_to(region, Point2D::new(p.x + t1 * dx, p.y + t1 * dy));
        flags.insert(ClipFlags::CLIPPED_LEFT);
    }
    ClipResult {
        kept: true,
        p: out_p,
        q: out_q,
        flags,
    }
}

/// Clip a polygon against a region.
///
/// The input is treated as a ring; a trailing vertex equal to the first is
/// allowed. The output ring is open (no closing duplicate) and may be
/// degenerate where the polygon runs along the region boundary.
pub fn clip_polygon(region: &Region2D, points: &[Point2D]) -> Vec<Point2D> {
    let mut ring = points;
    if ring.len() > 1 && ring.first() == ring.last() {
        ring = &ring[..ring.len() - 1];
    }
    let mut out = Vec::with_capacity(ring.len() * 2);
    if ring.is_empty() {
        return out;
    }

    let mut emit = |point: Point2D| {
        let point = clamp_to(region, point);
        if out.last() != Some(&point) {
            out.push(point);
        }
    };

    for (i, p) in ring.iter().enumerate() {
        let q = ring[(i + 1) % ring.len()];
        let mut dx = q.x - p.x;
        let mut dy = q.y - p.y;

        // Axis-aligned edges get a nudge so every edge has a finite slope.
        if dx.abs() < f64::EPSILON {
            dx = if p.x > region.left { -f64::EPSILON } else { f64::EPSILON };
        }
        if dy.abs() < f64::EPSILON {
            dy = if p.y > region.top { -f64::EPSILON } else { f64::EPSILON };
        }

        let (x_in, x_out) = if dx > 0.0 {
            (region.left, region.right)
        } else {
            (region.right, region.left)
        };
        let (y_in, y_out) = if dy > 0.0 {
            (region.top, region.bottom)
        } else {
            (region.bottom, region.top)
        };

        let t_in_x = (x_in - p.x) / dx;
        let t_in_y = (y_in - p.y) / dy;
        let (t_in1, t_in2) = if t_in_x < t_in_y {
            (t_in_x, t_in_y)
        } else {
            (t_in_y, t_in_x)
        };

        if t_in1 > 1.0 {
            continue;
        }
        if t_in1 > 0.0 {
            emit(Point2D::new(x_in, y_in));
        }
        if t_in2 > 1.0 {
            continue;
        }

        let t_out_x = (x_out - p.x) / dx;
        let t_out_y = (y_out - p.y) / dy;
        let t_out1 = t_out_x.min(t_out_y);
        if t_in2 <= 0.0 && t_out1 <= 0.0 {
            continue;
        }

        if t_in2 <= t_out1 {
            if t_in2 > 0.0 {
                if t_in_x > t_in_y {
                    emit(Point2D::new(x_in, p.y + t_in_x * dy));
                } else {
                    emit(Point2D::new(p.x + t_in_y * dx, y_in));
                }
            }
            if t_out1 < 1.0 {
                if t_out_x < t_out_y {
                    emit(Point2D::new(x_out, p.y + t_out_x * dy));
                } else {
                    emit(Point2D::new(p.x + t_out_y * dx, y_out));
                }
            } else {
                emit(q);
            }
        } else if t_in_x > t_in_y {
            emit(Point2D::new(x_in, y_out));
        } else {
            emit(Point2D::new(x_out, y_in));
        }
    }

    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Ray-casting parity test.
///
/// Each edge covers the half-open interval `[min_y, max_y)` so a scanline
/// through a shared vertex crosses exactly one of its edges.
pub fn point_in_polygon(point: Point2D, polygon: &[Point2D]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let (lo, hi) = if a.y <= b.y { (a, b) } else { (b, a) };
        if point.y >= lo.y && point.y < hi.y {
            let x = lo.x + (point.y - lo.y) * (hi.x - lo.x) / (hi.y - lo.y);
            if point.x < x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Closest point to `point` on the segment `p`–`q`.
///
/// The projection onto the infinite line is found by intersecting it with
/// the perpendicular through `point`, then clamped into the segment's
/// bounding box.
pub fn project_point_to_segment(point: Point2D, p: Point2D, q: Point2D) -> Point2D {
    let projected = if p.x == q.x {
        Point2D::new(p.x, point.y)
    } else if p.y == q.y {
        Point2D::new(point.x, p.y)
    } else {
        let m1 = (q.y - p.y) / (q.x - p.x);
        let b1 = p.y - p.x * m1;

        // Rotate q by 90 degrees about the midpoint to get the perpendicular.
        let mid_x = (p.x + q.x) * 0.5;
        let mid_y = (p.y + q.y) * 0.5;
        let rx = mid_x - (q.y - mid_y);
        let ry = mid_y + (q.x - mid_x);
        let m2 = (ry - mid_y) / (rx - mid_x);
        let b2 = point.y - point.x * m2;

        let x = (b2 - b1) / (m1 - m2);
        Point2D::new(x, m1 * x + b1)
    };
    Point2D::new(
        projected.x.clamp(p.x.min(q.x), p.x.max(q.x)),
        projected.y.clamp(p.y.min(q.y), p.y.max(q.y)),
    )
}
