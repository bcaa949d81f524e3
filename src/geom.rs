//! Geometric primitives used by the trace pipeline.
//!
//! All types in this module live in screen space. Data-space values are
//! plain `f64` slices handed to the pipeline by the caller.

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    /// Horizontal screen coordinate.
    pub x: f64,
    /// Vertical screen coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new screen point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Squared distance to another point.
    pub fn distance_sq(&self, other: Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// The visible plot rectangle in screen space.
///
/// `top` is numerically smaller than `bottom`, following screen conventions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region2D {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl Region2D {
    /// Create a region from its edges, normalizing swapped bounds.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: left.min(right),
            top: top.min(bottom),
            right: left.max(right),
            bottom: top.max(bottom),
        }
    }

    /// Region width.
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Region height.
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Check whether the region has positive area.
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Check whether a point lies inside the region, boundary included.
    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    /// The four corners, clockwise from the top-left.
    pub fn corners(&self) -> [Point2D; 4] {
        [
            Point2D::new(self.left, self.top),
            Point2D::new(self.right, self.top),
            Point2D::new(self.right, self.bottom),
            Point2D::new(self.left, self.bottom),
        ]
    }
}

/// Screen orientation of the data axes.
///
/// When inverted, data x runs vertically and data y horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Data x is horizontal.
    #[default]
    Normal,
    /// Data x is vertical.
    Inverted,
}

impl Orientation {
    /// Build an orientation from an inversion flag.
    pub fn from_inverted(inverted: bool) -> Self {
        if inverted { Self::Inverted } else { Self::Normal }
    }

    /// Coordinate along the screen axis that carries data x.
    pub fn along(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Normal => x,
            Self::Inverted => y,
        }
    }

    /// Coordinate along the screen axis that carries data y.
    pub fn across(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Normal => y,
            Self::Inverted => x,
        }
    }

    /// Rebuild a screen point from along/across coordinates.
    pub fn point(self, along: f64, across: f64) -> Point2D {
        match self {
            Self::Normal => Point2D::new(along, across),
            Self::Inverted => Point2D::new(across, along),
        }
    }

    /// Region bounds on the along axis as `(min, max)`.
    pub fn along_bounds(self, region: &Region2D) -> (f64, f64) {
        match self {
            Self::Normal => (region.left, region.right),
            Self::Inverted => (region.top, region.bottom),
        }
    }
}
