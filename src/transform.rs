//! Coordinate transforms between data and screen space.

use crate::axis::{AxisConfig, AxisMap, AxisScale};
use crate::geom::{Orientation, Point2D, Region2D};
use crate::view::Range;

const MIN_SPAN: f64 = 1e-12;

/// Affine (or log-affine) transform from data coordinates into a region.
#[derive(Debug, Clone)]
pub struct Transform {
    region: Region2D,
    x: AxisConfig,
    y: AxisConfig,
    x_axis: Range,
    y_axis: Range,
    orientation: Orientation,
}

impl Transform {
    /// Create a transform for the given axes and screen region.
    ///
    /// Returns `None` when the region is empty or a range is invalid for
    /// its scale.
    pub fn new(x: AxisConfig, y: AxisConfig, region: Region2D) -> Option<Self> {
        if !region.is_valid() {
            return None;
        }
        let x_axis = map_range(x.range().with_min_span(MIN_SPAN), x.scale())?;
        let y_axis = map_range(y.range().with_min_span(MIN_SPAN), y.scale())?;
        Some(Self {
            region,
            x,
            y,
            x_axis,
            y_axis,
            orientation: Orientation::Normal,
        })
    }

    /// Draw data x vertically and data y horizontally.
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.orientation = Orientation::from_inverted(inverted);
        self
    }

    /// Access the screen region.
    pub fn region(&self) -> Region2D {
        self.region
    }

    /// Access the orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    fn normalize(scale: AxisScale, axis: Range, value: f64) -> f64 {
        match scale.map_value(value) {
            Some(v) => (v - axis.min) / axis.span(),
            None => f64::NAN,
        }
    }
}

impl AxisMap for Transform {
    fn map(&self, x: f64, y: f64) -> Point2D {
        let x_norm = Self::normalize(self.x.scale(), self.x_axis, x);
        let y_norm = Self::normalize(self.y.scale(), self.y_axis, y);
        let region = self.region;
        match self.orientation {
            Orientation::Normal => Point2D::new(
                region.left + x_norm * region.width(),
                region.bottom - y_norm * region.height(),
            ),
            Orientation::Inverted => Point2D::new(
                region.left + y_norm * region.width(),
                region.bottom - x_norm * region.height(),
            ),
        }
    }

    fn x_axis(&self) -> AxisConfig {
        self.x
    }

    fn y_axis(&self) -> AxisConfig {
        self.y
    }

    fn is_inverted(&self) -> bool {
        self.orientation == Orientation::Inverted
    }
}

fn map_range(range: Range, scale: AxisScale) -> Option<Range> {
    if !scale.is_range_valid(range) {
        return None;
    }
    let min = scale.map_value(range.min)?;
    let max = scale.map_value(range.max)?;
    Some(Range::new(min, max))
}
