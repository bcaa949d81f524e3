//! Axis configuration, scaling, and the axis-mapping seam.

use crate::geom::Point2D;
use crate::view::Range;

/// Axis scale type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    /// Linear scaling.
    #[default]
    Linear,
    /// Base-10 logarithmic scaling.
    Log10,
    /// Time axis (mapped as linear values internally).
    Time,
}

impl AxisScale {
    /// Map a value into axis space.
    pub fn map_value(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match self {
            Self::Linear | Self::Time => Some(value),
            Self::Log10 => {
                if value <= 0.0 {
                    None
                } else {
                    Some(value.log10())
                }
            }
        }
    }

    /// Check whether this is a logarithmic scale.
    pub fn is_log(self) -> bool {
        matches!(self, Self::Log10)
    }

    /// Check whether a data value can be plotted on this scale.
    ///
    /// Non-finite values never can; log scales also reject values `<= 0`.
    pub fn accepts(self, value: f64) -> bool {
        self.map_value(value).is_some()
    }

    /// Check whether a data range is valid for this scale.
    pub fn is_range_valid(self, range: Range) -> bool {
        if !range.is_finite() {
            return false;
        }
        match self {
            Self::Linear | Self::Time => true,
            Self::Log10 => range.min > 0.0 && range.max > 0.0,
        }
    }
}

/// Axis metadata consumed by the trace pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    scale: AxisScale,
    range: Range,
}

impl AxisConfig {
    /// Create a new axis configuration.
    pub fn new(scale: AxisScale, range: Range) -> Self {
        Self { scale, range }
    }

    /// Create a linear axis over a range.
    pub fn linear(range: Range) -> Self {
        Self::new(AxisScale::Linear, range)
    }

    /// Create a log10 axis over a range.
    pub fn log10(range: Range) -> Self {
        Self::new(AxisScale::Log10, range)
    }

    /// Create a time axis over a range.
    pub fn time(range: Range) -> Self {
        Self::new(AxisScale::Time, range)
    }

    /// Access the axis scale.
    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Set the axis scale.
    pub fn with_scale(mut self, scale: AxisScale) -> Self {
        self.scale = scale;
        self
    }

    /// Access the visible data range.
    pub fn range(&self) -> Range {
        self.range
    }

    /// Set the visible data range.
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Check whether the axis is logarithmic.
    pub fn is_log(&self) -> bool {
        self.scale.is_log()
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::linear(Range::default())
    }
}

/// Mapping from data coordinates to screen space.
///
/// Owned by the axis layout; the pipeline only reads through it.
pub trait AxisMap {
    /// Map a data point to screen space.
    ///
    /// Values the axis cannot represent may map to non-finite coordinates.
    fn map(&self, x: f64, y: f64) -> Point2D;

    /// Metadata for the axis carrying data x.
    fn x_axis(&self) -> AxisConfig;

    /// Metadata for the axis carrying data y.
    fn y_axis(&self) -> AxisConfig;

    /// Whether data x is drawn vertically.
    fn is_inverted(&self) -> bool {
        false
    }
}

impl<T: AxisMap + ?Sized> AxisMap for &T {
    fn map(&self, x: f64, y: f64) -> Point2D {
        (**self).map(x, y)
    }

    fn x_axis(&self) -> AxisConfig {
        (**self).x_axis()
    }

    fn y_axis(&self) -> AxisConfig {
        (**self).y_axis()
    }

    fn is_inverted(&self) -> bool {
        (**self).is_inverted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_scale_rejects_non_positive() {
        let scale = AxisScale::Log10;
        assert!(scale.map_value(0.0).is_none());
        assert!(scale.map_value(-1.0).is_none());
        assert!(scale.map_value(1.0).is_some());
        assert!(!scale.accepts(f64::NAN));
    }

    #[test]
    fn linear_scale_accepts_negative() {
        assert!(AxisScale::Linear.accepts(-3.0));
        assert!(!AxisScale::Linear.accepts(f64::INFINITY));
    }

    #[test]
    fn log_range_validation() {
        assert!(AxisScale::Log10.is_range_valid(Range::new(1.0, 100.0)));
        assert!(!AxisScale::Log10.is_range_valid(Range::new(0.0, 100.0)));
        assert!(AxisScale::Linear.is_range_valid(Range::new(-1.0, 1.0)));
    }

    #[test]
    fn config_builders_replace_fields() {
        let config = AxisConfig::default()
            .with_scale(AxisScale::Log10)
            .with_range(Range::new(1.0, 1000.0));
        assert!(config.is_log());
        assert_eq!(config.range(), Range::new(1.0, 1000.0));
    }
}
