//! Per-series pipeline configuration.

use crate::arena::MAX_ARENA_ITEMS;

/// Curve style used between knots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Smoothing {
    /// Straight segments.
    #[default]
    Linear,
    /// Staircase that holds the previous value.
    Step,
    /// Natural cubic spline over monotonic x.
    Natural,
    /// Shape-preserving quadratic spline over monotonic x.
    Quadratic,
    /// Natural cubic spline per axis over chord length.
    Parametric,
    /// Catmull-Rom spline per axis over chord length.
    CatmullRom,
}

/// Allowed direction of travel along data x within one trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PenDirection {
    /// Only increasing x; a step back starts a new trace.
    Increasing,
    /// Only decreasing x; a step forward starts a new trace.
    Decreasing,
    /// Any direction.
    #[default]
    Both,
}

impl PenDirection {
    fn allows_increasing(self) -> bool {
        matches!(self, Self::Increasing | Self::Both)
    }

    fn allows_decreasing(self) -> bool {
        matches!(self, Self::Decreasing | Self::Both)
    }

    /// Check whether moving from `last` to `next` breaks the trace.
    pub fn breaks(self, last: f64, next: f64) -> bool {
        (!self.allows_decreasing() && next < last) || (!self.allows_increasing() && next > last)
    }
}

/// Options controlling how a series is turned into traces.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceConfig {
    /// Curve style between knots.
    pub smoothing: Smoothing,
    /// Allowed direction of travel along x.
    pub pen_direction: PenDirection,
    /// Emit a fill polygon under each trace.
    pub fill_area: bool,
    /// Data-space y value the fill extends to. Defaults to the plot edge.
    pub fill_baseline: Option<f64>,
    /// Error-bar cap width overriding the pen's.
    pub error_bar_cap_width: Option<f32>,
    /// Item capacity of each arena.
    pub arena_capacity: usize,
}

impl TraceConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the curve style.
    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the pen direction.
    pub fn with_pen_direction(mut self, direction: PenDirection) -> Self {
        self.pen_direction = direction;
        self
    }

    /// Fill the area under each trace down to `baseline`, or to the plot edge.
    pub fn with_fill(mut self, baseline: Option<f64>) -> Self {
        self.fill_area = true;
        self.fill_baseline = baseline;
        self
    }

    /// Override the error-bar cap width.
    pub fn with_error_bar_cap_width(mut self, width: f32) -> Self {
        self.error_bar_cap_width = Some(width);
        self
    }

    /// Limit the number of items each arena may hold.
    pub fn with_arena_capacity(mut self, capacity: usize) -> Self {
        self.arena_capacity = capacity;
        self
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            smoothing: Smoothing::Linear,
            pen_direction: PenDirection::Both,
            fill_area: false,
            fill_baseline: None,
            error_bar_cap_width: None,
            arena_capacity: MAX_ARENA_ITEMS,
        }
    }
}
