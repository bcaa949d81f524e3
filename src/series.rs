//! Borrowed input arrays of one plotted series.

use std::collections::HashSet;

/// Error values along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorValues<'a> {
    /// Symmetric deltas: the bar spans `value - e ..= value + e`.
    Symmetric(&'a [f64]),
    /// Absolute bounds per sample.
    Asymmetric {
        /// Lower bound per sample.
        low: &'a [f64],
        /// Upper bound per sample.
        high: &'a [f64],
    },
}

impl ErrorValues<'_> {
    /// Absolute `(low, high)` bounds around `value` at `index`.
    ///
    /// Either side is `None` when missing or non-finite.
    pub fn bounds(&self, index: usize, value: f64) -> (Option<f64>, Option<f64>) {
        let finite = |v: Option<&f64>| v.copied().filter(|v| v.is_finite());
        match self {
            Self::Symmetric(deltas) => match finite(deltas.get(index)) {
                Some(delta) if delta > 0.0 => (Some(value - delta), Some(value + delta)),
                _ => (None, None),
            },
            Self::Asymmetric { low, high } => (finite(low.get(index)), finite(high.get(index))),
        }
    }
}

/// Data arrays of one series.
///
/// Only the first `min(x.len(), y.len())` samples are plotted. Auxiliary
/// arrays may be shorter; missing entries count as absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesData<'a> {
    /// Data x values.
    pub x: &'a [f64],
    /// Data y values.
    pub y: &'a [f64],
    /// Per-sample weights selecting a pen.
    pub weights: Option<&'a [f64]>,
    /// Errors along x.
    pub x_error: Option<ErrorValues<'a>>,
    /// Errors along y.
    pub y_error: Option<ErrorValues<'a>>,
    /// Indices of highlighted samples, sorted or not.
    pub active: Option<&'a [usize]>,
}

impl<'a> SeriesData<'a> {
    /// Create a series from x and y arrays.
    pub fn new(x: &'a [f64], y: &'a [f64]) -> Self {
        Self {
            x,
            y,
            weights: None,
            x_error: None,
            y_error: None,
            active: None,
        }
    }

    /// Attach per-sample weights.
    pub fn with_weights(mut self, weights: &'a [f64]) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Attach errors along x.
    pub fn with_x_error(mut self, error: ErrorValues<'a>) -> Self {
        self.x_error = Some(error);
        self
    }

    /// Attach errors along y.
    pub fn with_y_error(mut self, error: ErrorValues<'a>) -> Self {
        self.y_error = Some(error);
        self
    }

    /// Mark samples as highlighted.
    pub fn with_active(mut self, active: &'a [usize]) -> Self {
        self.active = Some(active);
        self
    }

    /// Number of plottable samples.
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    /// Check whether there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Weight of a sample, if any.
    pub fn weight(&self, index: usize) -> Option<f64> {
        self.weights.and_then(|w| w.get(index).copied())
    }

    /// Indices of highlighted samples, collected for constant-time lookup.
    pub fn active_set(&self) -> HashSet<usize> {
        self.active.unwrap_or_default().iter().copied().collect()
    }

    /// Check whether any error array is attached.
    pub fn has_errors(&self) -> bool {
        self.x_error.is_some() || self.y_error.is_some()
    }
}
