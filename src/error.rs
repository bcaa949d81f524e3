//! Error types for the trace pipeline.

use thiserror::Error;

/// Errors that abort a trace rebuild.
///
/// Data-quality problems never surface here; they degrade the output
/// instead. The only fatal condition is running out of arena capacity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// An arena reached its item capacity.
    #[error("{arena} arena exhausted after {capacity} items")]
    ArenaExhausted {
        /// Which arena overflowed.
        arena: &'static str,
        /// Capacity that was reached.
        capacity: usize,
    },
}

/// Result type for trace pipeline operations.
pub type Result<T> = std::result::Result<T, TraceError>;
