//! trace_plot turns 2-D data series into screen-space traces ready to draw.
//! The pipeline splits series at holes, smooths, restyles by weight, clips to
//! the plot region, and generates area fills and error bars.

#![forbid(unsafe_code)]

#[macro_use]
mod flags;

pub mod area;
pub mod arena;
pub mod axis;
pub mod build;
pub mod clip;
pub mod config;
pub mod error;
pub mod errorbar;
pub mod geom;
#[cfg(feature = "gpui")]
pub mod gpui_backend;
pub mod mapper;
pub mod pipeline;
pub mod search;
pub mod series;
pub mod smooth;
mod spline;
pub mod split;
pub mod style;
pub mod trace;
pub mod transform;
pub mod view;

pub use arena::{Arena, ArenaRef, MAX_ARENA_ITEMS, PointArena, PointRef, SegmentArena, SegmentRef};
pub use axis::{AxisConfig, AxisMap, AxisScale};
pub use clip::{
    ClipFlags, ClipResult, clip_line, clip_polygon, point_in_polygon, project_point_to_segment,
};
pub use config::{PenDirection, Smoothing, TraceConfig};
pub use error::{Result, TraceError};
pub use geom::{Orientation, Point2D, Region2D};
pub use pipeline::SeriesTraces;
pub use search::{Nearest, area_contains, closest_point, closest_segment};
pub use series::{ErrorValues, SeriesData};
pub use style::{Pen, PenPalette, StyleBand, StyleId, WeightLookup};
pub use trace::{PointFlags, SegmentFlags, Trace, TraceList, TracePoint, TraceSegment};
pub use transform::Transform;
pub use view::Range;
