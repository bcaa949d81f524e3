use proptest::prelude::*;
use trace_plot::build::build_traces;
use trace_plot::{
    AxisConfig, AxisMap, PenDirection, PenPalette, Point2D, PointArena, Range, Region2D,
    SeriesData, SeriesTraces, Smoothing, StyleBand, StyleId, TraceConfig, WeightLookup,
    clip_line, clip_polygon,
};

/// Screen coordinates equal data coordinates.
struct Identity;

impl AxisMap for Identity {
    fn map(&self, x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn x_axis(&self) -> AxisConfig {
        AxisConfig::linear(Range::new(0.0, 10.0))
    }

    fn y_axis(&self) -> AxisConfig {
        AxisConfig::linear(Range::new(0.0, 10.0))
    }
}

fn region() -> Region2D {
    Region2D::new(0.0, 0.0, 10.0, 10.0)
}

fn rebuild(data: &SeriesData<'_>, config: &TraceConfig) -> SeriesTraces {
    let mut series = SeriesTraces::new();
    series
        .rebuild(data, &Identity, &region(), &PenPalette::default(), config)
        .expect("rebuild");
    series
}

fn trace_coords(series: &SeriesTraces) -> Vec<Vec<(f32, f32)>> {
    series
        .traces()
        .iter()
        .map(|trace| series.points(trace).map(|p| (p.x, p.y)).collect())
        .collect()
}

#[test]
fn hole_splits_series_and_keeps_lone_point() {
    let x = [0.0, 1.0, 2.0, 3.0];
    let y = [0.0, 1.0, f64::NAN, 3.0];
    let series = rebuild(&SeriesData::new(&x, &y), &TraceConfig::new());
    assert_eq!(
        trace_coords(&series),
        vec![vec![(0.0, 0.0), (1.0, 1.0)], vec![(3.0, 3.0)]]
    );
    assert_eq!(series.traces()[1].len(), 1);
}

#[test]
fn clip_line_moves_only_outside_endpoint() {
    let result = clip_line(&region(), Point2D::new(-5.0, 5.0), Point2D::new(5.0, 5.0));
    assert!(result.kept);
    assert_eq!(result.p, Point2D::new(0.0, 5.0));
    assert_eq!(result.q, Point2D::new(5.0, 5.0));
}

#[test]
fn last_registered_band_wins() {
    let mut palette = PenPalette::default();
    let a = palette.add_pen(Default::default());
    let b = palette.add_pen(Default::default());
    palette.add_band(StyleBand::new(0.0, 5.0, a));
    palette.add_band(StyleBand::new(3.0, 8.0, b));
    assert_eq!(palette.lookup(4.0), b);
    assert_eq!(palette.lookup(1.0), a);
    assert_eq!(palette.lookup(9.0), StyleId::NORMAL);
}

#[test]
fn enclosing_polygon_clips_to_region_corners() {
    let polygon = [
        Point2D::new(-2.0, -2.0),
        Point2D::new(12.0, -2.0),
        Point2D::new(12.0, 12.0),
        Point2D::new(-2.0, 12.0),
    ];
    let clipped = clip_polygon(&region(), &polygon);
    assert_eq!(clipped.len(), 4);
    for corner in region().corners() {
        assert!(clipped.contains(&corner), "missing corner {corner:?}");
    }
}

#[test]
fn step_smoothing_inserts_hold_point() {
    let x = [0.0, 2.0];
    let y = [0.0, 4.0];
    let config = TraceConfig::new().with_smoothing(Smoothing::Step);
    let series = rebuild(&SeriesData::new(&x, &y), &config);
    assert_eq!(
        trace_coords(&series),
        vec![vec![(0.0, 0.0), (2.0, 0.0), (2.0, 4.0)]]
    );
    let generated = series.points(&series.traces()[0]).nth(1).expect("hold point");
    assert!(!generated.is_knot());
}

#[test]
fn weighted_series_splits_by_pen() {
    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [1.0, 2.0, 3.0, 4.0];
    let weights = [1.0, 1.0, 6.0, 6.0];
    let mut palette = PenPalette::default();
    let low = palette.add_pen(Default::default());
    let high = palette.add_pen(Default::default());
    let palette = palette.with_band(0.0, 5.0, low).with_band(5.0, 10.0, high);
    let data = SeriesData::new(&x, &y).with_weights(&weights);
    let mut series = SeriesTraces::new();
    series
        .rebuild(&data, &Identity, &region(), &palette, &TraceConfig::new())
        .expect("rebuild");
    let styles: Vec<StyleId> = series.traces().iter().map(|t| t.style()).collect();
    assert_eq!(styles, vec![low, high]);
}

#[test]
fn increasing_pen_breaks_on_step_back() {
    let x = [1.0, 2.0, 1.5, 3.0];
    let y = [1.0, 1.0, 2.0, 2.0];
    let config = TraceConfig::new().with_pen_direction(PenDirection::Increasing);
    let series = rebuild(&SeriesData::new(&x, &y), &config);
    assert_eq!(
        trace_coords(&series),
        vec![vec![(1.0, 1.0), (2.0, 1.0)], vec![(1.5, 2.0), (3.0, 2.0)]]
    );
}

proptest! {
    #[test]
    fn traces_never_bridge_holes(
        samples in proptest::collection::vec(proptest::option::weighted(0.8, 0.0..10.0f64), 0..60)
    ) {
        let x: Vec<f64> = (0..samples.len()).map(|i| i as f64 * 0.1).collect();
        let y: Vec<f64> = samples.iter().map(|s| s.unwrap_or(f64::NAN)).collect();
        let data = SeriesData::new(&x, &y);
        let mut arena = PointArena::points(1024);
        let traces = build_traces(&mut arena, &data, &Identity, PenDirection::Both)
            .expect("fits");
        let mut seen = 0;
        for trace in &traces {
            let indices: Vec<usize> = trace.points(&arena).map(|p| p.index).collect();
            prop_assert!(!indices.is_empty());
            for point in trace.points(&arena) {
                prop_assert!(point.x.is_finite() && point.y.is_finite());
                prop_assert!(samples[point.index].is_some());
            }
            for pair in indices.windows(2) {
                prop_assert_eq!(pair[1], pair[0] + 1);
            }
            seen += indices.len();
        }
        prop_assert_eq!(seen, samples.iter().filter(|s| s.is_some()).count());
    }
}
