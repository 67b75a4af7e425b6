use cartesian_chart::api::{Chart, ChartRenderer};
use cartesian_chart::core::{
    AutoRangeProvider, Axis, AxisId, AxisRangeProvider, AxisSegment, AxisSegments, AxisView,
    DataSeries, RangeContext, Rect, TableModel, TickLabel,
};
use cartesian_chart::render::{DrawCommand, RecordingSurface};
use cartesian_chart::{ChartError, ChartResult};

fn broken_chart() -> (Chart, TableModel) {
    let model =
        TableModel::from_columns(vec![vec![1.0, 5.0, 95.0, 100.0, 3.0]]).expect("table");
    let chart = Chart::category()
        .with_axis(Axis::new(AxisId::Y1).with_break(10.0, 90.0))
        .with_series(DataSeries::line(0));
    (chart, model)
}

#[test]
fn break_splits_axis_and_series_into_clipped_segments() {
    let (chart, model) = broken_chart();
    let provider = AutoRangeProvider::default();
    let renderer = ChartRenderer::new(&chart, &model, &provider, Rect::new(0.0, 0.0, 600.0, 400.0))
        .expect("renderer");
    let mut surface = RecordingSurface::new();
    let state = renderer.render(&mut surface).expect("render");

    let y_segments = state.segments(AxisId::Y1);
    assert_eq!(y_segments.len(), 2);
    assert!(y_segments[0].value_max <= 10.0);
    assert!(y_segments[1].value_min >= 90.0);

    // One line per Y segment, plus the closing and opening break glyphs.
    assert_eq!(surface.paths().count(), 4);

    let clips: Vec<Rect> = surface
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Clip { rect } => Some(*rect),
            _ => None,
        })
        .collect();
    assert_eq!(clips.len(), 2);
    assert_ne!(clips[0], clips[1]);
    assert!(clips[1].bottom() <= clips[0].top());
    surface.validate().expect("balanced");
}

#[test]
fn segment_margin_separates_break_segments() {
    let (chart, model) = broken_chart();
    let chart = chart.with_segment_margin(60.0);
    let provider = AutoRangeProvider::default();
    let state = ChartRenderer::new(&chart, &model, &provider, Rect::new(0.0, 0.0, 600.0, 400.0))
        .expect("renderer")
        .prepare()
        .expect("prepare");

    let segments = state.segments(AxisId::Y1);
    let lower_top = segments[0].render_start - segments[0].render_length;
    assert!((lower_top - segments[1].render_start - 60.0).abs() <= 1e-9);
    let total: f64 = segments.iter().map(|s| s.render_length).sum();
    assert!((total + 60.0 - state.plot_rect.height).abs() <= 1e-9);
}

/// Delegates to the automatic provider but leaves the primary Y axis empty.
struct NoPrimaryAxis(AutoRangeProvider);

impl AxisRangeProvider for NoPrimaryAxis {
    fn prepare_segments(&self, axis: &Axis, context: &RangeContext) -> ChartResult<AxisSegments> {
        if axis.id == AxisId::Y1 {
            return Ok(AxisSegments::new());
        }
        self.0.prepare_segments(axis, context)
    }

    fn label_ticks(&self, axis: AxisView<'_>, segment: usize, out: &mut Vec<TickLabel>) {
        self.0.label_ticks(axis, segment, out);
    }
}

#[test]
fn axis_without_segments_draws_no_series() {
    let (chart, model) = broken_chart();
    let provider = NoPrimaryAxis(AutoRangeProvider::default());
    let renderer = ChartRenderer::new(&chart, &model, &provider, Rect::new(0.0, 0.0, 600.0, 400.0))
        .expect("renderer");
    let mut surface = RecordingSurface::new();
    let state = renderer.render(&mut surface).expect("render");

    assert!(state.segments(AxisId::Y1).is_empty());
    assert_eq!(surface.paths().count(), 0);
    assert!(surface.texts().any(|text| text == "0"));
    surface.validate().expect("balanced");
}

/// Returns a segment with a negative render length for every axis.
struct NegativeLength;

impl AxisRangeProvider for NegativeLength {
    fn prepare_segments(&self, _axis: &Axis, _context: &RangeContext) -> ChartResult<AxisSegments> {
        let mut segments = AxisSegments::new();
        segments.push(AxisSegment::new(0.0, 1.0, 0.0, -10.0));
        Ok(segments)
    }

    fn label_ticks(&self, _axis: AxisView<'_>, _segment: usize, _out: &mut Vec<TickLabel>) {}
}

#[test]
fn negative_segment_length_is_an_invariant_violation() {
    let (chart, model) = broken_chart();
    let renderer =
        ChartRenderer::new(&chart, &model, &NegativeLength, Rect::new(0.0, 0.0, 600.0, 400.0))
            .expect("renderer");
    let mut surface = RecordingSurface::new();
    let err = renderer.render(&mut surface).expect_err("negative length");
    assert!(matches!(err, ChartError::InvariantViolation(_)));
    assert!(surface.commands().is_empty());
}

#[test]
fn break_outside_the_range_is_ignored() {
    let model = TableModel::from_columns(vec![vec![1.0, 2.0, 3.0]]).expect("table");
    let chart = Chart::category()
        .with_axis(Axis::new(AxisId::Y1).with_range(0.0, 5.0).with_break(10.0, 20.0))
        .with_series(DataSeries::line(0));
    let provider = AutoRangeProvider::default();
    let state = ChartRenderer::new(&chart, &model, &provider, Rect::new(0.0, 0.0, 600.0, 400.0))
        .expect("renderer")
        .prepare()
        .expect("prepare");
    assert_eq!(state.segments(AxisId::Y1).len(), 1);
}
