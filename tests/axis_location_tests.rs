use cartesian_chart::api::{Chart, ChartRenderer, resolve_axis_locations};
use cartesian_chart::core::{
    AutoRangeProvider, Axis, AxisId, AxisLocation, AxisScale, AxisSegment, AxisView, DataSeries,
    Rect, TableModel,
};

#[test]
fn zero_location_without_zero_in_range_resolves_to_minimum() {
    let x = Axis::new(AxisId::X).with_scale(AxisScale::Linear);
    let y1 = Axis::new(AxisId::Y1).with_location(AxisLocation::ZeroValue);
    let y2 = Axis::new(AxisId::Y2);
    let x_segments = [AxisSegment::new(5.0, 50.0, 80.0, 480.0)];
    let y_segments = [AxisSegment::new(5.0, 50.0, 360.0, 320.0)];

    let locations = resolve_axis_locations(
        AxisView::new(&x, &x_segments),
        AxisView::new(&y1, &y_segments),
        AxisView::new(&y2, &y_segments),
    );
    assert_eq!(locations[AxisId::Y1.index()], AxisLocation::MinimumValue);
}

#[test]
fn zero_location_on_negative_range_resolves_to_maximum() {
    let x = Axis::new(AxisId::X)
        .with_scale(AxisScale::Linear)
        .with_location(AxisLocation::ZeroValue);
    let y1 = Axis::new(AxisId::Y1);
    let y2 = Axis::new(AxisId::Y2);
    let x_segments = [AxisSegment::new(1.0, 2.0, 80.0, 480.0)];
    let y_segments = [AxisSegment::new(-50.0, -5.0, 360.0, 320.0)];

    let locations = resolve_axis_locations(
        AxisView::new(&x, &x_segments),
        AxisView::new(&y1, &y_segments),
        AxisView::new(&y2, &y_segments),
    );
    assert_eq!(locations[AxisId::X.index()], AxisLocation::MaximumValue);
}

#[test]
fn maximum_snaps_to_zero_when_companion_ends_at_zero() {
    let x = Axis::new(AxisId::X)
        .with_scale(AxisScale::Linear)
        .with_location(AxisLocation::MaximumValue);
    let y1 = Axis::new(AxisId::Y1);
    let y2 = Axis::new(AxisId::Y2);
    let x_segments = [AxisSegment::new(1.0, 2.0, 80.0, 480.0)];
    let y_segments = [AxisSegment::new(-50.0, 0.0, 360.0, 320.0)];

    let locations = resolve_axis_locations(
        AxisView::new(&x, &x_segments),
        AxisView::new(&y1, &y_segments),
        AxisView::new(&y2, &y_segments),
    );
    assert_eq!(locations[AxisId::X.index()], AxisLocation::ZeroValue);
}

#[test]
fn companion_without_segments_keeps_preference() {
    let x = Axis::new(AxisId::X).with_location(AxisLocation::ZeroValue);
    let y1 = Axis::new(AxisId::Y1).with_location(AxisLocation::MaximumValue);
    let y2 = Axis::new(AxisId::Y2);

    let locations = resolve_axis_locations(
        AxisView::new(&x, &[]),
        AxisView::new(&y1, &[]),
        AxisView::new(&y2, &[]),
    );
    assert_eq!(locations[AxisId::X.index()], AxisLocation::MinimumValue);
    assert_eq!(locations[AxisId::Y1.index()], AxisLocation::MaximumValue);
}

#[test]
fn render_pass_resolves_locations_before_drawing() {
    let model =
        TableModel::from_columns(vec![vec![5.0, 7.0, 9.0], vec![6.0, 8.0, 7.0]]).expect("table");
    let chart = Chart::scatter()
        .with_x_series_column(0)
        .with_axis(
            Axis::new(AxisId::Y1)
                .with_location(AxisLocation::ZeroValue)
                .with_range(5.0, 10.0),
        )
        .with_series(DataSeries::scatter(1));
    let provider = AutoRangeProvider::default();
    let renderer = ChartRenderer::new(&chart, &model, &provider, Rect::new(0.0, 0.0, 600.0, 400.0))
        .expect("renderer");

    let state = renderer.prepare().expect("prepare");
    let x_first = state.segments(AxisId::X)[0];
    assert!(x_first.value_min > 0.0);
    assert_eq!(state.location(AxisId::Y1), AxisLocation::MinimumValue);
    assert_eq!(state.location(AxisId::X), AxisLocation::MinimumValue);
}

#[test]
fn visible_secondary_axis_sits_at_maximum() {
    let model = TableModel::from_columns(vec![vec![1.0, 2.0], vec![10.0, 20.0]]).expect("table");
    let chart = Chart::category()
        .with_axis(Axis::new(AxisId::Y2).with_visible(true))
        .with_series(DataSeries::line(0))
        .with_series(DataSeries::line(1).on_axis(AxisId::Y2));
    let provider = AutoRangeProvider::default();
    let state = ChartRenderer::new(&chart, &model, &provider, Rect::new(0.0, 0.0, 600.0, 400.0))
        .expect("renderer")
        .prepare()
        .expect("prepare");

    assert_eq!(state.location(AxisId::Y1), AxisLocation::MinimumValue);
    assert_eq!(state.location(AxisId::Y2), AxisLocation::MaximumValue);
}
