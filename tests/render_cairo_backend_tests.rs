#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use cartesian_chart::ChartError;
use cartesian_chart::api::{Chart, render_chart};
use cartesian_chart::core::{Axis, AxisId, DataSeries, MarkerKind, Rect, TableModel};
use cartesian_chart::render::{CairoSurface, render_to_png};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn sample() -> (Chart, TableModel) {
    let model = TableModel::from_columns(vec![vec![10.0, 20.0, 15.0], vec![5.0, 2.0, 8.0]])
        .expect("table")
        .with_headers(["north", "south"]);
    let chart = Chart::category()
        .with_title("Sales")
        .with_legend(true)
        .with_axis(Axis::new(AxisId::Y1).with_title("units"))
        .with_series(DataSeries::bar(0))
        .with_series(DataSeries::line(1).with_marker(MarkerKind::Circle).with_labels(true));
    (chart, model)
}

#[test]
fn png_export_rejects_empty_surface() {
    let (chart, model) = sample();
    let mut out = Vec::new();
    let err = render_to_png(&chart, &model, 0, 480, &mut out).expect_err("zero width");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
    assert!(out.is_empty());
}

#[test]
fn png_export_writes_an_image() {
    let (chart, model) = sample();
    let mut out = Vec::new();
    render_to_png(&chart, &model, 640, 400, &mut out).expect("png");
    assert!(out.len() > PNG_SIGNATURE.len());
    assert_eq!(out[..8], PNG_SIGNATURE);
}

#[test]
fn cairo_surface_draws_on_external_context() {
    let (chart, model) = sample();
    let image = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&image).expect("context");
    {
        let mut surface = CairoSurface::new(&context);
        let state = render_chart(&chart, &model, &mut surface, Rect::new(20.0, 10.0, 560.0, 300.0))
            .expect("render on context");
        assert_eq!(state.drawing_rect, Rect::new(20.0, 10.0, 560.0, 300.0));
    }
    let matrix = context.matrix();
    assert_eq!((matrix.x0(), matrix.y0()), (0.0, 0.0));
}
