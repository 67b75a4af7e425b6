use approx::assert_abs_diff_eq;
use cartesian_chart::api::{
    BarSlot, Chart, bar_group_count, bar_group_indices, bar_slots, render_chart,
};
use cartesian_chart::core::{DataSeries, Rect, TableModel};
use cartesian_chart::render::{DrawCommand, RecordingSurface};

#[test]
fn group_counter_advances_at_each_new_bar_cluster() {
    let series = vec![
        DataSeries::bar(0),
        DataSeries::bar(1).stacked(),
        DataSeries::line(2),
        DataSeries::bar(3),
        DataSeries::bar(4),
    ];
    assert_eq!(bar_group_count(&series), 2);
    assert_eq!(
        bar_group_indices(&series),
        vec![Some(0), Some(0), None, Some(1), Some(1)]
    );

    // The second cluster holds two unstacked runs, side by side.
    let slots = bar_slots(&series);
    assert_eq!(
        slots,
        vec![
            Some(BarSlot { group: 0, slot: 0, slot_count: 1 }),
            None,
            Some(BarSlot { group: 1, slot: 0, slot_count: 2 }),
            Some(BarSlot { group: 1, slot: 1, slot_count: 2 }),
        ]
    );
}

#[test]
fn consecutive_unstacked_bars_share_one_cluster() {
    let series = vec![DataSeries::bar(0), DataSeries::bar(1), DataSeries::line(2)];
    assert_eq!(bar_group_count(&series), 1);
    assert_eq!(bar_group_indices(&series), vec![Some(0), Some(0), None]);
    assert_eq!(
        bar_slots(&series)[1],
        Some(BarSlot { group: 0, slot: 1, slot_count: 2 })
    );
}

#[test]
fn line_stacked_on_bars_joins_their_group() {
    let series = vec![DataSeries::line(0), DataSeries::bar(1).stacked()];
    assert_eq!(bar_group_indices(&series), vec![None, Some(0)]);
    assert_eq!(bar_group_count(&[DataSeries::line(0)]), 0);
}

fn bar_rects(surface: &RecordingSurface) -> Vec<Rect> {
    surface
        .paths()
        .filter_map(|path| Rect::bounding(&path.vertices()))
        .collect()
}

#[test]
fn side_by_side_bars_split_the_category_width() {
    let model = TableModel::from_columns(vec![vec![4.0, 2.0], vec![3.0, 1.0]]).expect("table");
    let chart = Chart::category()
        .with_series(DataSeries::bar(0))
        .with_series(DataSeries::bar(1));
    let mut surface = RecordingSurface::new();
    let state = render_chart(&chart, &model, &mut surface, Rect::new(0.0, 0.0, 600.0, 400.0))
        .expect("render");

    // Two rows over 480 px: one category is 240 px, bars cover 0.8 of it.
    let rects = bar_rects(&surface);
    assert_eq!(rects.len(), 4);
    for rect in &rects {
        assert_abs_diff_eq!(rect.width, 96.0, epsilon = 1e-9);
    }
    let first_row_left = 80.0 + 120.0 - 96.0;
    assert_abs_diff_eq!(rects[0].x, first_row_left, epsilon = 1e-9);
    assert_abs_diff_eq!(rects[2].x, first_row_left + 96.0, epsilon = 1e-9);

    let plot = state.device_plot_rect();
    for rect in &rects {
        assert!(rect.bottom() <= plot.bottom() + 1e-9);
    }
}

#[test]
fn stacked_bars_share_a_slot_and_touch() {
    let model = TableModel::from_columns(vec![vec![4.0], vec![3.0]]).expect("table");
    let chart = Chart::category()
        .with_series(DataSeries::bar(0))
        .with_series(DataSeries::bar(1).stacked());
    let mut surface = RecordingSurface::new();
    render_chart(&chart, &model, &mut surface, Rect::new(0.0, 0.0, 600.0, 400.0))
        .expect("render");

    let rects = bar_rects(&surface);
    assert_eq!(rects.len(), 2);
    assert_abs_diff_eq!(rects[0].x, rects[1].x, epsilon = 1e-9);
    assert_abs_diff_eq!(rects[0].top(), rects[1].bottom(), epsilon = 1e-9);

    let fills: Vec<_> = surface
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Path { brush, .. } => Some(*brush),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![chart.series[0].brush, chart.series[1].brush]);
}

#[test]
fn clusters_split_the_category_before_their_slots() {
    let model = TableModel::from_columns(vec![vec![4.0], vec![3.0], vec![2.0], vec![5.0], vec![1.0]])
        .expect("table");
    let chart = Chart::category()
        .with_series(DataSeries::bar(0))
        .with_series(DataSeries::bar(1).stacked())
        .with_series(DataSeries::line(2))
        .with_series(DataSeries::bar(3))
        .with_series(DataSeries::bar(4));
    let mut surface = RecordingSurface::new();
    render_chart(&chart, &model, &mut surface, Rect::new(0.0, 0.0, 600.0, 400.0))
        .expect("render");

    // One row over 480 px: bars cover 384 px, 192 px per cluster.
    let rects: Vec<Rect> = bar_rects(&surface)
        .into_iter()
        .filter(|rect| rect.width > 1.0)
        .collect();
    assert_eq!(rects.len(), 4);
    let left = 80.0 + 240.0 - 192.0;
    assert_abs_diff_eq!(rects[0].x, left, epsilon = 1e-9);
    assert_abs_diff_eq!(rects[0].width, 192.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rects[1].x, left, epsilon = 1e-9);
    assert_abs_diff_eq!(rects[2].x, left + 192.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rects[2].width, 96.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rects[3].x, left + 288.0, epsilon = 1e-9);
}
