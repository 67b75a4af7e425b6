use std::ops::Range;

use tracing::{trace, warn};

use crate::api::{Chart, RenderContext, chart_segment_area};
use crate::core::{AxisId, ChartType, DataSeries, Path, Rect, TabularModel};
use crate::error::ChartResult;
use crate::render::{DrawingSurface, SurfaceGuard};

/// Share of one category slot covered by bars.
pub const CATEGORY_WIDTH: f64 = 0.8;

/// Order in which the members of a stack run are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackDirection {
    /// Base series first; each stacked series adds on top.
    #[default]
    Forward,
    /// Topmost series first; used by passes that draw over the geometry.
    Reverse,
}

/// Horizontal slot assignment of the bars of one stack run.
///
/// Each category reserves `group_width`, split evenly between the bar
/// groups. Inside a group, every stack run holding bars gets its own slot,
/// so unstacked bars of one cluster sit side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    /// Logical width reserved per category for all bar groups.
    pub group_width: f64,
    pub group_count: usize,
    pub group_index: usize,
    /// Stack runs with bars sharing this group.
    pub slot_count: usize,
    pub slot_index: usize,
}

impl BarLayout {
    /// Width of one group.
    #[must_use]
    pub fn group_slot_width(self) -> f64 {
        self.group_width / self.group_count.max(1) as f64
    }

    /// Width of one bar.
    #[must_use]
    pub fn bar_width(self) -> f64 {
        self.group_slot_width() / self.slot_count.max(1) as f64
    }

    /// Offset of this bar's centre from the category centre.
    #[must_use]
    pub fn center_offset(self) -> f64 {
        -self.group_width / 2.0
            + self.group_index as f64 * self.group_slot_width()
            + (self.slot_index as f64 + 0.5) * self.bar_width()
    }
}

/// One visited data point.
///
/// For stacked series `y` is the cumulative total including this series and
/// `stack_y` the total below it; otherwise `stack_y` is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub stack_y: f64,
}

/// Drawing strategy driven by [`iterate_series`].
pub trait SeriesVisitor {
    /// Returns whether the series' points should be visited.
    fn start_series(&mut self, series: &DataSeries, series_index: usize, layout: BarLayout) -> bool;

    /// Called before the rows of each segment pair; `area` is the logical clip.
    fn set_segment(&mut self, x_segment: usize, y_segment: usize, area: Rect);

    fn new_value<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        series: &DataSeries,
        point: SeriesPoint,
    ) -> ChartResult<()>;

    /// Called with the segment clip still active.
    fn end_segment<S: DrawingSurface + ?Sized>(
        &mut self,
        _surface: &mut S,
        _series: &DataSeries,
    ) -> ChartResult<()> {
        Ok(())
    }

    fn end_series<S: DrawingSurface + ?Sized>(&mut self, _surface: &mut S) -> ChartResult<()> {
        Ok(())
    }
}

/// Cumulative values of one series inside its stack run.
#[derive(Debug, Clone, PartialEq)]
pub struct StackStep {
    pub series_index: usize,
    /// Total below this series, per row.
    pub base: Vec<f64>,
    /// Total including this series, per row.
    pub top: Vec<f64>,
}

/// Splits the series list into stack runs.
///
/// Scatter charts never stack. For category charts a run is a maximal
/// sequence on one axis where every member after the first is `stacked`.
#[must_use]
pub fn stack_runs(series: &[DataSeries], chart_type: ChartType) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut index = 0;
    while index < series.len() {
        let start = index;
        let axis = series[index].axis;
        index += 1;
        if chart_type == ChartType::Category {
            while index < series.len() && series[index].stacked && series[index].axis == axis {
                index += 1;
            }
        }
        runs.push(start..index);
    }
    runs
}

/// Number of bar groups.
///
/// A group is a cluster of consecutive bar series: the counter advances at
/// the first bar of the list and at every bar following a non-bar series.
#[must_use]
pub fn bar_group_count(series: &[DataSeries]) -> usize {
    bar_clusters(series).into_iter().flatten().max().map_or(0, |last| last + 1)
}

/// Cluster of every bar series, `None` for other kinds.
fn bar_clusters(series: &[DataSeries]) -> Vec<Option<usize>> {
    let mut count = 0;
    let mut new_group = true;
    series
        .iter()
        .map(|s| {
            if !s.is_bar() {
                new_group = true;
                return None;
            }
            if new_group {
                count += 1;
                new_group = false;
            }
            Some(count - 1)
        })
        .collect()
}

/// Group and slot of one stack run, in category charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarSlot {
    pub group: usize,
    pub slot: usize,
    pub slot_count: usize,
}

/// Bar slot of each category stack run (see [`stack_runs`]), `None` for runs
/// without bars. A run sits in the group of its first bar.
#[must_use]
pub fn bar_slots(series: &[DataSeries]) -> Vec<Option<BarSlot>> {
    let clusters = bar_clusters(series);
    let mut slots: Vec<Option<BarSlot>> = stack_runs(series, ChartType::Category)
        .into_iter()
        .map(|run| {
            run.clone().find_map(|index| clusters[index]).map(|group| BarSlot {
                group,
                slot: 0,
                slot_count: 0,
            })
        })
        .collect();

    let groups = bar_group_count(series);
    let mut used = vec![0; groups];
    for slot in slots.iter_mut().flatten() {
        slot.slot = used[slot.group];
        used[slot.group] += 1;
    }
    for slot in slots.iter_mut().flatten() {
        slot.slot_count = used[slot.group];
    }
    slots
}

/// Bar group each series is drawn in, `None` for non-bar series.
#[must_use]
pub fn bar_group_indices(series: &[DataSeries]) -> Vec<Option<usize>> {
    let mut indices = vec![None; series.len()];
    let runs = stack_runs(series, ChartType::Category);
    for (run, slot) in runs.into_iter().zip(bar_slots(series)) {
        let Some(slot) = slot else { continue };
        for index in run {
            if series[index].is_bar() {
                indices[index] = Some(slot.group);
            }
        }
    }
    indices
}

/// Accumulates the members of `run` in visiting order.
///
/// Non-finite cells contribute nothing and leave the running total intact.
/// Reverse order starts from the full run total and peels series off, so
/// each step still reports the same `(base, top)` pair as forward order.
#[must_use]
pub fn accumulate_run<M: TabularModel + ?Sized>(
    model: &M,
    series: &[DataSeries],
    run: Range<usize>,
    direction: StackDirection,
) -> Vec<StackStep> {
    let rows = model.row_count();
    let value = |index: usize, row: usize| {
        let v = model.value_at(row, series[index].model_column);
        if v.is_finite() { v } else { 0.0 }
    };

    match direction {
        StackDirection::Forward => {
            let mut running = vec![0.0; rows];
            run.map(|index| {
                let base = running.clone();
                for (row, total) in running.iter_mut().enumerate() {
                    *total += value(index, row);
                }
                StackStep {
                    series_index: index,
                    base,
                    top: running.clone(),
                }
            })
            .collect()
        }
        StackDirection::Reverse => {
            let mut running: Vec<f64> = (0..rows)
                .map(|row| run.clone().map(|index| value(index, row)).sum())
                .collect();
            run.rev()
                .map(|index| {
                    let top = running.clone();
                    for (row, total) in running.iter_mut().enumerate() {
                        *total -= value(index, row);
                    }
                    StackStep {
                        series_index: index,
                        base: running.clone(),
                        top,
                    }
                })
                .collect()
        }
    }
}

fn scatter_step<M: TabularModel + ?Sized>(model: &M, series: &DataSeries, index: usize) -> StackStep {
    let rows = model.row_count();
    StackStep {
        series_index: index,
        base: vec![0.0; rows],
        top: (0..rows).map(|row| model.value_at(row, series.model_column)).collect(),
    }
}

fn x_value<M: TabularModel + ?Sized>(chart: &Chart, model: &M, row: usize) -> f64 {
    match (chart.chart_type, chart.x_series_column) {
        (ChartType::Scatter, Some(column)) => model.value_at(row, column),
        _ => row as f64,
    }
}

/// Visits every series, segment pair and row of the chart.
///
/// Segment pairs run X-major, Y-minor, each under its own clip; rows run in
/// index order. Rows whose own value (or scatter X) is not finite are
/// skipped. Series bound to a missing model column are skipped with a
/// warning.
pub fn iterate_series<M, S, V>(
    ctx: RenderContext<'_>,
    model: &M,
    surface: &mut S,
    visitor: &mut V,
    direction: StackDirection,
) -> ChartResult<()>
where
    M: TabularModel + ?Sized,
    S: DrawingSurface + ?Sized,
    V: SeriesVisitor,
{
    let chart = ctx.chart;
    let x_view = ctx.axis(AxisId::X);
    let group_width = CATEGORY_WIDTH * (x_view.map(2.0, 0) - x_view.map(1.0, 0));
    let (group_count, slots) = match chart.chart_type {
        ChartType::Scatter => (1, Vec::new()),
        ChartType::Category => (bar_group_count(&chart.series), bar_slots(&chart.series)),
    };
    let rows = model.row_count();
    let columns = model.column_count();

    for (run_index, run) in stack_runs(&chart.series, chart.chart_type).into_iter().enumerate() {
        trace!(start = run.start, end = run.end, ?direction, "stack run");
        let slot = slots.get(run_index).copied().flatten().unwrap_or(BarSlot {
            group: 0,
            slot: 0,
            slot_count: 1,
        });
        let layout = BarLayout {
            group_width,
            group_count,
            group_index: slot.group,
            slot_count: slot.slot_count,
            slot_index: slot.slot,
        };
        let steps = match chart.chart_type {
            ChartType::Category => accumulate_run(model, &chart.series, run, direction),
            ChartType::Scatter => run
                .map(|index| scatter_step(model, &chart.series[index], index))
                .collect(),
        };

        for step in steps {
            let series = &chart.series[step.series_index];
            if series.model_column >= columns {
                warn!(
                    series = step.series_index,
                    column = series.model_column,
                    columns,
                    "series column out of range; skipped"
                );
                continue;
            }
            if visitor.start_series(series, step.series_index, layout) {
                let y_view = ctx.axis(series.axis);
                for x_segment in 0..x_view.segment_count() {
                    for y_segment in 0..y_view.segment_count() {
                        let area = chart_segment_area(
                            x_view,
                            y_view,
                            x_segment,
                            y_segment,
                            chart.segment_margin,
                        )?;
                        visitor.set_segment(x_segment, y_segment, area);

                        let mut guard = SurfaceGuard::new(&mut *surface);
                        guard.set_clip_path(&Path::rect(ctx.transform().to_device_rect(area)));
                        for row in 0..rows {
                            let x = x_value(chart, model, row);
                            let own = model.value_at(row, series.model_column);
                            if !own.is_finite() || !x.is_finite() {
                                continue;
                            }
                            let point = SeriesPoint {
                                row,
                                x,
                                y: step.top[row],
                                stack_y: step.base[row],
                            };
                            visitor.new_value(&mut *guard, series, point)?;
                        }
                        visitor.end_segment(&mut *guard, series)?;
                    }
                }
            }
            visitor.end_series(surface)?;
        }
    }
    Ok(())
}

/// Smallest and largest plotted value on `axis`, for automatic ranges.
///
/// Category charts report stacked totals (bases included) for Y axes and
/// nothing for X; scatter charts report raw values.
#[must_use]
pub fn value_extent<M: TabularModel + ?Sized>(
    chart: &Chart,
    model: &M,
    axis: AxisId,
) -> Option<(f64, f64)> {
    let mut extent: Option<(f64, f64)> = None;
    let mut include = |value: f64| {
        if value.is_finite() {
            extent = Some(match extent {
                Some((low, high)) => (low.min(value), high.max(value)),
                None => (value, value),
            });
        }
    };
    let rows = model.row_count();
    let columns = model.column_count();

    if axis == AxisId::X {
        if chart.chart_type == ChartType::Scatter {
            for row in 0..rows {
                include(x_value(chart, model, row));
            }
        }
        return extent;
    }

    match chart.chart_type {
        ChartType::Scatter => {
            for series in chart
                .series
                .iter()
                .filter(|s| s.axis == axis && s.model_column < columns)
            {
                for row in 0..rows {
                    include(model.value_at(row, series.model_column));
                }
            }
        }
        ChartType::Category => {
            for run in stack_runs(&chart.series, chart.chart_type) {
                if chart.series[run.start].axis != axis {
                    continue;
                }
                for step in accumulate_run(model, &chart.series, run, StackDirection::Forward) {
                    let series = &chart.series[step.series_index];
                    if series.model_column >= columns {
                        continue;
                    }
                    for row in 0..rows {
                        if model.value_at(row, series.model_column).is_finite() {
                            include(step.top[row]);
                            include(step.base[row]);
                        }
                    }
                }
            }
        }
    }
    extent
}

/// Whether an automatic range on `axis` should reach down (or up) to zero.
#[must_use]
pub fn needs_zero_baseline(chart: &Chart, axis: AxisId) -> bool {
    axis != AxisId::X
        && chart.chart_type == ChartType::Category
        && chart
            .series
            .iter()
            .any(|s| s.axis == axis && (s.is_bar() || s.stacked || s.fill_area))
}
