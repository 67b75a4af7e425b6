mod axis_location;
mod axis_painter;
mod chart;
mod label;
mod legend_painter;
mod plot_area;
mod render_state;
mod renderer;
mod segment_area;
mod series_iteration;
mod series_painters;

pub use axis_location::resolve_axis_locations;
pub use axis_painter::{AxisParts, TICK_LENGTH, render_axis, tilde_markers};
pub use chart::{CHART_CONFIG_JSON_SCHEMA_V1, Chart, ChartConfig, DEFAULT_SEGMENT_MARGIN};
pub use label::{LABEL_BOX_HEIGHT, LABEL_BOX_WIDTH, render_label};
pub use legend_painter::{LEGEND_LINE_HEIGHT, render_legend, render_legend_item};
pub use plot_area::{logical_size, plot_area};
pub use render_state::{RenderContext, RenderState};
pub use renderer::{ChartRenderer, render_chart};
pub use segment_area::chart_segment_area;
pub use series_iteration::{
    BarLayout, BarSlot, CATEGORY_WIDTH, SeriesPoint, SeriesVisitor, StackDirection, StackStep,
    accumulate_run, bar_group_count, bar_group_indices, bar_slots, iterate_series,
    needs_zero_baseline, stack_runs, value_extent,
};
pub use series_painters::{
    MarkerPainter, SeriesGeometryPainter, ValueLabelPainter, draw_marker, marker_path,
};
