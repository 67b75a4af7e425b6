use crate::api::{RenderContext, draw_marker, marker_path};
use crate::core::{
    Alignment, AxisId, DataSeries, HorizontalAlign, Orientation, Point, Rect, SeriesKind,
    TabularModel, VerticalAlign,
};
use crate::error::ChartResult;
use crate::render::{Color, DrawingSurface, Pen, SurfaceGuard};

pub const LEGEND_LINE_HEIGHT: f64 = 25.0;
const LEGEND_OFFSET: f64 = 20.0;
const SECONDARY_AXIS_OFFSET: f64 = 40.0;
const SWATCH_SIZE: f64 = 10.0;
const NAME_OFFSET: f64 = 17.0;

/// Draws one legend row centred vertically on `pos` (device coordinates).
pub fn render_legend_item<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    pos: Point,
    series: &DataSeries,
    name: &str,
) -> ChartResult<()> {
    let mut guard = SurfaceGuard::new(surface);
    let half = SWATCH_SIZE / 2.0;
    match series.kind {
        SeriesKind::Bar => {
            guard.fill_rect(
                Rect::new(pos.x - half, pos.y - half, SWATCH_SIZE, SWATCH_SIZE),
                series.brush,
            )?;
        }
        SeriesKind::Line => {
            guard.set_pen(series.pen);
            guard.draw_line(Point::new(pos.x - half, pos.y), Point::new(pos.x + half, pos.y))?;
        }
        SeriesKind::Scatter => {}
    }
    if let Some(marker) = marker_path(series.marker, series.marker_size) {
        let mut marker_guard = SurfaceGuard::new(&mut *guard);
        marker_guard.translate(pos.x, pos.y);
        draw_marker(&mut *marker_guard, series, &marker)?;
    }
    guard.set_pen(Pen::solid(Color::BLACK, 1.0));
    guard.draw_text(
        Rect::new(pos.x + NAME_OFFSET, pos.y - 10.0, 100.0, 20.0),
        Alignment::new(HorizontalAlign::Left, VerticalAlign::Middle),
        name,
    )
}

/// Draws the legend (when enabled) and the chart title.
///
/// Legend rows stack beside the plot area, past the secondary Y axis when it
/// is shown, centred on the plot's cross-axis extent.
pub fn render_legend<S, M>(surface: &mut S, ctx: RenderContext<'_>, model: &M) -> ChartResult<()>
where
    S: DrawingSurface + ?Sized,
    M: TabularModel + ?Sized,
{
    let chart = ctx.chart;
    let state = ctx.state;
    let vertical = chart.orientation == Orientation::Vertical;
    let plot = state.plot_rect;

    if chart.legend_enabled {
        let rows = chart.series.iter().filter(|s| s.legend_enabled).count();
        let mut x = if vertical {
            plot.right()
        } else {
            state.logical_height - plot.top()
        } + LEGEND_OFFSET;
        if vertical && chart.axis(AxisId::Y2).visible {
            x += SECONDARY_AXIS_OFFSET;
        }
        let center = if vertical {
            plot.center().y
        } else {
            plot.center().x
        };
        let mut y = (center - LEGEND_LINE_HEIGHT * rows as f64 / 2.0).floor();
        for (index, series) in chart.series.iter().enumerate() {
            if !series.legend_enabled {
                continue;
            }
            let name = chart.series_name(index, model);
            render_legend_item(
                surface,
                Point::new(x.floor(), y + LEGEND_LINE_HEIGHT / 2.0),
                series,
                &name,
            )?;
            y += LEGEND_LINE_HEIGHT;
        }
    }

    if !chart.title.is_empty() {
        let x = if vertical {
            state.logical_width
        } else {
            state.logical_height
        } / 2.0;
        let mut guard = SurfaceGuard::new(surface);
        guard.set_font(chart.title_font.clone());
        guard.draw_text(
            Rect::new(x - 50.0, 5.0, 100.0, 50.0),
            Alignment::new(HorizontalAlign::Center, VerticalAlign::Top),
            &chart.title,
        )?;
    }
    Ok(())
}
