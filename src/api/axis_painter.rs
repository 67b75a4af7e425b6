use tracing::warn;

use crate::api::{RenderContext, render_label};
use crate::core::{
    Alignment, AxisId, AxisLocation, AxisRangeProvider, ChartType, HorizontalAlign, Orientation,
    Path, Point, TickLabel, TickLength, VerticalAlign,
};
use crate::error::ChartResult;
use crate::render::{Color, DrawingSurface, SurfaceGuard};

pub const TICK_LENGTH: f64 = 5.0;
const TICK_LABEL_MARGIN: f64 = 3.0;

/// Which parts of an axis a call to [`render_axis`] draws.
///
/// Gridlines go below the series, axis lines and labels above them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisParts {
    pub grid: bool,
    pub line: bool,
    pub labels: bool,
}

impl AxisParts {
    pub const GRID: Self = Self {
        grid: true,
        line: false,
        labels: false,
    };
    pub const LINE_AND_LABELS: Self = Self {
        grid: false,
        line: true,
        labels: true,
    };
    pub const ALL: Self = Self {
        grid: true,
        line: true,
        labels: true,
    };
}

/// Break glyphs drawn where a segment starts and ends, in an axis-local frame
/// running along +y. `margin` is the segment margin they sit in.
#[must_use]
pub fn tilde_markers(margin: f64) -> (Path, Path) {
    let mut start = Path::new();
    start
        .move_to(Point::new(0.0, 0.0))
        .line_to(Point::new(0.0, margin - 25.0))
        .move_to(Point::new(-15.0, margin - 10.0))
        .line_to(Point::new(15.0, margin - 20.0));
    let mut end = Path::new();
    end.move_to(Point::new(0.0, 0.0))
        .line_to(Point::new(0.0, -(margin - 25.0)))
        .move_to(Point::new(-15.0, -(margin - 20.0)))
        .line_to(Point::new(15.0, -(margin - 10.0)));
    (start, end)
}

/// Side(s) of the axis line a tick extends to, in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickSide {
    /// Away from the plot at the minimum edge.
    Outside,
    /// Away from the plot at the maximum edge.
    Opposite,
    Both,
}

/// Draws `parts` of axis `id` on every one of its segments.
pub fn render_axis<S, P>(
    surface: &mut S,
    ctx: RenderContext<'_>,
    provider: &P,
    id: AxisId,
    parts: AxisParts,
) -> ChartResult<()>
where
    S: DrawingSurface + ?Sized,
    P: AxisRangeProvider + ?Sized,
{
    let view = ctx.axis(id);
    let axis = view.axis;
    if view.segment_count() == 0 {
        if axis.visible && parts.line {
            warn!(axis = ?id, "axis has no segments; nothing drawn");
        }
        return Ok(());
    }
    let plot = ctx.state.plot_rect;
    let vertical = id.is_vertical();
    let location = ctx.state.location(id);
    let transform = ctx.transform();

    let zero = if vertical {
        ctx.axis(AxisId::X).map_any(0.0)
    } else {
        ctx.axis(AxisId::Y1).map_any(0.0)
    };
    let min_u = if vertical {
        plot.left() - 0.5 - axis.margin
    } else {
        plot.bottom() + 0.5 + axis.margin
    };
    let (tick_side, label_before, u) = match location {
        AxisLocation::MinimumValue => (TickSide::Outside, true, min_u),
        AxisLocation::MaximumValue => (
            TickSide::Opposite,
            false,
            if vertical {
                plot.right() + 0.5 + axis.margin
            } else {
                plot.top() - 0.5 - axis.margin
            },
        ),
        AxisLocation::ZeroValue if zero.is_finite() => {
            (TickSide::Both, true, zero.floor() + 0.5)
        }
        AxisLocation::ZeroValue => (TickSide::Outside, true, min_u),
    };

    // Labels sit left of vertical axes and below the X axis, except at the
    // maximum edge where they move to the outside.
    let label_alignment = if vertical {
        Alignment::new(
            if label_before {
                HorizontalAlign::Right
            } else {
                HorizontalAlign::Left
            },
            match axis.label_angle {
                a if a == 0.0 => VerticalAlign::Middle,
                a if a > 0.0 => VerticalAlign::Top,
                _ => VerticalAlign::Bottom,
            },
        )
    } else {
        Alignment::new(
            match axis.label_angle {
                a if a == 0.0 => HorizontalAlign::Center,
                a if a > 0.0 => HorizontalAlign::Right,
                _ => HorizontalAlign::Left,
            },
            if label_before {
                VerticalAlign::Top
            } else {
                VerticalAlign::Bottom
            },
        )
    };

    let (tilde_start, tilde_end) = tilde_markers(ctx.chart.segment_margin);
    let rotate_markers = (ctx.chart.orientation == Orientation::Vertical) != vertical;
    let mut ticks: Vec<TickLabel> = Vec::new();
    let mut guard = SurfaceGuard::new(surface);

    for (segment_index, s) in view.segments.iter().enumerate() {
        if parts.line && axis.visible {
            guard.set_pen(axis.pen);
            let (begin, end) = if vertical {
                (
                    transform.to_device_xy(u, s.render_start),
                    transform.to_device_xy(u, s.render_start - s.render_length),
                )
            } else {
                (
                    transform.to_device_xy(s.render_start, u),
                    transform.to_device_xy(s.render_start + s.render_length, u),
                )
            };
            guard.draw_line(begin, end)?;
            if segment_index != 0 {
                draw_tilde(&mut *guard, begin, rotate_markers, &tilde_start)?;
            }
            if segment_index + 1 != view.segment_count() {
                draw_tilde(&mut *guard, end, rotate_markers, &tilde_end)?;
            }
        }

        let mut grid_path = Path::new();
        let mut ticks_path = Path::new();
        ticks.clear();
        provider.label_ticks(view, segment_index, &mut ticks);
        guard.set_font(axis.label_font.clone());

        for tick in &ticks {
            let position = view.map(tick.value, segment_index);
            if !position.is_finite() {
                continue;
            }
            let dd = position.floor() + 0.5;
            let tick_length = match tick.length {
                TickLength::Long => TICK_LENGTH,
                TickLength::Short | TickLength::Zero => (TICK_LENGTH / 2.0).floor(),
            };

            let label_pos = match location {
                AxisLocation::MaximumValue if vertical => Point::new(u + tick_length, dd),
                AxisLocation::MaximumValue => Point::new(dd, u - tick_length),
                AxisLocation::ZeroValue if ctx.chart.chart_type == ChartType::Category => {
                    if vertical {
                        Point::new(plot.left() - 0.5 - axis.margin - tick_length, dd)
                    } else {
                        Point::new(dd, plot.bottom() + 0.5 + axis.margin + tick_length)
                    }
                }
                _ if vertical => Point::new(u - tick_length, dd),
                _ => Point::new(dd, u + tick_length),
            };

            if tick.length != TickLength::Zero {
                let before = if matches!(tick_side, TickSide::Outside | TickSide::Both) {
                    tick_length
                } else {
                    0.0
                };
                let after = if matches!(tick_side, TickSide::Opposite | TickSide::Both) {
                    tick_length
                } else {
                    0.0
                };
                if vertical {
                    ticks_path.move_to(transform.to_device_xy(u - before, dd));
                    ticks_path.line_to(transform.to_device_xy(u + after, dd));
                    if tick.length == TickLength::Long {
                        grid_path.move_to(transform.to_device_xy(plot.left(), dd));
                        grid_path.line_to(transform.to_device_xy(plot.right(), dd));
                    }
                } else {
                    ticks_path.move_to(transform.to_device_xy(dd, u - after));
                    ticks_path.line_to(transform.to_device_xy(dd, u + before));
                    if tick.length == TickLength::Long {
                        grid_path.move_to(transform.to_device_xy(dd, plot.top()));
                        grid_path.line_to(transform.to_device_xy(dd, plot.bottom()));
                    }
                }
            }

            if parts.labels && axis.visible && !tick.label.is_empty() {
                render_label(
                    &mut *guard,
                    transform,
                    &tick.label,
                    label_pos,
                    Color::BLACK,
                    label_alignment,
                    axis.label_angle,
                    TICK_LABEL_MARGIN,
                )?;
            }
        }

        if parts.grid && axis.grid_lines_enabled && !grid_path.is_empty() {
            guard.stroke_path(&grid_path, axis.grid_pen)?;
        }
        if parts.line && axis.visible && !ticks_path.is_empty() {
            guard.stroke_path(&ticks_path, axis.pen)?;
        }

        if segment_index == 0 && parts.labels && axis.visible && !axis.title.is_empty() {
            guard.set_font(axis.title_font.clone());
            render_axis_title(&mut *guard, ctx, id, u, label_before)?;
        }
    }
    Ok(())
}

fn draw_tilde<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    at: Point,
    rotate: bool,
    marker: &Path,
) -> ChartResult<()> {
    let mut guard = SurfaceGuard::new(surface);
    guard.translate(at.x, at.y);
    if rotate {
        guard.rotate(90.0);
    }
    guard.draw_path(marker)
}

fn render_axis_title<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    ctx: RenderContext<'_>,
    id: AxisId,
    u: f64,
    label_before: bool,
) -> ChartResult<()> {
    let axis = ctx.chart.axis(id);
    let plot = ctx.state.plot_rect;
    let chart_vertical = ctx.chart.orientation == Orientation::Vertical;
    let (position, alignment, margin) = match (id.is_vertical(), chart_vertical) {
        (true, true) => (
            Point::new(u + if label_before { 15.0 } else { -15.0 }, plot.top() - 8.0),
            Alignment::new(
                if label_before {
                    HorizontalAlign::Right
                } else {
                    HorizontalAlign::Left
                },
                VerticalAlign::Bottom,
            ),
            0.0,
        ),
        (true, false) => (
            Point::new(u + if label_before { -40.0 } else { 40.0 }, plot.center().y),
            Alignment::new(
                if label_before {
                    HorizontalAlign::Left
                } else {
                    HorizontalAlign::Right
                },
                VerticalAlign::Middle,
            ),
            0.0,
        ),
        (false, true) => (
            Point::new(plot.center().x, u + 22.0),
            Alignment::new(HorizontalAlign::Center, VerticalAlign::Top),
            0.0,
        ),
        (false, false) => (
            Point::new(plot.right(), u),
            Alignment::new(HorizontalAlign::Left, VerticalAlign::Top),
            8.0,
        ),
    };
    render_label(
        surface,
        ctx.transform(),
        &axis.title,
        position,
        Color::BLACK,
        alignment,
        0.0,
        margin,
    )
}

#[cfg(test)]
mod tests {
    use super::tilde_markers;

    #[test]
    fn tilde_markers_reach_into_the_segment_gap() {
        let (start, end) = tilde_markers(40.0);
        let start = start.vertices();
        let end = end.vertices();
        assert_eq!(start.len(), 4);
        assert_eq!(end.len(), 4);
        assert!((start[1].y - 15.0).abs() <= 1e-9);
        assert!((end[1].y + 15.0).abs() <= 1e-9);
        assert!(start[2].y > 0.0 && end[2].y < 0.0);
    }
}
