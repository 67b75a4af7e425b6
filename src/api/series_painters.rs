use crate::api::{BarLayout, RenderContext, SeriesPoint, SeriesVisitor, render_label};
use crate::core::{
    Alignment, DataSeries, HorizontalAlign, MarkerKind, Path, Point, Rect, SeriesKind,
    VerticalAlign, format_number,
};
use crate::error::ChartResult;
use crate::render::{Brush, Color, DrawingSurface, Pen, SurfaceGuard};

const VALUE_LABEL_MARGIN: f64 = 3.0;
const VALUE_LABEL_DECIMALS: u32 = 2;

/// Marker outline centred on the origin, `None` for [`MarkerKind::None`].
#[must_use]
pub fn marker_path(kind: MarkerKind, size: f64) -> Option<Path> {
    let h = size / 2.0;
    let mut path = Path::new();
    match kind {
        MarkerKind::None => return None,
        MarkerKind::Square => {
            path.add_rect(Rect::new(-h, -h, size, size));
        }
        MarkerKind::Circle => {
            path.add_ellipse(Point::new(0.0, 0.0), h, h);
        }
        MarkerKind::Cross => {
            path.move_to(Point::new(-h, 0.0))
                .line_to(Point::new(h, 0.0))
                .move_to(Point::new(0.0, -h))
                .line_to(Point::new(0.0, h));
        }
        MarkerKind::XCross => {
            path.move_to(Point::new(-h, -h))
                .line_to(Point::new(h, h))
                .move_to(Point::new(-h, h))
                .line_to(Point::new(h, -h));
        }
        MarkerKind::Triangle => {
            path.move_to(Point::new(0.0, -h))
                .line_to(Point::new(h, h))
                .line_to(Point::new(-h, h))
                .close();
        }
    }
    Some(path)
}

/// Logical anchor of a point: bars anchor at the centre of their slot.
fn anchor(
    ctx: RenderContext<'_>,
    series: &DataSeries,
    layout: BarLayout,
    segments: (usize, usize),
    point: SeriesPoint,
) -> Point {
    let mut position = ctx.map(point.x, point.y, series.axis, segments.0, segments.1);
    if series.is_bar() {
        position.x += layout.center_offset();
    }
    position
}

/// First pass: lines, filled areas and bars.
pub struct SeriesGeometryPainter<'a> {
    ctx: RenderContext<'a>,
    layout: BarLayout,
    segments: (usize, usize),
    area: Rect,
    line: Path,
    last_row: Option<usize>,
    /// Device `(top, base)` pairs of the contiguous run being filled.
    fill: Vec<(Point, Point)>,
}

impl<'a> SeriesGeometryPainter<'a> {
    #[must_use]
    pub fn new(ctx: RenderContext<'a>) -> Self {
        Self {
            ctx,
            layout: BarLayout {
                group_width: 0.0,
                group_count: 0,
                group_index: 0,
                slot_count: 0,
                slot_index: 0,
            },
            segments: (0, 0),
            area: Rect::new(0.0, 0.0, 0.0, 0.0),
            line: Path::new(),
            last_row: None,
            fill: Vec::new(),
        }
    }

    /// Base position on the Y axis; values the scale cannot show (zero on a
    /// logarithmic axis) rest on the bottom of the segment area.
    fn base_y(&self, series: &DataSeries, value: f64) -> f64 {
        let y = self.ctx.axis(series.axis).map(value, self.segments.1);
        if y.is_finite() { y } else { self.area.bottom() }
    }

    fn flush_fill<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        series: &DataSeries,
    ) -> ChartResult<()> {
        let fill = std::mem::take(&mut self.fill);
        if fill.len() < 2 {
            return Ok(());
        }
        let mut path = Path::new();
        path.move_to(fill[0].0);
        for (top, _) in &fill[1..] {
            path.line_to(*top);
        }
        for (_, base) in fill.iter().rev() {
            path.line_to(*base);
        }
        path.close();
        surface.set_pen(Pen::none());
        surface.set_brush(series.brush);
        surface.draw_path(&path)
    }

    fn line_value<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        series: &DataSeries,
        point: SeriesPoint,
    ) -> ChartResult<()> {
        let top = self
            .ctx
            .map(point.x, point.y, series.axis, self.segments.0, self.segments.1);
        if !top.is_finite() {
            self.last_row = None;
            return self.flush_fill(surface, series);
        }
        let device = self.ctx.to_device(top);
        let contiguous = self.last_row.is_some_and(|row| row + 1 == point.row);
        if contiguous {
            self.line.line_to(device);
        } else {
            self.flush_fill(surface, series)?;
            self.line.move_to(device);
        }
        self.last_row = Some(point.row);

        if series.fill_area {
            let base = Point::new(top.x, self.base_y(series, point.stack_y));
            self.fill.push((device, self.ctx.to_device(base)));
        }
        Ok(())
    }

    fn bar_value<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        series: &DataSeries,
        point: SeriesPoint,
    ) -> ChartResult<()> {
        let center = anchor(self.ctx, series, self.layout, self.segments, point);
        let width = self.layout.bar_width();
        let base = self.base_y(series, point.stack_y);
        if !center.is_finite() || !width.is_finite() {
            return Ok(());
        }
        let left = center.x - width / 2.0;
        let rect = Rect::from_corners(Point::new(left, center.y), Point::new(left + width, base));
        let path = Path::rect(self.ctx.transform().to_device_rect(rect));
        surface.set_pen(series.pen);
        surface.set_brush(series.brush);
        surface.draw_path(&path)
    }
}

impl SeriesVisitor for SeriesGeometryPainter<'_> {
    fn start_series(&mut self, series: &DataSeries, _series_index: usize, layout: BarLayout) -> bool {
        self.layout = layout;
        series.kind != SeriesKind::Scatter
    }

    fn set_segment(&mut self, x_segment: usize, y_segment: usize, area: Rect) {
        self.segments = (x_segment, y_segment);
        self.area = area;
        self.line = Path::new();
        self.last_row = None;
        self.fill.clear();
    }

    fn new_value<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        series: &DataSeries,
        point: SeriesPoint,
    ) -> ChartResult<()> {
        match series.kind {
            SeriesKind::Line => self.line_value(surface, series, point),
            SeriesKind::Bar => self.bar_value(surface, series, point),
            SeriesKind::Scatter => Ok(()),
        }
    }

    fn end_segment<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        series: &DataSeries,
    ) -> ChartResult<()> {
        self.flush_fill(surface, series)?;
        let line = std::mem::take(&mut self.line);
        if line.is_empty() {
            return Ok(());
        }
        surface.set_pen(series.pen);
        surface.set_brush(Brush::None);
        surface.draw_path(&line)
    }
}

/// Second pass: each point's own value, above the point.
pub struct ValueLabelPainter<'a> {
    ctx: RenderContext<'a>,
    layout: Option<BarLayout>,
    segments: (usize, usize),
}

impl<'a> ValueLabelPainter<'a> {
    #[must_use]
    pub fn new(ctx: RenderContext<'a>) -> Self {
        Self {
            ctx,
            layout: None,
            segments: (0, 0),
        }
    }
}

impl SeriesVisitor for ValueLabelPainter<'_> {
    fn start_series(&mut self, series: &DataSeries, _series_index: usize, layout: BarLayout) -> bool {
        self.layout = Some(layout);
        series.labels_enabled
    }

    fn set_segment(&mut self, x_segment: usize, y_segment: usize, _area: Rect) {
        self.segments = (x_segment, y_segment);
    }

    fn new_value<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        series: &DataSeries,
        point: SeriesPoint,
    ) -> ChartResult<()> {
        let Some(layout) = self.layout else {
            return Ok(());
        };
        let position = anchor(self.ctx, series, layout, self.segments, point);
        let text = format_number(point.y - point.stack_y, VALUE_LABEL_DECIMALS);
        render_label(
            surface,
            self.ctx.transform(),
            &text,
            position,
            Color::BLACK,
            Alignment::new(HorizontalAlign::Center, VerticalAlign::Bottom),
            0.0,
            VALUE_LABEL_MARGIN,
        )
    }
}

/// Third pass: point markers.
pub struct MarkerPainter<'a> {
    ctx: RenderContext<'a>,
    layout: Option<BarLayout>,
    segments: (usize, usize),
    marker: Option<Path>,
}

impl<'a> MarkerPainter<'a> {
    #[must_use]
    pub fn new(ctx: RenderContext<'a>) -> Self {
        Self {
            ctx,
            layout: None,
            segments: (0, 0),
            marker: None,
        }
    }
}

impl SeriesVisitor for MarkerPainter<'_> {
    fn start_series(&mut self, series: &DataSeries, _series_index: usize, layout: BarLayout) -> bool {
        self.layout = Some(layout);
        self.marker = marker_path(series.marker, series.marker_size);
        self.marker.is_some()
    }

    fn set_segment(&mut self, x_segment: usize, y_segment: usize, _area: Rect) {
        self.segments = (x_segment, y_segment);
    }

    fn new_value<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        series: &DataSeries,
        point: SeriesPoint,
    ) -> ChartResult<()> {
        let (Some(layout), Some(marker)) = (self.layout, self.marker.as_ref()) else {
            return Ok(());
        };
        let position = self
            .ctx
            .to_device(anchor(self.ctx, series, layout, self.segments, point));
        if !position.is_finite() {
            return Ok(());
        }
        let mut guard = SurfaceGuard::new(surface);
        guard.translate(position.x, position.y);
        draw_marker(&mut *guard, series, marker)
    }
}

/// Draws `marker` at the current origin with the series' pen and brush.
pub fn draw_marker<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    series: &DataSeries,
    marker: &Path,
) -> ChartResult<()> {
    surface.set_pen(series.pen);
    surface.set_brush(match series.marker {
        MarkerKind::Cross | MarkerKind::XCross => Brush::None,
        _ => series.brush,
    });
    surface.draw_path(marker)
}

