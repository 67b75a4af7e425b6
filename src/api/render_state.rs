use crate::api::Chart;
use crate::core::{
    AxisId, AxisLocation, AxisSegment, AxisSegments, AxisView, OrientationTransform, Point, Rect,
};

/// Geometry resolved for one render pass.
///
/// Built from scratch by every pass and never mutated while drawing, so
/// repeated renders of unchanged inputs are identical.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    /// Drawing rectangle in device coordinates.
    pub drawing_rect: Rect,
    /// Plot area in logical coordinates, relative to `drawing_rect`'s origin.
    pub plot_rect: Rect,
    pub logical_width: f64,
    pub logical_height: f64,
    pub transform: OrientationTransform,
    /// Indexed by [`AxisId::index`].
    pub locations: [AxisLocation; 3],
    /// Indexed by [`AxisId::index`].
    pub segments: [AxisSegments; 3],
}

impl RenderState {
    #[must_use]
    pub fn location(&self, id: AxisId) -> AxisLocation {
        self.locations[id.index()]
    }

    #[must_use]
    pub fn segments(&self, id: AxisId) -> &[AxisSegment] {
        &self.segments[id.index()]
    }

    #[must_use]
    pub fn axis_view<'a>(&'a self, chart: &'a Chart, id: AxisId) -> AxisView<'a> {
        AxisView::new(chart.axis(id), self.segments(id))
    }

    /// Plot area in device coordinates.
    #[must_use]
    pub fn device_plot_rect(&self) -> Rect {
        let local = self.transform.to_device_rect(self.plot_rect);
        Rect::new(
            local.x + self.drawing_rect.x,
            local.y + self.drawing_rect.y,
            local.width,
            local.height,
        )
    }
}

/// Chart and state borrowed together by the painters of one pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub chart: &'a Chart,
    pub state: &'a RenderState,
}

impl<'a> RenderContext<'a> {
    #[must_use]
    pub fn new(chart: &'a Chart, state: &'a RenderState) -> Self {
        Self { chart, state }
    }

    #[must_use]
    pub fn axis(self, id: AxisId) -> AxisView<'a> {
        self.state.axis_view(self.chart, id)
    }

    #[must_use]
    pub fn transform(self) -> OrientationTransform {
        self.state.transform
    }

    /// Logical position of `(x, y)` with `y` read on `y_axis`.
    #[must_use]
    pub fn map(self, x: f64, y: f64, y_axis: AxisId, x_segment: usize, y_segment: usize) -> Point {
        Point::new(
            self.axis(AxisId::X).map(x, x_segment),
            self.axis(y_axis).map(y, y_segment),
        )
    }

    #[must_use]
    pub fn to_device(self, point: Point) -> Point {
        self.state.transform.to_device(point)
    }
}
