use tracing::{debug, warn};

use crate::api::{
    AxisParts, Chart, MarkerPainter, RenderContext, RenderState, SeriesGeometryPainter,
    StackDirection, ValueLabelPainter, iterate_series, logical_size, needs_zero_baseline,
    plot_area, render_axis, render_legend, resolve_axis_locations, value_extent,
};
use crate::core::{
    AutoRangeProvider, AxisId, AxisRangeProvider, AxisSegments, AxisView, OrientationTransform,
    RangeContext, Rect, TabularModel, validate_segments,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{DrawingSurface, SurfaceGuard};

/// Renders a [`Chart`] into a rectangle of a drawing surface.
///
/// Each call to [`ChartRenderer::render`] is one self-contained pass: plot
/// area, segments and axis locations are recomputed from the inputs, and the
/// surface state is restored on every exit path.
pub struct ChartRenderer<'a, M: ?Sized, P: ?Sized> {
    chart: &'a Chart,
    model: &'a M,
    provider: &'a P,
    rectangle: Rect,
}

impl<'a, M, P> ChartRenderer<'a, M, P>
where
    M: TabularModel + ?Sized,
    P: AxisRangeProvider + ?Sized,
{
    pub fn new(chart: &'a Chart, model: &'a M, provider: &'a P, rectangle: Rect) -> ChartResult<Self> {
        if !rectangle.is_finite() || rectangle.width <= 0.0 || rectangle.height <= 0.0 {
            return Err(ChartError::InvalidViewport {
                width: rectangle.width,
                height: rectangle.height,
            });
        }
        chart.validate()?;
        Ok(Self {
            chart,
            model,
            provider,
            rectangle,
        })
    }

    #[must_use]
    pub fn rectangle(&self) -> Rect {
        self.rectangle
    }

    /// Computes plot area, axis segments and axis locations without drawing.
    pub fn prepare(&self) -> ChartResult<RenderState> {
        let chart = self.chart;
        let (logical_width, logical_height) =
            logical_size(self.rectangle.width, self.rectangle.height, chart.orientation);
        let plot_rect = plot_area(logical_width, logical_height, chart.padding, chart.orientation);
        let rows = self.model.row_count();

        let mut segments: [AxisSegments; 3] = Default::default();
        for id in AxisId::ALL {
            let context = RangeContext {
                plot_rect,
                segment_margin: chart.segment_margin,
                row_count: rows,
                data_extent: value_extent(chart, self.model, id),
                include_zero: needs_zero_baseline(chart, id),
            };
            let prepared = self.provider.prepare_segments(chart.axis(id), &context)?;
            validate_segments(id, &prepared)?;
            if prepared.is_empty() && chart.axis(id).visible {
                warn!(axis = ?id, "axis range provider returned no segments");
            }
            segments[id.index()] = prepared;
        }

        let transform = OrientationTransform::new(chart.orientation, logical_height);
        let locations = {
            let view = |id: AxisId| AxisView::new(chart.axis(id), &segments[id.index()]);
            resolve_axis_locations(view(AxisId::X), view(AxisId::Y1), view(AxisId::Y2))
        };

        Ok(RenderState {
            drawing_rect: self.rectangle,
            plot_rect,
            logical_width,
            logical_height,
            transform,
            locations,
            segments,
        })
    }

    /// Runs one render pass and returns the geometry it used.
    ///
    /// Order: background, gridlines, series (geometry, value labels, markers),
    /// axis lines and labels, legend and title.
    pub fn render<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> ChartResult<RenderState> {
        let state = self.prepare()?;
        let chart = self.chart;
        debug!(
            series = chart.series.len(),
            rows = self.model.row_count(),
            x_segments = state.segments[0].len(),
            y1_segments = state.segments[1].len(),
            y2_segments = state.segments[2].len(),
            orientation = ?chart.orientation,
            "render pass start"
        );

        let ctx = RenderContext::new(chart, &state);
        let mut guard = SurfaceGuard::new(surface);
        guard.translate(self.rectangle.x, self.rectangle.y);

        if chart.background.is_visible() {
            guard.fill_rect(state.transform.to_device_rect(state.plot_rect), chart.background)?;
        }
        for id in AxisId::ALL {
            render_axis(&mut *guard, ctx, self.provider, id, AxisParts::GRID)?;
        }

        let mut geometry = SeriesGeometryPainter::new(ctx);
        iterate_series(ctx, self.model, &mut *guard, &mut geometry, StackDirection::Forward)?;
        let mut labels = ValueLabelPainter::new(ctx);
        iterate_series(ctx, self.model, &mut *guard, &mut labels, StackDirection::Reverse)?;
        let mut markers = MarkerPainter::new(ctx);
        iterate_series(ctx, self.model, &mut *guard, &mut markers, StackDirection::Reverse)?;

        for id in AxisId::ALL {
            render_axis(&mut *guard, ctx, self.provider, id, AxisParts::LINE_AND_LABELS)?;
        }
        render_legend(&mut *guard, ctx, self.model)?;
        drop(guard);

        debug!(plot = ?state.plot_rect, "render pass end");
        Ok(state)
    }
}

/// Renders `chart` into `rectangle` using the automatic axis range provider.
pub fn render_chart<M, S>(
    chart: &Chart,
    model: &M,
    surface: &mut S,
    rectangle: Rect,
) -> ChartResult<RenderState>
where
    M: TabularModel + ?Sized,
    S: DrawingSurface + ?Sized,
{
    let provider = AutoRangeProvider::default();
    ChartRenderer::new(chart, model, &provider, rectangle)?.render(surface)
}
