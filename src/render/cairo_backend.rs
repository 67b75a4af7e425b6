use std::io::Write;

use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;
use tracing::warn;

use crate::api::{Chart, render_chart};
use crate::core::{
    Alignment, HorizontalAlign, Path, PathElement, Point, Rect, TabularModel, VerticalAlign,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Brush, Color, DrawingSurface, Font, Pen};

#[derive(Debug, Clone)]
struct PaintState {
    pen: Pen,
    brush: Brush,
    font: Font,
}

/// [`DrawingSurface`] over a Cairo context, with text laid out by Pango.
///
/// Works on any context, e.g. an offscreen image surface or a GTK
/// `DrawingArea` callback. Transform and clip live in the Cairo context;
/// pen, brush and font are tracked alongside it.
pub struct CairoSurface<'c> {
    context: &'c Context,
    state: PaintState,
    stack: Vec<PaintState>,
}

impl<'c> CairoSurface<'c> {
    #[must_use]
    pub fn new(context: &'c Context) -> Self {
        Self {
            context,
            state: PaintState {
                pen: Pen::default(),
                brush: Brush::None,
                font: Font::default(),
            },
            stack: Vec::new(),
        }
    }

    fn append_path(&self, path: &Path) {
        self.context.new_path();
        for element in path.elements() {
            match *element {
                PathElement::MoveTo(p) => self.context.move_to(p.x, p.y),
                PathElement::LineTo(p) => self.context.line_to(p.x, p.y),
                PathElement::CubicTo { ctrl1, ctrl2, to } => {
                    self.context
                        .curve_to(ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y);
                }
                PathElement::Close => self.context.close_path(),
            }
        }
    }

    fn apply_pen(&self, pen: Pen) {
        apply_color(self.context, pen.color);
        self.context.set_line_width(pen.width);
        self.context.set_dash(pen.dash_pattern(), 0.0);
    }

    fn stroke_current(&self, pen: Pen) -> ChartResult<()> {
        if !pen.is_visible() {
            self.context.new_path();
            return Ok(());
        }
        self.apply_pen(pen);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill_current_preserve(&self, brush: Brush) -> ChartResult<()> {
        if let Brush::Solid(color) = brush {
            apply_color(self.context, color);
            self.context
                .fill_preserve()
                .map_err(|err| map_backend_error("failed to fill path", err))?;
        }
        Ok(())
    }
}

impl DrawingSurface for CairoSurface<'_> {
    fn save(&mut self) {
        if let Err(err) = self.context.save() {
            warn!(error = %err, "cairo save failed");
        }
        self.stack.push(self.state.clone());
    }

    fn restore(&mut self) {
        let Some(state) = self.stack.pop() else {
            return;
        };
        self.state = state;
        if let Err(err) = self.context.restore() {
            warn!(error = %err, "cairo restore failed");
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.context.translate(dx, dy);
    }

    fn rotate(&mut self, degrees: f64) {
        self.context.rotate(degrees.to_radians());
    }

    fn set_clip_path(&mut self, path: &Path) {
        self.context.reset_clip();
        self.append_path(path);
        self.context.clip();
    }

    fn set_pen(&mut self, pen: Pen) {
        self.state.pen = pen;
    }

    fn set_brush(&mut self, brush: Brush) {
        self.state.brush = brush;
    }

    fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    fn pen(&self) -> Pen {
        self.state.pen
    }

    fn font(&self) -> Font {
        self.state.font.clone()
    }

    fn fill_rect(&mut self, rect: Rect, brush: Brush) -> ChartResult<()> {
        let Brush::Solid(color) = brush else {
            return Ok(());
        };
        apply_color(self.context, color);
        self.context.rectangle(rect.x, rect.y, rect.width, rect.height);
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))
    }

    fn draw_line(&mut self, from: Point, to: Point) -> ChartResult<()> {
        self.context.new_path();
        self.context.move_to(from.x, from.y);
        self.context.line_to(to.x, to.y);
        self.stroke_current(self.state.pen)
    }

    fn draw_path(&mut self, path: &Path) -> ChartResult<()> {
        self.append_path(path);
        self.fill_current_preserve(self.state.brush)?;
        self.stroke_current(self.state.pen)
    }

    fn stroke_path(&mut self, path: &Path, pen: Pen) -> ChartResult<()> {
        self.append_path(path);
        self.stroke_current(pen)
    }

    fn draw_text(&mut self, rect: Rect, alignment: Alignment, text: &str) -> ChartResult<()> {
        let layout = pangocairo::functions::create_layout(self.context);
        let font = &self.state.font;
        let mut description = FontDescription::new();
        description.set_family(&font.family);
        description.set_absolute_size(font.size_px * f64::from(pango::SCALE));
        if font.bold {
            description.set_weight(pango::Weight::Bold);
        }
        layout.set_font_description(Some(&description));
        layout.set_text(text);

        let (text_width, text_height) = layout.pixel_size();
        let (text_width, text_height) = (f64::from(text_width), f64::from(text_height));
        let x = match alignment.horizontal {
            HorizontalAlign::Left => rect.x,
            HorizontalAlign::Center => rect.x + (rect.width - text_width) / 2.0,
            HorizontalAlign::Right => rect.right() - text_width,
        };
        let y = match alignment.vertical {
            VerticalAlign::Top => rect.y,
            VerticalAlign::Middle => rect.y + (rect.height - text_height) / 2.0,
            VerticalAlign::Bottom => rect.bottom() - text_height,
        };

        apply_color(self.context, self.state.pen.color);
        self.context.move_to(x, y);
        pangocairo::functions::show_layout(self.context, &layout);
        self.context.new_path();
        Ok(())
    }
}

/// Renders `chart` on a white `width` x `height` image and writes it as PNG.
pub fn render_to_png<M, W>(
    chart: &Chart,
    model: &M,
    width: i32,
    height: i32,
    writer: &mut W,
) -> ChartResult<()>
where
    M: TabularModel + ?Sized,
    W: Write,
{
    if width <= 0 || height <= 0 {
        return Err(ChartError::InvalidViewport {
            width: f64::from(width),
            height: f64::from(height),
        });
    }
    let surface = ImageSurface::create(Format::ARgb32, width, height)
        .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
    {
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        apply_color(&context, Color::WHITE);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;
        let mut target = CairoSurface::new(&context);
        render_chart(
            chart,
            model,
            &mut target,
            Rect::new(0.0, 0.0, f64::from(width), f64::from(height)),
        )?;
    }
    surface
        .write_to_png(writer)
        .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
