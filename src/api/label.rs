use crate::core::{Alignment, HorizontalAlign, OrientationTransform, Point, Rect, VerticalAlign};
use crate::error::ChartResult;
use crate::render::{Color, DrawingSurface, Pen, SurfaceGuard};

pub const LABEL_BOX_WIDTH: f64 = 100.0;
pub const LABEL_BOX_HEIGHT: f64 = 20.0;

/// Draws `text` next to a logical `position`.
///
/// `alignment` is logical: `Left` puts the text right of the point,
/// `Top` puts it below, each `margin` pixels away. The alignment is
/// transposed for horizontal charts. Non-zero `angle` (degrees,
/// counter-clockwise) rotates the text box around the anchor point.
#[allow(clippy::too_many_arguments)]
pub fn render_label<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    transform: OrientationTransform,
    text: &str,
    position: Point,
    color: Color,
    alignment: Alignment,
    angle: f64,
    margin: f64,
) -> ChartResult<()> {
    let anchor = transform.to_device(position);
    if !anchor.is_finite() {
        return Ok(());
    }
    let alignment = transform.to_device_alignment(alignment);
    let left = match alignment.horizontal {
        HorizontalAlign::Left => anchor.x + margin,
        HorizontalAlign::Center => anchor.x - LABEL_BOX_WIDTH / 2.0,
        HorizontalAlign::Right => anchor.x - LABEL_BOX_WIDTH - margin,
    };
    let top = match alignment.vertical {
        VerticalAlign::Top => anchor.y + margin,
        VerticalAlign::Middle => anchor.y - LABEL_BOX_HEIGHT / 2.0,
        VerticalAlign::Bottom => anchor.y - LABEL_BOX_HEIGHT - margin,
    };

    let mut guard = SurfaceGuard::new(surface);
    guard.set_pen(Pen::solid(color, 1.0));
    if angle == 0.0 {
        guard.draw_text(
            Rect::new(left, top, LABEL_BOX_WIDTH, LABEL_BOX_HEIGHT),
            alignment,
            text,
        )
    } else {
        guard.translate(anchor.x, anchor.y);
        guard.rotate(-angle);
        guard.draw_text(
            Rect::new(
                left - anchor.x,
                top - anchor.y,
                LABEL_BOX_WIDTH,
                LABEL_BOX_HEIGHT,
            ),
            alignment,
            text,
        )
    }
}
