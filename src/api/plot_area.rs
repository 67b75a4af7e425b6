use crate::core::{Orientation, Padding, Rect};

/// Logical `(width, height)` of a drawing area: dimensions swap on
/// horizontal charts, where logical X runs down the device.
#[must_use]
pub fn logical_size(width: f64, height: f64, orientation: Orientation) -> (f64, f64) {
    match orientation {
        Orientation::Vertical => (width, height),
        Orientation::Horizontal => (height, width),
    }
}

/// Plot area in logical coordinates for a drawing area of the given logical
/// size, origin at the drawing area's top-left corner.
///
/// Padding is expressed in device sides. On a horizontal chart logical X
/// follows the device's vertical direction, so it is inset by `top`/`bottom`,
/// and logical Y (measured from the device's right edge) by `right`/`left`.
/// Sizes never go negative: an over-padded area collapses to zero extent.
#[must_use]
pub fn plot_area(
    logical_width: f64,
    logical_height: f64,
    padding: Padding,
    orientation: Orientation,
) -> Rect {
    let (x, y, width, height) = match orientation {
        Orientation::Vertical => (
            padding.left,
            padding.top,
            logical_width - padding.left - padding.right,
            logical_height - padding.top - padding.bottom,
        ),
        Orientation::Horizontal => (
            padding.top,
            padding.right,
            logical_width - padding.top - padding.bottom,
            logical_height - padding.right - padding.left,
        ),
    };
    Rect::new(x, y, width.max(0.0), height.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::{logical_size, plot_area};
    use crate::core::{Orientation, OrientationTransform, Padding};

    #[test]
    fn vertical_plot_area_subtracts_padding() {
        let rect = plot_area(600.0, 400.0, Padding::default(), Orientation::Vertical);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (80.0, 40.0, 480.0, 320.0));
    }

    #[test]
    fn horizontal_plot_area_lands_inside_device_padding() {
        let padding = Padding::new(80.0, 40.0, 30.0, 20.0);
        let (lw, lh) = logical_size(600.0, 400.0, Orientation::Horizontal);
        let logical = plot_area(lw, lh, padding, Orientation::Horizontal);
        let device = OrientationTransform::new(Orientation::Horizontal, lh).to_device_rect(logical);
        assert!((device.left() - 80.0).abs() <= 1e-9);
        assert!((device.right() - 560.0).abs() <= 1e-9);
        assert!((device.top() - 30.0).abs() <= 1e-9);
        assert!((device.bottom() - 380.0).abs() <= 1e-9);
    }

    #[test]
    fn over_padding_collapses_to_empty() {
        let rect = plot_area(50.0, 50.0, Padding::default(), Orientation::Vertical);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }
}
