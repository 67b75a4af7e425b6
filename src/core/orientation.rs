use serde::{Deserialize, Serialize};

use crate::core::geometry::{Path, Point, Rect};
use crate::core::types::{Alignment, HorizontalAlign, VerticalAlign};

/// Direction in which the X (category) axis runs on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// X axis horizontal, Y axis vertical.
    #[default]
    Vertical,
    /// X axis vertical (top to bottom), Y axis horizontal (left to right).
    Horizontal,
}

/// Maps logical chart coordinates to device coordinates.
///
/// Logical space always has the X axis horizontal and the Y axis vertical.
/// `logical_height` is the extent of the logical Y direction, which equals the
/// device width for horizontal charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationTransform {
    orientation: Orientation,
    logical_height: f64,
}

impl OrientationTransform {
    #[must_use]
    pub const fn new(orientation: Orientation, logical_height: f64) -> Self {
        Self {
            orientation,
            logical_height,
        }
    }

    #[must_use]
    pub fn orientation(self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn logical_height(self) -> f64 {
        self.logical_height
    }

    #[must_use]
    pub fn is_vertical(self) -> bool {
        self.orientation == Orientation::Vertical
    }

    #[must_use]
    pub fn to_device(self, point: Point) -> Point {
        match self.orientation {
            Orientation::Vertical => point,
            Orientation::Horizontal => Point::new(self.logical_height - point.y, point.x),
        }
    }

    #[must_use]
    pub fn to_device_xy(self, x: f64, y: f64) -> Point {
        self.to_device(Point::new(x, y))
    }

    /// Inverse of [`Self::to_device`].
    #[must_use]
    pub fn to_logical(self, point: Point) -> Point {
        match self.orientation {
            Orientation::Vertical => point,
            Orientation::Horizontal => Point::new(point.y, self.logical_height - point.x),
        }
    }

    /// Maps all four corners and re-derives the canonical rectangle, so
    /// width and height swap under horizontal orientation.
    #[must_use]
    pub fn to_device_rect(self, rect: Rect) -> Rect {
        if self.is_vertical() {
            return rect;
        }
        let corners = rect.corners().map(|corner| self.to_device(corner));
        Rect::bounding(&corners).unwrap_or(rect)
    }

    #[must_use]
    pub fn to_device_path(self, path: &Path) -> Path {
        if self.is_vertical() {
            return path.clone();
        }
        path.map_points(|point| self.to_device(point))
    }

    /// Transposes logical alignment flags: a label placed left of a point in
    /// logical space sits above it on a horizontal chart.
    #[must_use]
    pub fn to_device_alignment(self, alignment: Alignment) -> Alignment {
        if self.is_vertical() {
            return alignment;
        }
        let vertical = match alignment.horizontal {
            HorizontalAlign::Left => VerticalAlign::Top,
            HorizontalAlign::Center => VerticalAlign::Middle,
            HorizontalAlign::Right => VerticalAlign::Bottom,
        };
        let horizontal = match alignment.vertical {
            VerticalAlign::Top => HorizontalAlign::Right,
            VerticalAlign::Middle => HorizontalAlign::Center,
            VerticalAlign::Bottom => HorizontalAlign::Left,
        };
        Alignment::new(horizontal, vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::{Orientation, OrientationTransform};
    use crate::core::geometry::{Point, Rect};
    use crate::core::types::{Alignment, HorizontalAlign, VerticalAlign};

    #[test]
    fn horizontal_rect_swaps_dimensions() {
        let transform = OrientationTransform::new(Orientation::Horizontal, 300.0);
        let device = transform.to_device_rect(Rect::new(10.0, 20.0, 100.0, 50.0));
        assert_eq!(device, Rect::new(230.0, 10.0, 50.0, 100.0));
    }

    #[test]
    fn horizontal_alignment_is_transposed() {
        let transform = OrientationTransform::new(Orientation::Horizontal, 300.0);
        let aligned = transform.to_device_alignment(Alignment::new(
            HorizontalAlign::Right,
            VerticalAlign::Middle,
        ));
        assert_eq!(
            aligned,
            Alignment::new(HorizontalAlign::Center, VerticalAlign::Bottom)
        );
    }

    #[test]
    fn vertical_is_identity() {
        let transform = OrientationTransform::new(Orientation::Vertical, 300.0);
        let point = Point::new(-3.5, 42.0);
        assert_eq!(transform.to_device(point), point);
    }
}
