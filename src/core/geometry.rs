use serde::{Deserialize, Serialize};

/// Point in either logical chart space or device space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// Width and height are expected to be non-negative; use [`Rect::from_corners`]
/// when the corner order is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Canonical rectangle spanning two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self::new(left, top, (a.x - b.x).abs(), (a.y - b.y).abs())
    }

    /// Smallest canonical rectangle containing every point.
    #[must_use]
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut left, mut top, mut right, mut bottom) = (first.x, first.y, first.x, first.y);
        for point in &points[1..] {
            left = left.min(point.x);
            top = top.min(point.y);
            right = right.max(point.x);
            bottom = bottom.max(point.y);
        }
        Some(Self::new(left, top, right - left, bottom - top))
    }

    #[must_use]
    pub fn left(self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn top_left(self) -> Point {
        Point::new(self.left(), self.top())
    }

    #[must_use]
    pub fn top_right(self) -> Point {
        Point::new(self.right(), self.top())
    }

    #[must_use]
    pub fn bottom_left(self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    #[must_use]
    pub fn bottom_right(self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    #[must_use]
    pub fn corners(self) -> [Point; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }
}

/// One element of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathElement {
    MoveTo(Point),
    LineTo(Point),
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    Close,
}

/// Vector path built from move/line/curve segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn rect(rect: Rect) -> Self {
        let mut path = Self::new();
        path.add_rect(rect);
        path
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.elements.push(PathElement::MoveTo(point));
        self
    }

    /// Appends a line; an empty path starts with an implicit move-to instead.
    pub fn line_to(&mut self, point: Point) -> &mut Self {
        if self.elements.is_empty() {
            self.elements.push(PathElement::MoveTo(point));
        } else {
            self.elements.push(PathElement::LineTo(point));
        }
        self
    }

    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) -> &mut Self {
        self.elements.push(PathElement::CubicTo { ctrl1, ctrl2, to });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathElement::Close);
        self
    }

    pub fn add_rect(&mut self, rect: Rect) -> &mut Self {
        self.move_to(rect.top_left())
            .line_to(rect.top_right())
            .line_to(rect.bottom_right())
            .line_to(rect.bottom_left())
            .close()
    }

    /// Appends a circle approximated by four cubic arcs.
    pub fn add_ellipse(&mut self, center: Point, radius_x: f64, radius_y: f64) -> &mut Self {
        // Control-point distance for a quarter circle.
        const KAPPA: f64 = 0.552_284_749_831;
        let (cx, cy) = (center.x, center.y);
        let (kx, ky) = (radius_x * KAPPA, radius_y * KAPPA);
        self.move_to(Point::new(cx + radius_x, cy))
            .cubic_to(
                Point::new(cx + radius_x, cy + ky),
                Point::new(cx + kx, cy + radius_y),
                Point::new(cx, cy + radius_y),
            )
            .cubic_to(
                Point::new(cx - kx, cy + radius_y),
                Point::new(cx - radius_x, cy + ky),
                Point::new(cx - radius_x, cy),
            )
            .cubic_to(
                Point::new(cx - radius_x, cy - ky),
                Point::new(cx - kx, cy - radius_y),
                Point::new(cx, cy - radius_y),
            )
            .cubic_to(
                Point::new(cx + kx, cy - radius_y),
                Point::new(cx + radius_x, cy - ky),
                Point::new(cx + radius_x, cy),
            )
            .close()
    }

    #[must_use]
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// End points of every move/line/curve element, in order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point> {
        self.elements
            .iter()
            .filter_map(|element| match *element {
                PathElement::MoveTo(point) | PathElement::LineTo(point) => Some(point),
                PathElement::CubicTo { to, .. } => Some(to),
                PathElement::Close => None,
            })
            .collect()
    }

    /// Returns a copy with every point passed through `map`.
    #[must_use]
    pub fn map_points(&self, mut map: impl FnMut(Point) -> Point) -> Self {
        let elements = self
            .elements
            .iter()
            .map(|element| match *element {
                PathElement::MoveTo(point) => PathElement::MoveTo(map(point)),
                PathElement::LineTo(point) => PathElement::LineTo(map(point)),
                PathElement::CubicTo { ctrl1, ctrl2, to } => PathElement::CubicTo {
                    ctrl1: map(ctrl1),
                    ctrl2: map(ctrl2),
                    to: map(to),
                },
                PathElement::Close => PathElement::Close,
            })
            .collect();
        Self { elements }
    }
}

/// 2D affine transform `[a c e; b d f; 0 0 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    #[must_use]
    pub const fn translation(dx: f64, dy: f64) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::identity()
        }
    }

    /// Clockwise rotation in degrees (y axis pointing down).
    #[must_use]
    pub fn rotation(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Returns `self * other`: `other` is applied to points first.
    #[must_use]
    pub fn then_local(self, other: Self) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    #[must_use]
    pub fn apply(self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        self == Self::identity()
    }
}
