use std::ops::{Deref, DerefMut};

use crate::core::{Alignment, Path, Point, Rect};
use crate::error::ChartResult;
use crate::render::{Brush, Font, Pen};

/// Contract implemented by any drawing backend.
///
/// Coordinates handed to drawing calls are in the surface's current user
/// space, i.e. after the transform accumulated through `translate`/`rotate`.
/// `save`/`restore` push and pop the transform, clip, pen, brush and font as
/// one unit. Callers should prefer [`SurfaceGuard`] over raw `save`/`restore`.
pub trait DrawingSurface {
    fn save(&mut self);
    /// Pops the state pushed by the matching `save`. Unbalanced calls are a
    /// caller defect and are ignored by backends.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);
    /// Clockwise rotation in degrees.
    fn rotate(&mut self, degrees: f64);
    /// Replaces the clip region for the current save level.
    fn set_clip_path(&mut self, path: &Path);

    fn set_pen(&mut self, pen: Pen);
    fn set_brush(&mut self, brush: Brush);
    fn set_font(&mut self, font: Font);
    fn pen(&self) -> Pen;
    fn font(&self) -> Font;

    fn fill_rect(&mut self, rect: Rect, brush: Brush) -> ChartResult<()>;
    /// Strokes a single line with the current pen.
    fn draw_line(&mut self, from: Point, to: Point) -> ChartResult<()>;
    /// Fills with the current brush, then strokes with the current pen.
    fn draw_path(&mut self, path: &Path) -> ChartResult<()>;
    /// Strokes with `pen`, leaving the current pen untouched.
    fn stroke_path(&mut self, path: &Path, pen: Pen) -> ChartResult<()>;
    /// Draws `text` inside `rect`, positioned by `alignment`, using the
    /// current pen color and font.
    fn draw_text(&mut self, rect: Rect, alignment: Alignment, text: &str) -> ChartResult<()>;
}

/// Scoped save/restore over a [`DrawingSurface`].
///
/// `save` runs on construction and `restore` on drop, so every exit path of
/// the owning scope (including `?` early returns) leaves the surface state as
/// it was found.
pub struct SurfaceGuard<'s, S: DrawingSurface + ?Sized> {
    surface: &'s mut S,
}

impl<'s, S: DrawingSurface + ?Sized> SurfaceGuard<'s, S> {
    pub fn new(surface: &'s mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawingSurface + ?Sized> Deref for SurfaceGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for SurfaceGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for SurfaceGuard<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
