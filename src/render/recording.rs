use crate::core::{Alignment, Path, Point, Rect, Transform};
use crate::error::{ChartError, ChartResult};
use crate::render::{Brush, Color, DrawingSurface, Font, Pen};

/// One recorded drawing primitive, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        brush: Brush,
    },
    Line {
        from: Point,
        to: Point,
        pen: Pen,
    },
    Path {
        path: Path,
        pen: Pen,
        brush: Brush,
    },
    StrokePath {
        path: Path,
        pen: Pen,
    },
    Text {
        rect: Rect,
        alignment: Alignment,
        text: String,
        color: Color,
        font: Font,
        rotation_deg: f64,
    },
    Clip {
        rect: Rect,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct SurfaceState {
    transform: Transform,
    pen: Pen,
    brush: Brush,
    font: Font,
    clip: Option<Rect>,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            pen: Pen::default(),
            brush: Brush::None,
            font: Font::default(),
            clip: None,
        }
    }
}

/// Headless surface that records every primitive it receives.
///
/// Used by tests and headless hosts. Points are stored after the current
/// transform is applied, so assertions read device coordinates directly.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: SurfaceState,
    stack: Vec<SurfaceState>,
    commands: Vec<DrawCommand>,
    max_depth: usize,
    unbalanced_restores: usize,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Paths emitted through `draw_path`.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Path { path, .. } => Some(path),
            _ => None,
        })
    }

    /// Paths emitted through `stroke_path`.
    pub fn stroked_paths(&self) -> impl Iterator<Item = &Path> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::StrokePath { path, .. } => Some(path),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Current save depth; zero when every `save` was restored.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.state.transform
    }

    /// Device-space bounds of the active clip, if any.
    #[must_use]
    pub fn clip(&self) -> Option<Rect> {
        self.state.clip
    }

    /// Checks the save/restore discipline was respected.
    pub fn validate(&self) -> ChartResult<()> {
        if !self.stack.is_empty() {
            return Err(ChartError::InvariantViolation(format!(
                "{} surface save(s) left without restore",
                self.stack.len()
            )));
        }
        if self.unbalanced_restores > 0 {
            return Err(ChartError::InvariantViolation(format!(
                "{} restore(s) without matching save",
                self.unbalanced_restores
            )));
        }
        Ok(())
    }

    fn map(&self, point: Point) -> Point {
        self.state.transform.apply(point)
    }

    fn map_rect(&self, rect: Rect) -> Rect {
        let corners = rect.corners().map(|corner| self.map(corner));
        Rect::bounding(&corners).unwrap_or(rect)
    }

    fn rotation_deg(&self) -> f64 {
        let transform = self.state.transform;
        transform.b.atan2(transform.a).to_degrees()
    }
}

impl DrawingSurface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state.clone());
        self.max_depth = self.max_depth.max(self.stack.len());
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => self.unbalanced_restores += 1,
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self
            .state
            .transform
            .then_local(Transform::translation(dx, dy));
    }

    fn rotate(&mut self, degrees: f64) {
        self.state.transform = self
            .state
            .transform
            .then_local(Transform::rotation(degrees));
    }

    fn set_clip_path(&mut self, path: &Path) {
        let vertices: Vec<Point> = path.vertices().into_iter().map(|p| self.map(p)).collect();
        let Some(rect) = Rect::bounding(&vertices) else {
            return;
        };
        self.state.clip = Some(rect);
        self.commands.push(DrawCommand::Clip { rect });
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
        if !rect.is_finite() {
            return Err(ChartError::InvalidData(
                "fill rectangle must be finite".to_owned(),
            ));
        }
        let rect = self.map_rect(rect);
        self.commands.push(DrawCommand::FillRect { rect, brush });
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point) -> ChartResult<()> {
        if !from.is_finite() || !to.is_finite() {
            return Err(ChartError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        let (from, to) = (self.map(from), self.map(to));
        let pen = self.state.pen;
        self.commands.push(DrawCommand::Line { from, to, pen });
        Ok(())
    }

    fn draw_path(&mut self, path: &Path) -> ChartResult<()> {
        let path = path.map_points(|point| self.map(point));
        self.commands.push(DrawCommand::Path {
            path,
            pen: self.state.pen,
            brush: self.state.brush,
        });
        Ok(())
    }

    fn stroke_path(&mut self, path: &Path, pen: Pen) -> ChartResult<()> {
        if path.is_empty() {
            return Ok(());
        }
        let path = path.map_points(|point| self.map(point));
        self.commands.push(DrawCommand::StrokePath { path, pen });
        Ok(())
    }

    fn draw_text(&mut self, rect: Rect, alignment: Alignment, text: &str) -> ChartResult<()> {
        if !rect.is_finite() {
            return Err(ChartError::InvalidData(
                "text box must be finite".to_owned(),
            ));
        }
        let command = DrawCommand::Text {
            rect: self.map_rect(rect),
            alignment,
            text: text.to_owned(),
            color: self.state.pen.color,
            font: self.state.font.clone(),
            rotation_deg: self.rotation_deg(),
        };
        self.commands.push(command);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCommand, RecordingSurface};
    use crate::core::Point;
    use crate::render::{DrawingSurface, SurfaceGuard};

    #[test]
    fn guard_restores_transform_on_drop() {
        let mut surface = RecordingSurface::new();
        {
            let mut guard = SurfaceGuard::new(&mut surface);
            guard.translate(10.0, 5.0);
            guard
                .draw_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0))
                .expect("line");
            assert_eq!(guard.depth(), 1);
        }
        assert_eq!(surface.depth(), 0);
        assert!(surface.transform().is_identity());
        surface.validate().expect("balanced");

        let DrawCommand::Line { from, .. } = &surface.commands()[0] else {
            panic!("expected line");
        };
        assert_eq!(*from, Point::new(10.0, 5.0));
    }

    #[test]
    fn unbalanced_restore_is_reported() {
        let mut surface = RecordingSurface::new();
        surface.restore();
        assert!(surface.validate().is_err());
    }
}
