use serde::{Deserialize, Serialize};

use crate::core::AxisId;
use crate::error::{ChartError, ChartResult};
use crate::render::{Brush, Color, Pen};

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SeriesKind {
    #[default]
    Line,
    Bar,
    Scatter,
}

/// Whether the X value comes from the row index or from a data column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    Category,
    Scatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarkerKind {
    #[default]
    None,
    Square,
    Circle,
    Cross,
    XCross,
    Triangle,
}

/// One plotted column of the tabular data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSeries {
    pub model_column: usize,
    pub axis: AxisId,
    pub kind: SeriesKind,
    /// Adds on top of the preceding series bound to the same axis.
    pub stacked: bool,
    pub legend_enabled: bool,
    /// Draws each row's own (non-cumulative) value next to its point.
    pub labels_enabled: bool,
    /// Closes line series down to their stack base and fills with `brush`.
    pub fill_area: bool,
    pub name: Option<String>,
    pub pen: Pen,
    pub brush: Brush,
    pub marker: MarkerKind,
    pub marker_size: f64,
}

impl Default for DataSeries {
    fn default() -> Self {
        Self::new(0, SeriesKind::Line)
    }
}

impl DataSeries {
    #[must_use]
    pub fn new(model_column: usize, kind: SeriesKind) -> Self {
        let color = Color::palette(model_column);
        Self {
            model_column,
            axis: AxisId::Y1,
            kind,
            stacked: false,
            legend_enabled: true,
            labels_enabled: false,
            fill_area: false,
            name: None,
            pen: Pen::solid(color, if kind == SeriesKind::Bar { 1.0 } else { 2.0 }),
            brush: Brush::Solid(color),
            marker: if kind == SeriesKind::Scatter {
                MarkerKind::Circle
            } else {
                MarkerKind::None
            },
            marker_size: 6.0,
        }
    }

    #[must_use]
    pub fn line(model_column: usize) -> Self {
        Self::new(model_column, SeriesKind::Line)
    }

    #[must_use]
    pub fn bar(model_column: usize) -> Self {
        Self::new(model_column, SeriesKind::Bar)
    }

    #[must_use]
    pub fn scatter(model_column: usize) -> Self {
        Self::new(model_column, SeriesKind::Scatter)
    }

    #[must_use]
    pub fn stacked(mut self) -> Self {
        self.stacked = true;
        self
    }

    #[must_use]
    pub fn on_axis(mut self, axis: AxisId) -> Self {
        self.axis = axis;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_pen(mut self, pen: Pen) -> Self {
        self.pen = pen;
        self
    }

    #[must_use]
    pub fn with_brush(mut self, brush: Brush) -> Self {
        self.brush = brush;
        self
    }

    #[must_use]
    pub fn with_marker(mut self, marker: MarkerKind) -> Self {
        self.marker = marker;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, enabled: bool) -> Self {
        self.labels_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, enabled: bool) -> Self {
        self.legend_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_fill_area(mut self, enabled: bool) -> Self {
        self.fill_area = enabled;
        self
    }

    #[must_use]
    pub fn is_bar(&self) -> bool {
        self.kind == SeriesKind::Bar
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.axis == AxisId::X {
            return Err(ChartError::InvalidData(
                "series must be bound to a Y axis".to_owned(),
            ));
        }
        if !self.marker_size.is_finite() || self.marker_size <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker size must be finite and > 0".to_owned(),
            ));
        }
        self.pen.validate()?;
        if let Some(color) = self.brush.color() {
            color.validate()?;
        }
        Ok(())
    }
}
