use serde::{Deserialize, Serialize};

use crate::core::{
    Axis, AxisId, ChartType, DataSeries, Orientation, Padding, SeriesKind, TabularModel,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Brush, Font};

/// Render-space gap between axis segments, leaving room for break markers.
pub const DEFAULT_SEGMENT_MARGIN: f64 = 40.0;

pub const CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Cartesian chart description: axes, series and decoration.
///
/// A chart owns no render state; every render pass derives its geometry from
/// this value, the data model and an axis range provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chart {
    pub orientation: Orientation,
    pub chart_type: ChartType,
    pub series: Vec<DataSeries>,
    /// Indexed by [`AxisId::index`]: X, Y1, Y2.
    pub axes: [Axis; 3],
    pub padding: Padding,
    pub title: String,
    pub title_font: Font,
    pub background: Brush,
    pub legend_enabled: bool,
    /// Column supplying X values for scatter plots; row index when unset.
    pub x_series_column: Option<usize>,
    pub segment_margin: f64,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(ChartType::Category)
    }
}

impl Chart {
    #[must_use]
    pub fn new(chart_type: ChartType) -> Self {
        let x_scale = match chart_type {
            ChartType::Category => crate::core::AxisScale::Category,
            ChartType::Scatter => crate::core::AxisScale::Linear,
        };
        Self {
            orientation: Orientation::Vertical,
            chart_type,
            series: Vec::new(),
            axes: [
                Axis::new(AxisId::X).with_scale(x_scale),
                Axis::new(AxisId::Y1),
                Axis::new(AxisId::Y2),
            ],
            padding: Padding::default(),
            title: String::new(),
            title_font: Font::new("Sans", 15.0).bold(),
            background: Brush::None,
            legend_enabled: false,
            x_series_column: None,
            segment_margin: DEFAULT_SEGMENT_MARGIN,
        }
    }

    #[must_use]
    pub fn category() -> Self {
        Self::new(ChartType::Category)
    }

    #[must_use]
    pub fn scatter() -> Self {
        Self::new(ChartType::Scatter)
    }

    #[must_use]
    pub fn axis(&self, id: AxisId) -> &Axis {
        &self.axes[id.index()]
    }

    pub fn axis_mut(&mut self, id: AxisId) -> &mut Axis {
        &mut self.axes[id.index()]
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_series(mut self, series: DataSeries) -> Self {
        self.series.push(series);
        self
    }

    /// Replaces the axis with the same id.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        let index = axis.id.index();
        self.axes[index] = axis;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_background(mut self, background: Brush) -> Self {
        self.background = background;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, enabled: bool) -> Self {
        self.legend_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_x_series_column(mut self, column: usize) -> Self {
        self.x_series_column = Some(column);
        self
    }

    #[must_use]
    pub fn with_segment_margin(mut self, margin: f64) -> Self {
        self.segment_margin = margin;
        self
    }

    #[must_use]
    pub fn contains_bars(&self, axis: AxisId) -> bool {
        self.series
            .iter()
            .any(|series| series.axis == axis && series.kind == SeriesKind::Bar)
    }

    /// Legend text for the series at `index`.
    #[must_use]
    pub fn series_name<M: TabularModel + ?Sized>(&self, index: usize, model: &M) -> String {
        let Some(series) = self.series.get(index) else {
            return String::new();
        };
        series
            .name
            .clone()
            .or_else(|| model.header(series.model_column))
            .unwrap_or_else(|| format!("Series {}", series.model_column))
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (index, axis) in self.axes.iter().enumerate() {
            if axis.id.index() != index {
                return Err(ChartError::InvalidData(format!(
                    "axis slot {index} holds {:?} axis",
                    axis.id
                )));
            }
            axis.validate()?;
        }
        for series in &self.series {
            series.validate()?;
        }
        if !self.segment_margin.is_finite() || self.segment_margin < 0.0 {
            return Err(ChartError::InvalidData(
                "segment margin must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(color) = self.background.color() {
            color.validate()?;
        }
        self.padding.validate()?;
        self.title_font.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        ChartConfig::from_json_str(input).map(|config| config.chart)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        ChartConfig::new(self.clone()).to_json_pretty()
    }
}

/// Versioned, serializable chart setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub schema_version: u32,
    pub chart: Chart,
}

impl ChartConfig {
    #[must_use]
    pub fn new(chart: Chart) -> Self {
        Self {
            schema_version: CHART_CONFIG_JSON_SCHEMA_V1,
            chart,
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart config: {e}"))
        })
    }

    /// Parses a config, validating its schema version and chart contents.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart config json: {e}"))
        })?;
        if config.schema_version != CHART_CONFIG_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart config schema version: {}",
                config.schema_version
            )));
        }
        config.chart.validate()?;
        Ok(config)
    }
}
