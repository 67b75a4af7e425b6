use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, Font, Pen};

/// Identifies one of the three chart axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisId {
    X,
    Y1,
    Y2,
}

impl AxisId {
    pub const ALL: [Self; 3] = [Self::X, Self::Y1, Self::Y2];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y1 => 1,
            Self::Y2 => 2,
        }
    }

    /// `true` for the value axes, which run vertically in logical space.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        !matches!(self, Self::X)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisScale {
    #[default]
    Linear,
    Logarithmic,
    /// Values are Unix timestamps in seconds.
    Date,
    /// Values are row indices.
    Category,
}

impl AxisScale {
    /// Position of `value` inside `[min, max]` as a 0..=1 fraction (may fall
    /// outside that range). Logarithmic scales yield NaN for non-positive input.
    #[must_use]
    pub fn fraction(self, value: f64, min: f64, max: f64) -> f64 {
        match self {
            Self::Logarithmic => {
                if value <= 0.0 || min <= 0.0 || max <= 0.0 {
                    return f64::NAN;
                }
                let span = max.ln() - min.ln();
                if span == 0.0 {
                    0.0
                } else {
                    (value.ln() - min.ln()) / span
                }
            }
            Self::Linear | Self::Date | Self::Category => {
                let span = max - min;
                if span == 0.0 {
                    0.0
                } else if span.is_finite() {
                    (value - min) / span
                } else {
                    // Extents near f64::MAX overflow the plain difference.
                    let unit = min.abs().max(max.abs());
                    (value / unit - min / unit) / (max / unit - min / unit)
                }
            }
        }
    }

    /// Value extent used to distribute render length between segments.
    #[must_use]
    pub fn span(self, min: f64, max: f64) -> f64 {
        match self {
            Self::Logarithmic if min > 0.0 && max > 0.0 => (max.ln() - min.ln()).abs(),
            _ => (max - min).abs(),
        }
    }
}

/// Where an axis line is drawn relative to the companion axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisLocation {
    #[default]
    MinimumValue,
    MaximumValue,
    ZeroValue,
}

/// Value range omitted from an axis, rendered as a break.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBreak {
    pub from: f64,
    pub to: f64,
}

impl AxisBreak {
    #[must_use]
    pub fn new(from: f64, to: f64) -> Self {
        Self {
            from: from.min(to),
            to: from.max(to),
        }
    }
}

/// Contiguous value range of an axis and its placement in logical render space.
///
/// For the X axis the segment covers `[render_start, render_start + render_length]`;
/// for Y axes it grows upward, covering `[render_start - render_length, render_start]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSegment {
    pub value_min: f64,
    pub value_max: f64,
    pub render_start: f64,
    pub render_length: f64,
}

impl AxisSegment {
    #[must_use]
    pub const fn new(value_min: f64, value_max: f64, render_start: f64, render_length: f64) -> Self {
        Self {
            value_min,
            value_max,
            render_start,
            render_length,
        }
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.value_min && value <= self.value_max
    }

    /// Render interval as `(low, high)` logical coordinates.
    #[must_use]
    pub fn render_interval(self, vertical: bool) -> (f64, f64) {
        if vertical {
            (self.render_start - self.render_length, self.render_start)
        } else {
            (self.render_start, self.render_start + self.render_length)
        }
    }
}

/// Ordered segment list of one axis for one render pass.
pub type AxisSegments = SmallVec<[AxisSegment; 2]>;

/// Checks the segment invariants: finite, non-negative render lengths,
/// strictly increasing value ranges and non-overlapping render intervals.
pub fn validate_segments(id: AxisId, segments: &[AxisSegment]) -> ChartResult<()> {
    let vertical = id.is_vertical();
    for (index, segment) in segments.iter().enumerate() {
        if !segment.value_min.is_finite()
            || !segment.value_max.is_finite()
            || !segment.render_start.is_finite()
            || !segment.render_length.is_finite()
        {
            return Err(ChartError::InvariantViolation(format!(
                "{id:?} segment {index} is not finite"
            )));
        }
        if segment.render_length < 0.0 {
            return Err(ChartError::InvariantViolation(format!(
                "{id:?} segment {index} has negative render length {}",
                segment.render_length
            )));
        }
        if segment.value_min > segment.value_max {
            return Err(ChartError::InvariantViolation(format!(
                "{id:?} segment {index} has inverted value range"
            )));
        }
    }
    for (index, pair) in segments.windows(2).enumerate() {
        let (previous, next) = (pair[0], pair[1]);
        if next.value_min <= previous.value_max {
            return Err(ChartError::InvariantViolation(format!(
                "{id:?} segment {} value range overlaps its predecessor",
                index + 1
            )));
        }
        let (previous_low, previous_high) = previous.render_interval(vertical);
        let (next_low, next_high) = next.render_interval(vertical);
        let ordered = if vertical {
            next_high <= previous_low
        } else {
            next_low >= previous_high
        };
        if !ordered {
            return Err(ChartError::InvariantViolation(format!(
                "{id:?} segment {} render interval overlaps its predecessor",
                index + 1
            )));
        }
    }
    Ok(())
}

/// Axis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Axis {
    pub id: AxisId,
    pub scale: AxisScale,
    pub location: AxisLocation,
    pub visible: bool,
    pub grid_lines_enabled: bool,
    pub pen: Pen,
    pub grid_pen: Pen,
    /// Distance between the plot area and the axis line, in pixels.
    pub margin: f64,
    pub title: String,
    pub title_font: Font,
    pub label_font: Font,
    /// Tick label rotation in degrees; positive turns counter-clockwise.
    pub label_angle: f64,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub breaks: Vec<AxisBreak>,
    /// Fixed number of decimals for tick labels; derived from tick spacing when unset.
    pub label_precision: Option<u8>,
    /// Labels for category ticks, indexed by row.
    pub category_labels: Vec<String>,
}

impl Default for Axis {
    fn default() -> Self {
        Self::new(AxisId::Y1)
    }
}

impl Axis {
    #[must_use]
    pub fn new(id: AxisId) -> Self {
        Self {
            id,
            scale: AxisScale::Linear,
            location: match id {
                AxisId::Y2 => AxisLocation::MaximumValue,
                AxisId::X | AxisId::Y1 => AxisLocation::MinimumValue,
            },
            visible: id != AxisId::Y2,
            grid_lines_enabled: false,
            pen: Pen::solid(Color::BLACK, 1.0),
            grid_pen: Pen::solid(Color::LIGHT_GRAY, 1.0),
            margin: 0.0,
            title: String::new(),
            title_font: Font::new("Sans", 11.0).bold(),
            label_font: Font::default(),
            label_angle: 0.0,
            minimum: None,
            maximum: None,
            breaks: Vec::new(),
            label_precision: None,
            category_labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: AxisScale) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: AxisLocation) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_grid_lines(mut self, enabled: bool) -> Self {
        self.grid_lines_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_range(mut self, minimum: f64, maximum: f64) -> Self {
        self.minimum = Some(minimum);
        self.maximum = Some(maximum);
        self
    }

    #[must_use]
    pub fn with_break(mut self, from: f64, to: f64) -> Self {
        self.breaks.push(AxisBreak::new(from, to));
        self
    }

    #[must_use]
    pub fn with_label_angle(mut self, degrees: f64) -> Self {
        self.label_angle = degrees;
        self
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_category_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{:?} axis margin must be finite and >= 0",
                self.id
            )));
        }
        if !self.label_angle.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "{:?} axis label angle must be finite",
                self.id
            )));
        }
        if let (Some(minimum), Some(maximum)) = (self.minimum, self.maximum) {
            if !minimum.is_finite() || !maximum.is_finite() || minimum >= maximum {
                return Err(ChartError::InvalidData(format!(
                    "{:?} axis range must be finite with minimum < maximum",
                    self.id
                )));
            }
        }
        if self.scale == AxisScale::Logarithmic && self.minimum.is_some_and(|min| min <= 0.0) {
            return Err(ChartError::InvalidData(format!(
                "{:?} logarithmic axis minimum must be > 0",
                self.id
            )));
        }
        self.pen.validate()?;
        self.grid_pen.validate()?;
        self.title_font.validate()?;
        self.label_font.validate()
    }
}

/// An axis paired with the segments prepared for the current render pass.
#[derive(Debug, Clone, Copy)]
pub struct AxisView<'a> {
    pub axis: &'a Axis,
    pub segments: &'a [AxisSegment],
}

impl<'a> AxisView<'a> {
    #[must_use]
    pub fn new(axis: &'a Axis, segments: &'a [AxisSegment]) -> Self {
        Self { axis, segments }
    }

    #[must_use]
    pub fn id(self) -> AxisId {
        self.axis.id
    }

    #[must_use]
    pub fn segment_count(self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn segment(self, index: usize) -> Option<AxisSegment> {
        self.segments.get(index).copied()
    }

    #[must_use]
    pub fn first_segment(self) -> Option<AxisSegment> {
        self.segments.first().copied()
    }

    /// Maps `value` into logical render space using segment `segment`.
    ///
    /// Returns NaN for an out-of-range segment or a value the scale cannot
    /// represent (non-positive values on a logarithmic axis).
    #[must_use]
    pub fn map(self, value: f64, segment: usize) -> f64 {
        let Some(s) = self.segment(segment) else {
            return f64::NAN;
        };
        let fraction = self.axis.scale.fraction(value, s.value_min, s.value_max);
        if self.axis.id.is_vertical() {
            s.render_start - fraction * s.render_length
        } else {
            s.render_start + fraction * s.render_length
        }
    }

    /// Index of the segment whose value range contains `value`, if any.
    #[must_use]
    pub fn segment_of(self, value: f64) -> Option<usize> {
        self.segments.iter().position(|segment| segment.contains(value))
    }

    /// Maps `value` in whichever segment contains it, falling back to the first.
    #[must_use]
    pub fn map_any(self, value: f64) -> f64 {
        self.map(value, self.segment_of(value).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisId, AxisScale, AxisSegment, AxisView, validate_segments};
    use crate::error::ChartError;

    #[test]
    fn fraction_survives_extents_near_f64_max() {
        let fraction = AxisScale::Linear.fraction(1e308, -1e308, 1e308);
        assert!((fraction - 1.0).abs() <= 1e-12);
        let middle = AxisScale::Linear.fraction(0.0, -1e308, 1e308);
        assert!((middle - 0.5).abs() <= 1e-12);
    }

    #[test]
    fn y_axis_maps_upward_from_render_start() {
        let axis = Axis::new(AxisId::Y1);
        let segments = [AxisSegment::new(0.0, 100.0, 400.0, 300.0)];
        let view = AxisView::new(&axis, &segments);
        assert!((view.map(0.0, 0) - 400.0).abs() <= 1e-9);
        assert!((view.map(50.0, 0) - 250.0).abs() <= 1e-9);
        assert!((view.map(100.0, 0) - 100.0).abs() <= 1e-9);
    }

    #[test]
    fn logarithmic_axis_maps_decades_evenly() {
        let axis = Axis::new(AxisId::X).with_scale(AxisScale::Logarithmic);
        let segments = [AxisSegment::new(1.0, 100.0, 0.0, 200.0)];
        let view = AxisView::new(&axis, &segments);
        assert!((view.map(10.0, 0) - 100.0).abs() <= 1e-9);
        assert!(view.map(0.0, 0).is_nan());
    }

    #[test]
    fn negative_render_length_is_invariant_violation() {
        let err = validate_segments(AxisId::X, &[AxisSegment::new(0.0, 1.0, 0.0, -5.0)])
            .expect_err("negative length must fail");
        assert!(matches!(err, ChartError::InvariantViolation(_)));
    }

    #[test]
    fn overlapping_y_segments_are_rejected() {
        let segments = [
            AxisSegment::new(0.0, 10.0, 400.0, 200.0),
            AxisSegment::new(20.0, 30.0, 250.0, 100.0),
        ];
        assert!(validate_segments(AxisId::Y1, &segments).is_err());

        let segments = [
            AxisSegment::new(0.0, 10.0, 400.0, 200.0),
            AxisSegment::new(20.0, 30.0, 160.0, 100.0),
        ];
        validate_segments(AxisId::Y1, &segments).expect("separated segments");
    }
}
