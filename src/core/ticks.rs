use chrono::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{
    Axis, AxisId, AxisScale, AxisSegment, AxisSegments, AxisView, Rect, validate_segments,
};
use crate::error::ChartResult;

/// Rendered length class of a tick mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickLength {
    /// No tick mark; the label (if any) is still drawn.
    Zero,
    Short,
    /// Full-length tick, also carries a gridline.
    Long,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabel {
    pub value: f64,
    pub length: TickLength,
    pub label: String,
}

impl TickLabel {
    #[must_use]
    pub fn new(value: f64, length: TickLength, label: impl Into<String>) -> Self {
        Self {
            value,
            length,
            label: label.into(),
        }
    }

    #[must_use]
    pub fn unlabeled(value: f64, length: TickLength) -> Self {
        Self::new(value, length, String::new())
    }
}

/// Inputs an [`AxisRangeProvider`] needs to lay out one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeContext {
    /// Plot area in logical coordinates.
    pub plot_rect: Rect,
    /// Render-space gap reserved between adjacent segments.
    pub segment_margin: f64,
    pub row_count: usize,
    /// Smallest and largest plotted value bound to the axis, if any.
    pub data_extent: Option<(f64, f64)>,
    /// Whether an automatic range should be widened to include zero.
    pub include_zero: bool,
}

impl RangeContext {
    /// Render length available along `id`.
    #[must_use]
    pub fn axis_length(&self, id: AxisId) -> f64 {
        if id.is_vertical() {
            self.plot_rect.height
        } else {
            self.plot_rect.width
        }
    }
}

/// Computes axis segments and tick sets for a render pass.
pub trait AxisRangeProvider {
    /// Returns the ordered segment list of `axis`.
    fn prepare_segments(&self, axis: &Axis, context: &RangeContext) -> ChartResult<AxisSegments>;

    /// Appends the ticks of one segment to `out`.
    fn label_ticks(&self, axis: AxisView<'_>, segment: usize, out: &mut Vec<TickLabel>);
}

/// Default provider: automatic ranges, value breaks laid out proportionally,
/// 1/2/5 linear ticks, decade ticks, date ticks and one tick per category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRangeProvider {
    /// Preferred distance between labelled ticks, in pixels.
    pub tick_spacing_px: f64,
    /// Minimum distance between category labels, in pixels.
    pub category_label_spacing_px: f64,
}

impl Default for AutoRangeProvider {
    fn default() -> Self {
        Self {
            tick_spacing_px: 50.0,
            category_label_spacing_px: 20.0,
        }
    }
}

const MAX_TICKS_PER_SEGMENT: usize = 500;
const DATE_STEPS_SECONDS: [f64; 17] = [
    1.0, 5.0, 15.0, 30.0, 60.0, 300.0, 900.0, 1_800.0, 3_600.0, 10_800.0, 21_600.0, 43_200.0,
    86_400.0, 604_800.0, 2_592_000.0, 7_776_000.0, 31_536_000.0,
];

impl AxisRangeProvider for AutoRangeProvider {
    fn prepare_segments(&self, axis: &Axis, context: &RangeContext) -> ChartResult<AxisSegments> {
        let (minimum, maximum) = self.display_range(axis, context);
        let mut ranges = value_ranges(axis, minimum, maximum);

        let length = context.axis_length(axis.id).max(0.0);
        let gaps = context.segment_margin * (ranges.len().saturating_sub(1)) as f64;
        if ranges.len() > 1 && length - gaps <= 0.0 {
            warn!(
                axis = ?axis.id,
                length,
                segments = ranges.len(),
                "no room for axis breaks, drawing a continuous axis"
            );
            ranges = vec![(minimum, maximum)];
        }
        let available = (length - context.segment_margin * (ranges.len() - 1) as f64).max(0.0);

        let magnitude = ranges
            .iter()
            .fold(0.0_f64, |acc, (min, max)| acc.max(min.abs()).max(max.abs()));
        let unit = if magnitude.is_finite() && magnitude > 0.0 {
            magnitude
        } else {
            1.0
        };
        let spans: Vec<f64> = ranges
            .iter()
            .map(|(min, max)| axis.scale.span(min / unit, max / unit))
            .collect();
        let total: f64 = spans.iter().sum();

        let vertical = axis.id.is_vertical();
        let mut start = if vertical {
            context.plot_rect.bottom()
        } else {
            context.plot_rect.left()
        };
        let mut segments = AxisSegments::new();
        for ((value_min, value_max), span) in ranges.iter().zip(&spans) {
            let share = if total > 0.0 {
                span / total
            } else {
                1.0 / ranges.len() as f64
            };
            let render_length = available * share;
            segments.push(AxisSegment::new(*value_min, *value_max, start, render_length));
            let advance = render_length + context.segment_margin;
            start = if vertical { start - advance } else { start + advance };
        }

        validate_segments(axis.id, &segments)?;
        Ok(segments)
    }

    fn label_ticks(&self, axis: AxisView<'_>, segment: usize, out: &mut Vec<TickLabel>) {
        let Some(s) = axis.segment(segment) else {
            return;
        };
        match axis.axis.scale {
            AxisScale::Category => self.category_ticks(axis.axis, s, out),
            AxisScale::Linear => self.linear_ticks(axis.axis, s, out),
            AxisScale::Logarithmic => log_ticks(axis.axis, s, out),
            AxisScale::Date => self.date_ticks(s, out),
        }
    }
}

impl AutoRangeProvider {
    /// Full displayed value range of `axis`, before breaks are applied.
    #[must_use]
    pub fn display_range(&self, axis: &Axis, context: &RangeContext) -> (f64, f64) {
        if axis.scale == AxisScale::Category {
            let minimum = axis.minimum.unwrap_or(-0.5);
            let maximum = axis
                .maximum
                .unwrap_or(context.row_count as f64 - 0.5)
                .max(minimum + 1.0);
            return (minimum, maximum);
        }

        let (mut low, mut high) = context.data_extent.unwrap_or((0.0, 1.0));
        if !low.is_finite() || !high.is_finite() || low > high {
            (low, high) = (0.0, 1.0);
        }

        if axis.scale == AxisScale::Logarithmic {
            let low = axis.minimum.unwrap_or_else(|| {
                let positive = if low > 0.0 { low } else { 1.0 };
                10f64.powi(positive.log10().floor() as i32)
            });
            let high = axis.maximum.unwrap_or_else(|| {
                let positive = if high > 0.0 { high } else { low * 10.0 };
                10f64.powi(positive.log10().ceil() as i32)
            });
            return if high > low { (low, high) } else { (low, low * 10.0) };
        }

        if context.include_zero && axis.scale == AxisScale::Linear {
            low = low.min(0.0);
            high = high.max(0.0);
        }
        if low == high {
            let pad = if low == 0.0 { 1.0 } else { low.abs() * 0.5 };
            low -= pad;
            high += pad;
        }
        if axis.scale == AxisScale::Linear {
            let target = (context.axis_length(axis.id) / self.tick_spacing_px).max(1.0);
            let step = nice_step(half_span(low, high) / target * 2.0);
            let (nice_low, nice_high) = ((low / step).floor() * step, (high / step).ceil() * step);
            if step > 0.0 && nice_low.is_finite() && nice_high.is_finite() {
                (low, high) = (nice_low, nice_high);
            }
        }
        (
            axis.minimum.unwrap_or(low),
            axis.maximum.unwrap_or(high).max(axis.minimum.unwrap_or(low)),
        )
    }

    fn category_ticks(&self, axis: &Axis, s: AxisSegment, out: &mut Vec<TickLabel>) {
        let first = s.value_min.ceil().max(0.0);
        let last = s.value_max.floor();
        if last < first {
            return;
        }
        let count = (last - first) as usize + 1;
        let fits = (s.render_length / self.category_label_spacing_px).floor().max(1.0) as usize;
        let stride = count.div_ceil(fits).max(1);
        for offset in 0..count.min(MAX_TICKS_PER_SEGMENT) {
            let row = first as usize + offset;
            if offset % stride == 0 {
                let label = axis
                    .category_labels
                    .get(row)
                    .cloned()
                    .unwrap_or_else(|| row.to_string());
                out.push(TickLabel::new(row as f64, TickLength::Long, label));
            } else {
                out.push(TickLabel::unlabeled(row as f64, TickLength::Short));
            }
        }
    }

    fn linear_ticks(&self, axis: &Axis, s: AxisSegment, out: &mut Vec<TickLabel>) {
        let target = (s.render_length / self.tick_spacing_px).max(1.0);
        let step = nice_step(half_span(s.value_min, s.value_max) / target * 2.0);
        if !(step > 0.0 && step.is_finite()) {
            return;
        }
        let decimals = axis
            .label_precision
            .map_or_else(|| decimals_for_step(step), u32::from);
        let epsilon = step * 1e-9;
        let first = (s.value_min / step).ceil() * step;
        if first - step * 0.5 >= s.value_min - epsilon {
            out.push(TickLabel::unlabeled(first - step * 0.5, TickLength::Short));
        }
        for index in 0..MAX_TICKS_PER_SEGMENT {
            let value = first + step * index as f64;
            if value > s.value_max + epsilon {
                break;
            }
            out.push(TickLabel::new(
                value,
                TickLength::Long,
                format_number(value, decimals),
            ));
            let middle = value + step * 0.5;
            if middle <= s.value_max + epsilon {
                out.push(TickLabel::unlabeled(middle, TickLength::Short));
            }
        }
    }

    fn date_ticks(&self, s: AxisSegment, out: &mut Vec<TickLabel>) {
        let target = (s.render_length / (self.tick_spacing_px * 1.5)).max(1.0);
        let rough = half_span(s.value_min, s.value_max) / target * 2.0;
        let step = DATE_STEPS_SECONDS
            .iter()
            .copied()
            .find(|step| *step >= rough)
            .unwrap_or_else(|| nice_step(rough / 31_536_000.0).max(1.0) * 31_536_000.0);
        let first = (s.value_min / step).ceil() * step;
        for index in 0..MAX_TICKS_PER_SEGMENT {
            let value = first + step * index as f64;
            if value > s.value_max {
                break;
            }
            out.push(TickLabel::new(
                value,
                TickLength::Long,
                format_timestamp(value, step),
            ));
        }
    }
}

fn log_ticks(axis: &Axis, s: AxisSegment, out: &mut Vec<TickLabel>) {
    if s.value_min <= 0.0 || s.value_max <= 0.0 {
        return;
    }
    let first_decade = s.value_min.log10().floor() as i32;
    let last_decade = s.value_max.log10().ceil() as i32;
    let contains = |value: f64| {
        value >= s.value_min * (1.0 - 1e-12) && value <= s.value_max * (1.0 + 1e-12)
    };
    for decade in first_decade..=last_decade {
        let base = 10f64.powi(decade);
        if contains(base) {
            let decimals = axis
                .label_precision
                .map_or_else(|| decimals_for_step(base), u32::from);
            out.push(TickLabel::new(
                base,
                TickLength::Long,
                format_number(base, decimals),
            ));
        }
        for factor in 2..=9 {
            let value = base * f64::from(factor);
            if contains(value) {
                out.push(TickLabel::unlabeled(value, TickLength::Short));
            }
        }
        if out.len() >= MAX_TICKS_PER_SEGMENT {
            break;
        }
    }
}

/// Splits `[minimum, maximum]` around the axis breaks that fall inside it.
fn value_ranges(axis: &Axis, minimum: f64, maximum: f64) -> Vec<(f64, f64)> {
    let mut breaks: Vec<_> = axis
        .breaks
        .iter()
        .filter(|gap| gap.to > gap.from && gap.from > minimum && gap.to < maximum)
        .copied()
        .collect();
    breaks.sort_by(|left, right| left.from.total_cmp(&right.from));

    let mut ranges = Vec::with_capacity(breaks.len() + 1);
    let mut current = minimum;
    for gap in breaks {
        if gap.from <= current {
            current = current.max(gap.to);
            continue;
        }
        ranges.push((current, gap.from));
        current = gap.to;
    }
    ranges.push((current, maximum));
    ranges
}

/// Half of `high - low`, finite for any finite bounds.
fn half_span(low: f64, high: f64) -> f64 {
    high / 2.0 - low / 2.0
}

/// Rounds `rough` up to the nearest 1, 2 or 5 times a power of ten.
#[must_use]
pub fn nice_step(rough: f64) -> f64 {
    if !rough.is_finite() || rough <= 0.0 {
        return 0.0;
    }
    let exponent = rough.log10().floor();
    let magnitude = 10f64.powf(exponent);
    let fraction = rough / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn decimals_for_step(step: f64) -> u32 {
    if step >= 1.0 || step <= 0.0 {
        0
    } else {
        (-step.log10()).ceil().clamp(0.0, 12.0) as u32
    }
}

/// Formats a tick value with at most `decimals` fractional digits and no
/// binary rounding noise; `-0` prints as `0`.
#[must_use]
pub fn format_number(value: f64, decimals: u32) -> String {
    let Some(decimal) = Decimal::from_f64_retain(value) else {
        return format!("{value}");
    };
    let rounded = decimal.round_dp(decimals).normalize();
    if rounded.is_zero() {
        "0".to_owned()
    } else {
        rounded.to_string()
    }
}

/// Formats a Unix timestamp with a pattern suited to the tick spacing.
#[must_use]
pub fn format_timestamp(seconds: f64, step_seconds: f64) -> String {
    let Some(time) = DateTime::from_timestamp(seconds.floor() as i64, 0) else {
        return format_number(seconds, 0);
    };
    let pattern = if step_seconds < 60.0 {
        "%H:%M:%S"
    } else if step_seconds < 86_400.0 {
        "%H:%M"
    } else if step_seconds < 2_592_000.0 {
        "%Y-%m-%d"
    } else {
        "%Y-%m"
    };
    time.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::{
        AutoRangeProvider, AxisRangeProvider, RangeContext, TickLength, format_number,
        format_timestamp, nice_step,
    };
    use crate::core::{Axis, AxisId, AxisScale, AxisView, Rect};

    fn context(extent: Option<(f64, f64)>) -> RangeContext {
        RangeContext {
            plot_rect: Rect::new(80.0, 40.0, 400.0, 300.0),
            segment_margin: 40.0,
            row_count: 5,
            data_extent: extent,
            include_zero: false,
        }
    }

    #[test]
    fn nice_step_snaps_to_one_two_five() {
        assert!((nice_step(3.2) - 5.0).abs() <= 1e-12);
        assert!((nice_step(0.15) - 0.2).abs() <= 1e-12);
        assert!((nice_step(80.0) - 100.0).abs() <= 1e-12);
        assert_eq!(nice_step(-1.0), 0.0);
    }

    #[test]
    fn labels_avoid_float_noise_and_negative_zero() {
        assert_eq!(format_number(0.1 + 0.2, 1), "0.3");
        assert_eq!(format_number(-0.0, 2), "0");
        assert_eq!(format_number(250.0, 0), "250");
    }

    #[test]
    fn category_axis_spans_half_rows() {
        let provider = AutoRangeProvider::default();
        let axis = Axis::new(AxisId::X).with_scale(AxisScale::Category);
        let segments = provider
            .prepare_segments(&axis, &context(None))
            .expect("segments");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].value_min, -0.5);
        assert_eq!(segments[0].value_max, 4.5);
        assert_eq!(segments[0].render_start, 80.0);
        assert_eq!(segments[0].render_length, 400.0);
    }

    #[test]
    fn breaks_split_render_length_after_margins() {
        let provider = AutoRangeProvider::default();
        let axis = Axis::new(AxisId::Y1)
            .with_range(0.0, 1000.0)
            .with_break(100.0, 900.0);
        let segments = provider
            .prepare_segments(&axis, &context(None))
            .expect("segments");
        assert_eq!(segments.len(), 2);
        // 300px minus one 40px margin, split evenly between two 100-wide spans.
        assert!((segments[0].render_length - 130.0).abs() <= 1e-9);
        assert!((segments[0].render_start - 340.0).abs() <= 1e-9);
        assert!((segments[1].render_start - 170.0).abs() <= 1e-9);
        assert_eq!(segments[1].value_min, 900.0);
    }

    #[test]
    fn linear_ticks_alternate_long_and_short() {
        let provider = AutoRangeProvider::default();
        let axis = Axis::new(AxisId::Y1).with_range(0.0, 10.0);
        let segments = provider
            .prepare_segments(&axis, &context(None))
            .expect("segments");
        let mut ticks = Vec::new();
        provider.label_ticks(AxisView::new(&axis, &segments), 0, &mut ticks);
        let long: Vec<_> = ticks
            .iter()
            .filter(|tick| tick.length == TickLength::Long)
            .map(|tick| tick.label.as_str())
            .collect();
        assert_eq!(long, vec!["0", "2", "4", "6", "8", "10"]);
        assert!(ticks.iter().any(|tick| tick.length == TickLength::Short));
    }

    #[test]
    fn extreme_extent_keeps_segments_finite() {
        let provider = AutoRangeProvider::default();
        let axis = Axis::new(AxisId::Y1);
        let segments = provider
            .prepare_segments(&axis, &context(Some((-1e308, 1e308))))
            .expect("segments");
        assert_eq!(segments.len(), 1);
        assert!(segments[0].value_min.is_finite() && segments[0].value_max.is_finite());
        assert!((segments[0].render_length - 300.0).abs() <= 1e-9);

        let mut ticks = Vec::new();
        provider.label_ticks(AxisView::new(&axis, &segments), 0, &mut ticks);
        assert!(ticks.iter().any(|tick| tick.length == TickLength::Long));
        assert!(ticks.iter().all(|tick| tick.value.is_finite()));
    }

    #[test]
    fn log_range_snaps_to_decades() {
        let provider = AutoRangeProvider::default();
        let axis = Axis::new(AxisId::Y1).with_scale(AxisScale::Logarithmic);
        let range = provider.display_range(&axis, &context(Some((3.0, 420.0))));
        assert_eq!(range, (1.0, 1000.0));
    }

    #[test]
    fn timestamps_use_span_dependent_pattern() {
        assert_eq!(format_timestamp(0.0, 86_400.0), "1970-01-01");
        assert_eq!(format_timestamp(3_600.0, 900.0), "01:00");
    }
}
