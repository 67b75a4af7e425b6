use crate::core::{AxisView, Rect};
use crate::error::{ChartError, ChartResult};

/// Clip rectangle (logical coordinates) for one X/Y segment pair.
///
/// The intersection of both segments' render intervals, grown by half the
/// segment margin on every internal boundary so break markers stay visible.
/// Edges are snapped to pixel centres.
pub fn chart_segment_area(
    x_axis: AxisView<'_>,
    y_axis: AxisView<'_>,
    x_segment: usize,
    y_segment: usize,
    segment_margin: f64,
) -> ChartResult<Rect> {
    let xs = x_axis.segment(x_segment).ok_or_else(|| {
        ChartError::InvalidData(format!(
            "x segment {x_segment} out of range ({} segments)",
            x_axis.segment_count()
        ))
    })?;
    let ys = y_axis.segment(y_segment).ok_or_else(|| {
        ChartError::InvalidData(format!(
            "{:?} segment {y_segment} out of range ({} segments)",
            y_axis.id(),
            y_axis.segment_count()
        ))
    })?;
    let half_margin = segment_margin / 2.0;
    let x_last = x_segment + 1 == x_axis.segment_count();
    let y_last = y_segment + 1 == y_axis.segment_count();

    let x1 = xs.render_start - if x_segment == 0 { 0.0 } else { half_margin };
    let x2 = xs.render_start + xs.render_length + if x_last { 0.0 } else { half_margin };
    let y1 = ys.render_start - ys.render_length - if y_last { 0.0 } else { half_margin };
    let y2 = ys.render_start + if y_segment == 0 { 0.0 } else { half_margin };

    let rect = Rect::new(
        snap(x1),
        snap(y1),
        snap(x2 - x1),
        snap(y2 - y1),
    );
    if !rect.is_finite() || rect.width < 0.0 || rect.height < 0.0 {
        return Err(ChartError::InvariantViolation(format!(
            "segment area ({x_segment}, {y_segment}) has invalid size {}x{}",
            rect.width, rect.height
        )));
    }
    Ok(rect)
}

fn snap(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::chart_segment_area;
    use crate::core::{Axis, AxisId, AxisSegment, AxisView};
    use crate::error::ChartError;

    #[test]
    fn internal_boundaries_grow_by_half_margin() {
        let x = Axis::new(AxisId::X);
        let y = Axis::new(AxisId::Y1);
        let xs = [
            AxisSegment::new(0.0, 1.0, 100.0, 100.0),
            AxisSegment::new(2.0, 3.0, 240.0, 100.0),
        ];
        let ys = [AxisSegment::new(0.0, 1.0, 400.0, 300.0)];
        let x_view = AxisView::new(&x, &xs);
        let y_view = AxisView::new(&y, &ys);

        let first = chart_segment_area(x_view, y_view, 0, 0, 40.0).expect("first");
        assert_eq!((first.x, first.y, first.width, first.height), (100.0, 100.0, 120.0, 300.0));

        let second = chart_segment_area(x_view, y_view, 1, 0, 40.0).expect("second");
        assert_eq!((second.x, second.width), (220.0, 120.0));
    }

    #[test]
    fn out_of_range_segment_is_rejected() {
        let x = Axis::new(AxisId::X);
        let y = Axis::new(AxisId::Y1);
        let xs = [AxisSegment::new(0.0, 1.0, 0.0, 10.0)];
        let err = chart_segment_area(AxisView::new(&x, &xs), AxisView::new(&y, &[]), 0, 0, 40.0)
            .expect_err("no y segments");
        assert!(matches!(err, ChartError::InvalidData(_)));
    }

    #[test]
    fn negative_length_is_invariant_violation() {
        let x = Axis::new(AxisId::X);
        let y = Axis::new(AxisId::Y1);
        let xs = [AxisSegment::new(0.0, 1.0, 0.0, -10.0)];
        let ys = [AxisSegment::new(0.0, 1.0, 100.0, 50.0)];
        let err = chart_segment_area(AxisView::new(&x, &xs), AxisView::new(&y, &ys), 0, 0, 40.0)
            .expect_err("negative width");
        assert!(matches!(err, ChartError::InvariantViolation(_)));
    }
}
