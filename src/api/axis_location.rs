use tracing::trace;

use crate::core::{AxisId, AxisLocation, AxisScale, AxisView};

/// Resolves each axis's preferred location against the rendered range of its
/// companion axis (Y1 for X, X for both Y axes). Indexed by [`AxisId::index`].
///
/// Must run after segments are prepared and before anything is drawn.
#[must_use]
pub fn resolve_axis_locations(
    x: AxisView<'_>,
    y1: AxisView<'_>,
    y2: AxisView<'_>,
) -> [AxisLocation; 3] {
    let mut locations = [
        resolve_against(x, y1),
        resolve_against(y1, x),
        resolve_against(y2, x),
    ];

    if x.axis.scale == AxisScale::Category && locations[0] == AxisLocation::ZeroValue {
        locations[0] = AxisLocation::MinimumValue;
    }

    if y2.axis.visible {
        let x_min_is_zero = x.first_segment().is_some_and(|s| s.value_min == 0.0);
        if !(locations[1] == AxisLocation::ZeroValue && x_min_is_zero) {
            locations[1] = AxisLocation::MinimumValue;
        }
        locations[2] = AxisLocation::MaximumValue;
    }

    for id in AxisId::ALL {
        trace!(
            axis = ?id,
            preferred = ?[x, y1, y2][id.index()].axis.location,
            resolved = ?locations[id.index()],
            "resolved axis location"
        );
    }
    locations
}

fn resolve_against(axis: AxisView<'_>, other: AxisView<'_>) -> AxisLocation {
    let preferred = axis.axis.location;
    let Some(first) = other.first_segment() else {
        return match preferred {
            AxisLocation::ZeroValue => AxisLocation::MinimumValue,
            location => location,
        };
    };
    let (minimum, maximum) = (first.value_min, first.value_max);
    match preferred {
        AxisLocation::ZeroValue if maximum < 0.0 => AxisLocation::MaximumValue,
        AxisLocation::ZeroValue if minimum > 0.0 => AxisLocation::MinimumValue,
        AxisLocation::MinimumValue if minimum == 0.0 => AxisLocation::ZeroValue,
        AxisLocation::MaximumValue if maximum == 0.0 => AxisLocation::ZeroValue,
        location => location,
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_axis_locations;
    use crate::core::{Axis, AxisId, AxisLocation, AxisScale, AxisSegment, AxisView};

    fn x_axis() -> Axis {
        Axis::new(AxisId::X).with_scale(AxisScale::Linear)
    }

    #[test]
    fn zero_location_on_positive_range_falls_back_to_minimum() {
        let x = x_axis();
        let y1 = Axis::new(AxisId::Y1).with_location(AxisLocation::ZeroValue);
        let y2 = Axis::new(AxisId::Y2);
        let x_segments = [AxisSegment::new(5.0, 10.0, 0.0, 100.0)];
        let y_segments = [AxisSegment::new(1.0, 2.0, 100.0, 100.0)];
        let locations = resolve_axis_locations(
            AxisView::new(&x, &x_segments),
            AxisView::new(&y1, &y_segments),
            AxisView::new(&y2, &y_segments),
        );
        assert_eq!(locations[1], AxisLocation::MinimumValue);
    }

    #[test]
    fn minimum_snaps_to_zero_when_companion_starts_at_zero() {
        let x = x_axis();
        let y1 = Axis::new(AxisId::Y1);
        let y2 = Axis::new(AxisId::Y2);
        let x_segments = [AxisSegment::new(0.0, 10.0, 0.0, 100.0)];
        let y_segments = [AxisSegment::new(-5.0, 5.0, 100.0, 100.0)];
        let locations = resolve_axis_locations(
            AxisView::new(&x, &x_segments),
            AxisView::new(&y1, &y_segments),
            AxisView::new(&y2, &y_segments),
        );
        assert_eq!(locations[1], AxisLocation::ZeroValue);
        assert_eq!(locations[0], AxisLocation::MinimumValue);
    }

    #[test]
    fn visible_secondary_axis_pins_primary_to_minimum() {
        let x = x_axis();
        let y1 = Axis::new(AxisId::Y1).with_location(AxisLocation::MaximumValue);
        let y2 = Axis::new(AxisId::Y2)
            .with_visible(true)
            .with_location(AxisLocation::MinimumValue);
        let x_segments = [AxisSegment::new(2.0, 10.0, 0.0, 100.0)];
        let y_segments = [AxisSegment::new(1.0, 5.0, 100.0, 100.0)];
        let locations = resolve_axis_locations(
            AxisView::new(&x, &x_segments),
            AxisView::new(&y1, &y_segments),
            AxisView::new(&y2, &y_segments),
        );
        assert_eq!(locations[1], AxisLocation::MinimumValue);
        assert_eq!(locations[2], AxisLocation::MaximumValue);
    }

    #[test]
    fn category_axis_never_sits_at_zero() {
        let x = Axis::new(AxisId::X)
            .with_scale(AxisScale::Category)
            .with_location(AxisLocation::ZeroValue);
        let y1 = Axis::new(AxisId::Y1);
        let y2 = Axis::new(AxisId::Y2);
        let x_segments = [AxisSegment::new(-0.5, 3.5, 0.0, 100.0)];
        let y_segments = [AxisSegment::new(-5.0, 5.0, 100.0, 100.0)];
        let locations = resolve_axis_locations(
            AxisView::new(&x, &x_segments),
            AxisView::new(&y1, &y_segments),
            AxisView::new(&y2, &y_segments),
        );
        assert_eq!(locations[0], AxisLocation::MinimumValue);
    }
}
