pub mod axis;
pub mod geometry;
pub mod model;
pub mod orientation;
pub mod series;
pub mod ticks;
pub mod types;

pub use axis::{
    Axis, AxisBreak, AxisId, AxisLocation, AxisScale, AxisSegment, AxisSegments, AxisView,
    validate_segments,
};
pub use geometry::{Path, PathElement, Point, Rect, Transform};
pub use model::{TableModel, TabularModel};
pub use orientation::{Orientation, OrientationTransform};
pub use series::{ChartType, DataSeries, MarkerKind, SeriesKind};
pub use ticks::{
    AutoRangeProvider, AxisRangeProvider, RangeContext, TickLabel, TickLength, format_number,
    format_timestamp, nice_step,
};
pub use types::{Alignment, HorizontalAlign, Padding, Side, VerticalAlign};
