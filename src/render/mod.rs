mod primitives;
mod recording;
mod surface;

pub use primitives::{Brush, Color, Font, Pen, PenStyle};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{DrawingSurface, SurfaceGuard};

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoSurface, render_to_png};
