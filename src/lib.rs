//! cartesian-chart: orientation-invariant cartesian chart renderer.
//!
//! Charts are described by [`Chart`] (axes, series, decoration), read their
//! data through [`core::TabularModel`] and draw through the
//! [`render::DrawingSurface`] contract. Layout happens in a logical space where
//! X is horizontal and Y vertical; horizontal charts are produced by a single
//! orientation transform applied just before primitives reach the surface.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Chart, ChartConfig, ChartRenderer, RenderState, render_chart};
pub use error::{ChartError, ChartResult};
