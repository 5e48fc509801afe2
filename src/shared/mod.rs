//! Geteilte Bausteine: Konfiguration und reine Geometrie.
//!
//! Enthält nichts, was vom Render-Zustand abhängt.

pub mod options;
pub mod spline_geometry;

pub use options::{ExportOptions, CONFIG_FILE_NAME};
pub use spline_geometry::{
    hermite, heading_tangent, polyline_length, rotate_point, synthesize_road_curve,
    ROAD_CURVE_SAMPLES,
};
