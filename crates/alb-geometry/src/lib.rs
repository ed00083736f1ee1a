//! alb-geometry: 2D surface discretization and view-factor assembly.
//!
//! Provides:
//! - row/ground surface fitting from scalar array descriptions
//! - shadow projection and the shared ground discretization
//! - Hottel crossed-strings view-factor primitives
//! - the per-timestep view-factor matrix builder with sky closure and
//!   degenerate-surface correction

pub mod error;
pub mod matrix;
pub mod shadow;
pub mod surface;
pub mod vf;

// Re-exports for public API
pub use error::{GeometryError, GeometryResult};
pub use matrix::{SensorGroundView, ViewFactorMatrix, ViewFactorMatrixBuilder};
pub use shadow::{GroundSegment, discretize_ground, shadow_interval, shadow_slope};
pub use surface::{
    DISTANCE_TOLERANCE, Point, RotationState, RowConfig, RowStrip, SunPosition, Surface,
    SurfaceKind,
};
pub use vf::{vf_between, vf_row_to_ground, vf_row_to_row};
