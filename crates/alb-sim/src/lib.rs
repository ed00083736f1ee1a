//! alb-sim: the hourly albedo-estimation pipeline.
//!
//! Provides:
//! - the per-hour engine combining spectral, irradiance-ratio and
//!   view-factor computations into one albedo value per hour
//! - the hourly record type carrying every intermediate quantity
//! - results storage (semicolon CSV plus a JSON run manifest)

pub mod engine;
pub mod error;
pub mod record;
pub mod results;

// Re-exports for public API
pub use engine::{AlbedoEngine, EngineOptions, hour_count, run_and_save};
pub use error::{PipelineError, PipelineResult};
pub use record::HourlyAlbedoRecord;
pub use results::{ENGINE_VERSION, ResultsStore, RunManifest, albedo_column, compute_run_id};
