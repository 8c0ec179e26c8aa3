//! Funheat Render Engine
//!
//! File-facing side of heatmap generation: reads the motion script,
//! runs the processing core, and hands the raster to a lossless encoder.
//!
//! # Pipeline Architecture
//!
//! ```text
//! scene.funscript ──► read bytes ──► HeatmapGenerator ──┬──► PNG sink ──► scene.png
//!                                                       │
//!                                                       └──► interactive speed
//! ```

pub mod encode;
pub mod export;

pub use encode::*;
pub use export::*;
