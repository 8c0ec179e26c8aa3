//! Funheat Processing Core
//!
//! Turns a validated motion script into a heatmap raster and a median speed:
//! - **Metrics:** Slope, intensity and speed per consecutive action pair
//! - **Segments:** Fixed time bins with sliding-window bands and backfill
//! - **Gradient:** Color stops per bin, blended along the timeline
//! - **Raster:** Column painting and ten-minute tick marks
//! - **Median:** The script's "interactive speed"
//!
//! This crate is pure computation. File I/O and encoding live in `funheat-render-engine`.
//! All inputs are data; all outputs are data.

pub mod color;
pub mod generator;
pub mod gradient;
pub mod median;
pub mod metrics;
pub mod raster;
pub mod segments;

pub use generator::{HeatmapGenerator, HeatmapOutput};
