//! Heatmap rasterization.
//!
//! Each output column samples the gradient table and paints its band in
//! the sampled color. Ten-minute tick marks are drawn over the bottom half.
//! Pixels outside every band stay fully transparent.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use funheat_common::config::HeatmapConfig;
use funheat_script_model::action::TimestampMs;

use crate::gradient::GradientTable;

/// Spacing of timeline tick marks (10 minutes).
pub const TICK_INTERVAL_MS: TimestampMs = 600_000;

/// Color of timeline tick marks.
pub const TICK_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Paints gradient tables into fixed-size rasters.
#[derive(Debug, Clone, Copy)]
pub struct HeatmapRasterizer {
    width: u32,
    height: u32,
}

impl HeatmapRasterizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &HeatmapConfig) -> Self {
        Self::new(config.width, config.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Render the gradient and tick marks for a timeline of `duration_ms`.
    pub fn render(&self, gradient: &GradientTable, duration_ms: TimestampMs) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        self.paint_columns(&mut img, gradient);
        self.draw_ticks(&mut img, duration_ms);
        img
    }

    /// Paint one vertical band per column.
    ///
    /// Bands are in position percent, measured up from the bottom row.
    pub fn paint_columns(&self, img: &mut RgbaImage, gradient: &GradientTable) {
        let height = self.height as i64;
        for x in 0..self.width {
            let (color, y_range) = gradient.sample(x as f64 / self.width as f64);
            let top = (y_range.top / 100.0 * self.height as f64) as i64;
            let bottom = (y_range.bottom / 100.0 * self.height as f64) as i64;
            self.fill(
                img,
                (x as i64, height - top),
                (x as i64 + 1, height - bottom),
                color.to_rgba8(),
            );
        }
    }

    /// Draw a two-pixel tick every [`TICK_INTERVAL_MS`] before `duration_ms`.
    ///
    /// `duration_ms` is the 100% mark of the width.
    pub fn draw_ticks(&self, img: &mut RgbaImage, duration_ms: TimestampMs) {
        let height = self.height as i64;
        for x in tick_columns(duration_ms, self.width) {
            self.fill(img, (x - 1, height / 2), (x + 1, height), TICK_COLOR);
        }
    }

    /// Fill the rectangle spanned by two corners, clipped to the raster.
    ///
    /// Corners may be given in either order; empty rectangles paint nothing.
    fn fill(&self, img: &mut RgbaImage, a: (i64, i64), b: (i64, i64), color: Rgba<u8>) {
        let clip_x = |v: i64| v.clamp(0, self.width as i64);
        let clip_y = |v: i64| v.clamp(0, self.height as i64);

        let (x0, x1) = (clip_x(a.0.min(b.0)), clip_x(a.0.max(b.0)));
        let (y0, y1) = (clip_y(a.1.min(b.1)), clip_y(a.1.max(b.1)));
        if x0 == x1 || y0 == y1 {
            return;
        }

        let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(img, rect, color);
    }
}

/// Center columns of the tick marks for a timeline of `duration_ms`.
pub fn tick_columns(duration_ms: TimestampMs, width: u32) -> Vec<i64> {
    let mut columns = Vec::new();
    let mut ts = TICK_INTERVAL_MS;
    while ts < duration_ms {
        columns.push((ts as f64 / duration_ms as f64 * width as f64) as i64);
        ts += TICK_INTERVAL_MS;
    }
    columns
}
