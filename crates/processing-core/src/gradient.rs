//! Gradient table built from time segments.
//!
//! One stop per segment, evenly spaced over `[0, 1]`. Colors are blended
//! between neighbouring stops; bands are a step function.

use crate::color::{Color, Palette};
use crate::segments::{Segment, YRange};

/// A color keypoint on the normalized timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: Color,
    pub position: f64,
    pub y_range: YRange,
}

/// Ordered stops with strictly increasing positions from 0 to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientTable {
    stops: Vec<GradientStop>,
}

impl GradientTable {
    /// One stop per segment, colored by the segment's mean intensity.
    ///
    /// Stop `i` sits at `i / (len - 1)`; a single segment sits at 0.
    pub fn from_segments(segments: &[Segment], palette: &Palette) -> Self {
        let last = segments.len().saturating_sub(1).max(1) as f64;
        let stops = segments
            .iter()
            .enumerate()
            .map(|(i, segment)| GradientStop {
                color: palette.segment_color(segment.mean_intensity()),
                position: i as f64 / last,
                y_range: segment.y_range,
            })
            .collect();
        Self { stops }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Color and band at normalized position `t`.
    pub fn sample(&self, t: f64) -> (Color, YRange) {
        match self.enclosing(t) {
            Some((lower, upper, fraction)) => {
                (blend_stops(lower, upper, fraction), lower.y_range)
            }
            None => self.final_values(),
        }
    }

    /// Color at `t`, blended in HCL between the enclosing stops.
    pub fn color_at(&self, t: f64) -> Color {
        self.sample(t).0
    }

    /// Band at `t`, taken from the lower enclosing stop without blending.
    pub fn y_range_at(&self, t: f64) -> YRange {
        self.sample(t).1
    }

    /// The consecutive stops around `t` and the fraction between them.
    ///
    /// `None` when `t` lies outside `[first, last)`, including `t` at or
    /// past the final stop.
    fn enclosing(&self, t: f64) -> Option<(&GradientStop, &GradientStop, f64)> {
        let first = self.stops.first()?;
        let last = self.stops.last()?;
        if self.stops.len() < 2 || !(t >= first.position && t < last.position) {
            return None;
        }

        let upper = self.stops.partition_point(|s| s.position < t).max(1);
        let lower = &self.stops[upper - 1];
        let upper = &self.stops[upper];
        let fraction = (t - lower.position) / (upper.position - lower.position);
        Some((lower, upper, fraction))
    }

    fn final_values(&self) -> (Color, YRange) {
        match self.stops.last() {
            Some(stop) => (stop.color, stop.y_range),
            None => (Palette::standard().background, YRange::default()),
        }
    }
}

fn blend_stops(lower: &GradientStop, upper: &GradientStop, fraction: f64) -> Color {
    if fraction <= 0.0 {
        lower.color
    } else if fraction >= 1.0 {
        upper.color
    } else {
        lower.color.blend_hcl(&upper.color, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn segment(count: u32, intensity_sum: i64, top: f64, bottom: f64) -> Segment {
        Segment {
            count,
            intensity_sum,
            y_range: YRange { top, bottom },
            last_action_at: 0,
        }
    }

    fn sample_table() -> GradientTable {
        let segments = vec![
            segment(0, 0, 0.0, 0.0),
            segment(2, 60, 80.0, 20.0),
            segment(1, 150, 100.0, 0.0),
            segment(1, 300, 70.0, 30.0),
            segment(4, 4000, 60.0, 40.0),
        ];
        GradientTable::from_segments(&segments, &Palette::standard())
    }

    #[test]
    fn test_positions_span_unit_interval() {
        let table = sample_table();
        let positions: Vec<f64> = table.stops().iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_stop_colors_use_mean_intensity() {
        let table = sample_table();
        let palette = Palette::standard();
        assert_eq!(table.stops()[0].color, palette.background);
        assert_eq!(table.stops()[1].color, palette.segment_color(30.0));
        assert_eq!(table.stops()[4].color, palette.segment_color(1000.0));
    }

    #[test]
    fn test_query_at_stops_is_unblended() {
        let table = sample_table();
        for stop in table.stops() {
            assert_eq!(table.color_at(stop.position), stop.color);
        }
    }

    #[test]
    fn test_band_is_step_from_lower_stop() {
        let table = sample_table();
        let stops = table.stops();
        assert_eq!(table.y_range_at(0.1), stops[0].y_range);
        assert_eq!(table.y_range_at(0.3), stops[1].y_range);
        // exactly on an inner stop the lower pair member wins
        assert_eq!(table.y_range_at(0.5), stops[1].y_range);
    }

    #[test]
    fn test_at_or_past_last_stop() {
        let table = sample_table();
        let last = *table.stops().last().unwrap();
        for t in [1.0, 1.5, f64::INFINITY, f64::NAN, -0.5] {
            assert_eq!(table.sample(t), (last.color, last.y_range));
        }
    }

    #[test]
    fn test_midpoint_blends() {
        let table = sample_table();
        let stops = table.stops();
        let mid = table.color_at(0.375);
        assert_eq!(mid, stops[1].color.blend_hcl(&stops[2].color, 0.5));
        assert_ne!(mid, stops[1].color);
        assert_ne!(mid, stops[2].color);
    }

    #[test]
    fn test_empty_table_falls_back_to_background() {
        let table = GradientTable::from_segments(&[], &Palette::standard());
        assert!(table.is_empty());
        assert_eq!(table.color_at(0.5), Palette::standard().background);
    }

    proptest! {
        #[test]
        fn prop_query_at_any_stop_position_is_that_stop(
            intensities in proptest::collection::vec(0i64..2000, 2..40),
            pick in any::<proptest::sample::Index>(),
        ) {
            let segments: Vec<Segment> = intensities
                .iter()
                .map(|&i| segment(1, i, 50.0, 10.0))
                .collect();
            let table = GradientTable::from_segments(&segments, &Palette::standard());
            let stop = table.stops()[pick.index(table.len())];
            prop_assert_eq!(table.color_at(stop.position), stop.color);
        }
    }
}
