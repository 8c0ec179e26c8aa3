//! Time binning of actions into fixed segments.
//!
//! The timeline `[0, last_action_at]` is split into a fixed number of
//! bins. Each bin accumulates the intensity of the actions that land in it
//! and remembers the positional spread (a sliding-window band) of the last
//! one. Empty bins are then backfilled from the most recent populated bin.

use std::collections::VecDeque;

use funheat_script_model::action::{Action, TimestampMs};

/// Number of recent positions the spread band is computed over.
pub const WINDOW_SIZE: usize = 15;

/// Maximum gap (ms) over which an empty bin inherits its predecessor.
pub const BACKFILL_THRESHOLD_MS: TimestampMs = 500;

/// Vertical band in position percent; `top` is the upper mean.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YRange {
    pub top: f64,
    pub bottom: f64,
}

/// Aggregate for one time bin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Segment {
    pub count: u32,
    pub intensity_sum: i64,
    pub y_range: YRange,
    pub last_action_at: TimestampMs,
}

impl Segment {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean intensity of the actions in this bin, zero when empty.
    pub fn mean_intensity(&self) -> f64 {
        if self.count > 0 {
            self.intensity_sum as f64 / self.count as f64
        } else {
            0.0
        }
    }
}

/// Bounded window of the most recent raw positions.
#[derive(Debug, Clone)]
pub struct PositionWindow {
    positions: VecDeque<i32>,
    capacity: usize,
}

impl PositionWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: VecDeque::with_capacity(capacity + 1),
            capacity: capacity.max(1),
        }
    }

    /// Add a position, dropping the oldest once over capacity.
    pub fn push(&mut self, pos: i32) {
        self.positions.push_back(pos);
        if self.positions.len() > self.capacity {
            self.positions.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Mean of the upper and lower halves of the sorted window.
    ///
    /// The split is by index: the lower half holds `len / 2` values, the
    /// upper half the rest, so an odd median lands in the upper half only.
    /// With a single position the lower half is empty and takes the upper
    /// mean, which collapses the band to a line. A plain mean of the empty
    /// half would be NaN, and rasterizers that cast NaN to `i64::MIN`
    /// paint such a column from the top edge down; here it paints nothing.
    pub fn spread(&self) -> YRange {
        if self.positions.is_empty() {
            return YRange::default();
        }

        let mut sorted: Vec<i32> = self.positions.iter().copied().collect();
        sorted.sort_unstable();
        let (lower, upper) = sorted.split_at(sorted.len() / 2);

        let top = mean(upper);
        let bottom = if lower.is_empty() { top } else { mean(lower) };
        YRange { top, bottom }
    }
}

fn mean(values: &[i32]) -> f64 {
    let total: i64 = values.iter().map(|&v| v as i64).sum();
    total as f64 / values.len() as f64
}

/// Bin index of `at` on a timeline ending at `max_ts`.
///
/// Clamped to the last bin to absorb float rounding at the boundary.
pub fn segment_index(at: TimestampMs, max_ts: TimestampMs, num_segments: usize) -> usize {
    let index = (at as f64 / (max_ts + 1) as f64 * num_segments as f64) as usize;
    index.min(num_segments.saturating_sub(1))
}

/// Aggregate time-sorted actions into `num_segments` bins.
///
/// Counts and intensities accumulate; the band and timestamp of a bin are
/// overwritten by each action that lands in it.
pub fn bin_actions(actions: &[Action], num_segments: usize) -> Vec<Segment> {
    let mut segments = vec![Segment::default(); num_segments];
    let Some(max_ts) = actions.last().map(|a| a.at) else {
        return segments;
    };
    if num_segments == 0 {
        return segments;
    }

    let mut window = PositionWindow::new(WINDOW_SIZE);
    for action in actions {
        window.push(action.pos);
        let spread = window.spread();

        let segment = &mut segments[segment_index(action.at, max_ts, num_segments)];
        segment.last_action_at = action.at;
        segment.count += 1;
        segment.intensity_sum += action.intensity;
        segment.y_range = spread;
    }

    segments
}

/// Timestamp assigned to bin `index` by the backfill gap check.
///
/// This divides the bin index by the bin count, which truncates to zero for
/// every bin. The gap check therefore passes whenever the previous populated
/// bin is less than [`BACKFILL_THRESHOLD_MS`] past zero, i.e. always, and
/// every empty bin inherits its predecessor. Existing heatmaps depend on
/// this output, so it is kept as is.
pub fn backfill_timestamp(index: usize, num_segments: usize) -> TimestampMs {
    (index as f64 / num_segments as f64) as TimestampMs
}

/// Fill empty bins from the most recent populated bin.
pub fn backfill(segments: &mut [Segment]) {
    backfill_with(segments, backfill_timestamp);
}

/// Fill empty bins using a custom bin timestamp.
///
/// An empty bin copies the count, intensity and band of the last populated
/// bin when `timestamp_of(index, len) - last.last_action_at` is below
/// [`BACKFILL_THRESHOLD_MS`]. Filled bins do not become the new source.
pub fn backfill_with<F>(segments: &mut [Segment], timestamp_of: F)
where
    F: Fn(usize, usize) -> TimestampMs,
{
    let len = segments.len();
    let Some(&first) = segments.first() else {
        return;
    };

    let mut last = first;
    for (i, segment) in segments.iter_mut().enumerate() {
        if segment.is_empty() {
            if timestamp_of(i, len) - last.last_action_at < BACKFILL_THRESHOLD_MS {
                segment.count = last.count;
                segment.intensity_sum = last.intensity_sum;
                segment.y_range = last.y_range;
            }
        } else {
            last = *segment;
        }
    }
}
