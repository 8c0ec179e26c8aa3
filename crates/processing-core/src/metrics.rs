//! Per-action kinematics derived from consecutive action pairs.

use funheat_script_model::action::Action;

/// Upper bound for the reciprocal-time slope factor.
pub const MAX_SLOPE: f64 = 20.0;

/// Kinematics of the move from one action to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionMetrics {
    pub slope: f64,
    pub intensity: i64,
    pub speed: f64,
}

impl MotionMetrics {
    /// Metrics for the move `prev -> current`.
    ///
    /// `slope` is `1 / (2 * Δt_secs)` capped to `[0, MAX_SLOPE]`, so
    /// near-simultaneous actions cannot produce an unbounded weight.
    /// A zero `Δt` follows IEEE division: slope caps at `MAX_SLOPE` and
    /// speed becomes infinite (or NaN when the position does not change).
    pub fn between(prev: &Action, current: &Action) -> Self {
        let dt = (current.at - prev.at) as f64;
        let dp = (current.pos as f64 - prev.pos as f64).abs();

        let slope = (1.0 / (2.0 * dt / 1000.0)).max(0.0).min(MAX_SLOPE);
        Self {
            slope,
            intensity: (slope * dp) as i64,
            speed: dp / dt * 1000.0,
        }
    }
}

/// Fill `slope`, `intensity` and `speed` on every action after the first.
///
/// Actions must already be sorted by time. The first action keeps zeroed
/// metrics since it has no predecessor.
pub fn update_intensity_and_speed(actions: &mut [Action]) {
    if let Some(first) = actions.first_mut() {
        first.slope = 0.0;
        first.intensity = 0;
        first.speed = 0.0;
    }

    for i in 1..actions.len() {
        let metrics = MotionMetrics::between(&actions[i - 1], &actions[i]);
        let action = &mut actions[i];
        action.slope = metrics.slope;
        action.intensity = metrics.intensity;
        action.speed = metrics.speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_stroke_over_one_second() {
        let m = MotionMetrics::between(&Action::new(0, 0), &Action::new(1000, 100));
        assert!((m.slope - 0.5).abs() < 1e-12);
        assert_eq!(m.intensity, 50);
        assert!((m.speed - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_slope_caps_for_fast_moves() {
        // 1 / (2 * 0.01) = 50, capped at 20
        let m = MotionMetrics::between(&Action::new(0, 10), &Action::new(10, 90));
        assert_eq!(m.slope, MAX_SLOPE);
        assert_eq!(m.intensity, 1600);
        assert!((m.speed - 8000.0).abs() < 1e-9);
    }

    #[test]
    fn test_intensity_truncates() {
        // slope = 1 / 0.6 = 1.666.., dp = 10 -> 16.66..
        let m = MotionMetrics::between(&Action::new(0, 50), &Action::new(300, 40));
        assert_eq!(m.intensity, 16);
    }

    #[test]
    fn test_simultaneous_actions() {
        let m = MotionMetrics::between(&Action::new(500, 0), &Action::new(500, 100));
        assert_eq!(m.slope, MAX_SLOPE);
        assert_eq!(m.intensity, 2000);
        assert!(m.speed.is_infinite());
    }

    #[test]
    fn test_update_leaves_first_action_zeroed() {
        let mut actions = vec![
            Action::new(0, 0),
            Action::new(1000, 100),
            Action::new(2000, 0),
        ];
        update_intensity_and_speed(&mut actions);

        assert_eq!(actions[0].speed, 0.0);
        assert_eq!(actions[0].intensity, 0);
        for a in &actions[1..] {
            assert!((a.speed - 100.0).abs() < 1e-9);
            assert_eq!(a.intensity, 50);
        }
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut actions = vec![Action::new(0, 0), Action::new(250, 60), Action::new(900, 5)];
        update_intensity_and_speed(&mut actions);
        let once = actions.clone();
        update_intensity_and_speed(&mut actions);
        assert_eq!(once, actions);
    }
}
