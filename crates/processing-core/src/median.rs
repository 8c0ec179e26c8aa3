//! Median action speed ("interactive speed").

use funheat_script_model::action::Action;

/// Median of the per-action speeds, truncated to an integer.
///
/// The first action's zero speed is included. An even count averages the
/// two middle speeds before truncating. Returns 0 for no actions.
pub fn median_speed(actions: &[Action]) -> i64 {
    let mut speeds: Vec<f64> = actions.iter().map(|a| a.speed).collect();
    speeds.sort_by(f64::total_cmp);

    let mid = speeds.len() / 2;
    match speeds.len() {
        0 => 0,
        n if n % 2 != 0 => speeds[mid] as i64,
        _ => ((speeds[mid - 1] + speeds[mid]) / 2.0) as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_speeds(speeds: &[f64]) -> Vec<Action> {
        speeds
            .iter()
            .enumerate()
            .map(|(i, &speed)| {
                let mut a = Action::new(i as i64, 0);
                a.speed = speed;
                a
            })
            .collect()
    }

    #[test]
    fn test_odd_count() {
        assert_eq!(median_speed(&with_speeds(&[5.0, 1.0, 3.0])), 3);
    }

    #[test]
    fn test_even_count_truncates_average() {
        assert_eq!(median_speed(&with_speeds(&[4.0, 2.0, 3.0, 1.0])), 2);
    }

    #[test]
    fn test_truncates_fractional_middle() {
        assert_eq!(median_speed(&with_speeds(&[0.0, 99.9, 150.0])), 99);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(median_speed(&[]), 0);
        assert_eq!(median_speed(&with_speeds(&[0.0])), 0);
    }

    #[test]
    fn test_does_not_reorder_input() {
        let actions = with_speeds(&[9.0, 1.0, 5.0]);
        let before = actions.clone();
        median_speed(&actions);
        assert_eq!(actions, before);
    }
}
