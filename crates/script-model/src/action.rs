//! Action types for the motion script stream.

use serde::{Deserialize, Serialize};

/// Milliseconds from media start.
pub type TimestampMs = i64;

/// A single timed move.
///
/// `slope`, `intensity` and `speed` are derived from the previous action
/// and stay zero for the first action of a script. They are never read
/// from or written to the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Time in milliseconds the action fires.
    pub at: TimestampMs,

    /// Target position in percent.
    pub pos: i32,

    /// Capped reciprocal-time factor weighting `intensity`.
    #[serde(skip)]
    pub slope: f64,

    /// Truncated `slope * |Δpos|`, used for coloring.
    #[serde(skip)]
    pub intensity: i64,

    /// Position units per second from the previous action.
    #[serde(skip)]
    pub speed: f64,
}

impl Action {
    /// Create an action with zeroed derived fields.
    pub fn new(at: TimestampMs, pos: i32) -> Self {
        Self {
            at,
            pos,
            slope: 0.0,
            intensity: 0,
            speed: 0.0,
        }
    }

    /// Timestamp as fractional seconds.
    pub fn at_secs(&self) -> f64 {
        self.at as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_fields_are_not_parsed() {
        let action: Action =
            serde_json::from_str(r#"{"at": 1500, "pos": 42, "speed": 99.0}"#).unwrap();
        assert_eq!(action, Action::new(1500, 42));
        assert!((action.at_secs() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_serializes_only_document_fields() {
        let mut action = Action::new(10, 90);
        action.speed = 12.5;
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"at":10,"pos":90}"#);
    }

    #[test]
    fn test_fractional_timestamp_is_rejected() {
        let result: Result<Action, _> = serde_json::from_str(r#"{"at": 1.5, "pos": 0}"#);
        assert!(result.is_err());
    }
}
