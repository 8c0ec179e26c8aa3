//! Script document parsing and validation.
//!
//! A script is loaded in two steps: the JSON document is parsed into a
//! [`Script`], then its actions are sorted by time and trimmed to the
//! `[0, scene_duration_ms)` window of the media it belongs to.

use serde::{Deserialize, Serialize};

use funheat_common::error::{FunheatError, FunheatResult};

use crate::action::{Action, TimestampMs};

/// A motion script document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Script format version.
    #[serde(default)]
    pub version: String,

    /// Flip up and down movement.
    #[serde(default)]
    pub inverted: bool,

    /// Percentage of a full stroke to use.
    #[serde(default)]
    pub range: i32,

    /// The timed moves.
    pub actions: Vec<Action>,

    /// Stored average speed, carried through untouched.
    #[serde(default, rename = "averageSpeed")]
    pub average_speed: i64,
}

/// Wire shape used to tell a missing `actions` field from an empty one.
///
/// Metadata fields accept `null` as well as being absent.
#[derive(Deserialize)]
struct RawScript {
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    inverted: Option<bool>,
    #[serde(default)]
    range: Option<i32>,
    #[serde(default)]
    actions: Option<Vec<Action>>,
    #[serde(default, rename = "averageSpeed")]
    average_speed: Option<i64>,
}

/// Outcome of trimming actions to the scene window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrimReport {
    /// Number of actions removed.
    pub dropped: usize,

    /// The first out-of-window timestamp encountered, in sorted order.
    pub first_invalid: Option<TimestampMs>,
}

impl Script {
    /// Create a script from actions with default metadata.
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            version: String::new(),
            inverted: false,
            range: 0,
            actions,
            average_speed: 0,
        }
    }

    /// Parse a script document without validating its actions.
    ///
    /// `origin` names the document (usually its path) in errors.
    /// An absent or `null` `actions` field is an error; an empty list is not.
    pub fn from_slice(bytes: &[u8], origin: &str) -> FunheatResult<Self> {
        let raw: RawScript = serde_json::from_slice(bytes)
            .map_err(|e| FunheatError::malformed(origin, e.to_string()))?;

        let actions = raw
            .actions
            .ok_or_else(|| FunheatError::malformed(origin, "actions list missing"))?;

        Ok(Self {
            version: raw.version.unwrap_or_default(),
            inverted: raw.inverted.unwrap_or_default(),
            range: raw.range.unwrap_or_default(),
            actions,
            average_speed: raw.average_speed.unwrap_or_default(),
        })
    }

    /// Parse a script and clean its actions for a scene of the given length.
    ///
    /// Actions are stably sorted by `at`, then any action outside
    /// `[0, scene_duration_ms)` is dropped. The first dropped timestamp is
    /// logged once; later ones are dropped silently. The result may hold no
    /// actions; callers decide whether that is fatal.
    pub fn load(bytes: &[u8], scene_duration_ms: TimestampMs, origin: &str) -> FunheatResult<Self> {
        let mut script = Self::from_slice(bytes, origin)?;
        script.sort_actions();

        let report = script.trim_to_duration(scene_duration_ms);
        if let Some(at) = report.first_invalid {
            tracing::warn!(
                timestamp = at,
                dropped = report.dropped,
                "Invalid timestamp {at} in {origin}: subsequent invalid timestamps will not be logged"
            );
        }

        Ok(script)
    }

    /// Stable sort of actions by timestamp.
    pub fn sort_actions(&mut self) {
        self.actions.sort_by_key(|a| a.at);
    }

    /// Remove actions outside `[0, scene_duration_ms)`, keeping order.
    pub fn trim_to_duration(&mut self, scene_duration_ms: TimestampMs) -> TrimReport {
        let mut report = TrimReport::default();
        self.actions.retain(|a| {
            let valid = is_valid_timestamp(a.at, scene_duration_ms);
            if !valid {
                report.dropped += 1;
                if report.first_invalid.is_none() {
                    report.first_invalid = Some(a.at);
                }
            }
            valid
        });
        report
    }

    /// Number of actions that fall outside `[0, scene_duration_ms)`.
    pub fn count_out_of_range(&self, scene_duration_ms: TimestampMs) -> usize {
        self.actions
            .iter()
            .filter(|a| !is_valid_timestamp(a.at, scene_duration_ms))
            .count()
    }

    /// Timestamp of the last action, the 100% mark of the timeline.
    pub fn duration_ms(&self) -> Option<TimestampMs> {
        self.actions.last().map(|a| a.at)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

fn is_valid_timestamp(at: TimestampMs, scene_duration_ms: TimestampMs) -> bool {
    at >= 0 && at < scene_duration_ms
}
