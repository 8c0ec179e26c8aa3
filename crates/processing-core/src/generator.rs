//! Heatmap and interactive speed generation for one script.
//!
//! The generator holds only configuration; every call owns its data.
//!
//! ```text
//! bytes ─► Script::load ─► metrics ─┬─► segments ─► gradient ─► raster
//!                                   └─► median speed
//! ```

use image::RgbaImage;

use funheat_common::config::HeatmapConfig;
use funheat_common::error::{FunheatError, FunheatResult};
use funheat_script_model::action::{Action, TimestampMs};
use funheat_script_model::script::Script;

use crate::color::Palette;
use crate::gradient::GradientTable;
use crate::median::median_speed;
use crate::metrics::update_intensity_and_speed;
use crate::raster::HeatmapRasterizer;
use crate::segments::{backfill, bin_actions};

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct HeatmapOutput {
    /// The rendered heatmap.
    pub image: RgbaImage,

    /// Median per-action speed, in position units per second.
    pub interactive_speed: i64,

    /// Number of actions kept after validation.
    pub action_count: usize,

    /// Timestamp of the last kept action.
    pub duration_ms: TimestampMs,
}

/// Stateless heatmap generator for one media item.
#[derive(Debug, Clone)]
pub struct HeatmapGenerator {
    config: HeatmapConfig,
    scene_duration_ms: TimestampMs,
    palette: Palette,
}

impl HeatmapGenerator {
    /// Create a generator for a scene of `scene_duration_ms` milliseconds.
    pub fn new(scene_duration_ms: TimestampMs, config: HeatmapConfig) -> FunheatResult<Self> {
        config.validate()?;
        if scene_duration_ms <= 0 {
            return Err(FunheatError::config(format!(
                "scene duration must be positive, got {scene_duration_ms}ms"
            )));
        }
        Ok(Self {
            config,
            scene_duration_ms,
            palette: Palette::standard(),
        })
    }

    /// Create a generator from a scene length in seconds.
    ///
    /// Sub-millisecond remainders are truncated.
    pub fn from_scene_secs(scene_duration_secs: f64, config: HeatmapConfig) -> FunheatResult<Self> {
        if !scene_duration_secs.is_finite() {
            return Err(FunheatError::config(format!(
                "scene duration must be finite, got {scene_duration_secs}s"
            )));
        }
        Self::new((scene_duration_secs * 1000.0) as TimestampMs, config)
    }

    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    pub fn scene_duration_ms(&self) -> TimestampMs {
        self.scene_duration_ms
    }

    /// Parse, validate, and render a script document.
    ///
    /// `origin` names the document in warnings and errors.
    pub fn generate(&self, bytes: &[u8], origin: &str) -> FunheatResult<HeatmapOutput> {
        let script = self.load(bytes, origin)?;
        self.generate_script(script, origin)
    }

    /// Render a script already loaded for this scene with [`Script::load`].
    pub fn generate_script(&self, mut script: Script, origin: &str) -> FunheatResult<HeatmapOutput> {
        let duration_ms = script
            .duration_ms()
            .ok_or_else(|| FunheatError::empty_actions(origin))?;

        update_intensity_and_speed(&mut script.actions);
        let image = self.render(&script.actions, duration_ms);
        let interactive_speed = median_speed(&script.actions);

        tracing::debug!(
            origin,
            actions = script.actions.len(),
            duration_ms,
            interactive_speed,
            "Generated heatmap"
        );

        Ok(HeatmapOutput {
            image,
            interactive_speed,
            action_count: script.actions.len(),
            duration_ms,
        })
    }

    /// Compute only the median speed of a script document.
    pub fn interactive_speed(&self, bytes: &[u8], origin: &str) -> FunheatResult<i64> {
        let mut script = self.load(bytes, origin)?;
        if script.is_empty() {
            return Err(FunheatError::empty_actions(origin));
        }
        update_intensity_and_speed(&mut script.actions);
        Ok(median_speed(&script.actions))
    }

    /// Build the gradient table for metric-annotated, time-sorted actions.
    pub fn gradient_table(&self, actions: &[Action]) -> GradientTable {
        let mut segments = bin_actions(actions, self.config.num_segments);
        backfill(&mut segments);
        GradientTable::from_segments(&segments, &self.palette)
    }

    /// Rasterize metric-annotated, time-sorted actions.
    pub fn render(&self, actions: &[Action], duration_ms: TimestampMs) -> RgbaImage {
        let gradient = self.gradient_table(actions);
        HeatmapRasterizer::from_config(&self.config).render(&gradient, duration_ms)
    }

    fn load(&self, bytes: &[u8], origin: &str) -> FunheatResult<Script> {
        let script = Script::load(bytes, self.scene_duration_ms, origin)?;
        tracing::debug!(
            origin,
            actions = script.len(),
            scene_duration_ms = self.scene_duration_ms,
            "Loaded script"
        );
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_ACTIONS: &str = r#"{
        "version": "1.0",
        "actions": [
            {"at": 0, "pos": 0},
            {"at": 1000, "pos": 100},
            {"at": 2000, "pos": 0}
        ]
    }"#;

    #[test]
    fn test_rejects_invalid_construction() {
        assert!(HeatmapGenerator::new(0, HeatmapConfig::default()).is_err());
        assert!(HeatmapGenerator::from_scene_secs(f64::NAN, HeatmapConfig::default()).is_err());
        let bad = HeatmapConfig {
            num_segments: 1,
            ..Default::default()
        };
        assert!(matches!(
            HeatmapGenerator::new(1000, bad),
            Err(FunheatError::Config { .. })
        ));
    }

    #[test]
    fn test_from_scene_secs_truncates() {
        let generator = HeatmapGenerator::from_scene_secs(3.0005, HeatmapConfig::default()).unwrap();
        assert_eq!(generator.scene_duration_ms(), 3000);
    }

    #[test]
    fn test_generate_three_actions() {
        let generator = HeatmapGenerator::new(3000, HeatmapConfig::default()).unwrap();
        let output = generator
            .generate(THREE_ACTIONS.as_bytes(), "three.funscript")
            .unwrap();

        assert_eq!(output.image.dimensions(), (1280, 60));
        assert_eq!(output.interactive_speed, 100);
        assert_eq!(output.action_count, 3);
        assert_eq!(output.duration_ms, 2000);
    }

    #[test]
    fn test_speed_only_matches_full_generation() {
        let generator = HeatmapGenerator::new(3000, HeatmapConfig::default()).unwrap();
        let speed = generator
            .interactive_speed(THREE_ACTIONS.as_bytes(), "three.funscript")
            .unwrap();
        assert_eq!(speed, 100);
    }

    #[test]
    fn test_all_trimmed_is_empty_actions() {
        let generator = HeatmapGenerator::new(500, HeatmapConfig::default()).unwrap();
        let json = r#"{"actions": [{"at": 1000, "pos": 10}, {"at": -1, "pos": 0}]}"#;

        let err = generator.generate(json.as_bytes(), "late.funscript").unwrap_err();
        assert!(matches!(err, FunheatError::EmptyActions { ref origin } if origin == "late.funscript"));

        let err = generator.interactive_speed(json.as_bytes(), "late.funscript").unwrap_err();
        assert!(matches!(err, FunheatError::EmptyActions { .. }));
    }

    #[test]
    fn test_missing_actions_is_malformed() {
        let generator = HeatmapGenerator::new(500, HeatmapConfig::default()).unwrap();
        let err = generator.generate(br#"{"version": "1.0"}"#, "x").unwrap_err();
        assert!(matches!(err, FunheatError::MalformedInput { .. }));
    }

    #[test]
    fn test_single_action_script() {
        let config = HeatmapConfig {
            width: 64,
            height: 8,
            num_segments: 16,
        };
        let generator = HeatmapGenerator::new(1000, config).unwrap();
        let output = generator
            .generate(br#"{"actions": [{"at": 0, "pos": 50}]}"#, "one")
            .unwrap();
        assert_eq!(output.image.dimensions(), (64, 8));
        assert_eq!(output.interactive_speed, 0);
        assert_eq!(output.duration_ms, 0);
    }
}
