//! Heatmap jobs: script file in, PNG file and interactive speed out.

use std::path::{Path, PathBuf};

use funheat_common::config::HeatmapConfig;
use funheat_common::error::FunheatResult;
use funheat_processing_core::generator::{HeatmapGenerator, HeatmapOutput};

use crate::encode::{HeatmapSink, PngFileSink};

/// A heatmap job ready to run.
#[derive(Debug, Clone)]
pub struct HeatmapJob {
    /// Motion script to read.
    pub script_path: PathBuf,

    /// PNG file to write.
    pub output_path: PathBuf,

    /// Length of the media the script belongs to.
    pub scene_duration_ms: i64,

    /// Raster settings.
    pub config: HeatmapConfig,
}

/// What a finished job produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub output_path: PathBuf,
    pub interactive_speed: i64,
    pub action_count: usize,
    pub duration_ms: i64,
}

impl HeatmapJob {
    pub fn new(
        script_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        scene_duration_ms: i64,
    ) -> Self {
        Self {
            script_path: script_path.into(),
            output_path: output_path.into(),
            scene_duration_ms,
            config: HeatmapConfig::default(),
        }
    }

    pub fn with_config(mut self, config: HeatmapConfig) -> Self {
        self.config = config;
        self
    }
}

/// Read the script, generate, and write the heatmap.
///
/// Nothing is written when loading or generation fails.
pub fn run_job(job: &HeatmapJob) -> FunheatResult<JobReport> {
    let mut sink = PngFileSink::new(&job.output_path);
    let output = generate_into(job, &mut sink)?;

    Ok(JobReport {
        output_path: job.output_path.clone(),
        interactive_speed: output.interactive_speed,
        action_count: output.action_count,
        duration_ms: output.duration_ms,
    })
}

/// Read the script and generate, handing the raster to `sink`.
pub fn generate_into(job: &HeatmapJob, sink: &mut dyn HeatmapSink) -> FunheatResult<HeatmapOutput> {
    tracing::info!(
        script = %job.script_path.display(),
        output = %sink.describe(),
        scene_duration_ms = job.scene_duration_ms,
        "Starting heatmap generation"
    );

    let generator = HeatmapGenerator::new(job.scene_duration_ms, job.config)?;
    let bytes = read_script(&job.script_path)?;
    let output = generator.generate(&bytes, &job.script_path.display().to_string())?;

    sink.write(&output.image)?;

    tracing::info!(
        output = %sink.describe(),
        interactive_speed = output.interactive_speed,
        actions = output.action_count,
        "Heatmap written"
    );
    Ok(output)
}

/// Compute only the interactive speed of a script file.
pub fn script_speed(script_path: &Path, scene_duration_ms: i64) -> FunheatResult<i64> {
    let generator = HeatmapGenerator::new(scene_duration_ms, HeatmapConfig::default())?;
    let bytes = read_script(script_path)?;
    generator.interactive_speed(&bytes, &script_path.display().to_string())
}

fn read_script(path: &Path) -> FunheatResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "Failed to read script");
        e.into()
    })
}
