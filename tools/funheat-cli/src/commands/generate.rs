//! Render a heatmap PNG for a motion script.

use std::path::{Path, PathBuf};

use serde::Serialize;

use funheat_common::config::HeatmapConfig;
use funheat_render_engine::{run_job, HeatmapJob};

#[derive(Debug, Serialize)]
struct GenerateSummary {
    output: String,
    interactive_speed: i64,
    actions: usize,
    duration_ms: i64,
}

pub fn run(
    script: PathBuf,
    duration_secs: f64,
    output: Option<PathBuf>,
    config: HeatmapConfig,
    json: bool,
) -> anyhow::Result<()> {
    let scene_duration_ms = super::secs_to_ms(duration_secs)?;
    let output = output.unwrap_or_else(|| default_output_path(&script));

    let job = HeatmapJob::new(&script, &output, scene_duration_ms).with_config(config);
    let report =
        run_job(&job).map_err(|e| anyhow::anyhow!("Failed to generate heatmap: {e}"))?;

    if json {
        let summary = GenerateSummary {
            output: report.output_path.display().to_string(),
            interactive_speed: report.interactive_speed,
            actions: report.action_count,
            duration_ms: report.duration_ms,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Heatmap written to: {}", report.output_path.display());
        println!("  Size: {}x{}", config.width, config.height);
        println!("  Actions: {}", report.action_count);
        println!("  Interactive speed: {}", report.interactive_speed);
    }

    Ok(())
}

/// `scene.funscript` -> `scene.heatmap.png` next to the script.
fn default_output_path(script: &Path) -> PathBuf {
    script.with_extension("heatmap.png")
}
