//! Print the interactive speed of a motion script.

use std::path::PathBuf;

use funheat_render_engine::script_speed;

pub fn run(script: PathBuf, duration_secs: f64) -> anyhow::Result<()> {
    let scene_duration_ms = super::secs_to_ms(duration_secs)?;
    let speed = script_speed(&script, scene_duration_ms)
        .map_err(|e| anyhow::anyhow!("Failed to compute speed: {e}"))?;
    println!("{speed}");
    Ok(())
}
