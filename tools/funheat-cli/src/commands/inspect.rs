//! Show motion script information.

use std::path::PathBuf;

use funheat_script_model::Script;

pub fn run(script: PathBuf, duration_secs: Option<f64>) -> anyhow::Result<()> {
    let bytes = std::fs::read(&script)
        .map_err(|_| anyhow::anyhow!("Script not found: {}", script.display()))?;
    let origin = script.display().to_string();
    let mut parsed = Script::from_slice(&bytes, &origin)
        .map_err(|e| anyhow::anyhow!("Failed to load script: {e}"))?;
    parsed.sort_actions();

    println!("Script: {origin}");
    println!(
        "  Version: {}",
        if parsed.version.is_empty() {
            "(none)"
        } else {
            parsed.version.as_str()
        }
    );
    println!("  Inverted: {}", parsed.inverted);
    println!("  Range: {}", parsed.range);
    println!("  Actions: {}", parsed.len());

    if let (Some(first), Some(last)) = (parsed.actions.first(), parsed.actions.last()) {
        println!(
            "  Span: {:.1}s .. {:.1}s",
            first.at_secs(),
            last.at_secs()
        );
    }

    if let Some(secs) = duration_secs {
        let scene_duration_ms = super::secs_to_ms(secs)?;
        let out_of_range = parsed.count_out_of_range(scene_duration_ms);
        println!("  Scene: {secs:.1}s");
        println!("  Out-of-range actions: {out_of_range}");
        if out_of_range == parsed.len() {
            println!("\nNo valid actions for this scene; a heatmap cannot be generated.");
        }
    }

    Ok(())
}
