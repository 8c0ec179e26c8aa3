pub mod generate;
pub mod inspect;
pub mod speed;

/// Convert a CLI duration in seconds to whole milliseconds.
pub fn secs_to_ms(secs: f64) -> anyhow::Result<i64> {
    if !secs.is_finite() || secs <= 0.0 {
        anyhow::bail!("Duration must be a positive number of seconds, got {secs}");
    }
    Ok((secs * 1000.0) as i64)
}
