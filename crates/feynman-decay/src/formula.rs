use chrono::{DateTime, Utc};

/// Health after `ticks` decrements of `step`, floored at 0.
pub fn decayed(health: u8, step: u8, ticks: u32) -> u8 {
    let drop = u32::from(step).saturating_mul(ticks);
    u32::from(health).saturating_sub(drop) as u8
}

/// Whole `interval_secs` periods between `last_run` and `now`. Zero when the
/// clock went backwards or the interval is zero.
pub fn ticks_due(last_run: DateTime<Utc>, now: DateTime<Utc>, interval_secs: u64) -> u32 {
    if interval_secs == 0 || now <= last_run {
        return 0;
    }
    let elapsed = (now - last_run).num_seconds().max(0) as u64;
    u32::try_from(elapsed / interval_secs).unwrap_or(u32::MAX)
}
