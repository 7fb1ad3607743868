//! Core domain: timestamp and cooldown helpers shared by every timed mechanic.
//!
//! Timestamps are simulation seconds (`Time::elapsed_secs_f64`). A `None`
//! timestamp means the mechanic never started, so cooldowns gated on it are
//! ready and windows opened by it are closed.

/// Has `duration` seconds elapsed since `since`? A mechanic that never
/// started counts as elapsed.
pub fn has_elapsed(since: Option<f64>, now: f64, duration: f32) -> bool {
    match since {
        Some(start) => now - start >= duration as f64,
        None => true,
    }
}

/// Is `now` still inside the `window` seconds opened at `since`?
pub fn within_window(since: Option<f64>, now: f64, window: f32) -> bool {
    match since {
        Some(start) => now - start <= window as f64,
        None => false,
    }
}

/// Seconds since `since`, zero when it never started.
pub fn elapsed_since(since: Option<f64>, now: f64) -> f32 {
    since.map(|start| (now - start).max(0.0) as f32).unwrap_or(0.0)
}

/// Fraction of `duration` covered since `since`, clamped to `[0, 1]`.
pub fn progress(since: Option<f64>, now: f64, duration: f32) -> f32 {
    if duration <= 0.0 {
        return if since.is_some() { 1.0 } else { 0.0 };
    }
    (elapsed_since(since, now) / duration).clamp(0.0, 1.0)
}

/// Ease-out cubic: fast start, gentle settle.
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Hermite smoothstep on `[0, 1]`.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
