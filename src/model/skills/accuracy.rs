use std::f64::consts::PI;

use crate::{
    beatmap::HitObject,
    model::{constants::DELTA_TIME_CEILING, hit_windows::HitWindows}
};

/// Maps a delta time to the spacing term of the accuracy contribution.
/// Clamped to [0, 1000] ms; non-decreasing on that range.
pub fn dt_to_d(delta_time: f64) -> f64 {
    let dt = delta_time.clamp(0.0, DELTA_TIME_CEILING);

    (PI * dt / 2000.0).sin()
}

/// Accuracy difficulty of a single object.
///
/// Objects are harder to accuracy the slower they are, scaled by how
/// forgiving the judgement tier is: circles are judged against the 300
/// window, everything else against the 50 window.
pub fn contribution(object: &HitObject, delta_time: f64, windows: &HitWindows) -> f64 {
    let window = if object.is_circle() {
        windows.window_300
    } else {
        windows.window_50
    };

    dt_to_d(delta_time) / window
}
