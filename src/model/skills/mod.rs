pub mod accuracy;

use strum_macros::{Display, EnumIter};

use crate::{beatmap::HitObject, model::hit_windows::HitWindows};

/// Skill dimensions a calculator can rate. Contributions are pure functions
/// of their inputs, which is what makes parallel evaluation safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Skill {
    Accuracy
}

impl Skill {
    /// Per-object difficulty contribution for this skill. `delta_time` must
    /// already be on the same clock as `windows`.
    pub fn contribution(self, object: &HitObject, delta_time: f64, windows: &HitWindows) -> f64 {
        match self {
            Skill::Accuracy => accuracy::contribution(object, delta_time, windows)
        }
    }
}
