use std::{collections::HashMap, str::FromStr};

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    beatmap::BeatmapModel,
    error::{EntryError, ProcessorError},
    model::{
        constants::{
            ACCURACY_EXPONENT, COMBO_EXPONENT, FLASHLIGHT_MULTIPLIER, HIDDEN_MULTIPLIER, MISS_PENALTY_BASE,
            NO_FAIL_MULTIPLIER, PERFORMANCE_MULTIPLIER, SPUN_OUT_MULTIPLIER
        },
        hit_windows::HitWindows,
        mods::Mods,
        score::Score,
        skills::Skill,
        weight_finder
    }
};

/// The pp rating of one play plus its per-skill breakdown. Immutable once
/// produced; the engine retains no state across calculations.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceResult {
    pub pp: f64,
    pub breakdown: HashMap<Skill, f64>
}

impl PerformanceResult {
    pub fn skill_rating(&self, skill: Skill) -> f64 {
        self.breakdown.get(&skill).copied().unwrap_or(0.0)
    }
}

/// Closed set of calculator strategies, resolved once at configuration time
/// and dispatched statically afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum CalculatorKind {
    XexxarV1
}

/// Resolves a calculator identifier. Unknown identifiers fail here, before
/// any file or network access happens.
pub fn resolve(name: &str) -> Result<CalculatorKind, ProcessorError> {
    CalculatorKind::from_str(name).map_err(|_| {
        let known = CalculatorKind::iter().join(", ");

        ProcessorError::Config(format!("unknown calculator identifier: {name} (known: {known})"))
    })
}

impl CalculatorKind {
    /// Total function of (beatmap, score): no hidden state, no io.
    pub fn calculate(self, beatmap: &BeatmapModel, score: &Score) -> Result<PerformanceResult, EntryError> {
        match self {
            CalculatorKind::XexxarV1 => xexxar_v1(beatmap, score)
        }
    }
}

/// The xexxar_v1 strategy: accuracy contributions per object, biased by the
/// WeightFinder sequence, reduced with a weighted sum, then combined with
/// achieved accuracy, combo and mods into the final pp value.
fn xexxar_v1(beatmap: &BeatmapModel, score: &Score) -> Result<PerformanceResult, EntryError> {
    if beatmap.hit_objects.is_empty() {
        return Err(EntryError::Input(format!(
            "beatmap {} has no hit objects",
            beatmap.beatmap_id
        )));
    }

    if score.total_hits() == 0 {
        return Err(EntryError::Input("score has no judgements".to_string()));
    }

    let windows = HitWindows::new(beatmap.overall_difficulty, score.mods);
    let rate = score.mods.clock_rate();

    let weights = weight_finder::weights(&beatmap.hit_objects);
    if weights.len() != beatmap.hit_objects.len() {
        return Err(EntryError::Calculator(format!(
            "weight sequence length {} does not match object count {}",
            weights.len(),
            beatmap.hit_objects.len()
        )));
    }

    // Sequential fold in object order; contributions are pure, so the
    // reduction is reproducible regardless of how entries were scheduled
    let mut breakdown = HashMap::new();
    for skill in Skill::iter() {
        let rating: f64 = beatmap
            .hit_objects
            .iter()
            .zip(&weights)
            .map(|(object, weight)| skill.contribution(object, object.delta_time / rate, &windows) * weight)
            .sum();

        breakdown.insert(skill, rating);
    }

    let raw: f64 = breakdown.values().sum();
    let pp = raw * PERFORMANCE_MULTIPLIER * accuracy_factor(score) * combo_factor(beatmap, score) * mod_factor(score.mods);

    Ok(PerformanceResult { pp, breakdown })
}

fn accuracy_factor(score: &Score) -> f64 {
    score.accuracy().powf(ACCURACY_EXPONENT) * MISS_PENALTY_BASE.powi(score.count_miss as i32)
}

fn combo_factor(beatmap: &BeatmapModel, score: &Score) -> f64 {
    if beatmap.max_combo == 0 {
        return 0.0;
    }

    let ratio = (f64::from(score.max_combo) / f64::from(beatmap.max_combo)).clamp(0.0, 1.0);

    ratio.powf(COMBO_EXPONENT)
}

fn mod_factor(mods: u32) -> f64 {
    let mut factor = 1.0;

    if mods.hd() {
        factor *= HIDDEN_MULTIPLIER;
    }
    if mods.fl() {
        factor *= FLASHLIGHT_MULTIPLIER;
    }
    if mods.nf() {
        factor *= NO_FAIL_MULTIPLIER;
    }
    if mods.so() {
        factor *= SPUN_OUT_MULTIPLIER;
    }

    factor
}
