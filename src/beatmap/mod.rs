pub mod cache;

use std::path::Path;

use crate::{error::EntryError, model::constants::DELTA_TIME_CEILING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitObjectKind {
    Circle,
    Slider,
    Spinner
}

/// One hit object of a parsed beatmap. `delta_time` is the time since the
/// previous object in map-clock milliseconds; the first object has no
/// predecessor and gets the estimator clamp ceiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitObject {
    pub kind: HitObjectKind,
    pub start_time: f64,
    pub delta_time: f64
}

impl HitObject {
    pub fn is_circle(&self) -> bool {
        self.kind == HitObjectKind::Circle
    }
}

/// Read-only representation of a level, owned by the caller for the
/// duration of one calculation.
#[derive(Debug, Clone)]
pub struct BeatmapModel {
    pub beatmap_id: i32,
    pub display_name: String,
    pub max_combo: u32,
    pub overall_difficulty: f64,
    pub hit_objects: Vec<HitObject>
}

/// Parses a local `.osu` file into a [`BeatmapModel`].
pub fn parse_beatmap(path: &Path) -> Result<BeatmapModel, EntryError> {
    let map = rosu_map::Beatmap::from_path(path).map_err(|e| EntryError::Parse(e.to_string()))?;

    Ok(convert(&map))
}

fn convert(map: &rosu_map::Beatmap) -> BeatmapModel {
    use rosu_map::section::hit_objects::HitObjectKind as RawKind;

    let mut hit_objects = Vec::with_capacity(map.hit_objects.len());
    let mut previous_time: Option<f64> = None;

    for raw in &map.hit_objects {
        let kind = match raw.kind {
            RawKind::Circle(_) => HitObjectKind::Circle,
            RawKind::Slider(_) => HitObjectKind::Slider,
            // Hold notes have no osu!standard judgement; treated like spinners
            RawKind::Spinner(_) | RawKind::Hold(_) => HitObjectKind::Spinner
        };

        let delta_time = match previous_time {
            Some(t) => raw.start_time - t,
            None => DELTA_TIME_CEILING
        };

        hit_objects.push(HitObject {
            kind,
            start_time: raw.start_time,
            delta_time
        });

        previous_time = Some(raw.start_time);
    }

    BeatmapModel {
        beatmap_id: map.beatmap_id,
        display_name: format!("{} - {} [{}]", map.artist, map.title, map.version),
        // Nested slider hits are not parsed; the object count is the combo
        // ceiling the combo factor is clamped against.
        max_combo: hit_objects.len() as u32,
        overall_difficulty: f64::from(map.overall_difficulty),
        hit_objects
    }
}
