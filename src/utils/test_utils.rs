use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    beatmap::{BeatmapModel, HitObject, HitObjectKind},
    model::score::Score
};

/// Generates a synthetic beatmap with a seeded RNG so repeated calls with
/// the same arguments produce identical maps.
pub fn generate_beatmap(beatmap_id: i32, n_objects: usize, overall_difficulty: f64) -> BeatmapModel {
    let mut rng = ChaCha8Rng::seed_from_u64(beatmap_id as u64);

    let mut hit_objects = Vec::with_capacity(n_objects);
    let mut time = 0.0;

    for i in 0..n_objects {
        let delta_time = if i == 0 {
            1000.0
        } else {
            rng.random_range(80.0..=600.0)
        };
        time += delta_time;

        let kind = match rng.random_range(0..10) {
            0..=7 => HitObjectKind::Circle,
            8 => HitObjectKind::Slider,
            _ => HitObjectKind::Spinner
        };

        hit_objects.push(HitObject {
            kind,
            start_time: time,
            delta_time
        });
    }

    BeatmapModel {
        beatmap_id,
        display_name: format!("Generated - Beatmap [{beatmap_id}]"),
        max_combo: n_objects as u32,
        overall_difficulty,
        hit_objects
    }
}

/// A near-full-combo score against a map of `n_objects` objects.
pub fn generate_score(beatmap_id: i32, n_objects: u32) -> Score {
    let count_100 = n_objects / 20;
    let count_300 = n_objects - count_100;

    Score {
        beatmap_id,
        player_id: 1,
        player_name: "generated".to_string(),
        total_score: 1_000_000,
        count_300,
        count_100,
        count_50: 0,
        count_miss: 0,
        max_combo: n_objects,
        mods: 0,
        pp: 0.0
    }
}
