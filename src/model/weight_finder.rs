use serde::Deserialize;

use crate::{
    beatmap::{HitObject, HitObjectKind},
    model::constants::{DELTA_TIME_CEILING, WEIGHT_BASELINE, WEIGHT_CEILING, WEIGHT_RHYTHM_BONUS}
};

/// Computes one weight per input object, index-aligned and same length.
/// Pure function: identical input always yields identical output.
///
/// Weights bias which objects dominate a skill rating. The baseline is 1.0;
/// objects that break the established rhythm (their delta time diverges from
/// the previous object's) earn a bounded trick-pattern bonus.
pub fn weights(objects: &[HitObject]) -> Vec<f64> {
    objects
        .iter()
        .enumerate()
        .map(|(i, object)| {
            if i == 0 {
                return WEIGHT_BASELINE;
            }

            weight_for(object.delta_time, objects[i - 1].delta_time)
        })
        .collect()
}

fn weight_for(delta_time: f64, previous_delta_time: f64) -> f64 {
    let current = delta_time.clamp(1.0, DELTA_TIME_CEILING);
    let previous = previous_delta_time.clamp(1.0, DELTA_TIME_CEILING);

    // ln of the tempo ratio is 0 for a steady rhythm and symmetric for
    // speed-ups versus slow-downs
    let deviation = (current / previous).ln().abs();

    (WEIGHT_BASELINE + WEIGHT_RHYTHM_BONUS * deviation).min(WEIGHT_CEILING)
}

/// One hit-object record of the debug document format.
#[derive(Debug, Deserialize)]
pub struct HitObjectRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: f64,
    pub dt: f64
}

/// Debug entrypoint: takes a JSON document holding an ordered list of
/// hit-object records and returns the index-aligned weight list.
pub fn weights_from_document(document: &str) -> Result<Vec<f64>, serde_json::Error> {
    let records: Vec<HitObjectRecord> = serde_json::from_str(document)?;

    let objects: Vec<HitObject> = records
        .iter()
        .map(|record| HitObject {
            kind: match record.kind.as_str() {
                "circle" => HitObjectKind::Circle,
                "slider" => HitObjectKind::Slider,
                _ => HitObjectKind::Spinner
            },
            start_time: record.timestamp,
            delta_time: record.dt
        })
        .collect();

    Ok(weights(&objects))
}

#[cfg(test)]
mod tests {
    use super::{weights, weights_from_document};
    use crate::utils::test_utils::generate_beatmap;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_length_matches_input_count() {
        for n_objects in [1, 2, 17, 500] {
            let beatmap = generate_beatmap(1, n_objects, 5.0);

            assert_eq!(weights(&beatmap.hit_objects).len(), n_objects);
        }
    }

    #[test]
    fn test_pure_function_identical_output() {
        let beatmap = generate_beatmap(1, 200, 7.0);

        assert_eq!(weights(&beatmap.hit_objects), weights(&beatmap.hit_objects));
    }

    #[test]
    fn test_steady_rhythm_stays_at_baseline() {
        let document = r#"[
            {"type": "circle", "timestamp": 0, "dt": 1000},
            {"type": "circle", "timestamp": 200, "dt": 200},
            {"type": "circle", "timestamp": 400, "dt": 200},
            {"type": "circle", "timestamp": 600, "dt": 200}
        ]"#;

        let weights = weights_from_document(document).unwrap();

        assert_eq!(weights.len(), 4);
        assert_abs_diff_eq!(weights[2], 1.0);
        assert_abs_diff_eq!(weights[3], 1.0);
    }

    #[test]
    fn test_rhythm_break_earns_bonus() {
        let document = r#"[
            {"type": "circle", "timestamp": 0, "dt": 200},
            {"type": "circle", "timestamp": 200, "dt": 200},
            {"type": "slider", "timestamp": 300, "dt": 100}
        ]"#;

        let weights = weights_from_document(document).unwrap();

        assert!(weights[2] > 1.0);
    }

    #[test]
    fn test_bonus_is_bounded() {
        let document = r#"[
            {"type": "circle", "timestamp": 0, "dt": 1000},
            {"type": "circle", "timestamp": 1, "dt": 1}
        ]"#;

        let weights = weights_from_document(document).unwrap();

        assert!(weights[1] <= 1.5);
    }

    #[test]
    fn test_malformed_document_rejected() {
        assert!(weights_from_document("{\"not\": \"a list\"}").is_err());
    }
}
