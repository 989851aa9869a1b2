use std::cmp::Ordering;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::model::{batch::BatchRecord, constants::PROFILE_DECAY_WEIGHT};

/// Folds a completed batch into the profile-level rating: plays sorted by
/// pp descending, then `Σ pp_i · 0.95^i`. The sort is stable with beatmap
/// id as tie-breaker, so repeated runs over the same input are bit-identical.
pub fn profile_pp(results: &IndexMap<i32, BatchRecord>) -> f64 {
    let sorted = results
        .iter()
        .sorted_by(|(id_a, a), (id_b, b)| {
            b.score
                .pp
                .partial_cmp(&a.score.pp)
                .unwrap_or(Ordering::Equal)
                .then(id_a.cmp(id_b))
        })
        .map(|(_, record)| record.score.pp);

    weighted_sum(sorted)
}

/// Geometric decay sum over an already-sorted pp sequence.
pub fn weighted_sum(pps: impl IntoIterator<Item = f64>) -> f64 {
    pps.into_iter()
        .enumerate()
        .map(|(i, pp)| pp * PROFILE_DECAY_WEIGHT.powi(i as i32))
        .sum()
}
