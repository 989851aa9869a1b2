use std::cmp::Ordering;

use itertools::Itertools;

use crate::model::batch::BatchOutcome;

/// Renders the before/after score table, best plays first.
pub fn render_scores(outcome: &BatchOutcome) -> String {
    let mut table = String::new();

    table.push_str(&format!(
        "{:>10} | {:>10} | {:>10} | {:>8} | {}\n",
        "beatmap", "before pp", "after pp", "delta", "name"
    ));

    let sorted = outcome.results.iter().sorted_by(|(id_a, a), (id_b, b)| {
        b.score
            .pp
            .partial_cmp(&a.score.pp)
            .unwrap_or(Ordering::Equal)
            .then(id_a.cmp(id_b))
    });

    for (beatmap_id, record) in sorted {
        table.push_str(&format!(
            "{:>10} | {:>10.3} | {:>10.3} | {:>+8.3} | {}\n",
            beatmap_id,
            record.previous_pp,
            record.score.pp,
            record.score.pp - record.previous_pp,
            record.display_name
        ));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::render_scores;
    use crate::model::batch::BatchOutcome;

    #[test]
    fn test_empty_outcome_renders_header_only() {
        let table = render_scores(&BatchOutcome::default());

        assert_eq!(table.lines().count(), 1);
        assert!(table.contains("before pp"));
    }
}
