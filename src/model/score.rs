/// A completed play of one beatmap. Read-only input to the engine except
/// for `pp`, which the calculator populates.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub beatmap_id: i32,
    pub player_id: i32,
    pub player_name: String,
    pub total_score: i64,
    pub count_300: u32,
    pub count_100: u32,
    pub count_50: u32,
    pub count_miss: u32,
    pub max_combo: u32,
    pub mods: u32,
    pub pp: f64
}

impl Score {
    pub fn total_hits(&self) -> u32 {
        self.count_300 + self.count_100 + self.count_50 + self.count_miss
    }

    /// Achieved accuracy in [0, 1]; the usual 300/100/50 ratio.
    pub fn accuracy(&self) -> f64 {
        let total = self.total_hits();

        if total == 0 {
            return 0.0;
        }

        let earned = 300 * self.count_300 + 100 * self.count_100 + 50 * self.count_50;

        f64::from(earned) / f64::from(300 * total)
    }
}

#[cfg(test)]
mod tests {
    use super::Score;
    use approx::assert_abs_diff_eq;

    fn score(count_300: u32, count_100: u32, count_50: u32, count_miss: u32) -> Score {
        Score {
            beatmap_id: 1,
            player_id: 1,
            player_name: "peppy".to_string(),
            total_score: 1_000_000,
            count_300,
            count_100,
            count_50,
            count_miss,
            max_combo: 100,
            mods: 0,
            pp: 0.0
        }
    }

    #[test]
    fn test_accuracy_full_300s() {
        assert_abs_diff_eq!(score(100, 0, 0, 0).accuracy(), 1.0);
    }

    #[test]
    fn test_accuracy_mixed_judgements() {
        // (300*90 + 100*8 + 50*1) / (300*100)
        assert_abs_diff_eq!(score(90, 8, 1, 1).accuracy(), 28_250.0 / 30_000.0);
    }

    #[test]
    fn test_accuracy_empty_score() {
        assert_abs_diff_eq!(score(0, 0, 0, 0).accuracy(), 0.0);
    }
}
