use crate::model::{
    constants::{
        OD_CEILING, WINDOW_100_BASE, WINDOW_100_STEP, WINDOW_300_BASE, WINDOW_300_STEP, WINDOW_50_BASE, WINDOW_50_STEP
    },
    mods::Mods
};

/// Judgement tolerance in milliseconds for each hit tier, derived from the
/// map's overall difficulty and the active mods.
///
/// All windows are strictly positive and shrink as difficulty grows. Speed
/// mods divide the windows by the clock rate; callers must divide object
/// delta times by the same rate so both live on the real-time clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitWindows {
    pub window_300: f64,
    pub window_100: f64,
    pub window_50: f64
}

impl HitWindows {
    pub fn new(overall_difficulty: f64, mods: u32) -> HitWindows {
        // HR/EZ scale od before window derivation; od never exceeds 10
        let od = (overall_difficulty * mods.od_multiplier()).min(OD_CEILING);
        let rate = mods.clock_rate();

        HitWindows {
            window_300: (WINDOW_300_BASE - WINDOW_300_STEP * od) / rate,
            window_100: (WINDOW_100_BASE - WINDOW_100_STEP * od) / rate,
            window_50: (WINDOW_50_BASE - WINDOW_50_STEP * od) / rate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::HitWindows;
    use crate::model::mods::Mods;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_windows_od_zero() {
        let windows = HitWindows::new(0.0, 0);

        assert_abs_diff_eq!(windows.window_300, 80.0);
        assert_abs_diff_eq!(windows.window_100, 140.0);
        assert_abs_diff_eq!(windows.window_50, 200.0);
    }

    #[test]
    fn test_windows_positive_and_monotonic() {
        let mut previous = HitWindows::new(0.0, 0);

        for step in 1..=20 {
            let od = step as f64 * 0.5;
            let windows = HitWindows::new(od, 0);

            assert!(windows.window_300 > 0.0);
            assert!(windows.window_100 > 0.0);
            assert!(windows.window_50 > 0.0);
            assert!(windows.window_300 < previous.window_300);
            assert!(windows.window_100 < previous.window_100);
            assert!(windows.window_50 < previous.window_50);

            previous = windows;
        }
    }

    #[test]
    fn test_double_time_shrinks_windows() {
        let nomod = HitWindows::new(5.0, 0);
        let double_time = HitWindows::new(5.0, <u32 as Mods>::DT);

        assert_abs_diff_eq!(double_time.window_300, nomod.window_300 / 1.5);
        assert_abs_diff_eq!(double_time.window_50, nomod.window_50 / 1.5);
    }

    #[test]
    fn test_hard_rock_caps_od_at_ten() {
        let capped = HitWindows::new(9.0, <u32 as Mods>::HR);
        let od_ten = HitWindows::new(10.0, 0);

        assert_abs_diff_eq!(capped.window_300, od_ten.window_300);
    }
}
