// Engine constants
pub const PROFILE_DECAY_WEIGHT: f64 = 0.95;

/// Delta times handed to skill estimators are clamped to [0, this] ms.
pub const DELTA_TIME_CEILING: f64 = 1000.0;

// osu!-standard judgement window parameters (ms at od 0, ms per od step)
pub const WINDOW_300_BASE: f64 = 80.0;
pub const WINDOW_300_STEP: f64 = 6.0;
pub const WINDOW_100_BASE: f64 = 140.0;
pub const WINDOW_100_STEP: f64 = 8.0;
pub const WINDOW_50_BASE: f64 = 200.0;
pub const WINDOW_50_STEP: f64 = 10.0;
pub const OD_CEILING: f64 = 10.0;

// xexxar_v1 combination multipliers
pub const PERFORMANCE_MULTIPLIER: f64 = 8.0;
pub const ACCURACY_EXPONENT: f64 = 2.0;
pub const COMBO_EXPONENT: f64 = 0.8;
pub const MISS_PENALTY_BASE: f64 = 0.97;
pub const HIDDEN_MULTIPLIER: f64 = 1.08;
pub const FLASHLIGHT_MULTIPLIER: f64 = 1.12;
pub const NO_FAIL_MULTIPLIER: f64 = 0.9;
pub const SPUN_OUT_MULTIPLIER: f64 = 0.95;

// WeightFinder rhythm-change bonus
pub const WEIGHT_BASELINE: f64 = 1.0;
pub const WEIGHT_RHYTHM_BONUS: f64 = 0.1;
pub const WEIGHT_CEILING: f64 = 1.5;

pub const DEFAULT_SCORE_LIMIT: usize = 100;
pub const DEFAULT_ENTRY_TIMEOUT_SECS: u64 = 30;
