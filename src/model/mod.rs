pub mod batch;
pub mod calculator;
pub mod constants;
pub mod hit_windows;
pub mod mods;
pub mod profile;
pub mod ruleset;
pub mod score;
pub mod skills;
pub mod weight_finder;
