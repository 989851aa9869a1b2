pub mod api;
pub mod args;
pub mod beatmap;
pub mod error;
pub mod model;
pub mod utils;
