use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::constants::DEFAULT_ENTRY_TIMEOUT_SECS;

#[derive(Parser, Clone)]
#[command(
    display_name = "pp-processor",
    long_about = "Recalculates osu! performance points for whole profiles with a pluggable calculator"
)]
pub struct Args {
    /// Calculator identifier, resolved before any file or network access
    #[arg(short, long, env = "PP_CALCULATOR", default_value = "xexxar_v1")]
    pub calculator: String,

    /// Worker pool size for batch recalculation.
    /// Defaults to twice the available cores.
    #[arg(long, env = "PP_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Per-entry timeout in seconds, covering download and parsing
    #[arg(long, default_value_t = DEFAULT_ENTRY_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Directory the downloaded .osu files are cached in
    #[arg(long, env = "PP_CACHE_DIR", default_value = "./osu_files")]
    pub cache_dir: PathBuf,

    /// Output file for the score table; printed to stdout when empty
    #[arg(short, long, default_value = "")]
    pub output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Recalculate a Ripple profile's top scores
    Ripple { gamemode: String, profile_id: i32 },

    /// Recalculate a Bancho profile's top scores
    Bancho {
        gamemode: String,
        profile: String,

        /// API key for bancho. https://osu.ppy.sh/p/api
        #[arg(long, env = "BANCHO_API_KEY", default_value = "NONE")]
        api_key: String,
    },

    /// Calculate a single local .osu file with a clean full-combo score
    File { beatmap: PathBuf },

    /// Print per-object weights for a JSON hit-object document
    Weightfinder { file: PathBuf },
}
