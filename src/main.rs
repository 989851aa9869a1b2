use std::{path::Path, sync::Arc, time::Duration};

use clap::Parser;
use pp_processor::{
    api::{BanchoClient, RippleClient, BANCHO_BASE_URL, RIPPLE_BASE_URL},
    args::{Args, Command},
    beatmap::{cache::BeatmapCache, parse_beatmap},
    error::ProcessorError,
    model::{
        batch::{self, BatchContext, BatchEntry, BatchOutcome, CachedBeatmapSource},
        calculator,
        constants::DEFAULT_SCORE_LIMIT,
        profile, ruleset,
        score::Score,
        weight_finder
    },
    utils::table::render_scores
};
use tracing::{error, info, warn};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();

    let indicatif_layer = IndicatifLayer::new();
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(indicatif_layer.get_stderr_writer()))
        .with(indicatif_layer)
        .init();

    if let Err(e) = run(args).await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ProcessorError> {
    // Resolved and validated before any file or network access
    let calculator = calculator::resolve(&args.calculator)?;
    let (ctx, _cancel) = BatchContext::new(calculator, args.concurrency, Duration::from_secs(args.timeout_secs))?;

    match args.command.clone() {
        Command::Ripple { gamemode, profile_id } => ripple(&args, &ctx, &gamemode, profile_id).await,
        Command::Bancho {
            gamemode,
            profile,
            api_key
        } => bancho(&args, &ctx, &gamemode, &profile, &api_key).await,
        Command::File { beatmap } => file(&ctx, &beatmap),
        Command::Weightfinder { file } => weightfinder(&file)
    }
}

async fn ripple(args: &Args, ctx: &BatchContext, gamemode: &str, profile_id: i32) -> Result<(), ProcessorError> {
    ruleset::resolve_supported(gamemode)?;

    info!("Ripple Profile Recalculator");

    let client = RippleClient::new(RIPPLE_BASE_URL);
    let user = client.get_user_full(profile_id).await?;
    let best = client.get_user_best(profile_id, DEFAULT_SCORE_LIMIT).await?;

    if best.is_empty() {
        info!("no scores found for profile {profile_id}");
        return Ok(());
    }

    let entries = best.iter().map(|s| s.to_entry(user.id, &user.username)).collect();
    let outcome = run_batch(args, ctx, entries).await;

    report(args, &user.username, user.std.pp, &outcome)
}

async fn bancho(
    args: &Args,
    ctx: &BatchContext,
    gamemode: &str,
    profile: &str,
    api_key: &str
) -> Result<(), ProcessorError> {
    ruleset::resolve_supported(gamemode)?;

    info!("Bancho Profile Recalculator");

    let client = BanchoClient::new(BANCHO_BASE_URL, api_key);
    let user = client.get_user(profile).await?;
    let best = client.get_user_best(profile).await?;

    if best.is_empty() {
        info!("no scores found for profile {profile}");
        return Ok(());
    }

    let entries = best.iter().map(|s| s.to_entry(user.user_id, &user.username)).collect();
    let outcome = run_batch(args, ctx, entries).await;

    report(args, &user.username, user.pp.unwrap_or(0.0), &outcome)
}

async fn run_batch(args: &Args, ctx: &BatchContext, entries: Vec<BatchEntry>) -> BatchOutcome {
    let source = Arc::new(CachedBeatmapSource::new(BeatmapCache::new(&args.cache_dir)));
    let outcome = batch::recalculate(source, entries, ctx).await;

    for failure in &outcome.failures {
        warn!("beatmap {} skipped: {}", failure.beatmap_id, failure.error);
    }

    outcome
}

fn report(args: &Args, username: &str, previous_pp: f64, outcome: &BatchOutcome) -> Result<(), ProcessorError> {
    let new_pp = profile::profile_pp(&outcome.results);
    let table = render_scores(outcome);

    if args.output.is_empty() {
        print!("{table}");
    } else {
        std::fs::write(&args.output, table)?;
        info!("score table written to {}", args.output);
    }

    info!("Profile Before: {previous_pp:.3}pp ({username})");
    info!("Profile After: {new_pp:.3}pp ({username})");

    Ok(())
}

fn file(ctx: &BatchContext, beatmap: &Path) -> Result<(), ProcessorError> {
    info!("osu! File Recalculator");

    let model = parse_beatmap(beatmap).map_err(|e| ProcessorError::Beatmap(e.to_string()))?;

    // Judge a clean full combo against the map
    let score = Score {
        beatmap_id: model.beatmap_id,
        player_id: 0,
        player_name: "local".to_string(),
        total_score: 0,
        count_300: model.hit_objects.len() as u32,
        count_100: 0,
        count_50: 0,
        count_miss: 0,
        max_combo: model.max_combo,
        mods: 0,
        pp: 0.0
    };

    let result = ctx
        .calculator
        .calculate(&model, &score)
        .map_err(|e| ProcessorError::Beatmap(e.to_string()))?;

    info!("{}: {:.3}pp", model.display_name, result.pp);
    for (skill, rating) in &result.breakdown {
        info!("  {skill}: {rating:.5}");
    }

    Ok(())
}

fn weightfinder(file: &Path) -> Result<(), ProcessorError> {
    let document = std::fs::read_to_string(file)?;
    let weights = weight_finder::weights_from_document(&document)?;

    println!("{}", serde_json::to_string(&weights)?);

    Ok(())
}
