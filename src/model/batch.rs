use std::{future::Future, sync::Arc, thread, time::Duration};

use indexmap::IndexMap;
use tokio::{
    sync::{watch, Semaphore},
    task::JoinSet,
    time::timeout
};
use tracing::{debug, warn};

use crate::{
    beatmap::{cache::BeatmapCache, parse_beatmap, BeatmapModel},
    error::{EntryError, ProcessorError},
    model::{
        calculator::{CalculatorKind, PerformanceResult},
        score::Score
    },
    utils::progress_utils::progress_bar
};

/// Collaborator that turns a beatmap id into a parsed, local model.
/// The orchestrator only ever blocks inside this call.
pub trait BeatmapSource: Send + Sync + 'static {
    fn load(&self, beatmap_id: i32) -> impl Future<Output = Result<BeatmapModel, EntryError>> + Send;
}

/// Production source: on-disk cache plus the `.osu` parser.
pub struct CachedBeatmapSource {
    cache: BeatmapCache
}

impl CachedBeatmapSource {
    pub fn new(cache: BeatmapCache) -> CachedBeatmapSource {
        CachedBeatmapSource { cache }
    }
}

impl BeatmapSource for CachedBeatmapSource {
    fn load(&self, beatmap_id: i32) -> impl Future<Output = Result<BeatmapModel, EntryError>> + Send {
        async move {
            let path = self.cache.ensure_local(beatmap_id).await?;

            parse_beatmap(&path)
        }
    }
}

/// One unit of batch work, keyed by beatmap id so results can be merged
/// without positional ordering.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    pub beatmap_id: i32,
    pub score: Score
}

/// Successful recalculation of one entry. `score.pp` holds the new value;
/// the provider's previous rating is kept for before/after reporting.
#[derive(Debug, Clone)]
pub struct BatchRecord {
    pub score: Score,
    pub previous_pp: f64,
    pub display_name: String,
    pub result: PerformanceResult
}

#[derive(Debug)]
pub struct BatchFailure {
    pub beatmap_id: i32,
    pub error: EntryError
}

/// Result of one `recalculate` call: successful records keyed by beatmap id
/// in submission order, plus every failed entry with its reason.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: IndexMap<i32, BatchRecord>,
    pub failures: Vec<BatchFailure>
}

/// Explicit context passed into the orchestrator and each task: no global
/// pool, no implicit configuration.
#[derive(Clone)]
pub struct BatchContext {
    pub calculator: CalculatorKind,
    pub concurrency: usize,
    pub entry_timeout: Duration,
    cancel: watch::Receiver<bool>
}

/// Dropping the sender cancels nothing by itself; flip the flag to request
/// cancellation. Entries already running are left to finish.
pub struct CancellationHandle {
    sender: watch::Sender<bool>
}

impl CancellationHandle {
    pub fn cancel(&self) {
        let _ = self.sender.send(true);
    }
}

impl BatchContext {
    /// Validates the pool configuration. A zero worker count is a
    /// configuration error, not something to correct silently.
    pub fn new(
        calculator: CalculatorKind,
        concurrency: Option<usize>,
        entry_timeout: Duration
    ) -> Result<(BatchContext, CancellationHandle), ProcessorError> {
        let concurrency = match concurrency {
            Some(0) => return Err(ProcessorError::Config("worker pool size must be at least 1".to_string())),
            Some(n) => n,
            None => default_concurrency()
        };

        let (sender, cancel) = watch::channel(false);

        Ok((
            BatchContext {
                calculator,
                concurrency,
                entry_timeout,
                cancel
            },
            CancellationHandle { sender }
        ))
    }

    fn cancelled(&self) -> bool {
        *self.cancel.borrow()
    }
}

/// Twice the available cores, as the original recalculator sized its pool.
fn default_concurrency() -> usize {
    thread::available_parallelism().map_or(4, |n| n.get() * 2)
}

/// Recalculates every entry on a bounded, batch-scoped worker pool and
/// merges the results single-threaded after a wait-all barrier.
///
/// A single entry's failure (bad id, parse failure, calculator error,
/// timeout) is recorded and excluded from the result mapping; it never
/// aborts sibling entries. Profile aggregation is the caller's job, which
/// keeps this reusable for non-profile batch work.
pub async fn recalculate<S: BeatmapSource>(source: Arc<S>, entries: Vec<BatchEntry>, ctx: &BatchContext) -> BatchOutcome {
    let n_entries = entries.len();
    let entry_ids: Vec<i32> = entries.iter().map(|e| e.beatmap_id).collect();

    let semaphore = Arc::new(Semaphore::new(ctx.concurrency));
    let mut tasks: JoinSet<(usize, Result<BatchRecord, EntryError>)> = JoinSet::new();
    let bar = progress_bar(n_entries as u64, "Recalculating scores".to_string());

    for (index, entry) in entries.into_iter().enumerate() {
        let source = Arc::clone(&source);
        let semaphore = Arc::clone(&semaphore);
        let ctx = ctx.clone();

        tasks.spawn(async move {
            let outcome = run_entry(source, semaphore, entry, &ctx).await;

            (index, outcome)
        });
    }

    // Wait-all barrier: every entry resolves before anything is merged
    let mut slots: Vec<Option<Result<BatchRecord, EntryError>>> = (0..n_entries).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => {
                slots[index] = Some(outcome);
            }
            Err(join_error) => {
                // Calculators are pure so this never fires in practice, but
                // a panicked task must not take the batch down with it
                warn!("batch worker task failed to join: {join_error}");
            }
        }

        bar.inc(1);
    }
    bar.finish_and_clear();

    // Single-threaded merge in submission order keeps the mapping (and
    // everything derived from it) deterministic
    let mut outcome = BatchOutcome::default();
    for (index, slot) in slots.into_iter().enumerate() {
        let beatmap_id = entry_ids[index];

        match slot {
            Some(Ok(record)) => {
                outcome.results.insert(beatmap_id, record);
            }
            Some(Err(error)) => {
                outcome.failures.push(BatchFailure { beatmap_id, error });
            }
            None => {
                outcome.failures.push(BatchFailure {
                    beatmap_id,
                    error: EntryError::Calculator("worker task aborted".to_string())
                });
            }
        }
    }

    outcome
}

async fn run_entry<S: BeatmapSource>(
    source: Arc<S>,
    semaphore: Arc<Semaphore>,
    entry: BatchEntry,
    ctx: &BatchContext
) -> Result<BatchRecord, EntryError> {
    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|_| EntryError::Cancelled)?;

    if ctx.cancelled() {
        return Err(EntryError::Cancelled);
    }

    if entry.beatmap_id < 1 {
        return Err(EntryError::Input(format!(
            "beatmap id must be positive, got {}",
            entry.beatmap_id
        )));
    }

    // The only suspension point: waiting on the download/cache + parser
    // collaborator, capped so one stalled download cannot stall the batch
    let beatmap = timeout(ctx.entry_timeout, source.load(entry.beatmap_id))
        .await
        .map_err(|_| EntryError::Timeout(ctx.entry_timeout))??;

    // CPU-bound and side-effect-free from here on
    let result = ctx.calculator.calculate(&beatmap, &entry.score)?;

    debug!(
        beatmap_id = entry.beatmap_id,
        before = entry.score.pp,
        after = result.pp,
        "recalculated score"
    );

    let previous_pp = entry.score.pp;
    let mut score = entry.score;
    score.pp = result.pp;

    Ok(BatchRecord {
        score,
        previous_pp,
        display_name: beatmap.display_name.clone(),
        result
    })
}
