use std::{
    collections::HashMap,
    future::Future,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc
    },
    time::Duration
};

use pp_processor::{
    beatmap::BeatmapModel,
    error::EntryError,
    model::{
        batch::{self, BatchContext, BatchEntry, BeatmapSource},
        calculator::{self, CalculatorKind},
        profile
    },
    utils::test_utils::{generate_beatmap, generate_score}
};

/// In-memory collaborator standing in for the download/cache + parser pair.
struct StubSource {
    maps: HashMap<i32, BeatmapModel>,
    calls: AtomicUsize,
    delay: Option<Duration>
}

impl StubSource {
    fn new(maps: HashMap<i32, BeatmapModel>) -> StubSource {
        StubSource {
            maps,
            calls: AtomicUsize::new(0),
            delay: None
        }
    }

    fn with_delay(maps: HashMap<i32, BeatmapModel>, delay: Duration) -> StubSource {
        StubSource {
            maps,
            calls: AtomicUsize::new(0),
            delay: Some(delay)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl BeatmapSource for StubSource {
    fn load(&self, beatmap_id: i32) -> impl Future<Output = Result<BeatmapModel, EntryError>> + Send {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);

            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }

            self.maps
                .get(&beatmap_id)
                .cloned()
                .ok_or_else(|| EntryError::Input(format!("unknown beatmap {beatmap_id}")))
        }
    }
}

fn fixture(n_maps: i32, n_objects: usize) -> (HashMap<i32, BeatmapModel>, Vec<BatchEntry>) {
    let mut maps = HashMap::new();
    let mut entries = Vec::new();

    for beatmap_id in 1..=n_maps {
        maps.insert(beatmap_id, generate_beatmap(beatmap_id, n_objects, 5.0 + beatmap_id as f64 * 0.2));
        entries.push(BatchEntry {
            beatmap_id,
            score: generate_score(beatmap_id, n_objects as u32)
        });
    }

    (maps, entries)
}

fn context(concurrency: usize) -> BatchContext {
    let (ctx, _) = BatchContext::new(CalculatorKind::XexxarV1, Some(concurrency), Duration::from_secs(5)).unwrap();

    ctx
}

#[tokio::test]
async fn test_all_entries_resolve() {
    let (maps, entries) = fixture(10, 150);
    let source = Arc::new(StubSource::new(maps));

    let outcome = batch::recalculate(Arc::clone(&source), entries, &context(4)).await;

    assert_eq!(outcome.results.len(), 10);
    assert!(outcome.failures.is_empty());
    assert_eq!(source.calls(), 10);

    for record in outcome.results.values() {
        assert!(record.score.pp > 0.0);
        assert_eq!(record.score.pp, record.result.pp);
    }
}

#[tokio::test]
async fn test_single_invalid_entry_does_not_abort_siblings() {
    let (maps, mut entries) = fixture(5, 100);
    entries[2].beatmap_id = -4;

    let source = Arc::new(StubSource::new(maps));
    let outcome = batch::recalculate(source, entries, &context(4)).await;

    assert_eq!(outcome.results.len(), 4);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].beatmap_id, -4);
    assert!(matches!(outcome.failures[0].error, EntryError::Input(_)));
}

#[tokio::test]
async fn test_unknown_beatmap_recorded_as_failure() {
    let (maps, mut entries) = fixture(3, 100);
    entries.push(BatchEntry {
        beatmap_id: 999,
        score: generate_score(999, 100)
    });

    let source = Arc::new(StubSource::new(maps));
    let outcome = batch::recalculate(source, entries, &context(2)).await;

    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].beatmap_id, 999);
}

#[tokio::test]
async fn test_repeated_runs_are_bit_identical() {
    let (maps, entries) = fixture(20, 200);
    let source = Arc::new(StubSource::new(maps));

    let first = batch::recalculate(Arc::clone(&source), entries.clone(), &context(8)).await;
    let second = batch::recalculate(Arc::clone(&source), entries, &context(8)).await;

    let first_pp = profile::profile_pp(&first.results);
    let second_pp = profile::profile_pp(&second.results);

    assert_eq!(first_pp.to_bits(), second_pp.to_bits());

    // The merged mapping itself is in submission order both times
    let first_keys: Vec<i32> = first.results.keys().copied().collect();
    let second_keys: Vec<i32> = second.results.keys().copied().collect();
    assert_eq!(first_keys, second_keys);
}

#[tokio::test]
async fn test_single_worker_still_completes() {
    let (maps, entries) = fixture(6, 80);
    let source = Arc::new(StubSource::new(maps));

    let outcome = batch::recalculate(source, entries, &context(1)).await;

    assert_eq!(outcome.results.len(), 6);
}

#[tokio::test]
async fn test_unknown_calculator_fails_before_any_collaborator_call() {
    let (maps, _) = fixture(3, 100);
    let source = Arc::new(StubSource::new(maps));

    let resolved = calculator::resolve("does_not_exist");

    assert!(resolved.is_err());
    // Resolution failed at configuration time; the collaborator was never hit
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn test_zero_concurrency_is_config_error() {
    let result = BatchContext::new(CalculatorKind::XexxarV1, Some(0), Duration::from_secs(5));

    assert!(result.is_err());
}

#[tokio::test]
async fn test_stalled_entry_times_out_without_stalling_batch() {
    let (maps, entries) = fixture(3, 50);
    let source = Arc::new(StubSource::with_delay(maps, Duration::from_millis(250)));

    let (ctx, _) = BatchContext::new(CalculatorKind::XexxarV1, Some(2), Duration::from_millis(30)).unwrap();
    let outcome = batch::recalculate(source, entries, &ctx).await;

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.failures.len(), 3);
    assert!(outcome
        .failures
        .iter()
        .all(|f| matches!(f.error, EntryError::Timeout(_))));
}

#[tokio::test]
async fn test_cancelled_batch_reports_untouched_entries() {
    let (maps, entries) = fixture(4, 50);
    let source = Arc::new(StubSource::new(maps));

    let (ctx, cancel) = BatchContext::new(CalculatorKind::XexxarV1, Some(2), Duration::from_secs(5)).unwrap();
    cancel.cancel();

    let outcome = batch::recalculate(Arc::clone(&source), entries, &ctx).await;

    assert!(outcome.results.is_empty());
    assert_eq!(outcome.failures.len(), 4);
    assert!(outcome
        .failures
        .iter()
        .all(|f| matches!(f.error, EntryError::Cancelled)));
    assert_eq!(source.calls(), 0);
}
