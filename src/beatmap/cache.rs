use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc
};

use reqwest::Client;
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::error::CacheError;

pub const BEATMAP_DOWNLOAD_URL: &str = "https://osu.ppy.sh/osu";

/// On-disk cache of downloaded `.osu` files, one file per beatmap id.
///
/// Safe under concurrent calls: distinct ids never touch the same file, and
/// same-id races are serialized through a per-id lock so a beatmap is
/// downloaded at most once per process. Files are written to a temp path and
/// renamed into place, so a cached file is never observed half-written.
pub struct BeatmapCache {
    root: PathBuf,
    base_url: String,
    client: Client,
    in_flight: Mutex<HashMap<i32, Arc<Mutex<()>>>>
}

impl BeatmapCache {
    pub fn new(root: impl Into<PathBuf>) -> BeatmapCache {
        BeatmapCache::with_base_url(root, BEATMAP_DOWNLOAD_URL)
    }

    pub fn with_base_url(root: impl Into<PathBuf>, base_url: impl Into<String>) -> BeatmapCache {
        BeatmapCache {
            root: root.into(),
            base_url: base_url.into(),
            client: Client::new(),
            in_flight: Mutex::new(HashMap::new())
        }
    }

    /// Returns the local path of the given beatmap, downloading it first if
    /// it is not cached yet. Repeated calls for the same id are idempotent.
    pub async fn ensure_local(&self, beatmap_id: i32) -> Result<PathBuf, CacheError> {
        let path = self.root.join(format!("{beatmap_id}.osu"));

        let lock = self.id_lock(beatmap_id).await;
        let _guard = lock.lock().await;

        if fs::try_exists(&path).await? {
            debug!(beatmap_id, "beatmap already cached");
            return Ok(path);
        }

        self.download(beatmap_id, &path).await?;

        Ok(path)
    }

    async fn id_lock(&self, beatmap_id: i32) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().await;

        Arc::clone(in_flight.entry(beatmap_id).or_default())
    }

    async fn download(&self, beatmap_id: i32, path: &Path) -> Result<(), CacheError> {
        fs::create_dir_all(&self.root).await?;

        let url = format!("{}/{beatmap_id}", self.base_url);
        debug!(beatmap_id, url, "downloading beatmap");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(CacheError::Status {
                beatmap_id,
                status: response.status()
            });
        }

        let bytes = response.bytes().await?;

        // Write-then-rename keeps concurrent readers off partial files
        let temp_path = self.root.join(format!("{beatmap_id}.osu.part"));
        fs::write(&temp_path, &bytes).await?;
        fs::rename(&temp_path, path).await?;

        Ok(())
    }
}
