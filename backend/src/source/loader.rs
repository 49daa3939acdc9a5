//! Startup download, periodic refresh, and snapshot installation.
//!
//! Every download lands in a `.part` file first and is renamed into place
//! only once complete. On refresh the snapshot is built from the three
//! `.part` series, and they are renamed only after that build succeeds, so a
//! download that fails to parse never replaces the last good file.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, error, info, warn};

use crate::config::SourceSettings;
use crate::store::{checksum_files, DatasetSnapshot, SnapshotOptions, SnapshotStore};

use super::error::{ErrorContext, SourceError, SourceResult};
use super::fetcher::Fetcher;
use super::{DataPaths, SourceFile};

/// Result of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new snapshot was built and installed with this version.
    Installed(u64),
    /// The downloaded series matched the installed checksum.
    Unchanged,
}

/// Drives downloads into the data directory and builds snapshots from it.
pub struct DatasetLoader {
    fetcher: Arc<dyn Fetcher>,
    paths: DataPaths,
    settings: SourceSettings,
    options: SnapshotOptions,
}

impl DatasetLoader {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        settings: SourceSettings,
        options: SnapshotOptions,
    ) -> Self {
        Self {
            fetcher,
            paths: DataPaths::new(settings.data_dir.clone()),
            settings,
            options,
        }
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    /// Fetch with up to `max_retries` retries for retryable failures,
    /// doubling the delay after each attempt.
    async fn fetch_with_retry(&self, file: SourceFile) -> SourceResult<Vec<u8>> {
        let url = file.url(&self.settings);
        let max_retries = self.settings.max_retries;
        let mut retry_delay = self.settings.retry_delay();

        for attempt in 0..=max_retries {
            if attempt > 0 {
                tokio::time::sleep(retry_delay).await;
                retry_delay *= 2;
            }

            match self.fetcher.fetch(url).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if e.is_retryable() && attempt < max_retries => {
                    warn!(
                        file = file.file_name(),
                        attempt = attempt + 1,
                        error = %e,
                        "Fetch failed, retrying"
                    );
                }
                Err(e) => return Err(e.with_resource(url.to_string())),
            }
        }

        Err(SourceError::internal(format!(
            "max retries exceeded for {}",
            file.file_name()
        )))
    }

    /// Download `file` into its `.part` path.
    async fn download_part(&self, file: SourceFile) -> SourceResult<PathBuf> {
        let bytes = self.fetch_with_retry(file).await?;
        let part = self.paths.part_path(file);
        tokio::fs::write(&part, &bytes).await.map_err(|e| {
            SourceError::io(
                e,
                ErrorContext::new("write_part").with_resource(part.display().to_string()),
            )
        })?;
        debug!(file = file.file_name(), bytes = bytes.len(), "Downloaded");
        Ok(part)
    }

    async fn commit(&self, file: SourceFile) -> SourceResult<()> {
        let part = self.paths.part_path(file);
        let target = self.paths.path(file);
        tokio::fs::rename(&part, &target).await.map_err(|e| {
            SourceError::io(
                e,
                ErrorContext::new("rename_part").with_resource(target.display().to_string()),
            )
        })
    }

    async fn discard_parts(&self, files: &[SourceFile]) {
        for file in files {
            let part = self.paths.part_path(*file);
            if let Err(e) = tokio::fs::remove_file(&part).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %part.display(), error = %e, "Could not remove partial download");
                }
            }
        }
    }

    /// Download every file that is not in the data directory yet.
    pub async fn ensure_present(&self) -> SourceResult<()> {
        tokio::fs::create_dir_all(self.paths.dir()).await.map_err(|e| {
            SourceError::io(
                e,
                ErrorContext::new("create_data_dir")
                    .with_resource(self.paths.dir().display().to_string()),
            )
        })?;

        for file in SourceFile::ALL {
            if tokio::fs::try_exists(self.paths.path(file)).await.unwrap_or(false) {
                continue;
            }
            info!(file = file.file_name(), "Fetching missing source file");
            if let Err(e) = self.download_part(file).await {
                self.discard_parts(&[file]).await;
                return Err(e);
            }
            self.commit(file).await?;
        }
        Ok(())
    }

    /// Download the three series into their `.part` paths. On failure no
    /// part is left behind.
    async fn download_series(&self) -> SourceResult<()> {
        for file in SourceFile::SERIES {
            if let Err(e) = self.download_part(file).await {
                self.discard_parts(&SourceFile::SERIES).await;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Rename the three series parts into place. A failed rename leaves the
    /// earlier files replaced and removes the remaining parts.
    async fn commit_series(&self) -> SourceResult<()> {
        for (i, file) in SourceFile::SERIES.into_iter().enumerate() {
            if let Err(e) = self.commit(file).await {
                self.discard_parts(&SourceFile::SERIES[i..]).await;
                return Err(e);
            }
        }
        Ok(())
    }

    async fn series_checksum(&self, series: [PathBuf; 3]) -> SourceResult<String> {
        task::spawn_blocking(move || checksum_files(&series))
            .await
            .map_err(|e| SourceError::internal(format!("checksum task failed: {}", e)))?
    }

    async fn build_snapshot(
        &self,
        series: [PathBuf; 3],
        checksum: String,
    ) -> SourceResult<DatasetSnapshot> {
        let paths = self.paths.clone();
        let options = self.options.clone();
        task::spawn_blocking(move || {
            DatasetSnapshot::load_with_series(&paths, &series, checksum, &options)
        })
        .await
        .map_err(|e| SourceError::internal(format!("snapshot task failed: {}", e)))?
    }

    /// Make sure the files exist and build the first snapshot.
    pub async fn load_initial(&self) -> SourceResult<DatasetSnapshot> {
        self.ensure_present().await?;
        let checksum = self.series_checksum(self.paths.series_paths()).await?;
        self.build_snapshot(self.paths.series_paths(), checksum).await
    }

    /// One refresh cycle. On error nothing is installed and the store keeps
    /// serving what it had. Files on disk change only once a snapshot has
    /// been built from the downloads.
    pub async fn refresh_once(&self, store: &SnapshotStore) -> SourceResult<RefreshOutcome> {
        self.download_series().await?;

        let parts = self.paths.series_part_paths();
        let checksum = match self.series_checksum(parts.clone()).await {
            Ok(checksum) => checksum,
            Err(e) => {
                self.discard_parts(&SourceFile::SERIES).await;
                return Err(e);
            }
        };
        if checksum == store.current().checksum {
            self.discard_parts(&SourceFile::SERIES).await;
            info!("Source files unchanged, keeping current snapshot");
            return Ok(RefreshOutcome::Unchanged);
        }

        let snapshot = match self.build_snapshot(parts, checksum).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.discard_parts(&SourceFile::SERIES).await;
                return Err(e);
            }
        };
        self.commit_series().await?;
        Ok(RefreshOutcome::Installed(store.install(snapshot)))
    }
}

/// Refresh forever on the configured period. Failures are logged and the
/// previous snapshot stays installed.
pub async fn run_refresh_loop(loader: Arc<DatasetLoader>, store: Arc<SnapshotStore>) {
    let period = loader.settings.refresh_period();
    info!(period_secs = period.as_secs(), "Starting refresh loop");
    loop {
        tokio::time::sleep(period).await;
        info!("Refreshing source data");
        match loader.refresh_once(&store).await {
            Ok(RefreshOutcome::Installed(version)) => {
                info!(version, "Refresh complete");
            }
            Ok(RefreshOutcome::Unchanged) => {}
            Err(e) if e.is_schema_drift() => {
                error!(
                    error = %e,
                    version = store.version(),
                    "Upstream schema changed, keeping last good snapshot"
                );
            }
            Err(e) => {
                error!(
                    error = %e,
                    version = store.version(),
                    "Refresh failed, keeping last good snapshot"
                );
            }
        }
    }
}
