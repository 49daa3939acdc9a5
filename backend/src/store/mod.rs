//! Current dataset snapshot, swapped atomically on every refresh.
//!
//! The refresh task is the only writer; handlers clone the `Arc` and keep
//! reading a consistent snapshot even while a newer one is installed.

pub mod checksum;
pub mod snapshot;

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

pub use checksum::{calculate_checksum, checksum_files};
pub use snapshot::{
    CaseData, CaseSeries, CaseTables, DatasetSnapshot, RawDataset, SnapshotOptions,
};

/// Holder of the installed snapshot.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<DatasetSnapshot>>,
}

impl SnapshotStore {
    /// Create a store serving `initial` as version 1.
    pub fn new(mut initial: DatasetSnapshot) -> Self {
        initial.version = 1;
        initial.refreshed_at = Utc::now();
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// The snapshot installed right now.
    pub fn current(&self) -> Arc<DatasetSnapshot> {
        self.current.read().clone()
    }

    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Stamp `snapshot` with the next version and make it current.
    pub fn install(&self, mut snapshot: DatasetSnapshot) -> u64 {
        let mut current = self.current.write();
        let version = current.version + 1;
        snapshot.version = version;
        snapshot.refreshed_at = Utc::now();
        *current = Arc::new(snapshot);
        info!(version, "Installed dataset snapshot");
        version
    }
}
