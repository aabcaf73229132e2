//! Dataset Store: holds the single active field snapshot.
//!
//! A snapshot is built completely by [`crate::services::pipeline`] and only
//! then handed to [`DatasetStore::publish`], which swaps it in as one unit.
//! Readers clone the `Arc` and keep a consistent view even while a newer
//! generation is being published.

pub mod checksum;
pub mod error;

pub use checksum::dataset_checksum;
pub use error::{StoreError, StoreResult};

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::services::pipeline::FieldSnapshot;

/// In-memory holder of the active snapshot.
#[derive(Debug, Default)]
pub struct DatasetStore {
    current: RwLock<Option<Arc<FieldSnapshot>>>,
    generation: AtomicU64,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active snapshot, stamping it with the next generation.
    pub fn publish(&self, mut snapshot: FieldSnapshot) -> Arc<FieldSnapshot> {
        let mut slot = self.current.write();
        snapshot.generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(snapshot);
        *slot = Some(Arc::clone(&snapshot));

        log::info!(
            "Published dataset generation {} ({}, {} pixels, checksum {})",
            snapshot.generation,
            snapshot.source,
            snapshot.dataset.total_pixels(),
            &snapshot.checksum[..12.min(snapshot.checksum.len())]
        );
        snapshot
    }

    /// The active snapshot, or [`StoreError::NotPublished`] before the first publish.
    pub fn current(&self) -> StoreResult<Arc<FieldSnapshot>> {
        self.current.read().clone().ok_or(StoreError::NotPublished)
    }

    /// Generation of the most recent publish; `0` when nothing is published.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
