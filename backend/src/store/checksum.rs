//! Checksum calculation for published datasets.

use sha2::{Digest, Sha256};

use crate::models::{FieldDataset, IndexKind};

/// Calculate the SHA-256 checksum of a dataset.
///
/// The digest covers the shape followed by every index layer in
/// [`IndexKind::ALL`] order, each prefixed with its length so that an empty
/// layer and a missing one cannot collide with a shifted neighbour.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn dataset_checksum(dataset: &FieldDataset) -> String {
    let shape = dataset.shape();
    let mut hasher = Sha256::new();
    for dim in [shape.width, shape.height, shape.bands] {
        hasher.update((dim as u64).to_le_bytes());
    }

    for kind in IndexKind::ALL {
        let values = dataset.values(kind);
        hasher.update((values.len() as u64).to_le_bytes());
        for v in values {
            hasher.update(v.to_le_bytes());
        }
    }

    hex::encode(hasher.finalize())
}
