//! Storage statistics, derived on demand from encoded entry sizes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStats {
    #[serde(rename = "totalCarros")]
    pub entry_count: usize,
    #[serde(rename = "tamanhoTotalBytes")]
    pub total_bytes: u64,
    /// Floor of `total_bytes / entry_count`, zero for an empty store
    #[serde(rename = "tamanhoMedioBytes")]
    pub mean_bytes: u64,
}

impl StorageStats {
    /// Build statistics from the encoded length of every entry.
    pub fn from_sizes<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let (entry_count, total_bytes) = sizes
            .into_iter()
            .fold((0usize, 0u64), |(count, total), size| {
                (count + 1, total + size as u64)
            });

        let mean_bytes = if entry_count > 0 {
            total_bytes / entry_count as u64
        } else {
            0
        };

        Self {
            entry_count,
            total_bytes,
            mean_bytes,
        }
    }
}
