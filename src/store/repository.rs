//! Repository seam and the binary-encoded in-memory store

use std::collections::BTreeMap;
use std::sync::RwLock;

use tracing::{debug, error};

use super::errors::{StoreError, StoreResult};
use super::stats::StorageStats;
use crate::codec;
use crate::model::{Carro, CarroId, NewCarro};

/// Operations the HTTP layer needs from vehicle storage.
pub trait CarroRepository: Send + Sync {
    /// Assign the next identifier and store the record.
    fn insert(&self, carro: NewCarro) -> StoreResult<Carro>;

    /// Look up a record. `Ok(None)` when the id was never issued.
    fn get(&self, id: CarroId) -> StoreResult<Option<Carro>>;

    /// Snapshot of every record, ascending by id.
    fn list(&self) -> StoreResult<Vec<Carro>>;

    /// Entry count and encoded byte totals over the current entries.
    fn stats(&self) -> StoreResult<StorageStats>;
}

/// Entry map and id counter, guarded together by one lock.
#[derive(Debug)]
struct Entries {
    encoded: BTreeMap<CarroId, Vec<u8>>,
    /// Wider than `CarroId` so the counter can move past the last id
    next_id: u64,
}

/// In-memory store keeping only encoded bytes resident.
///
/// Records are encoded on insert and decoded on every read. Readers share
/// the lock; an insert holds it exclusively, so no reader can observe an id
/// that has been issued but not yet stored.
#[derive(Debug)]
pub struct BinaryCarroStore {
    inner: RwLock<Entries>,
}

impl BinaryCarroStore {
    /// Create an empty store. The first id issued is 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Entries {
                encoded: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn decode_entry(id: CarroId, bytes: &[u8]) -> StoreResult<Carro> {
        codec::decode(bytes).map_err(|source| {
            let err = StoreError::Corrupted { id, source };
            error!(code = err.code(), severity = %err.severity(), error = %err, "stored entry failed to decode");
            err
        })
    }
}

impl Default for BinaryCarroStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CarroRepository for BinaryCarroStore {
    fn insert(&self, carro: NewCarro) -> StoreResult<Carro> {
        let mut inner = self.inner.write().map_err(|_| StoreError::LockPoisoned)?;

        let id = CarroId::try_from(inner.next_id).map_err(|_| StoreError::IdsExhausted)?;
        inner.next_id += 1;

        let carro = carro.into_carro(id);
        let bytes = codec::encode(&carro);
        debug!(id, encoded_bytes = bytes.len(), "carro stored");
        inner.encoded.insert(id, bytes);

        Ok(carro)
    }

    fn get(&self, id: CarroId) -> StoreResult<Option<Carro>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;

        match inner.encoded.get(&id) {
            Some(bytes) => Self::decode_entry(id, bytes).map(Some),
            None => Ok(None),
        }
    }

    fn list(&self) -> StoreResult<Vec<Carro>> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;

        // Collected while the guard is alive; callers never hold the lock.
        inner
            .encoded
            .iter()
            .map(|(id, bytes)| Self::decode_entry(*id, bytes))
            .collect()
    }

    fn stats(&self) -> StoreResult<StorageStats> {
        let inner = self.inner.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(StorageStats::from_sizes(inner.encoded.values().map(Vec::len)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::DecodeError;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;
    use std::sync::Arc;
    use std::thread;

    fn gol(year: i32) -> NewCarro {
        NewCarro::new(
            "VW",
            "Gol",
            year,
            None,
            BigDecimal::from_str("31500.00").unwrap(),
        )
    }

    fn corrupt(store: &BinaryCarroStore, id: CarroId) {
        let mut inner = store.inner.write().unwrap();
        let bytes = inner.encoded.get_mut(&id).unwrap();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
    }

    #[test]
    fn test_ids_start_at_one() {
        let store = BinaryCarroStore::new();
        assert_eq!(store.insert(gol(2001)).unwrap().id, 1);
        assert_eq!(store.insert(gol(2002)).unwrap().id, 2);
    }

    #[test]
    fn test_get_returns_inserted_record() {
        let store = BinaryCarroStore::new();
        let inserted = store.insert(gol(2001)).unwrap();
        assert_eq!(store.get(inserted.id).unwrap(), Some(inserted));
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let store = BinaryCarroStore::new();
        store.insert(gol(2001)).unwrap();
        assert_eq!(store.get(999).unwrap(), None);
        assert_eq!(store.get(0).unwrap(), None);
    }

    #[test]
    fn test_only_bytes_are_resident() {
        let store = BinaryCarroStore::new();
        let inserted = store.insert(gol(2001)).unwrap();

        let inner = store.inner.read().unwrap();
        let bytes = inner.encoded.get(&inserted.id).unwrap();
        assert_eq!(bytes, &codec::encode(&inserted));
    }

    #[test]
    fn test_list_is_ordered_by_id() {
        let store = BinaryCarroStore::new();
        for year in 2000..2010 {
            store.insert(gol(year)).unwrap();
        }

        let ids: Vec<CarroId> = store.list().unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_stats_match_encoded_sizes() {
        let store = BinaryCarroStore::new();
        assert_eq!(store.stats().unwrap(), StorageStats::default());

        let a = store.insert(gol(2001)).unwrap();
        let b = store.insert(NewCarro::new(
            "Chevrolet",
            "Opala Diplomata",
            1988,
            Some("preto".to_string()),
            BigDecimal::from_str("45000").unwrap(),
        ))
        .unwrap();

        let sizes = [codec::encode(&a).len(), codec::encode(&b).len()];
        let total: usize = sizes.iter().sum();

        let stats = store.stats().unwrap();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.total_bytes, total as u64);
        assert_eq!(stats.mean_bytes, (total / 2) as u64);
    }

    #[test]
    fn test_corrupted_entry_surfaces_on_get() {
        let store = BinaryCarroStore::new();
        store.insert(gol(2001)).unwrap();
        corrupt(&store, 1);

        let err = store.get(1).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Corrupted {
                id: 1,
                source: DecodeError::ChecksumMismatch { .. }
            }
        ));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_corrupted_entry_fails_whole_list() {
        let store = BinaryCarroStore::new();
        store.insert(gol(2001)).unwrap();
        store.insert(gol(2002)).unwrap();
        corrupt(&store, 2);

        assert!(matches!(
            store.list().unwrap_err(),
            StoreError::Corrupted { id: 2, .. }
        ));
    }

    #[test]
    fn test_lock_released_after_decode_failure() {
        let store = BinaryCarroStore::new();
        store.insert(gol(2001)).unwrap();
        corrupt(&store, 1);

        assert!(store.get(1).is_err());
        assert!(store.list().is_err());
        // A leaked read guard would make this insert block forever.
        assert_eq!(store.insert(gol(2002)).unwrap().id, 2);
    }

    #[test]
    fn test_exhausted_ids_are_not_reused() {
        let store = BinaryCarroStore::new();
        store.inner.write().unwrap().next_id = u64::from(CarroId::MAX);

        assert_eq!(store.insert(gol(2001)).unwrap().id, CarroId::MAX);
        assert!(matches!(
            store.insert(gol(2002)).unwrap_err(),
            StoreError::IdsExhausted
        ));
        assert_eq!(store.stats().unwrap().entry_count, 1);
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = Arc::new(BinaryCarroStore::new());
        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the store lock");
        })
        .join();

        assert!(matches!(
            store.get(1).unwrap_err(),
            StoreError::LockPoisoned
        ));
        assert!(matches!(
            store.insert(gol(2001)).unwrap_err(),
            StoreError::LockPoisoned
        ));
    }

    #[test]
    fn test_readers_share_the_lock() {
        let store = BinaryCarroStore::new();
        store.insert(gol(2001)).unwrap();

        let _held = store.inner.read().unwrap();
        // Would deadlock if readers were exclusive.
        thread::scope(|s| {
            let reader = s.spawn(|| (store.get(1).unwrap(), store.stats().unwrap()));
            let (found, stats) = reader.join().unwrap();
            assert!(found.is_some());
            assert_eq!(stats.entry_count, 1);
        });
    }
}
