use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use crate::item::{decode_items, encode_items, DecodeError, MediaItem};

pub const DEFAULT_STORAGE_KEY: &str = "images";

/// String-keyed persistent storage, e.g. `window.localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Unavailable,
    WriteFailed(String),
    Encode(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => f.write_str("storage unavailable"),
            StorageError::WriteFailed(reason) => write!(f, "storage write failed: {reason}"),
            StorageError::Encode(reason) => write!(f, "encode failed: {reason}"),
        }
    }
}

impl std::error::Error for StorageError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} items")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Why a load came back empty or partial.
#[derive(Debug)]
pub enum LoadIssue {
    Missing,
    Storage(StorageError),
    Malformed(DecodeError),
    Skipped(usize),
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub items: Vec<MediaItem>,
    pub issue: Option<LoadIssue>,
}

/// Ordered media sequence. Insertion order is load-bearing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<MediaItem>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<MediaItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn append(&mut self, item: MediaItem) {
        self.items.push(item);
    }

    pub fn delete_at(&mut self, index: usize) -> Result<MediaItem, StoreError> {
        if index >= self.items.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Reads the sequence stored under `key`. Never fails: anything unusable
/// yields an empty sequence with the reason attached.
pub fn load<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> LoadReport {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            return LoadReport {
                items: Vec::new(),
                issue: Some(LoadIssue::Missing),
            }
        }
        Err(err) => {
            return LoadReport {
                items: Vec::new(),
                issue: Some(LoadIssue::Storage(err)),
            }
        }
    };
    match decode_items(&raw) {
        Ok(decoded) => LoadReport {
            issue: (decoded.skipped > 0).then_some(LoadIssue::Skipped(decoded.skipped)),
            items: decoded.items,
        },
        Err(err) => LoadReport {
            items: Vec::new(),
            issue: Some(LoadIssue::Malformed(err)),
        },
    }
}

pub fn save<S: KeyValueStore + ?Sized>(
    storage: &S,
    key: &str,
    items: &[MediaItem],
) -> Result<(), StorageError> {
    let raw = encode_items(items).map_err(|err| StorageError::Encode(err.to_string()))?;
    storage.set(key, &raw)
}

pub fn remove<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> Result<(), StorageError> {
    storage.remove(key)
}

/// In-memory storage for tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails, like a browser storage over quota.
    pub fn read_only() -> Self {
        Self {
            entries: RefCell::new(HashMap::new()),
            read_only: true,
        }
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteFailed("quota exceeded".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::WriteFailed("read only".to_string()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(len: usize) -> ItemStore {
        ItemStore::from_items(
            (0..len)
                .map(|i| MediaItem::link(format!("https://example.com/{i}")))
                .collect(),
        )
    }

    #[test]
    fn append_grows_by_one_and_keeps_order() {
        let mut store = sample(3);
        let before = store.items().to_vec();
        store.append(MediaItem::image("https://example.com/new.png"));
        assert_eq!(store.len(), 4);
        assert_eq!(&store.items()[..3], &before[..]);
        assert_eq!(store.get(3), Some(&MediaItem::image("https://example.com/new.png")));
    }

    #[test]
    fn delete_at_shifts_later_items() {
        for index in 0..5 {
            let mut store = sample(5);
            let original = store.items().to_vec();
            let removed = store.delete_at(index).expect("in range");
            assert_eq!(removed, original[index]);
            assert_eq!(store.len(), 4);
            assert_eq!(&store.items()[..index], &original[..index]);
            assert_eq!(&store.items()[index..], &original[index + 1..]);
        }
    }

    #[test]
    fn delete_out_of_range_is_rejected_without_change() {
        let mut store = sample(2);
        let err = store.delete_at(2).expect_err("out of range");
        assert_eq!(err, StoreError::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(store, sample(2));
        assert!(ItemStore::new().delete_at(0).is_err());
    }

    #[test]
    fn load_missing_key_is_empty() {
        let report = load(&MemoryStore::new(), DEFAULT_STORAGE_KEY);
        assert!(report.items.is_empty());
        assert!(matches!(report.issue, Some(LoadIssue::Missing)));
    }

    #[test]
    fn load_corrupt_payload_is_empty() {
        for raw in ["", "[", "\"text\"", "{\"images\":[]}", "17"] {
            let storage = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, raw);
            let report = load(&storage, DEFAULT_STORAGE_KEY);
            assert!(report.items.is_empty(), "payload {raw:?}");
            assert!(matches!(report.issue, Some(LoadIssue::Malformed(_))), "payload {raw:?}");
        }
    }

    #[test]
    fn failed_write_reports_error() {
        let storage = MemoryStore::read_only();
        let err = save(&storage, DEFAULT_STORAGE_KEY, &[MediaItem::link("x")]).expect_err("fails");
        assert!(matches!(err, StorageError::WriteFailed(_)));
        assert_eq!(storage.raw(DEFAULT_STORAGE_KEY), None);
    }
}
