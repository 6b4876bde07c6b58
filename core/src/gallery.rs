use crate::item::MediaItem;
use crate::navigator::{PreviewKey, PreviewNavigator};
use crate::store::{self, ItemStore, KeyValueStore, LoadIssue, StorageError, StoreError};

/// Result of writing the sequence back after a mutation. Writes are best
/// effort: the in-memory change stands either way.
pub type Persisted = Result<(), StorageError>;

#[derive(Debug, PartialEq, Eq)]
pub enum ClearOutcome {
    Cancelled,
    Cleared(Persisted),
}

/// The gallery sequence, its preview state and the storage it mirrors to.
/// Every mutation rewrites the full sequence under the storage key.
pub struct Gallery<S> {
    storage: S,
    key: String,
    store: ItemStore,
    preview: PreviewNavigator,
}

impl<S: KeyValueStore> Gallery<S> {
    /// Loads the persisted sequence; unusable data starts the gallery empty.
    pub fn open(storage: S, key: impl Into<String>) -> (Self, Option<LoadIssue>) {
        let key = key.into();
        let report = store::load(&storage, &key);
        let gallery = Self {
            storage,
            key,
            store: ItemStore::from_items(report.items),
            preview: PreviewNavigator::new(),
        };
        (gallery, report.issue)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn items(&self) -> &[MediaItem] {
        self.store.items()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn append(&mut self, item: MediaItem) -> Persisted {
        self.store.append(item);
        self.persist()
    }

    pub fn delete_at(&mut self, index: usize) -> Result<Persisted, StoreError> {
        self.store.delete_at(index)?;
        self.preview.sync_len(self.store.len());
        Ok(self.persist())
    }

    /// Clears everything, including the persisted key, once `confirm` agrees.
    pub fn clear_all<F>(&mut self, confirm: F) -> ClearOutcome
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return ClearOutcome::Cancelled;
        }
        self.store.clear();
        self.preview.close();
        ClearOutcome::Cleared(store::remove(&self.storage, &self.key))
    }

    pub fn persist(&self) -> Persisted {
        store::save(&self.storage, &self.key, self.store.items())
    }

    pub fn preview(&self) -> PreviewNavigator {
        self.preview
    }

    pub fn preview_item(&self) -> Option<(usize, &MediaItem)> {
        let index = self.preview.current()?;
        self.store.get(index).map(|item| (index, item))
    }

    pub fn open_preview(&mut self, index: usize) -> bool {
        self.preview.open(index, self.store.len())
    }

    pub fn next_preview(&mut self) -> bool {
        self.preview.next(self.store.len())
    }

    pub fn previous_preview(&mut self) -> bool {
        self.preview.previous()
    }

    pub fn close_preview(&mut self) {
        self.preview.close();
    }

    pub fn handle_preview_key(&mut self, key: PreviewKey) -> bool {
        self.preview.handle_key(key, self.store.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, DEFAULT_STORAGE_KEY};

    fn gallery_with(len: usize) -> Gallery<MemoryStore> {
        let (mut gallery, _) = Gallery::open(MemoryStore::new(), DEFAULT_STORAGE_KEY);
        for i in 0..len {
            gallery
                .append(MediaItem::image(format!("https://example.com/{i}.png")))
                .expect("persist");
        }
        gallery
    }

    #[test]
    fn every_mutation_rewrites_storage() {
        let mut gallery = gallery_with(2);
        let saved = gallery.storage().raw(DEFAULT_STORAGE_KEY).expect("saved");
        assert!(saved.contains("1.png"));

        gallery.delete_at(0).expect("in range").expect("persist");
        let saved = gallery.storage().raw(DEFAULT_STORAGE_KEY).expect("saved");
        assert!(!saved.contains("0.png"));
        assert!(saved.contains("1.png"));
    }

    #[test]
    fn writes_go_to_the_configured_key() {
        let (mut gallery, _) = Gallery::open(MemoryStore::new(), "board.custom");
        assert_eq!(gallery.key(), "board.custom");
        gallery
            .append(MediaItem::link("https://example.com"))
            .expect("persist");
        assert!(gallery.storage().raw(gallery.key()).is_some());
        assert!(gallery.storage().raw(DEFAULT_STORAGE_KEY).is_none());
    }

    #[test]
    fn deleting_shown_item_at_end_closes_preview() {
        let mut gallery = gallery_with(3);
        assert!(gallery.open_preview(2));
        gallery.delete_at(2).expect("in range").expect("persist");
        assert_eq!(gallery.preview().current(), None);
        assert!(gallery.preview_item().is_none());
    }

    #[test]
    fn bad_delete_leaves_storage_alone() {
        let mut gallery = gallery_with(1);
        let before = gallery.storage().raw(DEFAULT_STORAGE_KEY);
        assert!(gallery.delete_at(5).is_err());
        assert_eq!(gallery.len(), 1);
        assert_eq!(gallery.storage().raw(DEFAULT_STORAGE_KEY), before);
    }

    #[test]
    fn failed_write_keeps_in_memory_change() {
        let (mut gallery, _) = Gallery::open(MemoryStore::read_only(), DEFAULT_STORAGE_KEY);
        let persisted = gallery.append(MediaItem::link("https://example.com"));
        assert!(persisted.is_err());
        assert_eq!(gallery.len(), 1);
    }
}
