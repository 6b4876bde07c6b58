use std::cell::RefCell;
use std::rc::Rc;

use linkboard_core::{
    ClearOutcome, Gallery, LoadIssue, MediaItem, Persisted, PreviewKey, PreviewNavigator,
};

use crate::app_config::AppConfig;
use crate::local_store::LocalStore;

pub(crate) type GallerySubscriber = Rc<dyn Fn()>;

/// Point-in-time copy of the gallery handed to the view.
#[derive(Clone, PartialEq)]
pub(crate) struct GallerySnapshot {
    pub(crate) items: Rc<Vec<MediaItem>>,
    pub(crate) preview: PreviewNavigator,
}

impl GallerySnapshot {
    pub(crate) fn preview_item(&self) -> Option<(usize, &MediaItem)> {
        let index = self.preview.current()?;
        self.items.get(index).map(|item| (index, item))
    }
}

/// Owned by the root component and shared with every surface that mutates
/// or displays the gallery. Mutations persist first, then notify.
pub(crate) struct GalleryHandle {
    gallery: RefCell<Gallery<LocalStore>>,
    snapshot: RefCell<GallerySnapshot>,
    subscribers: Rc<RefCell<Vec<GallerySubscriber>>>,
}

impl GalleryHandle {
    pub(crate) fn new(config: &AppConfig) -> Rc<Self> {
        let (gallery, issue) = Gallery::open(LocalStore::new(), config.storage_key.clone());
        log_load_issue(issue.as_ref());
        #[cfg(target_arch = "wasm32")]
        {
            gloo::console::log!("gallery: loaded", gallery.key(), gallery.len());
        }
        let snapshot = build_snapshot(&gallery);
        Rc::new(Self {
            gallery: RefCell::new(gallery),
            snapshot: RefCell::new(snapshot),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        })
    }

    pub(crate) fn subscribe(&self, subscriber: GallerySubscriber) -> GallerySubscription {
        self.subscribers.borrow_mut().push(subscriber.clone());
        GallerySubscription {
            subscriber,
            subscribers: Rc::clone(&self.subscribers),
        }
    }

    pub(crate) fn snapshot(&self) -> GallerySnapshot {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn append(&self, item: MediaItem) {
        let kind = item.kind();
        let persisted = self.gallery.borrow_mut().append(item);
        log_persisted("append", &kind.to_string(), &persisted);
        self.notify();
    }

    pub(crate) fn delete_at(&self, index: usize) {
        let result = self.gallery.borrow_mut().delete_at(index);
        match result {
            Ok(persisted) => {
                log_persisted("delete", &index.to_string(), &persisted);
                self.notify();
            }
            Err(_err) => {
                #[cfg(target_arch = "wasm32")]
                {
                    gloo::console::warn!("gallery: delete rejected", _err.to_string());
                }
            }
        }
    }

    pub(crate) fn clear_all<F>(&self, confirm: F)
    where
        F: FnOnce() -> bool,
    {
        let outcome = self.gallery.borrow_mut().clear_all(confirm);
        match outcome {
            ClearOutcome::Cancelled => {}
            ClearOutcome::Cleared(persisted) => {
                log_persisted("clear", "all", &persisted);
                self.notify();
            }
        }
    }

    /// Rewrites storage without mutating; used on page unload.
    pub(crate) fn persist(&self) {
        let persisted = self.gallery.borrow().persist();
        log_persisted("flush", "unload", &persisted);
    }

    pub(crate) fn open_preview(&self, index: usize) {
        let opened = self.gallery.borrow_mut().open_preview(index);
        if opened {
            self.notify();
        }
    }

    pub(crate) fn next_preview(&self) {
        if self.gallery.borrow_mut().next_preview() {
            self.notify();
        }
    }

    pub(crate) fn previous_preview(&self) {
        if self.gallery.borrow_mut().previous_preview() {
            self.notify();
        }
    }

    pub(crate) fn close_preview(&self) {
        self.gallery.borrow_mut().close_preview();
        self.notify();
    }

    /// Returns whether the key was consumed by an open preview.
    pub(crate) fn handle_preview_key(&self, key: PreviewKey) -> bool {
        let consumed = self.gallery.borrow_mut().handle_preview_key(key);
        if consumed {
            self.notify();
        }
        consumed
    }

    fn notify(&self) {
        {
            let gallery = self.gallery.borrow();
            *self.snapshot.borrow_mut() = build_snapshot(&gallery);
        }
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }
}

pub(crate) struct GallerySubscription {
    subscriber: GallerySubscriber,
    subscribers: Rc<RefCell<Vec<GallerySubscriber>>>,
}

impl Drop for GallerySubscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.borrow_mut();
        subscribers.retain(|item| !Rc::ptr_eq(item, &self.subscriber));
    }
}

fn build_snapshot(gallery: &Gallery<LocalStore>) -> GallerySnapshot {
    GallerySnapshot {
        items: Rc::new(gallery.items().to_vec()),
        preview: gallery.preview(),
    }
}

fn log_load_issue(issue: Option<&LoadIssue>) {
    let Some(_issue) = issue else {
        return;
    };
    #[cfg(target_arch = "wasm32")]
    {
        match _issue {
            LoadIssue::Missing => gloo::console::log!("gallery: nothing saved yet"),
            LoadIssue::Storage(err) => {
                gloo::console::warn!("gallery: storage unavailable", err.to_string())
            }
            LoadIssue::Malformed(err) => {
                gloo::console::warn!("gallery: ignoring saved data", err.to_string())
            }
            LoadIssue::Skipped(count) => {
                gloo::console::warn!("gallery: skipped unreadable entries", *count)
            }
        }
    }
}

fn log_persisted(_action: &str, _detail: &str, persisted: &Persisted) {
    #[cfg(target_arch = "wasm32")]
    {
        match persisted {
            Ok(()) => gloo::console::log!("gallery: saved after", _action, _detail),
            Err(err) => gloo::console::error!("gallery: save failed", _action, err.to_string()),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = persisted;
    }
}
