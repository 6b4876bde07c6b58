pub mod classify;
pub mod gallery;
pub mod ingest;
pub mod item;
pub mod navigator;
pub mod store;

pub use classify::{
    classify_url, extract_youtube_video_id, is_gif_url, is_image_url, is_youtube_url,
    youtube_thumbnail_url, UrlKind,
};
pub use gallery::{ClearOutcome, Gallery, Persisted};
pub use ingest::{data_uri, item_for_file, item_for_paste, item_for_url, DroppedText, IngestError};
pub use item::{decode_items, encode_items, DecodeError, MediaItem, MediaKind};
pub use navigator::{PreviewKey, PreviewNavigator};
pub use store::{
    ItemStore, KeyValueStore, LoadIssue, LoadReport, MemoryStore, StorageError, StoreError,
    DEFAULT_STORAGE_KEY,
};
