use std::fmt;

use serde::{Deserialize, Serialize};

use crate::classify::{is_gif_url, youtube_thumbnail_url};

/// One entry of the gallery. Index in the owning sequence is its only identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaItem {
    Image {
        #[serde(rename = "src")]
        source: String,
    },
    Gif {
        #[serde(rename = "src")]
        source: String,
    },
    #[serde(rename = "youtube")]
    YouTube {
        url: String,
        #[serde(rename = "thumbnail")]
        thumbnail_url: String,
    },
    Link {
        url: String,
    },
}

impl MediaItem {
    pub fn image(source: impl Into<String>) -> Self {
        Self::Image {
            source: source.into(),
        }
    }

    pub fn gif(source: impl Into<String>) -> Self {
        Self::Gif {
            source: source.into(),
        }
    }

    pub fn youtube(url: impl Into<String>, video_id: &str) -> Self {
        Self::YouTube {
            url: url.into(),
            thumbnail_url: youtube_thumbnail_url(video_id),
        }
    }

    pub fn link(url: impl Into<String>) -> Self {
        Self::Link { url: url.into() }
    }

    /// Interprets a bare string entry written by older versions of the page.
    pub fn from_legacy(source: String) -> Self {
        if is_gif_url(&source) {
            Self::Gif { source }
        } else {
            Self::Image { source }
        }
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            MediaItem::Image { .. } => MediaKind::Image,
            MediaItem::Gif { .. } => MediaKind::Gif,
            MediaItem::YouTube { .. } => MediaKind::YouTube,
            MediaItem::Link { .. } => MediaKind::Link,
        }
    }

    /// Image and GIF cards open the preview on click; the others link out.
    pub fn opens_preview(&self) -> bool {
        match self {
            MediaItem::Image { .. } | MediaItem::Gif { .. } => true,
            MediaItem::YouTube { .. } | MediaItem::Link { .. } => false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Gif,
    YouTube,
    Link,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Gif => "gif",
            MediaKind::YouTube => "youtube",
            MediaKind::Link => "link",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepted on load: canonical tagged objects and legacy bare strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredItem {
    Legacy(String),
    Tagged(MediaItem),
}

impl StoredItem {
    fn into_item(self) -> MediaItem {
        match self {
            StoredItem::Legacy(source) => MediaItem::from_legacy(source),
            StoredItem::Tagged(item) => item,
        }
    }
}

#[derive(Debug)]
pub enum DecodeError {
    Json(serde_json::Error),
    NotAnArray,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Json(err) => write!(f, "malformed json: {err}"),
            DecodeError::NotAnArray => f.write_str("payload is not an array"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Json(err) => Some(err),
            DecodeError::NotAnArray => None,
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DecodedItems {
    pub items: Vec<MediaItem>,
    pub skipped: usize,
}

/// Decodes a persisted payload. Entries of unknown shape are skipped and
/// counted; the payload itself must be a JSON array.
pub fn decode_items(raw: &str) -> Result<DecodedItems, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(DecodeError::Json)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(DecodeError::NotAnArray);
    };
    let mut decoded = DecodedItems::default();
    for entry in entries {
        match serde_json::from_value::<StoredItem>(entry) {
            Ok(stored) => decoded.items.push(stored.into_item()),
            Err(_) => decoded.skipped += 1,
        }
    }
    Ok(decoded)
}

pub fn encode_items(items: &[MediaItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}
