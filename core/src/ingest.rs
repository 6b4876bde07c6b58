//! Turns raw input (typed text, dropped URLs, file bytes) into media items.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::classify::{classify_url, extract_youtube_video_id, UrlKind};
use crate::item::MediaItem;

pub const URI_LIST_MIME: &str = "text/uri-list";
pub const PLAIN_TEXT_MIME: &str = "text/plain";
const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    EmptyInput,
    InvalidYouTubeUrl(String),
    NotAnImage(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::EmptyInput => f.write_str("empty input"),
            IngestError::InvalidYouTubeUrl(url) => write!(f, "invalid youtube url: {url}"),
            IngestError::NotAnImage(mime) => write!(f, "not an image: {mime}"),
        }
    }
}

impl std::error::Error for IngestError {}

/// One item per submitted URL: YouTube, then GIF, then image, then link.
pub fn item_for_url(raw: &str) -> Result<MediaItem, IngestError> {
    let url = raw.trim();
    if url.is_empty() {
        return Err(IngestError::EmptyInput);
    }
    let item = match classify_url(url) {
        UrlKind::YouTube => {
            let Some(video_id) = extract_youtube_video_id(url) else {
                return Err(IngestError::InvalidYouTubeUrl(url.to_string()));
            };
            MediaItem::youtube(url, &video_id)
        }
        UrlKind::Gif => MediaItem::gif(url),
        UrlKind::Image => MediaItem::image(url),
        UrlKind::Link => MediaItem::link(url),
    };
    Ok(item)
}

/// Dropped or picked files: the declared media type alone decides GIF.
pub fn item_for_file(mime: &str, data_uri: String) -> MediaItem {
    if is_gif_mime(mime) {
        MediaItem::gif(data_uri)
    } else {
        MediaItem::image(data_uri)
    }
}

/// Pasted clipboard entries are always plain images, GIF or not.
pub fn item_for_paste(mime: &str, data_uri: String) -> Result<MediaItem, IngestError> {
    if !accepts_pasted_mime(mime) {
        return Err(IngestError::NotAnImage(mime.to_string()));
    }
    Ok(MediaItem::image(data_uri))
}

pub fn accepts_pasted_mime(mime: &str) -> bool {
    mime.contains("image")
}

pub fn is_gif_mime(mime: &str) -> bool {
    mime.to_ascii_lowercase().contains("gif")
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() {
        FALLBACK_MIME
    } else {
        mime.trim()
    };
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Splits a `text/uri-list` payload, skipping blank and `#` comment lines.
pub fn parse_uri_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Text pulled from a drop that carried no files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedText {
    pub uri_list: Option<String>,
    pub plain: Option<String>,
}

impl DroppedText {
    pub fn urls(&self) -> Vec<String> {
        if let Some(list) = self.uri_list.as_deref() {
            let urls = parse_uri_list(list);
            if !urls.is_empty() {
                return urls;
            }
        }
        self.plain
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| vec![text.to_string()])
            .unwrap_or_default()
    }
}
