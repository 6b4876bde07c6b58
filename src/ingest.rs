use std::rc::Rc;

use linkboard_core::ingest::{accepts_pasted_mime, PLAIN_TEXT_MIME, URI_LIST_MIME};
use linkboard_core::{data_uri, item_for_file, item_for_paste, item_for_url, DroppedText, IngestError};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DataTransfer, DragEvent, File, FileList};

use crate::gallery_handle::GalleryHandle;

async fn read_file_bytes(file: &File) -> Result<Vec<u8>, String> {
    let buffer = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| format!("failed to read {}", file.name()))?;
    let array = js_sys::Uint8Array::new(&buffer);
    Ok(array.to_vec())
}

async fn read_data_uri(file: &File) -> Result<String, String> {
    let bytes = read_file_bytes(file).await?;
    Ok(data_uri(&file.type_(), &bytes))
}

pub(crate) fn file_list_to_vec(files: &FileList) -> Vec<File> {
    (0..files.length()).filter_map(|index| files.get(index)).collect()
}

/// Reads each file on its own task; items land in completion order.
pub(crate) fn ingest_files(handle: &Rc<GalleryHandle>, files: Vec<File>) {
    for file in files {
        let handle = Rc::clone(handle);
        spawn_local(async move {
            match read_data_uri(&file).await {
                Ok(uri) => handle.append(item_for_file(&file.type_(), uri)),
                Err(_message) => {
                    #[cfg(target_arch = "wasm32")]
                    {
                        gloo::console::error!("ingest: file read failed", _message);
                    }
                }
            }
        });
    }
}

pub(crate) fn ingest_paste(handle: &Rc<GalleryHandle>, event: &ClipboardEvent) {
    let Some(data) = event.clipboard_data() else {
        return;
    };
    let items = data.items();
    for index in 0..items.length() {
        let Some(entry) = items.get(index) else {
            continue;
        };
        let mime = entry.type_();
        if !accepts_pasted_mime(&mime) {
            continue;
        }
        let Ok(Some(blob)) = entry.get_as_file() else {
            continue;
        };
        let handle = Rc::clone(handle);
        spawn_local(async move {
            let uri = match read_data_uri(&blob).await {
                Ok(uri) => uri,
                Err(_message) => {
                    #[cfg(target_arch = "wasm32")]
                    {
                        gloo::console::error!("ingest: paste read failed", _message);
                    }
                    return;
                }
            };
            if let Ok(item) = item_for_paste(&mime, uri) {
                handle.append(item);
            }
        });
    }
}

/// Files win over text; a text drop appends one item per URL.
pub(crate) fn ingest_drop(handle: &Rc<GalleryHandle>, event: &DragEvent) {
    let Some(transfer) = event.data_transfer() else {
        return;
    };
    let files = transfer
        .files()
        .map(|files| file_list_to_vec(&files))
        .unwrap_or_default();
    if !files.is_empty() {
        ingest_files(handle, files);
        return;
    }
    for url in dropped_text(&transfer).urls() {
        ingest_url(handle, &url);
    }
}

fn dropped_text(transfer: &DataTransfer) -> DroppedText {
    let read = |format: &str| {
        transfer
            .get_data(format)
            .ok()
            .filter(|value| !value.trim().is_empty())
    };
    DroppedText {
        uri_list: read(URI_LIST_MIME),
        plain: read(PLAIN_TEXT_MIME),
    }
}

/// Returns false when nothing was appended.
pub(crate) fn ingest_url(handle: &GalleryHandle, raw: &str) -> bool {
    match item_for_url(raw) {
        Ok(item) => {
            handle.append(item);
            true
        }
        Err(IngestError::EmptyInput) => false,
        Err(_err) => {
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::error!("ingest: rejected url", _err.to_string());
            }
            false
        }
    }
}
