use linkboard_core::{KeyValueStore, StorageError};

/// `window.localStorage`, looked up on every call so a storage that becomes
/// unavailable mid-session degrades to logged write failures.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalStore;

impl LocalStore {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

#[cfg(target_arch = "wasm32")]
fn js_reason(err: wasm_bindgen::JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &wasm_bindgen::JsValue::from_str("name"))
                .ok()
                .and_then(|name| name.as_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = local_storage()?;
        storage
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage()?;
        storage
            .set_item(key, value)
            .map_err(|err| StorageError::WriteFailed(js_reason(err)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let storage = local_storage()?;
        storage
            .remove_item(key)
            .map_err(|err| StorageError::WriteFailed(js_reason(err)))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for LocalStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
