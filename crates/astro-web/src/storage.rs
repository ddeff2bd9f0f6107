use astro_canvas::error::StorageError;
use astro_canvas::store::Storage;

/// `window.localStorage`. Private browsing or a missing window leaves it
/// unavailable: reads find nothing and writes fail with
/// `StorageError::Unavailable`.
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let inner = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if inner.is_none() {
            log::warn!("localStorage unavailable; settings will not persist");
        }
        Self { inner }
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.inner.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{e:?}")))
    }
}
