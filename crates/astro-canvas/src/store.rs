//! App-wide settings store persisted to key-value storage.
//!
//! A `Store<T>` holds one value, writes it through to its [`Storage`] as
//! JSON on every change and notifies subscribers. Loading never fails:
//! missing or corrupt data yields `T::default()`.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{FieldConfig, SkyLayers, TimelineConfig};
use crate::error::StorageError;
use crate::particles::FieldMode;

/// String key-value storage (browser `localStorage` or an in-memory map).
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage with an optional per-value size limit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values longer than `bytes`, like a full browser quota.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StorageError::Rejected(format!(
                    "{} bytes exceeds quota of {quota}",
                    value.len()
                )));
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

type Listener<T> = Box<dyn FnMut(&T)>;

pub struct Store<T, S: Storage> {
    key: String,
    value: T,
    storage: S,
    listeners: Vec<(SubscriptionId, Listener<T>)>,
    next_id: u32,
}

impl<T, S> Store<T, S>
where
    T: Serialize + DeserializeOwned + Default,
    S: Storage,
{
    /// Read `key` from `storage`, falling back to the default value.
    pub fn load(key: &str, storage: S) -> Self {
        let value = match storage.get_item(key) {
            None => T::default(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("store: discarding corrupt {key:?}: {e}");
                T::default()
            }),
        };
        Self {
            key: key.to_string(),
            value,
            storage,
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value, persist it and notify subscribers.
    ///
    /// The in-memory value and subscribers are updated even when persisting
    /// fails; the error is returned so the caller can tell the user.
    pub fn set(&mut self, value: T) -> Result<(), StorageError> {
        self.value = value;
        let persisted = self.persist();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.value);
        }
        persisted
    }

    /// Modify the value in place, then persist and notify as `set` does.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> Result<(), StorageError> {
        let mut value = std::mem::take(&mut self.value);
        f(&mut value);
        self.set(value)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.value).map_err(StorageError::Serialize)?;
        self.storage.set_item(&self.key, &json).map_err(|e| {
            log::warn!("store: could not persist {:?}: {e}", self.key);
            e
        })
    }
}

/// User settings shared by all hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub background_mode: FieldMode,
    pub background_intensity: f32,
    pub sky_layers: SkyLayers,
    pub timeline_auto_rotate: bool,
    pub reduced_motion: bool,
}

impl Preferences {
    pub const STORAGE_KEY: &'static str = "astro-canvas.preferences";

    pub fn background_config(&self) -> FieldConfig {
        FieldConfig {
            mode: self.background_mode,
            intensity: self.background_intensity,
            ..FieldConfig::default()
        }
        .sanitized()
    }

    /// Reduced motion also stops the timeline from spinning on its own.
    pub fn timeline_config(&self) -> TimelineConfig {
        TimelineConfig {
            auto_rotate: self.timeline_auto_rotate && !self.reduced_motion,
            ..TimelineConfig::default()
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            background_mode: FieldMode::Nebula,
            background_intensity: 1.0,
            sky_layers: SkyLayers::default(),
            timeline_auto_rotate: true,
            reduced_motion: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    const KEY: &str = Preferences::STORAGE_KEY;

    #[test]
    fn missing_key_loads_default() {
        let store: Store<Preferences, _> = Store::load(KEY, MemoryStorage::new());
        assert_eq!(store.get(), &Preferences::default());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn corrupt_json_loads_default() {
        let mut storage = MemoryStorage::new();
        storage.set_item(KEY, "{not json").unwrap();
        let store: Store<Preferences, _> = Store::load(KEY, storage);
        assert_eq!(store.get(), &Preferences::default());
    }

    #[test]
    fn set_persists_and_reloads() {
        let mut store: Store<Preferences, _> = Store::load(KEY, MemoryStorage::new());
        store
            .update(|p| {
                p.background_mode = FieldMode::Aurora;
                p.sky_layers.labels = false;
            })
            .unwrap();

        let reloaded: Store<Preferences, _> = Store::load(KEY, store.storage().clone());
        assert_eq!(reloaded.get().background_mode, FieldMode::Aurora);
        assert!(!reloaded.get().sky_layers.labels);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set_item(KEY, r#"{ "background_mode": "comet" }"#).unwrap();
        let store: Store<Preferences, _> = Store::load(KEY, storage);
        assert_eq!(store.get().background_mode, FieldMode::Comet);
        assert_eq!(store.get().background_intensity, 1.0);
    }

    #[test]
    fn subscribers_notified_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store: Store<Preferences, _> = Store::load(KEY, MemoryStorage::new());
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |p: &Preferences| sink.borrow_mut().push(p.reduced_motion));

        store.update(|p| p.reduced_motion = true).unwrap();
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.update(|p| p.reduced_motion = false).unwrap();

        assert_eq!(*seen.borrow(), vec![true]);
    }

    #[test]
    fn rejected_write_keeps_value_in_memory() {
        let mut store: Store<Preferences, _> = Store::load(KEY, MemoryStorage::with_quota(8));
        let err = store.update(|p| p.reduced_motion = true).unwrap_err();
        assert!(matches!(err, StorageError::Rejected(_)));
        assert!(store.get().reduced_motion);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn reduced_motion_disables_auto_rotate() {
        let prefs = Preferences { reduced_motion: true, ..Preferences::default() };
        assert!(!prefs.timeline_config().auto_rotate);
        let prefs = Preferences { background_intensity: 99.0, ..Preferences::default() };
        assert_eq!(prefs.background_config().intensity, crate::config::MAX_INTENSITY);
    }
}
