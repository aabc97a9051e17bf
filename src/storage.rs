/// Preference storage: the persisted set and the read-modify-write store around it

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::STORAGE_KEY;
use crate::error::StoreError;
use crate::site_data::{SiteOptions, SiteRecord};

/// Every stored site record, persisted as one array under one key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct PreferenceSet {
    pub records: Vec<SiteRecord>,
}

impl PreferenceSet {
    pub fn new() -> Self {
        PreferenceSet { records: Vec::new() }
    }

    /// Parse a stored value. A flat array of domain strings is the old
    /// storage layout and is rejected instead of being read as records.
    pub fn from_stored(value: Value) -> Result<Self, StoreError> {
        if let Value::Array(items) = &value {
            if items.iter().any(Value::is_string) {
                return Err(StoreError::LegacyFormat);
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_stored(&self) -> Result<Value, StoreError> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn find(&self, identity: &str) -> Option<&SiteRecord> {
        self.records.iter().find(|r| r.url == identity)
    }

    /// Replace the record for `identity` in place, or append a new one.
    /// Returns true when a record was appended.
    pub fn upsert(&mut self, identity: &str, enabled: bool, options: SiteOptions) -> bool {
        match self.records.iter_mut().find(|r| r.url == identity) {
            Some(record) => {
                record.enabled = enabled;
                record.options = options;
                false
            }
            None => {
                self.records.push(SiteRecord::new(identity.to_string(), enabled, options));
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Asynchronous key/value persistence the preference store sits on
#[async_trait(?Send)]
pub trait StorageBackend {
    /// `Ok(None)` when nothing is stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// In-memory backend. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    items: Rc<RefCell<HashMap<String, Value>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: Value) -> Self {
        let backend = Self::new();
        backend.items.borrow_mut().insert(key.to_string(), value);
        backend
    }

    pub fn snapshot(&self, key: &str) -> Option<Value> {
        self.items.borrow().get(key).cloned()
    }
}

#[async_trait(?Send)]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.snapshot(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.items.borrow_mut().insert(key.to_string(), value);
        Ok(())
    }
}

/// Read-modify-write access to the preference set.
///
/// Writes always replace the whole set. Two upserts whose read and write
/// interleave lose one of the updates: the last write to complete wins.
#[derive(Debug, Clone)]
pub struct PreferenceStore<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> PreferenceStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: &str) -> Self {
        PreferenceStore {
            backend,
            key: key.to_string(),
        }
    }

    /// Read the full set. An absent key is an empty set; a failed read is an error.
    pub async fn get_all(&self) -> Result<PreferenceSet, StoreError> {
        match self.backend.get(&self.key).await? {
            None | Some(Value::Null) => Ok(PreferenceSet::new()),
            Some(value) => PreferenceSet::from_stored(value),
        }
    }

    pub async fn upsert(
        &self,
        identity: &str,
        enabled: bool,
        options: SiteOptions,
    ) -> Result<(), StoreError> {
        let mut set = self.get_all().await?;
        let appended = set.upsert(identity, enabled, options);

        log::debug!(
            "{} record for {} (enabled={}, {} records)",
            if appended { "Added" } else { "Updated" },
            identity,
            enabled,
            set.len()
        );

        self.backend.set(&self.key, set.to_stored()?).await
    }

    /// The stored record for `identity`, or a fresh disabled one
    pub async fn find_by_identity(&self, identity: &str) -> Result<SiteRecord, StoreError> {
        let set = self.get_all().await?;
        Ok(set
            .find(identity)
            .cloned()
            .unwrap_or_else(|| SiteRecord::default_for(identity)))
    }
}
