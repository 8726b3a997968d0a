//! Local fallback counters
//!
//! Three scalar keys per domain, kept even when the leaderboard service is
//! unreachable:
//! - `{domain}_score`: best run
//! - `{domain}_beans`: lifetime beans
//! - `{domain}_cumulative_score`: lifetime score

use std::collections::HashMap;
use std::fmt;

use crate::domain::Domain;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    Unavailable,
    Write { key: String, reason: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "storage unavailable"),
            Self::Write { key, reason } => write!(f, "could not write {key}: {reason}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// String key/value storage (LocalStorage-shaped)
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl BrowserStorage {
    pub fn open() -> Result<Self, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .map(|storage| Self { storage })
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}

/// Storage keys for one domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalKeys {
    pub score: String,
    pub beans: String,
    pub cumulative_score: String,
}

impl LocalKeys {
    pub fn for_domain(domain: Domain) -> Self {
        let d = domain.as_str();
        Self {
            score: format!("{d}_score"),
            beans: format!("{d}_beans"),
            cumulative_score: format!("{d}_cumulative_score"),
        }
    }
}

/// Locally remembered totals for one domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStats {
    pub high_score: u64,
    pub total_beans: u64,
    pub cumulative_score: u64,
}

impl LocalStats {
    /// Read counters; missing or garbled values count as 0
    pub fn load(store: &impl KeyValueStore, domain: Domain) -> Self {
        let keys = LocalKeys::for_domain(domain);
        let read = |key: &str| store.get_item(key).map(|v| parse_counter(&v)).unwrap_or(0);
        Self {
            high_score: read(&keys.score),
            total_beans: read(&keys.beans),
            cumulative_score: read(&keys.cumulative_score),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore, domain: Domain) -> Result<(), StorageError> {
        let keys = LocalKeys::for_domain(domain);
        store.set_item(&keys.score, &self.high_score.to_string())?;
        store.set_item(&keys.beans, &self.total_beans.to_string())?;
        store.set_item(&keys.cumulative_score, &self.cumulative_score.to_string())?;
        Ok(())
    }

    /// Fold in a finished run. Returns true on a new high score.
    pub fn record_run(&mut self, score: u64, beans: u64) -> bool {
        self.total_beans = self.total_beans.saturating_add(beans);
        self.cumulative_score = self.cumulative_score.saturating_add(score);
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

/// Load, merge one run, store back
pub fn record_locally(
    store: &mut impl KeyValueStore,
    domain: Domain,
    score: u64,
    beans: u64,
) -> Result<LocalStats, StorageError> {
    let mut stats = LocalStats::load(store, domain);
    if stats.record_run(score, beans) {
        log::info!("New local high score for {domain}: {score}");
    }
    stats.save(store, domain)?;
    Ok(stats)
}

/// Leading decimal digits, like the browser's `parseInt`; anything else is 0
fn parse_counter(raw: &str) -> u64 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
