//! Storage module for saving and loading the vocabulary document.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::error::{Result, VocabError};
use crate::models::{LearningItem, NewWord};

/// Owns every learning item and the single persisted document holding them.
///
/// Items are keyed by id. Ids are millisecond timestamps of equal width, so
/// key order is creation order.
#[derive(Debug)]
pub struct VocabularyStore {
    path: PathBuf,
    items: BTreeMap<String, LearningItem>,
    last_id: i64,
}

impl VocabularyStore {
    /// Load the document at `path`.
    ///
    /// Timestamps written without a UTC offset are read as civil time in
    /// `zone`. A missing or unreadable document yields an empty store. A
    /// document that does not parse is moved to `<name>.json.bak` first, so
    /// the next save cannot destroy it.
    pub fn load(path: impl Into<PathBuf>, zone: FixedOffset) -> Self {
        let path = path.into();
        let items = match fs::read_to_string(&path) {
            Ok(json) => match parse_document(&json, zone) {
                Ok(items) => {
                    log::info!("Loaded {} words from {:?}", items.len(), path);
                    items
                }
                Err(e) => {
                    let backup = path.with_extension("json.bak");
                    match fs::rename(&path, &backup) {
                        Ok(()) => log::warn!(
                            "Unparseable vocabulary file {:?} moved to {:?}: {}",
                            path,
                            backup,
                            e
                        ),
                        Err(mv) => log::warn!(
                            "Unparseable vocabulary file {:?} ({}) could not be moved aside: {}",
                            path,
                            e,
                            mv
                        ),
                    }
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No vocabulary file at {:?}, starting empty", path);
                BTreeMap::new()
            }
            Err(e) => {
                log::warn!("Could not read vocabulary file {:?}: {}", path, e);
                BTreeMap::new()
            }
        };

        let last_id = items
            .keys()
            .filter_map(|id| id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            path,
            items,
            last_id,
        }
    }

    /// Get default storage location.
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vocab-srs")
            .join("vocabulary.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole collection to disk.
    ///
    /// The document is written beside the target and renamed into place, so
    /// readers see either the old or the new document.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.items)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.persistence_error(source))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json).map_err(|source| self.persistence_error(source))?;
        fs::rename(&tmp_path, &self.path).map_err(|source| self.persistence_error(source))?;
        Ok(())
    }

    /// Validate, insert and persist a new item.
    pub fn create(&mut self, word: NewWord, now: DateTime<FixedOffset>) -> Result<LearningItem> {
        let word = word.trimmed();
        if word.word.is_empty() || word.translation.is_empty() {
            return Err(VocabError::Validation(
                "Word and translation are required".to_string(),
            ));
        }

        let id = self.next_id(now);
        let item = LearningItem::new(id.clone(), word, now);
        self.items.insert(id.clone(), item.clone());

        if let Err(e) = self.save() {
            self.items.remove(&id);
            return Err(e);
        }

        log::debug!("Added word {} ({:?})", id, item.word);
        Ok(item)
    }

    /// Remove an item. Returns `false` when no item has this id.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(removed) = self.items.remove(id) else {
            return Ok(false);
        };

        if let Err(e) = self.save() {
            self.items.insert(id.to_string(), removed);
            return Err(e);
        }

        log::debug!("Deleted word {}", id);
        Ok(true)
    }

    pub fn get(&self, id: &str) -> Result<&LearningItem> {
        self.items
            .get(id)
            .ok_or_else(|| VocabError::NotFound(id.to_string()))
    }

    /// Mutate one item in place and persist the document.
    ///
    /// If the write fails the item is restored and the error returned, so the
    /// in-memory collection never runs ahead of the document.
    pub fn update<F>(&mut self, id: &str, apply: F) -> Result<LearningItem>
    where
        F: FnOnce(&mut LearningItem),
    {
        let item = self
            .items
            .get_mut(id)
            .ok_or_else(|| VocabError::NotFound(id.to_string()))?;
        let previous = item.clone();
        apply(item);
        let updated = item.clone();

        if let Err(e) = self.save() {
            self.items.insert(id.to_string(), previous);
            return Err(e);
        }

        Ok(updated)
    }

    /// All items in collection order.
    pub fn items(&self) -> impl Iterator<Item = &LearningItem> {
        self.items.values()
    }

    /// Next id: the creation time in milliseconds, bumped past anything
    /// already issued or loaded.
    fn next_id(&mut self, now: DateTime<FixedOffset>) -> String {
        let mut id = now.timestamp_millis().max(self.last_id + 1);
        while self.items.contains_key(&id.to_string()) {
            id += 1;
        }
        self.last_id = id;
        id.to_string()
    }

    fn persistence_error(&self, source: io::Error) -> VocabError {
        VocabError::Persistence {
            path: self.path.clone(),
            source,
        }
    }
}

const TIMESTAMP_FIELDS: [&str; 3] = ["created", "last_reviewed", "next_review"];

/// Decode the id → item map, pinning offset-less timestamps to `zone`.
fn parse_document(
    json: &str,
    zone: FixedOffset,
) -> serde_json::Result<BTreeMap<String, LearningItem>> {
    let mut raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
    for entry in raw.values_mut() {
        for field in TIMESTAMP_FIELDS {
            if let Some(value) = entry.get_mut(field) {
                attach_offset(value, zone);
            }
        }
    }
    raw.into_iter()
        .map(|(id, entry)| serde_json::from_value(entry).map(|item| (id, item)))
        .collect()
}

/// Rewrite a naive ISO 8601 timestamp string as RFC 3339 in `zone`.
/// Anything else is left for the item decoder to accept or reject.
fn attach_offset(value: &mut serde_json::Value, zone: FixedOffset) {
    let Some(text) = value.as_str() else {
        return;
    };
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return;
    }
    if let Ok(naive) = text.parse::<NaiveDateTime>() {
        if let Some(local) = naive.and_local_timezone(zone).single() {
            *value = serde_json::Value::String(local.to_rfc3339());
        }
    }
}
