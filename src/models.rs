//! Data models for vocabulary items.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Ease factor assigned to every new item.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// A single learned word and its review schedule.
///
/// Field order here is the field order of the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningItem {
    pub id: String,
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,

    // Tracking
    pub created: DateTime<FixedOffset>,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<FixedOffset>>,
    pub next_review: DateTime<FixedOffset>,

    // SM-2 fields
    pub interval: u32,
    pub ease_factor: f64,

    // Counters
    pub review_count: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

impl LearningItem {
    /// Build a fresh item that is due immediately.
    pub fn new(id: String, word: NewWord, now: DateTime<FixedOffset>) -> Self {
        Self {
            id,
            word: word.word,
            translation: word.translation,
            example: word.example,
            category: word.category,
            notes: word.notes,
            created: now,
            last_reviewed: None,
            next_review: now,
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            review_count: 0,
            correct_count: 0,
            incorrect_count: 0,
        }
    }

    pub fn is_new(&self) -> bool {
        self.review_count == 0
    }

    pub fn is_due(&self, now: DateTime<FixedOffset>) -> bool {
        self.next_review <= now
    }

    pub fn is_overdue(&self, now: DateTime<FixedOffset>) -> bool {
        self.next_review < now
    }

    /// Case-insensitive substring match on word, translation and notes.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.word.to_lowercase().contains(needle)
            || self.translation.to_lowercase().contains(needle)
            || self.notes.to_lowercase().contains(needle)
    }
}

/// User-supplied content for a new item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWord {
    pub word: String,
    pub translation: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
}

impl NewWord {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            ..Default::default()
        }
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Trim surrounding whitespace from every field.
    pub fn trimmed(self) -> Self {
        Self {
            word: self.word.trim().to_string(),
            translation: self.translation.trim().to_string(),
            example: self.example.trim().to_string(),
            category: self.category.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }
}
