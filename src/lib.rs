//! Spaced repetition scheduling for vocabulary learning.
//!
//! [`Vocabulary`] is the entry point: it owns a [`VocabularyStore`] (one JSON
//! document of [`LearningItem`]s), applies SM-2 reviews through the
//! [`Scheduler`], and answers due/upcoming/stats queries from [`query`].

pub mod clock;
pub mod config;
pub mod error;
pub mod humanize;
pub mod models;
pub mod query;
pub mod sm2;
pub mod storage;
pub mod vocabulary;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::{Result, VocabError};
pub use models::{LearningItem, NewWord};
pub use sm2::{Quality, ReviewOutcome, Scheduler};
pub use storage::VocabularyStore;
pub use vocabulary::{SharedVocabulary, Vocabulary};
