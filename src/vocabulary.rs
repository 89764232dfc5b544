//! The vocabulary engine as seen by callers: add, review, delete, and the
//! read-only views.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::models::{LearningItem, NewWord};
use crate::query::{self, DailyCount, ReviewInfo, UpcomingReview, VocabStats};
use crate::sm2::{Quality, ReviewOutcome, Scheduler};
use crate::storage::VocabularyStore;

/// A store, a scheduler and a clock bound together.
///
/// Not synchronized; wrap in [`SharedVocabulary`] when requests can arrive
/// concurrently.
pub struct Vocabulary<C: Clock = SystemClock> {
    store: VocabularyStore,
    scheduler: Scheduler,
    clock: C,
    zone: FixedOffset,
}

impl Vocabulary<SystemClock> {
    /// Open the document at `path` using the wall clock in `zone`.
    pub fn open(path: impl Into<PathBuf>, zone: FixedOffset) -> Self {
        Self::with_clock(
            VocabularyStore::load(path, zone),
            SystemClock::new(zone),
            zone,
        )
    }
}

impl<C: Clock> Vocabulary<C> {
    pub fn with_clock(store: VocabularyStore, clock: C, zone: FixedOffset) -> Self {
        Self {
            store,
            scheduler: Scheduler::new(),
            clock,
            zone,
        }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &VocabularyStore {
        &self.store
    }

    pub fn add(&mut self, word: NewWord) -> Result<LearningItem> {
        let now = self.now();
        self.store.create(word, now)
    }

    /// Record a review of `quality` (0-5) and persist the new schedule.
    pub fn review(&mut self, id: &str, quality: i64) -> Result<LearningItem> {
        let quality = Quality::new(quality)?;
        let now = self.now();
        let scheduler = self.scheduler;

        let item = self.store.update(id, |item| {
            scheduler.review_item(item, quality, now);
        })?;

        log::debug!(
            "Reviewed {} with {}: interval {}d, ease {:.2}, next {}",
            item.id,
            quality,
            item.interval,
            item.ease_factor,
            item.next_review
        );
        Ok(item)
    }

    /// Remove an item. `Ok(false)` means there was nothing to remove.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        self.store.delete(id)
    }

    pub fn get(&self, id: &str) -> Result<&LearningItem> {
        self.store.get(id)
    }

    pub fn get_all(&self) -> Vec<&LearningItem> {
        self.store.items().collect()
    }

    pub fn due(&self) -> Vec<&LearningItem> {
        query::due(self.store.items(), self.now())
    }

    pub fn overdue(&self) -> Vec<&LearningItem> {
        query::overdue(self.store.items(), self.now())
    }

    pub fn upcoming(&self, days_ahead: u32) -> Vec<UpcomingReview<'_>> {
        query::upcoming(self.store.items(), self.now(), days_ahead)
    }

    pub fn daily_counts(&self, days_ahead: u32) -> Vec<DailyCount> {
        query::daily_counts(self.store.items(), self.now(), self.zone, days_ahead)
    }

    pub fn next_review_info(&self, id: &str) -> Result<ReviewInfo> {
        let item = self.store.get(id)?;
        Ok(query::review_info(item, self.now()))
    }

    /// What each quality rating would do to this item, without applying it.
    pub fn preview(&self, id: &str) -> Result<Vec<ReviewOutcome>> {
        let item = self.store.get(id)?;
        Ok(self.scheduler.preview(item, self.now()))
    }

    pub fn search(&self, query: &str) -> Vec<&LearningItem> {
        query::search(self.store.items(), query)
    }

    pub fn stats(&self) -> VocabStats {
        query::stats(self.store.items(), self.now())
    }
}

/// A [`Vocabulary`] behind one lock.
///
/// Each call holds the lock for the whole operation, so a review's read,
/// update and document rewrite cannot interleave with another request.
pub struct SharedVocabulary<C: Clock = SystemClock> {
    inner: Arc<Mutex<Vocabulary<C>>>,
}

impl<C: Clock> Clone for SharedVocabulary<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> SharedVocabulary<C> {
    pub fn new(vocabulary: Vocabulary<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(vocabulary)),
        }
    }

    /// Run `f` with exclusive access.
    ///
    /// A poisoned lock is taken over: the store only commits an item change
    /// after its document write succeeds, so the collection is consistent.
    pub fn with<R>(&self, f: impl FnOnce(&mut Vocabulary<C>) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    pub fn add(&self, word: NewWord) -> Result<LearningItem> {
        self.with(|v| v.add(word))
    }

    pub fn review(&self, id: &str, quality: i64) -> Result<LearningItem> {
        self.with(|v| v.review(id, quality))
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.with(|v| v.delete(id))
    }

    pub fn get(&self, id: &str) -> Result<LearningItem> {
        self.with(|v| v.get(id).cloned())
    }

    pub fn preview(&self, id: &str) -> Result<Vec<ReviewOutcome>> {
        self.with(|v| v.preview(id))
    }

    pub fn stats(&self) -> VocabStats {
        self.with(|v| v.stats())
    }
}
