//! SM-2 scheduling for vocabulary reviews.
//!
//! Quality 0-2 is a lapse: the interval resets and the word comes back the
//! same day. Quality 3-5 advances the interval 1 → 6 → interval × ease.
//! A quality of 3 still advances the stored interval but only pushes the
//! due date one day out, so a hard recall is checked again tomorrow.

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use serde::Serialize;

use crate::error::{Result, VocabError};
use crate::humanize;
use crate::models::LearningItem;

pub const MIN_EASE: f64 = 1.3;
pub const MAX_EASE: f64 = 2.5;

/// Ease lost on a lapse.
const LAPSE_PENALTY: f64 = 0.2;

/// How soon a lapsed word is shown again.
const RELEARN_DELAY: TimeDelta = TimeDelta::hours(4);

/// Due-date offset for a hard (quality 3) recall.
const HARD_DELAY: TimeDelta = TimeDelta::days(1);

/// Self-reported recall quality, 0 (blackout) to 5 (effortless).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    pub const ALL: [Quality; 6] = [
        Quality(0),
        Quality(1),
        Quality(2),
        Quality(3),
        Quality(4),
        Quality(5),
    ];

    pub fn new(value: i64) -> Result<Self> {
        match u8::try_from(value) {
            Ok(v) if v <= 5 => Ok(Self(v)),
            _ => Err(VocabError::Validation(
                "Quality must be an integer between 0 and 5".to_string(),
            )),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self.0 >= 3
    }

    /// Ease gained on a successful recall.
    fn ease_bonus(self) -> f64 {
        match self.0 {
            3 => 0.1,
            4 => 0.15,
            5 => 0.2,
            _ => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self.0 {
            0 => "Blackout",
            1 => "Incorrect",
            2 => "Almost",
            3 => "Hard",
            4 => "Good",
            _ => "Easy",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.name())
    }
}

/// The schedule a review would leave an item with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcome {
    pub quality: Quality,
    pub interval: u32,
    pub ease_factor: f64,
    pub next_review: DateTime<FixedOffset>,
    /// Delay until `next_review`, e.g. "4 hours".
    pub delay: String,
}

/// SM-2 scheduler.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scheduler;

impl Scheduler {
    pub fn new() -> Self {
        Self
    }

    /// Compute the schedule for `item` after a review of `quality` at `now`.
    /// Does not touch the item.
    pub fn outcome(
        &self,
        item: &LearningItem,
        quality: Quality,
        now: DateTime<FixedOffset>,
    ) -> ReviewOutcome {
        // Loaded documents may carry an ease outside the valid range.
        let ease = clamp_ease(item.ease_factor);
        let (interval, ease_factor, next_review) = if quality.is_pass() {
            let interval = match item.interval {
                0 => 1,
                1 => 6,
                prev => (f64::from(prev) * ease).floor() as u32,
            };
            let ease_factor = clamp_ease(ease + quality.ease_bonus());
            let next_review = if quality.value() == 3 {
                now + HARD_DELAY
            } else {
                add_days(now, interval)
            };
            (interval, ease_factor, next_review)
        } else {
            let ease_factor = clamp_ease(ease - LAPSE_PENALTY);
            (0, ease_factor, now + RELEARN_DELAY)
        };

        ReviewOutcome {
            quality,
            interval,
            ease_factor,
            next_review,
            delay: humanize::describe(next_review - now),
        }
    }

    /// Apply a review to `item`: counters, last-reviewed stamp and schedule.
    pub fn review_item(
        &self,
        item: &mut LearningItem,
        quality: Quality,
        now: DateTime<FixedOffset>,
    ) -> ReviewOutcome {
        let outcome = self.outcome(item, quality, now);

        item.last_reviewed = Some(now);
        item.review_count += 1;
        if quality.is_pass() {
            item.correct_count += 1;
        } else {
            item.incorrect_count += 1;
        }

        item.interval = outcome.interval;
        item.ease_factor = outcome.ease_factor;
        item.next_review = outcome.next_review;

        outcome
    }

    /// What each quality rating would produce, lowest first.
    pub fn preview(&self, item: &LearningItem, now: DateTime<FixedOffset>) -> Vec<ReviewOutcome> {
        Quality::ALL
            .iter()
            .map(|&q| self.outcome(item, q, now))
            .collect()
    }
}

fn clamp_ease(ease: f64) -> f64 {
    ease.clamp(MIN_EASE, MAX_EASE)
}

/// `now + days`, saturating at the latest representable instant.
fn add_days(now: DateTime<FixedOffset>, days: u32) -> DateTime<FixedOffset> {
    TimeDelta::try_days(i64::from(days))
        .and_then(|span| now.checked_add_signed(span))
        .unwrap_or_else(|| DateTime::<Utc>::MAX_UTC.fixed_offset())
}
