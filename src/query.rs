//! Read-only views over the vocabulary: what is due, what is coming up, and
//! how the learner is doing.
//!
//! Every function takes `now` (and the civil zone where days matter) from
//! the caller and never mutates an item.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, Utc};
use serde::Serialize;

use crate::humanize;
use crate::models::LearningItem;

/// An item due later, with how long until it is.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingReview<'a> {
    #[serde(flatten)]
    pub item: &'a LearningItem,
    pub seconds_remaining: i64,
    pub time_remaining: String,
}

/// Number of reviews falling on one civil day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub label: String,
    pub count: usize,
}

/// Schedule details for a single item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewInfo {
    pub id: String,
    pub word: String,
    pub next_review: DateTime<FixedOffset>,
    pub time_remaining: String,
    pub due: bool,
    pub last_reviewed: Option<DateTime<FixedOffset>>,
    pub interval: u32,
    pub ease_factor: f64,
    pub review_count: u32,
    pub correct_count: u32,
    pub incorrect_count: u32,
}

/// Aggregate statistics for the whole vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VocabStats {
    pub total_items: usize,
    pub new_count: usize,
    pub due_count: usize,
    pub overdue_count: usize,
    pub total_reviews: u64,
    /// Percentage of correct reviews, one decimal place.
    pub accuracy: f64,
}

/// Items with `next_review <= now`, most overdue first.
pub fn due<'a>(
    items: impl IntoIterator<Item = &'a LearningItem>,
    now: DateTime<FixedOffset>,
) -> Vec<&'a LearningItem> {
    let mut due: Vec<_> = items.into_iter().filter(|i| i.is_due(now)).collect();
    due.sort_by_key(|i| i.next_review);
    due
}

/// Items with `next_review < now`, most overdue first.
pub fn overdue<'a>(
    items: impl IntoIterator<Item = &'a LearningItem>,
    now: DateTime<FixedOffset>,
) -> Vec<&'a LearningItem> {
    let mut overdue: Vec<_> = items.into_iter().filter(|i| i.is_overdue(now)).collect();
    overdue.sort_by_key(|i| i.next_review);
    overdue
}

/// Items due after `now` but within `days_ahead` days, soonest first.
pub fn upcoming<'a>(
    items: impl IntoIterator<Item = &'a LearningItem>,
    now: DateTime<FixedOffset>,
    days_ahead: u32,
) -> Vec<UpcomingReview<'a>> {
    let horizon = TimeDelta::try_days(i64::from(days_ahead))
        .and_then(|span| now.checked_add_signed(span))
        .unwrap_or_else(|| DateTime::<Utc>::MAX_UTC.fixed_offset());

    let mut upcoming: Vec<_> = items
        .into_iter()
        .filter(|i| i.next_review > now && i.next_review <= horizon)
        .map(|item| {
            let remaining = item.next_review - now;
            UpcomingReview {
                item,
                seconds_remaining: remaining.num_seconds(),
                time_remaining: humanize::describe(remaining),
            }
        })
        .collect();
    upcoming.sort_by_key(|u| u.item.next_review);
    upcoming
}

/// Review counts per civil day in `zone`, for today and the next
/// `days_ahead` days.
///
/// Day 0 is the day containing `now`. Items due before today's midnight are
/// not counted; they show up in [`due`] instead.
pub fn daily_counts<'a>(
    items: impl IntoIterator<Item = &'a LearningItem>,
    now: DateTime<FixedOffset>,
    zone: FixedOffset,
    days_ahead: u32,
) -> Vec<DailyCount> {
    let items: Vec<_> = items.into_iter().collect();
    let today_start = start_of_day(now, zone);

    let mut counts = Vec::new();
    for offset in 0..=days_ahead {
        let Some(start) = TimeDelta::try_days(i64::from(offset))
            .and_then(|span| today_start.checked_add_signed(span))
        else {
            break;
        };
        let Some(end) = start.checked_add_signed(TimeDelta::days(1)) else {
            break;
        };

        let count = items
            .iter()
            .filter(|i| i.next_review >= start && i.next_review < end)
            .count();

        let label = match offset {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            _ => start.format("%a %b %-d").to_string(),
        };

        counts.push(DailyCount {
            date: start.date_naive(),
            label,
            count,
        });
    }
    counts
}

/// Schedule details for `item` as of `now`.
pub fn review_info(item: &LearningItem, now: DateTime<FixedOffset>) -> ReviewInfo {
    let due = item.is_due(now);
    let time_remaining = if due {
        "Due now".to_string()
    } else {
        humanize::describe(item.next_review - now)
    };

    ReviewInfo {
        id: item.id.clone(),
        word: item.word.clone(),
        next_review: item.next_review,
        time_remaining,
        due,
        last_reviewed: item.last_reviewed,
        interval: item.interval,
        ease_factor: item.ease_factor,
        review_count: item.review_count,
        correct_count: item.correct_count,
        incorrect_count: item.incorrect_count,
    }
}

pub fn stats<'a>(
    items: impl IntoIterator<Item = &'a LearningItem>,
    now: DateTime<FixedOffset>,
) -> VocabStats {
    let mut stats = VocabStats::default();
    let mut total_correct: u64 = 0;

    for item in items {
        stats.total_items += 1;
        if item.is_new() {
            stats.new_count += 1;
        }
        if item.is_due(now) {
            stats.due_count += 1;
        }
        if item.is_overdue(now) {
            stats.overdue_count += 1;
        }
        stats.total_reviews += u64::from(item.review_count);
        total_correct += u64::from(item.correct_count);
    }

    if stats.total_reviews > 0 {
        let accuracy = total_correct as f64 / stats.total_reviews as f64 * 100.0;
        stats.accuracy = (accuracy * 10.0).round() / 10.0;
    }

    stats
}

/// Case-insensitive substring search over word, translation and notes, in
/// collection order.
pub fn search<'a>(
    items: impl IntoIterator<Item = &'a LearningItem>,
    query: &str,
) -> Vec<&'a LearningItem> {
    let needle = query.to_lowercase();
    items.into_iter().filter(|i| i.matches(&needle)).collect()
}

/// Midnight of the civil day containing `now` in `zone`.
fn start_of_day(now: DateTime<FixedOffset>, zone: FixedOffset) -> DateTime<FixedOffset> {
    let local = now.with_timezone(&zone);
    local - (local.time() - NaiveTime::MIN)
}
