use std::thread;

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};
use tempfile::TempDir;

use vocab_srs::{FixedClock, NewWord, SharedVocabulary, Vocabulary, VocabularyStore};

fn zone() -> FixedOffset {
    FixedOffset::east_opt(3600).unwrap()
}

fn start() -> DateTime<FixedOffset> {
    zone().with_ymd_and_hms(2024, 10, 14, 8, 0, 0).unwrap()
}

fn open(dir: &TempDir) -> Vocabulary<FixedClock> {
    let store = VocabularyStore::load(dir.path().join("vocabulary.json"), zone());
    Vocabulary::with_clock(store, FixedClock::new(start()), zone())
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{} != {}", a, b);
}

#[test]
fn learning_a_word_over_several_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let mut vocab = open(&dir);

    let item = vocab
        .add(NewWord::new("ricordare", "to remember").with_category("verb"))
        .unwrap();
    assert_eq!(item.interval, 0);
    assert_eq!(item.ease_factor, 2.5);
    assert_eq!(item.next_review, item.created);

    // Good recall of a new word: one day, ease already at the cap.
    let item = vocab.review(&item.id, 4).unwrap();
    assert_eq!(item.interval, 1);
    assert_close(item.ease_factor, 2.5);
    assert_eq!(item.next_review, start() + TimeDelta::days(1));

    vocab.clock().advance(TimeDelta::days(1));
    let item = vocab.review(&item.id, 4).unwrap();
    assert_eq!(item.interval, 6);
    assert_close(item.ease_factor, 2.5);
    assert_eq!(item.next_review, vocab.now() + TimeDelta::days(6));

    vocab.clock().advance(TimeDelta::days(6));
    let item = vocab.review(&item.id, 0).unwrap();
    assert_eq!(item.interval, 0);
    assert_close(item.ease_factor, 2.3);
    assert_eq!(item.next_review, vocab.now() + TimeDelta::hours(4));

    assert_eq!(item.review_count, 3);
    assert_eq!(item.correct_count, 2);
    assert_eq!(item.incorrect_count, 1);

    let stats = vocab.stats();
    assert_eq!(stats.total_reviews, 3);
    assert_eq!(stats.accuracy, 66.7);
}

#[test]
fn hard_recall_keeps_progression_but_returns_tomorrow() {
    let dir = tempfile::tempdir().unwrap();
    let mut vocab = open(&dir);
    let item = vocab.add(NewWord::new("sedia", "chair")).unwrap();

    vocab.review(&item.id, 5).unwrap();
    vocab.review(&item.id, 5).unwrap();
    let item = vocab.review(&item.id, 3).unwrap();

    assert_eq!(item.interval, 15);
    assert_eq!(item.next_review, start() + TimeDelta::days(1));

    // The stored interval drives the next step.
    let item = vocab.review(&item.id, 4).unwrap();
    assert_eq!(item.interval, 37);
    assert_eq!(item.next_review, start() + TimeDelta::days(37));
}

#[test]
fn preview_agrees_with_review() {
    let dir = tempfile::tempdir().unwrap();
    let mut vocab = open(&dir);
    let item = vocab.add(NewWord::new("libro", "book")).unwrap();
    vocab.review(&item.id, 4).unwrap();
    vocab.review(&item.id, 2).unwrap();
    vocab.review(&item.id, 5).unwrap();

    let preview = vocab.preview(&item.id).unwrap();
    let before = vocab.get(&item.id).unwrap().clone();

    for outcome in preview {
        let copy_dir = tempfile::tempdir().unwrap();
        let mut copy = open(&copy_dir);
        let added = copy.add(NewWord::new("libro", "book")).unwrap();
        copy.review(&added.id, 4).unwrap();
        copy.review(&added.id, 2).unwrap();
        copy.review(&added.id, 5).unwrap();

        let reviewed = copy
            .review(&added.id, i64::from(outcome.quality.value()))
            .unwrap();
        assert_eq!(reviewed.interval, outcome.interval);
        assert_eq!(reviewed.ease_factor, outcome.ease_factor);
        assert_eq!(reviewed.next_review, outcome.next_review);
    }

    assert_eq!(vocab.get(&item.id).unwrap(), &before);
}

#[test]
fn reviews_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let mut vocab = open(&dir);
        let item = vocab.add(NewWord::new("mela", "apple")).unwrap();
        vocab.review(&item.id, 5).unwrap();
        item.id
    };

    let vocab = open(&dir);
    let info = vocab.next_review_info(&id).unwrap();
    assert_eq!(info.review_count, 1);
    assert_eq!(info.interval, 1);
    assert_eq!(info.time_remaining, "1 day");
}

#[test]
fn deleting_twice_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut vocab = open(&dir);
    let item = vocab.add(NewWord::new("mela", "apple")).unwrap();
    assert!(vocab.delete(&item.id).unwrap());
    assert!(!vocab.delete(&item.id).unwrap());
    assert!(vocab.get_all().is_empty());
}

#[test]
fn concurrent_reviews_are_serialized() {
    let dir = tempfile::tempdir().unwrap();
    let shared = SharedVocabulary::new(open(&dir));
    let id = shared.add(NewWord::new("acqua", "water")).unwrap().id;

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let shared = shared.clone();
            let id = id.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    shared.review(&id, (n % 6) as i64).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let item = shared.get(&id).unwrap();
    assert_eq!(item.review_count, 80);
    assert_eq!(item.review_count, item.correct_count + item.incorrect_count);
    // n in 3..=5 pass: three threads of ten.
    assert_eq!(item.correct_count, 30);

    let reloaded = VocabularyStore::load(dir.path().join("vocabulary.json"), zone());
    assert_eq!(reloaded.get(&id).unwrap(), &item);

    assert_eq!(shared.stats().total_reviews, 80);
    assert_eq!(shared.preview(&id).unwrap().len(), 6);
    assert!(shared.delete(&id).unwrap());
    assert!(shared.get(&id).unwrap_err().is_not_found());
}
