//! vocab - spaced repetition scheduler for vocabulary
//!
//! Command-line front end over the vocabulary engine.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use vocab_srs::{Config, LearningItem, NewWord, Vocabulary};

// ══════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ══════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "vocab")]
#[command(author, version, about = "Spaced repetition scheduler for vocabulary", long_about = None)]
struct Args {
    /// Config file (defaults to the platform config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Vocabulary document, overriding the config
    #[arg(short, long)]
    data_file: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a new word
    Add {
        word: String,
        translation: String,
        #[arg(long, default_value = "")]
        example: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Rate recall of a word from 0 (blackout) to 5 (effortless)
    Review {
        id: String,
        #[arg(allow_hyphen_values = true)]
        quality: i64,
    },
    /// Delete a word
    Delete { id: String },
    /// List every word
    List,
    /// Words due now
    Due,
    /// Words past their review time
    Overdue,
    /// Words coming due in the next few days
    Upcoming {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Reviews per day
    Daily {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Schedule details for one word
    Info { id: String },
    /// What each rating would do to a word
    Preview { id: String },
    /// Search word, translation and notes
    Search { query: String },
    /// Overall statistics
    Stats,
    /// Write a config file with the current settings
    InitConfig,
}

// ══════════════════════════════════════════════════════════════════════════
// Main Entry Point
// ══════════════════════════════════════════════════════════════════════════

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(data_file) = args.data_file.clone() {
        config.data_file = data_file;
    }

    let zone = config.zone()?;
    let mut vocab = Vocabulary::open(config.data_file.clone(), zone);
    run(&mut vocab, &config, &config_path, args.command, args.json)
}

fn run(
    vocab: &mut Vocabulary,
    config: &Config,
    config_path: &Path,
    command: Command,
    json: bool,
) -> Result<ExitCode> {
    match command {
        Command::Add {
            word,
            translation,
            example,
            category,
            notes,
        } => {
            let word = NewWord::new(word, translation)
                .with_example(example)
                .with_category(category)
                .with_notes(notes);
            let item = vocab.add(word)?;
            if json {
                print_json(&item)?;
            } else {
                println!("✓ Added '{}' ({})", item.word, item.id);
            }
        }
        Command::Review { id, quality } => {
            let item = vocab.review(&id, quality)?;
            if json {
                print_json(&item)?;
            } else {
                let info = vocab.next_review_info(&id)?;
                println!(
                    "✓ '{}' next review in {} (interval {}d, ease {:.2})",
                    item.word, info.time_remaining, item.interval, item.ease_factor
                );
            }
        }
        Command::Delete { id } => {
            if !vocab.delete(&id)? {
                eprintln!("Word not found: {}", id);
                return Ok(ExitCode::FAILURE);
            }
            if !json {
                println!("✓ Deleted {}", id);
            }
        }
        Command::List => print_items(&vocab.get_all(), json)?,
        Command::Due => print_items(&vocab.due(), json)?,
        Command::Overdue => print_items(&vocab.overdue(), json)?,
        Command::Search { query } => print_items(&vocab.search(&query), json)?,
        Command::Upcoming { days } => {
            let upcoming = vocab.upcoming(days.unwrap_or(config.days_ahead));
            if json {
                print_json(&upcoming)?;
            } else {
                for entry in &upcoming {
                    println!(
                        "{:<16} {:<20} in {}",
                        entry.item.id, entry.item.word, entry.time_remaining
                    );
                }
            }
        }
        Command::Daily { days } => {
            let counts = vocab.daily_counts(days.unwrap_or(config.days_ahead));
            if json {
                print_json(&counts)?;
            } else {
                for day in &counts {
                    println!("{:<12} {:>4}", day.label, day.count);
                }
            }
        }
        Command::Info { id } => {
            let info = vocab.next_review_info(&id)?;
            if json {
                print_json(&info)?;
            } else {
                println!("{} ({})", info.word, info.id);
                println!("  Next review:  {} ({})", info.next_review, info.time_remaining);
                println!("  Interval:     {} days", info.interval);
                println!("  Ease:         {:.2}", info.ease_factor);
                println!(
                    "  Reviews:      {} ({} correct, {} incorrect)",
                    info.review_count, info.correct_count, info.incorrect_count
                );
            }
        }
        Command::Preview { id } => {
            let preview = vocab.preview(&id)?;
            if json {
                print_json(&preview)?;
            } else {
                for outcome in &preview {
                    println!(
                        "{:<15} {:<10} interval {:>4}d  ease {:.2}",
                        outcome.quality.to_string(),
                        outcome.delay,
                        outcome.interval,
                        outcome.ease_factor
                    );
                }
            }
        }
        Command::Stats => {
            let stats = vocab.stats();
            if json {
                print_json(&stats)?;
            } else {
                println!("Words:     {}", stats.total_items);
                println!("New:       {}", stats.new_count);
                println!("Due:       {}", stats.due_count);
                println!("Overdue:   {}", stats.overdue_count);
                println!("Reviews:   {}", stats.total_reviews);
                println!("Accuracy:  {:.1}%", stats.accuracy);
            }
        }
        Command::InitConfig => {
            config.save(config_path)?;
            println!("✓ Wrote {}", config_path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_items(items: &[&LearningItem], json: bool) -> Result<()> {
    if json {
        return print_json(&items);
    }
    for item in items {
        println!(
            "{:<16} {:<20} {:<24} due {}",
            item.id,
            item.word,
            item.translation,
            item.next_review.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
