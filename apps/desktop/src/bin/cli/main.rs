mod practice;
mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flashdeck_core::types::{AnswerDraft, FlashcardDraft, PracticeMode, QuestionCount};
use flashdeck_lib::{commands, init_tracing, AppState, Config};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flashdeck", about = "Flashcard practice from the terminal", version)]
struct Cli {
    /// Database file (overrides FLASHDECK_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List categories with card counts and accuracy
    Categories,

    /// Create, rename or delete a category
    #[command(subcommand)]
    Category(CategoryCommand),

    /// List the flashcards of a category
    Cards {
        /// Category name (case-insensitive)
        category: String,
    },

    /// Add, edit or delete a flashcard
    #[command(subcommand)]
    Card(CardCommand),

    /// Practice a category interactively
    Practice {
        /// Category name (case-insensitive)
        category: String,
        /// multiple-choice or flashcard
        #[arg(long, default_value = "multiple-choice")]
        mode: PracticeMode,
        /// Number of questions, or "all"
        #[arg(long, default_value = "all")]
        count: QuestionCount,
    },

    /// Import flashcards from a file
    Import {
        file: PathBuf,
    },

    /// Export flashcards (stdout unless --output is given)
    Export {
        /// Only this category
        #[arg(long)]
        category: Option<String>,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Show daily statistics
    Stats {
        /// Also write them as CSV to this file
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Reset all answer statistics
    ResetStats {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show points, streak and badges
    Progress,

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// Create a category
    Add { name: String },

    /// Rename a category
    Rename { name: String, new_name: String },

    /// Delete a category and all its flashcards
    Delete { name: String },
}

#[derive(Subcommand)]
enum CardCommand {
    /// Add a flashcard to a category
    Add {
        category: String,
        question: String,
        /// Correct answer (repeatable)
        #[arg(long = "correct", required = true)]
        correct: Vec<String>,
        /// Incorrect answer (repeatable)
        #[arg(long = "wrong")]
        wrong: Vec<String>,
    },

    /// Replace a flashcard's question and answers
    Edit {
        id: i64,
        question: String,
        #[arg(long = "correct", required = true)]
        correct: Vec<String>,
        #[arg(long = "wrong")]
        wrong: Vec<String>,
    },

    /// Delete a flashcard
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print current settings
    Show,

    /// Set one value: theme, show_statistics, reminder_enabled, reminder_time, license_status
    Set { key: String, value: String },
}

fn draft(question: String, correct: Vec<String>, wrong: Vec<String>) -> FlashcardDraft {
    let answers = correct
        .into_iter()
        .map(AnswerDraft::correct)
        .chain(wrong.into_iter().map(AnswerDraft::incorrect))
        .collect();
    FlashcardDraft::new(question, answers)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config = config.with_db_path(db);
    }
    init_tracing(&config.log_filter);

    let state = AppState::open(config).context("failed to open database")?;
    let format = cli.format;

    match cli.command {
        Command::Categories => {
            render::categories(format, &commands::list_categories(&state)?)?;
        }
        Command::Category(subcmd) => match subcmd {
            CategoryCommand::Add { name } => {
                let category = commands::create_category(&state, &name)?;
                println!("Created category \"{}\" ({})", category.name, category.id);
            }
            CategoryCommand::Rename { name, new_name } => {
                let category = commands::find_category(&state, &name)?;
                let renamed = commands::rename_category(&state, category.id, &new_name)?;
                println!("Renamed \"{}\" to \"{}\"", category.name, renamed.name);
            }
            CategoryCommand::Delete { name } => {
                let category = commands::find_category(&state, &name)?;
                commands::delete_category(&state, category.id)?;
                println!("Deleted category \"{}\"", category.name);
            }
        },
        Command::Cards { category } => {
            let category = commands::find_category(&state, &category)?;
            render::flashcards(format, &commands::list_flashcards(&state, category.id)?)?;
        }
        Command::Card(subcmd) => match subcmd {
            CardCommand::Add {
                category,
                question,
                correct,
                wrong,
            } => {
                let category = commands::find_category(&state, &category)?;
                let card = commands::add_flashcard(&state, category.id, &draft(question, correct, wrong))?;
                println!("Added flashcard {} to \"{}\"", card.id, category.name);
            }
            CardCommand::Edit {
                id,
                question,
                correct,
                wrong,
            } => {
                let card = commands::update_flashcard(&state, id, &draft(question, correct, wrong))?;
                println!("Updated flashcard {}", card.id);
            }
            CardCommand::Delete { id } => {
                commands::delete_flashcard(&state, id)?;
                println!("Deleted flashcard {id}");
            }
        },
        Command::Practice {
            category,
            mode,
            count,
        } => {
            let category = commands::find_category(&state, &category)?;
            let stdin = io::stdin();
            practice::run(&state, &category, mode, count, stdin.lock(), io::stdout())?;
        }
        Command::Import { file } => {
            let report = commands::import_file(&state, &file)
                .with_context(|| format!("failed to import {}", file.display()))?;
            render::import_report(format, &report)?;
        }
        Command::Export { category, output } => {
            let category_id = match category {
                Some(name) => Some(commands::find_category(&state, &name)?.id),
                None => None,
            };
            match output {
                Some(path) => {
                    let count = commands::export_to_file(&state, category_id, &path)?;
                    println!("Exported {count} flashcards to {}", path.display());
                }
                None => print!("{}", commands::export_flashcards(&state, category_id)?),
            }
        }
        Command::Stats { csv } => {
            render::daily_stats(format, &commands::get_daily_statistics(&state)?)?;
            if let Some(path) = csv {
                commands::export_statistics_csv(&state, &path)?;
                println!("Wrote {}", path.display());
            }
        }
        Command::ResetStats { yes } => {
            if yes || practice::confirm(io::stdin().lock(), io::stdout(), "Reset all statistics?")? {
                commands::reset_statistics(&state)?;
                println!("Statistics reset");
            }
        }
        Command::Progress => {
            render::progress(format, &commands::get_progress(&state)?)?;
        }
        Command::Settings(subcmd) => match subcmd {
            SettingsCommand::Show => render::settings(format, &commands::get_settings(&state)?)?,
            SettingsCommand::Set { key, value } => {
                let settings = commands::update_setting(&state, &key, &value)?;
                render::settings(format, &settings)?;
            }
        },
    }

    Ok(())
}
