use anyhow::Result;
use flashdeck_core::types::{AppSettings, CategoryStats, DailyStat, GamificationStats};
use flashdeck_lib::commands::FlashcardDetail;
use flashdeck_lib::transfer::ImportReport;
use serde::Serialize;

use crate::OutputFormat;

fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn categories(format: OutputFormat, stats: &[CategoryStats]) -> Result<()> {
    if let OutputFormat::Json = format {
        return json(stats);
    }
    if stats.is_empty() {
        println!("No categories yet. Create one with `flashdeck category add <name>`.");
        return Ok(());
    }
    for s in stats {
        let accuracy = s
            .accuracy()
            .map(|a| format!("{:.0}%", a * 100.0))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:>4} cards  {:>4} correct  {:>4} incorrect  {:>5}",
            s.name, s.flashcard_count, s.correct_count, s.incorrect_count, accuracy
        );
    }
    Ok(())
}

pub fn flashcards(format: OutputFormat, cards: &[FlashcardDetail]) -> Result<()> {
    if let OutputFormat::Json = format {
        return json(cards);
    }
    for detail in cards {
        let card = &detail.flashcard;
        println!(
            "[{}] {}  (+{} / -{})",
            card.id, card.question, card.correct_count, card.incorrect_count
        );
        for answer in &detail.answers {
            let marker = if answer.is_correct { "*" } else { " " };
            println!("    {marker} {}", answer.text);
        }
    }
    Ok(())
}

pub fn import_report(format: OutputFormat, report: &ImportReport) -> Result<()> {
    if let OutputFormat::Json = format {
        return json(report);
    }
    println!(
        "Imported {} flashcards ({} duplicates, {} new categories)",
        report.imported, report.duplicates, report.categories_created
    );
    for skipped in &report.skipped {
        println!("  line {}: {}", skipped.line, skipped.reason);
    }
    Ok(())
}

pub fn daily_stats(format: OutputFormat, stats: &[DailyStat]) -> Result<()> {
    if let OutputFormat::Json = format {
        return json(stats);
    }
    if stats.is_empty() {
        println!("No answers recorded yet.");
    }
    for day in stats {
        println!(
            "{}  {:>4} correct  {:>4} incorrect",
            day.date, day.correct_count, day.incorrect_count
        );
    }
    Ok(())
}

pub fn progress(format: OutputFormat, stats: &GamificationStats) -> Result<()> {
    if let OutputFormat::Json = format {
        return json(stats);
    }
    println!("Points: {}", stats.points);
    println!("Streak: {}", stats.streak);
    if stats.badges.is_empty() {
        println!("Badges: none");
    } else {
        println!("Badges: {}", stats.badges.join(", "));
    }
    Ok(())
}

pub fn settings(format: OutputFormat, settings: &AppSettings) -> Result<()> {
    if let OutputFormat::Json = format {
        return json(settings);
    }
    println!("theme            {}", settings.theme.as_str());
    println!("show_statistics  {}", settings.show_statistics);
    println!("reminder_enabled {}", settings.reminder_enabled);
    println!("reminder_time    {}", settings.reminder_time.format("%H:%M"));
    println!("license_status   {}", settings.license_status.as_str());
    Ok(())
}
