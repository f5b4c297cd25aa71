//! Terminal output for records.

use colored::Colorize;
use ecowatch_application::{FavoritesStore, ListItem};
use ecowatch_core::record::Record;

pub fn print_items(items: &[ListItem]) {
    if items.is_empty() {
        println!("{}", "No reports found".bright_black());
        return;
    }
    for (index, item) in items.iter().enumerate() {
        let heart = if item.is_favorite {
            "♥".red().to_string()
        } else {
            " ".to_string()
        };
        println!("{:>3}. {} {}", index + 1, heart, summary(&item.record));
    }
}

/// Plain numbered list, used while results stream in.
pub fn print_results(records: &[Record]) {
    println!("{}", format!("-- {} result(s)", records.len()).bright_black());
    for (index, record) in records.iter().enumerate() {
        println!("{:>3}. {}", index + 1, summary(record));
    }
}

pub fn print_detail(record: &Record, favorites: &FavoritesStore) {
    let favorite = record.id.is_some_and(|id| favorites.is_member(id));
    let id = record
        .id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "(unsaved)".to_string());

    println!("{} {}", id.bright_black(), record.title.bold());
    if favorite {
        println!("  {}", "♥ favorite".red());
    }
    println!("  {:<12}{}", "Type", record.kind);
    println!("  {:<12}{}", "Observed", record.observed_on);
    println!(
        "  {:<12}{} ({:.5}, {:.5})",
        "Location", record.location, record.latitude, record.longitude
    );
    if let Some(photo) = &record.photo {
        println!("  {:<12}{}", "Photo", photo);
    }
    if let Some(author) = &record.author {
        println!("  {:<12}{} <{}>", "Reported by", author.name, author.email);
    }
    if !record.description.is_empty() {
        println!();
        for line in record.description.lines() {
            println!("  {}", line);
        }
    }
}

fn summary(record: &Record) -> String {
    format!(
        "{} {} {}",
        record.title.bold(),
        format!("[{}]", record.kind).yellow(),
        record.location.bright_black()
    )
}
