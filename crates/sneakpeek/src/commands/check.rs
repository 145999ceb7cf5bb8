use anyhow::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

use crate::deck::Deck;

pub fn run(file: &Path, quiet: bool) -> Result<()> {
    let deck = Deck::load(file)?;

    if !quiet {
        println!(
            "{} {}",
            deck.display_title(file).bold(),
            format!("({} slides)", deck.slides.len()).dimmed()
        );
        for (i, slide) in deck.slides.iter().enumerate() {
            let tags = if slide.tags.is_empty() {
                String::new()
            } else {
                format!(" #{}", slide.tags.join(" #"))
            };
            println!(
                "  {:>2}. {} {}{}",
                i + 1,
                format!("[{}]", slide.status).cyan(),
                slide.title,
                tags.dimmed()
            );
        }
    }

    let warnings = lint(&deck);
    for warning in &warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }
    if !quiet && warnings.is_empty() {
        println!("{}", "Deck looks good.".green());
    }
    Ok(())
}

/// Problems that do not stop the deck from loading but make for a poor carousel.
pub fn lint(deck: &Deck) -> Vec<String> {
    let mut warnings = Vec::new();
    match deck.slides.len() {
        0 => warnings.push("deck has no slides; the overlay will be empty".to_string()),
        1 => warnings.push("deck has a single slide; navigation will do nothing".to_string()),
        _ => {}
    }

    let mut seen = HashSet::new();
    for (i, slide) in deck.slides.iter().enumerate() {
        let n = i + 1;
        for (field, value) in [
            ("status", &slide.status),
            ("title", &slide.title),
            ("summary", &slide.summary),
            ("insight", &slide.insight),
        ] {
            if value.trim().is_empty() {
                warnings.push(format!("slide {n} has an empty {field}"));
            }
        }
        if !slide.title.trim().is_empty() && !seen.insert(slide.title.trim()) {
            warnings.push(format!("slide {n} repeats the title \"{}\"", slide.title));
        }
    }
    warnings
}
