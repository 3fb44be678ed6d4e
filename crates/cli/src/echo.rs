use doclens_core::{AuditOutcome, OverallRating, Rating};
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Doclens".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Audit documentation pages with LLM-backed scoring\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
#[allow(dead_code)]
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Color-code a category rating for display
fn colored_rating(rating: Rating) -> String {
    match rating {
        Rating::Excellent => rating.to_string().bright_green().to_string(),
        Rating::Good => rating.to_string().green().to_string(),
        Rating::Fair => rating.to_string().yellow().to_string(),
        Rating::Poor => rating.to_string().red().to_string(),
    }
}

fn colored_overall(overall: OverallRating) -> String {
    match overall {
        OverallRating::Excellent => overall.to_string().bright_green().to_string(),
        OverallRating::Good => overall.to_string().green().to_string(),
        OverallRating::Fair => overall.to_string().yellow().to_string(),
        OverallRating::Poor => overall.to_string().red().to_string(),
        OverallRating::Unknown => overall.to_string().dimmed().to_string(),
    }
}

/// Print the full per-category analysis report to stdout
pub fn print_report(outcome: &AuditOutcome) {
    println!("\n{}", "=".repeat(60).dimmed());
    println!("{}", "DOCUMENTATION ANALYSIS RESULTS".bold());
    println!("{}", "=".repeat(60).dimmed());
    println!("\n{} {}", "URL:".dimmed(), outcome.url.bright_white());

    for (name, category) in outcome.report.analysis.categories() {
        println!("\n{}", "-".repeat(30).dimmed());
        println!("{}", name.to_uppercase().replace('_', " ").bold());
        println!("{}", "-".repeat(30).dimmed());
        println!("Score: {}", colored_rating(category.score));

        if !category.issues.is_empty() {
            println!("\nIssues:");
            for (i, issue) in category.issues.iter().enumerate() {
                println!("  {}. {}", i + 1, issue);
            }
        }

        if !category.suggestions.is_empty() {
            println!("\nSuggestions:");
            for (i, suggestion) in category.suggestions.iter().enumerate() {
                println!("  {}. {}", i + 1, suggestion);
            }
        }
    }

    println!("\n{} {}", "Overall rating:".bold(), colored_overall(outcome.overall));
}
