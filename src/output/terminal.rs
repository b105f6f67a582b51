// Colored terminal output for screening results and the taxonomy.
//
// main.rs delegates all human-readable formatting here; JSON output goes
// straight through serde_json instead.

use colored::Colorize;

use crate::manifest::{Disposition, ManifestCheck, ScreeningSummary};
use crate::screening::{MatchKind, RiskLevel, Taxonomy};

/// Display the full result for one description.
pub fn display_check(check: &ManifestCheck) {
    println!(
        "\n{} {}",
        "Status:".bold(),
        colorize_disposition(check.disposition, check.status.as_str())
    );

    if !check.result.found {
        println!("  No restricted content detected.");
        return;
    }

    let level = check.result.level.map(|l| l.as_str()).unwrap_or("?");
    println!(
        "  {} [{}]",
        check.result.category.bold(),
        colorize_level(check.result.level, level)
    );
    println!("  {}", check.result.message);

    if let Some(evidence) = &check.result.evidence {
        let how = match evidence.kind {
            MatchKind::Exact => "contains".to_string(),
            MatchKind::Fuzzy { distance } => format!("{distance} edit(s) from"),
        };
        println!(
            "  {}",
            format!("\"{}\" {} \"{}\"", evidence.word, how, evidence.keyword).dimmed()
        );
    }

    if !check.disposition.allows_submission() {
        println!("\n  {} This shipment cannot be submitted.", "!!".red().bold());
    }
}

/// Display flagged lines from a batch followed by the summary counts.
pub fn display_batch(checks: &[ManifestCheck]) {
    let flagged: Vec<(usize, &ManifestCheck)> = checks
        .iter()
        .enumerate()
        .filter(|(_, c)| c.result.found)
        .collect();

    println!(
        "\n{}",
        format!(
            "=== Screening Results ({} descriptions, {} flagged) ===",
            checks.len(),
            flagged.len()
        )
        .bold()
    );
    println!();

    if !flagged.is_empty() {
        println!(
            "  {:>5}  {:<8} {:<18} {}",
            "#".dimmed(),
            "Action".dimmed(),
            "Category".dimmed(),
            "Description".dimmed(),
        );
        println!("  {}", "-".repeat(78).dimmed());

        for (i, check) in &flagged {
            println!(
                "  {:>5}  {:<8} {:<18} {}",
                i + 1,
                colorize_disposition(check.disposition, check.disposition.as_str()),
                check.result.category,
                super::truncate_chars(&check.description, 60),
            );
        }
        println!();
    }

    display_summary(&ScreeningSummary::from_checks(checks));
}

/// Display disposition and category counts.
pub fn display_summary(summary: &ScreeningSummary) {
    let block = summary.count(Disposition::Block);
    let warn = summary.count(Disposition::Warn);
    let notice = summary.count(Disposition::Notice);

    if block > 0 {
        println!("  {} {} blocked descriptions", "!!".red().bold(), block);
    }
    if warn > 0 {
        println!("  {} {} need a medical certificate or review", "!".yellow(), warn);
    }
    if notice > 0 {
        println!("  {} {} advisory notices", "~".blue(), notice);
    }
    if summary.flagged() == 0 {
        println!("  {}", "All descriptions clear.".green());
    }

    for (category, count) in &summary.by_category {
        println!("    {:<18} {}", category, count);
    }
}

/// Display every category with its level and keywords.
pub fn display_taxonomy(taxonomy: &Taxonomy) {
    println!(
        "\n{}",
        format!(
            "=== Risk Taxonomy ({} categories, {} keywords) ===",
            taxonomy.len(),
            taxonomy.keyword_count()
        )
        .bold()
    );
    println!();

    for (i, category) in taxonomy.categories().iter().enumerate() {
        println!(
            "  {:>2}. {:<18} {:<9} {}",
            i + 1,
            category.label.bold(),
            colorize_level(Some(category.level), category.level.as_str()),
            category.key.dimmed(),
        );
        println!("      {}", category.message);
        println!("      Keywords: {}", category.keywords.join(", ").dimmed());
        println!();
    }
}

fn colorize_level(level: Option<RiskLevel>, text: &str) -> colored::ColoredString {
    match level {
        Some(RiskLevel::Critical) => text.red().bold(),
        Some(RiskLevel::Warning) => text.yellow(),
        Some(RiskLevel::Info) => text.blue(),
        None => text.dimmed(),
    }
}

fn colorize_disposition(disposition: Disposition, text: &str) -> colored::ColoredString {
    match disposition {
        Disposition::Block => text.red().bold(),
        Disposition::Warn => text.yellow(),
        Disposition::Notice => text.blue(),
        Disposition::Clear => text.green(),
    }
}
