// Markdown screening report.
//
// A standalone file an operator can attach to a compliance review: when it
// was generated, how many descriptions landed in each disposition, which
// categories fired, and the flagged descriptions themselves.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::manifest::{Disposition, ManifestCheck, ScreeningSummary};
use crate::screening::MatchKind;

/// Longest description preview written into the flagged table.
const PREVIEW_CHARS: usize = 100;

/// Write the report to `path`, creating parent directories as needed.
/// Returns the path written.
pub fn generate_report(checks: &[ManifestCheck], path: &str) -> Result<String> {
    let summary = ScreeningSummary::from_checks(checks);
    let mut md = String::new();

    writeln!(md, "# ParcelGuard Screening Report")?;
    writeln!(md)?;
    writeln!(
        md,
        "Generated {} from {} shipment descriptions.",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        summary.total
    )?;
    writeln!(md)?;

    writeln!(md, "## Summary")?;
    writeln!(md)?;
    writeln!(md, "| Disposition | Count |")?;
    writeln!(md, "|---|---|")?;
    for disposition in Disposition::ALL {
        writeln!(md, "| {} | {} |", disposition, summary.count(disposition))?;
    }
    writeln!(md, "| **Total** | **{}** |", summary.total)?;
    writeln!(md)?;

    if !summary.by_category.is_empty() {
        writeln!(md, "## Categories")?;
        writeln!(md)?;
        writeln!(md, "| Category | Flagged |")?;
        writeln!(md, "|---|---|")?;
        for (category, count) in &summary.by_category {
            writeln!(md, "| {} | {} |", escape_cell(category), count)?;
        }
        writeln!(md)?;
    }

    let flagged: Vec<(usize, &ManifestCheck)> = checks
        .iter()
        .enumerate()
        .filter(|(_, c)| c.result.found)
        .collect();

    if !flagged.is_empty() {
        writeln!(md, "## Flagged Descriptions")?;
        writeln!(md)?;
        writeln!(md, "| # | Action | Category | Level | Trigger | Description |")?;
        writeln!(md, "|---|---|---|---|---|---|")?;
        for (i, check) in flagged {
            let level = check.result.level.map(|l| l.as_str()).unwrap_or("");
            let trigger = match &check.result.evidence {
                Some(e) => match e.kind {
                    MatchKind::Exact => code_span(&e.keyword),
                    MatchKind::Fuzzy { distance } => {
                        let word = code_span(&e.word);
                        let keyword = code_span(&e.keyword);
                        format!("{word} ~ {keyword} ({distance})")
                    }
                },
                None => String::new(),
            };
            writeln!(
                md,
                "| {} | {} | {} | {} | {} | {} |",
                i + 1,
                check.disposition,
                escape_cell(&check.result.category),
                level,
                escape_cell(&trigger),
                escape_cell(&super::truncate_chars(&check.description, PREVIEW_CHARS)),
            )?;
        }
        writeln!(md)?;
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, md).with_context(|| format!("Failed to write report to {path}"))?;

    Ok(path.to_string())
}

/// Keep table cells on one line and stop pipes from splitting columns.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

/// Wrap `text` in an inline code span whose fence is longer than any
/// backtick run inside it.
fn code_span(text: &str) -> String {
    let longest_run = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let pad = if text.starts_with('`') || text.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{fence}{pad}{text}{pad}{fence}")
}
