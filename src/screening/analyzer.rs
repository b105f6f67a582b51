// Content-risk analyzer: keyword containment plus fuzzy matching.
//
// Scan order is category -> word -> keyword, and the first hit wins. That
// order is the tie-break: a word that could belong to two categories is
// reported under whichever category is declared first in the taxonomy.

use serde::{Deserialize, Serialize};

use super::distance::{fuzzy_tolerance, levenshtein_distance};
use super::taxonomy::{RiskCategory, RiskLevel, Taxonomy};

/// Words shorter than this (in chars) are never matched.
pub const MIN_WORD_CHARS: usize = 3;

/// The outcome of screening one piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub found: bool,
    pub level: Option<RiskLevel>,
    /// Category label (e.g. "WAFFEN"), empty when nothing was found
    pub category: String,
    /// User-facing explanation, empty when nothing was found
    pub message: String,
    /// What triggered the match, for audit trails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<MatchEvidence>,
}

/// The word/keyword pair that produced a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvidence {
    pub category_key: String,
    pub word: String,
    pub keyword: String,
    pub kind: MatchKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MatchKind {
    /// The word contains the keyword verbatim
    Exact,
    /// The word is within the keyword's edit tolerance
    Fuzzy { distance: usize },
}

impl AnalysisResult {
    /// The "nothing found" result.
    pub fn clear() -> Self {
        Self {
            found: false,
            level: None,
            category: String::new(),
            message: String::new(),
            evidence: None,
        }
    }

    fn flagged(category: &RiskCategory, word: &str, keyword: &str, kind: MatchKind) -> Self {
        Self {
            found: true,
            level: Some(category.level),
            category: category.label.clone(),
            message: category.message.clone(),
            evidence: Some(MatchEvidence {
                category_key: category.key.clone(),
                word: word.to_string(),
                keyword: keyword.to_string(),
                kind,
            }),
        }
    }
}

/// Lowercase `text` and split it into candidate words.
///
/// Separators are runs of whitespace, commas, periods, and hyphens.
/// Fragments shorter than three characters are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '-'))
        .filter(|word| word.chars().count() >= MIN_WORD_CHARS)
        .map(str::to_string)
        .collect()
}

/// Match a single word against a single keyword.
fn match_keyword(word: &str, keyword: &str) -> Option<MatchKind> {
    if word.contains(keyword) {
        return Some(MatchKind::Exact);
    }

    let tolerance = fuzzy_tolerance(keyword)?;
    let distance = levenshtein_distance(word, keyword);
    (distance <= tolerance).then_some(MatchKind::Fuzzy { distance })
}

/// Screen `text` against the builtin taxonomy.
pub fn analyze_content_risk(text: &str) -> AnalysisResult {
    Taxonomy::builtin().analyze(text)
}

impl Taxonomy {
    /// Screen `text` against this taxonomy. Never fails; empty or
    /// unmatchable input yields [`AnalysisResult::clear`].
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let words = tokenize(text);

        for category in self.categories() {
            for word in &words {
                for keyword in &category.keywords {
                    if let Some(kind) = match_keyword(word, keyword) {
                        return AnalysisResult::flagged(category, word, keyword, kind);
                    }
                }
            }
        }

        AnalysisResult::clear()
    }
}
