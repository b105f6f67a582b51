// Content screener trait: swap-ready abstraction.
//
// The keyword screener is the only implementation today. A different
// strategy (a remote moderation API, a per-market rule set) can slot in
// behind this trait without touching the CLI or the manifest policy.

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use super::analyzer::{AnalysisResult, MatchKind};
use super::taxonomy::Taxonomy;

/// Trait for screening free-text shipment descriptions.
pub trait ContentScreener: Send + Sync {
    /// Screen a single description.
    fn screen(&self, text: &str) -> AnalysisResult;

    /// Screen several descriptions, returning results in the same order.
    fn screen_batch(&self, texts: &[String]) -> Vec<AnalysisResult> {
        texts.iter().map(|text| self.screen(text)).collect()
    }
}

/// Rule-based screener over a risk taxonomy.
#[derive(Debug, Clone)]
pub struct KeywordScreener {
    taxonomy: Taxonomy,
}

impl Default for KeywordScreener {
    fn default() -> Self {
        Self::new(Taxonomy::builtin().clone())
    }
}

impl KeywordScreener {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    /// Builtin taxonomy, extended by `extension` when one is given.
    pub fn from_extension(extension: Option<&Path>) -> Result<Self> {
        let Some(path) = extension else {
            return Ok(Self::default());
        };

        let taxonomy = Taxonomy::with_extension(path)?;
        info!(
            path = %path.display(),
            categories = taxonomy.len(),
            keywords = taxonomy.keyword_count(),
            "Loaded taxonomy extension"
        );
        Ok(Self::new(taxonomy))
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }
}

impl ContentScreener for KeywordScreener {
    fn screen(&self, text: &str) -> AnalysisResult {
        let result = self.taxonomy.analyze(text);

        if let Some(evidence) = &result.evidence {
            let (kind, distance) = match evidence.kind {
                MatchKind::Exact => ("exact", 0),
                MatchKind::Fuzzy { distance } => ("fuzzy", distance),
            };
            debug!(
                category = %result.category,
                word = %evidence.word,
                keyword = %evidence.keyword,
                kind,
                distance,
                "Content flagged"
            );
        }

        result
    }
}
