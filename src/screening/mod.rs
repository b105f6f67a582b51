// Content-risk screening: taxonomy, edit distance, and the analyzer.
//
// The taxonomy is static data; the analyzer and distance function are pure.
// ContentScreener is the swap seam for alternative screening strategies.

pub mod analyzer;
pub mod distance;
pub mod taxonomy;
pub mod traits;

pub use analyzer::{analyze_content_risk, AnalysisResult, MatchEvidence, MatchKind};
pub use distance::levenshtein_distance;
pub use taxonomy::{RiskCategory, RiskLevel, Taxonomy};
