// Manifest policy: what a screening result means for a shipment.
//
// The analyzer only reports a level. The shipment-creation flow turns that
// into a status shown on the manifest (OK / RESTRICTED) and a disposition:
// critical content blocks submission, everything else is advisory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::screening::{AnalysisResult, RiskLevel};

/// Status printed on the shipment manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManifestStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "RESTRICTED")]
    Restricted,
}

impl ManifestStatus {
    pub fn from_result(result: &AnalysisResult) -> Self {
        if result.found {
            ManifestStatus::Restricted
        } else {
            ManifestStatus::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestStatus::Ok => "OK",
            ManifestStatus::Restricted => "RESTRICTED",
        }
    }
}

impl std::fmt::Display for ManifestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the caller does with a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Disposition {
    Clear,
    Notice,
    Warn,
    Block,
}

impl Disposition {
    pub fn from_result(result: &AnalysisResult) -> Self {
        match (result.found, result.level) {
            (false, _) => Disposition::Clear,
            // A hit with no level is still a hit: the manifest says RESTRICTED
            (true, None) | (true, Some(RiskLevel::Info)) => Disposition::Notice,
            (true, Some(RiskLevel::Warning)) => Disposition::Warn,
            (true, Some(RiskLevel::Critical)) => Disposition::Block,
        }
    }

    /// Only critical content stops the shipment from being saved.
    pub fn allows_submission(&self) -> bool {
        !matches!(self, Disposition::Block)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Clear => "clear",
            Disposition::Notice => "notice",
            Disposition::Warn => "warn",
            Disposition::Block => "block",
        }
    }

    pub const ALL: [Disposition; 4] = [
        Disposition::Block,
        Disposition::Warn,
        Disposition::Notice,
        Disposition::Clear,
    ];
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One screened shipment description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestCheck {
    pub description: String,
    pub result: AnalysisResult,
    pub status: ManifestStatus,
    pub disposition: Disposition,
}

impl ManifestCheck {
    pub fn new(description: impl Into<String>, result: AnalysisResult) -> Self {
        let status = ManifestStatus::from_result(&result);
        let disposition = Disposition::from_result(&result);
        Self {
            description: description.into(),
            result,
            status,
            disposition,
        }
    }
}

/// Counts over a batch of checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningSummary {
    pub total: usize,
    pub by_disposition: BTreeMap<Disposition, usize>,
    /// Category label -> number of flagged descriptions
    pub by_category: BTreeMap<String, usize>,
}

impl ScreeningSummary {
    pub fn from_checks(checks: &[ManifestCheck]) -> Self {
        let mut summary = Self {
            total: checks.len(),
            ..Self::default()
        };

        for check in checks {
            *summary.by_disposition.entry(check.disposition).or_insert(0) += 1;
            if check.result.found {
                *summary
                    .by_category
                    .entry(check.result.category.clone())
                    .or_insert(0) += 1;
            }
        }

        summary
    }

    pub fn count(&self, disposition: Disposition) -> usize {
        self.by_disposition.get(&disposition).copied().unwrap_or(0)
    }

    pub fn flagged(&self) -> usize {
        self.total - self.count(Disposition::Clear)
    }
}
