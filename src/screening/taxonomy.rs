// Risk taxonomy: the static table of contraband categories.
//
// The builtin table is plain data declared once below. Categories are kept
// in declaration order because the analyzer's tie-break is "first category
// wins". Operators can extend the table with a JSON file (see TaxonomyFile)
// without touching the matching logic.

use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Severity reported for a match. The analyzer only reports it; callers
/// decide what each level means for the shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Info,
    Warning,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Info => "info",
            RiskLevel::Warning => "warning",
            RiskLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(RiskLevel::Info),
            "warning" => Ok(RiskLevel::Warning),
            "critical" => Ok(RiskLevel::Critical),
            other => anyhow::bail!("Unknown risk level '{other}' (expected critical, warning, or info)"),
        }
    }
}

/// One category of restricted content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskCategory {
    /// Stable identifier, e.g. "weapons"
    pub key: String,
    pub level: RiskLevel,
    /// Lowercase lexical triggers, matched in order
    pub keywords: Vec<String>,
    /// Short uppercase label shown to the user, e.g. "WAFFEN"
    pub label: String,
    /// Why a match is flagged
    pub message: String,
}

/// An ordered, read-only set of risk categories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Taxonomy {
    categories: Vec<RiskCategory>,
}

struct CategoryDef {
    key: &'static str,
    level: RiskLevel,
    keywords: &'static [&'static str],
    label: &'static str,
    message: &'static str,
}

const BUILTIN: &[CategoryDef] = &[
    CategoryDef {
        key: "weapons",
        level: RiskLevel::Critical,
        keywords: &[
            "waffe", "gun", "pistole", "pistol", "knife", "messer", "bomb", "bombe", "munition",
            "ammo", "bullet", "patrone", "schlagring", "taser", "spreng", "explosiv", "sihlah",
            "سلاح", "gewehr", "revolver", "dynamit", "granate", "c4", "semtex",
        ],
        label: "WAFFEN",
        message: "Streng verboten. Führt zur Sperrung.",
    },
    CategoryDef {
        key: "hazmat",
        level: RiskLevel::Critical,
        keywords: &[
            "uran", "plutonium", "radioactiv", "radioaktiv", "isotope", "nuclear", "atom",
            "säure", "acid", "mercury", "quecksilber", "batterie", "battery", "lithium", "gas",
            "flammable", "brennbar", "poison", "gift", "toxin", "benzin", "petrol",
        ],
        label: "GEFAHRGUT",
        message: "Gefahrgut ist im Flugverkehr illegal.",
    },
    CategoryDef {
        key: "narcotics",
        level: RiskLevel::Critical,
        keywords: &[
            "drogen", "drug", "cannabis", "weed", "kokain", "cocaine", "heroin", "hashish", "thc",
            "cbd", "pillen", "crystal", "meth", "mخدر", "marijuana", "koks", "speed",
            "amphetamin", "lsd", "ecstasy", "mdma", "opium", "fentanyl",
        ],
        label: "BETÄUBUNGSMITTEL",
        message: "Illegaler Drogenbesitz ist strafbar.",
    },
    CategoryDef {
        key: "medication",
        level: RiskLevel::Warning,
        keywords: &[
            "ritalin", "xanax", "tilidin", "morphin", "tramadol", "oxy", "benzos", "valium",
            "spritze", "insulin", "blood", "blut", "darou", "دارو", "viagra", "testosteron",
            "steroid", "anabol", "antibiotika",
        ],
        label: "MEDIKAMENTE",
        message: "Ärztliches Attest zwingend erforderlich.",
    },
    CategoryDef {
        key: "protected",
        level: RiskLevel::Critical,
        keywords: &[
            "elfenbein", "ivory", "fell", "fur", "skin", "koralle", "reptil", "snake", "tiger",
            "nashorn", "caviar", "papagei",
        ],
        label: "ARTENSCHUTZ",
        message: "Handel mit geschützten Arten verboten.",
    },
];

static BUILTIN_TAXONOMY: LazyLock<Taxonomy> = LazyLock::new(|| Taxonomy {
    categories: BUILTIN
        .iter()
        .map(|def| RiskCategory {
            key: def.key.to_string(),
            level: def.level,
            keywords: def.keywords.iter().map(|k| k.to_string()).collect(),
            label: def.label.to_string(),
            message: def.message.to_string(),
        })
        .collect(),
});

impl Taxonomy {
    /// The builtin taxonomy, materialized once per process.
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN_TAXONOMY
    }

    /// The builtin taxonomy with an extension file folded on top.
    pub fn with_extension(path: &Path) -> Result<Self> {
        let mut taxonomy = Self::builtin().clone();
        let file = TaxonomyFile::load(path)?;
        taxonomy
            .merge(file)
            .with_context(|| format!("Invalid taxonomy extension {}", path.display()))?;
        Ok(taxonomy)
    }

    /// Categories in tie-break order.
    pub fn categories(&self) -> &[RiskCategory] {
        &self.categories
    }

    pub fn get(&self, key: &str) -> Option<&RiskCategory> {
        self.categories.iter().find(|c| c.key == key)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of keywords across all categories.
    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }

    /// Fold an extension file onto this taxonomy.
    ///
    /// Existing keys get new keywords appended (duplicates skipped) and any
    /// provided level/label/message replaced. New keys are appended at the
    /// end, so they lose every tie-break against the categories already here.
    /// On error the taxonomy is left unchanged.
    pub fn merge(&mut self, file: TaxonomyFile) -> Result<()> {
        let mut merged = self.categories.clone();

        for patch in file.categories {
            let key = patch.key.trim().to_string();
            if key.is_empty() {
                anyhow::bail!("Taxonomy category with an empty key");
            }

            let keywords = patch
                .keywords
                .iter()
                .map(|k| normalize_keyword(&key, k))
                .collect::<Result<Vec<_>>>()?;

            if let Some(existing) = merged.iter_mut().find(|c| c.key == key) {
                for keyword in keywords {
                    if !existing.keywords.contains(&keyword) {
                        existing.keywords.push(keyword);
                    }
                }
                if let Some(level) = patch.level {
                    existing.level = level;
                }
                if let Some(label) = patch.label {
                    existing.label = non_empty_label(&key, label)?;
                }
                if let Some(message) = patch.message {
                    existing.message = message;
                }
                continue;
            }

            let (Some(level), Some(label)) = (patch.level, patch.label) else {
                anyhow::bail!("New taxonomy category '{key}' needs both a level and a label");
            };
            let mut deduped: Vec<String> = Vec::with_capacity(keywords.len());
            for keyword in keywords {
                if !deduped.contains(&keyword) {
                    deduped.push(keyword);
                }
            }

            merged.push(RiskCategory {
                label: non_empty_label(&key, label)?,
                key,
                level,
                keywords: deduped,
                message: patch.message.unwrap_or_default(),
            });
        }

        self.categories = merged;
        Ok(())
    }
}

/// On-disk taxonomy extension.
///
/// ```json
/// { "categories": [
///     { "key": "weapons", "keywords": ["armbrust"] },
///     { "key": "currency", "level": "warning", "label": "BARGELD",
///       "message": "Bargeld über 10.000 EUR ist anmeldepflichtig.",
///       "keywords": ["bargeld", "cash"] }
/// ] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyFile {
    #[serde(default)]
    pub categories: Vec<CategoryPatch>,
}

/// One entry of a taxonomy extension. Only `key` is required when the
/// category already exists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub key: String,
    #[serde(default)]
    pub level: Option<RiskLevel>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TaxonomyFile {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse taxonomy JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read taxonomy file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("In taxonomy file {}", path.display()))
    }
}

fn normalize_keyword(key: &str, raw: &str) -> Result<String> {
    let keyword = raw.trim().to_lowercase();
    if keyword.is_empty() {
        anyhow::bail!("Taxonomy category '{key}' has an empty keyword");
    }
    if keyword != raw {
        warn!(category = key, raw, normalized = %keyword, "Normalized taxonomy keyword");
    }
    Ok(keyword)
}

fn non_empty_label(key: &str, label: String) -> Result<String> {
    if label.trim().is_empty() {
        anyhow::bail!("Taxonomy category '{key}' has an empty label");
    }
    Ok(label)
}
