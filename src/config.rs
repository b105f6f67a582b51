use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default location for the Markdown screening report.
pub const DEFAULT_REPORT_PATH: &str = "output/parcelguard-report.md";

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Nothing
/// here is required; the builtin taxonomy works without any configuration.
pub struct Config {
    /// Optional JSON file that extends the builtin taxonomy (PARCELGUARD_TAXONOMY)
    pub taxonomy_path: Option<PathBuf>,
    /// Where `report` writes unless --output is given (PARCELGUARD_REPORT_PATH)
    pub report_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let taxonomy_path = env::var("PARCELGUARD_TAXONOMY")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            taxonomy_path,
            report_path: env::var("PARCELGUARD_REPORT_PATH")
                .unwrap_or_else(|_| DEFAULT_REPORT_PATH.to_string()),
        })
    }

    /// Check that a configured taxonomy extension actually exists.
    /// Call this before building the screener so a typo in the path fails
    /// loudly instead of silently screening with the builtin table only.
    pub fn require_taxonomy_file(&self) -> Result<()> {
        if let Some(path) = &self.taxonomy_path {
            if !path.is_file() {
                anyhow::bail!(
                    "PARCELGUARD_TAXONOMY points at {}, which does not exist.\n\
                     Fix the path in your .env file or unset the variable to use the builtin taxonomy.",
                    path.display()
                );
            }
        }
        Ok(())
    }
}
