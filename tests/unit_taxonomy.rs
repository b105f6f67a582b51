// Unit tests for the risk taxonomy and extension files.
//
// Builtin contents and order, JSON extension parsing, merge semantics
// (append keywords, override fields, append new categories last), and
// validation failures.

use parcelguard::screening::taxonomy::{RiskLevel, Taxonomy, TaxonomyFile};

fn extended(json: &str) -> Taxonomy {
    let mut taxonomy = Taxonomy::builtin().clone();
    taxonomy.merge(TaxonomyFile::from_json(json).unwrap()).unwrap();
    taxonomy
}

// ============================================================
// Builtin table
// ============================================================

#[test]
fn builtin_has_five_categories() {
    assert_eq!(Taxonomy::builtin().len(), 5);
    assert!(!Taxonomy::builtin().is_empty());
}

#[test]
fn builtin_labels_and_levels() {
    let expected = [
        ("weapons", "WAFFEN", RiskLevel::Critical),
        ("hazmat", "GEFAHRGUT", RiskLevel::Critical),
        ("narcotics", "BETÄUBUNGSMITTEL", RiskLevel::Critical),
        ("medication", "MEDIKAMENTE", RiskLevel::Warning),
        ("protected", "ARTENSCHUTZ", RiskLevel::Critical),
    ];
    let categories = Taxonomy::builtin().categories();
    for (category, (key, label, level)) in categories.iter().zip(expected) {
        assert_eq!(category.key, key);
        assert_eq!(category.label, label);
        assert_eq!(category.level, level);
        assert!(!category.message.is_empty());
        assert!(!category.keywords.is_empty());
    }
}

#[test]
fn builtin_keyword_samples() {
    let taxonomy = Taxonomy::builtin();
    let weapons = taxonomy.get("weapons").unwrap();
    assert_eq!(weapons.keywords.first().map(String::as_str), Some("waffe"));
    assert!(weapons.keywords.iter().any(|k| k == "c4"));
    assert!(taxonomy.get("hazmat").unwrap().keywords.iter().any(|k| k == "säure"));
    assert!(taxonomy.get("nope").is_none());
}

#[test]
fn builtin_keyword_count() {
    // 24 + 22 + 23 + 19 + 12
    assert_eq!(Taxonomy::builtin().keyword_count(), 100);
}

#[test]
fn builtin_is_shared() {
    assert!(std::ptr::eq(Taxonomy::builtin(), Taxonomy::builtin()));
}

// ============================================================
// Extension merge
// ============================================================

#[test]
fn extension_appends_keywords_to_existing_category() {
    let taxonomy = extended(r#"{"categories": [{"key": "weapons", "keywords": ["armbrust"]}]}"#);
    assert_eq!(taxonomy.len(), 5);
    let weapons = taxonomy.get("weapons").unwrap();
    assert_eq!(weapons.keywords.last().map(String::as_str), Some("armbrust"));
    assert_eq!(weapons.label, "WAFFEN");

    let result = taxonomy.analyze("Armbrust");
    assert!(result.found);
    assert_eq!(result.category, "WAFFEN");
}

#[test]
fn extension_skips_duplicate_keywords() {
    let taxonomy = extended(r#"{"categories": [{"key": "weapons", "keywords": ["gun", "gun"]}]}"#);
    assert_eq!(
        taxonomy.keyword_count(),
        Taxonomy::builtin().keyword_count()
    );
}

#[test]
fn extension_overrides_level_and_message() {
    let taxonomy = extended(
        r#"{"categories": [{"key": "medication", "level": "critical",
            "message": "Nur mit Rezept."}]}"#,
    );
    let medication = taxonomy.get("medication").unwrap();
    assert_eq!(medication.level, RiskLevel::Critical);
    assert_eq!(medication.message, "Nur mit Rezept.");
    assert_eq!(medication.label, "MEDIKAMENTE");
}

#[test]
fn extension_appends_new_category_last() {
    let taxonomy = extended(
        r#"{"categories": [{"key": "currency", "level": "info", "label": "BARGELD",
            "message": "Anmeldepflichtig.", "keywords": ["bargeld"]}]}"#,
    );
    assert_eq!(taxonomy.len(), 6);
    assert_eq!(taxonomy.categories()[5].key, "currency");

    let result = taxonomy.analyze("Umschlag mit Bargeld");
    assert_eq!(result.category, "BARGELD");
    assert_eq!(result.level, Some(RiskLevel::Info));

    // Builtin categories still win the tie-break
    assert_eq!(taxonomy.analyze("Bargeld Pistole").category, "WAFFEN");
}

#[test]
fn extension_normalizes_keywords() {
    let taxonomy = extended(r#"{"categories": [{"key": "weapons", "keywords": ["  ArmBrust "]}]}"#);
    assert!(taxonomy
        .get("weapons")
        .unwrap()
        .keywords
        .iter()
        .any(|k| k == "armbrust"));
}

#[test]
fn empty_file_changes_nothing() {
    let taxonomy = extended("{}");
    assert_eq!(&taxonomy, Taxonomy::builtin());
}

// ============================================================
// Validation
// ============================================================

fn merge_err(json: &str) -> bool {
    let mut taxonomy = Taxonomy::builtin().clone();
    match TaxonomyFile::from_json(json) {
        Ok(file) => taxonomy.merge(file).is_err(),
        Err(_) => true,
    }
}

#[test]
fn rejects_empty_key() {
    assert!(merge_err(r#"{"categories": [{"key": " ", "keywords": ["x"]}]}"#));
}

#[test]
fn rejects_empty_keyword() {
    assert!(merge_err(r#"{"categories": [{"key": "weapons", "keywords": [" "]}]}"#));
}

#[test]
fn rejects_new_category_without_label() {
    assert!(merge_err(r#"{"categories": [{"key": "currency", "level": "info", "keywords": ["cash"]}]}"#));
}

#[test]
fn rejects_empty_label() {
    assert!(merge_err(r#"{"categories": [{"key": "weapons", "label": ""}]}"#));
}

#[test]
fn rejects_unknown_level() {
    assert!(merge_err(r#"{"categories": [{"key": "weapons", "level": "severe"}]}"#));
}

#[test]
fn rejects_malformed_json() {
    assert!(TaxonomyFile::from_json("{ not json").is_err());
}

#[test]
fn load_reports_missing_file() {
    let err = TaxonomyFile::load(std::path::Path::new("/nonexistent/taxonomy.json")).unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/taxonomy.json"));
}
