//! Locale completeness validation.
//!
//! Compares a translated dictionary against the reference (default-language)
//! dictionary: keys the translation lacks will render via fallback, keys the
//! reference lacks are dead weight, and placeholder mismatches break
//! interpolation at runtime.

use crate::store::Dictionary;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a locale file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that will produce wrong output at runtime
    pub errors: Vec<String>,

    /// Gaps that degrade gracefully (fallback rendering, unused keys)
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for translated dictionaries.
pub struct DictionaryValidator;

// Placeholder extraction pattern (cached for reuse across keys)
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl DictionaryValidator {
    /// Compare `translated` against `reference`.
    ///
    /// - keys present in the reference but missing from the translation are
    ///   warnings (they render through the fallback dictionary);
    /// - keys present only in the translation are warnings (never used);
    /// - `{{placeholder}}` set mismatches on shared keys are errors.
    pub fn compare(reference: &Dictionary, translated: &Dictionary) -> ValidationReport {
        let mut report = ValidationReport::new();

        let reference_keys: BTreeSet<String> = reference.leaf_keys().into_iter().collect();
        let translated_keys: BTreeSet<String> = translated.leaf_keys().into_iter().collect();

        for key in reference_keys.difference(&translated_keys) {
            report
                .warnings
                .push(format!("Missing translation for '{}'", key));
        }

        for key in translated_keys.difference(&reference_keys) {
            report
                .warnings
                .push(format!("Translation key '{}' has no reference entry", key));
        }

        for key in reference_keys.intersection(&translated_keys) {
            let reference_text = reference.resolve(key).unwrap_or_default();
            let translated_text = translated.resolve(key).unwrap_or_default();

            let reference_params = Self::extract_placeholders(reference_text);
            let translated_params = Self::extract_placeholders(translated_text);

            if reference_params != translated_params {
                report.errors.push(format!(
                    "Placeholder mismatch at '{}': reference has {:?}, translation has {:?}",
                    key, reference_params, translated_params
                ));
            }
        }

        report
    }

    /// Extract the set of `{{placeholder}}` names in a string.
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX
            .get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap());

        regex
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dictionary(value: serde_json::Value) -> Dictionary {
        Dictionary::from_value(value).expect("valid dictionary")
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_new_is_clean() {
        let report = ValidationReport::new();
        assert!(report.is_clean());
        assert!(!report.has_errors());
        assert!(!report.has_warnings());
    }

    // ==================== Key Comparison Tests ====================

    #[test]
    fn test_identical_dictionaries_are_clean() {
        let reference = dictionary(json!({"nav": {"home": "Home"}, "title": "Welcome"}));
        let translated = dictionary(json!({"nav": {"home": "Inicio"}, "title": "Bienvenido"}));

        let report = DictionaryValidator::compare(&reference, &translated);
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_translation_key_warns() {
        let reference = dictionary(json!({"nav": {"home": "Home", "about": "About"}}));
        let translated = dictionary(json!({"nav": {"home": "Inicio"}}));

        let report = DictionaryValidator::compare(&reference, &translated);
        assert!(!report.has_errors());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("nav.about"));
    }

    #[test]
    fn test_extra_translation_key_warns() {
        let reference = dictionary(json!({"title": "Welcome"}));
        let translated = dictionary(json!({"title": "Bienvenido", "old": {"key": "Viejo"}}));

        let report = DictionaryValidator::compare(&reference, &translated);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("old.key"));
        assert!(report.warnings[0].contains("no reference entry"));
    }

    // ==================== Placeholder Tests ====================

    #[test]
    fn test_matching_placeholders_are_clean() {
        let reference = dictionary(json!({"greeting": "Hello {{name}}"}));
        let translated = dictionary(json!({"greeting": "Hola {{name}}"}));

        let report = DictionaryValidator::compare(&reference, &translated);
        assert!(report.is_clean());
    }

    #[test]
    fn test_dropped_placeholder_is_error() {
        let reference = dictionary(json!({"greeting": "Hello {{name}}"}));
        let translated = dictionary(json!({"greeting": "Hola"}));

        let report = DictionaryValidator::compare(&reference, &translated);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("greeting"));
        assert!(report.errors[0].contains("name"));
    }

    #[test]
    fn test_renamed_placeholder_is_error() {
        let reference = dictionary(json!({"footer": "© {{year}} {{company}}"}));
        let translated = dictionary(json!({"footer": "© {{year}} {{empresa}}"}));

        let report = DictionaryValidator::compare(&reference, &translated);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("footer"));
    }

    #[test]
    fn test_placeholder_order_does_not_matter() {
        let reference = dictionary(json!({"line": "{{a}} then {{b}}"}));
        let translated = dictionary(json!({"line": "{{b}} luego {{a}}"}));

        let report = DictionaryValidator::compare(&reference, &translated);
        assert!(report.is_clean());
    }

    #[test]
    fn test_extract_placeholders() {
        let set = DictionaryValidator::extract_placeholders("{{a}}, {{ b }} and {{a}}");
        let expected: BTreeSet<String> = ["a", "b"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_extract_placeholders_empty() {
        assert!(DictionaryValidator::extract_placeholders("plain text").is_empty());
    }

    // ==================== Combined Tests ====================

    #[test]
    fn test_mixed_report() {
        let reference = dictionary(json!({
            "greeting": "Hello {{name}}",
            "missing": "Only here"
        }));
        let translated = dictionary(json!({
            "greeting": "Hola",
            "extra": "Sobra"
        }));

        let report = DictionaryValidator::compare(&reference, &translated);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 2);
    }
}
