//! Language type: flexible, validated language representation.
//!
//! `Language` is a thin `Copy` wrapper around a registry tag. It can only be
//! constructed for supported, enabled languages, so holding a `Language`
//! is proof the tag is in the supported set.

use crate::language::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// BCP-47-style tag (e.g., "en", "es-MX")
    tag: &'static str,
}

impl Language {
    /// English, the default and fallback language.
    pub const ENGLISH: Language = Language { tag: "en" };

    /// Mexican Spanish.
    pub const SPANISH_MX: Language = Language { tag: "es-MX" };

    /// Create a Language from a tag string.
    ///
    /// Matching is exact first, then by base subtag ("es" resolves to
    /// "es-MX" when no exact "es" entry exists).
    ///
    /// # Returns
    /// * `Ok(Language)` if the tag resolves to an enabled language
    /// * `Err` if the tag is unknown or the language is disabled
    pub fn from_tag(tag: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        if let Some(config) = registry.get_by_tag(tag) {
            if config.enabled {
                return Ok(Language { tag: config.tag });
            }
            bail!("Language '{}' is not enabled", tag);
        }

        let (base, _region) = split_tag(tag);
        match registry.get_by_base(&base) {
            Some(config) => Ok(Language { tag: config.tag }),
            None => bail!("Unknown language tag: '{}'", tag),
        }
    }

    /// Get the default language.
    pub fn default_language() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { tag: config.tag }
    }

    /// Get the fallback language used when a dictionary or key is missing.
    ///
    /// Coincides with the default language in this deployment.
    pub fn fallback() -> Language {
        Self::default_language()
    }

    /// Get the language tag.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the tag is not found in the registry. This should never
    /// happen if the Language was constructed properly (via `from_tag` or
    /// constants).
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_tag(self.tag)
            .expect("Language tag should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the default language.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag)
    }
}

/// Split a tag into a lowercased base subtag and an optional uppercased
/// region (e.g., "es_mx" -> ("es", Some("MX"))). Accepts both "-" and "_"
/// separators and ignores trailing subtags beyond the region.
pub fn split_tag(tag: &str) -> (String, Option<String>) {
    let mut parts = tag.split(['-', '_']);
    let base = parts.next().unwrap_or("").to_ascii_lowercase();
    let region = parts
        .next()
        .filter(|r| !r.is_empty())
        .map(|r| r.to_ascii_uppercase());
    (base, region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Constant Tests ====================

    #[test]
    fn test_english_constant() {
        let english = Language::ENGLISH;
        assert_eq!(english.tag(), "en");
        assert_eq!(english.name(), "English");
        assert!(english.is_default());
    }

    #[test]
    fn test_spanish_mx_constant() {
        let spanish = Language::SPANISH_MX;
        assert_eq!(spanish.tag(), "es-MX");
        assert_eq!(spanish.name(), "Spanish (Mexico)");
        assert!(!spanish.is_default());
    }

    // ==================== from_tag Tests ====================

    #[test]
    fn test_from_tag_exact() {
        let language = Language::from_tag("es-MX").expect("Should succeed");
        assert_eq!(language, Language::SPANISH_MX);
    }

    #[test]
    fn test_from_tag_base_match() {
        // Bare "es" resolves to the regioned supported entry
        let language = Language::from_tag("es").expect("Should succeed");
        assert_eq!(language.tag(), "es-MX");
    }

    #[test]
    fn test_from_tag_underscore_separator() {
        let language = Language::from_tag("es_MX").expect("Should succeed");
        assert_eq!(language.tag(), "es-MX");
    }

    #[test]
    fn test_from_tag_disabled() {
        let result = Language::from_tag("pt-BR");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not enabled"));
    }

    #[test]
    fn test_from_tag_unknown() {
        let result = Language::from_tag("fr");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unknown"));
    }

    #[test]
    fn test_from_tag_empty() {
        assert!(Language::from_tag("").is_err());
    }

    // ==================== Default/Fallback Tests ====================

    #[test]
    fn test_default_language_is_english() {
        assert_eq!(Language::default_language(), Language::ENGLISH);
    }

    #[test]
    fn test_fallback_coincides_with_default() {
        assert_eq!(Language::fallback(), Language::default_language());
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_language_equality() {
        let lang1 = Language::ENGLISH;
        let lang2 = Language::from_tag("en").unwrap();
        assert_eq!(lang1, lang2);
        assert_ne!(Language::ENGLISH, Language::SPANISH_MX);
    }

    #[test]
    fn test_language_copy() {
        let lang1 = Language::SPANISH_MX;
        let lang2 = lang1; // Copy
        assert_eq!(lang1, lang2); // Both still valid
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::SPANISH_MX.to_string(), "es-MX");
    }

    #[test]
    fn test_native_name() {
        assert_eq!(Language::SPANISH_MX.native_name(), "Español (México)");
    }

    // ==================== split_tag Tests ====================

    #[test]
    fn test_split_tag_base_only() {
        assert_eq!(split_tag("en"), ("en".to_string(), None));
    }

    #[test]
    fn test_split_tag_with_region() {
        assert_eq!(
            split_tag("es-MX"),
            ("es".to_string(), Some("MX".to_string()))
        );
    }

    #[test]
    fn test_split_tag_normalizes_case() {
        assert_eq!(
            split_tag("ES_mx"),
            ("es".to_string(), Some("MX".to_string()))
        );
    }

    #[test]
    fn test_split_tag_ignores_extra_subtags() {
        assert_eq!(
            split_tag("zh-Hant-TW"),
            ("zh".to_string(), Some("HANT".to_string()))
        );
    }

    #[test]
    fn test_split_tag_empty() {
        assert_eq!(split_tag(""), ("".to_string(), None));
    }

    proptest! {
        #[test]
        fn prop_split_tag_never_panics(tag in ".*") {
            let _ = split_tag(&tag);
        }

        #[test]
        fn prop_split_tag_base_is_lowercase(tag in "[a-zA-Z]{1,8}(-[a-zA-Z]{1,8})?") {
            let (base, _) = split_tag(&tag);
            prop_assert_eq!(base.clone(), base.to_ascii_lowercase());
        }
    }
}
