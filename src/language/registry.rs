//! Language registry: single source of truth for all supported languages.
//!
//! The registry is initialized once behind an `OnceLock` and is immutable
//! afterwards. All mutable i18n state (active language, caches) lives on the
//! `TranslationStore` instance instead.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// BCP-47-style tag (e.g., "en", "es-MX")
    pub tag: &'static str,

    /// English name of the language (e.g., "English", "Spanish (Mexico)")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Español (México)")
    pub native_name: &'static str,

    /// Whether this is the default language. Exactly one entry has this set;
    /// it doubles as the fallback language for translation misses.
    pub is_default: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its exact tag.
    pub fn get_by_tag(&self, tag: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.tag == tag)
    }

    /// Get the first enabled language whose base subtag matches `base`
    /// (e.g., "es" matches "es-MX").
    pub fn get_by_base(&self, base: &str) -> Option<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).find(|lang| {
            lang.tag
                .split(['-', '_'])
                .next()
                .map(|b| b.eq_ignore_ascii_case(base))
                .unwrap_or(false)
        })
    }

    /// Get all enabled languages.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get all languages (including disabled ones).
    pub fn list_all(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().collect()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if no default language is found or if multiple defaults are
    /// defined (this indicates a configuration error).
    pub fn default_language(&self) -> &LanguageConfig {
        let defaults: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default language found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default languages found in registry"),
        }
    }

    /// Check if a tag is supported and enabled.
    pub fn is_enabled(&self, tag: &str) -> bool {
        self.get_by_tag(tag)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }
}

/// Default language configurations.
///
/// English is the default (and fallback) language; Mexican Spanish is the
/// translated variant. Brazilian Portuguese is registered but not yet
/// enabled.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            tag: "en",
            name: "English",
            native_name: "English",
            is_default: true,
            enabled: true,
        },
        LanguageConfig {
            tag: "es-MX",
            name: "Spanish (Mexico)",
            native_name: "Español (México)",
            is_default: false,
            enabled: true,
        },
        LanguageConfig {
            tag: "pt-BR",
            name: "Portuguese (Brazil)",
            native_name: "Português (Brasil)",
            is_default: false,
            enabled: false,
        },
    ]
}
