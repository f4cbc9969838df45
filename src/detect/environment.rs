//! Snapshot of the ambient state that detection signals read.
//!
//! Resolution is deterministic given a fixed `SignalEnvironment`; the
//! ambient constructor is the only place that touches process state.

/// Ambient inputs for language detection.
///
/// Every field is optional; a missing input simply makes the corresponding
/// signal a non-detection.
#[derive(Debug, Clone, Default)]
pub struct SignalEnvironment {
    /// Page/request URL examined for a language path segment or query parameter
    pub url: Option<String>,

    /// IANA timezone name (e.g., "America/Mexico_City")
    pub timezone: Option<String>,

    /// Ordered user-agent language list, most preferred first
    /// (e.g., ["es-MX", "en-US"])
    pub browser_languages: Vec<String>,

    /// Coarse (latitude, longitude) position, if geolocation is available
    pub coordinates: Option<(f64, f64)>,
}

impl SignalEnvironment {
    /// Build an environment from the process environment.
    ///
    /// Reads `TZ` for the timezone and `LANGUAGE`, `LANG`, `LC_ALL` (in that
    /// order) for the language list. `LANGUAGE` may hold several
    /// colon-separated entries; the others hold one.
    pub fn from_ambient() -> Self {
        Self {
            url: None,
            timezone: std::env::var("TZ").ok().filter(|tz| !tz.is_empty()),
            browser_languages: ambient_language_list(),
            coordinates: None,
        }
    }

    /// Set the URL input.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the timezone input.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    /// Set the user-agent language list.
    pub fn with_browser_languages(mut self, languages: Vec<String>) -> Self {
        self.browser_languages = languages;
        self
    }

    /// Set the coordinates input.
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some((latitude, longitude));
        self
    }
}

/// Read the ordered language list from `LANGUAGE`/`LANG`/`LC_ALL`.
fn ambient_language_list() -> Vec<String> {
    if let Ok(list) = std::env::var("LANGUAGE") {
        let entries: Vec<String> = list.split(':').filter_map(clean_locale_entry).collect();
        if !entries.is_empty() {
            return entries;
        }
    }

    for var in ["LANG", "LC_ALL"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(entry) = clean_locale_entry(&value) {
                return vec![entry];
            }
        }
    }

    Vec::new()
}

/// Strip the encoding suffix from a locale entry ("es_MX.UTF-8" -> "es_MX")
/// and drop entries that carry no language information.
fn clean_locale_entry(entry: &str) -> Option<String> {
    let cleaned = entry.split('.').next().unwrap_or("").trim();
    if cleaned.is_empty() || cleaned == "C" || cleaned == "POSIX" {
        None
    } else {
        Some(cleaned.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_locale_vars() {
        for var in ["TZ", "LANGUAGE", "LANG", "LC_ALL"] {
            std::env::remove_var(var);
        }
    }

    // ==================== clean_locale_entry Tests ====================

    #[test]
    fn test_clean_locale_entry_strips_encoding() {
        assert_eq!(
            clean_locale_entry("es_MX.UTF-8"),
            Some("es_MX".to_string())
        );
    }

    #[test]
    fn test_clean_locale_entry_plain() {
        assert_eq!(clean_locale_entry("en-US"), Some("en-US".to_string()));
    }

    #[test]
    fn test_clean_locale_entry_drops_posix() {
        assert_eq!(clean_locale_entry("C"), None);
        assert_eq!(clean_locale_entry("POSIX"), None);
        assert_eq!(clean_locale_entry(""), None);
        assert_eq!(clean_locale_entry("C.UTF-8"), None);
    }

    // ==================== from_ambient Tests ====================

    #[test]
    #[serial]
    fn test_from_ambient_reads_tz() {
        clear_locale_vars();
        std::env::set_var("TZ", "America/Mexico_City");

        let env = SignalEnvironment::from_ambient();
        assert_eq!(env.timezone.as_deref(), Some("America/Mexico_City"));

        clear_locale_vars();
    }

    #[test]
    #[serial]
    fn test_from_ambient_prefers_language_list() {
        clear_locale_vars();
        std::env::set_var("LANGUAGE", "es_MX:en_US");
        std::env::set_var("LANG", "de_DE.UTF-8");

        let env = SignalEnvironment::from_ambient();
        assert_eq!(
            env.browser_languages,
            vec!["es_MX".to_string(), "en_US".to_string()]
        );

        clear_locale_vars();
    }

    #[test]
    #[serial]
    fn test_from_ambient_falls_back_to_lang() {
        clear_locale_vars();
        std::env::set_var("LANG", "es_MX.UTF-8");

        let env = SignalEnvironment::from_ambient();
        assert_eq!(env.browser_languages, vec!["es_MX".to_string()]);

        clear_locale_vars();
    }

    #[test]
    #[serial]
    fn test_from_ambient_empty() {
        clear_locale_vars();

        let env = SignalEnvironment::from_ambient();
        assert!(env.timezone.is_none());
        assert!(env.browser_languages.is_empty());
        assert!(env.url.is_none());
        assert!(env.coordinates.is_none());

        clear_locale_vars();
    }

    // ==================== Builder Tests ====================

    #[test]
    fn test_builder_chain() {
        let env = SignalEnvironment::default()
            .with_url("https://example.com/es-MX/")
            .with_timezone("America/Cancun")
            .with_browser_languages(vec!["en".to_string()])
            .with_coordinates(19.4, -99.1);

        assert_eq!(env.url.as_deref(), Some("https://example.com/es-MX/"));
        assert_eq!(env.timezone.as_deref(), Some("America/Cancun"));
        assert_eq!(env.browser_languages, vec!["en".to_string()]);
        assert_eq!(env.coordinates, Some((19.4, -99.1)));
    }
}
