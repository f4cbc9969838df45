//! Language detection: ordered signal evaluation and resolution.
//!
//! `LanguageResolver` fuses independent detection signals into one supported
//! language. Signals are evaluated in a fixed order (manual, url, stored,
//! timezone, browser, geolocation); among those that detect something, the
//! highest priority wins. The winning choice is persisted so the next
//! resolution is stable across restarts.
//!
//! A failing signal source never aborts resolution: its error is logged and
//! the source is treated as a non-detection.

mod environment;
mod preference;
mod signals;

pub use environment::SignalEnvironment;
pub use preference::{PreferenceStore, StoredPreference};
pub use signals::{
    evaluate_browser, evaluate_geolocation, evaluate_manual, evaluate_stored, evaluate_timezone,
    evaluate_url, DetectionSignal, SignalSource,
};

use crate::language::Language;
use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::{info, warn};

/// Which sources participate in a resolution pass, plus their inputs.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub enable_url: bool,
    pub enable_stored: bool,
    pub enable_timezone: bool,
    pub enable_browser: bool,
    /// Heuristic source, off unless explicitly enabled
    pub enable_geolocation: bool,

    /// Explicit user choice; outranks every other signal when supported
    pub manual_override: Option<String>,

    /// Maximum age of a stored preference before it is ignored
    pub recency_window: Duration,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            enable_url: true,
            enable_stored: true,
            enable_timezone: true,
            enable_browser: true,
            enable_geolocation: false,
            manual_override: None,
            recency_window: Duration::days(30),
        }
    }
}

/// Outcome of one resolution pass. Immutable after construction.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// The chosen language; always a member of the supported set
    pub language: Language,

    /// Label of the winning source, or "default" when nothing detected
    pub method: &'static str,

    /// Confidence of the winning signal
    pub confidence: f64,

    /// Every evaluated signal, in evaluation order
    pub signals: Vec<DetectionSignal>,
}

/// Fuses detection signals into a single supported language.
pub struct LanguageResolver {
    preferences: PreferenceStore,
    options: ResolveOptions,
}

impl LanguageResolver {
    pub fn new(preferences: PreferenceStore, options: ResolveOptions) -> Self {
        Self {
            preferences,
            options,
        }
    }

    /// Access the preference store backing the stored signal.
    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    /// Run one resolution pass against the given environment snapshot.
    ///
    /// Always returns a valid result; individual signal failures degrade to
    /// non-detections. As a side effect the winning choice is persisted
    /// (best-effort) for the stored signal of future passes.
    pub fn resolve(&self, env: &SignalEnvironment) -> DetectionResult {
        let now = Utc::now();
        let mut evaluated: Vec<DetectionSignal> = Vec::new();

        evaluated.push(guarded(
            SignalSource::Manual,
            evaluate_manual(self.options.manual_override.as_deref()),
        ));
        if self.options.enable_url {
            evaluated.push(guarded(SignalSource::Url, evaluate_url(env.url.as_deref())));
        }
        if self.options.enable_stored {
            evaluated.push(guarded(
                SignalSource::Stored,
                evaluate_stored(&self.preferences, self.options.recency_window, now),
            ));
        }
        if self.options.enable_timezone {
            evaluated.push(guarded(
                SignalSource::Timezone,
                evaluate_timezone(env.timezone.as_deref()),
            ));
        }
        if self.options.enable_browser {
            evaluated.push(guarded(
                SignalSource::Browser,
                evaluate_browser(&env.browser_languages),
            ));
        }
        if self.options.enable_geolocation {
            evaluated.push(guarded(
                SignalSource::Geolocation,
                evaluate_geolocation(env.coordinates),
            ));
        }

        // Highest priority among detections wins; on equal priority the
        // earliest-evaluated signal is kept.
        let mut winner: Option<(Language, &'static str, f64, u8)> = None;
        for signal in &evaluated {
            if let (true, Some(language)) = (signal.detected, signal.language) {
                let outranked = winner.map_or(true, |(_, _, _, best)| signal.priority > best);
                if outranked {
                    winner = Some((
                        language,
                        signal.source.label(),
                        signal.confidence,
                        signal.priority,
                    ));
                }
            }
        }

        let (language, method, confidence) =
            winner.map_or((Language::default_language(), "default", 0.2), |w| {
                (w.0, w.1, w.2)
            });

        let result = DetectionResult {
            language,
            method,
            confidence,
            signals: evaluated,
        };

        info!(
            "Resolved language '{}' via {} (confidence {:.2})",
            result.language, result.method, result.confidence
        );

        // Persist the winner unconditionally so both manual and automatic
        // choices survive restarts. Persistence failure is not fatal.
        let record = StoredPreference::new(result.language, result.method);
        if let Err(e) = self.preferences.save(&record) {
            warn!("Failed to persist language preference: {:#}", e);
        }

        result
    }
}

/// Demote a failed signal evaluation to a non-detection for that source.
fn guarded(source: SignalSource, outcome: Result<DetectionSignal>) -> DetectionSignal {
    match outcome {
        Ok(signal) => signal,
        Err(e) => {
            warn!("{} signal failed, treating as no detection: {:#}", source.label(), e);
            DetectionSignal::miss(source)
        }
    }
}
