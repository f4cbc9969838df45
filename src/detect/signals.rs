//! Individual detection signal sources.
//!
//! Each source inspects one slice of the environment and produces a
//! `DetectionSignal`. Sources never mutate anything; failures are returned
//! as errors and demoted to non-detections by the resolver.

use crate::detect::PreferenceStore;
use crate::language::{split_tag, Language, LanguageRegistry};
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

/// Mexican IANA timezones mapped to es-MX by the timezone signal.
const MEXICO_TIMEZONES: &[&str] = &[
    "America/Mexico_City",
    "America/Cancun",
    "America/Merida",
    "America/Monterrey",
    "America/Matamoros",
    "America/Chihuahua",
    "America/Ojinaga",
    "America/Hermosillo",
    "America/Mazatlan",
    "America/Bahia_Banderas",
    "America/Tijuana",
];

/// Coarse bounding box for Mexico used by the optional geolocation signal.
/// Heuristic only; a position inside the box maps to es-MX.
const MEXICO_LAT_RANGE: (f64, f64) = (14.0, 33.0);
const MEXICO_LON_RANGE: (f64, f64) = (-118.5, -86.0);

/// Query parameter names that may carry a language tag.
const URL_QUERY_KEYS: &[&str] = &["lang", "language", "locale"];

/// One source of evidence about the user's preferred language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalSource {
    Manual,
    Url,
    Stored,
    Timezone,
    Browser,
    Geolocation,
}

impl SignalSource {
    /// Stable label used as the detection method name and in the persisted
    /// preference record.
    pub fn label(&self) -> &'static str {
        match self {
            SignalSource::Manual => "manual",
            SignalSource::Url => "url",
            SignalSource::Stored => "stored",
            SignalSource::Timezone => "timezone",
            SignalSource::Browser => "browser",
            SignalSource::Geolocation => "geolocation",
        }
    }

    /// Selection priority; higher wins. Ties cannot occur between distinct
    /// sources.
    pub fn priority(&self) -> u8 {
        match self {
            SignalSource::Manual => 60,
            SignalSource::Url => 50,
            SignalSource::Stored => 40,
            SignalSource::Timezone => 30,
            SignalSource::Browser => 20,
            SignalSource::Geolocation => 10,
        }
    }
}

/// One observation produced by a signal source.
#[derive(Debug, Clone)]
pub struct DetectionSignal {
    pub source: SignalSource,
    pub language: Option<Language>,
    pub detected: bool,
    pub confidence: f64,
    pub priority: u8,
}

impl DetectionSignal {
    fn hit(source: SignalSource, language: Language, confidence: f64) -> Self {
        Self {
            source,
            language: Some(language),
            detected: true,
            confidence,
            priority: source.priority(),
        }
    }

    pub(crate) fn miss(source: SignalSource) -> Self {
        Self {
            source,
            language: None,
            detected: false,
            confidence: 0.0,
            priority: source.priority(),
        }
    }
}

/// Explicit caller-provided override. An unsupported tag is rejected with a
/// warning so lower-priority signals can decide.
pub fn evaluate_manual(override_tag: Option<&str>) -> Result<DetectionSignal> {
    let Some(tag) = override_tag else {
        return Ok(DetectionSignal::miss(SignalSource::Manual));
    };

    match Language::from_tag(tag) {
        Ok(language) => Ok(DetectionSignal::hit(SignalSource::Manual, language, 1.0)),
        Err(e) => {
            warn!("Manual language override '{}' rejected: {}", tag, e);
            Ok(DetectionSignal::miss(SignalSource::Manual))
        }
    }
}

/// URL signal: a leading path segment matching a supported tag, or a
/// `lang`/`language`/`locale` query parameter carrying one.
pub fn evaluate_url(url: Option<&str>) -> Result<DetectionSignal> {
    let Some(raw) = url else {
        return Ok(DetectionSignal::miss(SignalSource::Url));
    };

    let parsed = reqwest::Url::parse(raw).with_context(|| format!("Invalid URL '{}'", raw))?;

    if let Some(segment) = parsed
        .path_segments()
        .and_then(|mut segments| segments.next())
        .filter(|s| !s.is_empty())
    {
        if let Ok(language) = Language::from_tag(segment) {
            return Ok(DetectionSignal::hit(SignalSource::Url, language, 1.0));
        }
    }

    for (key, value) in parsed.query_pairs() {
        if URL_QUERY_KEYS.contains(&key.as_ref()) {
            match Language::from_tag(&value) {
                Ok(language) => {
                    return Ok(DetectionSignal::hit(SignalSource::Url, language, 1.0));
                }
                Err(e) => {
                    debug!("URL parameter {}={} not usable: {}", key, value, e);
                }
            }
        }
    }

    Ok(DetectionSignal::miss(SignalSource::Url))
}

/// Stored-preference signal. Only a record younger than `window` counts;
/// stale records fall through so fresh inference can win.
pub fn evaluate_stored(
    preferences: &PreferenceStore,
    window: Duration,
    now: DateTime<Utc>,
) -> Result<DetectionSignal> {
    let Some(preference) = preferences.load()? else {
        return Ok(DetectionSignal::miss(SignalSource::Stored));
    };

    if !preference.is_fresh(window, now) {
        debug!(
            "Stored preference '{}' from {} is stale, ignoring",
            preference.language, preference.timestamp
        );
        return Ok(DetectionSignal::miss(SignalSource::Stored));
    }

    match Language::from_tag(&preference.language) {
        Ok(language) => Ok(DetectionSignal::hit(SignalSource::Stored, language, 0.95)),
        Err(e) => {
            warn!(
                "Stored preference holds unsupported tag '{}': {}",
                preference.language, e
            );
            Ok(DetectionSignal::miss(SignalSource::Stored))
        }
    }
}

/// Timezone signal: a known Mexican zone maps to es-MX, anything else is a
/// non-detection.
pub fn evaluate_timezone(timezone: Option<&str>) -> Result<DetectionSignal> {
    let Some(tz) = timezone else {
        return Ok(DetectionSignal::miss(SignalSource::Timezone));
    };

    if MEXICO_TIMEZONES.contains(&tz) {
        return Ok(DetectionSignal::hit(
            SignalSource::Timezone,
            Language::SPANISH_MX,
            0.75,
        ));
    }

    Ok(DetectionSignal::miss(SignalSource::Timezone))
}

/// Browser-language signal: exact supported-tag match anywhere in the
/// ordered list wins over a base-language match; within each pass the first
/// list entry wins.
pub fn evaluate_browser(languages: &[String]) -> Result<DetectionSignal> {
    let registry = LanguageRegistry::get();

    // Pass 1: exact tag match (region included)
    for raw in languages {
        let (base, region) = split_tag(raw);
        let candidate = match &region {
            Some(region) => format!("{}-{}", base, region),
            None => base.clone(),
        };
        if registry.is_enabled(&candidate) {
            let language = Language::from_tag(&candidate)?;
            return Ok(DetectionSignal::hit(SignalSource::Browser, language, 0.85));
        }
    }

    // Pass 2: base-language match ("es" -> "es-MX")
    for raw in languages {
        let (base, _region) = split_tag(raw);
        if let Some(config) = registry.get_by_base(&base) {
            let language = Language::from_tag(config.tag)?;
            return Ok(DetectionSignal::hit(SignalSource::Browser, language, 0.65));
        }
    }

    Ok(DetectionSignal::miss(SignalSource::Browser))
}

/// Geolocation signal: coarse country bounding box, disabled by default at
/// the resolver level.
pub fn evaluate_geolocation(coordinates: Option<(f64, f64)>) -> Result<DetectionSignal> {
    let Some((latitude, longitude)) = coordinates else {
        return Ok(DetectionSignal::miss(SignalSource::Geolocation));
    };

    let (lat_min, lat_max) = MEXICO_LAT_RANGE;
    let (lon_min, lon_max) = MEXICO_LON_RANGE;

    if (lat_min..=lat_max).contains(&latitude) && (lon_min..=lon_max).contains(&longitude) {
        return Ok(DetectionSignal::hit(
            SignalSource::Geolocation,
            Language::SPANISH_MX,
            0.5,
        ));
    }

    Ok(DetectionSignal::miss(SignalSource::Geolocation))
}
