//! Translation store: dictionary loading, caching, lookup, and change
//! notification.
//!
//! The store owns all mutable i18n state for its lifetime: the active
//! language, the per-language dictionary cache, and the in-flight fetch map.
//! It computes strings and publishes events; applying them to any rendering
//! surface is the consumer's job.
//!
//! Concurrent loads for one language collapse into a single fetch. Racing
//! `set_language` calls resolve to "last call to finish wins": each call
//! re-checks the active pointer after its load completes, and a call that
//! finds its language already installed emits no duplicate event.

mod dictionary;
mod events;
mod metrics;
mod validator;

pub use dictionary::{interpolate, Dictionary, Node};
pub use events::LanguageEvent;
pub use metrics::{DictionaryMetrics, MetricsReport};
pub use validator::{DictionaryValidator, ValidationReport};

use crate::error::TranslationError;
use crate::language::Language;
use crate::retry::{with_retry_if, RetryConfig};
use futures::future::{join_all, BoxFuture, Shared};
use futures::FutureExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// In-flight dictionary load, shareable between concurrent callers.
type SharedLoad = Shared<BoxFuture<'static, Result<Arc<Dictionary>, TranslationError>>>;

/// Failure modes of one fetch attempt.
#[derive(Debug, Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("invalid dictionary: {0}")]
    Parse(String),
}

impl FetchError {
    /// 429 and 5xx are transient, as are network and parse failures. Other
    /// statuses (a missing dictionary file in particular) fail immediately.
    fn is_retryable(&self) -> bool {
        match self {
            FetchError::Status(status) => *status == 429 || *status >= 500,
            FetchError::Network(_) => true,
            FetchError::Parse(_) => true,
        }
    }
}

/// Loads, caches, and serves translation dictionaries for one site.
pub struct TranslationStore {
    client: reqwest::Client,
    base_url: String,
    fallback: Language,
    active: RwLock<Language>,
    cache: RwLock<HashMap<Language, Arc<Dictionary>>>,
    pending: Mutex<HashMap<Language, SharedLoad>>,
    events: broadcast::Sender<LanguageEvent>,
    metrics: Arc<DictionaryMetrics>,
}

impl TranslationStore {
    /// Create a store fetching dictionaries from `{base_url}/{tag}.json`.
    ///
    /// The store starts with the fallback language active and no
    /// dictionaries loaded; call [`init`](Self::init) with a resolved
    /// language to make it useful.
    pub fn new(base_url: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fallback: Language::fallback(),
            active: RwLock::new(Language::fallback()),
            cache: RwLock::new(HashMap::new()),
            pending: Mutex::new(HashMap::new()),
            events,
            metrics: Arc::new(DictionaryMetrics::new()),
        }
    }

    /// The currently active language.
    pub fn active_language(&self) -> Language {
        *self.active.read().expect("active lock poisoned")
    }

    /// The language substituted on load failures and translation misses.
    pub fn fallback_language(&self) -> Language {
        self.fallback
    }

    /// Cache and fetch counters for this store.
    pub fn metrics(&self) -> &DictionaryMetrics {
        &self.metrics
    }

    /// Subscribe to [`LanguageEvent`] notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageEvent> {
        self.events.subscribe()
    }

    /// Load the initial dictionary and publish `Ready`.
    pub async fn init(&self, language: Language) -> Result<(), TranslationError> {
        self.load(language).await?;
        *self.active.write().expect("active lock poisoned") = language;

        info!("Translation store ready in '{}'", language);
        let _ = self.events.send(LanguageEvent::Ready { language });
        Ok(())
    }

    /// Fetch and cache the dictionary for `language`, reusing the cache and
    /// joining any in-flight fetch for the same language.
    ///
    /// On a failed fetch the cached fallback dictionary is substituted when
    /// present; only with no fallback available does the error propagate.
    pub async fn load(&self, language: Language) -> Result<Arc<Dictionary>, TranslationError> {
        if let Some(dictionary) = self.cached(language) {
            self.metrics.record_cache_hit();
            return Ok(dictionary);
        }
        self.metrics.record_cache_miss();

        let shared = {
            let mut pending = self.pending.lock().expect("pending lock poisoned");
            match pending.get(&language) {
                Some(load) => load.clone(),
                None => {
                    let load = fetch_dictionary(
                        self.client.clone(),
                        self.base_url.clone(),
                        language,
                        Arc::clone(&self.metrics),
                    )
                    .boxed()
                    .shared();
                    pending.insert(language, load.clone());
                    load
                }
            }
        };

        let outcome = shared.await;
        self.pending
            .lock()
            .expect("pending lock poisoned")
            .remove(&language);

        match outcome {
            Ok(dictionary) => {
                // Whole-tree replacement; racing completers insert the same Arc
                self.cache
                    .write()
                    .expect("cache lock poisoned")
                    .insert(language, Arc::clone(&dictionary));
                Ok(dictionary)
            }
            Err(error) => {
                if language != self.fallback {
                    if let Some(fallback_dictionary) = self.cached(self.fallback) {
                        warn!(
                            "Dictionary for '{}' unavailable ({}), serving '{}' content",
                            language, error, self.fallback
                        );
                        return Ok(fallback_dictionary);
                    }
                }
                Err(error)
            }
        }
    }

    /// Switch the active language.
    ///
    /// A no-op (no fetch, no event) when `language` is already active.
    /// On load failure without a cached fallback the active language is left
    /// unchanged and the error is returned.
    pub async fn set_language(&self, language: Language) -> Result<(), TranslationError> {
        if self.active_language() == language {
            debug!("Language '{}' already active", language);
            return Ok(());
        }

        self.load(language).await?;

        let previous = {
            let mut active = self.active.write().expect("active lock poisoned");
            if *active == language {
                // A racing call installed the same language first
                return Ok(());
            }
            std::mem::replace(&mut *active, language)
        };

        info!("Language changed from '{}' to '{}'", previous, language);
        let _ = self.events.send(LanguageEvent::Changed {
            previous,
            current: language,
        });
        Ok(())
    }

    /// Tag-string surface of [`set_language`](Self::set_language).
    ///
    /// Unsupported tags are substituted with the fallback language rather
    /// than rejected.
    pub async fn set_language_tag(&self, tag: &str) -> Result<(), TranslationError> {
        let language = match Language::from_tag(tag) {
            Ok(language) => language,
            Err(e) => {
                warn!(
                    "Unsupported language tag '{}' ({}), using '{}'",
                    tag, e, self.fallback
                );
                self.fallback
            }
        };
        self.set_language(language).await
    }

    /// Best-effort background load of additional dictionaries. Does not
    /// change the active language; per-language failures are logged and
    /// swallowed.
    pub async fn preload(&self, languages: &[Language]) {
        let loads = languages.iter().map(|&language| self.load(language));
        for (language, outcome) in languages.iter().zip(join_all(loads).await) {
            if let Err(error) = outcome {
                warn!("Preload of '{}' failed: {}", language, error);
            }
        }
    }

    /// Translate `key` in the active language.
    pub fn translate(&self, key: &str) -> String {
        self.translate_in(key, &HashMap::new(), None)
    }

    /// Translate `key` in the active language with `{{name}}` interpolation.
    pub fn translate_with_params(&self, key: &str, params: &HashMap<String, String>) -> String {
        self.translate_in(key, params, None)
    }

    /// Translate `key` in `language` (or the active language).
    ///
    /// A key missing from both the requested and the fallback dictionary
    /// resolves to the key itself with a logged warning; translation never
    /// fails.
    pub fn translate_in(
        &self,
        key: &str,
        params: &HashMap<String, String>,
        language: Option<Language>,
    ) -> String {
        let language = language.unwrap_or_else(|| self.active_language());

        let resolved = self.lookup(language, key).or_else(|| {
            if language != self.fallback {
                self.lookup(self.fallback, key)
            } else {
                None
            }
        });

        match resolved {
            Some(text) => interpolate(&text, params),
            None => {
                warn!(
                    "No translation for '{}' in '{}' or fallback '{}'",
                    key, language, self.fallback
                );
                key.to_string()
            }
        }
    }

    fn cached(&self, language: Language) -> Option<Arc<Dictionary>> {
        self.cache
            .read()
            .expect("cache lock poisoned")
            .get(&language)
            .cloned()
    }

    fn lookup(&self, language: Language, key: &str) -> Option<String> {
        let cache = self.cache.read().expect("cache lock poisoned");
        cache
            .get(&language)
            .and_then(|dictionary| dictionary.resolve(key))
            .map(str::to_string)
    }
}

/// Fetch and parse one dictionary, retrying transient failures.
async fn fetch_dictionary(
    client: reqwest::Client,
    base_url: String,
    language: Language,
    metrics: Arc<DictionaryMetrics>,
) -> Result<Arc<Dictionary>, TranslationError> {
    let url = format!("{}/{}.json", base_url, language.tag());
    let operation = format!("Dictionary fetch for '{}'", language);

    let outcome = with_retry_if(
        &RetryConfig::dictionary_fetch(),
        &operation,
        || {
            let client = client.clone();
            let url = url.clone();
            let metrics = Arc::clone(&metrics);
            async move {
                metrics.record_fetch();
                let attempt = async {
                    let response = client
                        .get(&url)
                        .send()
                        .await
                        .map_err(|e| FetchError::Network(e.to_string()))?;

                    if !response.status().is_success() {
                        return Err(FetchError::Status(response.status().as_u16()));
                    }

                    let bytes = response
                        .bytes()
                        .await
                        .map_err(|e| FetchError::Network(e.to_string()))?;
                    let dictionary = Dictionary::from_slice(&bytes)
                        .map_err(|e| FetchError::Parse(format!("{:#}", e)))?;

                    Ok(Arc::new(dictionary))
                }
                .await;

                if attempt.is_err() {
                    metrics.record_fetch_failure();
                }
                attempt
            }
        },
        FetchError::is_retryable,
    )
    .await;

    outcome.map_err(|error| TranslationError::DictionaryLoad {
        tag: language.tag().to_string(),
        reason: error.to_string(),
    })
}
