//! Error taxonomy for the translation layer.
//!
//! Only a dictionary load failure without a cached fallback dictionary ever
//! reaches callers; every other failure mode (signal evaluation, missing
//! keys, unsupported tags) degrades in place with a logged diagnostic.

use thiserror::Error;

/// Errors surfaced by the translation store.
///
/// `Clone` because load results are memoized and shared between concurrent
/// callers waiting on the same in-flight fetch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TranslationError {
    /// Fetching or parsing a dictionary failed and no fallback dictionary
    /// was cached.
    #[error("failed to load dictionary for '{tag}': {reason}")]
    DictionaryLoad { tag: String, reason: String },

    /// A tag outside the supported set was requested. Usually coerced to
    /// the fallback language before it gets this far.
    #[error("unsupported language tag '{0}'")]
    UnsupportedLanguage(String),
}
