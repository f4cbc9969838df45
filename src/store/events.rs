//! Language lifecycle events.
//!
//! The store never touches rendering; these notifications are the only way
//! consumers learn that translated text must be re-applied.

use crate::language::Language;

/// Notification published by the translation store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageEvent {
    /// The initial dictionary finished loading and translations are usable.
    Ready { language: Language },

    /// The active language changed.
    Changed {
        previous: Language,
        current: Language,
    },
}
