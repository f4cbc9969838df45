//! Supported-language registry and the validated `Language` type.
//!
//! Every language tag that circulates through the crate is validated here
//! first: the registry is the single source of truth for which tags exist,
//! which are enabled, and which one is the default/fallback. Code elsewhere
//! works with `Language` values and can rely on them being supported.

mod registry;
mod tag;

pub use registry::{LanguageConfig, LanguageRegistry};
pub use tag::{split_tag, Language};
