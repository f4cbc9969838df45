use anyhow::Result;
use locale_switch::config::Config;
use locale_switch::detect::{LanguageResolver, PreferenceStore, ResolveOptions, SignalEnvironment};
use locale_switch::{Language, TranslationStore};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_switch=info".parse()?),
        )
        .init();

    info!("Starting language resolution");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Step 1: Resolve the user's language from ambient signals
    let mut environment = SignalEnvironment::from_ambient();
    if let Some(url) = &config.page_url {
        environment = environment.with_url(url.clone());
    }

    let resolver = LanguageResolver::new(
        PreferenceStore::new(&config.preference_file),
        ResolveOptions {
            enable_geolocation: config.geolocation_enabled,
            recency_window: chrono::Duration::days(config.preference_max_age_days),
            ..ResolveOptions::default()
        },
    );
    let detection = resolver.resolve(&environment);

    info!(
        "Detected '{}' via {} (confidence {:.2})",
        detection.language, detection.method, detection.confidence
    );

    // Step 2: Load the dictionary for the detected language
    info!("Loading dictionary from {}", config.dictionary_base_url);
    let store = TranslationStore::new(&config.dictionary_base_url);
    store.init(detection.language).await?;

    // Step 3: Warm the cache for the other enabled languages
    let others: Vec<Language> = locale_switch::language::LanguageRegistry::get()
        .list_enabled()
        .iter()
        .filter_map(|c| Language::from_tag(c.tag).ok())
        .filter(|l| *l != detection.language)
        .collect();
    store.preload(&others).await;

    // Show a few translated strings
    for key in ["nav.home", "nav.services", "hero.title", "footer.copyright"] {
        println!("{:20} {}", key, store.translate(key));
    }

    let report = store.metrics().report();
    info!(
        "Dictionary metrics: {} fetches, {:.0}% cache hit rate",
        report.fetches, report.cache_hit_rate
    );

    Ok(())
}
