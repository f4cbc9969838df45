//! Detection report binary - evaluates every language signal and prints a
//! per-signal table plus the winning result, without touching dictionaries.
//!
//! Usage:
//!   cargo run --bin detect-report
//!   cargo run --bin detect-report -- --with-geolocation
//!
//! Optional environment variables:
//! - PAGE_URL (URL examined for a language segment/parameter)
//! - PREFERENCE_FILE (defaults to data/language.json)
//! - PREFERENCE_MAX_AGE_DAYS (defaults to 30)
//! - TZ, LANGUAGE, LANG, LC_ALL (ambient detection inputs)

use anyhow::Result;
use locale_switch::detect::{LanguageResolver, PreferenceStore, ResolveOptions, SignalEnvironment};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_switch=info".parse()?),
        )
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args: Vec<String> = std::env::args().collect();
    let with_geolocation = args.iter().any(|arg| arg == "--with-geolocation");

    let mut environment = SignalEnvironment::from_ambient();
    if let Ok(url) = std::env::var("PAGE_URL") {
        environment = environment.with_url(url);
    }

    let preference_file = std::env::var("PREFERENCE_FILE")
        .unwrap_or_else(|_| "data/language.json".to_string());
    let max_age_days: i64 = std::env::var("PREFERENCE_MAX_AGE_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);

    let resolver = LanguageResolver::new(
        PreferenceStore::new(&preference_file),
        ResolveOptions {
            enable_geolocation: with_geolocation,
            recency_window: chrono::Duration::days(max_age_days),
            ..ResolveOptions::default()
        },
    );

    let result = resolver.resolve(&environment);

    println!();
    println!("=============== LANGUAGE DETECTION REPORT ===============");
    println!(
        "{:<14} {:<10} {:<10} {:>10} {:>8}",
        "SOURCE", "DETECTED", "LANGUAGE", "CONFIDENCE", "PRIORITY"
    );
    println!("---------------------------------------------------------");
    for signal in &result.signals {
        println!(
            "{:<14} {:<10} {:<10} {:>10.2} {:>8}",
            signal.source.label(),
            if signal.detected { "yes" } else { "no" },
            signal
                .language
                .map(|l| l.tag())
                .unwrap_or("-"),
            signal.confidence,
            signal.priority
        );
    }
    println!("---------------------------------------------------------");
    println!(
        "Result: {} ({}) via {}, confidence {:.2}",
        result.language,
        result.language.native_name(),
        result.method,
        result.confidence
    );
    println!("Preference saved to: {}", preference_file);
    println!("=========================================================");
    println!();

    Ok(())
}
