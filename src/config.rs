use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Dictionaries
    pub dictionary_base_url: String,

    // Persisted preference
    pub preference_file: String,
    pub preference_max_age_days: i64,

    // Detection inputs
    pub page_url: Option<String>,
    pub geolocation_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Base path for {tag}.json dictionary resources
            dictionary_base_url: std::env::var("DICTIONARY_BASE_URL")
                .context("DICTIONARY_BASE_URL not set")?,

            // Persisted preference record
            preference_file: std::env::var("PREFERENCE_FILE")
                .unwrap_or_else(|_| "data/language.json".to_string()),
            preference_max_age_days: std::env::var("PREFERENCE_MAX_AGE_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),

            // Detection inputs
            page_url: std::env::var("PAGE_URL").ok(),
            geolocation_enabled: std::env::var("GEOLOCATION_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }
}
