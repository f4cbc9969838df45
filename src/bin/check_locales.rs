//! Locale check binary - compares a translated locale file against the
//! reference file and reports missing keys and placeholder mismatches.
//!
//! Usage:
//!   cargo run --bin check-locales                              # defaults
//!   cargo run --bin check-locales -- ref.json translated.json
//!
//! Exits non-zero when the translation has errors (placeholder mismatches).

use anyhow::{Context, Result};
use locale_switch::store::{Dictionary, DictionaryValidator};
use std::fs;
use std::process::ExitCode;

fn load_dictionary(path: &str) -> Result<Dictionary> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    Dictionary::from_slice(contents.as_bytes())
        .with_context(|| format!("Failed to parse {}", path))
}

fn main() -> Result<ExitCode> {
    let args: Vec<String> = std::env::args().collect();
    let reference_path = args.get(1).map(String::as_str).unwrap_or("locales/en.json");
    let translated_path = args
        .get(2)
        .map(String::as_str)
        .unwrap_or("locales/es-MX.json");

    let reference = load_dictionary(reference_path)?;
    let translated = load_dictionary(translated_path)?;

    let report = DictionaryValidator::compare(&reference, &translated);

    println!();
    println!("Reference:   {} ({} keys)", reference_path, reference.len());
    println!("Translation: {} ({} keys)", translated_path, translated.len());
    println!();

    if report.is_clean() {
        println!("OK: translation covers the reference with matching placeholders");
        return Ok(ExitCode::SUCCESS);
    }

    if report.has_warnings() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  - {}", warning);
        }
        println!();
    }

    if report.has_errors() {
        println!("Errors ({}):", report.errors.len());
        for error in &report.errors {
            println!("  - {}", error);
        }
        println!();
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
