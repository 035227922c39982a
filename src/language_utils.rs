use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// This module provides functions for resolving ISO 639-1 (2-letter) and
/// ISO 639-2 (3-letter) language codes to the English names the translation
/// prompt is written with.
/// Get the English name of a language from its ISO code
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_name().to_string());
        }
    } else if normalized_code.len() == 3 {
        if let Some(lang) = Language::from_639_3(&normalized_code) {
            return Ok(lang.to_name().to_string());
        }
    }

    Err(anyhow!("Invalid language code: {}", code))
}
