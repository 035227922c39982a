/*!
 * Tests for application configuration handling
 */

use std::str::FromStr;
use duobook::app_config::{Config, TranslationProvider};

/// Test default configuration values
#[test]
fn test_default_config_withNoOverrides_shouldUseGermanTarget() {
    let config = Config::default();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "de");
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.common.max_tokens_per_batch, 30000);
}

/// Test that missing fields fall back to serde defaults
#[test]
fn test_config_parsing_withMinimalJson_shouldApplyDefaults() {
    let json = r#"{
        "source_language": "en",
        "target_language": "de",
        "translation": {}
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.translation.provider, TranslationProvider::OpenAI);
    assert_eq!(config.translation.common.max_tokens_per_batch, 30000);
    assert!((config.translation.common.temperature - 0.3).abs() < f32::EPSILON);
}

/// Test provider selection from the available providers array
#[test]
fn test_provider_lookup_withConfiguredProvider_shouldReturnItsSettings() {
    let json = r#"{
        "source_language": "en",
        "target_language": "de",
        "translation": {
            "provider": "openai",
            "available_providers": [
                {"type": "openai", "model": "gpt-4.1", "api_key": "key-123"},
                {"type": "ollama", "model": "llama2", "endpoint": "http://localhost:11434"}
            ]
        }
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.translation.get_model(), "gpt-4.1");
    assert_eq!(config.translation.get_api_key(), "key-123");
    assert_eq!(config.translation.get_endpoint(), "https://api.openai.com/v1");
}

/// Test model fallback when no provider entry exists
#[test]
fn test_get_model_withEmptyProviderList_shouldFallBackToDefault() {
    let json = r#"{
        "source_language": "en",
        "target_language": "de",
        "translation": {"provider": "ollama"}
    }"#;

    let config: Config = serde_json::from_str(json).unwrap();
    assert_eq!(config.translation.get_model(), "llama2");
    assert_eq!(config.translation.get_endpoint(), "http://localhost:11434");
}

/// Test validation of the OpenAI API key requirement
#[test]
fn test_validate_withOpenAIAndNoKey_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::OpenAI;
    for provider in &mut config.translation.available_providers {
        provider.api_key = String::new();
    }

    assert!(config.validate().is_err());
}

/// Test that Ollama does not require an API key
#[test]
fn test_validate_withOllamaAndNoKey_shouldPass() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;

    assert!(config.validate().is_ok());
}

/// Test validation of language codes
#[test]
fn test_validate_withBogusLanguageCode_shouldFail() {
    let mut config = Config::default();
    config.translation.provider = TranslationProvider::Ollama;
    config.target_language = "xx".to_string();

    assert!(config.validate().is_err());
}

/// Test provider round-trip through FromStr and Display
#[test]
fn test_provider_from_str_withValidNames_shouldParse() {
    assert_eq!(TranslationProvider::from_str("openai").unwrap(), TranslationProvider::OpenAI);
    assert_eq!(TranslationProvider::from_str("Ollama").unwrap(), TranslationProvider::Ollama);
    assert!(TranslationProvider::from_str("anthropic").is_err());

    assert_eq!(TranslationProvider::OpenAI.to_string(), "openai");
    assert_eq!(TranslationProvider::Ollama.display_name(), "Ollama");
}
