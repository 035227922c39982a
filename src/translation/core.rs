/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its implementation,
 * which is responsible for completing translation prompts using the configured
 * AI provider.
 */

use anyhow::{Result, anyhow};
use url::Url;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::ollama::{Ollama, ChatRequest};
use crate::providers::mock::MockProvider;

/// Parse an endpoint string into host and port
fn parse_endpoint(endpoint: &str) -> Result<(String, u16)> {
    if endpoint.is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("http://{}", endpoint))?
    };

    let host = url.host_str()
        .ok_or_else(|| anyhow!("Invalid host in endpoint: {}", endpoint))?
        .to_string();

    let port = url.port().unwrap_or(if url.scheme() == "https" { 443 } else { 80 });

    Ok((host, port))
}

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// OpenAI API service
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// Ollama LLM service
    Ollama {
        /// Client instance
        client: Ollama,
    },

    /// In-process mock, used by the test suite
    Mock {
        /// Client instance
        client: MockProvider,
    },
}

/// Translation service that turns a prompt into raw response text
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let provider = match config.provider {
            ConfigTranslationProvider::OpenAI => {
                TranslationProviderImpl::OpenAI {
                    client: OpenAI::new(config.get_api_key(), config.get_endpoint()),
                }
            },
            ConfigTranslationProvider::Ollama => {
                let (host, port) = parse_endpoint(&config.get_endpoint())?;
                TranslationProviderImpl::Ollama {
                    client: Ollama::new(host, port),
                }
            },
        };

        Ok(Self { provider, config })
    }

    /// Create a translation service backed by a mock provider
    pub fn with_mock(client: MockProvider, config: TranslationConfig) -> Self {
        Self {
            provider: TranslationProviderImpl::Mock { client },
            config,
        }
    }

    /// Send one prompt to the configured provider and return the raw
    /// response text. One request per call, no streaming, no retries.
    pub async fn complete_prompt(&self, prompt: &str) -> Result<String, ProviderError> {
        match &self.provider {
            TranslationProviderImpl::OpenAI { client } => {
                let request = OpenAIRequest::new(self.config.get_model())
                    .add_message("user", prompt)
                    .temperature(self.config.common.temperature);
                let response = client.complete(request).await?;
                Ok(OpenAI::extract_text(&response))
            },
            TranslationProviderImpl::Ollama { client } => {
                let request = ChatRequest::new(self.config.get_model())
                    .add_message("user", prompt)
                    .temperature(self.config.common.temperature);
                let response = client.complete(request).await?;
                Ok(Ollama::extract_text(&response))
            },
            TranslationProviderImpl::Mock { client } => {
                let response = client.complete(prompt.to_string()).await?;
                Ok(MockProvider::extract_text(&response))
            },
        }
    }

    /// Test the connection to the configured provider
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match &self.provider {
            TranslationProviderImpl::OpenAI { client } => client.test_connection().await,
            TranslationProviderImpl::Ollama { client } => client.test_connection().await,
            TranslationProviderImpl::Mock { client } => client.test_connection().await,
        }
    }
}
