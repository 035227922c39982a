/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::working()` - Answers every prompt with a well-formed translated list
 * - `MockProvider::noise()` - Answers with free text that contains no list at all
 * - `MockProvider::truncated()` - Returns a list with the last element missing
 * - `MockProvider::failing()` - Always fails with a connection error
 * - `MockProvider::scripted(..)` - Replays a fixed sequence of raw responses
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::errors::ProviderError;
use crate::providers::Provider;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Echo the prompt's section list back as a marked, well-formed translation
    Working,
    /// Respond with prose that contains no bracketed list
    Noise,
    /// Respond with a well-formed list that drops the final element
    Truncated,
    /// Always fail with a connection error
    Failing,
    /// Replay canned raw responses in order
    Scripted,
}

/// Matches the JSON section list embedded in a translation prompt
static PROMPT_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[.*\]").expect("prompt list regex must compile")
});

/// Mock provider for exercising translation behavior without a network
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Canned responses for `Scripted` mode
    scripted_responses: Mutex<VecDeque<String>>,
    /// Every prompt received, in call order; shared so callers can keep
    /// a handle after the provider moves into a service
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            scripted_responses: Mutex::new(VecDeque::new()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that answers with unusable prose
    pub fn noise() -> Self {
        Self::new(MockBehavior::Noise)
    }

    /// Create a mock that drops the final element of every list
    pub fn truncated() -> Self {
        Self::new(MockBehavior::Truncated)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that replays the given raw responses in order
    pub fn scripted(responses: Vec<String>) -> Self {
        Self {
            behavior: MockBehavior::Scripted,
            scripted_responses: Mutex::new(responses.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the prompts received so far, usable after the
    /// provider has been handed to a translation service
    pub fn prompt_log(&self) -> Arc<Mutex<Vec<String>>> {
        self.prompts.clone()
    }

    /// All prompts this mock has received so far
    pub fn received_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Parse the section list out of a prompt the translator built
    fn sections_from_prompt(prompt: &str) -> Vec<String> {
        PROMPT_LIST_RE.find(prompt)
            .and_then(|m| serde_json::from_str::<Vec<String>>(m.as_str()).ok())
            .unwrap_or_default()
    }

    /// The marker translation applied by `Working` mode
    pub fn translate_marker(text: &str) -> String {
        format!("DE: {}", text)
    }
}

#[async_trait]
impl Provider for MockProvider {
    type Request = String;
    type Response = String;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        self.prompts.lock().unwrap().push(request.clone());

        match self.behavior {
            MockBehavior::Working => {
                let translated: Vec<String> = Self::sections_from_prompt(&request)
                    .iter()
                    .map(|s| Self::translate_marker(s))
                    .collect();
                let list = serde_json::to_string(&translated)
                    .map_err(|e| ProviderError::ParseError(e.to_string()))?;
                Ok(format!("Here is the translated list:\n{}", list))
            }
            MockBehavior::Noise => Ok("Sorry, I cannot help.".to_string()),
            MockBehavior::Truncated => {
                let mut translated: Vec<String> = Self::sections_from_prompt(&request)
                    .iter()
                    .map(|s| Self::translate_marker(s))
                    .collect();
                translated.pop();
                let list = serde_json::to_string(&translated)
                    .map_err(|e| ProviderError::ParseError(e.to_string()))?;
                Ok(list)
            }
            MockBehavior::Failing => {
                Err(ProviderError::ConnectionError("Connection failed".to_string()))
            }
            MockBehavior::Scripted => {
                self.scripted_responses.lock().unwrap()
                    .pop_front()
                    .ok_or_else(|| ProviderError::RequestFailed(
                        "No scripted response left".to_string()
                    ))
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockBehavior::Failing => {
                Err(ProviderError::ConnectionError("Connection failed".to_string()))
            }
            _ => Ok(()),
        }
    }

    fn extract_text(response: &Self::Response) -> String {
        response.clone()
    }
}
