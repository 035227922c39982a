/*!
 * Batch translation processing.
 *
 * This module turns an ordered list of chapter sections into an ordered
 * list of translated sections of the same length. Sections are packed
 * into token-budgeted batches, each batch travels through the ordered
 * JSON-list protocol in a single request, and a response that cannot be
 * parsed degrades to the untranslated batch instead of failing the
 * chapter.
 */

use log::error;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TranslationError;
use super::core::TranslationService;
use super::prompts;

/// Matches the first bracket-delimited list in a free-form response.
/// Non-greedy so surrounding commentary after the list is ignored.
static SECTION_LIST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\[.*?\]").expect("section list regex must compile")
});

/// Approximate token cost of a section, at four characters per token
fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}

/// Find the first JSON string list embedded in a raw provider response.
///
/// Returns `None` when no bracketed span exists or the span is not a
/// well-formed list of strings; callers are expected to fall back to the
/// untranslated input in that case.
pub fn parse_section_list(response: &str) -> Option<Vec<String>> {
    let candidate = SECTION_LIST_RE.find(response)?;
    serde_json::from_str::<Vec<String>>(candidate.as_str()).ok()
}

/// Batch translator for processing chapter sections in batches
pub struct BatchTranslator {
    /// The translation service to use
    service: TranslationService,

    /// Approximate token budget per batch
    max_tokens_per_batch: usize,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(service: TranslationService) -> Self {
        Self {
            max_tokens_per_batch: service.config.get_max_tokens_per_batch(),
            service,
        }
    }

    /// Translate an ordered list of sections, preserving order and length.
    ///
    /// Batches are issued strictly one after another; a batch whose
    /// response cannot be parsed contributes its original text instead.
    /// After all batches are processed the total count is checked against
    /// the input and a mismatch fails the whole call.
    pub async fn translate_sections(
        &self,
        sections: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, TranslationError> {
        let mut translated: Vec<String> = Vec::with_capacity(sections.len());

        if !sections.is_empty() {
            for batch in self.make_batches(sections) {
                let result = self.translate_batch(&batch, target_language).await?;
                translated.extend(result);
            }
        }

        if translated.len() != sections.len() {
            return Err(TranslationError::CountMismatch {
                translated,
                original: sections.to_vec(),
            });
        }

        Ok(translated)
    }

    /// Translate one batch through the ordered-list protocol.
    ///
    /// A provider transport error propagates; an unusable response body
    /// does not - the batch is returned untranslated so the chapter can
    /// still complete.
    async fn translate_batch(
        &self,
        batch: &[String],
        target_language: &str,
    ) -> Result<Vec<String>, TranslationError> {
        let json_batch = serde_json::to_string_pretty(batch)
            .unwrap_or_else(|_| "[]".to_string());
        let prompt = prompts::batch_translation_prompt(target_language, &json_batch);

        let response = self.service.complete_prompt(&prompt).await?;

        match parse_section_list(&response) {
            Some(sections) => Ok(sections),
            None => {
                error!("Failed to parse a response: {}", response);
                Ok(batch.to_vec())
            }
        }
    }

    /// Pack sections into batches bounded by the token budget.
    ///
    /// The running cost resets on every new batch. A section is never
    /// split: one whose own cost exceeds the budget occupies a batch
    /// alone.
    pub fn make_batches(&self, sections: &[String]) -> Vec<Vec<String>> {
        let mut batches: Vec<Vec<String>> = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_tokens = 0usize;

        for section in sections {
            let cost = estimate_tokens(section);
            if !current.is_empty() && current_tokens + cost > self.max_tokens_per_batch {
                batches.push(std::mem::take(&mut current));
                current_tokens = 0;
            }
            current_tokens += cost;
            current.push(section.clone());
        }

        if !current.is_empty() {
            batches.push(current);
        }

        batches
    }
}
