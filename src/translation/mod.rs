/*!
 * AI-powered chapter translation services.
 *
 * This module is organized as follows:
 * - `core`: The TranslationService and provider dispatch
 * - `batch`: Size-bounded batching of chapter sections and the
 *   ordered-list translation protocol
 * - `prompts`: The instruction template sent with every batch
 */

pub mod core;
pub mod batch;
pub mod prompts;

// Re-export main types for easier usage
pub use core::TranslationService;
pub use batch::BatchTranslator;
