/*!
 * The chapter translation operation.
 *
 * One call to [`ChapterTranslator::translate`] takes a chapter through
 * the whole engine: parse the markup, extract the ordered segment list,
 * translate it batch by batch, write the results back with bilingual
 * duplication, and replace the chapter's stored content with the
 * re-serialized tree.
 */

use anyhow::Result;

use crate::book::Chapter;
use crate::segment_processor::{ChapterDom, reinsert_translations};
use crate::translation::{BatchTranslator, TranslationService};

/// Translates one chapter at a time, in place
pub struct ChapterTranslator {
    /// Batch translation engine
    translator: BatchTranslator,
    /// English name of the target language, as used in the prompt
    target_language: String,
}

impl ChapterTranslator {
    /// Create a chapter translator for the given target language name
    /// (e.g. "German")
    pub fn new(service: TranslationService, target_language: impl Into<String>) -> Self {
        Self {
            translator: BatchTranslator::new(service),
            target_language: target_language.into(),
        }
    }

    /// Translate a chapter in place.
    ///
    /// On success the chapter content holds the bilingual markup. A
    /// translated/extracted count mismatch fails the chapter and leaves
    /// its content untouched; an unparsable batch response does not -
    /// those segments keep their original text.
    pub async fn translate(&self, chapter: &mut Chapter) -> Result<()> {
        let dom = ChapterDom::parse(&chapter.content)?;
        let segments = dom.segments();

        let originals: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
        let translated = self
            .translator
            .translate_sections(&originals, &self.target_language)
            .await?;

        reinsert_translations(&segments, &translated, &originals);

        chapter.content = dom.serialize();
        Ok(())
    }
}
