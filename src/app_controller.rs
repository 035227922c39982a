/*!
 * Application controller for EPUB translation.
 *
 * The controller owns the run: it opens the book, resolves the requested
 * chapter range, translates the chapters one after another, and saves
 * the bilingual bundle. A chapter that fails is logged and skipped; the
 * run always ends with a saved book.
 */

use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::book::Book;
use crate::chapter_translator::ChapterTranslator;
use crate::language_utils;
use crate::translation::TranslationService;

// @module: Application controller for EPUB processing
pub struct Controller {
    /// Application configuration
    config: Config,
}

impl Controller {
    /// Create a controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Translate a contiguous chapter range of an EPUB file.
    ///
    /// `from` and `to` are 1-based inclusive chapter numbers; both
    /// default to the full book. Chapters are processed sequentially and
    /// a per-chapter failure never aborts the remaining run.
    pub async fn run(
        &self,
        input_file: PathBuf,
        output_file: Option<PathBuf>,
        from: Option<usize>,
        to: Option<usize>,
        force_overwrite: bool,
    ) -> Result<()> {
        let mut book = Book::open(&input_file)
            .with_context(|| format!("Failed to open EPUB: {:?}", input_file))?;

        let total = book.chapter_count();
        if total == 0 {
            warn!("No chapters found in {:?}", input_file);
            return Ok(());
        }
        info!("Found {} chapter(s) in {:?}", total, input_file);

        let start = from.unwrap_or(1);
        let end = to.unwrap_or(total);
        if start < 1 || end > total || start > end {
            return Err(anyhow!(
                "Invalid chapter range {}-{} (book has {} chapters)",
                start, end, total
            ));
        }

        let output_file = output_file.unwrap_or_else(|| {
            self.default_output_path(&input_file)
        });
        if output_file.exists() && !force_overwrite {
            warn!("Output file already exists: {:?}. Use -f to force overwrite.", output_file);
            return Ok(());
        }

        let target_name = language_utils::get_language_name(&self.config.target_language)?;

        let service = TranslationService::new(self.config.translation.clone())?;
        service.test_connection().await
            .with_context(|| format!(
                "Failed to connect to {} provider",
                self.config.translation.provider
            ))?;

        let translator = ChapterTranslator::new(service, target_name);

        let progress_bar = ProgressBar::new((end - start + 1) as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut translated_count = 0usize;
        let mut failed_chapters: Vec<usize> = Vec::new();

        for (index, chapter) in book.chapters.iter_mut().enumerate() {
            let number = index + 1;
            if number < start || number > end {
                continue;
            }

            progress_bar.set_message(format!("chapter {}", number));

            match translator.translate(chapter).await {
                Ok(()) => {
                    translated_count += 1;
                }
                Err(e) => {
                    // Record and continue; remaining chapters still run
                    error!("Error translating chapter {}: {}", number, e);
                    failed_chapters.push(number);
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("done");

        book.save(&output_file)
            .with_context(|| format!("Failed to save EPUB: {:?}", output_file))?;

        info!(
            "Translation finished: {} chapter(s) translated, saved to {:?}",
            translated_count, output_file
        );
        if !failed_chapters.is_empty() {
            warn!(
                "{} chapter(s) failed and kept their original text: {:?}",
                failed_chapters.len(),
                failed_chapters
            );
        }

        Ok(())
    }

    /// Output path next to the input: `<stem>.<target-lang>.epub`
    fn default_output_path(&self, input_file: &Path) -> PathBuf {
        let stem = input_file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "translated".to_string());

        let file_name = format!("{}.{}.epub", stem, self.config.target_language);
        input_file
            .parent()
            .unwrap_or(Path::new("."))
            .join(file_name)
    }
}
