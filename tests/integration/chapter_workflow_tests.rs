/*!
 * End-to-end chapter translation tests
 *
 * These run the full extract -> batch-translate -> reinsert pipeline on
 * real chapter markup, backed by the in-process mock provider.
 */

use duobook::book::Chapter;
use duobook::chapter_translator::ChapterTranslator;
use duobook::providers::mock::MockProvider;
use duobook::translation::TranslationService;
use crate::common::fixtures::{chapter_with_body, sample_chapter, test_translation_config};

fn chapter_from(content: String) -> Chapter {
    Chapter {
        href: "OEBPS/ch1.xhtml".to_string(),
        content: content.into_bytes(),
    }
}

fn translator_with(mock: MockProvider) -> ChapterTranslator {
    let service = TranslationService::with_mock(mock, test_translation_config());
    ChapterTranslator::new(service, "German")
}

/// Test the full bilingual rewrite of a plain chapter
#[tokio::test]
async fn test_translate_withPlainChapter_shouldProduceBilingualMarkup() {
    let translator = translator_with(MockProvider::working());
    let mut chapter = chapter_from(sample_chapter());

    translator.translate(&mut chapter).await.unwrap();

    let html = String::from_utf8(chapter.content.clone()).unwrap();

    // Every segment is translated and followed by its bracketed original
    let translated = html.find("<p>DE: Hallo Welt</p>").expect("translated paragraph");
    let original = html.find("<p>[Hallo Welt]</p>").expect("bracketed original");
    assert!(translated < original);

    assert!(html.contains("<h1>DE: Der Anfang</h1>"));
    assert!(html.contains("<h1>[Der Anfang]</h1>"));
    assert!(html.contains("<p>DE: Zweiter Satz</p>"));
    assert!(html.contains("<p>[Zweiter Satz]</p>"));
}

/// Test that an unusable response keeps the chapter readable
#[tokio::test]
async fn test_translate_withUnparsableResponse_shouldKeepOriginalText() {
    let translator = translator_with(MockProvider::noise());
    let mut chapter = chapter_from(chapter_with_body("<p>Hallo Welt</p>"));

    translator.translate(&mut chapter).await.unwrap();

    let html = String::from_utf8(chapter.content.clone()).unwrap();
    // The fallback feeds the original text through the normal rewrite
    assert!(html.contains("<p>Hallo Welt</p>"));
    assert!(html.contains("<p>[Hallo Welt]</p>"));
}

/// Test that a count mismatch aborts the chapter without mutating it
#[tokio::test]
async fn test_translate_withTruncatedResponse_shouldFailAndLeaveChapterUntouched() {
    let translator = translator_with(MockProvider::truncated());
    let source = chapter_with_body(
        "<p>eins</p><p>zwei</p><p>drei</p><p>vier</p><p>fuenf</p>",
    );
    let mut chapter = chapter_from(source.clone());

    let result = translator.translate(&mut chapter).await;

    assert!(result.is_err());
    assert_eq!(chapter.content, source.into_bytes());
}

/// Test that anchored segments survive translation untouched
#[tokio::test]
async fn test_translate_withAnchoredHeading_shouldSkipIt() {
    let translator = translator_with(MockProvider::working());
    let mut chapter = chapter_from(chapter_with_body(
        "<h2 id=\"sec-1\">Feste Marke</h2><p>Text danach</p>",
    ));

    translator.translate(&mut chapter).await.unwrap();

    let html = String::from_utf8(chapter.content.clone()).unwrap();
    assert!(html.contains("<h2 id=\"sec-1\">Feste Marke</h2>"));
    assert!(!html.contains("[Feste Marke]"));
    assert!(html.contains("<p>DE: Text danach</p>"));
}

/// Test that navigation links get rewritten labels and no duplicates
#[tokio::test]
async fn test_translate_withNavigationList_shouldRewriteLinkLabels() {
    let translator = translator_with(MockProvider::working());
    let mut chapter = chapter_from(chapter_with_body(
        "<ul><li><a href=\"ch2.xhtml\">Nächstes Kapitel</a></li></ul>",
    ));

    translator.translate(&mut chapter).await.unwrap();

    let html = String::from_utf8(chapter.content.clone()).unwrap();
    assert!(html.contains("<a href=\"ch2.xhtml\">DE: Nächstes Kapitel</a>"));
    assert!(!html.contains("[Nächstes Kapitel]"));
}

/// Test a chapter with nothing to translate
#[tokio::test]
async fn test_translate_withEmptyChapter_shouldSucceed() {
    let mock = MockProvider::working();
    let prompt_log = mock.prompt_log();
    let translator = translator_with(mock);
    let mut chapter = chapter_from(chapter_with_body("<div>nur Struktur</div>"));

    translator.translate(&mut chapter).await.unwrap();
    assert!(prompt_log.lock().unwrap().is_empty());
}
