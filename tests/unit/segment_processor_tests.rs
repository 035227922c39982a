/*!
 * Tests for chapter segment extraction and reinsertion
 */

use duobook::segment_processor::{ChapterDom, reinsert_translations};
use crate::common::fixtures::chapter_with_body;

fn parse(body: &str) -> ChapterDom {
    ChapterDom::parse(chapter_with_body(body).as_bytes()).unwrap()
}

/// Test extraction order across mixed segment kinds
#[test]
fn test_extraction_withMixedSegments_shouldFollowDocumentOrder() {
    let dom = parse(
        "<h1>Title</h1><p>First</p><ul><li>Item one</li><li>Item two</li></ul><blockquote>Quote</blockquote><h2>Sub</h2>",
    );

    let texts: Vec<String> = dom.segments().into_iter().map(|s| s.text).collect();
    assert_eq!(texts, vec!["Title", "First", "Item one", "Item two", "Quote", "Sub"]);
}

/// Test that inline markup is flattened and whitespace trimmed
#[test]
fn test_extraction_withInlineMarkup_shouldFlattenText() {
    let dom = parse("<p>  One <b>bold</b> and <i>italic</i> word.  </p>");

    let segments = dom.segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, "One bold and italic word.");
}

/// Test that non-segment elements are not extracted
#[test]
fn test_extraction_withNonSegmentMarkup_shouldIgnoreIt() {
    let dom = parse("<div>wrapper</div><p>Real</p><span>inline</span>");

    let segments = dom.segments();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, "Real");
}

/// Test bilingual duplication for a plain paragraph
#[test]
fn test_reinsertion_withPlainParagraph_shouldAppendBracketedOriginal() {
    let dom = parse("<p>Hallo Welt</p>");
    let segments = dom.segments();
    let originals: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
    let translated = vec!["Hello world".to_string()];

    reinsert_translations(&segments, &translated, &originals);

    let html = String::from_utf8(dom.serialize()).unwrap();
    let translated_pos = html.find("<p>Hello world</p>").expect("translated paragraph");
    let original_pos = html.find("<p>[Hallo Welt]</p>").expect("bracketed original");
    assert!(translated_pos < original_pos);
}

/// Test that the duplicate node keeps the element name and attributes
#[test]
fn test_reinsertion_withStyledHeading_shouldDuplicateStructure() {
    let dom = parse("<h2 class=\"chapter\">Der Anfang</h2>");
    let segments = dom.segments();
    let originals: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();

    reinsert_translations(&segments, &["The Beginning".to_string()], &originals);

    let html = String::from_utf8(dom.serialize()).unwrap();
    assert!(html.contains("<h2 class=\"chapter\">The Beginning</h2>"));
    assert!(html.contains("<h2 class=\"chapter\">[Der Anfang]</h2>"));
}

/// Test that a list item with a link only gets its label rewritten
#[test]
fn test_reinsertion_withLinkedListItem_shouldRewriteLabelOnly() {
    let dom = parse("<ul><li><a href=\"ch1.xhtml\">Kapitel Eins</a></li></ul>");
    let segments = dom.segments();
    let originals: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();

    reinsert_translations(&segments, &["Chapter One".to_string()], &originals);

    let html = String::from_utf8(dom.serialize()).unwrap();
    assert!(html.contains("<a href=\"ch1.xhtml\">Chapter One</a>"));
    // No bracketed duplicate for link labels
    assert!(!html.contains("[Kapitel Eins]"));
}

/// Test that a node carrying an id attribute is never touched
#[test]
fn test_reinsertion_withIdentifiedNode_shouldSkipIt() {
    let dom = parse("<p id=\"anchor-1\">Fester Anker</p><p>Normaler Text</p>");
    let segments = dom.segments();
    let originals: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
    let translated = vec!["Fixed anchor".to_string(), "Normal text".to_string()];

    reinsert_translations(&segments, &translated, &originals);

    let html = String::from_utf8(dom.serialize()).unwrap();
    assert!(html.contains("<p id=\"anchor-1\">Fester Anker</p>"));
    assert!(!html.contains("[Fester Anker]"));
    assert!(html.contains("<p>Normal text</p>"));
    assert!(html.contains("<p>[Normaler Text]</p>"));
}

/// Test that nested segments do not break the pass
#[test]
fn test_reinsertion_withNestedSegments_shouldNotPanic() {
    let dom = parse("<blockquote><p>Innen</p></blockquote>");
    let segments = dom.segments();
    assert_eq!(segments.len(), 2);
    let originals: Vec<String> = segments.iter().map(|s| s.text.clone()).collect();
    let translated = vec!["Inside quote".to_string(), "Inside".to_string()];

    reinsert_translations(&segments, &translated, &originals);

    let html = String::from_utf8(dom.serialize()).unwrap();
    assert!(html.contains("Inside quote"));
    assert!(html.contains("[Innen]"));
}

/// Test that a chapter without segments yields an empty extraction
#[test]
fn test_extraction_withEmptyBody_shouldYieldNothing() {
    let dom = parse("<div>no segments here</div>");
    assert!(dom.segments().is_empty());
}
