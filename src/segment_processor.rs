/*!
 * Chapter segment extraction and reinsertion.
 *
 * A chapter's XHTML is parsed into a DOM, every readable segment
 * (paragraph, list item, heading, blockquote) is collected in document
 * order together with its flattened text, and after translation the
 * results are written back into the same nodes. Each translated segment
 * gets a structural duplicate holding the bracketed original text
 * inserted right after it, so the chapter reads bilingually.
 *
 * Node handles are reference-counted (`kuchiki::NodeRef`), so the
 * captured segment list stays valid while duplicates are inserted
 * between siblings during the same pass.
 */

use anyhow::{Context, Result};
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

/// The element classes treated as translatable segments
pub const SEGMENT_SELECTOR: &str = "p, li, h1, h2, h3, h4, blockquote";

/// One translatable unit: a segment node and its flattened text
pub struct Segment {
    /// Handle to the element in the chapter DOM
    pub node: NodeRef,
    /// The segment's readable text, markup stripped, whitespace trimmed
    pub text: String,
}

/// A chapter's markup parsed into a mutable DOM
pub struct ChapterDom {
    document: NodeRef,
}

impl ChapterDom {
    /// Parse raw chapter bytes into a DOM
    pub fn parse(content: &[u8]) -> Result<Self> {
        let html = std::str::from_utf8(content)
            .context("failed to decode chapter content as UTF-8")?;
        let document = kuchiki::parse_html().one(html);
        Ok(Self { document })
    }

    /// Collect all translatable segments in document order.
    ///
    /// The order of the returned list is the correlation contract: the
    /// i-th translated text is written back into the i-th segment.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();

        if let Ok(matches) = self.document.select(SEGMENT_SELECTOR) {
            for css_match in matches {
                let node = css_match.as_node().clone();
                let text = node.text_contents().trim().to_string();
                segments.push(Segment { node, text });
            }
        }

        segments
    }

    /// Serialize the (possibly mutated) DOM back to UTF-8 bytes
    pub fn serialize(&self) -> Vec<u8> {
        self.document.to_string().into_bytes()
    }
}

/// Write translated text back into the chapter, pairing each segment
/// with a bracketed copy of its original text.
///
/// Policy per segment, matching position i in all three lists:
/// - a list item containing a link gets only its link label replaced,
///   with no duplicate appended;
/// - a node carrying an `id` attribute is left untouched entirely;
/// - any other node has its content replaced by the translation and a
///   duplicate node containing `[original]` inserted right after it.
///
/// Callers guarantee equal lengths; the count invariant is enforced
/// before reinsertion is reached.
pub fn reinsert_translations(segments: &[Segment], translated: &[String], originals: &[String]) {
    for (segment, (new_text, original_text)) in
        segments.iter().zip(translated.iter().zip(originals.iter()))
    {
        let node = &segment.node;
        let Some(element) = node.as_element() else {
            continue;
        };

        // For links only replace the link label
        if element.name.local.as_ref() == "li" {
            if let Ok(link) = node.select_first("a") {
                set_text(link.as_node(), new_text);
                continue;
            }
        }

        if element.attributes.borrow().contains("id") {
            continue;
        }

        // A nested segment already rewritten away by its container
        if node.parent().is_none() {
            continue;
        }

        set_text(node, new_text);

        // Duplicate of the translated node, carrying the bracketed original
        let duplicate = NodeRef::new_element(
            element.name.clone(),
            element.attributes.borrow().map.clone(),
        );
        duplicate.append(NodeRef::new_text(format!("[{}]", original_text)));
        node.insert_after(duplicate);
    }
}

/// Replace a node's entire content with a single text child
fn set_text(node: &NodeRef, text: &str) {
    while let Some(child) = node.first_child() {
        child.detach();
    }
    node.append(NodeRef::new_text(text));
}
