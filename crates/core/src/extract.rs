//! Content extraction from rendered documentation pages.
//!
//! Extraction runs in two stages over a rendered DOM snapshot:
//!
//! 1. A prioritized list of content-region selectors is tried in order. The
//!    first selector whose first match has any text claims the page; accepted
//!    descendant elements become ordered text segments, with headings prefixed
//!    by a markdown `#` marker at their level.
//! 2. If no selector yields segments, the whole document is flattened to
//!    visible text with script/style/nav/footer/header chrome skipped.
//!
//! The segments are then joined and line-filtered into the single text block
//! the analyzer consumes.

use tracing::debug;

use crate::parse::{Document, Element};
use crate::{DoclensError, Result};

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Content-region selectors, tried in priority order
    pub content_selectors: Vec<String>,
    /// Segments at or below this character count are discarded
    pub min_segment_chars: usize,
    /// Flattened lines at or below this character count are discarded
    pub min_line_chars: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            content_selectors: CONTENT_SELECTORS.iter().map(|s| s.to_string()).collect(),
            min_segment_chars: 10,
            min_line_chars: 3,
        }
    }
}

/// Default content-region selectors, most specific first
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    ".main-content",
    "#main-content",
    ".article-content",
    ".content",
    ".post-content",
    ".entry-content",
    "[role='main']",
];

/// Tags accepted as content segments inside a matched region
const SEGMENT_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, p, ul, ol, li, pre, code, div";

/// Regions preferred by the whole-document fallback before resorting to body
const FALLBACK_REGION_SELECTORS: &[&str] = &["main", ".main-content", "#main-content", ".article-content", ".content"];

/// Page chrome skipped entirely during fallback text collection
const SKIPPED_TAGS: &[&str] = &["script", "style", "nav", "footer", "header"];
const SKIPPED_CLASSES: &[&str] = &["nav", "footer", "header"];

/// The result of content extraction
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    /// Ordered text segments; headings carry a markdown `#` prefix
    pub segments: Vec<String>,
    /// The selector that claimed the page, or `None` for the fallback path
    pub matched_selector: Option<String>,
}

impl ExtractedContent {
    /// Flattens the segments into the single text block handed to the model.
    ///
    /// Segments are joined with blank lines, re-split into lines, trimmed,
    /// and lines of `min_line_chars` characters or fewer are dropped.
    pub fn flatten(&self, min_line_chars: usize) -> String {
        let joined = self.segments.join("\n\n");
        joined
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() > min_line_chars)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Extract content segments from a document
///
/// Tries each configured selector in order; the first one whose first match
/// has any text claims the page. If the claimed region yields no segments
/// (or nothing matched at all), the whole-document fallback runs. Fails with
/// [`DoclensError::NoContent`] when both strategies come up empty.
pub fn extract_segments(doc: &Document, config: &ExtractConfig) -> Result<ExtractedContent> {
    for selector in &config.content_selectors {
        let Ok(regions) = doc.select(selector) else { continue };
        let Some(region) = regions.into_iter().next() else { continue };
        if region.text().trim().is_empty() {
            continue;
        }

        debug!(selector, "content region matched");
        let segments = collect_segments(&region, config)?;
        if !segments.is_empty() {
            return Ok(ExtractedContent { segments, matched_selector: Some(selector.clone()) });
        }

        // The first non-empty region claims the page even when filtering
        // leaves nothing; remaining selectors are not consulted.
        break;
    }

    if let Some(text) = whole_document_text(doc) {
        debug!("falling back to whole-document extraction");
        return Ok(ExtractedContent { segments: vec![text], matched_selector: None });
    }

    Err(DoclensError::NoContent)
}

/// Extract and flatten in one step.
pub fn extract_text(doc: &Document, config: &ExtractConfig) -> Result<String> {
    let extracted = extract_segments(doc, config)?;
    Ok(extracted.flatten(config.min_line_chars))
}

/// Collect accepted descendant elements of a region as text segments
fn collect_segments(region: &Element<'_>, config: &ExtractConfig) -> Result<Vec<String>> {
    let mut segments = Vec::new();

    for element in region.select(SEGMENT_SELECTOR)? {
        let text = element.text().trim().to_string();
        if text.chars().count() <= config.min_segment_chars {
            continue;
        }

        match element.heading_level() {
            Some(level) => segments.push(format!("{} {}", "#".repeat(level), text)),
            None => segments.push(text),
        }
    }

    Ok(segments)
}

/// Whole-document fallback: visible text of the main-ish region or the body
fn whole_document_text(doc: &Document) -> Option<String> {
    let region = FALLBACK_REGION_SELECTORS
        .iter()
        .find_map(|sel| doc.select(sel).ok().and_then(|els| els.into_iter().next()))
        .or_else(|| doc.body())?;

    let text = visible_text(&region);
    let text = text.trim().to_string();
    (!text.is_empty()).then_some(text)
}

/// Visible text of an element, skipping page-chrome subtrees
fn visible_text(element: &Element<'_>) -> String {
    let mut out = String::new();
    collect_visible(element.as_ref(), &mut out);
    out
}

fn collect_visible(element: scraper::ElementRef<'_>, out: &mut String) {
    use scraper::Node;

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(el) = scraper::ElementRef::wrap(child) {
                    if is_page_chrome(&el) {
                        continue;
                    }
                    collect_visible(el, out);
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn is_page_chrome(el: &scraper::ElementRef<'_>) -> bool {
    let name = el.value().name();
    if SKIPPED_TAGS.contains(&name) {
        return true;
    }
    el.value().classes().any(|c| SKIPPED_CLASSES.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_main(inner: &str) -> Document {
        Document::parse(&format!("<html><body><main>{}</main></body></html>", inner))
    }

    #[test]
    fn test_extract_config_default() {
        let config = ExtractConfig::default();
        assert_eq!(config.content_selectors[0], "main");
        assert_eq!(config.content_selectors.len(), 8);
        assert_eq!(config.min_segment_chars, 10);
        assert_eq!(config.min_line_chars, 3);
    }

    #[test]
    fn test_segment_length_boundary() {
        let t5 = "x".repeat(5);
        let t12 = "y".repeat(12);
        let t8 = "z".repeat(8);
        let t40 = "w".repeat(40);
        let doc = doc_with_main(&format!("<p>{}</p><p>{}</p><p>{}</p><p>{}</p>", t5, t12, t8, t40));

        let extracted = extract_segments(&doc, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.segments, vec![t12, t40]);
    }

    #[test]
    fn test_exactly_ten_chars_is_dropped() {
        let t10 = "a".repeat(10);
        let t11 = "b".repeat(11);
        let doc = doc_with_main(&format!("<p>{}</p><p>{}</p>", t10, t11));

        let extracted = extract_segments(&doc, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.segments, vec![t11]);
    }

    #[test]
    fn test_heading_prefix() {
        let doc = doc_with_main("<h2>Getting started quickly</h2><p>Install the package from the registry.</p>");

        let extracted = extract_segments(&doc, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.segments[0], "## Getting started quickly");
        assert_eq!(extracted.matched_selector.as_deref(), Some("main"));
    }

    #[test]
    fn test_nested_container_and_child_both_emitted() {
        let doc = doc_with_main("<div><p>A paragraph inside a container div.</p></div>");

        let extracted = extract_segments(&doc, &ExtractConfig::default()).unwrap();
        // div and p both match the segment selector, so the text appears twice
        assert_eq!(extracted.segments.len(), 2);
        assert!(extracted.segments[1].contains("container div"));
    }

    #[test]
    fn test_selector_priority_skips_unmatched() {
        let html = r#"<html><body><div class="content"><p>Documentation lives here today.</p></div></body></html>"#;
        let doc = Document::parse(html);

        let extracted = extract_segments(&doc, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.matched_selector.as_deref(), Some(".content"));
    }

    #[test]
    fn test_empty_first_region_falls_through_to_next_selector() {
        let html = r#"
            <html><body>
                <main></main>
                <div class="content"><p>The real documentation content is over here.</p></div>
            </body></html>
        "#;
        let doc = Document::parse(html);

        let extracted = extract_segments(&doc, &ExtractConfig::default()).unwrap();
        assert_eq!(extracted.matched_selector.as_deref(), Some(".content"));
    }

    #[test]
    fn test_fallback_strips_page_chrome() {
        let html = r#"
            <html><body>
                <script>var tracked = true;</script>
                <nav><a href="/">Home</a><a href="/docs">Docs</a></nav>
                <section><p>Body text that no content selector can reach directly.</p></section>
                <footer>Copyright notice</footer>
            </body></html>
        "#;
        let doc = Document::parse(html);

        let extracted = extract_segments(&doc, &ExtractConfig::default()).unwrap();
        assert!(extracted.matched_selector.is_none());
        assert_eq!(extracted.segments.len(), 1);
        assert!(extracted.segments[0].contains("no content selector"));
        assert!(!extracted.segments[0].contains("Home"));
        assert!(!extracted.segments[0].contains("Copyright"));
        assert!(!extracted.segments[0].contains("tracked"));
    }

    #[test]
    fn test_fallback_skips_chrome_classes() {
        let html = r#"
            <html><body>
                <div class="header">Site banner text</div>
                <section><p>Actual page prose for the fallback extractor.</p></section>
            </body></html>
        "#;
        let doc = Document::parse(html);

        let extracted = extract_segments(&doc, &ExtractConfig::default()).unwrap();
        assert!(!extracted.segments[0].contains("banner"));
        assert!(extracted.segments[0].contains("Actual page prose"));
    }

    #[test]
    fn test_no_content_error() {
        let doc = Document::parse("<html><body><script>only();</script></body></html>");

        let result = extract_segments(&doc, &ExtractConfig::default());
        assert!(matches!(result, Err(DoclensError::NoContent)));
    }

    #[test]
    fn test_flatten_filters_short_lines() {
        let content = ExtractedContent {
            segments: vec!["## Heading line".to_string(), "ok\nA longer surviving line".to_string()],
            matched_selector: Some("main".to_string()),
        };

        let flat = content.flatten(3);
        assert_eq!(flat, "## Heading line\nA longer surviving line");
    }

    #[test]
    fn test_flatten_line_boundary() {
        let content =
            ExtractedContent { segments: vec!["abc\nabcd".to_string()], matched_selector: None };

        // exactly three characters is dropped, four survives
        assert_eq!(content.flatten(3), "abcd");
    }

    #[test]
    fn test_extract_text_end_to_end() {
        let doc = doc_with_main("<h1>Guide to testing</h1><p>Write tests before shipping anything.</p>");

        let text = extract_text(&doc, &ExtractConfig::default()).unwrap();
        assert_eq!(text, "# Guide to testing\nWrite tests before shipping anything.");
    }
}
