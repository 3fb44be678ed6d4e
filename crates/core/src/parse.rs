//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! rendered HTML and querying it with CSS selectors. The extraction pipeline
//! in [`crate::extract`] is built entirely on these wrappers so it can run
//! against browser snapshots and test fixtures alike.
//!
//! # Example
//!
//! ```rust
//! use doclens_core::parse::Document;
//!
//! let html = "<html><head><title>Guide</title></head><body><p>Hello</p></body></html>";
//! let doc = Document::parse(html);
//! assert_eq!(doc.title(), Some("Guide".to_string()));
//! ```

use scraper::{Html, Selector};

use crate::{DoclensError, Result};

/// Represents a parsed HTML document.
///
/// A Document wraps a rendered HTML page and provides methods for querying
/// elements using CSS selectors.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// scraper's parser is lenient, so malformed markup still produces a
    /// usable tree rather than an error.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DoclensError::HtmlParse`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use doclens_core::parse::Document;
    ///
    /// let doc = Document::parse(r#"<p class="note">First</p><p class="note">Second</p>"#);
    /// let elements = doc.select("p.note").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| DoclensError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the title of the document, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }

    /// Gets the `<body>` element, if present.
    pub fn body(&self) -> Option<Element<'_>> {
        let selector = Selector::parse("body").ok()?;
        self.html.select(&selector).next().map(|el| Element { element: el })
    }
}

/// A wrapper around scraper's ElementRef for easier DOM queries.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element,
    /// including nested children.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Heading level for `h1`..`h6` tags, `None` for everything else.
    pub fn heading_level(&self) -> Option<usize> {
        let tag = self.tag_name();
        let level = tag.strip_prefix('h')?.parse::<usize>().ok()?;
        (1..=6).contains(&level).then_some(level)
    }

    /// True if the element carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.element.value().classes().any(|c| c == class)
    }

    /// Selects descendant elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`DoclensError::HtmlParse`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| DoclensError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    pub(crate) fn as_ref(&self) -> scraper::ElementRef<'a> {
        self.element
    }
}
