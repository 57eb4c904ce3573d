//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types the extraction
//! strategies walk. Everything here degrades instead of failing: a document
//! without a `<body>` exposes its root element as the body, and missing
//! attributes read as `None`.
//!
//! # Example
//!
//! ```rust
//! use letterbox_core::parse::{Child, Document};
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h2>Title</h2>
//!             Loose text
//!             <p class="content">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let children = doc.body().children();
//! assert!(children.iter().any(|c| matches!(c, Child::Text(t) if t.contains("Loose text"))));
//! ```

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

use crate::preprocess::{PreprocessConfig, preprocess_html};
use crate::{LetterboxError, Result};

/// Tags that start a new line of rendered text
const LINE_BREAK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption", "figure", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "td", "th", "tr", "ul",
];

/// Represents a parsed HTML document.
///
/// A Document owns its tree; extraction never shares one between calls, so
/// concurrent callers each parse their own.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string without preprocessing.
    ///
    /// The underlying parser recovers from any input, so this never fails.
    ///
    /// # Example
    ///
    /// ```rust
    /// use letterbox_core::parse::Document;
    ///
    /// let doc = Document::parse("<html><body><h2>Title</h2></body></html>");
    /// assert_eq!(doc.body().tag_name(), "body");
    /// ```
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Parses HTML after stripping scripts, styles, comments and hidden elements.
    pub fn parse_with_preprocessing(html: &str, config: &PreprocessConfig) -> Self {
        let cleaned = preprocess_html(html, config);
        Self::parse(&cleaned)
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`LetterboxError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = parse_selector(selector)?;
        Ok(self.html.select(&sel).map(|element| Element { element }).collect())
    }

    /// Gets the `<body>` element, or the root element when there is none.
    pub fn body(&self) -> Element<'_> {
        self.select("body")
            .ok()
            .and_then(|bodies| bodies.into_iter().next())
            .unwrap_or_else(|| Element { element: self.html.root_element() })
    }

    /// Gets every anchor carrying an `href`, in document order.
    pub fn anchors(&self) -> Vec<Element<'_>> {
        self.select("a[href]").unwrap_or_default()
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Gets the body's text with every text node trimmed and joined by a space.
    pub fn visible_text(&self) -> String {
        self.body().block_text()
    }

    /// Gets the body's non-empty text lines in reading order.
    ///
    /// Lines break at newlines and at block element boundaries; inline markup
    /// such as `<em>` or `<a>` stays within its line.
    pub fn text_lines(&self) -> Vec<String> {
        let mut rendered = String::new();
        push_rendered_text(self.body().element, &mut rendered);

        rendered
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// A direct child of an element: either a text node or a nested element.
#[derive(Clone, Debug)]
pub enum Child<'a> {
    Text(String),
    Element(Element<'a>),
}

/// A wrapper around scraper's ElementRef for easier DOM navigation.
///
/// # Example
///
/// ```rust
/// use letterbox_core::parse::Document;
///
/// let html = r#"<p>Read <a href=" https://example.com/post ">the post</a></p>"#;
/// let doc = Document::parse(html);
/// let link = &doc.anchors()[0];
///
/// assert_eq!(link.text(), "the post");
/// assert_eq!(link.href(), Some("https://example.com/post"));
/// assert_eq!(link.parent().map(|p| p.tag_name()), Some("p".to_string()));
/// ```
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element, concatenated as-is.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the text content with each text node trimmed and joined by a single space.
    ///
    /// Adjacent inline elements (`<td>A</td><td>B</td>`) stay separate words.
    pub fn block_text(&self) -> String {
        self.element
            .text()
            .map(str::trim)
            .filter(|chunk| !chunk.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the trimmed `href` attribute.
    pub fn href(&self) -> Option<&'a str> {
        self.attr("href").map(str::trim)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Gets the parent element, or `None` at the document root.
    pub fn parent(&self) -> Option<Element<'a>> {
        self.element.parent().and_then(ElementRef::wrap).map(|element| Element { element })
    }

    /// Gets the direct children, keeping text nodes.
    pub fn children(&self) -> Vec<Child<'a>> {
        self.element
            .children()
            .filter_map(|node| match node.value() {
                Node::Text(text) => Some(Child::Text(text.to_string())),
                Node::Element(_) => ElementRef::wrap(node).map(|element| Child::Element(Element { element })),
                _ => None,
            })
            .collect()
    }

    /// Gets every nested anchor carrying an `href`, excluding this element itself.
    pub fn links(&self) -> Vec<Element<'a>> {
        self.select("a[href]").unwrap_or_default()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`LetterboxError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = parse_selector(selector)?;
        Ok(self.element.select(&sel).map(|element| Element { element }).collect())
    }
}

/// Appends an element's text, with a newline around every line-breaking child
fn push_rendered_text(element: ElementRef<'_>, out: &mut String) {
    for node in element.children() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let Some(child) = ElementRef::wrap(node) else { continue };
                let breaks = LINE_BREAK_TAGS.contains(&el.name());
                if breaks {
                    out.push('\n');
                }
                push_rendered_text(child, out);
                if breaks {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| LetterboxError::HtmlParseError(format!("Invalid selector: {}", e)))
}
