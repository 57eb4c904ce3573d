//! Article records and the finalizer that builds them.
//!
//! Strategies accumulate loose text into a [`RawBucket`]; [`Article::from_bucket`]
//! turns it into the canonical record: single-spaced content, word count,
//! preview snippet, and the editorial blurb.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Result;

/// Maximum characters in a blurb, ellipsis marker included.
pub const MAX_BLURB_CHARS: usize = 600;

/// Characters of content kept in `content_snippet`.
pub const SNIPPET_CHARS: usize = 500;

/// Marker appended to a truncated blurb.
const ELLIPSIS: &str = " \u{2026}";

/// Whether an article lives inside the email or points elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleType {
    /// Long-form writing that lives entirely in the email; needs summarizing downstream.
    #[default]
    Essay,
    /// A pointer to external content; the newsletter's blurb already summarizes it.
    Link,
}

impl ArticleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleType::Essay => "essay",
            ArticleType::Link => "link",
        }
    }
}

impl std::fmt::Display for ArticleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress text and link for one article during a strategy's scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBucket {
    pub title: String,
    /// Empty when no outbound link was found.
    pub url: String,
    pub text: String,
    pub author: Option<String>,
    pub publish_date: Option<String>,
}

impl RawBucket {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self { title: title.into(), url: url.into(), ..Default::default() }
    }

    /// Appends a chunk of text, separated from what came before by a space.
    pub fn push_text(&mut self, chunk: &str) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(chunk);
    }
}

/// One article recovered from a newsletter email.
///
/// Strategies produce these through [`Article::from_bucket`]; the extraction
/// facade then stamps the newsletter fields, `paywall_detected`, and
/// `article_type` before handing the list to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,

    /// Outbound link, or an empty string when there is none.
    pub url: String,

    /// Full text with every whitespace run collapsed to one space.
    pub content: String,

    /// The newsletter author's text about the article, minus the restated title.
    pub blurb: String,

    /// First 500 characters of `content`.
    pub content_snippet: String,

    /// Whitespace-delimited tokens in `content`.
    pub word_count: usize,

    pub article_type: ArticleType,

    pub paywall_detected: bool,

    pub author: Option<String>,

    pub publish_date: Option<String>,

    pub newsletter_name: String,

    pub newsletter_email: String,

    pub received_timestamp: String,
}

impl Article {
    /// Finalizes a bucket into an article.
    ///
    /// Classification and newsletter metadata are left at their defaults for
    /// the facade to fill in.
    ///
    /// # Example
    ///
    /// ```rust
    /// use letterbox_core::article::{Article, RawBucket};
    ///
    /// let mut bucket = RawBucket::new("Big News", "https://example.com/big-news");
    /// bucket.push_text("Big News   A short take\n on the news.");
    ///
    /// let article = Article::from_bucket(bucket);
    /// assert_eq!(article.content, "Big News A short take on the news.");
    /// assert_eq!(article.blurb, "A short take on the news.");
    /// assert_eq!(article.word_count, 8);
    /// ```
    pub fn from_bucket(bucket: RawBucket) -> Self {
        let content = collapse_whitespace(&bucket.text);
        let blurb = extract_blurb(&content, &bucket.title);
        let content_snippet = snippet(&content);
        let word_count = count_words(&content);

        Self {
            title: bucket.title,
            url: bucket.url,
            content,
            blurb,
            content_snippet,
            word_count,
            article_type: ArticleType::default(),
            paywall_detected: false,
            author: bucket.author,
            publish_date: bucket.publish_date,
            newsletter_name: String::new(),
            newsletter_email: String::new(),
            received_timestamp: String::new(),
        }
    }

    pub fn is_essay(&self) -> bool {
        self.article_type == ArticleType::Essay
    }

    pub fn is_link(&self) -> bool {
        self.article_type == ArticleType::Link
    }

    /// Lowercase hex SHA-256 of `content`, the key storage uses to spot duplicates.
    pub fn content_hash(&self) -> String {
        format!("{:x}", Sha256::digest(self.content.as_bytes()))
    }

    /// Gets the article as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Collapses every whitespace run to a single space and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Counts whitespace-delimited tokens.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// First [`SNIPPET_CHARS`] characters of the content.
fn snippet(content: &str) -> String {
    content.chars().take(SNIPPET_CHARS).collect()
}

/// Strips `prefix` from the front of `text`, ignoring case.
fn strip_prefix_ignore_case<'t>(text: &'t str, prefix: &str) -> Option<&'t str> {
    if prefix.is_empty() {
        return None;
    }
    let (head, rest) = text.split_at_checked(prefix.len())?;
    (head.to_lowercase() == prefix.to_lowercase()).then_some(rest)
}

/// Derives the blurb from an article's content.
///
/// Drops the title when the content restates it, collapses whitespace, and
/// cuts overlong text at a word boundary so the result including the ` …`
/// marker stays within [`MAX_BLURB_CHARS`].
///
/// # Example
///
/// ```rust
/// use letterbox_core::article::extract_blurb;
///
/// let blurb = extract_blurb("Repeated Title The actual blurb follows.", "Repeated Title");
/// assert_eq!(blurb, "The actual blurb follows.");
/// ```
pub fn extract_blurb(content: &str, title: &str) -> String {
    let content = content.trim();
    let title = title.trim();
    let without_title = strip_prefix_ignore_case(content, title).unwrap_or(content);
    let blurb = collapse_whitespace(without_title);

    if blurb.chars().count() <= MAX_BLURB_CHARS {
        return blurb;
    }

    let budget = MAX_BLURB_CHARS - ELLIPSIS.chars().count();
    let head: String = blurb.chars().take(budget).collect();
    let cut = match head.rfind(' ') {
        Some(idx) => &head[..idx],
        None => head.as_str(),
    };

    format!("{}{}", cut, ELLIPSIS)
}
