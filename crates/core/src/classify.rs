//! Essay/link classification and paywall detection.
//!
//! Essays are routed to a summarizer downstream; links already carry the
//! newsletter author's blurb and are shown as-is. The rules are checked in
//! order and the first match wins:
//!
//! 1. the newsletter is a configured essay-only source
//! 2. the article has no outbound URL
//! 3. the URL points back at the sender's own domain
//! 4. everything else is a link

use crate::article::{Article, ArticleType};
use crate::newsletter::sender_domain;

/// Phrases (case-insensitive substring) that indicate gated content.
pub const PAYWALL_PHRASES: &[&str] = &[
    "subscribe to read",
    "paywall",
    "premium content",
    "unlock this article",
    "sign up to continue",
    "member only",
    "paid subscribers only",
    "read the full article",
    "continue reading",
    "behind a paywall",
    "premium member",
    "subscription required",
];

/// True when the newsletter name contains any configured essay-source keyword.
///
/// # Example
///
/// ```rust
/// use letterbox_core::classify::is_essay_newsletter;
///
/// let sources = vec!["stratechery".to_string()];
/// assert!(is_essay_newsletter("STRATECHERY by Ben Thompson", &sources));
/// assert!(!is_essay_newsletter("Morning Brew", &sources));
/// ```
pub fn is_essay_newsletter(newsletter_name: &str, essay_newsletters: &[String]) -> bool {
    let name = newsletter_name.to_lowercase();
    essay_newsletters
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .any(|keyword| !keyword.is_empty() && name.contains(&keyword))
}

/// Classifies an article as an essay or a link.
///
/// The self-hosted rule is a raw substring match of the sender's domain in
/// the URL, so a link to another tenant of a shared publishing platform whose
/// URL happens to contain the sender's full domain also counts as an essay.
/// A sender with an empty domain (`"broken@"`) never matches.
pub fn classify(article: &Article, newsletter_email: &str, force_essay: bool) -> ArticleType {
    if force_essay {
        return ArticleType::Essay;
    }

    let url = article.url.trim();
    if url.is_empty() {
        return ArticleType::Essay;
    }

    let domain = sender_domain(newsletter_email);
    if !domain.is_empty() && url.to_lowercase().contains(&domain) {
        return ArticleType::Essay;
    }

    ArticleType::Link
}

/// True when the text contains any paywall phrase.
pub fn detect_paywall(text: &str) -> bool {
    let lower = text.to_lowercase();
    PAYWALL_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
