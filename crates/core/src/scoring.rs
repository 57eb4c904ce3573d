//! Link noise detection and ranking.
//!
//! Newsletters wrap every story in chrome: share buttons, legal footers,
//! "view in browser" banners. These functions decide which anchors are that
//! chrome and which one in a region of markup most likely points at the story.

use url::Url;

use crate::parse::Element;

/// Hosts whose links are always social/video chrome.
pub const NOISE_DOMAINS: &[&str] = &["twitter.com", "facebook.com", "instagram.com", "linkedin.com", "youtube.com"];

/// URL schemes that never point at an article.
const NOISE_SCHEMES: &[&str] = &["mailto:", "javascript:"];

/// Path segments (exact match) that mark legal, account, or corporate pages.
pub const NOISE_PATH_SEGMENTS: &[&str] = &[
    "disclaimer",
    "legal",
    "terms",
    "privacy",
    "cookie",
    "unsubscribe",
    "preferences",
    "settings",
    "about",
    "contact",
    "careers",
    "investors",
    "ir",
    "press",
    "login",
    "signup",
    "register",
    "help",
    "support",
    "faq",
    "sitemap",
    "robots",
    "policy",
    "policies",
];

/// Anchor text phrases (case-insensitive substring) that mark chrome links.
pub const NOISE_ANCHOR_PHRASES: &[&str] = &[
    "disclaimer",
    "terms of",
    "privacy policy",
    "cookie",
    "unsubscribe",
    "view in browser",
    "read in browser",
    "click here to unsubscribe",
    "manage preferences",
    "forward this email",
    "view online",
    "web version",
];

/// URL substrings that suggest the target is an article.
pub const ARTICLE_SIGNALS: &[&str] = &["article", "post", "story", "news", "blog", "opinion", "analysis"];

/// A link picked out of a region of markup, with its score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredLink {
    pub url: String,
    pub anchor_text: String,
    pub score: u32,
}

/// Lowercased, non-empty path segments of a URL.
///
/// Unparseable URLs have no segments, which makes them neither noise by path
/// nor deep.
fn path_segments(lower_url: &str) -> Vec<String> {
    Url::parse(lower_url)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .map(|segments| segments.filter(|s| !s.is_empty()).map(str::to_string).collect())
        })
        .unwrap_or_default()
}

fn is_noise_host(lower_url: &str) -> bool {
    if NOISE_SCHEMES.iter().any(|scheme| lower_url.starts_with(scheme)) {
        return true;
    }

    let Some(host) = Url::parse(lower_url).ok().and_then(|url| url.host_str().map(str::to_string)) else {
        return false;
    };

    NOISE_DOMAINS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{}", domain)))
}

/// Returns true when a link is structural chrome rather than content.
///
/// # Example
///
/// ```rust
/// use letterbox_core::scoring::is_noise;
///
/// assert!(is_noise("https://example.com/legal/privacy", "Privacy"));
/// assert!(is_noise("https://www.twitter.com/example", "Follow us"));
/// assert!(!is_noise("https://blog.example.com/2026/01/deep-dive", "A Deep Dive into Markets"));
/// ```
pub fn is_noise(url: &str, anchor_text: &str) -> bool {
    let lower_url = url.trim().to_lowercase();
    let lower_text = anchor_text.to_lowercase();

    if is_noise_host(&lower_url) {
        return true;
    }

    if path_segments(&lower_url)
        .iter()
        .any(|segment| NOISE_PATH_SEGMENTS.contains(&segment.as_str()))
    {
        return true;
    }

    NOISE_ANCHOR_PHRASES.iter().any(|phrase| lower_text.contains(phrase))
}

/// Scores a link by how much it looks like a story link. Noise scores 0.
///
/// The score is additive:
/// - 1 base point
/// - +3 for anchor text of 4 or more words, +1 for 2-3 words
/// - +2 for a path 3 or more segments deep, +1 for 2 segments
/// - +2 if the URL mentions an article signal (post, story, blog, ...)
pub fn score_link(url: &str, anchor_text: &str) -> u32 {
    if is_noise(url, anchor_text) {
        return 0;
    }

    let lower_url = url.trim().to_lowercase();
    let mut score = 1;

    score += match anchor_text.split_whitespace().count() {
        n if n >= 4 => 3,
        2 | 3 => 1,
        _ => 0,
    };

    score += match path_segments(&lower_url).len() {
        n if n >= 3 => 2,
        2 => 1,
        _ => 0,
    };

    if ARTICLE_SIGNALS.iter().any(|signal| lower_url.contains(signal)) {
        score += 2;
    }

    score
}

/// Finds the highest-scoring `http(s)` link nested inside an element.
///
/// Ties keep the first link in document order. Returns `None` when every
/// candidate is noise.
pub fn best_link_in(element: &Element<'_>) -> Option<ScoredLink> {
    let mut best: Option<ScoredLink> = None;

    for anchor in element.links() {
        let Some(url) = anchor.href() else { continue };
        if !url.starts_with("http") {
            continue;
        }

        let anchor_text = anchor.block_text();
        let score = score_link(url, &anchor_text);
        if score > best.as_ref().map_or(0, |b| b.score) {
            best = Some(ScoredLink { url: url.to_string(), anchor_text, score });
        }
    }

    best
}
