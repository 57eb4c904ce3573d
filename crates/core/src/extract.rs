use std::collections::HashSet;

use tracing::{debug, trace};

use crate::article::{Article, RawBucket, count_words};
use crate::parse::{Child, Document, Element};
use crate::scoring::{best_link_in, is_noise};

/// Title given to an article when the markup offers nothing better
pub const FALLBACK_TITLE: &str = "Newsletter";

/// Heading tags that open a new section
const SECTION_HEADINGS: &[&str] = &["h2", "h3"];

/// Tags that bound the content block around a link
const BLOCK_TAGS: &[&str] = &["td", "div", "section", "article", "li", "p"];

/// How many ancestors to climb looking for a link's content block
const MAX_BLOCK_ASCENT: usize = 5;

/// Anchor text shorter than this is a button or label, not a headline
const MIN_LINK_TITLE_CHARS: usize = 10;

/// Bounds on a fallback title line, both exclusive
const FALLBACK_TITLE_CHARS: (usize, usize) = (10, 120);

/// An extraction strategy, in the order the pipeline tries them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Split the body on `h2`/`h3` boundaries
    Sections,
    /// One article per story-looking anchor
    Links,
    /// The whole email as one article
    Fallback,
}

impl Strategy {
    /// Priority order; the first strategy producing any article wins
    pub const ORDER: [Strategy; 3] = [Strategy::Sections, Strategy::Links, Strategy::Fallback];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Sections => "sections",
            Strategy::Links => "links",
            Strategy::Fallback => "fallback",
        }
    }

    /// Runs this strategy alone
    pub fn run(&self, doc: &Document) -> Vec<Article> {
        match self {
            Strategy::Sections => extract_by_sections(doc),
            Strategy::Links => extract_by_links(doc),
            Strategy::Fallback => extract_fallback(doc),
        }
    }
}

/// The result of running the strategy pipeline
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// The strategy whose output was kept, if any produced output
    pub strategy: Option<Strategy>,
    /// Finalized, unclassified articles in reading order
    pub articles: Vec<Article>,
}

/// Runs the strategies in priority order and keeps the first non-empty result
///
/// Later strategies are never evaluated once one succeeds, so content is never
/// counted twice when a document satisfies more than one strategy.
pub fn run_pipeline(doc: &Document) -> Extraction {
    Strategy::ORDER
        .iter()
        .find_map(|strategy| {
            let articles = strategy.run(doc);
            if articles.is_empty() {
                trace!(strategy = strategy.name(), "Strategy produced nothing");
                return None;
            }
            debug!(strategy = strategy.name(), candidates = articles.len(), "Extraction strategy matched");
            Some(Extraction { strategy: Some(*strategy), articles })
        })
        .unwrap_or_default()
}

fn is_section_heading(element: &Element<'_>) -> bool {
    SECTION_HEADINGS.contains(&element.tag_name().as_str())
}

/// Opens a bucket for a section heading
///
/// The URL is the best link inside the heading; the title falls back to that
/// link's text when the heading holds no text of its own (an image link).
fn open_section(heading: &Element<'_>) -> RawBucket {
    let link = best_link_in(heading);
    let mut title = heading.block_text();
    if title.is_empty() {
        title = link
            .as_ref()
            .map(|l| l.anchor_text.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| FALLBACK_TITLE.to_string());
    }
    RawBucket::new(title, link.map(|l| l.url).unwrap_or_default())
}

/// Section-based extraction
///
/// Walks the top-level children of the body. Each `h2`/`h3` closes the open
/// bucket and starts a new one; everything between headings is appended to
/// the open bucket. Content before the first heading is header chrome and is
/// dropped. A bucket without a link in its heading takes the best link from
/// the first following block that has one.
pub fn extract_by_sections(doc: &Document) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut current: Option<RawBucket> = None;

    for child in doc.body().children() {
        match child {
            Child::Element(element) if is_section_heading(&element) => {
                if let Some(done) = current.take() {
                    articles.push(Article::from_bucket(done));
                }
                current = Some(open_section(&element));
            }
            Child::Element(element) => {
                let Some(bucket) = current.as_mut() else { continue };
                bucket.push_text(&element.block_text());
                if bucket.url.is_empty()
                    && let Some(link) = best_link_in(&element)
                {
                    bucket.url = link.url;
                }
            }
            Child::Text(text) => {
                if let Some(bucket) = current.as_mut() {
                    bucket.push_text(&text);
                }
            }
        }
    }

    if let Some(done) = current {
        articles.push(Article::from_bucket(done));
    }

    articles.retain(|article| article.word_count > 0);
    articles
}

/// Climbs from an anchor to the block that holds its surrounding text
///
/// Stops at the first block-level ancestor, after [`MAX_BLOCK_ASCENT`] levels,
/// or at the document root, whichever comes first.
fn enclosing_block<'a>(anchor: &Element<'a>) -> Element<'a> {
    let mut block = anchor.clone();
    for _ in 0..MAX_BLOCK_ASCENT {
        let Some(parent) = block.parent() else { break };
        let is_block = BLOCK_TAGS.contains(&parent.tag_name().as_str());
        block = parent;
        if is_block {
            break;
        }
    }
    block
}

/// Link-based extraction
///
/// Every non-noise `http(s)` anchor with a headline-length text becomes an
/// article whose content is the text of its enclosing block. URLs are
/// deduplicated on first sight, so a short "Read more" link claims its URL
/// before a later headline anchor to the same place.
pub fn extract_by_links(doc: &Document) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();

    for anchor in doc.anchors() {
        let Some(url) = anchor.href() else { continue };
        if !url.starts_with("http") {
            continue;
        }

        let title = anchor.block_text();
        if is_noise(url, &title) {
            trace!(url, "Skipping noise link");
            continue;
        }
        if !seen_urls.insert(url.to_string()) {
            continue;
        }
        if title.chars().count() < MIN_LINK_TITLE_CHARS {
            continue;
        }

        let block = enclosing_block(&anchor);
        let mut bucket = RawBucket::new(title, url);
        bucket.push_text(&block.block_text());
        articles.push(Article::from_bucket(bucket));
    }

    articles
}

/// Fallback extraction: the entire email becomes one article without a URL
///
/// The title is the first text line of a plausible headline length. The blurb
/// stays empty since an essay has no editorial blurb.
pub fn extract_fallback(doc: &Document) -> Vec<Article> {
    let text = doc.visible_text();
    if count_words(&text) == 0 {
        return Vec::new();
    }

    let (min, max) = FALLBACK_TITLE_CHARS;
    let title = doc
        .text_lines()
        .into_iter()
        .find(|line| {
            let len = line.chars().count();
            len > min && len < max
        })
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    let mut bucket = RawBucket::new(title, "");
    bucket.push_text(&text);

    let mut article = Article::from_bucket(bucket);
    article.blurb.clear();
    vec![article]
}
