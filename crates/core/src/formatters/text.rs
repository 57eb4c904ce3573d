use crate::article::{Article, ArticleType};

/// Configuration for plain text output
#[derive(Debug, Clone, Default)]
pub struct TextConfig {
    /// Wrap lines at specified width (0 = no wrapping)
    pub line_width: usize,

    /// Include a newsletter header above the articles
    pub include_header: bool,
}

/// Plain text formatter for a reading digest
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, articles: &[Article]) -> String {
        convert_to_text(articles, &self.config)
    }
}

/// Render articles as a plain text digest, essays first and then links
pub fn convert_to_text(articles: &[Article], config: &TextConfig) -> String {
    let mut output = String::new();

    if config.include_header
        && let Some(header) = generate_header(articles)
    {
        output.push_str(&header);
        output.push_str("\n\n");
    }

    for (kind, heading) in [(ArticleType::Essay, "Essays"), (ArticleType::Link, "Links")] {
        let group: Vec<&Article> = articles.iter().filter(|a| a.article_type == kind).collect();
        if group.is_empty() {
            continue;
        }

        output.push_str(heading);
        output.push('\n');
        output.push_str(&"-".repeat(heading.len()));
        output.push_str("\n\n");

        for article in group {
            output.push_str(&render_entry(article, config.line_width));
            output.push_str("\n\n");
        }
    }

    output.trim().to_string()
}

/// Generate a header from the newsletter fields of the first article
fn generate_header(articles: &[Article]) -> Option<String> {
    let first = articles.first()?;
    let mut header = String::new();

    let name = if first.newsletter_name.is_empty() { "Newsletter" } else { first.newsletter_name.as_str() };
    header.push_str(name);
    header.push('\n');
    header.push_str(&"=".repeat(name.chars().count()));
    header.push('\n');

    let essays = articles.iter().filter(|a| a.is_essay()).count();
    let links = articles.len() - essays;

    let mut meta_parts = Vec::new();
    if !first.newsletter_email.is_empty() {
        meta_parts.push(format!("From: {}", first.newsletter_email));
    }
    if !first.received_timestamp.is_empty() {
        meta_parts.push(format!("Received: {}", first.received_timestamp));
    }
    meta_parts.push(format!("{} {}, {} {}", essays, plural(essays, "essay"), links, plural(links, "link")));

    header.push_str(&meta_parts.join(" | "));
    Some(header)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 { word.to_string() } else { format!("{}s", word) }
}

/// One entry: title, URL, word count, then the blurb (links) or snippet (essays)
fn render_entry(article: &Article, width: usize) -> String {
    let mut lines = vec![format!("* {}", article.title)];

    if !article.url.is_empty() {
        lines.push(format!("  {}", article.url));
    }

    let mut meta = format!("  {} {}", article.word_count, plural(article.word_count, "word"));
    if article.paywall_detected {
        meta.push_str(" (paywalled)");
    }
    lines.push(meta);

    let body = if article.is_essay() { &article.content_snippet } else { &article.blurb };
    if !body.is_empty() {
        lines.push(String::new());
        lines.push(wrap_text(body, width));
    }

    lines.join("\n")
}

/// Wrap text to specified line width
fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    wrap_words(&words, width)
}

/// Wrap a slice of words to specified width
fn wrap_words(words: &[&str], width: usize) -> String {
    let mut lines = Vec::new();
    let mut current_line = Vec::new();
    let mut current_length = 0;

    for &word in words {
        let word_len = word.chars().count();

        if current_length == 0 {
            current_line.push(word);
            current_length = word_len;
        } else if current_length + 1 + word_len <= width {
            current_length += 1 + word_len;
            current_line.push(word);
        } else {
            lines.push(current_line.join(" "));
            current_line = vec![word];
            current_length = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line.join(" "));
    }

    lines.join("\n")
}
