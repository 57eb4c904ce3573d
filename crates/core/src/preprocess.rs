//! Markup cleanup applied before an email body is parsed.
//!
//! Email HTML carries a lot of text that never renders: inline `<style>`
//! blocks, Outlook conditional comments, and hidden preheader spans. Leaving
//! them in would pollute the fallback strategy's visible text and its title.

use regex::Regex;
use std::sync::LazyLock;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static HIDDEN_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden|max-height\s*:\s*0(px)?\s*(;|$))").unwrap()
});

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Whether to remove script tags
    pub remove_scripts: bool,
    /// Whether to remove style tags
    pub remove_styles: bool,
    /// Whether to remove noscript and template tags
    pub remove_noscript: bool,
    /// Whether to remove HTML comments (including conditional comments)
    pub remove_comments: bool,
    /// Whether to remove elements hidden with inline styles
    pub remove_hidden: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { remove_scripts: true, remove_styles: true, remove_noscript: true, remove_comments: true, remove_hidden: true }
    }
}

/// Preprocess HTML by removing markup that never renders as text
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let mut processed = if config.remove_comments { remove_comments(html) } else { html.to_string() };

    if config.remove_scripts || config.remove_styles || config.remove_noscript {
        processed = remove_unwanted_tags(&processed, config);
    }

    if config.remove_hidden {
        processed = remove_hidden_elements(&processed);
    }

    processed
}

/// Remove script, style, noscript, and template tags from HTML
fn remove_unwanted_tags(html: &str, config: &PreprocessConfig) -> String {
    let mut output: Vec<u8> = Vec::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                if config.remove_scripts {
                    Some(lol_html::element!("script", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
                if config.remove_styles {
                    Some(lol_html::element!("style", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
                if config.remove_noscript {
                    Some(lol_html::element!("noscript", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
                if config.remove_noscript {
                    Some(lol_html::element!("template", |el| {
                        el.remove();
                        Ok(())
                    }))
                } else {
                    None
                },
            ]
            .into_iter()
            .flatten()
            .collect(),
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if rewriter.write(html.as_bytes()).is_err() {
        return html.to_string();
    }

    if rewriter.end().is_err() {
        return html.to_string();
    }

    finish(output, html)
}

/// Rewriter output, or the untouched input when the rewrite produced nothing usable
///
/// Output chunks may split a multi-byte character, so they are decoded only once complete.
fn finish(output: Vec<u8>, html: &str) -> String {
    match String::from_utf8(output) {
        Ok(text) if !text.is_empty() => text,
        _ => html.to_string(),
    }
}

/// Remove HTML comments from the document
fn remove_comments(html: &str) -> String {
    COMMENT_RE.replace_all(html, "").to_string()
}

/// Remove elements whose inline style hides them (preheaders, mobile-only blocks)
fn remove_hidden_elements(html: &str) -> String {
    let mut output: Vec<u8> = Vec::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![lol_html::element!("*", |el| {
                if let Some(style) = el.get_attribute("style")
                    && HIDDEN_STYLE_RE.is_match(&style)
                {
                    el.remove();
                }
                Ok(())
            })],
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if rewriter.write(html.as_bytes()).is_err() {
        return html.to_string();
    }

    if rewriter.end().is_err() {
        return html.to_string();
    }

    finish(output, html)
}
