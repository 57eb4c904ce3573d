//! Main extraction API.
//!
//! [`Extractor`] turns the HTML body of one newsletter email into a list of
//! classified [`Article`]s. It holds nothing but an immutable
//! [`ExtractorConfig`], so one instance can serve many threads.
//!
//! # Example
//!
//! ```rust
//! use letterbox_core::{ArticleType, Extractor, ExtractorConfig};
//!
//! let html = format!(
//!     "<html><body><h2>On Aggregation</h2><p>{}</p></body></html>",
//!     "Aggregators own the demand side of the market. ".repeat(20)
//! );
//!
//! let extractor = Extractor::with_config(ExtractorConfig::builder().min_word_count(50).build());
//! let articles = extractor.extract_from_email(&html, "Stratechery", "ben@stratechery.com", "2026-01-05T08:00:00Z");
//!
//! assert_eq!(articles.len(), 1);
//! assert_eq!(articles[0].article_type, ArticleType::Essay);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::article::Article;
use crate::classify::{classify, detect_paywall, is_essay_newsletter};
use crate::extract::run_pipeline;
use crate::newsletter::{EmailMessage, newsletter_name};
use crate::parse::Document;
use crate::preprocess::PreprocessConfig;
use crate::{LetterboxError, Result};

const DEFAULT_MIN_WORD_COUNT: usize = 100;

const DEFAULT_ESSAY_NEWSLETTERS: &[&str] = &["stratechery", "hanania", "clouded judgement", "dwarkesh"];

const DEFAULT_NEWSLETTER_SERVICES: &[&str] =
    &["substack.com", "beehiiv.com", "ghost.io", "mailchimp.com", "sendgrid.net", "convertkit.com", "revue.com"];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Configuration for the [`Extractor`].
///
/// Every field has a default, so a config file only needs the keys it changes.
///
/// # Example
///
/// ```rust
/// use letterbox_core::ExtractorConfig;
///
/// let config = ExtractorConfig::builder()
///     .min_word_count(50)
///     .essay_newsletter("Not Boring")
///     .build();
///
/// assert_eq!(config.min_word_count, 50);
/// assert!(config.essay_newsletters.contains(&"not boring".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Candidates with fewer words than this are dropped (default: 100).
    pub min_word_count: usize,

    /// Case-insensitive keywords; a newsletter whose name contains one is
    /// always treated as an essay source.
    pub essay_newsletters: Vec<String>,

    /// Sending-service domains used by newsletter detection.
    pub newsletter_services: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_word_count: DEFAULT_MIN_WORD_COUNT,
            essay_newsletters: to_strings(DEFAULT_ESSAY_NEWSLETTERS),
            newsletter_services: to_strings(DEFAULT_NEWSLETTER_SERVICES),
        }
    }
}

impl ExtractorConfig {
    /// Creates a new builder for ExtractorConfig.
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }

    /// Loads a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LetterboxError::FileNotFound`] if the file does not exist and
    /// [`LetterboxError::ConfigError`] if it is not a valid config.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LetterboxError::FileNotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| LetterboxError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Where the user config lives: `<config dir>/letterbox/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("letterbox").join("config.json"))
    }

    /// Loads the user config when one exists, otherwise the defaults.
    ///
    /// # Errors
    ///
    /// A config file that exists but cannot be read or parsed is an error;
    /// a missing one is not.
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}

/// Builder for ExtractorConfig.
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractorConfig::default() }
    }

    /// Sets the minimum word count.
    pub fn min_word_count(mut self, value: usize) -> Self {
        self.config.min_word_count = value;
        self
    }

    /// Replaces the essay-source keywords.
    pub fn essay_newsletters<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.essay_newsletters = values.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one essay-source keyword, lowercased.
    pub fn essay_newsletter(mut self, value: impl AsRef<str>) -> Self {
        let keyword = value.as_ref().trim().to_lowercase();
        if !keyword.is_empty() && !self.config.essay_newsletters.contains(&keyword) {
            self.config.essay_newsletters.push(keyword);
        }
        self
    }

    /// Replaces the newsletter service domains.
    pub fn newsletter_services<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.newsletter_services = values.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

impl Default for ExtractorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main entry point for article extraction.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Creates an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with a custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts the articles in one newsletter email.
    ///
    /// Parses the HTML once, runs the strategy pipeline, stamps each
    /// candidate with the newsletter fields, detects paywalls, classifies,
    /// and drops candidates shorter than `min_word_count`. The result keeps
    /// the order the winning strategy produced. Malformed or empty HTML
    /// yields an empty list rather than an error.
    pub fn extract_from_email(
        &self, html: &str, newsletter_name: &str, newsletter_email: &str, received_timestamp: &str,
    ) -> Vec<Article> {
        if html.is_empty() {
            return Vec::new();
        }

        let doc = Document::parse_with_preprocessing(html, &PreprocessConfig::default());
        let extraction = run_pipeline(&doc);
        let force_essay = is_essay_newsletter(newsletter_name, &self.config.essay_newsletters);

        let min_words = self.config.min_word_count;
        let candidates = extraction.articles.len();

        let articles: Vec<Article> = extraction
            .articles
            .into_iter()
            .map(|mut article| {
                article.newsletter_name = newsletter_name.to_string();
                article.newsletter_email = newsletter_email.to_string();
                article.received_timestamp = received_timestamp.to_string();
                article.paywall_detected = detect_paywall(&article.content);
                article.article_type = classify(&article, newsletter_email, force_essay);
                article
            })
            .filter(|article| {
                let keep = article.word_count >= min_words;
                if !keep {
                    debug!(title = %article.title, words = article.word_count, min_words, "Dropping short article");
                }
                keep
            })
            .collect();

        debug!(
            newsletter = newsletter_name,
            strategy = extraction.strategy.map(|s| s.name()).unwrap_or("none"),
            candidates,
            kept = articles.len(),
            "Extracted articles"
        );

        articles
    }

    /// Extracts the articles in an [`EmailMessage`], deriving the newsletter name from it.
    pub fn extract_message(&self, message: &EmailMessage) -> Vec<Article> {
        let name = newsletter_name(message);
        self.extract_from_email(&message.html, &name, &message.sender_email, &message.received_timestamp)
    }
}

/// Convenience function for one-liner extraction with defaults.
///
/// # Example
///
/// ```rust
/// use letterbox_core::extract_from_email;
///
/// assert!(extract_from_email("", "Any", "any@example.com", "").is_empty());
/// ```
pub fn extract_from_email(
    html: &str, newsletter_name: &str, newsletter_email: &str, received_timestamp: &str,
) -> Vec<Article> {
    Extractor::new().extract_from_email(html, newsletter_name, newsletter_email, received_timestamp)
}
