pub mod article;
pub mod classify;
pub mod error;
pub mod extract;
pub mod extractor;
pub mod formatters;
pub mod input;
pub mod newsletter;
pub mod parse;
pub mod preprocess;
pub mod scoring;

pub use article::{Article, ArticleType, RawBucket};
pub use classify::{classify, detect_paywall, is_essay_newsletter};
pub use error::{LetterboxError, Result};
#[doc(hidden)]
pub use extract::{Extraction, Strategy, run_pipeline};
pub use extractor::{Extractor, ExtractorConfig, ExtractorConfigBuilder, extract_from_email};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter};
pub use formatters::{convert_to_json, convert_to_text};
pub use input::{read_file, read_input, read_stdin};
pub use newsletter::{EmailMessage, detect_newsletter_service, is_newsletter, newsletter_name, should_skip};
pub use parse::Document;
#[doc(hidden)]
pub use preprocess::PreprocessConfig;
pub use preprocess::preprocess_html;
pub use scoring::{ScoredLink, is_noise, score_link};
