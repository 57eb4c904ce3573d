use crate::Result;
use crate::article::Article;
use serde_json::Value;

/// Configuration for JSON output
#[derive(Debug, Clone)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
    /// Include the full `content` field; the snippet and blurb are always kept
    pub include_content: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { pretty: false, include_content: true }
    }
}

/// Serializes one article, dropping `content` when it is not wanted
fn article_to_value(article: &Article, config: &JsonConfig) -> Result<Value> {
    let mut value = article.to_json()?;
    if !config.include_content
        && let Value::Object(fields) = &mut value
    {
        fields.remove("content");
    }
    Ok(value)
}

/// Convert articles to a JSON array
pub fn convert_to_json(articles: &[Article], config: &JsonConfig) -> Result<String> {
    let values = articles
        .iter()
        .map(|article| article_to_value(article, config))
        .collect::<Result<Vec<_>>>()?;

    let output = Value::Array(values);
    if config.pretty { Ok(serde_json::to_string_pretty(&output)?) } else { Ok(serde_json::to_string(&output)?) }
}

/// JSON formatter with configurable options
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    pub fn convert(&self, articles: &[Article]) -> Result<String> {
        convert_to_json(articles, &self.config)
    }
}
