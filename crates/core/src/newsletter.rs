//! Newsletter detection heuristics.
//!
//! The mail-fetch side hands over an [`EmailMessage`]; these functions decide
//! whether it is a newsletter worth extracting, which service sent it, and
//! what to call it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"(?i)<a\s+(?:[^>]*?\s+)?href="#).unwrap());

static SUBJECT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"newsletter", r"digest", r"weekly\s+update", r"daily\s+brief", r"this\s+week", r"#\d+"]
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
});

const SKIP_SENDER_PATTERNS: &[&str] =
    &["noreply", "no-reply", "donotreply", "notifications@", "alerts@", "digest@google"];

const SKIP_SUBJECT_PATTERNS: &[&str] =
    &["verify your", "reset password", "confirm your", "welcome to", "receipt", "invoice"];

/// An email as delivered by the mail-fetch collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailMessage {
    pub subject: String,
    pub sender_name: String,
    pub sender_email: String,
    /// ISO-8601 receive time, passed through to every extracted article.
    pub received_timestamp: String,
    pub html: String,
    pub headers: HashMap<String, String>,
}

impl EmailMessage {
    /// Looks up a header by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_value(&self.headers, name)
    }
}

fn header_value<'h>(headers: &'h HashMap<String, String>, name: &str) -> Option<&'h str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Lowercased domain of an email address, or an empty string.
///
/// # Example
///
/// ```rust
/// use letterbox_core::newsletter::sender_domain;
///
/// assert_eq!(sender_domain("Author@MySubstack.Substack.com"), "mysubstack.substack.com");
/// assert_eq!(sender_domain("not-an-address"), "");
/// ```
pub fn sender_domain(sender_email: &str) -> String {
    sender_email
        .split('@')
        .nth(1)
        .map(|domain| domain.trim().to_lowercase())
        .unwrap_or_default()
}

/// Names the newsletter service that sent an email, e.g. `"substack"`.
///
/// Checks the sender address against the known service domains, then the
/// `X-Mailer` header, then the `Return-Path` header.
pub fn detect_newsletter_service(
    sender_email: &str, headers: &HashMap<String, String>, services: &[String],
) -> Option<String> {
    let service_label = |service: &String| service.split('.').next().unwrap_or(service).to_string();

    let sender = sender_email.to_lowercase();
    if let Some(service) = services.iter().find(|s| sender.contains(&s.to_lowercase())) {
        return Some(service_label(service));
    }

    let mailer = header_value(headers, "X-Mailer").unwrap_or_default().to_lowercase();
    for known in ["substack", "beehiiv"] {
        if mailer.contains(known) {
            return Some(known.to_string());
        }
    }

    let return_path = header_value(headers, "Return-Path").unwrap_or_default().to_lowercase();
    services
        .iter()
        .find(|s| return_path.contains(&s.to_lowercase()))
        .map(service_label)
}

/// Decides whether an email looks like a newsletter.
pub fn is_newsletter(message: &EmailMessage, services: &[String]) -> bool {
    if message.header("List-Unsubscribe").is_some() || message.header("List-Unsubscribe-Post").is_some() {
        return true;
    }

    if detect_newsletter_service(&message.sender_email, &message.headers, services).is_some() {
        return true;
    }

    if message
        .header("Precedence")
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("bulk"))
    {
        return true;
    }

    if message.html.to_lowercase().contains("unsubscribe") && ANCHOR_RE.find_iter(&message.html).count() > 3 {
        return true;
    }

    let subject = message.subject.to_lowercase();
    if SUBJECT_PATTERNS.iter().any(|pattern| pattern.is_match(&subject)) {
        return true;
    }

    message
        .header("Via")
        .is_some_and(|via| via.to_lowercase().contains("substack"))
}

/// Derives a display name for the newsletter.
///
/// Prefers the sender name (minus " via Substack" and " Newsletter"), then a
/// subject prefix before " - " or ": ", then the sender's domain label.
///
/// # Example
///
/// ```rust
/// use letterbox_core::newsletter::{EmailMessage, newsletter_name};
///
/// let message = EmailMessage { sender_name: "Dwarkesh Patel via Substack".to_string(), ..Default::default() };
/// assert_eq!(newsletter_name(&message), "Dwarkesh Patel");
///
/// let message = EmailMessage { sender_email: "hello@morningbrew.com".to_string(), ..Default::default() };
/// assert_eq!(newsletter_name(&message), "Morningbrew");
/// ```
pub fn newsletter_name(message: &EmailMessage) -> String {
    let sender_name = message
        .sender_name
        .replace(" via Substack", "")
        .replace(" Newsletter", "");
    let sender_name = sender_name.trim();
    if !sender_name.is_empty() {
        return sender_name.to_string();
    }

    for separator in [" - ", ": "] {
        if let Some((prefix, _)) = message.subject.split_once(separator) {
            return prefix.trim().to_string();
        }
    }

    let domain = sender_domain(&message.sender_email);
    match domain.split('.').next() {
        Some(label) if !label.is_empty() => title_case(label),
        _ => "Unknown Newsletter".to_string(),
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// True for transactional or automated mail that should never be extracted.
pub fn should_skip(message: &EmailMessage) -> bool {
    let sender = message.sender_email.to_lowercase();
    if SKIP_SENDER_PATTERNS.iter().any(|pattern| sender.contains(pattern)) {
        return true;
    }

    let subject = message.subject.to_lowercase();
    SKIP_SUBJECT_PATTERNS.iter().any(|pattern| subject.contains(pattern))
}
