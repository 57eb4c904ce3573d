use letterbox_core::Article;
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!("\n{} {} {}", "Letterbox".bold().bright_blue(), "v".dimmed(), VERSION.dimmed());
    eprintln!("{}", "Split newsletter emails into essays and links\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print a labelled detail line under a step
pub fn print_detail(label: &str, value: &str) {
    eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_white());
}

/// Print one line per extracted article with its classification
pub fn print_articles_summary(articles: &[Article]) {
    let essays = articles.iter().filter(|a| a.is_essay()).count();
    print_detail("Essays", &essays.to_string());
    print_detail("Links", &(articles.len() - essays).to_string());

    for article in articles {
        let kind = if article.is_essay() {
            article.article_type.as_str().magenta().to_string()
        } else {
            article.article_type.as_str().cyan().to_string()
        };
        eprintln!("  {}  {} {}", kind, article.title.bright_white(), format!("({} words)", article.word_count).dimmed());
    }
    eprintln!();
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
