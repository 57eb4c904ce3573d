mod echo;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use letterbox_core::{
    Document, Extractor, ExtractorConfig, JsonConfig, TextConfig, convert_to_json, convert_to_text, read_input,
};
use owo_colors::OwoColorize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::echo::{
    format_size, print_articles_summary, print_banner, print_detail, print_info, print_step, print_success,
    print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Text output wraps at this width
const TEXT_LINE_WIDTH: usize = 80;

/// Output format for extracted articles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            _ => Err(format!("Invalid format: {}. Valid options: json, text", s)),
        }
    }
}

/// Split a newsletter email into articles and classify each as an essay or a link
#[derive(Parser, Debug)]
#[command(name = "letterbox")]
#[command(author = "Letterbox Contributors")]
#[command(version)]
#[command(about = "Split newsletter emails into essays and links", long_about = None)]
struct Args {
    /// HTML email body file, or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Newsletter display name
    #[arg(long, value_name = "NAME")]
    name: Option<String>,

    /// Sender email address
    #[arg(long, value_name = "EMAIL")]
    email: Option<String>,

    /// Time the email was received (ISO-8601)
    #[arg(long, value_name = "TIMESTAMP")]
    timestamp: Option<String>,

    /// Output format (json, text)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file (default: the user config, when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Minimum word count for an article to be kept
    #[arg(long, value_name = "NUM")]
    min_words: Option<usize>,

    /// Treat newsletters whose name contains NAME as essay sources (repeatable)
    #[arg(long, value_name = "NAME")]
    essay_source: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completions: Option<clap_complete::Shell>,
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the default filter
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "warn,letterbox=debug,letterbox_core=debug" } else { "warn" };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr).with_target(true))
        .try_init();
}

/// Loads the config file (or the user default) and applies the command-line overrides
fn load_config(args: &Args) -> anyhow::Result<ExtractorConfig> {
    let base = match &args.config {
        Some(path) => {
            ExtractorConfig::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))?
        }
        None => ExtractorConfig::load_or_default().context("Failed to load user config")?,
    };

    let mut builder = ExtractorConfig::builder()
        .min_word_count(args.min_words.unwrap_or(base.min_word_count))
        .essay_newsletters(base.essay_newsletters)
        .newsletter_services(base.newsletter_services);

    for source in &args.essay_source {
        builder = builder.essay_newsletter(source);
    }

    let config = builder.build();
    debug!(
        min_word_count = config.min_word_count,
        essay_newsletters = config.essay_newsletters.len(),
        "Loaded extractor config"
    );
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "letterbox", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let config = load_config(&args)?;

    if args.verbose {
        let source = if args.input == "-" { "stdin".to_string() } else { args.input.clone() };
        print_step(1, 3, &format!("Reading from {}", source.bright_white()));
    }

    let html = read_input(&args.input).with_context(|| format!("Failed to read input: {}", args.input))?;

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        if let Some(title) = Document::parse(&html).title() {
            print_detail("Title", &title);
        }
        eprintln!();
        print_step(2, 3, "Extracting articles");
    }

    let name = args.name.clone().unwrap_or_default();
    let email = args.email.clone().unwrap_or_default();
    let timestamp = args.timestamp.clone().unwrap_or_default();

    let extractor = Extractor::with_config(config);
    let articles = extractor.extract_from_email(&html, &name, &email, &timestamp);

    info!(
        count = articles.len(),
        essays = articles.iter().filter(|a| a.is_essay()).count(),
        "Extracted articles"
    );

    if args.verbose {
        print_articles_summary(&articles);
    }
    if articles.is_empty() {
        print_warning("No articles found");
    }

    let output = match args.format {
        OutputFormat::Json => {
            let config = JsonConfig { pretty: args.pretty, include_content: true };
            let mut json = convert_to_json(&articles, &config).context("Failed to convert to JSON")?;
            json.push('\n');
            json
        }
        OutputFormat::Text => {
            let config = TextConfig { line_width: TEXT_LINE_WIDTH, include_header: true };
            let mut text = convert_to_text(&articles, &config);
            if !text.is_empty() {
                text.push('\n');
            }
            text
        }
    };

    if args.verbose {
        print_step(3, 3, "Writing output");
        print_detail("Format", &format!("{:?}", args.format));
        eprintln!();
    }

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    Ok(())
}
