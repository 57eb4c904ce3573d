//! Library API integration tests
use letterbox_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

const DIGEST_NAME: &str = "Tech Daily";
const DIGEST_EMAIL: &str = "digest@techdaily.example.com";

#[test]
fn test_sections_digest() {
    let html = read_fixture("digest_sections.html");
    let articles = extract_from_email(&html, DIGEST_NAME, DIGEST_EMAIL, "2026-01-05T08:00:00Z");

    assert_eq!(articles.len(), 2);

    assert_eq!(articles[0].title, "Central bank holds rates steady as inflation cools");
    assert_eq!(
        articles[0].url,
        "https://www.nytimes.com/2026/01/05/business/central-bank-rates.html"
    );
    assert_eq!(articles[0].article_type, ArticleType::Link);

    assert_eq!(articles[1].title, "Our take on the chip race");
    assert_eq!(articles[1].article_type, ArticleType::Essay);
}

#[test]
fn test_sections_digest_article_fields() {
    let html = read_fixture("digest_sections.html");
    let articles = extract_from_email(&html, DIGEST_NAME, DIGEST_EMAIL, "2026-01-05T08:00:00Z");

    for article in &articles {
        assert!(article.word_count >= 100);
        assert!(!article.content.contains("  "));
        assert!(!article.content.contains("View in browser"));
        assert!(!article.content.contains("tracking pixel"));
        assert!(article.blurb.chars().count() <= 600);
        assert!(article.content.starts_with(&article.content_snippet));
        assert_eq!(article.newsletter_name, DIGEST_NAME);
        assert_eq!(article.newsletter_email, DIGEST_EMAIL);
        assert_eq!(article.received_timestamp, "2026-01-05T08:00:00Z");
        assert!(!article.paywall_detected);
    }

    assert!(articles[0].content.starts_with("The central bank left its benchmark rate unchanged"));
    assert!(articles[0].blurb.ends_with(" \u{2026}"));
    assert_eq!(articles[0].content_snippet.chars().count(), 500);
}

#[test]
fn test_short_sections_are_kept_with_lower_threshold() {
    let html = read_fixture("digest_sections.html");
    let extractor = Extractor::with_config(ExtractorConfig::builder().min_word_count(0).build());
    let articles = extractor.extract_from_email(&html, DIGEST_NAME, DIGEST_EMAIL, "");

    assert_eq!(articles.len(), 3);
    assert_eq!(articles[2].title, "Quick hits");
    assert_eq!(articles[2].url, "https://example.org/news/quick-item");
    assert_eq!(articles[2].article_type, ArticleType::Link);
}

#[test]
fn test_strategy_precedence() {
    let html = read_fixture("digest_sections.html");
    let doc = Document::parse_with_preprocessing(&html, &PreprocessConfig::default());

    let extraction = run_pipeline(&doc);
    assert_eq!(extraction.strategy, Some(Strategy::Sections));
    assert!(extraction.articles.iter().all(|a| a.title != "View in browser"));
}

#[test]
fn test_link_list() {
    let html = read_fixture("link_list.html");
    let extractor = Extractor::with_config(ExtractorConfig::builder().min_word_count(10).build());
    let articles = extractor.extract_from_email(&html, "Links Weekly", "hello@links.example.net", "");

    let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Chipmakers race to expand capacity", "Central bank holds rates steady"]);

    assert!(articles.iter().all(Article::is_link));
    assert_eq!(
        articles[0].blurb,
        "Three of the largest foundries announced new plants this week, betting that demand for AI accelerators will hold up through the end of the decade."
    );
}

#[test]
fn test_link_list_drops_noise() {
    let html = read_fixture("link_list.html");
    let extractor = Extractor::with_config(ExtractorConfig::builder().min_word_count(0).build());
    let articles = extractor.extract_from_email(&html, "Links Weekly", "hello@links.example.net", "");

    for article in &articles {
        assert!(!is_noise(&article.url, &article.title));
        assert!(!article.url.contains("unsubscribe"));
        assert!(!article.url.contains("twitter.com"));
        assert!(article.title.chars().count() >= 10);
    }
}

#[test]
fn test_link_list_blurbs_are_below_default_threshold() {
    let html = read_fixture("link_list.html");
    assert!(extract_from_email(&html, "Links Weekly", "hello@links.example.net", "").is_empty());
}

#[test]
fn test_single_essay_falls_back_to_whole_email() {
    let html = read_fixture("essay.html");
    let articles = extract_from_email(&html, "Stratechery", "ben@stratechery.example.com", "");

    assert_eq!(articles.len(), 1);
    let essay = &articles[0];
    assert_eq!(essay.title, "Aggregation and the Long Tail of Attention");
    assert_eq!(essay.url, "");
    assert_eq!(essay.blurb, "");
    assert!(essay.is_essay());
    assert!(essay.content.contains("The long tail matters here."));
    assert!(!essay.content.contains("margin"));
}

#[test]
fn test_essay_without_url_is_essay_for_any_newsletter() {
    let html = read_fixture("essay.html");
    let articles = extract_from_email(&html, "Some Other Letter", "news@random.example.com", "");

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].article_type, ArticleType::Essay);
}

#[test]
fn test_essay_source_forces_every_article() {
    let html = read_fixture("digest_sections.html");
    let articles = extract_from_email(&html, "Clouded Judgement", "jamin@cloudedjudgement.example.com", "");

    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(Article::is_essay));
}

#[test]
fn test_empty_inputs() {
    assert!(extract_from_email("", "Name", "a@b.com", "").is_empty());
    assert!(extract_from_email(&read_fixture("empty.html"), "Name", "a@b.com", "").is_empty());
}

#[test]
fn test_idempotence() {
    let extractor = Extractor::new();
    for fixture in ["digest_sections.html", "link_list.html", "essay.html", "empty.html"] {
        let html = read_fixture(fixture);
        let first = extractor.extract_from_email(&html, DIGEST_NAME, DIGEST_EMAIL, "t");
        let second = extractor.extract_from_email(&html, DIGEST_NAME, DIGEST_EMAIL, "t");
        assert_eq!(first, second, "{fixture} should extract identically twice");
    }
}

#[test]
fn test_shared_extractor_across_threads() {
    let extractor = Extractor::new();
    let html = read_fixture("digest_sections.html");
    let expected = extractor.extract_from_email(&html, DIGEST_NAME, DIGEST_EMAIL, "");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| extractor.extract_from_email(&html, DIGEST_NAME, DIGEST_EMAIL, "")))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_extract_message() {
    let mut headers = std::collections::HashMap::new();
    headers.insert("List-Unsubscribe".to_string(), "<https://techdaily.example.com/unsubscribe>".to_string());

    let message = EmailMessage {
        subject: "Tech Daily - Rates and chips".to_string(),
        sender_name: String::new(),
        sender_email: DIGEST_EMAIL.to_string(),
        received_timestamp: "2026-01-05T08:00:00Z".to_string(),
        html: read_fixture("digest_sections.html"),
        headers,
    };

    assert!(is_newsletter(&message, &ExtractorConfig::default().newsletter_services));
    assert!(!should_skip(&message));

    let articles = Extractor::new().extract_message(&message);
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|a| a.newsletter_name == "Tech Daily"));
}

#[test]
fn test_json_output() {
    let html = read_fixture("digest_sections.html");
    let articles = extract_from_email(&html, DIGEST_NAME, DIGEST_EMAIL, "");

    let json = convert_to_json(&articles, &JsonConfig::default()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let items = parsed.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["article_type"], "link");
    assert_eq!(items[1]["article_type"], "essay");
    assert!(items[0]["author"].is_null());

    let round_trip: Vec<Article> = serde_json::from_str(&json).unwrap();
    assert_eq!(round_trip, articles);
}

#[test]
fn test_text_output() {
    let html = read_fixture("digest_sections.html");
    let articles = extract_from_email(&html, DIGEST_NAME, DIGEST_EMAIL, "");

    let text = convert_to_text(&articles, &TextConfig { line_width: 80, include_header: true });
    assert!(text.starts_with("Tech Daily"));
    assert!(text.find("* Our take on the chip race").unwrap() < text.find("* Central bank holds").unwrap());
    assert!(text.lines().all(|line| line.chars().count() <= 80));
}
