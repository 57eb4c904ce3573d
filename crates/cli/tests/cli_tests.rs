//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("letterbox");
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/letterbox-test-config").env_remove("RUST_LOG");
    cmd
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn digest_args() -> Vec<String> {
    vec![
        "--name".to_string(),
        "Tech Daily".to_string(),
        "--email".to_string(),
        "digest@techdaily.example.com".to_string(),
        get_fixture_path("digest_sections.html"),
    ]
}

fn stdout_json(output: &std::process::Output) -> Vec<serde_json::Value> {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    serde_json::from_str(&stdout).unwrap()
}

#[test]
fn test_cli_file_input() {
    let output = cmd().args(digest_args()).output().unwrap();
    assert!(output.status.success());

    let articles = stdout_json(&output);
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["article_type"], "link");
    assert_eq!(articles[1]["article_type"], "essay");
    assert_eq!(articles[0]["newsletter_name"], "Tech Daily");
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("digest_sections.html")).unwrap();
    cmd()
        .args(["-", "--name", "Tech Daily"])
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Our take on the chip race"));
}

#[test]
fn test_cli_stdin_is_default_input() {
    let html = std::fs::read_to_string(get_fixture_path("essay.html")).unwrap();
    cmd()
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Aggregation and the Long Tail of Attention"));
}

#[test]
fn test_cli_timestamp_is_stamped() {
    let output = cmd()
        .args(digest_args())
        .args(["--timestamp", "2026-01-05T08:00:00Z"])
        .output()
        .unwrap();

    for article in stdout_json(&output) {
        assert_eq!(article["received_timestamp"], "2026-01-05T08:00:00Z");
    }
}

#[test]
fn test_cli_text_format() {
    cmd()
        .args(["-f", "text"])
        .args(digest_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("Essays"))
        .stdout(predicate::str::contains("Links"))
        .stdout(predicate::str::starts_with("Tech Daily"));
}

#[test]
fn test_cli_pretty_json() {
    cmd()
        .arg("--pretty")
        .args(digest_args())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[\n"));
}

#[test]
fn test_cli_invalid_format() {
    cmd().args(["-f", "markdown"]).args(digest_args()).assert().failure();
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("articles.json");

    cmd()
        .args(["-o", output.to_str().unwrap()])
        .args(digest_args())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&output).unwrap();
    let articles: Vec<serde_json::Value> = serde_json::from_str(&written).unwrap();
    assert_eq!(articles.len(), 2);
}

#[test]
fn test_cli_invalid_file() {
    cmd()
        .arg("nonexistent.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input"));
}

#[test]
fn test_cli_empty_email_prints_empty_list() {
    cmd()
        .arg(get_fixture_path("empty.html"))
        .assert()
        .success()
        .stdout("[]\n");
}

#[test]
fn test_cli_essay_source() {
    let output = cmd()
        .args(["--name", "The Chip Letter", "--email", "digest@techdaily.example.com"])
        .args(["--essay-source", "chip letter", &get_fixture_path("digest_sections.html")])
        .output()
        .unwrap();
    assert!(output.status.success());

    let articles = stdout_json(&output);
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|a| a["article_type"] == "essay"));
}

#[test]
fn test_cli_min_words() {
    let output = cmd()
        .args(["--min-words", "10", &get_fixture_path("link_list.html")])
        .output()
        .unwrap();

    let articles = stdout_json(&output);
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["title"], "Chipmakers race to expand capacity");
}

#[test]
fn test_cli_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.json");
    std::fs::write(&config, r#"{"min_word_count": 10}"#).unwrap();

    let output = cmd()
        .args(["--config", config.to_str().unwrap(), &get_fixture_path("link_list.html")])
        .output()
        .unwrap();

    assert_eq!(stdout_json(&output).len(), 2);
}

#[test]
fn test_cli_invalid_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.json");
    std::fs::write(&config, "min_word_count = 10").unwrap();

    cmd()
        .args(["--config", config.to_str().unwrap(), &get_fixture_path("link_list.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_cli_verbose() {
    cmd()
        .arg("-v")
        .args(digest_args())
        .assert()
        .success()
        .stderr(predicate::str::contains("Letterbox"))
        .stderr(predicate::str::contains("Extracting articles"))
        .stderr(predicate::str::contains("Loaded extractor config"))
        .stderr(predicate::str::contains("Extracted articles"));
}

#[test]
fn test_cli_quiet_without_verbose() {
    cmd()
        .args(digest_args())
        .assert()
        .success()
        .stderr(predicate::str::contains("Extracted articles").not());
}

#[test]
fn test_cli_completions() {
    cmd()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("letterbox"));
}
