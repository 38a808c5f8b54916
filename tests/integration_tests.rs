//! Integration tests for the resume scorer

use resume_scorer::error::ResumeScorerError;
use resume_scorer::input::manager::InputManager;
use resume_scorer::output::formatter::ReportGenerator;
use resume_scorer::output::report::ScoreReport;
use resume_scorer::{analyze, parse, parse_text, JobDescriptionInput, ParsedResume, ScoringWeights};
use std::io::{Cursor, Write};
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

async fn load_fixture_resume(name: &str) -> ParsedResume {
    let mut manager = InputManager::new();
    let text = manager.extract_text(&Path::new("tests/fixtures").join(name)).await.unwrap();
    parse_text(&text)
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("• JavaScript"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(ResumeScorerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(ResumeScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_size_limit_enforced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("big.txt");
    std::fs::write(&path, "x".repeat(2048)).unwrap();

    let mut manager = InputManager::new().with_max_file_bytes(1024);
    let result = manager.extract_text(&path).await;
    assert!(matches!(result, Err(ResumeScorerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_docx_file_loading() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.docx");
    std::fs::write(&path, build_docx(&["Jane Roe", "Skills", "Rust, Go, Kubernetes"])).unwrap();

    let mut manager = InputManager::new();
    let text = manager.extract_text(&path).await.unwrap();
    let resume = parse_text(&text);

    assert_eq!(resume.skills, vec!["Rust", "Go", "Kubernetes"]);
}

#[tokio::test]
async fn test_load_job_formats() {
    let mut manager = InputManager::new();

    let toml_job = manager.load_job(Path::new("tests/fixtures/sample_job.toml")).await.unwrap();
    assert_eq!(toml_job.required_skills.len(), 5);
    assert_eq!(toml_job.experience_level.as_deref(), Some("senior"));

    let json_job = manager.load_job(Path::new("tests/fixtures/sample_job.json")).await.unwrap();
    assert_eq!(json_job.required_skills, vec!["Rust", "Kubernetes", "Terraform"]);
    assert!(json_job.preferred_skills.is_empty());

    let text_job = manager.load_job(Path::new("tests/fixtures/sample_job.txt")).await.unwrap();
    assert!(text_job.description.contains("frontend engineer"));
    assert!(text_job.required_skills.is_empty());
}

#[tokio::test]
async fn test_segment_sample_resume() {
    let resume = load_fixture_resume("sample_resume.txt").await;

    assert!(resume.skills.len() >= 10);
    assert_eq!(resume.experience.len(), 2);
    assert_eq!(resume.education.len(), 1);
    assert_eq!(resume.projects.len(), 2);
    assert_eq!(resume.contact_info.email.as_deref(), Some("john.doe@example.com"));
    assert_eq!(resume.contact_info.github.as_deref(), Some("github.com/johndoe"));
}

#[tokio::test]
async fn test_markdown_resume_segments_like_text() {
    let resume = load_fixture_resume("sample_resume.md").await;

    for skill in ["JavaScript", "TypeScript", "React", "Node.js", "PostgreSQL", "Docker"] {
        assert!(resume.skills.contains(&skill.to_string()), "missing {}", skill);
    }
    assert_eq!(resume.experience.len(), 1);
    assert!(resume.experience[0].contains("• Led a team of 5 engineers"));
}

#[tokio::test]
async fn test_end_to_end_scoring() {
    let resume = load_fixture_resume("sample_resume.txt").await;
    let job = InputManager::new()
        .load_job(Path::new("tests/fixtures/sample_job.toml"))
        .await
        .unwrap();

    let result = analyze(&resume, &job);
    let ats = &result.ats_score;

    assert_eq!(ats.matched_skills, vec!["React", "Node.js", "AWS", "PostgreSQL"]);
    assert_eq!(ats.missing_skills, vec!["Kubernetes"]);
    assert_eq!(ats.matched_preferred_skills, vec!["Docker", "TypeScript"]);
    assert_eq!(ats.missing_keywords, vec!["kubernetes", "graphql"]);
    assert_eq!(ats.formatting_score, 100);
    assert!(ats.overall_score >= 60);

    let c = ats.component_scores;
    let weighted = c.skills * 0.4 + c.experience * 0.3 + c.keywords * 0.2 + c.formatting * 0.1;
    assert_eq!(ats.overall_score, weighted.round() as u8);

    let quality = &result.quality;
    assert!(quality.impact_analysis.has_quantifiable_results);
    assert!(quality.impact_analysis.examples.len() >= 4);
    assert!(quality.strengths.iter().any(|s| s.starts_with("Broad skill set")));
    assert!(!quality.summary.is_empty());
}

#[tokio::test]
async fn test_report_rendering() {
    let resume = load_fixture_resume("sample_resume.txt").await;
    let job = JobDescriptionInput::new("React developer")
        .with_required_skills(["React", "Kubernetes"])
        .with_keywords(["react"]);
    let report = ScoreReport::new(analyze(&resume, &job), ScoringWeights::DEFAULT, "resume.txt", "job.txt");

    let generator = ReportGenerator::with_options(false, true, true, true);
    let json = generator
        .generate_report(&report, resume_scorer::config::OutputFormat::Json)
        .unwrap();
    let markdown = generator
        .generate_report(&report, resume_scorer::config::OutputFormat::Markdown)
        .unwrap();

    assert!(json.contains("\"missing_skills\""));
    assert!(markdown.contains("- Kubernetes"));
    assert!(report.suggestions[0].contains("Kubernetes"));
}

#[test]
fn test_parse_entry_point_formats() {
    let docx = build_docx(&["Skills", "Rust, Docker", "Experience", "Engineer, Acme 2019 - 2022 building Rust services"]);
    let resume = parse(&docx, Some(DOCX_MIME)).unwrap();
    assert_eq!(resume.skills, vec!["Rust", "Docker"]);
    assert_eq!(resume.experience.len(), 1);

    let plain = parse(b"Skills\nGo", None).unwrap();
    assert_eq!(plain.skills, vec!["Go"]);

    assert!(matches!(
        parse(b"<html></html>", Some("text/html")),
        Err(ResumeScorerError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        parse(b"not a zip", Some(DOCX_MIME)),
        Err(ResumeScorerError::ExtractionFailed(_))
    ));
    assert!(matches!(
        parse(&[0xff, 0xfe, 0xfd], None),
        Err(ResumeScorerError::ExtractionFailed(_))
    ));
}

#[test]
fn test_unstructured_text_is_not_an_error() {
    let resume = parse_text("just some words without any structure at all");
    assert!(resume.has_no_sections());

    let result = analyze(&resume, &JobDescriptionInput::new(""));
    assert_eq!(result.ats_score.formatting_score, 0);
    assert_eq!(result.ats_score.overall_score, 0);
    assert!(result.ats_score.suggestions.len() <= 10);
}
