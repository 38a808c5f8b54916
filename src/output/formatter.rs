//! Output formatters: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::ScoreReport;
use crate::processing::document::ParsedResume;
use crate::quality::QualityScore;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String>;
    fn format_parsed(&self, resume: &ParsedResume) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Dispatches to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let (badge, color) = match score {
            90..=100 => ("EXCELLENT", Color::Green),
            80..=89 => ("VERY GOOD", Color::BrightGreen),
            70..=79 => ("GOOD", Color::Yellow),
            60..=69 => ("FAIR", Color::BrightYellow),
            50..=59 => ("BELOW AVG", Color::Red),
            _ => ("POOR", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_list(&self, label: &str, items: &[String], color: Color) -> String {
        if items.is_empty() {
            return format!("{}: -\n", label);
        }
        format!("{}: {}\n", label, self.colorize(&items.join(", "), color))
    }

    fn format_quality(&self, name: &str, quality: &QualityScore) -> String {
        let mut output = format!("{}: {:.0}/100\n", name, quality.score);
        if self.detailed {
            for item in &quality.feedback {
                output.push_str(&format!("   - {}\n", item));
            }
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let ats = &report.ats_score;
        let quality = &report.quality;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME SCORE", 1));
        output.push_str(&format!(
            "Generated: {} | Resume: {} | Job: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.resume_file,
            report.metadata.job_file
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {}% {}\n",
            ats.overall_score,
            self.format_score_badge(ats.overall_score)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(report.verdict(), Color::Cyan)));
        output.push_str(&format!("{}\n", quality.summary));

        output.push_str(&self.format_header("Score Breakdown", 3));
        let rows = [
            ("🎯 Skills", ats.skills_score, report.weights.skills),
            ("💼 Experience", ats.experience_score, report.weights.experience),
            ("🔍 Keywords", ats.keywords_score, report.weights.keywords),
            ("📐 Formatting", ats.formatting_score, report.weights.formatting),
        ];
        for (name, score, weight) in rows {
            output.push_str(&format!("{}: {}% (weight: {:.0}%)\n", name, score, weight * 100.0));
        }

        output.push_str(&self.format_header("Skills & Keywords", 3));
        output.push_str(&self.format_list("✅ Matched skills", &ats.matched_skills, Color::Green));
        output.push_str(&self.format_list("❌ Missing skills", &ats.missing_skills, Color::Red));
        output.push_str(&self.format_list("➕ Preferred skills matched", &ats.matched_preferred_skills, Color::Green));
        output.push_str(&self.format_list("✅ Matched keywords", &ats.matched_keywords, Color::Green));
        output.push_str(&self.format_list("❌ Missing keywords", &ats.missing_keywords, Color::Red));
        if self.detailed {
            output.push_str(&self.format_list("🔑 Top job terms", &ats.relevant_terms, Color::Cyan));
        }

        output.push_str(&self.format_header("Quality", 3));
        output.push_str(&self.format_quality("✍️  Bullet points", &quality.bullet_point_quality));
        output.push_str(&self.format_quality("🗣️  Language", &quality.language_quality));
        output.push_str(&format!(
            "📈 Quantified results: {} ({} found)\n",
            if quality.impact_analysis.has_quantifiable_results { "yes" } else { "no" },
            quality.impact_analysis.examples.len()
        ));
        if self.detailed {
            for example in &quality.impact_analysis.examples {
                output.push_str(&format!("   - {}\n", example));
            }
        }

        if !quality.strengths.is_empty() {
            output.push_str(&self.format_header("Strengths", 3));
            for strength in &quality.strengths {
                output.push_str(&format!("💪 {}\n", strength));
            }
        }
        if !quality.weaknesses.is_empty() {
            output.push_str(&self.format_header("Weaknesses", 3));
            for weakness in &quality.weaknesses {
                output.push_str(&format!("⚠️  {}\n", weakness));
            }
        }

        if !report.suggestions.is_empty() {
            output.push_str(&self.format_header("Suggestions", 2));
            for (i, suggestion) in report.suggestions.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, suggestion));
            }
        }

        Ok(output)
    }

    fn format_parsed(&self, resume: &ParsedResume) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("📄 PARSED RESUME", 1));
        output.push_str(&format!("Characters: {}\n", resume.content.chars().count()));

        let contact = &resume.contact_info;
        let fields = [
            ("Email", &contact.email),
            ("Phone", &contact.phone),
            ("LinkedIn", &contact.linkedin),
            ("GitHub", &contact.github),
        ];
        output.push_str(&self.format_header("Contact", 3));
        for (label, value) in fields {
            output.push_str(&format!("{}: {}\n", label, value.as_deref().unwrap_or("-")));
        }

        output.push_str(&self.format_header(&format!("Skills ({})", resume.skills.len()), 3));
        output.push_str(&format!("{}\n", resume.skills.join(", ")));

        let blocks = [
            ("Experience", &resume.experience),
            ("Education", &resume.education),
            ("Projects", &resume.projects),
        ];
        for (title, entries) in blocks {
            output.push_str(&self.format_header(&format!("{} ({})", title, entries.len()), 3));
            for entry in entries.iter() {
                let first_line = entry.lines().next().unwrap_or_default();
                output.push_str(&format!("- {}\n", first_line));
            }
        }

        if resume.has_no_sections() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("No sections detected: check the resume's headings.", Color::Yellow)
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_parsed(&self, resume: &ParsedResume) -> Result<String> {
        self.to_json(resume)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: u8) -> &'static str {
        match score {
            90..=100 => "🟢 Excellent",
            80..=89 => "🟡 Very Good",
            70..=79 => "🟠 Good",
            60..=69 => "🔴 Fair",
            50..=59 => "🔴 Below Average",
            _ => "🔴 Poor",
        }
    }

    fn bullet_list(items: &[String]) -> String {
        if items.is_empty() {
            return "_None_\n\n".to_string();
        }
        let mut output: String = items.iter().map(|item| format!("- {}\n", item)).collect();
        output.push('\n');
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ScoreReport) -> Result<String> {
        let ats = &report.ats_score;
        let quality = &report.quality;
        let mut output = String::new();

        output.push_str("# 📊 Resume Score Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Version:** {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.scorer_version
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_name(&report.metadata.resume_file),
                file_name(&report.metadata.job_file)
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {}% {}\n\n",
            ats.overall_score,
            Self::markdown_score_badge(ats.overall_score)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict()));
        output.push_str(&format!("{}\n\n", quality.summary));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        let rows = [
            ("🎯 Skills", ats.skills_score, report.weights.skills),
            ("💼 Experience", ats.experience_score, report.weights.experience),
            ("🔍 Keywords", ats.keywords_score, report.weights.keywords),
            ("📐 Formatting", ats.formatting_score, report.weights.formatting),
        ];
        for (name, score, weight) in rows {
            output.push_str(&format!("| {} | {}% | {:.0}% |\n", name, score, weight * 100.0));
        }
        output.push('\n');

        output.push_str("## Skills\n\n");
        output.push_str("**Matched:**\n\n");
        output.push_str(&Self::bullet_list(&ats.matched_skills));
        output.push_str("**Missing:**\n\n");
        output.push_str(&Self::bullet_list(&ats.missing_skills));
        if !ats.matched_preferred_skills.is_empty() {
            output.push_str("**Preferred skills matched:**\n\n");
            output.push_str(&Self::bullet_list(&ats.matched_preferred_skills));
        }

        output.push_str("## Keywords\n\n");
        output.push_str("**Matched:**\n\n");
        output.push_str(&Self::bullet_list(&ats.matched_keywords));
        output.push_str("**Missing:**\n\n");
        output.push_str(&Self::bullet_list(&ats.missing_keywords));

        output.push_str("## Quality\n\n");
        output.push_str("| Check | Score |\n");
        output.push_str("|-------|-------|\n");
        output.push_str(&format!("| Bullet points | {:.0} |\n", quality.bullet_point_quality.score));
        output.push_str(&format!("| Language | {:.0} |\n\n", quality.language_quality.score));

        output.push_str("### Quantified Results\n\n");
        output.push_str(&Self::bullet_list(&quality.impact_analysis.examples));

        output.push_str("### Strengths\n\n");
        output.push_str(&Self::bullet_list(&quality.strengths));
        output.push_str("### Weaknesses\n\n");
        output.push_str(&Self::bullet_list(&quality.weaknesses));

        output.push_str("## Suggestions\n\n");
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }

        Ok(output)
    }

    fn format_parsed(&self, resume: &ParsedResume) -> Result<String> {
        let mut output = String::from("# 📄 Parsed Resume\n\n");
        output.push_str(&format!("## Skills ({})\n\n", resume.skills.len()));
        output.push_str(&Self::bullet_list(&resume.skills));
        output.push_str(&format!("## Experience ({})\n\n", resume.experience.len()));
        for entry in &resume.experience {
            output.push_str(&format!("```\n{}\n```\n\n", entry));
        }
        output.push_str(&format!("## Education ({})\n\n", resume.education.len()));
        output.push_str(&Self::bullet_list(&resume.education));
        output.push_str(&format!("## Projects ({})\n\n", resume.projects.len()));
        output.push_str(&Self::bullet_list(&resume.projects));
        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_report(&self, report: &ScoreReport, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_report(report)
    }

    pub fn generate_parsed(&self, resume: &ParsedResume, format: OutputFormat) -> Result<String> {
        self.formatter(format).format_parsed(resume)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_score{}.{}", base_name, timestamp_suffix, extension)
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::ScoringWeights;
    use crate::processing::document::JobDescriptionInput;

    fn sample_report() -> ScoreReport {
        let resume = crate::parse_text("Skills\nRust, Docker\n\nExperience\nEngineer, Acme 2020 - 2023\n• Built Rust services");
        let job = JobDescriptionInput::new("Rust engineer")
            .with_required_skills(["Rust", "AWS"])
            .with_keywords(["rust"]);
        ScoreReport::new(crate::analyze(&resume, &job), ScoringWeights::DEFAULT, "cv/resume.txt", "job.toml")
    }

    #[test]
    fn test_console_without_colors() {
        let report = sample_report();
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(output.contains(&format!("Overall Score: {}%", report.overall_score())));
        assert!(output.contains("Missing skills: AWS"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_json_round_trips_scores() {
        let report = sample_report();
        let output = ReportGenerator::new().generate_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["ats_score"]["overall_score"], report.overall_score());
        assert_eq!(value["ats_score"]["missing_skills"][0], "AWS");
    }

    #[test]
    fn test_markdown_sections() {
        let output = MarkdownFormatter::new(true).format_report(&sample_report()).unwrap();
        assert!(output.starts_with("# 📊 Resume Score Report"));
        assert!(output.contains("**Resume:** `resume.txt`"));
        assert!(output.contains("| 🎯 Skills |"));
        assert!(output.contains("## Suggestions"));
    }

    #[test]
    fn test_parsed_output() {
        let resume = crate::parse_text("Skills\nRust, Docker");
        let output = ReportGenerator::with_options(false, false, false, false)
            .generate_parsed(&resume, OutputFormat::Console)
            .unwrap();
        assert!(output.contains("Skills (2)"));
        assert!(output.contains("Rust, Docker"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(OutputFormat::Json, "docs/jane.pdf", false), "jane_score.json");
        assert_eq!(suggest_filename(OutputFormat::Markdown, "jane.docx", false), "jane_score.md");
    }
}
