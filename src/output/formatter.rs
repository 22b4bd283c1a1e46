//! Output formatters: console, JSON and Markdown renderings of a report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::feedback::{ATS_HEADER, CONTENT_HEADER, PRIORITY_HEADER, STRUCTURE_HEADER};
use crate::output::report::ResumeReport;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting resume reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colored severity markers
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for API integration and persistence
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// Color for a feedback line, keyed off its leading marker.
fn line_color(line: &str) -> Option<Color> {
    if line.starts_with('❌') || line.starts_with('🚫') {
        Some(Color::Red)
    } else if line.starts_with("⚠️") || line.starts_with('🔧') {
        Some(Color::Yellow)
    } else if line.starts_with('✅') || line.starts_with('🎉') || line.starts_with('👍') {
        Some(Color::Green)
    } else if line.starts_with('🎯') || line.starts_with('📊') || line.starts_with('💡') {
        Some(Color::Cyan)
    } else {
        None
    }
}

fn is_section_header(line: &str) -> bool {
    matches!(line, CONTENT_HEADER | STRUCTURE_HEADER | ATS_HEADER | PRIORITY_HEADER)
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

    fn format_score_badge(&self, score: f64) -> String {
        let (badge, color) = match score {
            s if s >= 85.0 => ("OUTSTANDING", Color::Green),
            s if s >= 75.0 => ("STRONG", Color::BrightGreen),
            s if s >= 65.0 => ("GOOD", Color::Yellow),
            s if s > 0.0 => ("NEEDS WORK", Color::BrightRed),
            _ => ("INVALID", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    /// Feedback lines keep their text verbatim; only color is added.
    fn format_feedback_line(&self, line: &str) -> String {
        if line.is_empty() {
            return "\n".to_string();
        }
        if is_section_header(line) {
            return format!("{}\n", self.colorize(line, Color::Blue));
        }
        match line_color(line) {
            Some(color) => format!("  {}\n", self.colorize(line, color)),
            None => format!("  {}\n", line),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        // Header
        output.push_str(&self.format_header("📊 RESUME EVALUATION", 1));
        output.push_str(&format!(
            "Resume: {} | Generated: {} | Processing time: {}ms\n",
            report.metadata.resume_file,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        // Summary
        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {:.1}% {}\n",
            analysis.overall_score,
            self.format_score_badge(analysis.overall_score)
        ));
        output.push_str(&format!(
            "Assessment: {}\n",
            self.colorize(&analysis.overall_assessment, Color::Cyan)
        ));
        if let Some(role) = &report.role_category {
            output.push_str(&format!("Role Category: {}\n", role));
        }
        output.push('\n');

        // Score breakdown
        output.push_str(&self.format_header("Score Breakdown", 3));
        output.push_str(&format!("📝 Content:   {:.1}%\n", analysis.content_score));
        output.push_str(&format!("📐 Structure: {:.1}%\n", analysis.structure_score));
        output.push_str(&format!("🤖 ATS:       {:.1}%\n", analysis.ats_score));
        output.push_str(&format!("⭐ Quality:   {:.1}%\n", analysis.quality_score));
        output.push_str(&format!(
            "Words: {} | Tech keywords: {:.1}\n",
            analysis.word_count, analysis.tech_keywords_found
        ));

        if let Some(job_match) = &report.job_match {
            output.push_str(&self.format_header("Job Match", 3));
            output.push_str(&format!("🎯 Match Score:          {:.1}%\n", job_match.ats_score));
            output.push_str(&format!("🔍 Keyword Match:        {:.1}%\n", job_match.keyword_match));
            output.push_str(&format!("📅 Experience Alignment: {:.1}%\n", job_match.experience_alignment));
            output.push_str(&format!("🛠️ Skills Coverage:      {:.1}%\n", job_match.skills_coverage));
            output.push_str(&format!("🤝 Culture Fit:          {:.1}%\n", job_match.culture_fit));
        }

        // Feedback
        output.push_str(&self.format_header("Feedback", 2));
        for line in &analysis.quality_feedback {
            output.push_str(&self.format_feedback_line(line));
        }
        output.push('\n');
        for line in &analysis.ats_feedback {
            output.push_str(&self.format_feedback_line(line));
        }

        // Recommendations
        output.push_str(&self.format_header("📋 Recommendations", 2));
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, rec));
        }

        if self.detailed {
            output.push_str(&self.format_header("Resume Preview", 3));
            output.push_str(&self.colorize(&report.resume_preview, Color::BrightBlack));
            output.push('\n');

            output.push_str(&self.format_header("Profile Scores", 3));
            output.push_str(&format!(
                "resume_score={:.1} resume_quality_score={:.1} resume_ats_score={:.1}\n",
                report.summary.resume_score,
                report.summary.resume_quality_score,
                report.summary.resume_ats_score
            ));
        }

        // Footer
        output.push_str(&format!(
            "\n{} Generated by Resume Evaluator v{} | Mode: {}\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.evaluator_version,
            if report.job_aware { "job-aware" } else { "general" }
        ));

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
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: f64) -> &'static str {
        match score {
            s if s >= 85.0 => "🟢 Outstanding",
            s if s >= 75.0 => "🟡 Strong",
            s if s >= 65.0 => "🟠 Good",
            _ => "🔴 Needs Work",
        }
    }

    /// Section headers become Markdown headings, the blank separator is kept,
    /// everything else is a list item.
    fn format_feedback_block(lines: &[String]) -> String {
        let mut output = String::new();
        for line in lines {
            if line.is_empty() {
                output.push('\n');
            } else if is_section_header(line) {
                let title = line.trim_matches(|c: char| c == '=' || c.is_whitespace());
                output.push_str(&format!("\n### {}\n\n", title));
            } else {
                output.push_str(&format!("- {}\n", line));
            }
        }
        output.push('\n');
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str("# 📊 Resume Evaluation Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            let resume_name = Path::new(&report.metadata.resume_file)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| report.metadata.resume_file.clone());
            output.push_str(&format!("**Resume:** `{}`", resume_name));
            if let Some(job_file) = &report.metadata.job_file {
                output.push_str(&format!(" | **Job:** `{}`", job_file));
            }
            output.push_str("\n\n");
        }

        // Summary
        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Score:** {:.1}% {}\n\n",
            analysis.overall_score,
            Self::markdown_score_badge(analysis.overall_score)
        ));
        output.push_str(&format!("**Assessment:** {}\n\n", analysis.overall_assessment));
        if let Some(role) = &report.role_category {
            output.push_str(&format!("**Role Category:** {}\n\n", role));
        }

        // Score breakdown
        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!("| 📝 Content | {:.1}% |\n", analysis.content_score));
        output.push_str(&format!("| 📐 Structure | {:.1}% |\n", analysis.structure_score));
        output.push_str(&format!("| 🤖 ATS | {:.1}% |\n", analysis.ats_score));
        output.push_str(&format!("| ⭐ Quality | {:.1}% |\n", analysis.quality_score));
        output.push('\n');

        if let Some(job_match) = &report.job_match {
            output.push_str("### Job Match\n\n");
            output.push_str("| Component | Score |\n");
            output.push_str("|-----------|-------|\n");
            output.push_str(&format!("| 🎯 Match Score | {:.1}% |\n", job_match.ats_score));
            output.push_str(&format!("| 🔍 Keyword Match | {:.1}% |\n", job_match.keyword_match));
            output.push_str(&format!("| 📅 Experience Alignment | {:.1}% |\n", job_match.experience_alignment));
            output.push_str(&format!("| 🛠️ Skills Coverage | {:.1}% |\n", job_match.skills_coverage));
            output.push_str(&format!("| 🤝 Culture Fit | {:.1}% |\n", job_match.culture_fit));
            output.push('\n');
        }

        // Feedback
        output.push_str("## Feedback\n");
        output.push_str(&Self::format_feedback_block(&analysis.quality_feedback));
        output.push_str(&Self::format_feedback_block(&analysis.ats_feedback));

        // Recommendations
        output.push_str("## 📋 Recommendations\n\n");
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, rec));
        }
        output.push('\n');

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Evaluator v{} | {} words analyzed*\n",
                report.metadata.evaluator_version, analysis.word_count
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &ResumeReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_evaluation{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_evaluation{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_evaluation{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::quality::QualityAnalyzer;

    fn sample_report(job: Option<&str>) -> ResumeReport {
        let text = format!(
            "Experience\nEducation: bachelor degree\nSkills: python, docker\nemail: a@b.com\n{}",
            vec!["• developed 3 services with python"; 12].join("\n")
        );
        let evaluation = QualityAnalyzer::new().evaluate(&text, "resume.pdf", job);
        ResumeReport::new(evaluation, &text, 500, "resume.pdf", job.map(|_| "job.txt".to_string()), 5)
    }

    #[test]
    fn test_formatters_report_their_format() {
        assert_eq!(ConsoleFormatter::new(false, false).supports_format(), OutputFormat::Console);
        assert_eq!(JsonFormatter::new(true).supports_format(), OutputFormat::Json);
        assert_eq!(MarkdownFormatter::new(true).supports_format(), OutputFormat::Markdown);
    }

    #[test]
    fn test_console_keeps_feedback_verbatim() {
        let report = sample_report(None);
        let output = ConsoleFormatter::new(false, true).format_report(&report).unwrap();

        assert!(output.contains("RESUME EVALUATION"));
        assert!(output.contains(&report.analysis.overall_assessment));
        for line in report.analysis.quality_feedback.iter().filter(|l| !l.is_empty()) {
            assert!(output.contains(line.as_str()), "missing line {}", line);
        }
        assert!(output.contains("Resume Preview"));
        assert!(output.contains("Mode: general"));
    }

    #[test]
    fn test_console_summary_only_without_detail() {
        let report = sample_report(None);
        let output = ConsoleFormatter::new(false, false).format_report(&report).unwrap();
        assert!(!output.contains("Resume Preview"));
    }

    #[test]
    fn test_json_round_trips_scores() {
        let report = sample_report(Some("python developer, docker, 2 years"));
        let output = JsonFormatter::new(true).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["job_aware"], serde_json::json!(true));
        assert_eq!(
            value["summary"]["resume_score"].as_f64().unwrap(),
            report.analysis.overall_score
        );
        assert!(value["job_match"]["keyword_match"].is_number());
    }

    #[test]
    fn test_markdown_sections() {
        let report = sample_report(Some("python developer, docker, 2 years"));
        let output = MarkdownFormatter::new(true).format_report(&report).unwrap();

        assert!(output.starts_with("# 📊 Resume Evaluation Report"));
        assert!(output.contains("### CONTENT ANALYSIS"));
        assert!(output.contains("### ATS COMPATIBILITY"));
        assert!(output.contains("### Job Match"));
        assert!(output.contains("**Job:** `job.txt`"));
        assert!(output.contains("## 📋 Recommendations"));
    }

    #[test]
    fn test_generator_dispatch() {
        let report = sample_report(None);
        let generator = ReportGenerator::with_options(false, false, false, false);
        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
        assert!(!json.contains('\n'));
        let md = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
        assert!(md.starts_with('#'));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "/tmp/jane_resume.pdf", false),
            "jane_resume_evaluation.json"
        );
        assert_eq!(
            suggest_filename(&OutputFormat::Markdown, "cv.txt", false),
            "cv_evaluation.md"
        );
        let stamped = suggest_filename(&OutputFormat::Console, "cv.pdf", true);
        assert!(stamped.starts_with("cv_evaluation_"));
        assert!(stamped.ends_with(".txt"));
        assert_eq!(stamped.len(), "cv_evaluation_20240101_120000.txt".len());
    }
}
