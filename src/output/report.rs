//! Report structures handed to renderers and persisted by callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::processing::ats_matcher::JobMatchResult;
use crate::processing::quality::{Evaluation, QualityAnalysis};

/// Appended to a preview that was cut short.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Everything produced for one uploaded resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeReport {
    /// Full quality analysis with feedback and recommendations
    pub analysis: QualityAnalysis,

    /// Whether a job description drove the ATS score
    pub job_aware: bool,

    /// Detected role when a job description was supplied
    pub role_category: Option<String>,

    /// Job match breakdown, present only for job-aware reports
    pub job_match: Option<JobMatchResult>,

    /// Leading slice of the resume text
    pub resume_preview: String,

    /// The three scores persisted to the student profile
    pub summary: ProfileScores,

    /// Report metadata and generation info
    pub metadata: ReportMetadata,
}

/// Summary score trio stored against a profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileScores {
    pub resume_score: f64,
    pub resume_quality_score: f64,
    pub resume_ats_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the evaluator used
    pub evaluator_version: String,

    /// Resume file analyzed
    pub resume_file: String,

    /// Job description source, if any
    pub job_file: Option<String>,

    /// Wall time spent extracting and scoring
    pub processing_time_ms: u64,
}

impl From<&QualityAnalysis> for ProfileScores {
    fn from(analysis: &QualityAnalysis) -> Self {
        Self {
            resume_score: analysis.overall_score,
            resume_quality_score: analysis.quality_score,
            resume_ats_score: analysis.ats_score,
        }
    }
}

impl ResumeReport {
    pub fn new(
        evaluation: Evaluation,
        resume_text: &str,
        preview_chars: usize,
        resume_file: impl Into<String>,
        job_file: Option<String>,
        processing_time_ms: u64,
    ) -> Self {
        let job_aware = evaluation.is_job_aware();
        let Evaluation {
            analysis,
            job_profile,
            job_match,
        } = evaluation;

        Self {
            summary: ProfileScores::from(&analysis),
            analysis,
            job_aware,
            role_category: job_profile.map(|profile| profile.role_category.to_string()),
            job_match,
            resume_preview: preview(resume_text, preview_chars),
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                evaluator_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: resume_file.into(),
                job_file,
                processing_time_ms,
            },
        }
    }
}

/// First `max_chars` characters, with an ellipsis only when something was cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], PREVIEW_ELLIPSIS),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::quality::QualityAnalyzer;

    #[test]
    fn test_preview_truncation() {
        assert_eq!(preview("short", 500), "short");
        assert_eq!(preview("abcdef", 3), "abc...");
        assert_eq!(preview("abc", 3), "abc");
        assert_eq!(preview("", 500), "");
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        assert_eq!(preview("ééééé", 2), "éé...");
        assert_eq!(preview("•••", 3), "•••");
    }

    #[test]
    fn test_report_summary_mirrors_analysis() {
        let text = format!(
            "experience education skills email {}",
            vec!["• developed 10 services"; 20].join("\n")
        );
        let evaluation = QualityAnalyzer::new().evaluate(&text, "cv.pdf", None);
        let report = ResumeReport::new(evaluation, &text, 500, "cv.pdf", None, 3);

        assert!(!report.job_aware);
        assert!(report.role_category.is_none());
        assert!(report.job_match.is_none());
        assert_eq!(report.summary.resume_score, report.analysis.overall_score);
        assert_eq!(report.summary.resume_quality_score, report.analysis.quality_score);
        assert_eq!(report.summary.resume_ats_score, report.analysis.ats_score);
        assert_eq!(report.resume_preview, text);
        assert_eq!(report.metadata.resume_file, "cv.pdf");
    }

    #[test]
    fn test_job_aware_report_names_role() {
        let text = format!(
            "experience education skills email python django {}",
            vec!["• developed 10 services"; 20].join("\n")
        );
        let jd = "Data scientist. Machine learning with python and pandas.";
        let evaluation = QualityAnalyzer::new().evaluate(&text, "cv.pdf", Some(jd));
        let report = ResumeReport::new(evaluation, &text, 10, "cv.pdf", Some("jd.txt".into()), 0);

        assert!(report.job_aware);
        assert_eq!(report.role_category.as_deref(), Some("data_scientist"));
        assert!(report.job_match.is_some());
        assert!(report.resume_preview.ends_with("..."));
        assert_eq!(report.resume_preview.chars().count(), 13);
    }
}
