//! Resume quality analysis: content, structure and ATS scoring
//!
//! Every input goes through [`InputState`] first. Empty, very short and
//! unstructured text stop there with fixed low results; everything else is
//! scored into a [`ScoreSheet`], curved, and rendered into feedback.

use log::{debug, info};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::output::feedback::{
    empty_document_feedback, overall_assessment, priority_block, recommendations,
    render_ats_feedback, render_quality_feedback, too_short_feedback, unstructured_feedback,
    DegenerateFeedback,
};
use crate::processing::ats_matcher::{ATSMatcher, JobMatchResult};
use crate::processing::requirements::{JobRequirementExtractor, JobRequirementProfile};
use crate::processing::scoring::{
    apply_curve, bullet_points, length_points, round1, to_percentage,
};
use crate::processing::taxonomy::{
    ACTION_VERBS, ESSENTIAL_INDICATORS, PROFESSIONAL_TERMS, REQUIRED_SECTIONS, STANDARD_HEADERS,
    TECH_KEYWORD_WEIGHTS,
};
use crate::processing::text_processor::{ProcessedText, TermSet};

/// Texts shorter than this are rejected as too short.
pub const MIN_WORD_COUNT: usize = 50;
/// Essential indicators required before a text counts as a resume.
pub const MIN_ESSENTIAL_INDICATORS: usize = 2;

pub const CONTENT_MAX_POINTS: f64 = 60.0;
pub const STRUCTURE_MAX_POINTS: f64 = 30.0;
pub const ATS_MAX_POINTS: f64 = 30.0;

pub const CONTENT_WEIGHT: f64 = 0.4;
pub const STRUCTURE_WEIGHT: f64 = 0.3;
pub const ATS_WEIGHT: f64 = 0.3;

const SECTION_POINTS: f64 = 25.0;
const VERB_POINTS: f64 = 2.5;
const VERB_CAP: f64 = 20.0;
const METRIC_CAP: f64 = 15.0;
const PROFESSIONAL_POINTS: f64 = 1.5;
const PROFESSIONAL_CAP: f64 = 5.0;
const TECH_CAP: f64 = 15.0;
const HEADER_POINTS: f64 = 2.5;
const HEADER_CAP: f64 = 10.0;

static ESSENTIAL_MATCHER: Lazy<TermSet> = Lazy::new(|| TermSet::new(ESSENTIAL_INDICATORS));
static VERB_MATCHER: Lazy<TermSet> = Lazy::new(|| TermSet::new(ACTION_VERBS));
static PROFESSIONAL_MATCHER: Lazy<TermSet> = Lazy::new(|| TermSet::new(PROFESSIONAL_TERMS));
static HEADER_MATCHER: Lazy<TermSet> = Lazy::new(|| TermSet::new(STANDARD_HEADERS));
static SECTION_MATCHERS: Lazy<Vec<TermSet>> = Lazy::new(|| {
    REQUIRED_SECTIONS
        .iter()
        .map(|(_, keywords)| TermSet::new(keywords))
        .collect()
});
static TECH_TERMS: Lazy<TermSet> = Lazy::new(|| {
    let terms: Vec<&'static str> = TECH_KEYWORD_WEIGHTS.iter().map(|(term, _)| *term).collect();
    TermSet::new(&terms)
});

/// Final result of analysing one resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAnalysis {
    pub overall_score: f64,
    pub ats_score: f64,
    pub quality_score: f64,
    pub content_score: f64,
    pub structure_score: f64,
    pub quality_feedback: Vec<String>,
    pub ats_feedback: Vec<String>,
    pub overall_assessment: String,
    pub recommendations: Vec<String>,
    pub word_count: usize,
    pub tech_keywords_found: f64,
}

/// The analysis together with the job-side artifacts that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub analysis: QualityAnalysis,
    pub job_profile: Option<JobRequirementProfile>,
    pub job_match: Option<JobMatchResult>,
}

impl Evaluation {
    pub fn is_job_aware(&self) -> bool {
        self.job_match.is_some()
    }
}

/// Validity of the input text, checked in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Empty,
    TooShort { word_count: usize },
    Unstructured { word_count: usize },
    Scorable,
}

impl InputState {
    pub fn classify(text: &ProcessedText) -> Self {
        if text.is_blank() {
            return InputState::Empty;
        }
        if text.word_count < MIN_WORD_COUNT {
            return InputState::TooShort {
                word_count: text.word_count,
            };
        }
        if ESSENTIAL_MATCHER.count(&text.lower) < MIN_ESSENTIAL_INDICATORS {
            return InputState::Unstructured {
                word_count: text.word_count,
            };
        }
        InputState::Scorable
    }
}

/// Which ATS branch produced the raw ATS points.
enum AtsPath {
    JobAware {
        profile: JobRequirementProfile,
        result: JobMatchResult,
    },
    Fallback {
        tech_points: f64,
    },
}

/// Raw points and feedback fragments accumulated before curving.
struct ScoreSheet {
    content_points: f64,
    content_feedback: Vec<String>,
    structure_points: f64,
    structure_feedback: Vec<String>,
    ats_points: f64,
    ats_feedback: Vec<String>,
    ats_path: AtsPath,
}

/// Analyse a resume. A blank or whitespace-only job description is the
/// same as none.
pub fn analyze(resume_text: &str, filename: &str, job_description: Option<&str>) -> QualityAnalysis {
    QualityAnalyzer::new()
        .evaluate(resume_text, filename, job_description)
        .analysis
}

#[derive(Debug, Default, Clone, Copy)]
pub struct QualityAnalyzer {
    extractor: JobRequirementExtractor,
    matcher: ATSMatcher,
}

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full evaluation, keeping the job profile and match result when a job
    /// description was supplied.
    pub fn evaluate(&self, resume_text: &str, filename: &str, job_description: Option<&str>) -> Evaluation {
        let text = ProcessedText::new(resume_text);

        match InputState::classify(&text) {
            InputState::Empty => {
                info!("Resume '{}' has no readable content", filename);
                degenerate(empty_document_feedback(), DegenerateScores::ZERO, 0)
            }
            InputState::TooShort { word_count } => {
                info!("Resume '{}' is too short ({} words)", filename, word_count);
                degenerate(too_short_feedback(word_count), DegenerateScores::ZERO, word_count)
            }
            InputState::Unstructured { word_count } => {
                info!("Resume '{}' has no recognizable structure", filename);
                degenerate(unstructured_feedback(), DegenerateScores::UNSTRUCTURED, word_count)
            }
            InputState::Scorable => {
                let job = job_description
                    .filter(|jd| !jd.trim().is_empty())
                    .and_then(|jd| self.extractor.extract(jd));
                let sheet = self.score(&text, filename, job);
                finalize(sheet, text.word_count)
            }
        }
    }

    fn score(&self, text: &ProcessedText, filename: &str, job: Option<JobRequirementProfile>) -> ScoreSheet {
        let (content_points, content_feedback) = content_points(text);
        let (structure_points, structure_feedback) = structure_points(text);
        let (ats_points, ats_feedback, ats_path) = match job {
            Some(profile) => self.job_aware_ats(text, profile),
            None => fallback_ats(text, filename),
        };

        debug!(
            "Raw points: content={:.2}/{} structure={:.2}/{} ats={:.2}/{}",
            content_points,
            CONTENT_MAX_POINTS,
            structure_points,
            STRUCTURE_MAX_POINTS,
            ats_points,
            ATS_MAX_POINTS
        );

        ScoreSheet {
            content_points,
            content_feedback,
            structure_points,
            structure_feedback,
            ats_points,
            ats_feedback,
            ats_path,
        }
    }

    fn job_aware_ats(&self, text: &ProcessedText, profile: JobRequirementProfile) -> (f64, Vec<String>, AtsPath) {
        let result = self.matcher.calculate_job_match(&text.original, &profile);
        let points = result.ats_score / 100.0 * ATS_MAX_POINTS;

        let mut lines = vec![
            format!("🎯 Job Match Score: {:.1}%", result.ats_score),
            format!("📊 Role Category: {}", profile.role_category.title()),
        ];

        lines.push(
            if result.keyword_match >= 80.0 {
                "✅ Excellent keyword alignment with job requirements"
            } else if result.keyword_match >= 60.0 {
                "✅ Good keyword match, minor improvements possible"
            } else {
                "⚠️ Low keyword match - add more job-specific terms"
            }
            .to_string(),
        );

        lines.push(
            if result.skills_coverage >= 70.0 {
                "✅ Strong technical skills coverage for this role"
            } else {
                "⚠️ Technical skills need strengthening for this role"
            }
            .to_string(),
        );

        lines.extend(result.detailed_feedback.iter().cloned());
        lines.extend(priority_block(&result.improvement_areas));

        (points, lines, AtsPath::JobAware { profile, result })
    }
}

fn content_points(text: &ProcessedText) -> (f64, Vec<String>) {
    let mut feedback = Vec::new();

    let sections_found = SECTION_MATCHERS
        .iter()
        .filter(|keywords| keywords.any(&text.lower))
        .count();
    let section_points = sections_found as f64 / REQUIRED_SECTIONS.len() as f64 * SECTION_POINTS;
    feedback.push(
        if sections_found >= 4 {
            "✅ All essential sections present"
        } else if sections_found >= 3 {
            "⚠️ Most essential sections present"
        } else {
            "❌ Missing critical sections (contact, experience, education, skills)"
        }
        .to_string(),
    );

    let action_count = VERB_MATCHER.count(&text.lower);
    let verb_points = (action_count as f64 * VERB_POINTS).min(VERB_CAP);
    feedback.push(
        if action_count >= 5 {
            "✅ Strong use of action verbs"
        } else if action_count >= 2 {
            "✅ Good action verbs, could add more variety"
        } else {
            "⚠️ Use more strong action verbs to describe achievements"
        }
        .to_string(),
    );

    let numbers = text.numeric_word_count();
    let percentages = text.percentage_count();
    let metric_points = ((numbers * 2 + percentages * 3) as f64).min(METRIC_CAP);
    feedback.push(
        if numbers >= 6 {
            "✅ Good use of quantifiable metrics"
        } else if numbers >= 3 {
            "✅ Some metrics present, add more specific numbers"
        } else {
            "⚠️ Add quantifiable achievements (percentages, numbers, metrics)"
        }
        .to_string(),
    );

    debug!(
        "Content: sections={} verbs={} numbers={} percentages={}",
        sections_found, action_count, numbers, percentages
    );

    (section_points + verb_points + metric_points, feedback)
}

fn structure_points(text: &ProcessedText) -> (f64, Vec<String>) {
    let mut feedback = Vec::new();

    let length = length_points(text.word_count);
    feedback.push(
        if length >= 15.0 {
            "✅ Optimal resume length"
        } else if length >= 12.0 {
            "✅ Good length, minor optimization possible"
        } else if length >= 10.0 {
            "✅ Acceptable length but could be improved"
        } else {
            "⚠️ Resume length needs adjustment (aim for 350-800 words)"
        }
        .to_string(),
    );

    let bullet_count = text.bullet_count();
    let bullets = bullet_points(bullet_count);
    feedback.push(
        if bullet_count >= 6 {
            "✅ Excellent use of bullet points"
        } else if bullet_count >= 3 {
            "✅ Good formatting, could use more bullet points"
        } else if bullet_count >= 1 {
            "✅ Some bullet points present, add more for clarity"
        } else {
            "⚠️ Use bullet points for better readability"
        }
        .to_string(),
    );

    let prof_count = PROFESSIONAL_MATCHER.count(&text.lower);
    let professional = (prof_count as f64 * PROFESSIONAL_POINTS).min(PROFESSIONAL_CAP);
    feedback.push(
        if prof_count >= 3 {
            "✅ Strong professional language"
        } else if prof_count >= 1 {
            "✅ Some professional terms, could add more"
        } else {
            "⚠️ Add more professional soft skills"
        }
        .to_string(),
    );

    (length + bullets + professional, feedback)
}

fn fallback_ats(text: &ProcessedText, filename: &str) -> (f64, Vec<String>, AtsPath) {
    let mut points = 0.0;
    let mut feedback = Vec::new();

    match file_extension(filename).as_deref() {
        Some("pdf") => {
            points += 5.0;
            feedback.push("✅ PDF format is ATS-friendly".to_string());
        }
        Some("doc") | Some("docx") => {
            points += 4.0;
            feedback.push("⚠️ Word format acceptable, PDF preferred".to_string());
        }
        _ => {}
    }

    let tech_points = tech_keyword_points(&text.lower);
    points += tech_points;
    feedback.push(
        if tech_points >= 6.0 {
            "✅ Good general technical keywords"
        } else {
            "⚠️ Add more technical keywords"
        }
        .to_string(),
    );

    let header_count = HEADER_MATCHER.count(&text.lower);
    points += (header_count as f64 * HEADER_POINTS).min(HEADER_CAP);
    feedback.push(
        if header_count >= 3 {
            "✅ Good section organization"
        } else {
            "⚠️ Use clear section headers"
        }
        .to_string(),
    );

    feedback.push("💡 Upload with job description for personalized ATS analysis".to_string());

    (points, feedback, AtsPath::Fallback { tech_points })
}

/// Weighted sum of general technical keywords present, capped.
pub fn tech_keyword_points(text_lower: &str) -> f64 {
    let total: f64 = TECH_KEYWORD_WEIGHTS
        .iter()
        .zip(TECH_TERMS.presence(text_lower))
        .filter(|(_, present)| *present)
        .map(|((_, weight), _)| *weight)
        .sum();
    total.min(TECH_CAP)
}

/// Lower-cased extension after the last dot, if any.
pub fn file_extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

fn finalize(sheet: ScoreSheet, word_count: usize) -> Evaluation {
    let content_score = apply_curve(to_percentage(sheet.content_points, CONTENT_MAX_POINTS));
    let structure_score = apply_curve(to_percentage(sheet.structure_points, STRUCTURE_MAX_POINTS));
    let ats_score = apply_curve(to_percentage(sheet.ats_points, ATS_MAX_POINTS));

    let overall_score = round1(
        content_score * CONTENT_WEIGHT + structure_score * STRUCTURE_WEIGHT + ats_score * ATS_WEIGHT,
    );
    let quality_score = (content_score + structure_score) / 2.0;

    info!(
        "Resume scored: overall={:.1} quality={:.1} ats={:.1}",
        overall_score, quality_score, ats_score
    );

    let (tech_keywords_found, job_profile, job_match) = match sheet.ats_path {
        // ats points rescaled onto the 0-15 tech keyword range
        AtsPath::JobAware { profile, result } => {
            (sheet.ats_points / ATS_MAX_POINTS * 15.0, Some(profile), Some(result))
        }
        AtsPath::Fallback { tech_points } => (tech_points, None, None),
    };

    let analysis = QualityAnalysis {
        overall_score,
        ats_score,
        quality_score,
        content_score,
        structure_score,
        quality_feedback: render_quality_feedback(&sheet.content_feedback, &sheet.structure_feedback),
        ats_feedback: render_ats_feedback(sheet.ats_feedback),
        overall_assessment: overall_assessment(overall_score).to_string(),
        recommendations: recommendations(overall_score, ats_score, quality_score),
        word_count,
        tech_keywords_found,
    };

    Evaluation {
        analysis,
        job_profile,
        job_match,
    }
}

struct DegenerateScores {
    overall: f64,
    ats: f64,
    quality: f64,
    content: f64,
    structure: f64,
}

impl DegenerateScores {
    const ZERO: Self = Self {
        overall: 0.0,
        ats: 0.0,
        quality: 0.0,
        content: 0.0,
        structure: 0.0,
    };

    // content and structure mirror quality
    const UNSTRUCTURED: Self = Self {
        overall: 15.0,
        ats: 10.0,
        quality: 20.0,
        content: 20.0,
        structure: 20.0,
    };
}

fn degenerate(feedback: DegenerateFeedback, scores: DegenerateScores, word_count: usize) -> Evaluation {
    let DegenerateFeedback {
        quality_feedback,
        ats_feedback,
        overall_assessment,
        recommendations,
    } = feedback;

    Evaluation {
        analysis: QualityAnalysis {
            overall_score: scores.overall,
            ats_score: scores.ats,
            quality_score: scores.quality,
            content_score: scores.content,
            structure_score: scores.structure,
            quality_feedback,
            ats_feedback,
            overall_assessment,
            recommendations,
            word_count,
            tech_keywords_found: 0.0,
        },
        job_profile: None,
        job_match: None,
    }
}
