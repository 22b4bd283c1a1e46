//! Feedback and recommendation formatting
//!
//! Turns raw feedback fragments into the ordered, severity-prefixed lists
//! shown to users. The emoji prefixes are part of the contract: the UI keys
//! its styling off them, so they are emitted verbatim.

use serde::{Deserialize, Serialize};

pub const CONTENT_HEADER: &str = "=== CONTENT ANALYSIS ===";
pub const STRUCTURE_HEADER: &str = "=== STRUCTURE & FORMATTING ===";
pub const ATS_HEADER: &str = "=== ATS COMPATIBILITY ===";
pub const PRIORITY_HEADER: &str = "🎯 PRIORITY IMPROVEMENT AREAS:";

const WARNING_MARK: &str = "⚠️";
const CROSS_MARK: &str = "❌";

/// Severity marker placed in front of a feedback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    CriticalError,
    Fault,
    Improve,
    Strength,
    Excellent,
    Recommendation,
    Critical,
    ActionPlan,
}

impl Severity {
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::CriticalError => "❌ CRITICAL ERROR: ",
            Severity::Fault => "❌ FAULT: ",
            Severity::Improve => "🔧 IMPROVE: ",
            Severity::Strength => "✅ STRENGTH: ",
            Severity::Excellent => "✅ EXCELLENT: ",
            Severity::Recommendation => "⚠️ RECOMMENDATION: ",
            Severity::Critical => "🎯 CRITICAL: ",
            Severity::ActionPlan => "🔧 ACTION PLAN: ",
        }
    }

    pub fn tag(&self, message: impl AsRef<str>) -> String {
        format!("{}{}", self.prefix(), message.as_ref())
    }
}

/// How a raw feedback line is re-classified inside its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Fault(String),
    Improvement(String),
    Positive(String),
}

/// The two category rule sets differ slightly in what counts as a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackCategory {
    Content,
    Structure,
}

impl FeedbackCategory {
    pub fn header(&self) -> &'static str {
        match self {
            FeedbackCategory::Content => CONTENT_HEADER,
            FeedbackCategory::Structure => STRUCTURE_HEADER,
        }
    }

    pub fn classify(&self, item: &str) -> Classified {
        let lower = item.to_lowercase();
        match self {
            FeedbackCategory::Content => {
                if item.starts_with(CROSS_MARK) || item.contains("Missing") || lower.contains("critical") {
                    Classified::Fault(item.to_string())
                } else if item.starts_with(WARNING_MARK)
                    || lower.contains("could")
                    || lower.contains("add more")
                {
                    Classified::Improvement(Severity::Improve.tag(strip_warning(item)))
                } else {
                    Classified::Positive(item.to_string())
                }
            }
            FeedbackCategory::Structure => {
                if lower.contains("needs adjustment") || lower.contains("missing") {
                    Classified::Fault(Severity::Fault.tag(strip_warning(item)))
                } else if item.starts_with(WARNING_MARK) || lower.contains("could") {
                    Classified::Improvement(Severity::Improve.tag(strip_warning(item)))
                } else {
                    Classified::Positive(item.to_string())
                }
            }
        }
    }
}

fn strip_warning(item: &str) -> String {
    item.replace(WARNING_MARK, "").trim().to_string()
}

/// Render one category: header, positives, then faults, then improvements.
pub fn render_category(category: FeedbackCategory, items: &[String]) -> Vec<String> {
    let mut positives = Vec::new();
    let mut faults = Vec::new();
    let mut improvements = Vec::new();

    for item in items {
        match category.classify(item) {
            Classified::Fault(line) => faults.push(line),
            Classified::Improvement(line) => improvements.push(line),
            Classified::Positive(line) => positives.push(line),
        }
    }

    let mut rendered = Vec::with_capacity(items.len() + 1);
    rendered.push(category.header().to_string());
    rendered.extend(positives);
    rendered.extend(faults);
    rendered.extend(improvements);
    rendered
}

/// Quality feedback: content section followed by structure section.
pub fn render_quality_feedback(content: &[String], structure: &[String]) -> Vec<String> {
    let mut rendered = render_category(FeedbackCategory::Content, content);
    rendered.extend(render_category(FeedbackCategory::Structure, structure));
    rendered
}

/// ATS feedback with its section header; lines pass through untouched.
pub fn render_ats_feedback(items: Vec<String>) -> Vec<String> {
    let mut rendered = Vec::with_capacity(items.len() + 1);
    rendered.push(ATS_HEADER.to_string());
    rendered.extend(items);
    rendered
}

/// Blank separator, header, then one bullet per area. Empty when no areas.
pub fn priority_block(areas: &[String]) -> Vec<String> {
    if areas.is_empty() {
        return Vec::new();
    }
    let mut block = vec![String::new(), PRIORITY_HEADER.to_string()];
    block.extend(areas.iter().map(|area| format!("• {}", area)));
    block
}

pub fn overall_assessment(overall_score: f64) -> &'static str {
    if overall_score >= 85.0 {
        "🎉 Outstanding resume! Highly competitive for top positions"
    } else if overall_score >= 75.0 {
        "👍 Strong resume with excellent potential"
    } else if overall_score >= 65.0 {
        "⚠️ Good foundation, some improvements will make it stronger"
    } else {
        "📝 Significant improvements needed for better competitiveness"
    }
}

pub const ATS_RECOMMENDATIONS: &[&str] = &[
    "Add current technology stack: Python, React, Node.js, AWS",
    "Include cloud platforms: AWS, Azure, or Google Cloud",
    "Mention modern frameworks and tools you've used",
    "Use ATS-friendly formatting with clear section headers",
];

pub const QUALITY_RECOMMENDATIONS: &[&str] = &[
    "Quantify achievements with specific numbers and percentages",
    "Use strong action verbs: developed, implemented, optimized",
    "Keep resume length between 300-800 words",
    "Add more bullet points for better readability",
];

pub const OVERALL_RECOMMENDATIONS: &[&str] = &[
    "Include links to GitHub, LinkedIn, and portfolio",
    "Add relevant certifications (AWS, Google, Microsoft)",
    "Mention agile/scrum methodologies if applicable",
    "Highlight any open-source contributions or personal projects",
];

pub const TREND_RECOMMENDATIONS: &[&str] = &[
    "Consider adding: AI/ML experience, microservices, containerization",
    "Highlight remote work and collaboration tools experience",
    "Include any experience with modern development practices (CI/CD, DevOps)",
];

pub const ATS_RECOMMENDATION_THRESHOLD: f64 = 60.0;
pub const QUALITY_RECOMMENDATION_THRESHOLD: f64 = 60.0;
pub const OVERALL_RECOMMENDATION_THRESHOLD: f64 = 70.0;

/// Recommendation blocks for a fully scored resume. No de-duplication.
pub fn recommendations(overall_score: f64, ats_score: f64, quality_score: f64) -> Vec<String> {
    let mut recs: Vec<String> = Vec::new();

    if ats_score < ATS_RECOMMENDATION_THRESHOLD {
        recs.extend(ATS_RECOMMENDATIONS.iter().map(|s| s.to_string()));
    }
    if quality_score < QUALITY_RECOMMENDATION_THRESHOLD {
        recs.extend(QUALITY_RECOMMENDATIONS.iter().map(|s| s.to_string()));
    }
    if overall_score < OVERALL_RECOMMENDATION_THRESHOLD {
        recs.extend(OVERALL_RECOMMENDATIONS.iter().map(|s| s.to_string()));
    }
    recs.extend(TREND_RECOMMENDATIONS.iter().map(|s| s.to_string()));

    recs
}

/// Fixed-shape feedback for inputs that never reach full scoring.
pub struct DegenerateFeedback {
    pub quality_feedback: Vec<String>,
    pub ats_feedback: Vec<String>,
    pub overall_assessment: String,
    pub recommendations: Vec<String>,
}

pub fn empty_document_feedback() -> DegenerateFeedback {
    DegenerateFeedback {
        quality_feedback: vec![Severity::CriticalError.tag("No readable content found in resume")],
        ats_feedback: vec![Severity::CriticalError.tag("Cannot analyze empty document")],
        overall_assessment: "🚫 Invalid Resume: Please upload a resume with actual content".to_string(),
        recommendations: vec![
            "Upload a properly formatted resume with text content".to_string(),
            "Ensure the file is not corrupted or password-protected".to_string(),
        ],
    }
}

pub fn too_short_feedback(word_count: usize) -> DegenerateFeedback {
    DegenerateFeedback {
        quality_feedback: vec![
            Severity::CriticalError.tag(format!("Resume too short ({} words)", word_count)),
            Severity::Improve.tag("A professional resume should have at least 200-300 words"),
        ],
        ats_feedback: vec![
            Severity::Fault.tag("Insufficient content for ATS analysis"),
            Severity::Improve.tag("Add detailed work experience, skills, and education sections"),
        ],
        overall_assessment: "🚫 Insufficient Content: Resume needs substantial content to be viable"
            .to_string(),
        recommendations: vec![
            "Add detailed work experience with achievements".to_string(),
            "Include comprehensive skills section".to_string(),
            "Add education and contact information".to_string(),
        ],
    }
}

pub fn unstructured_feedback() -> DegenerateFeedback {
    DegenerateFeedback {
        quality_feedback: vec![
            Severity::Fault.tag("Missing essential resume sections"),
            Severity::Improve.tag("Add work experience, skills, education, and contact information"),
        ],
        ats_feedback: vec![
            Severity::Fault.tag("No recognizable resume structure"),
            Severity::Improve.tag("Use standard resume sections with clear headers"),
        ],
        overall_assessment: "⚠️ Poor Structure: Resume lacks basic professional sections".to_string(),
        recommendations: vec![
            "Use a standard resume template".to_string(),
            "Include contact information, work experience, skills, and education".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_content_classification() {
        let category = FeedbackCategory::Content;
        assert_eq!(
            category.classify("❌ Missing critical sections (contact, experience, education, skills)"),
            Classified::Fault("❌ Missing critical sections (contact, experience, education, skills)".into())
        );
        assert_eq!(
            category.classify("⚠️ Most essential sections present"),
            Classified::Improvement("🔧 IMPROVE: Most essential sections present".into())
        );
        assert_eq!(
            category.classify("✅ Good action verbs, could add more variety"),
            Classified::Improvement("🔧 IMPROVE: ✅ Good action verbs, could add more variety".into())
        );
        assert_eq!(
            category.classify("✅ Strong use of action verbs"),
            Classified::Positive("✅ Strong use of action verbs".into())
        );
    }

    #[test]
    fn test_structure_classification() {
        let category = FeedbackCategory::Structure;
        assert_eq!(
            category.classify("⚠️ Resume length needs adjustment (aim for 350-800 words)"),
            Classified::Fault("❌ FAULT: Resume length needs adjustment (aim for 350-800 words)".into())
        );
        assert_eq!(
            category.classify("✅ Good formatting, could use more bullet points"),
            Classified::Improvement("🔧 IMPROVE: ✅ Good formatting, could use more bullet points".into())
        );
        assert_eq!(
            category.classify("✅ Optimal resume length"),
            Classified::Positive("✅ Optimal resume length".into())
        );
    }

    #[test]
    fn test_category_ordering() {
        let rendered = render_category(
            FeedbackCategory::Content,
            &strings(&[
                "⚠️ Add quantifiable achievements (percentages, numbers, metrics)",
                "❌ Missing critical sections (contact, experience, education, skills)",
                "✅ Strong use of action verbs",
            ]),
        );
        assert_eq!(
            rendered,
            strings(&[
                CONTENT_HEADER,
                "✅ Strong use of action verbs",
                "❌ Missing critical sections (contact, experience, education, skills)",
                "🔧 IMPROVE: Add quantifiable achievements (percentages, numbers, metrics)",
            ])
        );
    }

    #[test]
    fn test_quality_feedback_has_both_headers() {
        let rendered = render_quality_feedback(
            &strings(&["✅ All essential sections present"]),
            &strings(&["✅ Optimal resume length"]),
        );
        assert_eq!(rendered[0], CONTENT_HEADER);
        assert_eq!(rendered[2], STRUCTURE_HEADER);
        assert_eq!(rendered.len(), 4);
    }

    #[test]
    fn test_priority_block() {
        assert!(priority_block(&[]).is_empty());
        let block = priority_block(&strings(&["Technical Skills"]));
        assert_eq!(block, strings(&["", PRIORITY_HEADER, "• Technical Skills"]));
    }

    #[test]
    fn test_assessment_bands() {
        assert!(overall_assessment(85.0).starts_with("🎉"));
        assert!(overall_assessment(75.0).starts_with("👍"));
        assert!(overall_assessment(65.0).starts_with("⚠️"));
        assert!(overall_assessment(64.9).starts_with("📝"));
    }

    #[test]
    fn test_recommendation_blocks() {
        assert_eq!(recommendations(90.0, 90.0, 90.0).len(), 3);
        assert_eq!(recommendations(69.9, 90.0, 90.0).len(), 7);
        assert_eq!(recommendations(50.0, 50.0, 50.0).len(), 15);

        let recs = recommendations(50.0, 59.0, 80.0);
        assert_eq!(recs[0], ATS_RECOMMENDATIONS[0]);
        assert_eq!(recs[4], OVERALL_RECOMMENDATIONS[0]);
        assert_eq!(recs.last().map(String::as_str), TREND_RECOMMENDATIONS.last().copied());
    }

    #[test]
    fn test_degenerate_feedback_shapes() {
        assert!(empty_document_feedback().quality_feedback[0].contains("No readable content found"));
        assert!(too_short_feedback(12).quality_feedback[0].contains("(12 words)"));
        assert_eq!(unstructured_feedback().recommendations.len(), 2);
    }
}
