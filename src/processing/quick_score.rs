//! Quick resume score on a 0-10 scale
//!
//! A cheap heuristic used where the full analysis is not needed, such as the
//! dashboard summary. Format, section, bullet and key-term points only.

use log::debug;
use once_cell::sync::Lazy;

use crate::processing::quality::file_extension;
use crate::processing::scoring::round1;
use crate::processing::text_processor::{ProcessedText, TermSet};

pub const QUICK_SCORE_MAX: f64 = 10.0;
const KEY_TERM_CAP: f64 = 3.0;

const QUICK_SECTIONS: &[&str] = &["education", "experience", "skills"];

/// Key terms and their weights.
const KEY_TERMS: &[(&str, f64)] = &[
    ("project", 0.5),
    ("develop", 0.5),
    ("lead", 0.5),
    ("manage", 0.5),
    ("implement", 0.25),
    ("create", 0.25),
    ("design", 0.25),
    ("analyze", 0.25),
];

static SECTION_MATCHER: Lazy<TermSet> = Lazy::new(|| TermSet::new(QUICK_SECTIONS));
static KEY_TERM_MATCHER: Lazy<TermSet> = Lazy::new(|| {
    let terms: Vec<&'static str> = KEY_TERMS.iter().map(|(term, _)| *term).collect();
    TermSet::new(&terms)
});

/// Score a resume out of 10, rounded to one decimal.
pub fn quick_score(resume_text: &str, filename: &str) -> f64 {
    let text = ProcessedText::new(resume_text);
    if text.original.is_empty() {
        return 0.0;
    }

    let format = format_points(filename, text.word_count);
    let sections = SECTION_MATCHER.count(&text.lower) as f64;
    let bullets = match text.bullet_count() {
        n if n >= 8 => 2.0,
        n if n >= 4 => 1.0,
        _ => 0.0,
    };
    let key_terms = key_term_points(&text.lower);

    debug!(
        "Quick score: format={} sections={} bullets={} key terms={}",
        format, sections, bullets, key_terms
    );

    round1((format + sections + bullets + key_terms).min(QUICK_SCORE_MAX))
}

fn format_points(filename: &str, word_count: usize) -> f64 {
    let document = matches!(file_extension(filename).as_deref(), Some("pdf" | "doc" | "docx"));
    if !document {
        return 0.0;
    }
    match word_count {
        200..=1200 => 2.0,
        1201..=1500 => 1.0,
        _ => 0.0,
    }
}

fn key_term_points(text_lower: &str) -> f64 {
    let total: f64 = KEY_TERMS
        .iter()
        .zip(KEY_TERM_MATCHER.presence(text_lower))
        .filter(|(_, present)| *present)
        .map(|((_, weight), _)| *weight)
        .sum();
    total.min(KEY_TERM_CAP)
}
