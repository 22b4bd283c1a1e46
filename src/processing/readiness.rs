//! Placement readiness score and focused feedback
//!
//! Inputs arrive as raw form strings; anything that does not parse becomes 0.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::processing::scoring::{coerce_count, coerce_number, format_decimal};

pub const APTITUDE_WEIGHT: f64 = 0.3;
pub const TECHNICAL_WEIGHT: f64 = 0.4;
pub const COMMUNICATION_WEIGHT: f64 = 0.2;
pub const RESUME_WEIGHT: f64 = 0.1;

pub const CGPA_THRESHOLD: f64 = 7.5;
/// Area scores (0-100) below this get an "Improve" line.
pub const AREA_THRESHOLD: f64 = 70.0;
pub const MIN_PROJECTS: u32 = 2;
pub const MIN_CERTIFICATIONS: u32 = 1;

pub const ALL_CLEAR: &str = "✅ Great progress! Keep maintaining your performance!";

/// Raw, unvalidated readiness fields as submitted.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawReadiness<'a> {
    pub aptitude: &'a str,
    pub technical: &'a str,
    pub communication: &'a str,
    pub resume: &'a str,
    pub cgpa: &'a str,
    pub backlogs: &'a str,
    pub projects: &'a str,
    pub certifications: &'a str,
}

/// Coerced readiness fields. Area scores are on a 0-10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReadinessInput {
    pub aptitude: f64,
    pub technical: f64,
    pub communication: f64,
    pub resume: f64,
    pub cgpa: f64,
    pub backlogs: u32,
    pub projects: u32,
    pub certifications: u32,
}

impl From<RawReadiness<'_>> for ReadinessInput {
    fn from(raw: RawReadiness<'_>) -> Self {
        Self {
            aptitude: coerce_number(raw.aptitude),
            technical: coerce_number(raw.technical),
            communication: coerce_number(raw.communication),
            resume: coerce_number(raw.resume),
            cgpa: coerce_number(raw.cgpa),
            backlogs: coerce_count(raw.backlogs),
            projects: coerce_count(raw.projects),
            certifications: coerce_count(raw.certifications),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub readiness_score: f64,
    pub feedback: Vec<String>,
}

impl ReadinessInput {
    /// Area scores scaled to 0-100, in feedback order, with their advice.
    fn areas(&self) -> [(f64, f64, &'static str); 4] {
        [
            (self.aptitude * 10.0, APTITUDE_WEIGHT, "Practice more aptitude questions and mock tests"),
            (self.technical * 10.0, TECHNICAL_WEIGHT, "Focus on strengthening technical skills"),
            (
                self.communication * 10.0,
                COMMUNICATION_WEIGHT,
                "Enhance communication skills through practice",
            ),
            (self.resume * 10.0, RESUME_WEIGHT, "Improve resume content and structure"),
        ]
    }

    /// Weighted readiness on a 0-100 scale.
    pub fn score(&self) -> f64 {
        let total: f64 = self.areas().iter().map(|(scaled, weight, _)| scaled * weight).sum();
        total.clamp(0.0, 100.0)
    }

    pub fn feedback(&self) -> Vec<String> {
        let mut feedback = Vec::new();

        if self.cgpa < CGPA_THRESHOLD {
            feedback.push(format!("Priority: Improve CGPA (current: {})", format_decimal(self.cgpa)));
        }
        if self.backlogs > 0 {
            feedback.push(format!("Critical: Clear {} backlogs", self.backlogs));
        }

        feedback.extend(
            self.areas()
                .iter()
                .filter(|(scaled, _, _)| *scaled < AREA_THRESHOLD)
                .map(|(_, _, advice)| format!("Improve: {}", advice)),
        );

        if self.projects < MIN_PROJECTS {
            feedback.push("Add: Work on more technical projects".to_string());
        }
        if self.certifications < MIN_CERTIFICATIONS {
            feedback.push("Add: Pursue relevant certifications".to_string());
        }

        if feedback.is_empty() {
            feedback.push(ALL_CLEAR.to_string());
        }
        feedback
    }

    pub fn report(&self) -> ReadinessReport {
        let report = ReadinessReport {
            readiness_score: self.score(),
            feedback: self.feedback(),
        };
        debug!("Readiness: {:?} -> {:.1}", self, report.readiness_score);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong() -> ReadinessInput {
        ReadinessInput {
            aptitude: 8.0,
            technical: 9.0,
            communication: 7.5,
            resume: 8.0,
            cgpa: 8.2,
            backlogs: 0,
            projects: 3,
            certifications: 1,
        }
    }

    #[test]
    fn test_weighted_score() {
        // 80*0.3 + 90*0.4 + 75*0.2 + 80*0.1
        assert!((strong().score() - 83.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_clamped() {
        let high = ReadinessInput {
            aptitude: 50.0,
            technical: 50.0,
            ..strong()
        };
        assert_eq!(high.score(), 100.0);

        let negative = ReadinessInput {
            aptitude: -10.0,
            technical: -10.0,
            communication: -10.0,
            resume: -10.0,
            ..strong()
        };
        assert_eq!(negative.score(), 0.0);
    }

    #[test]
    fn test_all_clear_feedback() {
        assert_eq!(strong().feedback(), vec![ALL_CLEAR.to_string()]);
    }

    #[test]
    fn test_feedback_order() {
        let weak = ReadinessInput {
            aptitude: 5.0,
            technical: 9.0,
            communication: 6.0,
            resume: 8.0,
            cgpa: 6.8,
            backlogs: 2,
            projects: 1,
            certifications: 0,
        };
        assert_eq!(
            weak.feedback(),
            vec![
                "Priority: Improve CGPA (current: 6.8)",
                "Critical: Clear 2 backlogs",
                "Improve: Practice more aptitude questions and mock tests",
                "Improve: Enhance communication skills through practice",
                "Add: Work on more technical projects",
                "Add: Pursue relevant certifications",
            ]
        );
    }

    #[test]
    fn test_malformed_fields_become_zero() {
        let input = ReadinessInput::from(RawReadiness {
            aptitude: "7",
            technical: "",
            communication: "abc",
            resume: "NaN",
            cgpa: "7.0",
            backlogs: "x",
            projects: "2",
            certifications: "1",
        });
        assert_eq!(input.aptitude, 7.0);
        assert_eq!(input.technical, 0.0);
        assert_eq!(input.communication, 0.0);
        assert_eq!(input.resume, 0.0);
        assert_eq!(input.backlogs, 0);

        let report = input.report();
        assert!((report.readiness_score - 21.0).abs() < 1e-9);
        assert_eq!(report.feedback[0], "Priority: Improve CGPA (current: 7.0)");
        assert!(!report.feedback.iter().any(|f| f.starts_with("Critical")));
        // 70 is not below the threshold
        assert!(!report.feedback.iter().any(|f| f.contains("aptitude")));
    }
}
