//! ATS (Applicant Tracking System) matching of a resume against job requirements

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::output::feedback::Severity;
use crate::processing::requirements::JobRequirementProfile;
use crate::processing::scoring::{
    clamp_percent, experience_diff_band, format_decimal, keyword_band, KEYWORD_MATCH_DEFAULT,
};
use crate::processing::taxonomy::{
    title_case, CompanyContext, DEGREE_TERMS, RESUME_CONTEXT_INDICATORS,
};
use crate::processing::text_processor::{extract_years, TermSet};

pub const KEYWORD_WEIGHT: f64 = 0.40;
pub const EXPERIENCE_WEIGHT: f64 = 0.25;
pub const SKILLS_WEIGHT: f64 = 0.25;
pub const CULTURE_WEIGHT: f64 = 0.10;

/// Sub-scores below this name an improvement area.
const IMPROVEMENT_THRESHOLD: f64 = 75.0;
const CULTURE_BASE: f64 = 70.0;
const SOFT_SKILL_BONUS: f64 = 20.0;
const CONTEXT_BONUS: f64 = 5.0;
const SKILLS_DEFAULT: f64 = 70.0;

static RESUME_CONTEXT_MATCHERS: Lazy<Vec<(CompanyContext, TermSet)>> = Lazy::new(|| {
    RESUME_CONTEXT_INDICATORS
        .iter()
        .map(|(context, phrases)| (*context, TermSet::new(phrases)))
        .collect()
});

static DEGREE_MATCHER: Lazy<TermSet> = Lazy::new(|| TermSet::new(DEGREE_TERMS));

/// How well one resume matches one job profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMatchResult {
    pub ats_score: f64,
    pub keyword_match: f64,
    pub experience_alignment: f64,
    pub skills_coverage: f64,
    pub culture_fit: f64,
    pub improvement_areas: Vec<String>,
    pub detailed_feedback: Vec<String>,
}

/// Scores resumes against a [`JobRequirementProfile`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ATSMatcher;

impl ATSMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Calculate the weighted job match score and its feedback.
    pub fn calculate_job_match(&self, resume_text: &str, job: &JobRequirementProfile) -> JobMatchResult {
        let resume_lower = resume_text.to_lowercase();

        let keyword_match = clamp_percent(self.keyword_match(&resume_lower, job));
        let experience_alignment = clamp_percent(self.experience_alignment(&resume_lower, job));
        let skills_coverage = clamp_percent(self.skills_coverage(&resume_lower, job));
        let culture_fit = clamp_percent(self.culture_fit(&resume_lower, job));

        let ats_score = (keyword_match * KEYWORD_WEIGHT
            + experience_alignment * EXPERIENCE_WEIGHT
            + skills_coverage * SKILLS_WEIGHT
            + culture_fit * CULTURE_WEIGHT)
            .min(100.0);

        debug!(
            "Job match: keyword={:.1} experience={:.1} skills={:.1} culture={:.1} -> ats={:.1}",
            keyword_match, experience_alignment, skills_coverage, culture_fit, ats_score
        );

        let mut improvement_areas = Vec::new();
        if keyword_match < IMPROVEMENT_THRESHOLD {
            improvement_areas.push("Keyword Optimization".to_string());
        }
        if experience_alignment < IMPROVEMENT_THRESHOLD {
            improvement_areas.push("Experience Presentation".to_string());
        }
        if skills_coverage < IMPROVEMENT_THRESHOLD {
            improvement_areas.push("Technical Skills".to_string());
        }
        if culture_fit < IMPROVEMENT_THRESHOLD {
            improvement_areas.push("Soft Skills & Culture Fit".to_string());
        }

        let scores = SubScores {
            keyword: keyword_match,
            experience: experience_alignment,
            skills: skills_coverage,
            culture: culture_fit,
        };
        let detailed_feedback = self.detailed_feedback(&resume_lower, job, &scores);

        JobMatchResult {
            ats_score,
            keyword_match,
            experience_alignment,
            skills_coverage,
            culture_fit,
            improvement_areas,
            detailed_feedback,
        }
    }

    /// Share of priority keywords present, mapped through the keyword bands.
    pub fn keyword_match(&self, resume_lower: &str, job: &JobRequirementProfile) -> f64 {
        let keywords = &job.priority_keywords;
        if keywords.is_empty() {
            return KEYWORD_MATCH_DEFAULT;
        }

        let matches = keywords.iter().filter(|kw| resume_lower.contains(kw.as_str())).count();
        keyword_band(matches as f64 / keywords.len() as f64)
    }

    pub fn experience_alignment(&self, resume_lower: &str, job: &JobRequirementProfile) -> f64 {
        let avg_years_req = job.experience_level.avg_years;
        let resume_years = extract_years(resume_lower);

        let max_resume_years = match resume_years.iter().max() {
            Some(years) => f64::from(*years),
            // both silent: benefit of the doubt
            None if avg_years_req == 0.0 => return 80.0,
            None => return 60.0,
        };

        if avg_years_req == 0.0 {
            return 75.0;
        }

        experience_diff_band((max_resume_years - avg_years_req).abs())
    }

    /// Mean over categories of the mean subcategory hit ratio.
    pub fn skills_coverage(&self, resume_lower: &str, job: &JobRequirementProfile) -> f64 {
        let mut total_score = 0.0;
        let mut category_count = 0usize;

        for category in &job.required_skills {
            let mut category_score = 0.0;
            let mut subcategory_count = 0usize;

            for sub in category.subcategories.iter().filter(|sub| !sub.terms.is_empty()) {
                let matches = sub
                    .terms
                    .iter()
                    .filter(|term| resume_lower.contains(term.as_str()))
                    .count();
                category_score += matches as f64 / sub.terms.len() as f64 * 100.0;
                subcategory_count += 1;
            }

            if subcategory_count > 0 {
                total_score += category_score / subcategory_count as f64;
                category_count += 1;
            }
        }

        if category_count == 0 {
            return SKILLS_DEFAULT;
        }

        (total_score / category_count as f64).min(100.0)
    }

    pub fn culture_fit(&self, resume_lower: &str, job: &JobRequirementProfile) -> f64 {
        let mut score = CULTURE_BASE;

        if !job.soft_skills.is_empty() {
            let matches = job
                .soft_skills
                .iter()
                .filter(|skill| resume_lower.contains(skill.as_str()))
                .count();
            score += matches as f64 / job.soft_skills.len() as f64 * SOFT_SKILL_BONUS;
        }

        for (context, indicators) in RESUME_CONTEXT_MATCHERS.iter() {
            if job.has_context(*context) && indicators.any(resume_lower) {
                score += CONTEXT_BONUS;
            }
        }

        score.min(100.0)
    }

    fn detailed_feedback(
        &self,
        resume_lower: &str,
        job: &JobRequirementProfile,
        scores: &SubScores,
    ) -> Vec<String> {
        let mut feedback = Vec::new();

        // keywords
        let (present, missing): (Vec<&String>, Vec<&String>) = job
            .priority_keywords
            .iter()
            .partition(|kw| resume_lower.contains(kw.as_str()));

        if scores.keyword < 80.0 {
            if !missing.is_empty() {
                feedback.push(Severity::Fault.tag(format!(
                    "Missing {} critical job keywords",
                    missing.len()
                )));
                feedback.push(Severity::Improve.tag(format!(
                    "Add these exact terms from job posting: {}",
                    join_first(&missing, 5)
                )));
            }
            if !present.is_empty() {
                feedback.push(Severity::Strength.tag(format!(
                    "Found {} relevant keywords: {}",
                    present.len(),
                    join_first(&present, 3)
                )));
            }
        } else {
            feedback.push(Severity::Excellent.tag(format!(
                "Strong keyword alignment ({}/{} matched)",
                present.len(),
                job.priority_keywords.len()
            )));
        }

        // experience
        let avg_years_req = job.experience_level.avg_years;
        if scores.experience < IMPROVEMENT_THRESHOLD && avg_years_req > 0.0 {
            let years = format_decimal(avg_years_req);
            feedback.push(Severity::Fault.tag(format!(
                "Experience level unclear or misaligned with {}+ years requirement",
                years
            )));
            feedback.push(Severity::Improve.tag(format!(
                "Prominently display '{}+ years experience' in summary section",
                years
            )));
            feedback.push(Severity::Improve.tag(
                "Quantify achievements with years/duration (e.g., 'Led team for 3 years')",
            ));
        }

        // skills
        if scores.skills < 70.0 {
            let mut missing_categories: Vec<String> = Vec::new();
            for category in &job.required_skills {
                for sub in &category.subcategories {
                    if !sub.terms.is_empty()
                        && !sub.terms.iter().any(|term| resume_lower.contains(term.as_str()))
                    {
                        missing_categories.push(title_case(&category.category));
                    }
                }
            }

            if !missing_categories.is_empty() {
                let mut named: Vec<String> = Vec::new();
                for name in missing_categories.into_iter().take(3) {
                    if !named.contains(&name) {
                        named.push(name);
                    }
                }
                feedback.push(Severity::Fault.tag(format!(
                    "Missing key {} skills in {}",
                    job.role_category.spaced(),
                    named.join(", ")
                )));

                for category in &job.required_skills {
                    for sub in &category.subcategories {
                        let missing_skills: Vec<&str> = sub
                            .terms
                            .iter()
                            .filter(|term| !resume_lower.contains(term.as_str()))
                            .map(String::as_str)
                            .collect();
                        if !missing_skills.is_empty() && missing_skills.len() <= 3 {
                            feedback.push(Severity::Improve.tag(format!(
                                "Add {} skills: {}",
                                category.category.replace('_', " "),
                                missing_skills.join(", ")
                            )));
                        }
                    }
                }
            }
        }

        // education
        if !job.degree_terms().is_empty() && !DEGREE_MATCHER.any(resume_lower) {
            feedback.push(Severity::Fault.tag("Education section missing or unclear"));
            feedback.push(Severity::Improve.tag("Clearly state your degree and field of study"));
        }

        // soft skills and culture; fires below 75 although culture_fit never drops under 70
        if scores.culture < IMPROVEMENT_THRESHOLD {
            let missing_soft: Vec<&String> = job
                .soft_skills
                .iter()
                .filter(|skill| !resume_lower.contains(skill.as_str()))
                .collect();
            if !missing_soft.is_empty() {
                feedback.push(Severity::Fault.tag("Missing soft skills emphasized in job posting"));
                feedback.push(Severity::Improve.tag(format!(
                    "Incorporate these soft skills: {}",
                    join_first(&missing_soft, 3)
                )));
            }

            if job.has_context(CompanyContext::Startup) && !resume_lower.contains("agile") {
                feedback.push(Severity::Improve.tag(
                    "Highlight agile/fast-paced work experience for startup environment",
                ));
            } else if job.has_context(CompanyContext::Enterprise) && !resume_lower.contains("scale") {
                feedback.push(Severity::Improve.tag(
                    "Emphasize large-scale project experience for enterprise role",
                ));
            }
        }

        if !resume_lower.contains("pdf") {
            feedback.push(Severity::Recommendation.tag("Save resume as PDF for better ATS compatibility"));
        }

        if scores.keyword < 60.0 || scores.skills < 60.0 {
            feedback.push(Severity::Critical.tag("Resume needs significant customization for this specific job"));
            feedback.push(Severity::ActionPlan.tag("Rewrite summary to mirror job description language"));
        }

        feedback
    }
}

struct SubScores {
    keyword: f64,
    experience: f64,
    skills: f64,
    culture: f64,
}

fn join_first(items: &[&String], limit: usize) -> String {
    items
        .iter()
        .take(limit)
        .map(|s| s.as_str())
        .collect::<Vec<&str>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::requirements::{
        ExperienceRequirement, JobRequirementExtractor, SkillCategoryMatch, SubcategoryMatch,
    };
    use crate::processing::taxonomy::RoleCategory;
    use std::collections::{BTreeMap, BTreeSet};

    fn profile(jd: &str) -> JobRequirementProfile {
        JobRequirementExtractor::new().extract(jd).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Backend profile with one partly covered and one fully missing subcategory.
    fn backend_profile() -> JobRequirementProfile {
        JobRequirementProfile {
            role_category: RoleCategory::Backend,
            required_skills: vec![
                SkillCategoryMatch {
                    category: "programming_languages".to_string(),
                    subcategories: vec![SubcategoryMatch {
                        name: "python".to_string(),
                        terms: strings(&["python", "django", "flask"]),
                    }],
                },
                SkillCategoryMatch {
                    category: "databases".to_string(),
                    subcategories: vec![SubcategoryMatch {
                        name: "sql".to_string(),
                        terms: strings(&["postgresql", "mysql", "sqlite", "oracle"]),
                    }],
                },
            ],
            experience_level: ExperienceRequirement {
                levels_detected: BTreeSet::new(),
                years_mentioned: Vec::new(),
                avg_years: 0.0,
            },
            education_requirements: Vec::new(),
            soft_skills: strings(&["communication", "leadership", "teamwork", "mentoring"]),
            company_context: BTreeMap::from([
                (CompanyContext::Startup, true),
                (CompanyContext::Enterprise, true),
            ]),
            priority_keywords: Vec::new(),
        }
    }

    fn scores(skills: f64, culture: f64) -> SubScores {
        SubScores {
            keyword: 90.0,
            experience: 90.0,
            skills,
            culture,
        }
    }

    fn improve_lines(feedback: &[String]) -> Vec<&str> {
        feedback
            .iter()
            .filter(|line| line.starts_with("🔧 IMPROVE: "))
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_resume_without_years_scores_sixty() {
        let job = profile("Python developer. Python required. 3+ years experience.");
        let matcher = ATSMatcher::new();
        let score = matcher.experience_alignment("python and django", &job);
        assert_eq!(score, 60.0);

        let result = matcher.calculate_job_match("I write python every day", &job);
        assert_eq!(result.experience_alignment, 60.0);
        assert!(result.improvement_areas.contains(&"Experience Presentation".to_string()));
    }

    #[test]
    fn test_experience_when_both_silent_or_job_silent() {
        let matcher = ATSMatcher::new();
        let job = profile("backend engineer wanted");
        assert_eq!(matcher.experience_alignment("no numbers here", &job), 80.0);
        assert_eq!(matcher.experience_alignment("4 years of go", &job), 75.0);
    }

    #[test]
    fn test_experience_diff_bands() {
        let matcher = ATSMatcher::new();
        let job = profile("we need 5 years of experience");
        assert_eq!(matcher.experience_alignment("5 years", &job), 95.0);
        assert_eq!(matcher.experience_alignment("7 years", &job), 85.0);
        assert_eq!(matcher.experience_alignment("2 years", &job), 75.0);
        assert_eq!(matcher.experience_alignment("1 year", &job), 55.0);
    }

    #[test]
    fn test_priority_keywords_round_trip() {
        let job = profile(
            "Kubernetes platform team. Kubernetes operators, terraform modules, terraform state, \
             observability pipelines and observability dashboards.",
        );
        assert!(!job.priority_keywords.is_empty());

        let resume = job.priority_keywords.join(" ");
        let result = ATSMatcher::new().calculate_job_match(&resume, &job);
        assert_eq!(result.keyword_match, 95.0);
    }

    #[test]
    fn test_keyword_default_without_priority_keywords() {
        let job = profile("Rust");
        assert!(job.priority_keywords.is_empty());
        assert_eq!(ATSMatcher::new().keyword_match("anything", &job), 70.0);
    }

    #[test]
    fn test_skills_coverage() {
        let matcher = ATSMatcher::new();
        // python subcategory lists python + django; containers lists docker
        let job = profile("python django docker");
        let coverage = matcher.skills_coverage("python and docker", &job);
        // programming_languages: 50, frameworks(django): 0, devops_tools: 100 -> mean 50
        assert!((coverage - 50.0).abs() < 1e-9);

        let empty = profile("friendly people");
        assert_eq!(matcher.skills_coverage("python", &empty), 70.0);
    }

    #[test]
    fn test_culture_fit_bonuses() {
        let matcher = ATSMatcher::new();
        let job = profile("startup seeks leadership and communication, remote team");
        let fit = matcher.culture_fit("leadership in an agile remote team", &job);
        // 70 + 10 (1 of 2 soft skills) + 5 startup + 5 remote
        assert!((fit - 90.0).abs() < 1e-9);
        assert!(matcher.culture_fit("nothing", &job) >= 70.0);
    }

    #[test]
    fn test_weighted_score_and_bounds() {
        let job = profile("python developer with docker, 3 years experience, communication skills");
        let result = ATSMatcher::new().calculate_job_match("python docker 3 years communication pdf", &job);
        let expected = result.keyword_match * 0.40
            + result.experience_alignment * 0.25
            + result.skills_coverage * 0.25
            + result.culture_fit * 0.10;
        assert!((result.ats_score - expected.min(100.0)).abs() < 1e-9);
        for value in [
            result.ats_score,
            result.keyword_match,
            result.experience_alignment,
            result.skills_coverage,
            result.culture_fit,
        ] {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_detailed_feedback_for_weak_resume() {
        let job = profile(
            "Senior backend engineer. Backend services in python and django, postgresql, \
             redis. Backend on-call. 5 years required. Bachelor degree. Startup pace.",
        );
        let result = ATSMatcher::new().calculate_job_match("I like gardening and cooking", &job);
        let feedback = result.detailed_feedback.join("\n");

        assert!(feedback.contains("❌ FAULT: Missing"));
        assert!(feedback.contains("Experience level unclear or misaligned with 5.0+ years requirement"));
        assert!(feedback.contains("Missing key backend skills in"));
        assert!(feedback.contains("Education section missing or unclear"));
        assert!(feedback.contains("⚠️ RECOMMENDATION: Save resume as PDF"));
        assert!(feedback.contains("🎯 CRITICAL: Resume needs significant customization"));
        assert!(result.detailed_feedback.last().unwrap().starts_with("🔧 ACTION PLAN:"));
    }

    #[test]
    fn test_add_skills_line_only_for_three_or_fewer_missing_terms() {
        let job = backend_profile();
        let feedback = ATSMatcher::new().detailed_feedback("python pdf", &job, &scores(50.0, 90.0));

        assert!(feedback.contains(&"❌ FAULT: Missing key backend skills in Databases".to_string()));
        // the sql subcategory misses four terms, so it gets no add line
        assert_eq!(
            improve_lines(&feedback),
            vec!["🔧 IMPROVE: Add programming languages skills: django, flask"]
        );

        let covered = ATSMatcher::new().detailed_feedback("python pdf", &job, &scores(70.0, 90.0));
        assert!(improve_lines(&covered).is_empty());
    }

    #[test]
    fn test_soft_skill_and_startup_callouts() {
        let job = backend_profile();
        let feedback = ATSMatcher::new().detailed_feedback("python django flask leadership pdf", &job, &scores(90.0, 72.0));

        assert!(feedback.contains(&"❌ FAULT: Missing soft skills emphasized in job posting".to_string()));
        assert_eq!(
            improve_lines(&feedback),
            vec![
                "🔧 IMPROVE: Incorporate these soft skills: communication, teamwork, mentoring",
                "🔧 IMPROVE: Highlight agile/fast-paced work experience for startup environment",
            ]
        );
    }

    #[test]
    fn test_enterprise_callout_only_when_startup_is_satisfied() {
        let job = backend_profile();
        let soft = "communication leadership teamwork mentoring pdf";
        let matcher = ATSMatcher::new();

        let agile = matcher.detailed_feedback(&format!("{} agile", soft), &job, &scores(90.0, 72.0));
        assert_eq!(
            improve_lines(&agile),
            vec!["🔧 IMPROVE: Emphasize large-scale project experience for enterprise role"]
        );

        let both = matcher.detailed_feedback(&format!("{} agile at scale", soft), &job, &scores(90.0, 72.0));
        assert!(improve_lines(&both).is_empty());

        let mut enterprise_only = backend_profile();
        enterprise_only.company_context.insert(CompanyContext::Startup, false);
        let enterprise = matcher.detailed_feedback(soft, &enterprise_only, &scores(90.0, 72.0));
        assert_eq!(
            improve_lines(&enterprise),
            vec!["🔧 IMPROVE: Emphasize large-scale project experience for enterprise role"]
        );

        let fit = matcher.detailed_feedback(soft, &job, &scores(90.0, 75.0));
        assert!(improve_lines(&fit).is_empty());
    }

    #[test]
    fn test_strong_keyword_feedback() {
        let job = profile("react react typescript typescript redux redux");
        let result = ATSMatcher::new().calculate_job_match("react typescript redux resume.pdf", &job);
        assert_eq!(result.keyword_match, 95.0);
        assert!(result.detailed_feedback[0].starts_with("✅ EXCELLENT: Strong keyword alignment (3/3 matched)"));
        assert!(!result.detailed_feedback.iter().any(|f| f.contains("Save resume as PDF")));
    }
}
