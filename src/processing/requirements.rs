//! Job description parsing into a structured requirement profile

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::processing::taxonomy::{
    is_technical_term, CompanyContext, ExperienceBand, RoleCategory, EDUCATION_KEYWORDS,
    EXPERIENCE_PATTERNS, JOB_CONTEXT_INDICATORS, ROLE_CATEGORIES, SKILL_TAXONOMY, SOFT_SKILLS,
};
use crate::processing::text_processor::{
    alphabetic_words, extract_years, word_frequencies, TermSet,
};

/// Only the most frequent words are considered for priority keywords.
const PRIORITY_CANDIDATE_WINDOW: usize = 20;
const MAX_PRIORITY_KEYWORDS: usize = 10;

static ROLE_MATCHERS: Lazy<Vec<(RoleCategory, TermSet)>> = Lazy::new(|| {
    ROLE_CATEGORIES
        .iter()
        .map(|(role, phrases)| (*role, TermSet::new(phrases)))
        .collect()
});

static SKILL_MATCHERS: Lazy<Vec<(&'static str, Vec<(&'static str, TermSet)>)>> =
    Lazy::new(|| {
        SKILL_TAXONOMY
            .iter()
            .map(|(category, subcategories)| {
                let compiled = subcategories
                    .iter()
                    .map(|(name, terms)| (*name, TermSet::new(terms)))
                    .collect();
                (*category, compiled)
            })
            .collect()
    });

static EXPERIENCE_MATCHERS: Lazy<Vec<(ExperienceBand, Regex)>> = Lazy::new(|| {
    EXPERIENCE_PATTERNS
        .iter()
        .map(|(band, pattern)| (*band, Regex::new(pattern).expect("Invalid experience regex")))
        .collect()
});

static EDUCATION_MATCHERS: Lazy<Vec<(&'static str, TermSet)>> = Lazy::new(|| {
    EDUCATION_KEYWORDS
        .iter()
        .map(|(category, terms)| (*category, TermSet::new(terms)))
        .collect()
});

static SOFT_SKILL_MATCHER: Lazy<TermSet> = Lazy::new(|| TermSet::new(SOFT_SKILLS));

static CONTEXT_MATCHERS: Lazy<Vec<(CompanyContext, TermSet)>> = Lazy::new(|| {
    JOB_CONTEXT_INDICATORS
        .iter()
        .map(|(context, phrases)| (*context, TermSet::new(phrases)))
        .collect()
});

/// Structured requirements derived once from a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirementProfile {
    pub role_category: RoleCategory,
    pub required_skills: Vec<SkillCategoryMatch>,
    pub experience_level: ExperienceRequirement,
    pub education_requirements: Vec<EducationMatch>,
    pub soft_skills: Vec<String>,
    pub company_context: BTreeMap<CompanyContext, bool>,
    pub priority_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategoryMatch {
    pub category: String,
    /// Every subcategory of the taxonomy, including ones with no hits.
    pub subcategories: Vec<SubcategoryMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryMatch {
    pub name: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRequirement {
    pub levels_detected: BTreeSet<ExperienceBand>,
    pub years_mentioned: Vec<u32>,
    pub avg_years: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationMatch {
    pub category: String,
    pub terms: Vec<String>,
}

impl JobRequirementProfile {
    /// Degree keywords the job description asks for.
    pub fn degree_terms(&self) -> &[String] {
        self.education_requirements
            .iter()
            .find(|edu| edu.category == "degree_required")
            .map(|edu| edu.terms.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_context(&self, context: CompanyContext) -> bool {
        self.company_context.get(&context).copied().unwrap_or(false)
    }

    /// Total number of skill terms found across the taxonomy.
    pub fn skill_term_count(&self) -> usize {
        self.required_skills
            .iter()
            .flat_map(|category| category.subcategories.iter())
            .map(|sub| sub.terms.len())
            .sum()
    }
}

/// Parses job descriptions against the fixed taxonomies.
#[derive(Debug, Default, Clone, Copy)]
pub struct JobRequirementExtractor;

impl JobRequirementExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Build a requirement profile. Blank input yields `None`; callers skip
    /// job-aware scoring entirely in that case.
    pub fn extract(&self, job_description: &str) -> Option<JobRequirementProfile> {
        if job_description.trim().is_empty() {
            return None;
        }

        let jd_lower = job_description.to_lowercase();

        let role_category = self.detect_role_category(&jd_lower);
        let profile = JobRequirementProfile {
            role_category,
            required_skills: self.extract_skills(&jd_lower),
            experience_level: self.extract_experience_level(&jd_lower),
            education_requirements: self.extract_education(&jd_lower),
            soft_skills: self.extract_soft_skills(&jd_lower),
            company_context: self.extract_company_context(&jd_lower),
            priority_keywords: self.extract_priority_keywords(&jd_lower),
        };

        debug!(
            "Job profile: role={}, skill terms={}, avg years={:.1}, priority keywords={:?}",
            profile.role_category,
            profile.skill_term_count(),
            profile.experience_level.avg_years,
            profile.priority_keywords
        );

        Some(profile)
    }

    /// Highest count of defining phrases wins; earlier categories win ties.
    pub fn detect_role_category(&self, jd_lower: &str) -> RoleCategory {
        let mut best: Option<(RoleCategory, usize)> = None;

        for (role, phrases) in ROLE_MATCHERS.iter() {
            let score = phrases.count(jd_lower);
            if score == 0 {
                continue;
            }
            match best {
                Some((_, best_score)) if best_score >= score => {}
                _ => best = Some((*role, score)),
            }
        }

        best.map(|(role, _)| role).unwrap_or(RoleCategory::General)
    }

    pub fn extract_skills(&self, jd_lower: &str) -> Vec<SkillCategoryMatch> {
        SKILL_MATCHERS
            .iter()
            .map(|(category, subcategories)| SkillCategoryMatch {
                category: category.to_string(),
                subcategories: subcategories
                    .iter()
                    .map(|(name, terms)| SubcategoryMatch {
                        name: name.to_string(),
                        terms: terms.found(jd_lower).into_iter().map(String::from).collect(),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn extract_experience_level(&self, jd_lower: &str) -> ExperienceRequirement {
        let levels_detected = EXPERIENCE_MATCHERS
            .iter()
            .filter(|(_, pattern)| pattern.is_match(jd_lower))
            .map(|(band, _)| *band)
            .collect();

        let years_mentioned = extract_years(jd_lower);
        let avg_years = if years_mentioned.is_empty() {
            0.0
        } else {
            years_mentioned.iter().map(|y| f64::from(*y)).sum::<f64>() / years_mentioned.len() as f64
        };

        ExperienceRequirement {
            levels_detected,
            years_mentioned,
            avg_years,
        }
    }

    pub fn extract_education(&self, jd_lower: &str) -> Vec<EducationMatch> {
        EDUCATION_MATCHERS
            .iter()
            .map(|(category, terms)| EducationMatch {
                category: category.to_string(),
                terms: terms.found(jd_lower).into_iter().map(String::from).collect(),
            })
            .collect()
    }

    pub fn extract_soft_skills(&self, jd_lower: &str) -> Vec<String> {
        SOFT_SKILL_MATCHER
            .found(jd_lower)
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn extract_company_context(&self, jd_lower: &str) -> BTreeMap<CompanyContext, bool> {
        CONTEXT_MATCHERS
            .iter()
            .map(|(context, indicators)| (*context, indicators.any(jd_lower)))
            .collect()
    }

    /// Frequent words (at least twice) that are technical terms or 4+ letters long.
    pub fn extract_priority_keywords(&self, jd_lower: &str) -> Vec<String> {
        let words = alphabetic_words(jd_lower);

        word_frequencies(&words)
            .into_iter()
            .take(PRIORITY_CANDIDATE_WINDOW)
            .filter(|(word, freq)| *freq >= 2 && (is_technical_term(word) || word.len() >= 4))
            .take(MAX_PRIORITY_KEYWORDS)
            .map(|(word, _)| word.to_string())
            .collect()
    }
}
