//! Personalized placement recommendations
//!
//! Rule tables over the student profile (CGPA, backlogs, branch, test
//! scores, internships, projects, certifications, hackathons). Test scores
//! are on the same 0-10 scale as readiness.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::processing::readiness::{RawReadiness, ReadinessInput};
use crate::processing::scoring::coerce_count;

const TIER_ONE_COMPANIES: &[&str] = &["Google", "Microsoft", "Amazon", "Adobe", "Salesforce"];
const SERVICE_COMPANIES: &[&str] = &["Infosys", "TCS", "Wipro", "Accenture", "Cognizant", "Capgemini"];
const FALLBACK_COMPANIES: &[&str] = &["Local companies", "Startups", "Service-based companies"];

/// Focus flags use this cutoff for technical and communication scores.
const FOCUS_SCORE_THRESHOLD: f64 = 7.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    Cse,
    AiDs,
    Ece,
    Mech,
    Civil,
    Ise,
    /// Any other branch name, kept as given. It gets no branch advice.
    Other(String),
}

struct BranchAdvice {
    focus: &'static str,
    skills: &'static str,
    companies: &'static str,
}

impl Branch {
    /// Blank input is CSE.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_uppercase().as_str() {
            "" | "CSE" => Branch::Cse,
            "AI&DS" => Branch::AiDs,
            "ECE" => Branch::Ece,
            "MECH" => Branch::Mech,
            "CIVIL" => Branch::Civil,
            "ISE" => Branch::Ise,
            _ => Branch::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Branch::Cse => "CSE",
            Branch::AiDs => "AI&DS",
            Branch::Ece => "ECE",
            Branch::Mech => "MECH",
            Branch::Civil => "CIVIL",
            Branch::Ise => "ISE",
            Branch::Other(name) => name,
        }
    }

    fn advice(&self) -> Option<BranchAdvice> {
        let (focus, skills, companies) = match self {
            Branch::Cse => (
                "Software Development, Data Science, AI/ML",
                "DSA, System Design, Full-Stack Development",
                "Tech giants, Startups, Product companies",
            ),
            Branch::AiDs => (
                "Machine Learning, Data Analytics, AI Research",
                "Python, TensorFlow, Statistics, SQL",
                "AI companies, Research labs, Tech consultancies",
            ),
            Branch::Ece => (
                "Embedded Systems, IoT, Telecommunications",
                "C/C++, Hardware design, Signal processing",
                "Hardware companies, Telecom, Automotive",
            ),
            Branch::Mech => (
                "Design, Manufacturing, Automotive",
                "CAD, Manufacturing processes, Project management",
                "Manufacturing, Automotive, Aerospace",
            ),
            Branch::Civil => (
                "Construction, Infrastructure, Project management",
                "AutoCAD, Project planning, Site management",
                "Construction firms, Infrastructure companies",
            ),
            Branch::Ise => (
                "Information Systems, Business Analysis",
                "Database management, Business processes, Analytics",
                "IT services, Consulting, Business analytics",
            ),
            Branch::Other(_) => return None,
        };
        Some(BranchAdvice { focus, skills, companies })
    }

    fn is_software(&self) -> bool {
        matches!(self, Branch::Cse | Branch::AiDs | Branch::Ise)
    }

    fn is_cloud_track(&self) -> bool {
        matches!(self, Branch::Cse | Branch::AiDs)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readiness fields plus the profile facts only recommendations use.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileInput {
    pub readiness: ReadinessInput,
    pub branch: Branch,
    pub internships: u32,
    pub hackathons: u32,
}

impl ProfileInput {
    pub fn from_raw(raw: RawReadiness<'_>, branch: &str, internships: &str, hackathons: &str) -> Self {
        Self {
            readiness: ReadinessInput::from(raw),
            branch: Branch::parse(branch),
            internships: coerce_count(internships),
            hackathons: coerce_count(hackathons),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusAreas {
    pub technical: bool,
    pub communication: bool,
    pub experience: bool,
    pub projects: bool,
    pub certifications: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalizedRecommendations {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub action_items: Vec<String>,
    pub company_recommendations: Vec<String>,
    pub focus_areas: FocusAreas,
}

#[derive(Default)]
struct Lists {
    strengths: Vec<String>,
    improvements: Vec<String>,
    action_items: Vec<String>,
}

/// Build strengths, improvements, action items and target companies.
pub fn personalized_recommendations(profile: &ProfileInput) -> PersonalizedRecommendations {
    let input = &profile.readiness;
    let branch = &profile.branch;
    let mut lists = Lists::default();

    academics(input, &mut lists);
    backlogs(input.backlogs, &mut lists);

    if let Some(advice) = branch.advice() {
        lists.action_items.push(format!("Focus on {} roles in {}", advice.focus, branch));
        lists.action_items.push(format!("Develop skills: {}", advice.skills));
        lists.action_items.push(format!("Target companies: {}", advice.companies));
    }

    assessment_scores(input, branch, &mut lists);
    experience(profile, &mut lists);
    certifications(input.certifications, branch, &mut lists);

    if profile.hackathons >= 1 {
        lists.strengths.push("Competitive programming/hackathon experience".to_string());
    } else {
        lists
            .action_items
            .push("Participate in hackathons and coding competitions".to_string());
    }

    if input.resume >= 8.0 {
        lists.strengths.push(format!("Well-crafted resume (Score: {}/10)", input.resume));
    } else if input.resume >= 6.0 {
        lists.strengths.push(format!("Decent resume quality (Score: {}/10)", input.resume));
    } else {
        lists
            .improvements
            .push(format!("Improve resume quality (Current: {}/10)", input.resume));
        lists
            .action_items
            .push("Use action verbs, quantify achievements, get resume reviewed".to_string());
    }

    let total_test_score = input.aptitude + input.technical + input.communication;
    let outlook = if total_test_score >= 24.0 {
        "You're well-prepared! Focus on interview preparation and company research"
    } else if total_test_score >= 18.0 {
        "Good foundation. Polish weak areas and practice mock interviews"
    } else {
        "Intensive preparation needed. Create a 3-month improvement plan"
    };
    lists.action_items.push(outlook.to_string());

    let recommendations = PersonalizedRecommendations {
        strengths: lists.strengths,
        improvements: lists.improvements,
        action_items: lists.action_items,
        company_recommendations: target_companies(input),
        focus_areas: FocusAreas {
            technical: input.technical < FOCUS_SCORE_THRESHOLD,
            communication: input.communication < FOCUS_SCORE_THRESHOLD,
            experience: profile.internships == 0,
            projects: input.projects < 2,
            certifications: input.certifications == 0,
        },
    };

    debug!(
        "Recommendations for {}: {} strengths, {} improvements, {} action items",
        branch,
        recommendations.strengths.len(),
        recommendations.improvements.len(),
        recommendations.action_items.len()
    );
    recommendations
}

fn academics(input: &ReadinessInput, lists: &mut Lists) {
    let cgpa = input.cgpa;
    if cgpa >= 8.5 {
        lists
            .strengths
            .push(format!("Excellent academic performance (CGPA: {:.1})", cgpa));
        lists
            .action_items
            .push("Target Tier 1 companies like Google, Microsoft, Amazon".to_string());
    } else if cgpa >= 7.5 {
        lists.strengths.push(format!("Strong academic foundation (CGPA: {:.1})", cgpa));
        lists.action_items.push("Apply to Tier 1 and Tier 2 companies".to_string());
    } else if cgpa >= 6.5 {
        lists.strengths.push(format!("Good academic performance (CGPA: {:.1})", cgpa));
        lists
            .action_items
            .push("Focus on Tier 2 and Tier 3 companies initially".to_string());
    } else {
        lists
            .improvements
            .push(format!("Improve academic performance (Current CGPA: {:.1})", cgpa));
        lists
            .action_items
            .push("Focus on skill development to compensate for lower CGPA".to_string());
    }
}

fn backlogs(backlogs: u32, lists: &mut Lists) {
    match backlogs {
        0 => lists.strengths.push("Clean academic record with no backlogs".to_string()),
        1..=2 => lists
            .improvements
            .push(format!("Clear remaining {} backlog(s) before placements", backlogs)),
        _ => {
            lists
                .improvements
                .push(format!("Priority: Clear {} backlogs immediately", backlogs));
            lists
                .action_items
                .push("Dedicate time to clear backlogs - major placement criteria".to_string());
        }
    }
}

fn assessment_scores(input: &ReadinessInput, branch: &Branch, lists: &mut Lists) {
    let aptitude = input.aptitude;
    if aptitude >= 8.0 {
        lists
            .strengths
            .push(format!("Excellent logical reasoning (Aptitude: {}/10)", aptitude));
    } else if aptitude >= 6.0 {
        lists
            .strengths
            .push(format!("Good problem-solving skills (Aptitude: {}/10)", aptitude));
    } else {
        lists
            .improvements
            .push(format!("Strengthen logical reasoning (Current: {}/10)", aptitude));
        lists
            .action_items
            .push("Practice aptitude questions daily - use apps like IndiaBix, PrepInsta".to_string());
    }

    let technical = input.technical;
    if technical >= 8.0 {
        lists.strengths.push(format!("Strong technical knowledge ({}/10)", technical));
    } else if technical >= 6.0 {
        lists.strengths.push(format!("Decent technical foundation ({}/10)", technical));
    } else {
        lists
            .improvements
            .push(format!("Improve technical skills (Current: {}/10)", technical));
        lists.action_items.push(if branch.is_software() {
            "Focus on DSA, practice coding on LeetCode/HackerRank".to_string()
        } else {
            format!("Strengthen core {} concepts and practical applications", branch)
        });
    }

    let communication = input.communication;
    if communication >= 8.0 {
        lists
            .strengths
            .push(format!("Excellent communication skills ({}/10)", communication));
    } else if communication >= 6.0 {
        lists
            .strengths
            .push(format!("Good communication abilities ({}/10)", communication));
    } else {
        lists
            .improvements
            .push(format!("Enhance communication skills (Current: {}/10)", communication));
        lists
            .action_items
            .push("Practice speaking, join Toastmasters, do mock interviews".to_string());
    }
}

fn experience(profile: &ProfileInput, lists: &mut Lists) {
    match profile.internships {
        0 => {
            lists.improvements.push("Gain practical industry experience".to_string());
            lists
                .action_items
                .push("Apply for internships on LinkedIn, Internshala, company websites".to_string());
        }
        1 => lists
            .strengths
            .push("Some industry experience (1 internship)".to_string()),
        n => lists
            .strengths
            .push(format!("Good industry exposure ({} internships)", n)),
    }

    match profile.readiness.projects {
        0 => {
            lists.improvements.push("Build more practical projects".to_string());
            lists.action_items.push(format!(
                "Create 2-3 projects showcasing your {} skills",
                profile.branch
            ));
        }
        n @ 1..=2 => lists
            .strengths
            .push(format!("Decent project experience ({} projects)", n)),
        n => lists
            .strengths
            .push(format!("Strong project portfolio ({} projects)", n)),
    }
}

fn certifications(count: u32, branch: &Branch, lists: &mut Lists) {
    match count {
        0 => {
            lists
                .improvements
                .push("Obtain industry-relevant certifications".to_string());
            lists.action_items.push(if branch.is_cloud_track() {
                "Get AWS/Azure, Google Cloud, or programming certifications".to_string()
            } else {
                format!("Pursue {} domain-specific certifications", branch)
            });
        }
        1..=2 => lists
            .strengths
            .push(format!("Some relevant certifications ({})", count)),
        _ => lists
            .strengths
            .push(format!("Well-certified professional ({} certifications)", count)),
    }
}

fn target_companies(input: &ReadinessInput) -> Vec<String> {
    let companies = if input.cgpa >= 8.0 && input.technical >= 7.0 && input.backlogs == 0 {
        TIER_ONE_COMPANIES
    } else if input.cgpa >= 7.0 && input.technical >= 6.0 {
        SERVICE_COMPANIES
    } else {
        FALLBACK_COMPANIES
    };
    companies.iter().map(|c| c.to_string()).collect()
}
