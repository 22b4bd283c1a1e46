//! Fixed lookup tables used by the extractor and scorers.
//!
//! Everything here is immutable and ordered. Order matters: role ties are
//! broken by position in [`ROLE_CATEGORIES`], and feedback walks the skill
//! taxonomy in declaration order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Job-family label detected from a job description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    SoftwareEngineer,
    DataScientist,
    Devops,
    Frontend,
    Backend,
    Fullstack,
    Mobile,
    Qa,
    ProductManager,
    Cybersecurity,
    General,
}

impl RoleCategory {
    /// Snake-case identifier, e.g. `data_scientist`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::SoftwareEngineer => "software_engineer",
            RoleCategory::DataScientist => "data_scientist",
            RoleCategory::Devops => "devops",
            RoleCategory::Frontend => "frontend",
            RoleCategory::Backend => "backend",
            RoleCategory::Fullstack => "fullstack",
            RoleCategory::Mobile => "mobile",
            RoleCategory::Qa => "qa",
            RoleCategory::ProductManager => "product_manager",
            RoleCategory::Cybersecurity => "cybersecurity",
            RoleCategory::General => "general",
        }
    }

    /// Lower-case words, e.g. `data scientist`.
    pub fn spaced(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Title-cased words, e.g. `Data Scientist`.
    pub fn title(&self) -> String {
        title_case(self.as_str())
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role categories with their defining phrases, in tie-break order.
pub const ROLE_CATEGORIES: &[(RoleCategory, &[&str])] = &[
    (
        RoleCategory::SoftwareEngineer,
        &["software engineer", "developer", "programmer", "sde", "software development"],
    ),
    (
        RoleCategory::DataScientist,
        &["data scientist", "data analyst", "ml engineer", "machine learning", "ai engineer"],
    ),
    (
        RoleCategory::Devops,
        &["devops", "site reliability", "platform engineer", "infrastructure", "cloud engineer"],
    ),
    (
        RoleCategory::Frontend,
        &["frontend", "front-end", "ui developer", "react developer", "angular developer"],
    ),
    (
        RoleCategory::Backend,
        &["backend", "back-end", "api developer", "server developer", "microservices"],
    ),
    (
        RoleCategory::Fullstack,
        &["fullstack", "full-stack", "full stack developer"],
    ),
    (
        RoleCategory::Mobile,
        &["mobile developer", "ios developer", "android developer", "react native", "flutter"],
    ),
    (
        RoleCategory::Qa,
        &["qa engineer", "test engineer", "automation tester", "quality assurance"],
    ),
    (
        RoleCategory::ProductManager,
        &["product manager", "product owner", "pm", "product lead"],
    ),
    (
        RoleCategory::Cybersecurity,
        &["security engineer", "cybersecurity", "infosec", "security analyst"],
    ),
];

pub type SkillSubcategory = (&'static str, &'static [&'static str]);
pub type SkillCategory = (&'static str, &'static [SkillSubcategory]);

/// Two-level technical skill taxonomy: category -> subcategory -> terms.
pub const SKILL_TAXONOMY: &[SkillCategory] = &[
    (
        "programming_languages",
        &[
            ("python", &["python", "django", "flask", "fastapi", "pandas", "numpy"]),
            ("javascript", &["javascript", "js", "node.js", "nodejs", "typescript", "ts"]),
            ("java", &["java", "spring", "spring boot", "hibernate", "maven", "gradle"]),
            ("csharp", &["c#", "csharp", ".net", "dotnet", "asp.net", "entity framework"]),
            ("cpp", &["c++", "cpp", "c plus plus"]),
            ("go", &["golang", "go lang", "go programming"]),
            ("rust", &["rust", "rust lang"]),
            ("php", &["php", "laravel", "symfony", "codeigniter"]),
            ("ruby", &["ruby", "rails", "ruby on rails"]),
            ("swift", &["swift", "ios", "xcode"]),
            ("kotlin", &["kotlin", "android"]),
            ("scala", &["scala", "akka", "play framework"]),
            ("r", &["r programming", "r language", "rstudio"]),
        ],
    ),
    (
        "frameworks",
        &[
            ("react", &["react", "reactjs", "react.js", "redux", "next.js", "nextjs"]),
            ("angular", &["angular", "angularjs", "rxjs", "ngrx"]),
            ("vue", &["vue", "vuejs", "vue.js", "nuxt", "vuex"]),
            ("django", &["django", "django rest framework", "drf"]),
            ("flask", &["flask", "flask-restful"]),
            ("express", &["express", "expressjs", "express.js"]),
            ("spring", &["spring boot", "spring framework", "spring mvc"]),
            ("laravel", &["laravel", "eloquent"]),
            ("rails", &["ruby on rails", "rails"]),
        ],
    ),
    (
        "databases",
        &[
            ("sql", &["mysql", "postgresql", "postgres", "sql server", "oracle", "sqlite"]),
            ("nosql", &["mongodb", "cassandra", "dynamodb", "couchdb", "neo4j"]),
            ("cache", &["redis", "memcached", "elasticsearch"]),
        ],
    ),
    (
        "cloud_platforms",
        &[
            ("aws", &["aws", "amazon web services", "ec2", "s3", "lambda", "rds", "cloudformation"]),
            ("azure", &["azure", "microsoft azure", "azure functions", "cosmos db"]),
            ("gcp", &["google cloud", "gcp", "google cloud platform", "firebase", "bigquery"]),
            ("other_cloud", &["heroku", "digitalocean", "linode", "vultr"]),
        ],
    ),
    (
        "devops_tools",
        &[
            ("containers", &["docker", "kubernetes", "k8s", "containerd", "podman"]),
            ("cicd", &["jenkins", "gitlab ci", "github actions", "circleci", "travis ci"]),
            ("monitoring", &["prometheus", "grafana", "elk stack", "datadog", "new relic"]),
            ("iac", &["terraform", "ansible", "chef", "puppet", "cloudformation"]),
        ],
    ),
    (
        "data_science",
        &[
            ("ml_frameworks", &["tensorflow", "pytorch", "scikit-learn", "keras", "xgboost"]),
            ("data_tools", &["pandas", "numpy", "matplotlib", "seaborn", "jupyter"]),
            ("big_data", &["spark", "hadoop", "kafka", "airflow", "dask"]),
            ("visualization", &["tableau", "power bi", "plotly", "d3.js"]),
        ],
    ),
];

/// Experience bands and the patterns that signal them.
pub const EXPERIENCE_PATTERNS: &[(ExperienceBand, &str)] = &[
    (ExperienceBand::Entry, r"(entry.level|junior|0.2 years?|fresh|graduate|new grad)"),
    (ExperienceBand::Mid, r"(2.5 years?|3.7 years?|mid.level|intermediate)"),
    (ExperienceBand::Senior, r"(5.10 years?|senior|lead|principal|8\+ years?)"),
    (ExperienceBand::Expert, r"(10\+ years?|expert|architect|15\+ years?)"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceBand {
    Entry,
    Mid,
    Senior,
    Expert,
}

/// Year mentions above this are treated as noise (dates, counts).
pub const MAX_PLAUSIBLE_YEARS: u32 = 20;

pub const EDUCATION_KEYWORDS: &[(&str, &[&str])] = &[
    ("degree_required", &["bachelor", "master", "phd", "degree required", "bs", "ms", "mba"]),
    ("preferred_fields", &["computer science", "engineering", "mathematics", "statistics"]),
    ("certifications", &["aws certified", "google cloud", "microsoft certified", "cissp", "pmp"]),
];

/// Terms that count as a stated degree on the resume side.
pub const DEGREE_TERMS: &[&str] = &["bachelor", "master", "degree", "bs", "ms", "phd"];

pub const SOFT_SKILLS: &[&str] = &[
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "analytical",
    "creative",
    "adaptable",
    "collaborative",
    "detail oriented",
    "time management",
    "critical thinking",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyContext {
    Startup,
    Enterprise,
    RemoteFriendly,
    TechFocus,
}

/// Phrases in a job description that flag a company context.
pub const JOB_CONTEXT_INDICATORS: &[(CompanyContext, &[&str])] = &[
    (CompanyContext::Startup, &["startup", "fast-paced", "agile environment", "wear many hats"]),
    (
        CompanyContext::Enterprise,
        &["enterprise", "large scale", "fortune 500", "established company"],
    ),
    (
        CompanyContext::RemoteFriendly,
        &["remote", "work from home", "distributed team", "flexible"],
    ),
    (
        CompanyContext::TechFocus,
        &["cutting edge", "innovative", "latest technologies", "research"],
    ),
];

/// Phrases in a resume that show fit with a flagged company context.
pub const RESUME_CONTEXT_INDICATORS: &[(CompanyContext, &[&str])] = &[
    (CompanyContext::Startup, &["agile", "fast-paced", "startup", "mvp", "rapid"]),
    (CompanyContext::Enterprise, &["enterprise", "scale", "large team", "process"]),
    (CompanyContext::RemoteFriendly, &["remote", "distributed", "collaboration"]),
    (CompanyContext::TechFocus, &["innovation", "research", "cutting edge", "latest"]),
];

/// Substrings whose presence marks text as a structured resume at all.
pub const ESSENTIAL_INDICATORS: &[&str] = &["experience", "work", "skill", "education", "email", "@"];

/// Section name -> any-of keywords.
pub const REQUIRED_SECTIONS: &[(&str, &[&str])] = &[
    ("contact", &["email", "@", "phone", "linkedin"]),
    ("experience", &["experience", "work", "employment", "career"]),
    ("education", &["education", "degree", "university", "college"]),
    ("skills", &["skills", "technologies", "proficient", "expertise"]),
];

pub const ACTION_VERBS: &[&str] = &[
    "developed",
    "implemented",
    "designed",
    "created",
    "managed",
    "led",
    "optimized",
    "automated",
    "deployed",
    "architected",
    "built",
    "established",
    "improved",
    "delivered",
    "collaborated",
    "analyzed",
    "coordinated",
];

pub const PROFESSIONAL_TERMS: &[&str] = &[
    "leadership",
    "collaboration",
    "problem-solving",
    "communication",
    "teamwork",
    "innovation",
    "strategic",
    "analytical",
    "detail-oriented",
];

/// Bullet markers counted for readability.
pub const BULLET_MARKERS: &[&str] = &["•", "- ", "* "];

/// Weighted general technical keywords for the fallback ATS path.
pub const TECH_KEYWORD_WEIGHTS: &[(&str, f64)] = &[
    ("python", 1.0),
    ("javascript", 1.0),
    ("java", 1.0),
    ("c++", 1.0),
    ("sql", 1.0),
    ("react", 1.0),
    ("angular", 1.0),
    ("vue", 1.0),
    ("html", 0.5),
    ("css", 0.5),
    ("aws", 1.5),
    ("azure", 1.5),
    ("gcp", 1.5),
    ("docker", 1.0),
    ("kubernetes", 1.0),
    ("machine learning", 1.5),
    ("data science", 1.5),
    ("ai", 1.0),
    ("analytics", 1.0),
    ("mongodb", 1.0),
    ("postgresql", 1.0),
    ("mysql", 1.0),
    ("redis", 1.0),
    ("agile", 0.5),
    ("scrum", 0.5),
    ("api", 0.5),
    ("rest", 0.5),
];

pub const STANDARD_HEADERS: &[&str] =
    &["summary", "objective", "experience", "education", "skills", "projects"];

/// Every term in [`SKILL_TAXONOMY`], flattened in declaration order.
pub fn all_skill_terms() -> impl Iterator<Item = &'static str> {
    SKILL_TAXONOMY
        .iter()
        .flat_map(|(_, subcategories)| subcategories.iter())
        .flat_map(|(_, terms)| terms.iter().copied())
}

/// Whether `word` is listed anywhere in the skill taxonomy.
pub fn is_technical_term(word: &str) -> bool {
    all_skill_terms().any(|term| term == word)
}

/// `devops_tools` -> `Devops Tools`
pub fn title_case(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_role_categories() {
        assert_eq!(ROLE_CATEGORIES.len(), 10);
        assert!(ROLE_CATEGORIES.iter().all(|(role, _)| *role != RoleCategory::General));
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(RoleCategory::ProductManager.as_str(), "product_manager");
        assert_eq!(RoleCategory::ProductManager.spaced(), "product manager");
        assert_eq!(RoleCategory::DataScientist.title(), "Data Scientist");
        assert_eq!(RoleCategory::Qa.title(), "Qa");
        assert_eq!(RoleCategory::General.title(), "General");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("devops_tools"), "Devops Tools");
        assert_eq!(title_case("cloud_platforms"), "Cloud Platforms");
    }

    #[test]
    fn test_technical_terms() {
        assert!(is_technical_term("python"));
        assert!(is_technical_term("kubernetes"));
        assert!(!is_technical_term("teamwork"));
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(ACTION_VERBS.len(), 17);
        assert_eq!(PROFESSIONAL_TERMS.len(), 9);
        assert_eq!(STANDARD_HEADERS.len(), 6);
        assert_eq!(SOFT_SKILLS.len(), 11);
        assert_eq!(REQUIRED_SECTIONS.len(), 4);
    }
}
