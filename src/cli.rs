//! CLI interface for the resume evaluator

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;
use crate::input::manager::has_allowed_extension;

#[derive(Parser)]
#[command(name = "resume-evaluator")]
#[command(about = "Resume quality, ATS compatibility and job-match scoring")]
#[command(long_about = "Score resumes on content, structure and ATS compatibility, optionally against a job description, with prioritized feedback")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume, optionally against a job description
    Analyze {
        /// Path to resume file (PDF, DOC, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file; without a path, a name is derived from the resume
        #[arg(short, long)]
        save: Option<Option<PathBuf>>,
    },

    /// Extract the requirement profile from a job description
    Requirements {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,
    },

    /// Score a resume against a job description
    Match {
        /// Path to resume file
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file
        #[arg(short, long)]
        job: PathBuf,
    },

    /// Quick 0-10 resume score
    QuickScore {
        /// Path to resume file
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Placement readiness from assessment scores (0-10 scale)
    Readiness {
        #[arg(long)]
        aptitude: String,

        #[arg(long)]
        technical: String,

        #[arg(long)]
        communication: String,

        #[arg(long)]
        resume: String,

        #[arg(long, default_value = "")]
        cgpa: String,

        #[arg(long, default_value = "")]
        backlogs: String,

        #[arg(long, default_value = "")]
        projects: String,

        #[arg(long, default_value = "")]
        certifications: String,

        /// Branch of study (CSE, AI&DS, ECE, MECH, CIVIL, ISE)
        #[arg(long, default_value = "CSE")]
        branch: String,

        #[arg(long, default_value = "")]
        internships: String,

        #[arg(long, default_value = "")]
        hackathons: String,

        /// Print readiness and recommendations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "output.format")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(format)
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[String]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(_) if has_allowed_extension(path, allowed_extensions) => Ok(()),
        Some(ext) => Err(format!(
            "Unsupported file extension: .{}. Allowed: {}",
            ext,
            allowed_extensions.join(", ")
        )),
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::try_parse_from([
            "resume-evaluator",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job-text",
            "Rust engineer",
            "--output",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { resume, job, job_text, output, .. } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Rust engineer"));
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_job_file_and_text_conflict() {
        let result = Cli::try_parse_from([
            "resume-evaluator",
            "analyze",
            "--resume",
            "cv.pdf",
            "--job",
            "jd.txt",
            "--job-text",
            "Rust",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_readiness_accepts_raw_strings() {
        let cli = Cli::try_parse_from([
            "resume-evaluator",
            "readiness",
            "--aptitude",
            "7.5",
            "--technical",
            "abc",
            "--communication",
            "",
            "--resume",
            "8",
        ])
        .unwrap();
        match cli.command {
            Commands::Readiness {
                technical,
                cgpa,
                branch,
                internships,
                json,
                ..
            } => {
                assert_eq!(technical, "abc");
                assert_eq!(cgpa, "");
                assert_eq!(branch, "CSE");
                assert_eq!(internships, "");
                assert!(!json);
            }
            _ => panic!("expected readiness"),
        }
    }

    #[test]
    fn test_save_path_is_optional() {
        let parse = |args: &[&str]| {
            let mut argv = vec!["resume-evaluator", "analyze", "--resume", "cv.pdf"];
            argv.extend_from_slice(args);
            match Cli::try_parse_from(argv).unwrap().command {
                Commands::Analyze { save, .. } => save,
                _ => panic!("expected analyze"),
            }
        };
        assert_eq!(parse(&[]), None);
        assert_eq!(parse(&["--save"]), Some(None));
        assert_eq!(parse(&["--save", "out.json"]), Some(Some(PathBuf::from("out.json"))));
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = vec!["pdf".to_string(), "txt".to_string()];
        assert!(validate_file_extension(Path::new("cv.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.xyz"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }
}
