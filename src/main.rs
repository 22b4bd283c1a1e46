//! Resume evaluator: resume quality, ATS and job-match scoring from the command line

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info};
use std::path::Path;
use std::process;
use std::time::Instant;

use resume_evaluator::cli::{self, Cli, Commands, ConfigAction};
use resume_evaluator::config::Config;
use resume_evaluator::input::InputManager;
use resume_evaluator::output::{save_report_to_file, suggest_filename, ReportGenerator, ResumeReport};
use resume_evaluator::processing::ats_matcher::ATSMatcher;
use resume_evaluator::processing::quality::QualityAnalyzer;
use resume_evaluator::processing::quick_score::{quick_score, QUICK_SCORE_MAX};
use resume_evaluator::processing::readiness::RawReadiness;
use resume_evaluator::processing::recommendations::{personalized_recommendations, ProfileInput};
use resume_evaluator::processing::requirements::JobRequirementExtractor;
use resume_evaluator::ResumeEvaluatorError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            detailed,
            save,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeEvaluatorError::InvalidInput)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;

            cli::validate_file_extension(&resume, &config.input.resume_extensions)
                .map_err(|e| ResumeEvaluatorError::InvalidInput(format!("Resume file: {}", e)))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, &config.input.job_extensions)
                    .map_err(|e| ResumeEvaluatorError::InvalidInput(format!("Job description file: {}", e)))?;
            }

            info!("Analyzing resume: {}", resume.display());
            let started = Instant::now();
            let mut input_manager = InputManager::new().with_cache(config.input.enable_cache);

            let resume_text = input_manager
                .extract_resume_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;

            let (job_description, job_source) = match (job, job_text) {
                (Some(path), _) => {
                    let text = input_manager
                        .extract_text(&path)
                        .await
                        .with_context(|| format!("Failed to read job description {}", path.display()))?;
                    (Some(text), Some(path.display().to_string()))
                }
                (None, Some(text)) => (Some(text), Some("inline".to_string())),
                (None, None) => (None, None),
            };

            let filename = file_name(&resume);
            let evaluation = QualityAnalyzer::new().evaluate(&resume_text, &filename, job_description.as_deref());
            let elapsed_ms = started.elapsed().as_millis() as u64;
            debug!("Evaluation finished in {}ms", elapsed_ms);

            let report = ResumeReport::new(
                evaluation,
                &resume_text,
                config.analysis.preview_chars,
                filename,
                job_source,
                elapsed_ms,
            );

            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
            let rendered = generator.generate_report(&report, &output_format)?;
            println!("{}", rendered);

            if let Some(save_path) = save {
                let save_path = save_path
                    .unwrap_or_else(|| suggest_filename(&output_format, &report.metadata.resume_file, true).into());
                // Saved reports never carry terminal escape codes.
                let plain = ReportGenerator::with_options(false, detailed, true, true)
                    .generate_report(&report, &output_format)?;
                save_report_to_file(&plain, &save_path)
                    .with_context(|| format!("Failed to save report to {}", save_path.display()))?;
                println!("💾 Report saved to {}", save_path.display());
            }
        }

        Commands::Requirements { job } => {
            let mut input_manager = InputManager::new();
            let text = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("Failed to read job description {}", job.display()))?;

            let profile = JobRequirementExtractor::new().extract(&text).ok_or_else(|| {
                ResumeEvaluatorError::InvalidInput(format!("Job description is empty: {}", job.display()))
            })?;
            info!("Detected role category: {}", profile.role_category);
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }

        Commands::Match { resume, job } => {
            let mut input_manager = InputManager::new();
            let resume_text = input_manager
                .extract_resume_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;
            let job_text = input_manager
                .extract_text(&job)
                .await
                .with_context(|| format!("Failed to read job description {}", job.display()))?;

            let profile = JobRequirementExtractor::new().extract(&job_text).ok_or_else(|| {
                ResumeEvaluatorError::InvalidInput(format!("Job description is empty: {}", job.display()))
            })?;
            let result = ATSMatcher::new().calculate_job_match(&resume_text, &profile);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::QuickScore { resume } => {
            let mut input_manager = InputManager::new();
            let text = input_manager
                .extract_resume_text(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;

            let score = quick_score(&text, &file_name(&resume));
            println!("⭐ Quick score: {:.1}/{:.0}", score, QUICK_SCORE_MAX);
        }

        Commands::Readiness {
            aptitude,
            technical,
            communication,
            resume,
            cgpa,
            backlogs,
            projects,
            certifications,
            branch,
            internships,
            hackathons,
            json,
        } => {
            let raw = RawReadiness {
                aptitude: &aptitude,
                technical: &technical,
                communication: &communication,
                resume: &resume,
                cgpa: &cgpa,
                backlogs: &backlogs,
                projects: &projects,
                certifications: &certifications,
            };
            let profile = ProfileInput::from_raw(raw, &branch, &internships, &hackathons);
            debug!("Coerced readiness input: {:?}", profile);

            let report = profile.readiness.report();
            let recommendations = personalized_recommendations(&profile);

            if json {
                let value = serde_json::json!({
                    "readiness": report,
                    "recommendations": recommendations,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("🎯 Placement readiness: {:.1}%", report.readiness_score);
            for line in &report.feedback {
                println!("  • {}", line);
            }
            print_section("💪 Strengths", &recommendations.strengths);
            print_section("📈 Areas to improve", &recommendations.improvements);
            print_section("📝 Action items", &recommendations.action_items);
            print_section("🏢 Companies to target", &recommendations.company_recommendations);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
                println!("{}", rendered);
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::reset(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}

fn print_section(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}:", title);
    for item in items {
        println!("  • {}", item);
    }
}

/// Bare file name used for extension checks and report metadata.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
