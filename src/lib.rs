//! Resume evaluator library
//!
//! Scores resumes on content, structure and ATS compatibility, optionally
//! against a job description, and renders prioritized feedback.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeEvaluatorError};
pub use processing::quality::{analyze, Evaluation, QualityAnalysis, QualityAnalyzer};
