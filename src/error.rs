//! Error handling for the resume evaluator
//!
//! The scoring engine itself never fails; these errors belong to the
//! layers around it (file input, configuration, report output).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeEvaluatorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Word document extraction error: {0}")]
    DocumentExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeEvaluatorError {
    /// Extraction problems the caller should fold into an empty-text analysis
    /// instead of aborting.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            ResumeEvaluatorError::PdfExtraction(_)
                | ResumeEvaluatorError::DocumentExtraction(_)
                | ResumeEvaluatorError::UnsupportedFormat(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ResumeEvaluatorError>;
