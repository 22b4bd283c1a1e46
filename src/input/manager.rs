//! Input manager for handling different file types

use crate::error::{Result, ResumeEvaluatorError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor, WordExtractor,
};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract text, failing on any problem. Used for job descriptions.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        let file_type = self.validate(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Word => {
                info!("Extracting text from Word document: {}", path.display());
                WordExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeEvaluatorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract resume text. A file that exists with a known type but cannot be
    /// decoded yields empty text, which the analyzer reports as unreadable.
    pub async fn extract_resume_text(&mut self, path: &Path) -> Result<String> {
        let file_type = self.validate(path)?;

        match self.extract_text(path).await {
            Ok(text) => Ok(text),
            Err(e) if file_type.is_document() && e.is_extraction_failure() => {
                warn!("Could not extract text from '{}': {}", path.display(), e);
                Ok(String::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Check existence and extension, returning the detected type.
    pub fn validate(&self, path: &Path) -> Result<FileType> {
        if !path.exists() {
            return Err(ResumeEvaluatorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        match self.detect_file_type(path)? {
            FileType::Unknown => Err(ResumeEvaluatorError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            ))),
            file_type => Ok(file_type),
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            ResumeEvaluatorError::InvalidInput(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Whether `path` carries one of the `allowed` extensions (case-insensitive).
pub fn has_allowed_extension(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_corrupt_pdf_becomes_empty_resume_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.extract_resume_text(&path).await.unwrap(), "");
        assert!(manager.extract_text(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_word_resume_becomes_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        std::fs::write(&path, b"PK\x03\x04").unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.extract_resume_text(&path).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_missing_and_unknown_files_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = InputManager::new();

        let missing = dir.path().join("missing.txt");
        assert!(matches!(
            manager.extract_resume_text(&missing).await,
            Err(ResumeEvaluatorError::InvalidInput(_))
        ));

        let unknown = dir.path().join("resume.xyz");
        std::fs::write(&unknown, "text").unwrap();
        assert!(matches!(
            manager.extract_resume_text(&unknown).await,
            Err(ResumeEvaluatorError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn test_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "Rust engineer").unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Rust engineer");
        assert_eq!(manager.cache_size(), 1);

        let mut uncached = InputManager::new().with_cache(false);
        uncached.extract_text(&path).await.unwrap();
        assert_eq!(uncached.cache_size(), 0);

        manager.clear_cache();
        assert_eq!(manager.cache_size(), 0);
    }

    #[test]
    fn test_allowed_extensions() {
        let allowed = vec!["pdf".to_string(), "txt".to_string()];
        assert!(has_allowed_extension(Path::new("cv.PDF"), &allowed));
        assert!(!has_allowed_extension(Path::new("cv.md"), &allowed));
        assert!(!has_allowed_extension(Path::new("cv"), &allowed));
    }
}
