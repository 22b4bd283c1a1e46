//! Text extraction from various file formats

use crate::error::{Result, ResumeEvaluatorError};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

/// Main body part of a WordprocessingML package.
const DOCX_BODY_PART: &str = "word/document.xml";

static HTML_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeEvaluatorError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text)
    }
}

/// Word documents (.docx). Legacy binary .doc files are not zip packages
/// and fail with `DocumentExtraction`.
pub struct WordExtractor;

impl TextExtractor for WordExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        docx_to_text(&bytes)
    }
}

/// Text of a .docx package: one line per paragraph, tabs and breaks kept.
pub fn docx_to_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ResumeEvaluatorError::DocumentExtraction(format!("not a docx package: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| ResumeEvaluatorError::DocumentExtraction(format!("missing {}: {}", DOCX_BODY_PART, e)))?
        .read_to_string(&mut xml)?;

    document_xml_to_text(&xml)
}

/// Collect `w:t` runs from WordprocessingML.
pub fn document_xml_to_text(xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_run_text => {
                let run = e
                    .unescape()
                    .map_err(|e| ResumeEvaluatorError::DocumentExtraction(format!("bad text run: {}", e)))?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ResumeEvaluatorError::DocumentExtraction(format!(
                    "malformed document.xml at byte {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
            _ => {}
        }
    }

    Ok(text.trim_end().to_string())
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        // binary noise is still text to the engine
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render Markdown to HTML, then strip it back to plain lines.
///
/// List items keep a "• " marker so bullet density survives the conversion.
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_to_text(&html_output)
}

fn html_to_text(html: &str) -> String {
    let text = html
        .replace("<li>", "• ")
        .replace("<br>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "\n\n")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let clean_text = HTML_TAG_REGEX.replace_all(&text, "");

    let lines: Vec<String> = clean_text
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}
