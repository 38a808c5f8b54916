//! Text extraction from in-memory documents

use crate::error::{Result, ResumeScorerError};
use crate::input::file_detector::DocumentFormat;
use log::debug;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));
static DOCX_BREAK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:(?:br|cr)\b[^>]*/>|</w:p>").expect("Invalid docx break regex"));
static DOCX_TAB_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:tab\b[^>]*/>").expect("Invalid docx tab regex"));
static NUMERIC_ENTITY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").expect("Invalid entity regex"));

/// Path of the main body part inside a WordprocessingML package
const DOCX_BODY_PART: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Extract text from `bytes` according to `mime_type` (`None` = plain text).
///
/// Extraction is all-or-nothing: either the whole document decodes or an
/// error is returned. Nothing touches the file system.
pub fn extract(bytes: &[u8], mime_type: Option<&str>) -> Result<String> {
    let format = DocumentFormat::from_mime(mime_type)?;
    extract_format(bytes, format)
}

pub fn extract_format(bytes: &[u8], format: DocumentFormat) -> Result<String> {
    debug!("Extracting {} bytes as {:?}", bytes.len(), format);
    match format {
        DocumentFormat::Pdf => PdfExtractor.extract(bytes),
        DocumentFormat::Docx => DocxExtractor.extract(bytes),
        DocumentFormat::PlainText => PlainTextExtractor.extract(bytes),
        DocumentFormat::Markdown => MarkdownExtractor.extract(bytes),
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // The PDF backend panics on some malformed streams
        let outcome = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes));

        match outcome {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(ResumeScorerError::ExtractionFailed(format!(
                "Failed to extract text from PDF: {}",
                e
            ))),
            Err(_) => Err(ResumeScorerError::ExtractionFailed(
                "PDF decoder aborted on malformed input".to_string(),
            )),
        }
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            ResumeScorerError::ExtractionFailed(format!("Not a readable DOCX package: {}", e))
        })?;

        let mut part = archive.by_name(DOCX_BODY_PART).map_err(|e| {
            ResumeScorerError::ExtractionFailed(format!("DOCX package has no {}: {}", DOCX_BODY_PART, e))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            ResumeScorerError::ExtractionFailed(format!("Failed to read DOCX body: {}", e))
        })?;

        Ok(self.xml_to_text(&xml))
    }
}

impl DocxExtractor {
    fn xml_to_text(&self, xml: &str) -> String {
        let text = DOCX_BREAK_REGEX.replace_all(xml, "\n");
        let text = DOCX_TAB_REGEX.replace_all(&text, "\t");
        let text = TAG_REGEX.replace_all(&text, "");
        let text = decode_entities(&text);

        text.lines()
            .map(|line| line.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            ResumeScorerError::ExtractionFailed(format!("Plain text is not valid UTF-8: {}", e))
        })?;
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let markdown_content = PlainTextExtractor.extract(bytes)?;

        let parser = Parser::new(&markdown_content);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        Ok(self.html_to_text(&html_output))
    }
}

impl MarkdownExtractor {
    fn html_to_text(&self, html: &str) -> String {
        // List items keep a bullet so the quality checks can still see them
        let text = html
            .replace("<br>", "\n")
            .replace("<br />", "\n")
            .replace("<li>", "\n• ")
            .replace("</p>", "\n\n")
            .replace("&nbsp;", " ");

        let clean_text = TAG_REGEX.replace_all(&text, "");
        let clean_text = decode_entities(&clean_text);

        let lines: Vec<String> = clean_text
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        lines.join("\n")
    }
}

/// Decode the XML/HTML entities that survive tag stripping.
fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'");

    let numeric = NUMERIC_ENTITY_REGEX.replace_all(&named, |caps: &regex::Captures| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(|c| c.to_string())
            .unwrap_or_default()
    });

    // Ampersand last so "&amp;lt;" stays literal
    numeric.replace("&amp;", "&")
}
