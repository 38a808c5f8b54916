//! Document format detection

use crate::error::{Result, ResumeScorerError};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
    Markdown,
}

impl DocumentFormat {
    /// Resolve a MIME type. `None` means already-decoded plain text.
    pub fn from_mime(mime_type: Option<&str>) -> Result<Self> {
        let Some(mime) = mime_type else {
            return Ok(DocumentFormat::PlainText);
        };

        // Drop parameters such as "; charset=utf-8"
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();

        match essence.as_str() {
            MIME_PDF => Ok(DocumentFormat::Pdf),
            MIME_DOCX => Ok(DocumentFormat::Docx),
            MIME_TEXT | "" => Ok(DocumentFormat::PlainText),
            MIME_MARKDOWN | "text/x-markdown" => Ok(DocumentFormat::Markdown),
            _ => Err(ResumeScorerError::UnsupportedFormat(mime.to_string())),
        }
    }

    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" | "text" => Ok(DocumentFormat::PlainText),
            "md" | "markdown" => Ok(DocumentFormat::Markdown),
            other => Err(ResumeScorerError::UnsupportedFormat(format!(".{}", other))),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => MIME_PDF,
            DocumentFormat::Docx => MIME_DOCX,
            DocumentFormat::PlainText => MIME_TEXT,
            DocumentFormat::Markdown => MIME_MARKDOWN,
        }
    }
}
