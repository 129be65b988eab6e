//! Turns an uploaded PDF byte stream into plain text.
//!
//! Every parser failure (corrupt file, wrong format, parser panic) is folded into
//! `NoTextError`; callers never see a raw `pdf-extract` error.

use std::panic;

use thiserror::Error;
use tracing::{debug, warn};

/// Corrective message shown to the user whenever no text could be read.
pub const NO_TEXT_MESSAGE: &str =
    "Could not extract text. Ensure your PDF isn't scanned or image-based.";

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum NoTextError {
    /// The PDF parsed, but no page produced selectable text (scanned/image-only).
    #[error("PDF contains no extractable text")]
    Empty,

    #[error("PDF could not be parsed: {0}")]
    Unreadable(String),
}

impl NoTextError {
    pub fn user_message(&self) -> &'static str {
        NO_TEXT_MESSAGE
    }
}

/// Plain text pulled out of a PDF. Never empty, always trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedText {
    text: String,
    page_count: usize,
}

impl ExtractedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

/// Extracts text page by page, joining pages with a newline.
pub fn extract_text(raw: &[u8]) -> Result<ExtractedText, NoTextError> {
    let pages = match panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(raw)) {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            warn!("PDF parse failed ({} bytes): {e}", raw.len());
            return Err(NoTextError::Unreadable(e.to_string()));
        }
        Err(_) => {
            warn!("PDF parser panicked on {} byte upload", raw.len());
            return Err(NoTextError::Unreadable("parser panicked".to_string()));
        }
    };

    let page_count = pages.len();
    match join_pages(pages.iter().map(String::as_str)) {
        Some(text) => {
            debug!("Extracted {} chars from {page_count} pages", text.chars().count());
            Ok(ExtractedText { text, page_count })
        }
        None => {
            warn!("PDF with {page_count} pages yielded no text (likely scanned)");
            Err(NoTextError::Empty)
        }
    }
}

/// Returns true if the upload declares itself a PDF or starts with the PDF header.
pub fn looks_like_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf") || head.starts_with(PDF_MAGIC)
}

/// Joins non-blank pages with `\n` and trims. `None` when nothing readable remains.
fn join_pages<'a>(pages: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = pages
        .map(clean_page)
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = joined.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// NUL and BOM show up in text from some PDF producers
fn clean_page(page: &str) -> String {
    page.replace(['\u{0}', '\u{FEFF}'], "")
}
