use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use thiserror::Error;

use super::kind::DocumentKind;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("failed to read PDF: {0}")]
    Pdf(String),

    #[error("failed to read Word document: {0}")]
    Word(String),

    #[error("document contains no text")]
    Empty,

    #[error("extraction task aborted: {0}")]
    Panicked(String),
}

/// Turns raw upload bytes into plain text.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError>;
}

/// Extractor backed by `lopdf` for PDFs and `docx-rs` for Word documents.
/// Both parse from memory, so no temporary files are involved.
#[derive(Debug, Default, Clone)]
pub struct FormatExtractor;

impl FormatExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentExtractor for FormatExtractor {
    fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractError> {
        match kind {
            DocumentKind::Text => Ok(String::from_utf8(bytes.to_vec())?),
            DocumentKind::Pdf => extract_pdf(bytes),
            DocumentKind::Word => extract_word(bytes),
        }
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let document =
        lopdf::Document::load_mem(bytes).map_err(|err| ExtractError::Pdf(err.to_string()))?;

    let pages = document.get_pages();
    let mut segments = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        let text = document
            .extract_text(&[*page_number])
            .map_err(|err| ExtractError::Pdf(format!("page {page_number}: {err}")))?;
        segments.push(text.trim_end_matches(['\r', '\n']).to_string());
    }

    Ok(segments.join("\n"))
}

fn extract_word(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|err| ExtractError::Word(err.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => {
                let mut text = String::new();
                collect_run_text(&paragraph.children, &mut text);
                Some(text)
            }
            // top-level paragraphs only; tables are skipped
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn collect_run_text(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    if let RunChild::Text(text) = run_child {
                        out.push_str(&text.text);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => collect_run_text(&link.children, out),
            _ => {}
        }
    }
}
