use std::{fmt, path::Path};

use crate::error::AppError;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
    Word,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match normalize_extension(ext).as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Word),
            _ => None,
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "text/plain" => Some(Self::Text),
            "application/pdf" => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Word),
            _ => None,
        }
    }

    /// Resolves the kind from the filename suffix. The declared content type
    /// is only consulted when the filename carries no suffix at all.
    pub fn resolve(filename: &str, content_type: Option<&str>) -> Result<Self, AppError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str());

        let kind = match extension {
            Some(ext) => Self::from_extension(ext),
            None => content_type.and_then(Self::from_content_type),
        };
        kind.ok_or_else(|| AppError::UnsupportedFormat(filename.to_string()))
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::Text => "txt",
            DocumentKind::Pdf => "pdf",
            DocumentKind::Word => "docx",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn normalize_extension(ext: &str) -> String {
    if let Some(stripped) = ext.strip_prefix('.') {
        stripped.to_ascii_lowercase()
    } else {
        ext.to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_supported_suffixes_case_insensitively() -> anyhow::Result<()> {
        assert_eq!(DocumentKind::resolve("notes.txt", None)?, DocumentKind::Text);
        assert_eq!(DocumentKind::resolve("Report.PDF", None)?, DocumentKind::Pdf);
        assert_eq!(DocumentKind::resolve("memo.Docx", None)?, DocumentKind::Word);
        Ok(())
    }

    #[test]
    fn rejects_unknown_suffix_even_with_supported_content_type() {
        let result = DocumentKind::resolve("setup.exe", Some("text/plain"));
        assert!(matches!(result, Err(AppError::UnsupportedFormat(name)) if name == "setup.exe"));
    }

    #[test]
    fn falls_back_to_content_type_without_suffix() -> anyhow::Result<()> {
        assert_eq!(
            DocumentKind::resolve("README", Some("text/plain; charset=utf-8"))?,
            DocumentKind::Text
        );
        assert_eq!(
            DocumentKind::resolve("contract", Some(DOCX_MIME))?,
            DocumentKind::Word
        );
        assert!(DocumentKind::resolve("blob", Some("application/octet-stream")).is_err());
        assert!(DocumentKind::resolve("blob", None).is_err());
        Ok(())
    }

    #[test]
    fn extensions_resolve_with_or_without_dot() {
        for ext in [".txt", "pdf", ".DOCX"] {
            assert!(DocumentKind::from_extension(ext).is_some(), "{ext}");
        }
        assert_eq!(DocumentKind::from_extension("exe"), None);
        assert_eq!(normalize_extension(".TXT"), "txt");
    }
}
