use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::RosterError;

/// Page-level text extraction for PDF inputs.
///
/// Implementors return one string per page, in page order. The extractor
/// glues them together; it never looks inside the PDF itself.
pub trait PdfBackend {
    fn page_texts(&self, path: &Path) -> Result<Vec<String>, RosterError>;
}

/// Turns an input file into the raw roster text.
pub struct TextExtractor {
    pdf: Option<Box<dyn PdfBackend>>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        #[cfg(feature = "pdf")]
        let pdf: Option<Box<dyn PdfBackend>> = Some(Box::new(crate::pdftext::PdfCrateBackend));
        #[cfg(not(feature = "pdf"))]
        let pdf: Option<Box<dyn PdfBackend>> = None;

        Self { pdf }
    }
}

impl TextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pdf_backend(backend: Box<dyn PdfBackend>) -> Self {
        Self { pdf: Some(backend) }
    }

    /// An extractor that can only read text files.
    pub fn without_pdf() -> Self {
        Self { pdf: None }
    }

    pub fn extract(&self, path: &Path) -> Result<String, RosterError> {
        if !path.exists() {
            return Err(RosterError::NotFound {
                path: path.to_path_buf(),
            });
        }

        if is_pdf(path) {
            let backend = self
                .pdf
                .as_ref()
                .ok_or_else(|| RosterError::MissingDependency {
                    path: path.to_path_buf(),
                })?;

            let pages = backend.page_texts(path)?;
            debug!(pages = pages.len(), path = %path.display(), "extracted PDF text");
            return Ok(pages.concat());
        }

        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes).map_err(|_| RosterError::Decode {
            path: path.to_path_buf(),
        })?;
        debug!(bytes = text.len(), path = %path.display(), "read text file");
        Ok(text)
    }
}

/// Extract with the default configuration.
pub fn extract(path: &Path) -> Result<String, RosterError> {
    TextExtractor::default().extract(path)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
