use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("PDF support is required to read {}; rebuild with the `pdf` feature", path.display())]
    MissingDependency { path: PathBuf },
    #[error("{} is not valid UTF-8 text", path.display())]
    Decode { path: PathBuf },
    #[error("failed to read PDF: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
