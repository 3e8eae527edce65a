use thiserror::Error;

/// Failures that abort an import before any row is processed.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("read header: the payload is empty")]
    MissingHeader,

    #[error("read header: {0}")]
    Header(#[from] csv::Error),

    #[error("Failed to read import file: {0}")]
    Io(#[from] std::io::Error),
}
