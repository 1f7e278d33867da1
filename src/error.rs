//! Error types for sectioning-content rendering.

use thiserror::Error;

/// Errors that can occur while rendering sectioning content.
#[derive(Error, Debug)]
pub enum Error {
    #[error("sectioning content exceeded depth of h6 (including page title as h1): level = {level}")]
    DepthExceeded { level: u8 },

    #[error("table of contents rendering failed: {0}")]
    TocRender(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
