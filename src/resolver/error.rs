//! Resolver failure taxonomy
//!
//! Every failure ends up as exactly one of two outcomes: the asset is not
//! there (404) or something else went wrong (500).

use super::source::SourceError;
use thiserror::Error;

/// Outcome of a failed resolution, carried into the error response body
#[derive(Debug, Error)]
pub enum ResolveError {
    /// File does not exist under the static root, or the path escapes it
    #[error("File not found: {file_name}")]
    NotFound { file_name: String },

    /// Any other failure (permissions, I/O, reading a directory)
    #[error("Failed to read file {file_name}: {source}")]
    Unexpected {
        file_name: String,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    /// Attach the requested file name to a source failure
    pub fn from_source(file_name: &str, err: SourceError) -> Self {
        match err {
            SourceError::NotFound => Self::NotFound {
                file_name: file_name.to_string(),
            },
            SourceError::Other(source) => Self::Unexpected {
                file_name: file_name.to_string(),
                source,
            },
        }
    }

    /// HTTP status code reported for this failure
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Unexpected { .. } => 500,
        }
    }
}
