//! # Catalog Error Types
//!
//! Error types for loading the product catalog.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / ValidationError / CoreError                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds path and line number                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Console logs a warning and starts with an empty catalog               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Cannot read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has no product count line.
    #[error("Catalog is empty: the first line must hold the product count")]
    MissingHeader,

    /// The first line is not a product count.
    #[error("Invalid product count '{value}' on line 1")]
    InvalidCount { value: String },

    /// Fewer product lines than announced.
    #[error("Catalog announces {expected} products but holds only {found}")]
    Truncated { expected: usize, found: usize },

    /// A product line could not be parsed or validated.
    ///
    /// ## When This Occurs
    /// - Wrong number of `;`-separated fields
    /// - Malformed cost, margin or expiry date
    /// - Description too short or too long
    #[error("Line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },

    /// The kind field is neither 1 (non-perishable) nor 2 (perishable).
    #[error("Line {line}: unknown product kind '{kind}'")]
    UnknownKind { line: usize, kind: String },
}

impl CatalogError {
    /// Creates an InvalidLine error from any displayable cause.
    pub fn invalid_line(line: usize, reason: impl ToString) -> Self {
        CatalogError::InvalidLine {
            line,
            reason: reason.to_string(),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::Truncated {
            expected: 5,
            found: 3,
        };
        assert_eq!(err.to_string(), "Catalog announces 5 products but holds only 3");

        let err = CatalogError::invalid_line(4, "cost must be positive");
        assert_eq!(err.to_string(), "Line 4: cost must be positive");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = CatalogError::Io {
            path: PathBuf::from("products.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Cannot read catalog products.txt: missing");
    }
}
