//! # Error Types
//!
//! Domain-specific error types for trinket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trinket-core errors (this file)                                       │
//! │  ├── QueueError       - Order queue failures                           │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  trinket-catalog errors (separate crate)                               │
//! │  └── CatalogError     - Catalog file problems                          │
//! │                                                                         │
//! │  Flow: QueueError / ValidationError → CoreError → console message      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (counts, codes, etc.)
//! 3. Errors are enum variants, never String
//! 4. The queue never logs or swallows its errors; callers decide

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Queue Error
// =============================================================================

/// Errors raised by [`Queue`](crate::queue::Queue) operations.
///
/// Both variants are recoverable: callers are expected to check
/// `is_empty()` first or to turn the error into a user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `dequeue` or `peek_front` on an empty queue.
    #[error("the queue is empty")]
    Empty,

    /// A bounded operation asked for a longer prefix than the queue holds.
    ///
    /// ## User Workflow
    /// ```text
    /// "Average of the first 5 orders"
    ///      │
    ///      ▼
    /// queue holds 3 orders
    ///      │
    ///      ▼
    /// InsufficientElements { requested: 5, actual: 3 }
    ///      │
    ///      ▼
    /// UI shows: "the queue does not hold 5 elements, only 3"
    /// ```
    #[error("the queue does not hold {requested} elements, only {actual}")]
    InsufficientElements { requested: usize, actual: usize },
}

// =============================================================================
// Core Error
// =============================================================================

/// Core domain logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The order already holds the maximum number of products.
    #[error("Order {number} cannot have more than {max} products")]
    OrderFull { number: u32, max: usize },

    /// A perishable product past its expiry date cannot be sold.
    #[error("Product {description} expired on {expired_on}")]
    ProductExpired {
        description: String,
        expired_on: NaiveDate,
    },

    /// Unknown payment terms code.
    #[error("Invalid payment terms code: {0} (use 1 for upfront, 2 for installments)")]
    InvalidPaymentTerms(u32),

    /// Order queue error (wraps QueueError).
    #[error(transparent)]
    Queue(#[from] QueueError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before domain logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed amount, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with QueueError.
pub type QueueResult<T> = Result<T, QueueError>;

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_error_messages() {
        assert_eq!(QueueError::Empty.to_string(), "the queue is empty");

        let err = QueueError::InsufficientElements {
            requested: 5,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "the queue does not hold 5 elements, only 3"
        );
    }

    #[test]
    fn test_error_messages() {
        let err = CoreError::OrderFull { number: 7, max: 10 };
        assert_eq!(err.to_string(), "Order 7 cannot have more than 10 products");

        let err = CoreError::ProductExpired {
            description: "Milk".to_string(),
            expired_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        };
        assert_eq!(err.to_string(), "Product Milk expired on 2024-03-01");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "description".to_string(),
        };
        assert_eq!(err.to_string(), "description is required");

        let err = ValidationError::TooShort {
            field: "description".to_string(),
            min: 3,
        };
        assert_eq!(err.to_string(), "description must be at least 3 characters");
    }

    #[test]
    fn test_queue_error_is_transparent_in_core_error() {
        let core_err: CoreError = QueueError::Empty.into();
        assert!(matches!(core_err, CoreError::Queue(QueueError::Empty)));
        assert_eq!(core_err.to_string(), "the queue is empty");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "description".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
