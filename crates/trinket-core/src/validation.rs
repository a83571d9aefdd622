//! # Validation Module
//!
//! Input validation utilities for Trinket Shop.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console / catalog file                                       │
//! │  ├── Parsing (numbers, amounts, dates)                                 │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Business rule validation                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Domain operations (Order, Queue)                             │
//! │  └── Capacity, expiry, prefix length                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use trinket_core::validation::{validate_description, validate_prefix_count};
//!
//! validate_description("Adhesive tape").unwrap();
//! assert_eq!(validate_prefix_count(3).unwrap(), 3);
//! assert!(validate_prefix_count(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Rate;
use crate::{
    MAX_COST_CENTS, MAX_DESCRIPTION_LEN, MAX_MARGIN_BPS, MAX_ORDER_ITEMS, MIN_DESCRIPTION_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product description.
///
/// ## Rules
/// - Must not be empty
/// - Between [`MIN_DESCRIPTION_LEN`] and [`MAX_DESCRIPTION_LEN`] characters
///   after trimming
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();
    let len = description.chars().count();

    if len == 0 {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if len < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::TooShort {
            field: "description".to_string(),
            min: MIN_DESCRIPTION_LEN,
        });
    }

    if len > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Must not be empty
/// - Maximum [`MAX_DESCRIPTION_LEN`] characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.is_empty() {
        return Err(ValidationError::Required {
            field: "query".to_string(),
        });
    }

    if query.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product cost. Free products are not sold.
///
/// ## Rules
/// - Positive
/// - At most [`MAX_COST_CENTS`], so prices and order totals stay far from
///   `i64` limits
pub fn validate_cost(cost: Money) -> ValidationResult<()> {
    if !cost.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "cost".to_string(),
        });
    }

    if cost.cents() > MAX_COST_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "cost in cents".to_string(),
            min: 1,
            max: MAX_COST_CENTS,
        });
    }

    Ok(())
}

/// Validates a profit margin. Every product carries some margin, up to
/// [`MAX_MARGIN_BPS`].
pub fn validate_margin(margin: Rate) -> ValidationResult<()> {
    if margin.is_zero() {
        return Err(ValidationError::MustBePositive {
            field: "margin".to_string(),
        });
    }

    if margin.bps() > MAX_MARGIN_BPS {
        return Err(ValidationError::OutOfRange {
            field: "margin in basis points".to_string(),
            min: 1,
            max: i64::from(MAX_MARGIN_BPS),
        });
    }

    Ok(())
}

/// Validates how many queued orders a report should look at.
///
/// ## User Workflow
/// ```text
/// "How many of the first orders?"  ──►  user types -2
///      │
///      ▼
/// validate_prefix_count(-2) ← THIS FUNCTION
///      │
///      ├── n <= 0? → Error: "order count must be positive"
///      │
///      └── OK → usize handed to Queue::filter_prefix / average_of
/// ```
pub fn validate_prefix_count(count: i64) -> ValidationResult<usize> {
    if count <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "order count".to_string(),
        });
    }

    usize::try_from(count).map_err(|_| ValidationError::OutOfRange {
        field: "order count".to_string(),
        min: 1,
        max: i64::MAX,
    })
}

/// Validates the number of products requested for a new order.
///
/// ## Rules
/// - Between 1 and [`MAX_ORDER_ITEMS`]
pub fn validate_order_size(count: i64) -> ValidationResult<usize> {
    if count <= 0 || count > MAX_ORDER_ITEMS as i64 {
        return Err(ValidationError::OutOfRange {
            field: "product count".to_string(),
            min: 1,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    Ok(count as usize)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_description() {
        assert!(validate_description("Adhesive tape").is_ok());
        assert!(validate_description("Pen").is_ok());

        assert!(matches!(
            validate_description("   "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_description("ab"),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(validate_description(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  pen ").unwrap(), "pen");
        assert!(validate_search_query("").is_err());
    }

    #[test]
    fn test_validate_cost_and_margin() {
        assert!(validate_cost(Money::from_cents(1)).is_ok());
        assert!(validate_cost(Money::zero()).is_err());
        assert!(validate_cost(Money::from_cents(-5)).is_err());

        assert!(validate_margin(Rate::from_bps(100)).is_ok());
        assert!(validate_margin(Rate::zero()).is_err());
    }

    #[test]
    fn test_validate_cost_and_margin_upper_bounds() {
        assert!(validate_cost(Money::from_cents(MAX_COST_CENTS)).is_ok());
        assert!(matches!(
            validate_cost(Money::from_cents(MAX_COST_CENTS + 1)),
            Err(ValidationError::OutOfRange { max: MAX_COST_CENTS, .. })
        ));
        assert!(validate_cost(Money::from_cents(i64::MAX)).is_err());

        assert!(validate_margin(Rate::from_bps(MAX_MARGIN_BPS)).is_ok());
        assert!(matches!(
            validate_margin(Rate::from_bps(MAX_MARGIN_BPS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_prefix_count() {
        assert_eq!(validate_prefix_count(1).unwrap(), 1);
        assert_eq!(validate_prefix_count(250).unwrap(), 250);
        assert!(validate_prefix_count(0).is_err());
        assert!(validate_prefix_count(-3).is_err());
    }

    #[test]
    fn test_validate_order_size() {
        assert_eq!(validate_order_size(1).unwrap(), 1);
        assert_eq!(validate_order_size(MAX_ORDER_ITEMS as i64).unwrap(), MAX_ORDER_ITEMS);
        assert!(validate_order_size(0).is_err());
        assert!(validate_order_size(MAX_ORDER_ITEMS as i64 + 1).is_err());
    }
}
