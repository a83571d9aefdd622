//! # Domain Types
//!
//! Core domain types used throughout Trinket Shop.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  ProductKind    │   │  PaymentTerms   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  NonPerishable  │   │  Upfront (1)    │       │
//! │  │  code (number)  │   │  Perishable     │   │  Installments(2)│       │
//! │  │  description    │   │   expires_on    │   └─────────────────┘       │
//! │  │  cost, margin   │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │      Rate       │   margin, discounts                                │
//! │  │  bps (u32)      │   2500 = 25%                                       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, never shown to the user
//! - Business ID: (`code`, order `number`) - what the user types and reads

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_cost, validate_description, validate_margin};
use crate::{DATE_FORMAT, NEAR_EXPIRY_DAYS, PERISHABLE_DISCOUNT_BPS, UPFRONT_DISCOUNT_BPS};

// =============================================================================
// Rate
// =============================================================================

/// A rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2500 bps = 25% (a typical profit margin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Parses a fraction as written in catalog files (`0.25` = 25%).
    ///
    /// Up to four decimals; `.` or `,` as separator.
    ///
    /// ## Example
    /// ```rust
    /// use trinket_core::types::Rate;
    ///
    /// assert_eq!(Rate::parse_fraction("0.25").unwrap().bps(), 2500);
    /// assert_eq!(Rate::parse_fraction("1,5").unwrap().bps(), 15000);
    /// assert!(Rate::parse_fraction("0.12345").is_err());
    /// ```
    pub fn parse_fraction(text: &str) -> Result<Rate, ValidationError> {
        let text = text.trim();
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "rate".to_string(),
            reason: format!("'{}' {}", text, reason),
        };

        if text.is_empty() {
            return Err(ValidationError::Required {
                field: "rate".to_string(),
            });
        }

        let (whole, fraction) = text
            .split_once(|c: char| c == '.' || c == ',')
            .unwrap_or((text, ""));

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid("is not a decimal fraction"));
        }
        if fraction.len() > 4 {
            return Err(invalid("has more than four decimals"));
        }

        let whole: u32 = whole.parse().map_err(|_| invalid("is too large"))?;
        let fraction: u32 = format!("{:0<4}", fraction)
            .parse()
            .map_err(|_| invalid("is not a decimal fraction"))?;

        whole
            .checked_mul(10_000)
            .and_then(|bps| bps.checked_add(fraction))
            .map(Rate)
            .ok_or_else(|| invalid("is too large"))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// Whether a product can go bad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductKind {
    /// Sold at its base price forever.
    NonPerishable,
    /// Discounted close to expiry, unsellable after it.
    Perishable { expires_on: NaiveDate },
}

/// A product available for sale.
///
/// Equality is by business `code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Catalog code the customer types to find the product.
    pub code: u32,

    /// Display name, also used for lookups.
    pub description: String,

    /// What the shop pays for the product.
    pub cost: Money,

    /// Profit margin applied on top of cost.
    pub margin: Rate,

    /// Perishable or not.
    pub kind: ProductKind,
}

impl Product {
    /// Creates a validated product with a fresh UUID.
    ///
    /// ## Example
    /// ```rust
    /// use trinket_core::{Money, Product, ProductKind, Rate};
    ///
    /// let tape = Product::new(
    ///     1,
    ///     "Adhesive tape",
    ///     Money::from_cents(400),
    ///     Rate::from_bps(5000),
    ///     ProductKind::NonPerishable,
    /// )
    /// .unwrap();
    /// assert_eq!(tape.base_price().cents(), 600);
    /// ```
    pub fn new(
        code: u32,
        description: &str,
        cost: Money,
        margin: Rate,
        kind: ProductKind,
    ) -> CoreResult<Self> {
        validate_description(description)?;
        validate_cost(cost)?;
        validate_margin(margin)?;

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            code,
            description: description.trim().to_string(),
            cost,
            margin,
            kind,
        })
    }

    /// Cost plus margin, before any date-based discount.
    pub fn base_price(&self) -> Money {
        self.cost + self.cost.apply_rate(self.margin)
    }

    /// The price charged on `date`.
    ///
    /// A perishable product at most [`NEAR_EXPIRY_DAYS`] days from expiry
    /// sells with a [`PERISHABLE_DISCOUNT_BPS`] discount.
    pub fn sale_price_on(&self, date: NaiveDate) -> Money {
        let base = self.base_price();

        match self.kind {
            ProductKind::Perishable { expires_on } => {
                let days_left = expires_on.signed_duration_since(date).num_days();
                if (0..=NEAR_EXPIRY_DAYS).contains(&days_left) {
                    base.apply_percentage_discount(PERISHABLE_DISCOUNT_BPS)
                } else {
                    base
                }
            }
            ProductKind::NonPerishable => base,
        }
    }

    /// True for perishable products whose expiry date is before `date`.
    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        match self.kind {
            ProductKind::Perishable { expires_on } => date > expires_on,
            ProductKind::NonPerishable => false,
        }
    }

    /// Fails with [`CoreError::ProductExpired`] when the product cannot be
    /// sold on `date`.
    pub fn ensure_sellable_on(&self, date: NaiveDate) -> CoreResult<()> {
        match self.kind {
            ProductKind::Perishable { expires_on } if date > expires_on => {
                Err(CoreError::ProductExpired {
                    description: self.description.clone(),
                    expired_on: expires_on,
                })
            }
            _ => Ok(()),
        }
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Product {}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.description, self.base_price())?;
        if let ProductKind::Perishable { expires_on } = self.kind {
            write!(f, " (best before {})", expires_on.format(DATE_FORMAT))?;
        }
        Ok(())
    }
}

// =============================================================================
// Payment Terms
// =============================================================================

/// How an order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    /// Paid at once; earns the upfront discount.
    Upfront,
    /// Paid over time at full price.
    Installments,
}

impl PaymentTerms {
    /// Maps the menu code (1 = upfront, 2 = installments).
    pub fn from_code(code: u32) -> CoreResult<Self> {
        match code {
            1 => Ok(PaymentTerms::Upfront),
            2 => Ok(PaymentTerms::Installments),
            other => Err(CoreError::InvalidPaymentTerms(other)),
        }
    }

    /// Discount on the order subtotal, in basis points.
    pub const fn discount_bps(&self) -> u32 {
        match self {
            PaymentTerms::Upfront => UPFRONT_DISCOUNT_BPS,
            PaymentTerms::Installments => 0,
        }
    }
}

impl fmt::Display for PaymentTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentTerms::Upfront => write!(f, "upfront"),
            PaymentTerms::Installments => write!(f, "installments"),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
