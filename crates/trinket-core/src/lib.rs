//! # trinket-core: Pure Domain Logic for Trinket Shop
//!
//! This crate is the **heart** of Trinket Shop. It contains the order queue
//! and all pricing rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Trinket Shop Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console menu (apps/cli)                      │   │
//! │  │    List ──► Find ──► Start order ──► Close order ──► Reports    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ trinket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   queue   │  │   money   │  │   order   │  │ validation│  │   │
//! │  │   │ Queue<T>  │  │   Money   │  │   Order   │  │   rules   │  │   │
//! │  │   │ bounded   │  │   Rate    │  │  pricing  │  │   checks  │  │   │
//! │  │   │   ops     │  │           │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │                trinket-catalog (text loader)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`queue`] - Sentinel-based FIFO queue with bounded average/filter
//! - [`types`] - Domain types (Product, Rate, PaymentTerms)
//! - [`order`] - Orders and their totals
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use trinket_core::{Money, Order, PaymentTerms, Product, ProductKind, Queue, Rate};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
//! let pen = Product::new(1, "Pen", Money::from_cents(800), Rate::from_bps(2500), ProductKind::NonPerishable).unwrap();
//!
//! let mut orders = Queue::new();
//! for number in 1..=3 {
//!     let mut order = Order::new(number, day, PaymentTerms::Installments);
//!     order.add_product(pen.clone()).unwrap();
//!     orders.enqueue(order);
//! }
//!
//! let mean = orders.average_of(|o| Some(o.final_total().to_major_f64()), 3).unwrap();
//! assert_eq!(mean, 10.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod order;
pub mod queue;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, QueueError, QueueResult, ValidationError};
pub use money::Money;
pub use order::Order;
pub use queue::Queue;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum products in a single order.
pub const MAX_ORDER_ITEMS: usize = 10;

/// Discount on an order paid upfront (15%).
pub const UPFRONT_DISCOUNT_BPS: u32 = 1500;

/// Discount on a perishable product close to expiry (25%).
pub const PERISHABLE_DISCOUNT_BPS: u32 = 2500;

/// How many days before expiry the perishable discount starts.
pub const NEAR_EXPIRY_DAYS: i64 = 7;

/// Highest accepted product cost, in cents ($10,000,000.00).
pub const MAX_COST_CENTS: i64 = 1_000_000_000;

/// Highest accepted profit margin, in basis points (1000%).
pub const MAX_MARGIN_BPS: u32 = 100_000;

/// Shortest accepted product description.
pub const MIN_DESCRIPTION_LEN: usize = 3;

/// Longest accepted product description.
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Date format used in catalog files and on screen (`31/01/2030`).
pub const DATE_FORMAT: &str = "%d/%m/%Y";
