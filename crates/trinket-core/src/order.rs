//! # Orders
//!
//! An order gathers catalog products for one customer and prices them on
//! the day it was placed.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Order::new(number, date, terms)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  add_product(...) × up to MAX_ORDER_ITEMS                              │
//! │       │   ├── full?    → CoreError::OrderFull                          │
//! │       │   └── expired? → CoreError::ProductExpired                     │
//! │       ▼                                                                 │
//! │  closed by the console → Queue<Order>::enqueue                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are stored as snapshots: later catalog changes do not reprice
//! a placed order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PaymentTerms, Product};
use crate::{DATE_FORMAT, MAX_ORDER_ITEMS};

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Sequential number shown to the user.
    pub number: u32,

    /// Day the order was placed; all prices are taken on this day.
    pub placed_on: NaiveDate,

    /// Upfront or installments.
    pub terms: PaymentTerms,

    products: Vec<Product>,
}

impl Order {
    /// Opens an empty order.
    pub fn new(number: u32, placed_on: NaiveDate, terms: PaymentTerms) -> Self {
        Order {
            id: Uuid::new_v4().to_string(),
            number,
            placed_on,
            terms,
            products: Vec::new(),
        }
    }

    /// Adds a product snapshot to the order.
    ///
    /// ## Errors
    /// - [`CoreError::OrderFull`] once [`MAX_ORDER_ITEMS`] products are in
    /// - [`CoreError::ProductExpired`] for perishables past expiry on
    ///   `placed_on`
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        if self.products.len() >= MAX_ORDER_ITEMS {
            return Err(CoreError::OrderFull {
                number: self.number,
                max: MAX_ORDER_ITEMS,
            });
        }

        product.ensure_sellable_on(self.placed_on)?;
        self.products.push(product);
        Ok(())
    }

    /// Products in the order they were added.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// True when a product with the same code is in the order.
    pub fn contains(&self, product: &Product) -> bool {
        self.products.iter().any(|p| p == product)
    }

    /// Sum of the products' sale prices on `placed_on`.
    pub fn subtotal(&self) -> Money {
        self.products
            .iter()
            .map(|p| p.sale_price_on(self.placed_on))
            .sum()
    }

    /// Discount granted by the payment terms.
    pub fn discount(&self) -> Money {
        self.subtotal() - self.final_total()
    }

    /// What the customer pays.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use trinket_core::{Money, Order, PaymentTerms, Product, ProductKind, Rate};
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    /// let pen = Product::new(1, "Pen", Money::from_cents(800), Rate::from_bps(2500), ProductKind::NonPerishable).unwrap();
    ///
    /// let mut order = Order::new(1, day, PaymentTerms::Upfront);
    /// order.add_product(pen).unwrap();
    ///
    /// // $10.00 less 15% upfront discount
    /// assert_eq!(order.final_total().cents(), 850);
    /// ```
    pub fn final_total(&self) -> Money {
        self.subtotal()
            .apply_percentage_discount(self.terms.discount_bps())
    }
}

/// Receipt-style rendering.
impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Order #{:02}", self.number)?;
        writeln!(f, "Date: {}", self.placed_on.format(DATE_FORMAT))?;
        writeln!(f, "Payment: {}", self.terms)?;
        for (i, product) in self.products.iter().enumerate() {
            writeln!(
                f,
                "  {:02}. {} - {}",
                i + 1,
                product.description,
                product.sale_price_on(self.placed_on)
            )?;
        }
        writeln!(f, "Subtotal: {}", self.subtotal())?;
        writeln!(f, "Discount: {}", self.discount())?;
        write!(f, "Total: {}", self.final_total())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProductKind, Rate};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn product(code: u32, cost_cents: i64) -> Product {
        Product::new(
            code,
            &format!("Item {}", code),
            Money::from_cents(cost_cents),
            Rate::from_bps(2500),
            ProductKind::NonPerishable,
        )
        .unwrap()
    }

    #[test]
    fn test_new_order_is_empty() {
        let order = Order::new(1, day(), PaymentTerms::Installments);
        assert!(order.is_empty());
        assert_eq!(order.final_total(), Money::zero());
    }

    #[test]
    fn test_orders_get_distinct_uuids() {
        let first = Order::new(1, day(), PaymentTerms::Upfront);
        let second = Order::new(1, day(), PaymentTerms::Upfront);

        assert_ne!(first.id, second.id);
        assert!(Uuid::parse_str(&first.id).is_ok());
    }

    #[test]
    fn test_installments_pay_full_price() {
        let mut order = Order::new(1, day(), PaymentTerms::Installments);
        order.add_product(product(1, 800)).unwrap();
        order.add_product(product(2, 400)).unwrap();

        // (800 + 200) + (400 + 100)
        assert_eq!(order.subtotal().cents(), 1500);
        assert_eq!(order.final_total().cents(), 1500);
        assert!(order.discount().is_zero());
    }

    #[test]
    fn test_upfront_discount() {
        let mut order = Order::new(1, day(), PaymentTerms::Upfront);
        order.add_product(product(1, 800)).unwrap();
        order.add_product(product(2, 400)).unwrap();

        assert_eq!(order.final_total().cents(), 1275);
        assert_eq!(order.discount().cents(), 225);
    }

    #[test]
    fn test_order_full() {
        let mut order = Order::new(3, day(), PaymentTerms::Installments);
        for code in 0..MAX_ORDER_ITEMS as u32 {
            order.add_product(product(code + 1, 100)).unwrap();
        }

        let err = order.add_product(product(99, 100)).unwrap_err();
        assert!(matches!(err, CoreError::OrderFull { number: 3, max } if max == MAX_ORDER_ITEMS));
        assert_eq!(order.product_count(), MAX_ORDER_ITEMS);
    }

    #[test]
    fn test_expired_product_rejected() {
        let yoghurt = Product::new(
            5,
            "Yoghurt",
            Money::from_cents(200),
            Rate::from_bps(5000),
            ProductKind::Perishable {
                expires_on: NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
            },
        )
        .unwrap();

        let mut order = Order::new(1, day(), PaymentTerms::Upfront);
        assert!(matches!(
            order.add_product(yoghurt),
            Err(CoreError::ProductExpired { .. })
        ));
        assert!(order.is_empty());
    }

    #[test]
    fn test_contains_by_code() {
        let mut order = Order::new(1, day(), PaymentTerms::Upfront);
        order.add_product(product(1, 100)).unwrap();

        assert!(order.contains(&product(1, 999)));
        assert!(!order.contains(&product(2, 100)));
    }

    #[test]
    fn test_receipt_display() {
        let mut order = Order::new(7, day(), PaymentTerms::Installments);
        order.add_product(product(1, 800)).unwrap();

        let receipt = order.to_string();
        assert!(receipt.starts_with("Order #07\nDate: 01/05/2024\nPayment: installments\n"));
        assert!(receipt.contains("  01. Item 1 - $10.00"));
        assert!(receipt.ends_with("Total: $10.00"));
    }
}
