//! # Reports
//!
//! Everything the console prints about products and closed orders.
//!
//! The order reports only ever look at a prefix of the order queue: the
//! first N orders in the order they were closed.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  front                                                         tail    │
//! │  ┌────┐  ┌────┐  ┌────┐  ┌────┐  ┌────┐                                │
//! │  │ #1 │─►│ #2 │─►│ #3 │─►│ #4 │─►│ #5 │      Queue<Order>              │
//! │  └────┘  └────┘  └────┘  └────┘  └────┘                                │
//! │  ◄────── N = 3 ──────►                                                 │
//! │                                                                         │
//! │  option 6: filter_prefix(|_| true, 3)      → #1 #2 #3                  │
//! │  option 7: average_of(final total, 3)      → mean of #1 #2 #3          │
//! │  option 8: filter_prefix(total > X, 3)     → subset of #1 #2 #3        │
//! │  option 9: filter_prefix(contains P, 3)    → subset of #1 #2 #3        │
//! │                                                                         │
//! │  N = 7 → InsufficientElements { requested: 7, actual: 5 }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Selections hold references into the order queue; printing drains the
//! selection, never the queue itself.

use std::io::{self, Write};

use chrono::NaiveDate;
use trinket_core::{Money, Order, Product, ProductKind, Queue, QueueError, DATE_FORMAT};

use crate::config::CliConfig;

/// Printed by every order report while the queue is empty.
pub const NO_ORDERS: &str = "No orders have been closed yet.";

// =============================================================================
// Products
// =============================================================================

/// Writes one catalog line: code, description and today's price.
pub fn write_product_line<W: Write>(
    out: &mut W,
    product: &Product,
    today: NaiveDate,
    config: &CliConfig,
) -> io::Result<()> {
    let price = product.sale_price_on(today);
    write!(
        out,
        "{:02} - {}: {}",
        product.code,
        product.description,
        config.format_currency(price.cents())
    )?;

    if let ProductKind::Perishable { expires_on } = product.kind {
        write!(out, " (best before {})", expires_on.format(DATE_FORMAT))?;
        if product.is_expired_on(today) {
            write!(out, " [expired]")?;
        } else if price < product.base_price() {
            write!(
                out,
                " [near expiry, was {}]",
                config.format_currency(product.base_price().cents())
            )?;
        }
    }

    writeln!(out)
}

/// Writes every product of the catalog.
pub fn write_catalog<W: Write>(
    out: &mut W,
    products: &[Product],
    today: NaiveDate,
    config: &CliConfig,
) -> io::Result<()> {
    if products.is_empty() {
        return writeln!(out, "The catalog is empty.");
    }

    for product in products {
        write_product_line(out, product, today, config)?;
    }
    Ok(())
}

// =============================================================================
// Orders
// =============================================================================

/// Writes an order receipt.
pub fn write_order<W: Write>(out: &mut W, order: &Order, config: &CliConfig) -> io::Result<()> {
    writeln!(
        out,
        "Order #{:02} - {} - {}",
        order.number,
        order.placed_on.format(DATE_FORMAT),
        order.terms
    )?;

    for (i, product) in order.products().iter().enumerate() {
        writeln!(
            out,
            "  {:02}. {} - {}",
            i + 1,
            product.description,
            config.format_currency(product.sale_price_on(order.placed_on).cents())
        )?;
    }

    let discount = order.discount();
    if !discount.is_zero() {
        writeln!(out, "  Subtotal: {}", config.format_currency(order.subtotal().cents()))?;
        writeln!(out, "  Discount: -{}", config.format_currency(discount.cents()))?;
    }
    writeln!(out, "  Total: {}", config.format_currency(order.final_total().cents()))
}

/// Lists the products of the first `count` orders.
pub fn write_first_orders<W: Write>(
    out: &mut W,
    orders: &Queue<Order>,
    count: usize,
    config: &CliConfig,
) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "{}", NO_ORDERS);
    }

    let mut selected = match orders.filter_prefix(|_| true, count) {
        Ok(selected) => selected,
        Err(err) => return write_queue_error(out, err),
    };

    writeln!(out, "Products of the first {} order(s):", count)?;
    while let Ok(order) = selected.dequeue() {
        write_order(out, order, config)?;
    }
    Ok(())
}

/// Writes the mean final total of the first `count` orders.
pub fn write_average<W: Write>(
    out: &mut W,
    orders: &Queue<Order>,
    count: usize,
    config: &CliConfig,
) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "{}", NO_ORDERS);
    }

    match orders.average_of(|order| Some(order.final_total().to_major_f64()), count) {
        Ok(average) => writeln!(
            out,
            "Average total of the first {} order(s): {}",
            count,
            config.format_currency(Money::from_major_f64_rounded(average).cents())
        ),
        Err(err) => write_queue_error(out, err),
    }
}

/// Lists the orders among the first `count` whose final total exceeds
/// `threshold`.
pub fn write_orders_above<W: Write>(
    out: &mut W,
    orders: &Queue<Order>,
    count: usize,
    threshold: Money,
    config: &CliConfig,
) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "{}", NO_ORDERS);
    }

    let selected = match orders.filter_prefix(|order| order.final_total() > threshold, count) {
        Ok(selected) => selected,
        Err(err) => return write_queue_error(out, err),
    };

    let threshold = config.format_currency(threshold.cents());
    if selected.is_empty() {
        return writeln!(
            out,
            "None of the first {} order(s) totals more than {}.",
            count, threshold
        );
    }

    writeln!(out, "Orders among the first {} above {}:", count, threshold)?;
    write_order_totals(out, selected, config)
}

/// Lists the orders among the first `count` that include `product`.
pub fn write_orders_with<W: Write>(
    out: &mut W,
    orders: &Queue<Order>,
    count: usize,
    product: &Product,
    config: &CliConfig,
) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "{}", NO_ORDERS);
    }

    let selected = match orders.filter_prefix(|order| order.contains(product), count) {
        Ok(selected) => selected,
        Err(err) => return write_queue_error(out, err),
    };

    if selected.is_empty() {
        return writeln!(
            out,
            "None of the first {} order(s) includes {}.",
            count, product.description
        );
    }

    writeln!(
        out,
        "Orders among the first {} with {}:",
        count, product.description
    )?;
    write_order_totals(out, selected, config)
}

fn write_order_totals<W: Write>(
    out: &mut W,
    mut selected: Queue<&Order>,
    config: &CliConfig,
) -> io::Result<()> {
    while let Ok(order) = selected.dequeue() {
        writeln!(
            out,
            "  Order #{:02} ({} product(s)) - {}",
            order.number,
            order.product_count(),
            config.format_currency(order.final_total().cents())
        )?;
    }
    Ok(())
}

/// Turns a queue error into a corrective message.
fn write_queue_error<W: Write>(out: &mut W, err: QueueError) -> io::Result<()> {
    match err {
        QueueError::InsufficientElements { requested, actual } => writeln!(
            out,
            "Only {} order(s) have been closed, so the first {} cannot be used. Choose a number from 1 to {}.",
            actual, requested, actual
        ),
        QueueError::Empty => writeln!(out, "{}", NO_ORDERS),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use trinket_core::{PaymentTerms, Rate};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    fn product(code: u32, description: &str, cost_cents: i64) -> Product {
        Product::new(
            code,
            description,
            Money::from_cents(cost_cents),
            Rate::from_bps(2500),
            ProductKind::NonPerishable,
        )
        .unwrap()
    }

    fn pen() -> Product {
        product(1, "Blue pen", 800) // sells for $10.00
    }

    fn notebook() -> Product {
        product(2, "Notebook", 1600) // sells for $20.00
    }

    fn order(number: u32, products: &[Product]) -> Order {
        let mut order = Order::new(number, day(), PaymentTerms::Installments);
        for p in products {
            order.add_product(p.clone()).unwrap();
        }
        order
    }

    /// Totals: #1 $10, #2 $30, #3 $20
    fn orders() -> Queue<Order> {
        let mut queue = Queue::new();
        queue.enqueue(order(1, &[pen()]));
        queue.enqueue(order(2, &[pen(), notebook()]));
        queue.enqueue(order(3, &[notebook()]));
        queue
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_product_line_non_perishable() {
        let config = CliConfig::default();
        let text = render(|out| write_product_line(out, &pen(), day(), &config));
        assert_eq!(text, "01 - Blue pen: $10.00\n");
    }

    #[test]
    fn test_product_line_perishable() {
        let config = CliConfig::default();
        let milk = Product::new(
            7,
            "Whole milk",
            Money::from_cents(800),
            Rate::from_bps(2500),
            ProductKind::Perishable {
                expires_on: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            },
        )
        .unwrap();

        let text = render(|out| write_product_line(out, &milk, day(), &config));
        assert_eq!(
            text,
            "07 - Whole milk: $7.50 (best before 03/05/2024) [near expiry, was $10.00]\n"
        );

        let later = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        let text = render(|out| write_product_line(out, &milk, later, &config));
        assert!(text.ends_with("[expired]\n"));
    }

    #[test]
    fn test_empty_catalog() {
        let config = CliConfig::default();
        let text = render(|out| write_catalog(out, &[], day(), &config));
        assert_eq!(text, "The catalog is empty.\n");
    }

    #[test]
    fn test_order_receipt_with_discount() {
        let config = CliConfig::default();
        let mut upfront = Order::new(4, day(), PaymentTerms::Upfront);
        upfront.add_product(notebook()).unwrap();

        let text = render(|out| write_order(out, &upfront, &config));
        assert_eq!(
            text,
            "Order #04 - 01/05/2024 - upfront\n\
             \x20 01. Notebook - $20.00\n\
             \x20 Subtotal: $20.00\n\
             \x20 Discount: -$3.00\n\
             \x20 Total: $17.00\n"
        );
    }

    #[test]
    fn test_first_orders() {
        let config = CliConfig::default();
        let orders = orders();
        let text = render(|out| write_first_orders(out, &orders, 2, &config));

        assert!(text.starts_with("Products of the first 2 order(s):\n"));
        assert!(text.contains("Order #01"));
        assert!(text.contains("Order #02"));
        assert!(!text.contains("Order #03"));
        // The queue itself is untouched
        assert_eq!(orders.size(), 3);
    }

    #[test]
    fn test_reports_without_orders() {
        let config = CliConfig::default();
        let orders = Queue::new();

        let text = render(|out| write_first_orders(out, &orders, 1, &config));
        assert_eq!(text, format!("{}\n", NO_ORDERS));

        let text = render(|out| write_average(out, &orders, 1, &config));
        assert_eq!(text, format!("{}\n", NO_ORDERS));
    }

    #[test]
    fn test_too_many_orders_requested() {
        let config = CliConfig::default();
        let orders = orders();

        let text = render(|out| write_first_orders(out, &orders, 5, &config));
        assert_eq!(
            text,
            "Only 3 order(s) have been closed, so the first 5 cannot be used. Choose a number from 1 to 3.\n"
        );

        let text = render(|out| write_average(out, &orders, 4, &config));
        assert!(text.starts_with("Only 3 order(s)"));
    }

    #[test]
    fn test_average() {
        let config = CliConfig::default();
        let orders = orders();

        let text = render(|out| write_average(out, &orders, 2, &config));
        assert_eq!(text, "Average total of the first 2 order(s): $20.00\n");

        let text = render(|out| write_average(out, &orders, 3, &config));
        assert_eq!(text, "Average total of the first 3 order(s): $20.00\n");
    }

    #[test]
    fn test_orders_above() {
        let config = CliConfig::default();
        let orders = orders();

        let text = render(|out| write_orders_above(out, &orders, 3, Money::from_cents(1500), &config));
        assert_eq!(
            text,
            "Orders among the first 3 above $15.00:\n\
             \x20 Order #02 (2 product(s)) - $30.00\n\
             \x20 Order #03 (1 product(s)) - $20.00\n"
        );

        let text = render(|out| write_orders_above(out, &orders, 1, Money::from_cents(1500), &config));
        assert_eq!(text, "None of the first 1 order(s) totals more than $15.00.\n");
    }

    #[test]
    fn test_orders_with_product() {
        let config = CliConfig::default();
        let orders = orders();

        let text = render(|out| write_orders_with(out, &orders, 2, &notebook(), &config));
        assert_eq!(
            text,
            "Orders among the first 2 with Notebook:\n\
             \x20 Order #02 (2 product(s)) - $30.00\n"
        );

        let text = render(|out| write_orders_with(out, &orders, 1, &notebook(), &config));
        assert_eq!(text, "None of the first 1 order(s) includes Notebook.\n");
    }
}
