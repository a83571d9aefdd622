//! # Console Session
//!
//! The interactive menu loop. A session owns the catalog, the order being
//! built and the queue of closed orders.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   option 4                 option 5                  options 6-9        │
//! │  ┌──────────┐   close    ┌──────────────────┐   read  ┌─────────────┐  │
//! │  │ current  │──────────►│ orders: Queue     │────────►│  reports    │  │
//! │  │ Option<  │  (moved,   │ #1 → #2 → ... #n │ (prefix │  (borrow)   │  │
//! │  │  Order>  │  enqueued  └──────────────────┘  only)   └─────────────┘  │
//! │  └──────────┘  once)                                                    │
//! │                                                                         │
//! │  At most one order is open at a time. Closing moves it into the        │
//! │  queue, so the same order can never be queued twice.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input is any [`BufRead`], output any [`Write`]; tests drive a session
//! with an in-memory script. Unparseable answers are re-asked. End of input
//! at any prompt ends the session cleanly.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use trinket_catalog::Catalog;
use trinket_core::validation::{validate_order_size, validate_prefix_count, validate_search_query};
use trinket_core::{CoreError, Money, Order, PaymentTerms, Queue, MAX_ORDER_ITEMS};

use crate::config::CliConfig;
use crate::menu::{write_menu, MenuOption};
use crate::reports::{self, NO_ORDERS};

/// What to do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Line-oriented prompt/answer over a reader and a writer.
struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Reads one trimmed line; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts until `parse` accepts the answer.
    ///
    /// `parse` returns the message shown before asking again.
    fn ask<T, F>(&mut self, prompt: &str, mut parse: F) -> io::Result<Option<T>>
    where
        F: FnMut(&str) -> Result<T, String>,
    {
        loop {
            write!(self.out, "{}", prompt)?;
            self.out.flush()?;

            let Some(answer) = self.read_line()? else {
                writeln!(self.out)?;
                return Ok(None);
            };

            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(message) => writeln!(self.out, "{}", message)?,
            }
        }
    }
}

/// One run of the console menu.
pub struct Session<R, W> {
    console: Console<R, W>,
    config: CliConfig,
    catalog: Catalog,
    orders: Queue<Order>,
    current: Option<Order>,
    next_number: u32,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session; `today` prices every order it opens.
    pub fn new(input: R, out: W, config: CliConfig, catalog: Catalog, today: NaiveDate) -> Self {
        Session {
            console: Console { input, out },
            config,
            catalog,
            orders: Queue::new(),
            current: None,
            next_number: 1,
            today,
        }
    }

    /// Closed orders, oldest first.
    pub fn orders(&self) -> &Queue<Order> {
        &self.orders
    }

    /// The order opened but not yet closed.
    pub fn current_order(&self) -> Option<&Order> {
        self.current.as_ref()
    }

    /// Gives back the writer.
    pub fn into_output(self) -> W {
        self.console.out
    }

    /// Runs the menu until option 0 or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        info!(products = self.catalog.len(), today = %self.today, "Session started");

        loop {
            if self.config.clear_screen {
                write!(self.console.out, "\x1B[2J\x1B[H")?;
            }
            write_menu(&mut self.console.out, &self.config.store_name)?;

            let choice = self.console.ask("Option: ", |input| {
                MenuOption::from_input(input)
                    .ok_or_else(|| format!("Invalid option '{}'. Choose a number from 0 to 9.", input))
            })?;
            let Some(option) = choice else { break };
            debug!(?option, "Menu option selected");

            if self.dispatch(option)? == Flow::Exit {
                break;
            }
            if self.config.pause && !self.pause()? {
                break;
            }
        }

        self.finish()
    }

    fn dispatch(&mut self, option: MenuOption) -> io::Result<Flow> {
        match option {
            MenuOption::ListProducts => self.list_products(),
            MenuOption::FindByCode => self.find_by_code(),
            MenuOption::FindByDescription => self.find_by_description(),
            MenuOption::OpenOrder => self.open_order(),
            MenuOption::CloseOrder => self.close_order(),
            MenuOption::ListFirstOrders => self.list_first_orders(),
            MenuOption::AverageOfFirstOrders => self.average_of_first_orders(),
            MenuOption::FirstOrdersAbove => self.first_orders_above(),
            MenuOption::FirstOrdersWithProduct => self.first_orders_with_product(),
            MenuOption::Exit => Ok(Flow::Exit),
        }
    }

    /// Waits for Enter; false at end of input.
    fn pause(&mut self) -> io::Result<bool> {
        write!(self.console.out, "\nPress Enter to continue...")?;
        self.console.out.flush()?;
        Ok(self.console.read_line()?.is_some())
    }

    fn finish(&mut self) -> io::Result<()> {
        if let Some(order) = self.current.take() {
            warn!(order_id = %order.id, number = order.number, "Open order discarded at exit");
            writeln!(
                self.console.out,
                "Order #{:02} was never closed and is discarded.",
                order.number
            )?;
        }

        info!(orders = self.orders.size(), "Session ended");
        writeln!(self.console.out, "Goodbye!")?;
        self.console.out.flush()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    fn list_products(&mut self) -> io::Result<Flow> {
        reports::write_catalog(
            &mut self.console.out,
            self.catalog.products(),
            self.today,
            &self.config,
        )?;
        Ok(Flow::Continue)
    }

    fn find_by_code(&mut self) -> io::Result<Flow> {
        let Some(code) = self.console.ask("Product code: ", |input| {
            input
                .parse::<u32>()
                .map_err(|_| format!("'{}' is not a product code.", input))
        })?
        else {
            return Ok(Flow::Exit);
        };

        match self.catalog.find_by_code(code) {
            Some(product) => {
                reports::write_product_line(&mut self.console.out, product, self.today, &self.config)?
            }
            None => writeln!(self.console.out, "No product with code {}.", code)?,
        }
        Ok(Flow::Continue)
    }

    fn find_by_description(&mut self) -> io::Result<Flow> {
        let Some(query) = self.console.ask("Description: ", |input| {
            validate_search_query(input).map_err(|e| e.to_string())
        })?
        else {
            return Ok(Flow::Exit);
        };

        match self.catalog.find_by_description(&query) {
            Some(product) => {
                reports::write_product_line(&mut self.console.out, product, self.today, &self.config)?
            }
            None => writeln!(self.console.out, "No product named '{}'.", query)?,
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    fn open_order(&mut self) -> io::Result<Flow> {
        if let Some(order) = &self.current {
            writeln!(
                self.console.out,
                "Order #{:02} is still open; close it first (option 5).",
                order.number
            )?;
            return Ok(Flow::Continue);
        }
        if self.catalog.is_empty() {
            writeln!(self.console.out, "The catalog is empty; no order can be opened.")?;
            return Ok(Flow::Continue);
        }
        let today = self.today;
        if self.catalog.products().iter().all(|p| p.is_expired_on(today)) {
            writeln!(
                self.console.out,
                "Every product in the catalog has expired; no order can be opened."
            )?;
            return Ok(Flow::Continue);
        }

        let Some(terms) = self
            .console
            .ask("Payment terms (1 = upfront, 2 = installments): ", |input| {
                let code: u32 = input
                    .parse()
                    .map_err(|_| format!("'{}' is not 1 or 2.", input))?;
                PaymentTerms::from_code(code).map_err(|e| e.to_string())
            })?
        else {
            return Ok(Flow::Exit);
        };

        let prompt = format!("Number of products (1 to {}): ", MAX_ORDER_ITEMS);
        let Some(count) = self.console.ask(&prompt, |input| {
            let count: i64 = input
                .parse()
                .map_err(|_| format!("'{}' is not a number.", input))?;
            validate_order_size(count).map_err(|e| e.to_string())
        })?
        else {
            return Ok(Flow::Exit);
        };

        let mut order = Order::new(self.next_number, self.today, terms);
        while order.product_count() < count {
            let prompt = format!(
                "Product {} of {} (description): ",
                order.product_count() + 1,
                count
            );
            let catalog = &self.catalog;
            let Some(product) = self.console.ask(&prompt, |input| {
                catalog
                    .find_by_description(input)
                    .cloned()
                    .ok_or_else(|| format!("No product named '{}'; try again.", input))
            })?
            else {
                return Ok(Flow::Exit);
            };

            let product_id = product.id.clone();
            match order.add_product(product) {
                Ok(()) => debug!(order_id = %order.id, %product_id, "Product added"),
                Err(err @ CoreError::ProductExpired { .. }) => {
                    writeln!(self.console.out, "{}; pick another product.", err)?
                }
                Err(err) => {
                    writeln!(self.console.out, "{}", err)?;
                    break;
                }
            }
        }

        info!(
            order_id = %order.id,
            number = order.number,
            products = order.product_count(),
            terms = %order.terms,
            "Order opened"
        );
        writeln!(
            self.console.out,
            "Order #{:02} opened with {} product(s), total {}. Close it with option 5.",
            order.number,
            order.product_count(),
            self.config.format_currency(order.final_total().cents())
        )?;

        self.current = Some(order);
        self.next_number += 1;
        Ok(Flow::Continue)
    }

    fn close_order(&mut self) -> io::Result<Flow> {
        let Some(order) = self.current.take() else {
            writeln!(
                self.console.out,
                "There is no open order; open one first (option 4)."
            )?;
            return Ok(Flow::Continue);
        };

        reports::write_order(&mut self.console.out, &order, &self.config)?;
        info!(
            order_id = %order.id,
            number = order.number,
            total_cents = order.final_total().cents(),
            "Order closed"
        );

        self.orders.enqueue(order);
        writeln!(
            self.console.out,
            "Order queued. {} order(s) closed so far.",
            self.orders.size()
        )?;
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Asks for N; `None` at end of input.
    fn ask_order_count(&mut self) -> io::Result<Option<usize>> {
        self.console
            .ask("How many orders, counting from the first? ", |input| {
                let count: i64 = input
                    .parse()
                    .map_err(|_| format!("'{}' is not a number.", input))?;
                validate_prefix_count(count).map_err(|e| e.to_string())
            })
    }

    /// Prints [`NO_ORDERS`] and returns false when nothing was closed yet.
    fn has_orders(&mut self) -> io::Result<bool> {
        if self.orders.is_empty() {
            writeln!(self.console.out, "{}", NO_ORDERS)?;
            return Ok(false);
        }
        Ok(true)
    }

    fn list_first_orders(&mut self) -> io::Result<Flow> {
        if !self.has_orders()? {
            return Ok(Flow::Continue);
        }
        let Some(count) = self.ask_order_count()? else {
            return Ok(Flow::Exit);
        };

        reports::write_first_orders(&mut self.console.out, &self.orders, count, &self.config)?;
        Ok(Flow::Continue)
    }

    fn average_of_first_orders(&mut self) -> io::Result<Flow> {
        if !self.has_orders()? {
            return Ok(Flow::Continue);
        }
        let Some(count) = self.ask_order_count()? else {
            return Ok(Flow::Exit);
        };

        reports::write_average(&mut self.console.out, &self.orders, count, &self.config)?;
        Ok(Flow::Continue)
    }

    fn first_orders_above(&mut self) -> io::Result<Flow> {
        if !self.has_orders()? {
            return Ok(Flow::Continue);
        }
        let Some(count) = self.ask_order_count()? else {
            return Ok(Flow::Exit);
        };
        let Some(threshold) = self.console.ask("Amount: ", |input| {
            Money::parse_decimal(input).map_err(|e| e.to_string())
        })?
        else {
            return Ok(Flow::Exit);
        };

        reports::write_orders_above(
            &mut self.console.out,
            &self.orders,
            count,
            threshold,
            &self.config,
        )?;
        Ok(Flow::Continue)
    }

    fn first_orders_with_product(&mut self) -> io::Result<Flow> {
        if !self.has_orders()? {
            return Ok(Flow::Continue);
        }
        let Some(count) = self.ask_order_count()? else {
            return Ok(Flow::Exit);
        };

        let catalog = &self.catalog;
        let Some(product) = self.console.ask("Product description: ", |input| {
            catalog
                .find_by_description(input)
                .ok_or_else(|| format!("No product named '{}'; try again.", input))
        })?
        else {
            return Ok(Flow::Exit);
        };

        reports::write_orders_with(
            &mut self.console.out,
            &self.orders,
            count,
            product,
            &self.config,
        )?;
        Ok(Flow::Continue)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use trinket_catalog::parse_catalog;

    const CATALOG: &str = "3\n\
        1;Blue pen;8.00;0.25\n\
        1;Notebook;16.00;0.25\n\
        2;Old yogurt;2.00;0.5;20/04/2024\n";

    fn quiet_config() -> CliConfig {
        CliConfig {
            clear_screen: false,
            pause: false,
            ..CliConfig::default()
        }
    }

    fn session(script: &str, config: CliConfig) -> Session<Cursor<Vec<u8>>, Vec<u8>> {
        Session::new(
            Cursor::new(script.as_bytes().to_vec()),
            Vec::new(),
            config,
            parse_catalog(CATALOG).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
    }

    /// Runs a script and returns the session and everything it printed.
    fn play(script: &str) -> (Vec<(u32, i64)>, String) {
        let mut session = session(script, quiet_config());
        session.run().unwrap();
        let closed = session
            .orders()
            .iter()
            .map(|o| (o.number, o.final_total().cents()))
            .collect();
        let text = String::from_utf8(session.into_output()).unwrap();
        (closed, text)
    }

    /// Order #1: upfront, pen + notebook ($30.00 - 15% = $25.50).
    /// Order #2: installments, notebook ($20.00).
    const TWO_ORDERS: &str = "4\n1\n2\nblue pen\nNOTEBOOK\n5\n4\n2\n1\nnotebook\n5\n";

    #[test]
    fn test_orders_are_queued_in_closing_order() {
        let (closed, text) = play(&format!("{}0\n", TWO_ORDERS));

        assert_eq!(closed, vec![(1, 2550), (2, 2000)]);
        assert!(text.contains("Order #01 opened with 2 product(s), total $25.50."));
        assert!(text.contains("Order queued. 2 order(s) closed so far."));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_average_report() {
        let (_, text) = play(&format!("{}7\n2\n0\n", TWO_ORDERS));
        assert!(text.contains("Average total of the first 2 order(s): $22.75"));
    }

    #[test]
    fn test_threshold_and_product_reports() {
        let (_, text) = play(&format!("{}8\n2\n21\n9\n2\nblue PEN\n0\n", TWO_ORDERS));

        assert!(text.contains("Orders among the first 2 above $21.00:\n  Order #01 (2 product(s)) - $25.50\n"));
        assert!(text.contains("Orders among the first 2 with Blue pen:\n  Order #01"));
    }

    #[test]
    fn test_first_orders_report() {
        let (closed, text) = play(&format!("{}6\n1\n0\n", TWO_ORDERS));

        let (_, report) = text.split_once("Products of the first 1 order(s):\n").unwrap();
        assert!(report.starts_with("Order #01 - 01/05/2024 - upfront\n"));
        assert!(!report.contains("Order #02"));
        assert_eq!(closed.len(), 2);
    }

    #[test]
    fn test_report_count_is_checked() {
        let (_, text) = play("4\n2\n1\nnotebook\n5\n6\n0\nmany\n5\n0\n");

        assert!(text.contains("order count must be positive"));
        assert!(text.contains("'many' is not a number."));
        assert!(text.contains("Only 1 order(s) have been closed, so the first 5 cannot be used."));
    }

    #[test]
    fn test_reports_need_orders() {
        let (_, text) = play("6\n7\n8\n9\n0\n");
        assert_eq!(text.matches(NO_ORDERS).count(), 4);
    }

    #[test]
    fn test_invalid_menu_options() {
        let (_, text) = play("abc\n12\n1\n0\n");

        assert!(text.contains("Invalid option 'abc'. Choose a number from 0 to 9."));
        assert!(text.contains("Invalid option '12'."));
        assert!(text.contains("01 - Blue pen: $10.00\n"));
        assert!(text.contains("03 - Old yogurt: $3.00 (best before 20/04/2024) [expired]\n"));
    }

    #[test]
    fn test_lookups() {
        let (_, text) = play("2\n2\n2\n9\n2\nx\n3\n  blue pen \n3\npen\n0\n");

        assert!(text.contains("02 - Notebook: $20.00\n"));
        assert!(text.contains("No product with code 9."));
        assert!(text.contains("'x' is not a product code."));
        assert!(text.contains("01 - Blue pen: $10.00\n"));
        assert!(text.contains("No product named 'pen'."));
    }

    #[test]
    fn test_unknown_and_expired_products_are_asked_again() {
        let (closed, text) = play("4\n2\n1\npencil\nold yogurt\nnotebook\n5\n0\n");

        assert!(text.contains("No product named 'pencil'; try again."));
        assert!(text.contains("Product Old yogurt expired on 2024-04-20; pick another product."));
        assert_eq!(closed, vec![(1, 2000)]);
    }

    #[test]
    fn test_order_input_is_validated() {
        let (closed, text) = play("4\n3\n2\n0\n11\n1\nblue pen\n5\n0\n");

        assert!(text.contains("Invalid payment terms code: 3"));
        assert!(text.contains("product count must be between 1 and 10"));
        assert_eq!(closed, vec![(1, 1000)]);
    }

    #[test]
    fn test_one_open_order_at_a_time() {
        let (closed, text) = play("5\n4\n1\n1\nnotebook\n4\n0\n");

        assert!(text.contains("There is no open order; open one first (option 4)."));
        assert!(text.contains("Order #01 is still open; close it first (option 5)."));
        assert!(text.contains("Order #01 was never closed and is discarded."));
        assert!(closed.is_empty());
    }

    #[test]
    fn test_no_order_when_every_product_expired() {
        let catalog = parse_catalog("1\n2;Old yogurt;2.00;0.5;20/04/2024\n").unwrap();
        let mut session = Session::new(
            Cursor::new(b"4\n1\n1\nold yogurt\n0\n".to_vec()),
            Vec::new(),
            quiet_config(),
            catalog,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        );
        session.run().unwrap();
        let text = String::from_utf8(session.into_output()).unwrap();

        assert!(text.contains("Every product in the catalog has expired; no order can be opened."));
        assert!(!text.contains("Payment terms"));
        assert!(text.contains("Invalid option 'old yogurt'"));
        assert!(text.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_end_of_input_ends_cleanly() {
        let (closed, text) = play("");
        assert!(closed.is_empty());
        assert!(text.ends_with("Goodbye!\n"));

        // In the middle of an order
        let mut session = session("4\n1\n2\nnotebook\n", quiet_config());
        session.run().unwrap();
        assert!(session.orders().is_empty());
        assert!(session.current_order().is_none());
    }

    #[test]
    fn test_pause_and_clear_screen() {
        let config = CliConfig {
            store_name: "CORNER STORE".to_string(),
            ..CliConfig::default()
        };
        let mut session = session("1\n\n0\n", config);
        session.run().unwrap();
        let text = String::from_utf8(session.into_output()).unwrap();

        assert!(text.starts_with("\x1B[2J\x1B[H"));
        assert!(text.contains("  CORNER STORE\n"));
        assert!(text.contains("Press Enter to continue..."));
        assert!(text.ends_with("Goodbye!\n"));
    }
}
