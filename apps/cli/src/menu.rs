//! Main menu options.

use std::fmt;
use std::io::{self, Write};

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    ListProducts,
    FindByCode,
    FindByDescription,
    OpenOrder,
    CloseOrder,
    ListFirstOrders,
    AverageOfFirstOrders,
    FirstOrdersAbove,
    FirstOrdersWithProduct,
    Exit,
}

impl MenuOption {
    /// Options in display order.
    pub const ALL: [MenuOption; 10] = [
        MenuOption::ListProducts,
        MenuOption::FindByCode,
        MenuOption::FindByDescription,
        MenuOption::OpenOrder,
        MenuOption::CloseOrder,
        MenuOption::ListFirstOrders,
        MenuOption::AverageOfFirstOrders,
        MenuOption::FirstOrdersAbove,
        MenuOption::FirstOrdersWithProduct,
        MenuOption::Exit,
    ];

    /// Number typed to pick this option.
    pub const fn key(&self) -> u8 {
        match self {
            MenuOption::ListProducts => 1,
            MenuOption::FindByCode => 2,
            MenuOption::FindByDescription => 3,
            MenuOption::OpenOrder => 4,
            MenuOption::CloseOrder => 5,
            MenuOption::ListFirstOrders => 6,
            MenuOption::AverageOfFirstOrders => 7,
            MenuOption::FirstOrdersAbove => 8,
            MenuOption::FirstOrdersWithProduct => 9,
            MenuOption::Exit => 0,
        }
    }

    /// Parses a menu choice as typed by the user.
    pub fn from_input(input: &str) -> Option<MenuOption> {
        let key: u8 = input.trim().parse().ok()?;
        Self::ALL.into_iter().find(|option| option.key() == key)
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuOption::ListProducts => "List products",
            MenuOption::FindByCode => "Find product by code",
            MenuOption::FindByDescription => "Find product by description",
            MenuOption::OpenOrder => "Open a new order",
            MenuOption::CloseOrder => "Close the current order",
            MenuOption::ListFirstOrders => "Products of the first N orders",
            MenuOption::AverageOfFirstOrders => "Average total of the first N orders",
            MenuOption::FirstOrdersAbove => "First N orders above an amount",
            MenuOption::FirstOrdersWithProduct => "First N orders with a product",
            MenuOption::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// Draws the menu with the store name as header.
pub fn write_menu<W: Write>(out: &mut W, store_name: &str) -> io::Result<()> {
    let rule = "=".repeat(44);
    writeln!(out, "{}", rule)?;
    writeln!(out, "  {}", store_name)?;
    writeln!(out, "{}", rule)?;
    for option in MenuOption::ALL {
        writeln!(out, " {} - {}", option.key(), option)?;
    }
    writeln!(out, "{}", rule)
}
