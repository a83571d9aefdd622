//! # Catalog
//!
//! The in-memory list of products loaded at startup, with the two lookups
//! the console offers: by code and by description.

use trinket_core::validation::validate_search_query;
use trinket_core::Product;

/// Products available for sale, in file order.
///
/// ## Usage
/// ```rust
/// use trinket_catalog::parse_catalog;
///
/// let catalog = parse_catalog("1\n1;Adhesive tape;4.00;0.5\n").unwrap();
/// let tape = catalog.find_by_description("ADHESIVE TAPE").unwrap();
/// assert_eq!(tape.code, 1);
/// assert!(catalog.find_by_code(2).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wraps already-validated products.
    pub fn new(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// All products in file order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks a product up by its catalog code.
    pub fn find_by_code(&self, code: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    /// Looks a product up by its full description.
    ///
    /// Surrounding whitespace and letter case are ignored; partial names do
    /// not match.
    pub fn find_by_description(&self, description: &str) -> Option<&Product> {
        let wanted = validate_search_query(description).ok()?.to_lowercase();
        self.products
            .iter()
            .find(|p| p.description.to_lowercase() == wanted)
    }
}
