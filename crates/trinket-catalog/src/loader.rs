//! # Catalog Loader
//!
//! Reads the product catalog from a semicolon-separated text file.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products.txt                                                           │
//! │                                                                         │
//! │  3                                   ← number of product lines          │
//! │  1;Adhesive tape;4.00;0.5            ← kind 1: non-perishable           │
//! │  2;Whole milk;3.20;0.25;31/01/2030   ← kind 2: perishable + expiry      │
//! │  1;Notebook;12,90;0.3                ← comma decimals are fine          │
//! │                                                                         │
//! │  kind;description;cost;margin[;dd/mm/yyyy]                              │
//! │  cost   = decimal amount, at most two decimals                          │
//! │  margin = fraction of cost (0.25 = 25%)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Blank lines are skipped. Products get codes 1, 2, 3... in file order.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use trinket_core::{Money, Product, ProductKind, Rate, DATE_FORMAT};

use crate::catalog::Catalog;
use crate::error::{CatalogError, CatalogResult};

/// Reads and parses a catalog file.
///
/// ## Errors
/// [`CatalogError::Io`] when the file cannot be read, otherwise whatever
/// [`parse_catalog`] reports.
pub fn load_catalog(path: impl AsRef<Path>) -> CatalogResult<Catalog> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading catalog");

    let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&text)?;
    info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Parses catalog text.
///
/// The whole file is rejected on the first bad line; a half-loaded catalog
/// would renumber every product after it.
pub fn parse_catalog(text: &str) -> CatalogResult<Catalog> {
    let text = text.trim_start_matches('\u{feff}');
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let (_, header) = lines.next().ok_or(CatalogError::MissingHeader)?;
    let expected: usize = header.parse().map_err(|_| CatalogError::InvalidCount {
        value: header.to_string(),
    })?;

    // The count comes from the file; don't trust it for the allocation.
    let mut products = Vec::with_capacity(expected.min(1024));
    for (line_no, line) in lines.by_ref().take(expected) {
        let code = products.len() as u32 + 1;
        let product = parse_product(line_no, line, code)?;
        debug!(
            line = line_no,
            code,
            id = %product.id,
            description = %product.description,
            "Parsed product"
        );
        products.push(product);
    }

    if products.len() < expected {
        return Err(CatalogError::Truncated {
            expected,
            found: products.len(),
        });
    }

    let extra = lines.count();
    if extra > 0 {
        warn!(extra, expected, "Ignoring lines after the announced product count");
    }

    Ok(Catalog::new(products))
}

/// Parses one `kind;description;cost;margin[;expiry]` line.
fn parse_product(line_no: usize, line: &str, code: u32) -> CatalogResult<Product> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();

    let (description, cost, margin, kind) = match fields.as_slice() {
        ["1", description, cost, margin] => (*description, *cost, *margin, None),
        ["2", description, cost, margin, expiry] => {
            (*description, *cost, *margin, Some(*expiry))
        }
        ["1", ..] => {
            return Err(CatalogError::invalid_line(
                line_no,
                "non-perishable products take 4 fields: 1;description;cost;margin",
            ))
        }
        ["2", ..] => {
            return Err(CatalogError::invalid_line(
                line_no,
                "perishable products take 5 fields: 2;description;cost;margin;dd/mm/yyyy",
            ))
        }
        [kind, ..] => {
            return Err(CatalogError::UnknownKind {
                line: line_no,
                kind: kind.to_string(),
            })
        }
        [] => return Err(CatalogError::invalid_line(line_no, "empty line")),
    };

    let cost = Money::parse_decimal(cost).map_err(|e| CatalogError::invalid_line(line_no, e))?;
    let margin = Rate::parse_fraction(margin).map_err(|e| CatalogError::invalid_line(line_no, e))?;

    let kind = match kind {
        Some(expiry) => {
            let expires_on = NaiveDate::parse_from_str(expiry, DATE_FORMAT).map_err(|e| {
                CatalogError::invalid_line(line_no, format!("invalid expiry date '{}': {}", expiry, e))
            })?;
            ProductKind::Perishable { expires_on }
        }
        None => ProductKind::NonPerishable,
    };

    Product::new(code, description, cost, margin, kind)
        .map_err(|e| CatalogError::invalid_line(line_no, e))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "3\n\
        1;Adhesive tape;4.00;0.5\n\
        2;Whole milk;3.20;0.25;31/01/2030\n\
        1;Notebook;12,90;0.3\n";

    #[test]
    fn test_parse_sample() {
        let catalog = parse_catalog(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);

        let codes: Vec<u32> = catalog.products().iter().map(|p| p.code).collect();
        assert_eq!(codes, vec![1, 2, 3]);

        let tape = catalog.find_by_code(1).unwrap();
        assert_eq!(tape.cost.cents(), 400);
        assert_eq!(tape.margin.bps(), 5000);
        assert_eq!(tape.base_price().cents(), 600);

        let milk = catalog.find_by_code(2).unwrap();
        assert_eq!(
            milk.kind,
            ProductKind::Perishable {
                expires_on: NaiveDate::from_ymd_opt(2030, 1, 31).unwrap()
            }
        );

        assert_eq!(catalog.find_by_code(3).unwrap().cost.cents(), 1290);
    }

    #[test]
    fn test_blank_lines_and_bom_are_ignored() {
        let text = "\u{feff}2\n\n1;Pencil;1.00;0.1\n   \n1;Eraser;0.50;0.2\n";
        let catalog = parse_catalog(text).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find_by_code(2).unwrap().description, "Eraser");
    }

    #[test]
    fn test_extra_lines_are_ignored() {
        let catalog = parse_catalog("1\n1;Pencil;1.00;0.1\n1;Eraser;0.50;0.2\n").unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse_catalog(""), Err(CatalogError::MissingHeader)));
        assert!(matches!(parse_catalog("\n\n"), Err(CatalogError::MissingHeader)));
    }

    #[test]
    fn test_invalid_count() {
        assert!(matches!(
            parse_catalog("three\n"),
            Err(CatalogError::InvalidCount { value }) if value == "three"
        ));
    }

    #[test]
    fn test_truncated() {
        assert!(matches!(
            parse_catalog("3\n1;Pencil;1.00;0.1\n"),
            Err(CatalogError::Truncated { expected: 3, found: 1 })
        ));
    }

    #[test]
    fn test_bad_lines() {
        assert!(matches!(
            parse_catalog("1\n3;Pencil;1.00;0.1\n"),
            Err(CatalogError::UnknownKind { line: 2, kind }) if kind == "3"
        ));
        assert!(matches!(
            parse_catalog("1\n1;Pencil;1.00\n"),
            Err(CatalogError::InvalidLine { line: 2, .. })
        ));
        assert!(matches!(
            parse_catalog("1\n2;Milk;1.00;0.1\n"),
            Err(CatalogError::InvalidLine { line: 2, .. })
        ));
        assert!(matches!(
            parse_catalog("1\n2;Milk;1.00;0.1;2030-01-31\n"),
            Err(CatalogError::InvalidLine { line: 2, .. })
        ));
        assert!(matches!(
            parse_catalog("1\n1;Pencil;abc;0.1\n"),
            Err(CatalogError::InvalidLine { line: 2, .. })
        ));
        // Description too short
        assert!(matches!(
            parse_catalog("1\n1;Pe;1.00;0.1\n"),
            Err(CatalogError::InvalidLine { line: 2, .. })
        ));
    }

    #[test]
    fn test_oversized_amounts_are_rejected() {
        assert!(matches!(
            parse_catalog("1\n1;Huge item;90000000000000000;0.5\n"),
            Err(CatalogError::InvalidLine { line: 2, .. })
        ));
        assert!(matches!(
            parse_catalog("1\n1;Greedy item;1.00;429496.0\n"),
            Err(CatalogError::InvalidLine { line: 2, .. })
        ));

        // The largest accepted product still prices without overflow
        let catalog = parse_catalog("1\n1;Yacht;10000000.00;10\n").unwrap();
        assert_eq!(catalog.products()[0].base_price().cents(), 11_000_000_000);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let path = std::env::temp_dir().join(format!("trinket-catalog-{}.txt", std::process::id()));
        fs::write(&path, SAMPLE).unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog("/definitely/not/here/products.txt").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
