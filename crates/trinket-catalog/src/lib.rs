//! # trinket-catalog: Product Catalog for Trinket Shop
//!
//! This crate owns the only file the shop reads: the product catalog.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Trinket Shop Data Flow                            │
//! │                                                                         │
//! │  products.txt                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  trinket-catalog (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    loader     │───►│    Catalog    │    │    error     │  │   │
//! │  │   │ read + parse  │    │ find_by_code  │    │ CatalogError │  │   │
//! │  │   │               │    │ find_by_desc  │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Console menu: list, find, add to order                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trinket_catalog::load_catalog;
//!
//! let catalog = load_catalog("products.txt")?;
//! for product in catalog.products() {
//!     println!("{:02} - {}", product.code, product);
//! }
//! # Ok::<(), trinket_catalog::CatalogError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod loader;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::Catalog;
pub use error::{CatalogError, CatalogResult};
pub use loader::{load_catalog, parse_catalog};
