//! Product catalog module.
//!
//! Products are loaded from the remote API as a whole list and never mutated
//! afterwards; the catalog is replaced wholesale on every load.

pub mod product;

pub use product::{Catalog, Product, ProductList};
