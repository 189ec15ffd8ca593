//! SeaORM entities for the order tables.
//!
//! `order_products` is an explicit join relation to the catalog's products
//! table; product rows themselves are read through the catalog domain.

pub mod order_products;
pub mod orders;
