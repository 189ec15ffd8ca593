//! SeaORM entities for the catalog tables.
//!
//! The many-to-many between products and categories is an explicit join
//! entity with a composite key, owned by neither side.

pub mod categories;
pub mod product_categories;
pub mod products;
