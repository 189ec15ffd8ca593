//! Catalog domain: categories and products.
//!
//! Products own the only nontrivial contract in the system: title and price
//! validation, a case-insensitive title uniqueness check, and the read/write
//! asymmetry between nested category objects (read) and `category_ids`
//! (write-only).

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use models::{
    Category, CategoryResponse, CreateCategory, CreateProduct, Product, ProductResponse,
    UpdateCategory, UpdateProduct,
};
pub use postgres::{PgCategoryRepository, PgProductRepository};
pub use repository::{
    CategoryRepository, InMemoryCategoryRepository, InMemoryProductRepository, ProductRepository,
};
pub use service::{CategoryService, ProductService};
