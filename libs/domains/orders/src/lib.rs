//! Orders domain: purchase records referencing products.
//!
//! An order holds a set of product references; reads render the nested
//! products (through the catalog domain) plus a computed total.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use models::{CreateOrder, Order, OrderResponse, UpdateOrder};
pub use postgres::PgOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
