pub use sea_orm_migration::prelude::*;

mod m20260615_000000_bootstrap;
mod m20260615_000001_create_users;
mod m20260615_000002_create_categories;
mod m20260615_000003_create_products;
mod m20260615_000004_create_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260615_000000_bootstrap::Migration),
            Box::new(m20260615_000001_create_users::Migration),
            Box::new(m20260615_000002_create_categories::Migration),
            Box::new(m20260615_000003_create_products::Migration),
            Box::new(m20260615_000004_create_orders::Migration),
        ]
    }
}
