use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{Category, Product};

#[cfg(test)]
use mockall::automock;

/// Repository trait for Category persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist a new category
    async fn insert(&self, category: Category) -> CatalogResult<Category>;

    /// Get a category by ID
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    /// List categories in stable id order
    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<Vec<Category>>;

    /// Total number of categories
    async fn count(&self) -> CatalogResult<u64>;

    /// Persist changes to an existing category
    async fn update(&self, category: Category) -> CatalogResult<Category>;

    /// Delete a category by ID; product associations simply drop
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Resolve a set of category ids (missing ids are absent from the result)
    async fn find_by_ids(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>>;
}

/// Repository trait for Product persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product together with its category associations
    async fn insert(&self, product: Product) -> CatalogResult<Product>;

    /// Get a product by ID with categories hydrated
    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    /// List products in stable id order with categories hydrated
    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<Vec<Product>>;

    /// Total number of products
    async fn count(&self) -> CatalogResult<u64>;

    /// Persist changes to an existing product; the category association set
    /// is replaced with exactly `product.categories`
    async fn update(&self, product: Product) -> CatalogResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    /// Case-insensitive title existence check, optionally excluding one
    /// record (the record being updated)
    async fn title_exists(&self, title: &str, exclude: Option<Uuid>) -> CatalogResult<bool>;

    /// Resolve a set of product ids with categories hydrated
    async fn find_by_ids(&self, ids: &[Uuid]) -> CatalogResult<Vec<Product>>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, category: Category) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        categories.insert(category.id, category.clone());

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<Vec<Category>> {
        let categories = self.categories.read().await;

        let mut result: Vec<Category> = categories.values().cloned().collect();
        result.sort_by_key(|c| c.id);

        Ok(result
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self) -> CatalogResult<u64> {
        Ok(self.categories.read().await.len() as u64)
    }

    async fn update(&self, category: Category) -> CatalogResult<Category> {
        let mut categories = self.categories.write().await;
        categories.insert(category.id, category.clone());

        tracing::info!(category_id = %category.id, "Updated category");
        Ok(category)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut categories = self.categories.write().await;

        if categories.remove(&id).is_some() {
            tracing::info!(category_id = %id, "Deleted category");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| categories.get(id).cloned())
            .collect())
    }
}

/// Stored form of a product: scalars plus the association id set. Categories
/// are re-hydrated on read so category edits and deletes show through.
#[derive(Debug, Clone)]
struct ProductRow {
    product: Product,
    category_ids: Vec<Uuid>,
}

/// In-memory implementation of ProductRepository (for development/testing).
///
/// Shares the category map of the [`InMemoryCategoryRepository`] it is built
/// from, mirroring the join-table hydration of the PostgreSQL implementation.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, ProductRow>>>,
    categories: InMemoryCategoryRepository,
}

impl InMemoryProductRepository {
    pub fn new(categories: InMemoryCategoryRepository) -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            categories,
        }
    }

    async fn hydrate(&self, row: ProductRow) -> Product {
        let categories = self.categories.categories.read().await;

        let mut product = row.product;
        product.categories = row
            .category_ids
            .iter()
            .filter_map(|id| categories.get(id).cloned())
            .collect();
        product.categories.sort_by(|a, b| a.title.cmp(&b.title));
        product
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        let row = ProductRow {
            category_ids: product.categories.iter().map(|c| c.id).collect(),
            product: product.clone(),
        };

        let mut products = self.products.write().await;
        products.insert(product.id, row);

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let row = {
            let products = self.products.read().await;
            products.get(&id).cloned()
        };

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await)),
            None => Ok(None),
        }
    }

    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<Vec<Product>> {
        let rows = {
            let products = self.products.read().await;
            let mut rows: Vec<ProductRow> = products.values().cloned().collect();
            rows.sort_by_key(|r| r.product.id);
            rows
        };

        let mut result = Vec::new();
        for row in rows
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
        {
            result.push(self.hydrate(row).await);
        }

        Ok(result)
    }

    async fn count(&self) -> CatalogResult<u64> {
        Ok(self.products.read().await.len() as u64)
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let row = ProductRow {
            category_ids: product.categories.iter().map(|c| c.id).collect(),
            product: product.clone(),
        };

        let mut products = self.products.write().await;
        products.insert(product.id, row);

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn title_exists(&self, title: &str, exclude: Option<Uuid>) -> CatalogResult<bool> {
        let products = self.products.read().await;
        let needle = title.to_lowercase();

        Ok(products.values().any(|row| {
            exclude != Some(row.product.id) && row.product.title.to_lowercase() == needle
        }))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> CatalogResult<Vec<Product>> {
        let rows: Vec<ProductRow> = {
            let products = self.products.read().await;
            ids.iter()
                .filter_map(|id| products.get(id).cloned())
                .collect()
        };

        let mut result = Vec::new();
        for row in rows {
            result.push(self.hydrate(row).await);
        }

        Ok(result)
    }
}
