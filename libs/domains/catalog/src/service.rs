use axum_helpers::{resolve_offset, PAGE_SIZE};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{field_error, CatalogError, CatalogResult};
use crate::models::{
    Category, CreateCategory, CreateProduct, Product, UpdateCategory, UpdateProduct,
};
use crate::repository::{CategoryRepository, ProductRepository};

/// Service layer for Category business logic
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_category(&self, input: CreateCategory) -> CatalogResult<Category> {
        input.validate().map_err(CatalogError::Validation)?;

        self.repository.insert(Category::new(input)).await
    }

    pub async fn get_category(&self, id: Uuid) -> CatalogResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::CategoryNotFound(id))
    }

    /// List one page of categories, returning the page rows and total count
    pub async fn list_categories(&self, page: u64) -> CatalogResult<(Vec<Category>, u64)> {
        let count = self.repository.count().await?;
        let offset = resolve_offset(page, PAGE_SIZE, count).ok_or(CatalogError::PageNotFound)?;
        let categories = self.repository.list(offset, PAGE_SIZE).await?;
        Ok((categories, count))
    }

    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategory,
    ) -> CatalogResult<Category> {
        input.validate().map_err(CatalogError::Validation)?;

        let mut category = self.get_category(id).await?;
        category.apply_update(input);

        self.repository.update(category).await
    }

    pub async fn delete_category(&self, id: Uuid) -> CatalogResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(CatalogError::CategoryNotFound(id));
        }

        Ok(())
    }
}

/// Service layer for Product business logic.
///
/// Owns the validation ordering of the product contract: field rules first
/// (via `Validate`), then the case-insensitive title uniqueness check, then
/// resolution of `category_ids` against the category store.
#[derive(Clone)]
pub struct ProductService<P: ProductRepository, C: CategoryRepository> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P: ProductRepository, C: CategoryRepository> ProductService<P, C> {
    pub fn new(products: P, categories: C) -> Self {
        Self {
            products: Arc::new(products),
            categories: Arc::new(categories),
        }
    }

    pub async fn create_product(&self, input: CreateProduct) -> CatalogResult<Product> {
        input.validate().map_err(CatalogError::Validation)?;

        // Read-then-write uniqueness check; advisory under concurrent writers
        if self.products.title_exists(&input.title, None).await? {
            return Err(field_error(
                "title",
                "unique",
                "a product with this title already exists.".to_string(),
            ));
        }

        let category_ids = input.category_ids.clone().unwrap_or_default();
        let categories = self.resolve_categories(&category_ids).await?;

        self.products.insert(Product::new(input, categories)).await
    }

    pub async fn get_product(&self, id: Uuid) -> CatalogResult<Product> {
        self.products
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// List one page of products, returning the page rows and total count
    pub async fn list_products(&self, page: u64) -> CatalogResult<(Vec<Product>, u64)> {
        let count = self.products.count().await?;
        let offset = resolve_offset(page, PAGE_SIZE, count).ok_or(CatalogError::PageNotFound)?;
        let products = self.products.list(offset, PAGE_SIZE).await?;
        Ok((products, count))
    }

    /// Partial update. Absent fields keep their values; `category_ids`
    /// present (even empty) replaces the association set wholesale.
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> CatalogResult<Product> {
        input.validate().map_err(CatalogError::Validation)?;

        let mut product = self.get_product(id).await?;

        if let Some(ref title) = input.title {
            if self.products.title_exists(title, Some(id)).await? {
                return Err(field_error(
                    "title",
                    "unique",
                    "a product with this title already exists.".to_string(),
                ));
            }
        }

        let categories = match input.category_ids.clone() {
            Some(ids) => self.resolve_categories(&ids).await?,
            None => product.categories.clone(),
        };

        product.apply_update(input);
        product.categories = categories;

        self.products.update(product).await
    }

    pub async fn delete_product(&self, id: Uuid) -> CatalogResult<()> {
        let deleted = self.products.delete(id).await?;

        if !deleted {
            return Err(CatalogError::ProductNotFound(id));
        }

        Ok(())
    }

    /// Resolve category ids to categories, failing on the `category_ids`
    /// field when any id is unknown. Duplicate ids collapse (set semantics).
    async fn resolve_categories(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut unique: Vec<Uuid> = ids.to_vec();
        unique.sort();
        unique.dedup();

        let categories = self.categories.find_by_ids(&unique).await?;

        if categories.len() != unique.len() {
            let found: HashSet<Uuid> = categories.iter().map(|c| c.id).collect();
            let missing: Vec<String> = unique
                .iter()
                .filter(|id| !found.contains(id))
                .map(|id| id.to_string())
                .collect();

            return Err(field_error(
                "category_ids",
                "does_not_exist",
                format!("invalid category ids: {}", missing.join(", ")),
            ));
        }

        Ok(categories)
    }
}
