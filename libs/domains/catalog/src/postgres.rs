use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    LoaderTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{categories, product_categories, products},
    error::{CatalogError, CatalogResult},
    models::{Category, Product},
    repository::{CategoryRepository, ProductRepository},
};

fn db_error(e: impl std::fmt::Display) -> CatalogError {
    CatalogError::Internal(format!("Database error: {}", e))
}

#[derive(Clone)]
pub struct PgCategoryRepository {
    base: BaseRepository<categories::Entity>,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn insert(&self, category: Category) -> CatalogResult<Category> {
        let active_model: categories::ActiveModel = category.into();

        let model = self.base.insert(active_model).await.map_err(db_error)?;

        tracing::info!(category_id = %model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        let model = self.base.find_by_id(id).await.map_err(db_error)?;
        Ok(model.map(|m| m.into()))
    }

    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(&self) -> CatalogResult<u64> {
        categories::Entity::find()
            .count(self.base.db())
            .await
            .map_err(db_error)
    }

    async fn update(&self, category: Category) -> CatalogResult<Category> {
        let active_model: categories::ActiveModel = category.into();

        let model = self.base.update(active_model).await.map_err(db_error)?;

        tracing::info!(category_id = %model.id, "Updated category");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(db_error)?;

        if rows_affected > 0 {
            tracing::info!(category_id = %id, "Deleted category");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> CatalogResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = categories::Entity::find()
            .filter(categories::Column::Id.is_in(ids.iter().copied()))
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

#[derive(Clone)]
pub struct PgProductRepository {
    base: BaseRepository<products::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Replace the join rows for a product with exactly its category set
    async fn sync_categories(
        txn: &DatabaseTransaction,
        product_id: Uuid,
        category_ids: &[Uuid],
    ) -> CatalogResult<()> {
        product_categories::Entity::delete_many()
            .filter(product_categories::Column::ProductId.eq(product_id))
            .exec(txn)
            .await
            .map_err(db_error)?;

        if !category_ids.is_empty() {
            let rows: Vec<product_categories::ActiveModel> = category_ids
                .iter()
                .map(|category_id| product_categories::ActiveModel {
                    product_id: Set(product_id),
                    category_id: Set(*category_id),
                })
                .collect();

            product_categories::Entity::insert_many(rows)
                .exec(txn)
                .await
                .map_err(db_error)?;
        }

        Ok(())
    }

    /// Hydrate categories for a page of product rows in one extra query
    async fn hydrate(&self, models: Vec<products::Model>) -> CatalogResult<Vec<Product>> {
        let related = models
            .load_many_to_many(
                categories::Entity,
                product_categories::Entity,
                self.base.db(),
            )
            .await
            .map_err(db_error)?;

        Ok(models
            .into_iter()
            .zip(related)
            .map(|(model, mut cats)| {
                cats.sort_by(|a, b| a.title.cmp(&b.title));
                model.into_product(cats)
            })
            .collect())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        let txn = self.base.db().begin().await.map_err(db_error)?;

        let active_model: products::ActiveModel = product.clone().into();
        active_model.insert(&txn).await.map_err(db_error)?;

        let category_ids: Vec<Uuid> = product.categories.iter().map(|c| c.id).collect();
        Self::sync_categories(&txn, product.id, &category_ids).await?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        let model = self.base.find_by_id(id).await.map_err(db_error)?;

        let model = match model {
            Some(model) => model,
            None => return Ok(None),
        };

        let mut cats = model
            .find_related(categories::Entity)
            .all(self.base.db())
            .await
            .map_err(db_error)?;
        cats.sort_by(|a, b| a.title.cmp(&b.title));

        Ok(Some(model.into_product(cats)))
    }

    async fn list(&self, offset: u64, limit: u64) -> CatalogResult<Vec<Product>> {
        let models = products::Entity::find()
            .order_by_asc(products::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        self.hydrate(models).await
    }

    async fn count(&self) -> CatalogResult<u64> {
        products::Entity::find()
            .count(self.base.db())
            .await
            .map_err(db_error)
    }

    async fn update(&self, product: Product) -> CatalogResult<Product> {
        let txn = self.base.db().begin().await.map_err(db_error)?;

        let active_model: products::ActiveModel = product.clone().into();
        active_model.update(&txn).await.map_err(db_error)?;

        let category_ids: Vec<Uuid> = product.categories.iter().map(|c| c.id).collect();
        Self::sync_categories(&txn, product.id, &category_ids).await?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(product_id = %product.id, "Updated product");
        Ok(product)
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(db_error)?;

        if rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn title_exists(&self, title: &str, exclude: Option<Uuid>) -> CatalogResult<bool> {
        // Explicit lower(title) predicate; backed by idx_products_title_lower
        let mut query = products::Entity::find().filter(
            Expr::expr(Func::lower(Expr::col(products::Column::Title)))
                .eq(title.to_lowercase()),
        );

        if let Some(id) = exclude {
            query = query.filter(products::Column::Id.ne(id));
        }

        let count = query.count(self.base.db()).await.map_err(db_error)?;
        Ok(count > 0)
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> CatalogResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = products::Entity::find()
            .filter(products::Column::Id.is_in(ids.iter().copied()))
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        self.hydrate(models).await
    }
}
