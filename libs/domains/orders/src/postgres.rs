use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::{
    entity::{order_products, orders},
    error::{OrderError, OrderResult},
    models::Order,
    repository::OrderRepository,
};

fn db_error(e: impl std::fmt::Display) -> OrderError {
    OrderError::Internal(format!("Database error: {}", e))
}

#[derive(Clone)]
pub struct PgOrderRepository {
    base: BaseRepository<orders::Entity>,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Replace the join rows for an order with exactly its product id set
    async fn sync_products(
        txn: &DatabaseTransaction,
        order_id: Uuid,
        product_ids: &[Uuid],
    ) -> OrderResult<()> {
        order_products::Entity::delete_many()
            .filter(order_products::Column::OrderId.eq(order_id))
            .exec(txn)
            .await
            .map_err(db_error)?;

        if !product_ids.is_empty() {
            let rows: Vec<order_products::ActiveModel> = product_ids
                .iter()
                .map(|product_id| order_products::ActiveModel {
                    order_id: Set(order_id),
                    product_id: Set(*product_id),
                })
                .collect();

            order_products::Entity::insert_many(rows)
                .exec(txn)
                .await
                .map_err(db_error)?;
        }

        Ok(())
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn insert(&self, order: Order) -> OrderResult<Order> {
        let txn = self.base.db().begin().await.map_err(db_error)?;

        let active_model: orders::ActiveModel = order.clone().into();
        active_model.insert(&txn).await.map_err(db_error)?;

        Self::sync_products(&txn, order.id, &order.product_ids).await?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(order_id = %order.id, "Created order");
        Ok(order)
    }

    async fn get_by_id(&self, id: Uuid) -> OrderResult<Option<Order>> {
        let model = self.base.find_by_id(id).await.map_err(db_error)?;

        let model = match model {
            Some(model) => model,
            None => return Ok(None),
        };

        let product_ids: Vec<Uuid> = order_products::Entity::find()
            .filter(order_products::Column::OrderId.eq(id))
            .all(self.base.db())
            .await
            .map_err(db_error)?
            .into_iter()
            .map(|row| row.product_id)
            .collect();

        Ok(Some(model.into_order(product_ids)))
    }

    async fn list(&self, offset: u64, limit: u64) -> OrderResult<Vec<Order>> {
        let models = orders::Entity::find()
            .order_by_asc(orders::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        if models.is_empty() {
            return Ok(Vec::new());
        }

        // One query for the whole page's join rows
        let order_ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let join_rows = order_products::Entity::find()
            .filter(order_products::Column::OrderId.is_in(order_ids))
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        let mut by_order: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for row in join_rows {
            by_order.entry(row.order_id).or_default().push(row.product_id);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let product_ids = by_order.remove(&model.id).unwrap_or_default();
                model.into_order(product_ids)
            })
            .collect())
    }

    async fn count(&self) -> OrderResult<u64> {
        orders::Entity::find()
            .count(self.base.db())
            .await
            .map_err(db_error)
    }

    async fn update(&self, order: Order) -> OrderResult<Order> {
        let txn = self.base.db().begin().await.map_err(db_error)?;

        let active_model: orders::ActiveModel = order.clone().into();
        active_model.update(&txn).await.map_err(db_error)?;

        Self::sync_products(&txn, order.id, &order.product_ids).await?;

        txn.commit().await.map_err(db_error)?;

        tracing::info!(order_id = %order.id, "Updated order");
        Ok(order)
    }

    async fn delete(&self, id: Uuid) -> OrderResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(db_error)?;

        if rows_affected > 0 {
            tracing::info!(order_id = %id, "Deleted order");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
