use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::ProductResult,
    filter::ProductPredicate,
    models::{NewProduct, Product, ProductChanges, ProductFilters},
    pagination::{PaginatedResult, PaginationParams},
    repository::ProductRepository,
};

/// PostgreSQL-backed ProductRepository.
///
/// Holds a pooled connection handle, so cloning is cheap.
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = %model.id, "Created product");
        Ok(model.into())
    }

    async fn find_all(
        &self,
        filters: ProductFilters,
        pagination: PaginationParams,
    ) -> ProductResult<PaginatedResult<Product>> {
        let condition = ProductPredicate::from_filters(&filters).to_condition();

        // Count and page are separate round-trips; concurrent writes may skew `total`
        let total = entity::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        let models = entity::Entity::find()
            .filter(condition)
            .order_by_asc(entity::Column::CreatedAt)
            .order_by_asc(entity::Column::Id)
            .limit(pagination.limit)
            .offset(pagination.offset())
            .all(&self.db)
            .await?;

        let products = models.into_iter().map(Product::from).collect();
        Ok(PaginatedResult::new(products, pagination, total))
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?;

        Ok(model.map(Product::from))
    }

    async fn update(&self, id: Uuid, changes: ProductChanges) -> ProductResult<Option<Product>> {
        let txn = self.db.begin().await?;

        let Some(model) = entity::Entity::find_by_id(id)
            .filter(entity::Column::DeletedAt.is_null())
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        let mut active_model: entity::ActiveModel = model.into();
        changes.apply_to_active(&mut active_model);
        active_model.updated_at = sea_orm::ActiveValue::Set(chrono::Utc::now().into());

        let updated = active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();

        let result = entity::Entity::update_many()
            .col_expr(entity::Column::DeletedAt, Expr::value(now))
            .col_expr(entity::Column::UpdatedAt, Expr::value(now))
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::DeletedAt.is_null())
            .exec(&self.db)
            .await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
