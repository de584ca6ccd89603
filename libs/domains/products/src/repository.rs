use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::filter::ProductPredicate;
use crate::models::{NewProduct, Product, ProductChanges, ProductFilters, round_to_cents};
use crate::pagination::{PaginatedResult, PaginationParams};

/// Repository trait for Product persistence.
///
/// Every read and write only ever sees live rows; soft-deleted rows behave as
/// if they did not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new live product
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    /// One page of live products matching all filters, oldest first
    async fn find_all(
        &self,
        filters: ProductFilters,
        pagination: PaginationParams,
    ) -> ProductResult<PaginatedResult<Product>>;

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Apply field changes and refresh `updated_at`. `None` when no live row has this id.
    async fn update(&self, id: Uuid, changes: ProductChanges) -> ProductResult<Option<Product>>;

    /// Soft-delete. `false` when no live row has this id.
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Look up a row regardless of its deleted state
    pub async fn raw_get(&self, id: Uuid) -> Option<Product> {
        self.products.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: round_to_cents(input.price),
            category: input.category,
            stock: input.stock,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.products
            .write()
            .await
            .insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn find_all(
        &self,
        filters: ProductFilters,
        pagination: PaginationParams,
    ) -> ProductResult<PaginatedResult<Product>> {
        let predicate = ProductPredicate::from_filters(&filters);
        let products = self.products.read().await;

        let mut matching: Vec<&Product> =
            products.values().filter(|p| predicate.matches(p)).collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        let total = matching.len() as u64;
        let page: Vec<Product> = matching
            .into_iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.limit as usize)
            .cloned()
            .collect();

        Ok(PaginatedResult::new(page, pagination, total))
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).filter(|p| !p.is_deleted()).cloned())
    }

    async fn update(&self, id: Uuid, changes: ProductChanges) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.get_mut(&id).filter(|p| !p.is_deleted()) else {
            return Ok(None);
        };

        let changes = ProductChanges {
            price: changes.price.map(round_to_cents),
            ..changes
        };
        changes.apply_to(product);
        product.updated_at = Utc::now();

        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        match products.get_mut(&id).filter(|p| !p.is_deleted()) {
            Some(product) => {
                let now = Utc::now();
                product.deleted_at = Some(now);
                product.updated_at = now;

                tracing::info!(product_id = %id, "Deleted product");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
