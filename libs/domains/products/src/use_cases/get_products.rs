use std::sync::Arc;

use crate::error::ProductResult;
use crate::models::{Product, ProductFilters};
use crate::pagination::{PaginatedResult, PaginationParams};
use crate::repository::ProductRepository;

pub struct GetProductsUseCase<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> GetProductsUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// List live products. Out-of-range `page`/`limit` are normalized, never rejected.
    #[tracing::instrument(skip(self))]
    pub async fn execute(
        &self,
        filters: ProductFilters,
        page: i64,
        limit: i64,
    ) -> ProductResult<PaginatedResult<Product>> {
        let pagination = PaginationParams::normalized(page, limit);
        self.repository.find_all(filters, pagination).await
    }
}
