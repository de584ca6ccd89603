use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;
use crate::repository::ProductRepository;

pub struct GetProductByIdUseCase<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> GetProductByIdUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}
