use std::sync::Arc;
use validator::Validate;

use super::rules::{check_stock, parse_price};
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, NewProduct, Product};
use crate::repository::ProductRepository;

pub struct CreateProductUseCase<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> CreateProductUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate the payload and insert a new product. Stock defaults to 0.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn execute(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let price = parse_price(&input.price)?;
        let stock = check_stock(input.stock.unwrap_or(0))?;

        self.repository
            .create(NewProduct {
                name: input.name,
                description: input.description,
                price,
                category: input.category,
                stock,
            })
            .await
    }
}
