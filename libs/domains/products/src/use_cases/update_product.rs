use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use super::rules::{check_stock, parse_price};
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductChanges, UpdateProduct};
use crate::repository::ProductRepository;

pub struct UpdateProductUseCase<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> UpdateProductUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Apply a partial update. Price and stock follow the same rules as on create.
    #[tracing::instrument(skip(self, input))]
    pub async fn execute(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let changes = ProductChanges {
            price: input.price.as_ref().map(parse_price).transpose()?,
            stock: input.stock.map(check_stock).transpose()?,
            name: input.name,
            description: input.description,
            category: input.category,
        };

        self.repository
            .update(id, changes)
            .await?
            .ok_or(ProductError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceInput;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use mockall::predicate;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_update_passes_only_supplied_fields() {
        let mut mock_repo = MockProductRepository::new();
        let id = Uuid::now_v7();
        let expected = ProductChanges {
            price: Some(Decimal::new(250, 2)),
            category: Some(None),
            ..Default::default()
        };

        mock_repo
            .expect_update()
            .with(predicate::eq(id), predicate::eq(expected))
            .times(1)
            .returning(|id, _| {
                let now = Utc::now();
                Ok(Some(Product {
                    id,
                    name: "Apple".to_string(),
                    description: None,
                    price: Decimal::new(250, 2),
                    category: None,
                    stock: 1,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                }))
            });

        let use_case = UpdateProductUseCase::new(Arc::new(mock_repo));
        let input = UpdateProduct {
            price: Some(PriceInput::from("2.50")),
            category: Some(None),
            ..Default::default()
        };

        let product = use_case.execute(id, input).await.unwrap();
        assert_eq!(product.price, Decimal::new(250, 2));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_update().returning(|_, _| Ok(None));

        let use_case = UpdateProductUseCase::new(Arc::new(mock_repo));
        let id = Uuid::now_v7();
        let result = use_case
            .execute(
                id,
                UpdateProduct {
                    name: Some("Pear".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::NotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_values_without_writing() {
        let invalid = [
            UpdateProduct {
                price: Some(PriceInput::from("-3")),
                ..Default::default()
            },
            UpdateProduct {
                stock: Some(-1),
                ..Default::default()
            },
            UpdateProduct {
                name: Some(String::new()),
                ..Default::default()
            },
        ];

        for input in invalid {
            let mut mock_repo = MockProductRepository::new();
            mock_repo.expect_update().never();

            let use_case = UpdateProductUseCase::new(Arc::new(mock_repo));
            let result = use_case.execute(Uuid::now_v7(), input).await;

            assert!(matches!(result, Err(ProductError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_update_keeps_price_when_new_one_rounds_to_zero() {
        let repository = Arc::new(crate::InMemoryProductRepository::new());
        let created = repository
            .create(crate::models::NewProduct {
                name: "Apple".to_string(),
                description: None,
                price: Decimal::new(100, 2),
                category: None,
                stock: 1,
            })
            .await
            .unwrap();

        let use_case = UpdateProductUseCase::new(repository.clone());
        let result = use_case
            .execute(
                created.id,
                UpdateProduct {
                    price: Some(PriceInput::from("0.001")),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::Validation(_))));
        let stored = repository.raw_get(created.id).await.unwrap();
        assert_eq!(stored.price, Decimal::new(100, 2));
    }
}
