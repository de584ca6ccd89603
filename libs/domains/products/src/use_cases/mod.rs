//! Application use cases, one struct per operation.
//!
//! Each use case owns an `Arc` of the repository so they can share one store.

mod create_product;
mod delete_product;
mod get_product_by_id;
mod get_products;
pub(crate) mod rules;
mod update_product;

pub use create_product::CreateProductUseCase;
pub use delete_product::DeleteProductUseCase;
pub use get_product_by_id::GetProductByIdUseCase;
pub use get_products::GetProductsUseCase;
pub use rules::{INVALID_PRICE, NEGATIVE_STOCK};
pub use update_product::UpdateProductUseCase;

use std::sync::Arc;

use crate::repository::ProductRepository;

/// All product use cases over a single shared repository
pub struct ProductUseCases<R: ProductRepository> {
    pub create: CreateProductUseCase<R>,
    pub get_by_id: GetProductByIdUseCase<R>,
    pub list: GetProductsUseCase<R>,
    pub update: UpdateProductUseCase<R>,
    pub delete: DeleteProductUseCase<R>,
}

impl<R: ProductRepository> ProductUseCases<R> {
    pub fn new(repository: R) -> Self {
        Self::from_shared(Arc::new(repository))
    }

    pub fn from_shared(repository: Arc<R>) -> Self {
        Self {
            create: CreateProductUseCase::new(Arc::clone(&repository)),
            get_by_id: GetProductByIdUseCase::new(Arc::clone(&repository)),
            list: GetProductsUseCase::new(Arc::clone(&repository)),
            update: UpdateProductUseCase::new(Arc::clone(&repository)),
            delete: DeleteProductUseCase::new(repository),
        }
    }
}
