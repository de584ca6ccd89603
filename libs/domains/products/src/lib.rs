//! Products Domain
//!
//! Catalog products with soft delete, filtered listing and pagination.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelopes
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Use cases  │  ← Business rules (price, stock, pagination)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductRepository, ProductUseCases};
//!
//! let repository = InMemoryProductRepository::new();
//! let use_cases = ProductUseCases::new(repository);
//!
//! let router = handlers::router(use_cases);
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod repository;
pub mod use_cases;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use filter::{ProductCondition, ProductPredicate};
pub use models::{
    CreateProduct, NewProduct, PriceInput, Product, ProductChanges, ProductFilters, UpdateProduct,
};
pub use pagination::{PaginatedResult, PaginationParams};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use use_cases::{
    CreateProductUseCase, DeleteProductUseCase, GetProductByIdUseCase, GetProductsUseCase,
    ProductUseCases, UpdateProductUseCase,
};
