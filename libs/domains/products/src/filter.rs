//! Typed filter predicates shared by every repository implementation.
//!
//! A [`ProductPredicate`] is an explicit list of conditions that always starts
//! with [`ProductCondition::NotDeleted`]. It renders to a parameter-bound
//! sea-orm [`Condition`] for PostgreSQL and evaluates directly against a
//! [`Product`] for the in-memory store.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, Condition};

use crate::entity;
use crate::models::{Product, ProductFilters};

/// A single constraint on a product row
#[derive(Debug, Clone, PartialEq)]
pub enum ProductCondition {
    NotDeleted,
    CategoryEquals(String),
    PriceAtLeast(Decimal),
    PriceAtMost(Decimal),
    InStock,
    /// Case-insensitive substring over name OR description
    TextSearch(String),
}

impl ProductCondition {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductCondition::NotDeleted => product.deleted_at.is_none(),
            ProductCondition::CategoryEquals(category) => {
                product.category.as_deref() == Some(category.as_str())
            }
            ProductCondition::PriceAtLeast(min) => product.price >= *min,
            ProductCondition::PriceAtMost(max) => product.price <= *max,
            ProductCondition::InStock => product.stock > 0,
            ProductCondition::TextSearch(term) => {
                let needle = term.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
        }
    }

    fn add_to(&self, condition: Condition) -> Condition {
        use sea_orm::sea_query::extension::postgres::PgExpr;

        match self {
            ProductCondition::NotDeleted => condition.add(entity::Column::DeletedAt.is_null()),
            ProductCondition::CategoryEquals(category) => {
                condition.add(entity::Column::Category.eq(category.as_str()))
            }
            ProductCondition::PriceAtLeast(min) => condition.add(entity::Column::Price.gte(*min)),
            ProductCondition::PriceAtMost(max) => condition.add(entity::Column::Price.lte(*max)),
            ProductCondition::InStock => condition.add(entity::Column::Stock.gt(0)),
            ProductCondition::TextSearch(term) => {
                let pattern = contains_pattern(term);
                condition.add(
                    Condition::any()
                        .add(Expr::col(entity::Column::Name).ilike(pattern.clone()))
                        .add(Expr::col(entity::Column::Description).ilike(pattern)),
                )
            }
        }
    }
}

/// Conjunction of [`ProductCondition`]s
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPredicate {
    conditions: Vec<ProductCondition>,
}

impl ProductPredicate {
    /// Predicate matching every live (not soft-deleted) product
    pub fn live() -> Self {
        Self {
            conditions: vec![ProductCondition::NotDeleted],
        }
    }

    pub fn and(mut self, condition: ProductCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Build from listing filters. Empty `category`/`search` and
    /// `inStock = false` add nothing.
    pub fn from_filters(filters: &ProductFilters) -> Self {
        let mut predicate = Self::live();

        if let Some(category) = filters.category.as_deref().filter(|c| !c.is_empty()) {
            predicate = predicate.and(ProductCondition::CategoryEquals(category.to_string()));
        }
        if let Some(min) = filters.min_price {
            predicate = predicate.and(ProductCondition::PriceAtLeast(min));
        }
        if let Some(max) = filters.max_price {
            predicate = predicate.and(ProductCondition::PriceAtMost(max));
        }
        if filters.in_stock == Some(true) {
            predicate = predicate.and(ProductCondition::InStock);
        }
        if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
            predicate = predicate.and(ProductCondition::TextSearch(search.to_string()));
        }

        predicate
    }

    pub fn conditions(&self) -> &[ProductCondition] {
        &self.conditions
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.conditions.iter().all(|c| c.matches(product))
    }

    pub fn to_condition(&self) -> Condition {
        self.conditions
            .iter()
            .fold(Condition::all(), |condition, c| c.add_to(condition))
    }
}

/// `%term%` with LIKE metacharacters escaped (PostgreSQL's default escape is `\`)
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}
