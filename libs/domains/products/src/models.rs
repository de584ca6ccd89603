use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Product entity - a catalog item as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v7, time-ordered)
    pub id: Uuid,
    /// Display name (1-255 characters)
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Unit price with two decimal places, serialized as a string
    #[schema(value_type = String, example = "19.99")]
    pub price: Decimal,
    /// Category name (up to 100 characters)
    pub category: Option<String>,
    /// Quantity in stock
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the product has been soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Price as supplied by a client: either a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(serde_json::Number),
    Text(String),
}

impl PriceInput {
    /// Parse into a decimal. Returns `None` when the value is not numeric.
    pub fn parse(&self) -> Option<Decimal> {
        match self {
            PriceInput::Number(number) => parse_decimal(&number.to_string()),
            PriceInput::Text(text) => parse_decimal(text),
        }
    }
}

impl From<Decimal> for PriceInput {
    fn from(value: Decimal) -> Self {
        PriceInput::Text(value.to_string())
    }
}

impl From<&str> for PriceInput {
    fn from(value: &str) -> Self {
        PriceInput::Text(value.to_string())
    }
}

/// Round to whole cents the way PostgreSQL `numeric(10,2)` does
pub(crate) fn round_to_cents(price: Decimal) -> Decimal {
    let mut rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    /// Number or numeric string, must be greater than zero
    #[schema(value_type = String, example = "19.99")]
    pub price: PriceInput,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Defaults to 0 when omitted
    pub stock: Option<i32>,
}

/// DTO for partially updating a product.
///
/// `description` and `category` accept an explicit `null` to clear the value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[schema(value_type = Option<String>, example = "24.50")]
    pub price: Option<PriceInput>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 100))]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,
    pub stock: Option<i32>,
}

/// Validated insert payload handed to the repository
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub stock: i32,
}

/// Validated set of field changes handed to the repository.
///
/// Only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub category: Option<Option<String>>,
    pub stock: Option<i32>,
}

impl ProductChanges {
    /// Apply the changes to an in-memory product, leaving timestamps untouched
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(ref name) = self.name {
            product.name = name.clone();
        }
        if let Some(ref description) = self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(ref category) = self.category {
            product.category = category.clone();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

/// Listing filters. Every field is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilters {
    /// Exact category match
    pub category: Option<String>,
    /// Inclusive lower price bound
    #[schema(value_type = Option<String>)]
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound
    #[schema(value_type = Option<String>)]
    pub max_price: Option<Decimal>,
    /// When true, only products with stock > 0
    pub in_stock: Option<bool>,
    /// Case-insensitive substring of name or description
    pub search: Option<String>,
}
