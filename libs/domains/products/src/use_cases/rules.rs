use rust_decimal::Decimal;

use crate::error::{ProductError, ProductResult};
use crate::models::{PriceInput, round_to_cents};

pub const INVALID_PRICE: &str = "Price must be a valid number greater than 0";
pub const PRICE_TOO_LARGE: &str = "Price must be less than 100000000";
pub const NEGATIVE_STOCK: &str = "Quantity in stock cannot be negative";

/// Largest value a `numeric(10,2)` column holds
const MAX_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Parse and round to cents. The stored value must stay above zero and
/// within `numeric(10,2)`.
pub(crate) fn parse_price(input: &PriceInput) -> ProductResult<Decimal> {
    let price = input
        .parse()
        .map(round_to_cents)
        .filter(|price| *price > Decimal::ZERO)
        .ok_or_else(|| ProductError::Validation(INVALID_PRICE.to_string()))?;

    if price > MAX_PRICE {
        return Err(ProductError::Validation(PRICE_TOO_LARGE.to_string()));
    }
    Ok(price)
}

pub(crate) fn check_stock(stock: i32) -> ProductResult<i32> {
    if stock < 0 {
        return Err(ProductError::Validation(NEGATIVE_STOCK.to_string()));
    }
    Ok(stock)
}
