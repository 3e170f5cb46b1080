use std::collections::HashSet;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

/// Catalog record as it was when a line item was created. Line items keep
/// their own copy; later catalog edits are not reflected in existing carts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub status: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: Uuid,
    pub products: Vec<LineItem>,
    /// Incremented by the store on every successful replace.
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parse a product identifier. The format is checked before any catalog
/// round trip.
pub fn parse_product_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw)
        .map_err(|_| DomainError::InvalidInput(format!("'{}' is not a valid product id", raw)))
}

/// Parse a cart identifier. A malformed id can never name a stored cart, so
/// it is reported as a missing cart rather than a bad argument.
pub fn parse_cart_id(raw: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::CartNotFound(raw.to_string()))
}

impl Cart {
    #[cfg(test)]
    pub fn line_item(&self, product_id: Uuid) -> Option<&LineItem> {
        self.products.iter().find(|l| l.product.id == product_id)
    }

    fn line_item_mut(&mut self, product_id: Uuid) -> Option<&mut LineItem> {
        self.products.iter_mut().find(|l| l.product.id == product_id)
    }

    /// Add one unit of `product`. An existing line item for the same product
    /// is incremented; otherwise a new line item is appended with quantity 1.
    pub fn add_product(&mut self, product: Product) -> Result<(), DomainError> {
        match self.line_item_mut(product.id) {
            Some(line) => {
                line.quantity = line.quantity.checked_add(1).ok_or_else(|| {
                    DomainError::InvalidInput(format!(
                        "quantity of product {} cannot exceed {}",
                        product.id,
                        i32::MAX
                    ))
                })?;
            }
            None => self.products.push(LineItem {
                product,
                quantity: 1,
            }),
        }
        Ok(())
    }

    pub fn set_quantity(&mut self, product_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        if quantity < 1 {
            return Err(DomainError::InvalidInput(format!(
                "quantity must be at least 1, got {}",
                quantity
            )));
        }

        let cart_id = self.id;
        let line = self
            .line_item_mut(product_id)
            .ok_or_else(|| DomainError::LineItemNotFound {
                cart_id: cart_id.to_string(),
                product_id: product_id.to_string(),
            })?;
        line.quantity = quantity;
        Ok(())
    }

    /// Returns `false` when the product was not in the cart.
    pub fn remove_product(&mut self, product_id: Uuid) -> bool {
        let before = self.products.len();
        self.products.retain(|l| l.product.id != product_id);
        self.products.len() != before
    }

    /// Returns `false` when the cart was already empty.
    pub fn clear(&mut self) -> bool {
        if self.products.is_empty() {
            return false;
        }
        self.products.clear();
        true
    }

    /// Overwrite the whole line-item list. Only the payload shape is checked:
    /// quantities must be positive and product ids distinct.
    pub fn replace_products(&mut self, products: Vec<LineItem>) -> Result<(), DomainError> {
        validate_line_items(&products)?;
        self.products = products;
        Ok(())
    }
}

fn validate_line_items(products: &[LineItem]) -> Result<(), DomainError> {
    let mut seen = HashSet::with_capacity(products.len());
    for line in products {
        if line.quantity < 1 {
            return Err(DomainError::InvalidInput(format!(
                "quantity for product {} must be at least 1, got {}",
                line.product.id, line.quantity
            )));
        }
        if !seen.insert(line.product.id) {
            return Err(DomainError::InvalidInput(format!(
                "product {} appears more than once",
                line.product.id
            )));
        }
    }
    Ok(())
}
