use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::cart::Product;
use crate::schema::{carts, products};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = carts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartRow {
    pub id: Uuid,
    pub products: Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = carts)]
pub struct NewCartRow {
    pub id: Uuid,
    pub products: Value,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            title: row.title,
            description: row.description,
            code: row.code,
            price: row.price,
            stock: row.stock,
            category: row.category,
            status: row.status,
        }
    }
}

/// Catalog rows are owned by the catalog subsystem; this shape exists for
/// seeding and tests.
#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: String,
    pub status: bool,
}

impl From<&Product> for NewProductRow {
    fn from(p: &Product) -> Self {
        NewProductRow {
            id: p.id,
            title: p.title.clone(),
            description: p.description.clone(),
            code: p.code.clone(),
            price: p.price.clone(),
            stock: p.stock,
            category: p.category.clone(),
            status: p.status,
        }
    }
}
