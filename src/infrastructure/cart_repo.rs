use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::{run_blocking, DbPool};
use crate::domain::cart::{Cart, LineItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartStore, WriteOutcome};
use crate::schema::carts;

use super::models::{CartRow, NewCartRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Internal(format!("malformed cart document: {}", e))
    }
}

fn into_cart(row: CartRow) -> Result<Cart, DomainError> {
    let products: Vec<LineItem> = serde_json::from_value(row.products)?;
    Ok(Cart {
        id: row.id,
        products,
        version: row.version,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Carts stored as one row each, with the line items in a JSONB document.
pub struct DieselCartStore {
    pool: DbPool,
}

impl DieselCartStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for DieselCartStore {
    async fn insert(&self, products: Vec<LineItem>) -> Result<Uuid, DomainError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get()?;
            let cart_id = Uuid::new_v4();
            diesel::insert_into(carts::table)
                .values(&NewCartRow {
                    id: cart_id,
                    products: serde_json::to_value(&products)?,
                })
                .execute(&mut conn)?;
            Ok(cart_id)
        })
        .await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, DomainError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get()?;
            let row = carts::table
                .find(id)
                .select(CartRow::as_select())
                .first(&mut conn)
                .optional()?;
            row.map(into_cart).transpose()
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<Cart>, DomainError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get()?;
            carts::table
                .select(CartRow::as_select())
                .order(carts::created_at.asc())
                .load(&mut conn)?
                .into_iter()
                .map(into_cart)
                .collect()
        })
        .await
    }

    async fn replace(&self, cart: &Cart) -> Result<WriteOutcome, DomainError> {
        let pool = self.pool.clone();
        let id = cart.id;
        let expected = cart.version;
        let products = serde_json::to_value(&cart.products)?;

        run_blocking(move || {
            let mut conn = pool.get()?;
            conn.transaction::<_, DomainError, _>(|conn| {
                // Compare-and-swap on the version column.
                let updated = diesel::update(
                    carts::table
                        .filter(carts::id.eq(id))
                        .filter(carts::version.eq(expected)),
                )
                .set((
                    carts::products.eq(products),
                    carts::version.eq(expected + 1),
                    carts::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

                if updated == 1 {
                    return Ok(WriteOutcome::Written {
                        version: expected + 1,
                    });
                }

                let exists: bool =
                    diesel::select(diesel::dsl::exists(carts::table.filter(carts::id.eq(id))))
                        .get_result(conn)?;
                Ok(if exists {
                    WriteOutcome::Conflict
                } else {
                    WriteOutcome::Missing
                })
            })
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get()?;
            let deleted = diesel::delete(carts::table.find(id)).execute(&mut conn)?;
            Ok(deleted > 0)
        })
        .await
    }
}
