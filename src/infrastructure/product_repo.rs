use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::{run_blocking, DbPool};
use crate::domain::cart::Product;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductCatalog;
use crate::schema::products;

use super::models::ProductRow;

/// Read-only access to the catalog's `products` table.
pub struct DieselProductCatalog {
    pool: DbPool,
}

impl DieselProductCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductCatalog for DieselProductCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let pool = self.pool.clone();
        run_blocking(move || {
            let mut conn = pool.get()?;
            let row = products::table
                .find(id)
                .select(ProductRow::as_select())
                .first(&mut conn)
                .optional()?;
            Ok(row.map(Product::from))
        })
        .await
    }
}
