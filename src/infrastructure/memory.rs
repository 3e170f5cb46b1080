use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::cart::{Cart, LineItem, Product};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartStore, ProductCatalog, WriteOutcome};

/// Process-local cart store. Carts are kept in creation order.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: RwLock<Vec<Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn insert(&self, products: Vec<LineItem>) -> Result<Uuid, DomainError> {
        let now = Utc::now();
        let cart = Cart {
            id: Uuid::new_v4(),
            products,
            version: 0,
            created_at: now,
            updated_at: now,
        };
        let id = cart.id;
        self.carts.write().await.push(cart);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, DomainError> {
        Ok(self.carts.read().await.iter().find(|c| c.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Cart>, DomainError> {
        Ok(self.carts.read().await.clone())
    }

    async fn replace(&self, cart: &Cart) -> Result<WriteOutcome, DomainError> {
        let mut carts = self.carts.write().await;
        let Some(stored) = carts.iter_mut().find(|c| c.id == cart.id) else {
            return Ok(WriteOutcome::Missing);
        };
        if stored.version != cart.version {
            return Ok(WriteOutcome::Conflict);
        }

        stored.products = cart.products.clone();
        stored.version += 1;
        stored.updated_at = Utc::now();
        Ok(WriteOutcome::Written {
            version: stored.version,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut carts = self.carts.write().await;
        let before = carts.len();
        carts.retain(|c| c.id != id);
        Ok(carts.len() != before)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductCatalog {
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: RwLock::new(products.into_iter().map(|p| (p.id, p)).collect()),
        }
    }

    pub async fn upsert(&self, product: Product) {
        self.products.write().await.insert(product.id, product);
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self.products.read().await.get(&id).cloned())
    }
}
