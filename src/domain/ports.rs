use async_trait::async_trait;
use uuid::Uuid;

use super::cart::{Cart, LineItem, Product};
use super::errors::DomainError;

/// Result of a versioned full-document replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written { version: i32 },
    /// The stored document's version no longer matches the one that was read.
    Conflict,
    Missing,
}

/// Durable storage for cart documents. A missing cart is reported through
/// `None`, `WriteOutcome::Missing` or `false`; errors are reserved for
/// storage failures.
#[async_trait]
pub trait CartStore: Send + Sync + 'static {
    async fn insert(&self, products: Vec<LineItem>) -> Result<Uuid, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Cart>, DomainError>;
    async fn find_all(&self) -> Result<Vec<Cart>, DomainError>;
    /// Replace the stored line items if the stored version still equals
    /// `cart.version`.
    async fn replace(&self, cart: &Cart) -> Result<WriteOutcome, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

/// Read-only view of the product catalog.
#[async_trait]
pub trait ProductCatalog: Send + Sync + 'static {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
}
