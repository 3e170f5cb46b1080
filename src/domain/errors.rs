use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Cart {0} not found")]
    CartNotFound(String),
    #[error("Product {0} not found")]
    ProductNotFound(String),
    #[error("Product {product_id} is not in cart {cart_id}")]
    LineItemNotFound { cart_id: String, product_id: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cart {0} was modified concurrently")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
