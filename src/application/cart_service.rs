use std::sync::Arc;

use uuid::Uuid;

use crate::domain::cart::{parse_cart_id, parse_product_id, Cart, LineItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartStore, ProductCatalog, WriteOutcome};

/// How many times a mutation is re-applied after losing a version race.
const MAX_WRITE_ATTEMPTS: usize = 3;

pub struct CartService {
    store: Arc<dyn CartStore>,
    catalog: Arc<dyn ProductCatalog>,
}

impl CartService {
    pub fn new(store: Arc<dyn CartStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn create_cart(&self) -> Result<Uuid, DomainError> {
        let id = self.store.insert(vec![]).await?;
        log::info!("Created cart {}", id);
        Ok(id)
    }

    pub async fn list_carts(&self) -> Result<Vec<Cart>, DomainError> {
        self.store.find_all().await
    }

    pub async fn get_cart(&self, cart_id: &str) -> Result<Cart, DomainError> {
        let id = parse_cart_id(cart_id)?;
        self.load(id).await
    }

    /// Add one unit of a catalog product to the cart, merging with an
    /// existing line item for the same product.
    pub async fn add_product(
        &self,
        cart_id: &str,
        product_id: &str,
    ) -> Result<Cart, DomainError> {
        let product_id = parse_product_id(product_id)?;
        let cart = self.load(parse_cart_id(cart_id)?).await?;

        let product = self
            .catalog
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| DomainError::ProductNotFound(product_id.to_string()))?;

        log::debug!("Adding product {} to cart {}", product_id, cart.id);
        self.apply(cart, |cart| {
            cart.add_product(product.clone())?;
            Ok(true)
        })
        .await
    }

    /// Overwrite the cart's line items with caller-supplied data. The items
    /// are not checked against the catalog.
    pub async fn replace_products(
        &self,
        cart_id: &str,
        products: Vec<LineItem>,
    ) -> Result<Cart, DomainError> {
        let cart = self.load(parse_cart_id(cart_id)?).await?;

        log::debug!("Replacing {} line items of cart {}", products.len(), cart.id);
        self.apply(cart, |cart| {
            cart.replace_products(products.clone())?;
            Ok(true)
        })
        .await
    }

    pub async fn set_product_quantity(
        &self,
        cart_id: &str,
        product_id: &str,
        quantity: i32,
    ) -> Result<Cart, DomainError> {
        let product_id = parse_product_id(product_id)?;
        let cart = self.load(parse_cart_id(cart_id)?).await?;

        log::debug!(
            "Setting quantity of product {} in cart {} to {}",
            product_id,
            cart.id,
            quantity
        );
        self.apply(cart, |cart| {
            cart.set_quantity(product_id, quantity)?;
            Ok(true)
        })
        .await
    }

    /// Remove a product's line item. Removing a product that is not in the
    /// cart succeeds and leaves the cart untouched.
    pub async fn remove_product(
        &self,
        cart_id: &str,
        product_id: &str,
    ) -> Result<Cart, DomainError> {
        let product_id = parse_product_id(product_id)?;
        let cart = self.load(parse_cart_id(cart_id)?).await?;

        log::debug!("Removing product {} from cart {}", product_id, cart.id);
        self.apply(cart, |cart| Ok(cart.remove_product(product_id))).await
    }

    pub async fn clear_cart(&self, cart_id: &str) -> Result<Cart, DomainError> {
        let cart = self.load(parse_cart_id(cart_id)?).await?;

        log::debug!("Clearing cart {}", cart.id);
        self.apply(cart, |cart| Ok(cart.clear())).await
    }

    pub async fn delete_cart(&self, cart_id: &str) -> Result<(), DomainError> {
        let id = parse_cart_id(cart_id)?;
        if !self.store.delete(id).await? {
            return Err(DomainError::CartNotFound(id.to_string()));
        }
        log::info!("Deleted cart {}", id);
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Cart, DomainError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::CartNotFound(id.to_string()))
    }

    /// Run `mutation` against `cart` and persist the result with a versioned
    /// replace. When another writer got there first the cart is reloaded and
    /// the mutation re-applied. `mutation` returns whether it changed
    /// anything; unchanged carts are not written.
    async fn apply<F>(&self, mut cart: Cart, mut mutation: F) -> Result<Cart, DomainError>
    where
        F: FnMut(&mut Cart) -> Result<bool, DomainError>,
    {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            if !mutation(&mut cart)? {
                return Ok(cart);
            }

            match self.store.replace(&cart).await? {
                WriteOutcome::Written { version } => {
                    cart.version = version;
                    return Ok(cart);
                }
                WriteOutcome::Missing => {
                    return Err(DomainError::CartNotFound(cart.id.to_string()))
                }
                WriteOutcome::Conflict => {
                    log::warn!(
                        "Version conflict on cart {} (attempt {}/{})",
                        cart.id,
                        attempt,
                        MAX_WRITE_ATTEMPTS
                    );
                    cart = self.load(cart.id).await?;
                }
            }
        }

        Err(DomainError::Conflict(cart.id.to_string()))
    }
}
