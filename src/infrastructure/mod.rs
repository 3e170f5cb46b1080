pub mod cart_repo;
pub mod memory;
pub mod models;
pub mod product_repo;

pub use cart_repo::DieselCartStore;
pub use memory::{InMemoryCartStore, InMemoryProductCatalog};
pub use product_repo::DieselProductCatalog;
