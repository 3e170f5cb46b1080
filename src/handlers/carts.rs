use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::CartService;
use crate::domain::cart::{Cart, LineItem, Product};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductDto {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub price: String,
    pub stock: i32,
    pub category: String,
    #[serde(default = "default_status")]
    pub status: bool,
}

fn default_status() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LineItemDto {
    pub product: ProductDto,
    pub quantity: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub id: Uuid,
    pub products: Vec<LineItemDto>,
    pub version: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCartResponse {
    pub id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReplaceProductsRequest {
    pub products: Vec<LineItemDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetQuantityRequest {
    pub quantity: i32,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            id: p.id,
            title: p.title.clone(),
            description: p.description.clone(),
            code: p.code.clone(),
            price: p.price.to_string(),
            stock: p.stock,
            category: p.category.clone(),
            status: p.status,
        }
    }
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            id: cart.id,
            products: cart
                .products
                .iter()
                .map(|l| LineItemDto {
                    product: ProductDto::from(&l.product),
                    quantity: l.quantity,
                })
                .collect(),
            version: cart.version,
            created_at: cart.created_at.to_rfc3339(),
            updated_at: cart.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<LineItemDto> for LineItem {
    type Error = AppError;

    fn try_from(dto: LineItemDto) -> Result<Self, Self::Error> {
        let p = dto.product;
        let price = BigDecimal::from_str(&p.price)
            .map_err(|e| AppError::BadRequest(format!("Invalid price '{}': {}", p.price, e)))?;
        Ok(LineItem {
            product: Product {
                id: p.id,
                title: p.title,
                description: p.description,
                code: p.code,
                price,
                stock: p.stock,
                category: p.category,
                status: p.status,
            },
            quantity: dto.quantity,
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /carts
///
/// Creates an empty cart and returns its id.
#[utoipa::path(
    post,
    path = "/carts",
    responses(
        (status = 201, description = "Cart created", body = CreateCartResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn create_cart(service: web::Data<CartService>) -> Result<HttpResponse, AppError> {
    let id = service.create_cart().await?;
    Ok(HttpResponse::Created().json(CreateCartResponse { id }))
}

/// GET /carts
#[utoipa::path(
    get,
    path = "/carts",
    responses(
        (status = 200, description = "All carts", body = [CartResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn list_carts(service: web::Data<CartService>) -> Result<HttpResponse, AppError> {
    let carts = service.list_carts().await?;
    let body: Vec<CartResponse> = carts.iter().map(CartResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /carts/{cid}
#[utoipa::path(
    get,
    path = "/carts/{cid}",
    params(
        ("cid" = String, Path, description = "Cart id"),
    ),
    responses(
        (status = 200, description = "Cart found", body = CartResponse),
        (status = 404, description = "Cart not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn get_cart(
    service: web::Data<CartService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let cart = service.get_cart(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// POST /carts/{cid}/product/{pid}
///
/// Adds one unit of a catalog product. Adding a product that is already in
/// the cart increments its quantity.
#[utoipa::path(
    post,
    path = "/carts/{cid}/product/{pid}",
    params(
        ("cid" = String, Path, description = "Cart id"),
        ("pid" = String, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Product added", body = CartResponse),
        (status = 400, description = "Malformed product id"),
        (status = 404, description = "Cart or product not found"),
        (status = 409, description = "Cart was modified concurrently"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn add_product(
    service: web::Data<CartService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, product_id) = path.into_inner();
    let cart = service.add_product(&cart_id, &product_id).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// PUT /carts/{cid}
///
/// Replaces the cart's line items with the supplied list. Items are taken
/// as given; the catalog is not consulted.
#[utoipa::path(
    put,
    path = "/carts/{cid}",
    params(
        ("cid" = String, Path, description = "Cart id"),
    ),
    request_body = ReplaceProductsRequest,
    responses(
        (status = 200, description = "Cart updated", body = CartResponse),
        (status = 400, description = "Malformed line items"),
        (status = 404, description = "Cart not found"),
        (status = 409, description = "Cart was modified concurrently"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn replace_products(
    service: web::Data<CartService>,
    path: web::Path<String>,
    body: web::Json<ReplaceProductsRequest>,
) -> Result<HttpResponse, AppError> {
    let cart_id = path.into_inner();
    // An unknown cart is reported before any problem with the line items.
    service.get_cart(&cart_id).await?;

    let products = body
        .into_inner()
        .products
        .into_iter()
        .map(LineItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let cart = service.replace_products(&cart_id, products).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// PUT /carts/{cid}/product/{pid}
#[utoipa::path(
    put,
    path = "/carts/{cid}/product/{pid}",
    params(
        ("cid" = String, Path, description = "Cart id"),
        ("pid" = String, Path, description = "Product id"),
    ),
    request_body = SetQuantityRequest,
    responses(
        (status = 200, description = "Quantity updated", body = CartResponse),
        (status = 400, description = "Malformed product id or quantity below 1"),
        (status = 404, description = "Cart not found or product not in cart"),
        (status = 409, description = "Cart was modified concurrently"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn set_product_quantity(
    service: web::Data<CartService>,
    path: web::Path<(String, String)>,
    body: web::Json<SetQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, product_id) = path.into_inner();
    let cart = service
        .set_product_quantity(&cart_id, &product_id, body.quantity)
        .await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// DELETE /carts/{cid}/product/{pid}
///
/// Removing a product that is not in the cart is not an error.
#[utoipa::path(
    delete,
    path = "/carts/{cid}/product/{pid}",
    params(
        ("cid" = String, Path, description = "Cart id"),
        ("pid" = String, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Product removed", body = CartResponse),
        (status = 400, description = "Malformed product id"),
        (status = 404, description = "Cart not found"),
        (status = 409, description = "Cart was modified concurrently"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn remove_product(
    service: web::Data<CartService>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (cart_id, product_id) = path.into_inner();
    let cart = service.remove_product(&cart_id, &product_id).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(&cart)))
}

/// DELETE /carts/{cid}
///
/// Empties the cart. The cart itself is kept.
#[utoipa::path(
    delete,
    path = "/carts/{cid}",
    params(
        ("cid" = String, Path, description = "Cart id"),
    ),
    responses(
        (status = 204, description = "Cart emptied"),
        (status = 404, description = "Cart not found"),
        (status = 409, description = "Cart was modified concurrently"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "carts"
)]
pub async fn clear_cart(
    service: web::Data<CartService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.clear_cart(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
