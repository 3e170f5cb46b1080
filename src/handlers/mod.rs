pub mod carts;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        carts::create_cart,
        carts::list_carts,
        carts::get_cart,
        carts::add_product,
        carts::replace_products,
        carts::set_product_quantity,
        carts::remove_product,
        carts::clear_cart,
    ),
    components(schemas(
        carts::ProductDto,
        carts::LineItemDto,
        carts::CartResponse,
        carts::CreateCartResponse,
        carts::ReplaceProductsRequest,
        carts::SetQuantityRequest,
    )),
    tags((name = "carts", description = "Shopping cart management"))
)]
pub struct ApiDoc;
