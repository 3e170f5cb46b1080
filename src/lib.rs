pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use application::CartService;
pub use config::AppConfig;
pub use db::{create_pool, DbPool};

use handlers::ApiDoc;
use infrastructure::{DieselCartStore, DieselProductCatalog};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

/// Wire a `CartService` to the Postgres-backed cart store and catalog.
pub fn postgres_cart_service(pool: DbPool) -> CartService {
    CartService::new(
        Arc::new(DieselCartStore::new(pool.clone())),
        Arc::new(DieselProductCatalog::new(pool)),
    )
}

/// Register the `/carts` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    use handlers::carts;

    cfg.service(
        web::scope("/carts")
            .route("", web::post().to(carts::create_cart))
            .route("", web::get().to(carts::list_carts))
            .route("/{cid}", web::get().to(carts::get_cart))
            .route("/{cid}", web::put().to(carts::replace_products))
            .route("/{cid}", web::delete().to(carts::clear_cart))
            .route("/{cid}/product/{pid}", web::post().to(carts::add_product))
            .route(
                "/{cid}/product/{pid}",
                web::put().to(carts::set_product_quantity),
            )
            .route(
                "/{cid}/product/{pid}",
                web::delete().to(carts::remove_product),
            ),
    );
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    service: CartService,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(service);
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .wrap(Logger::default())
            .configure(configure)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
