use cart_service::{build_server, create_pool, postgres_cart_service, run_migrations, AppConfig};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, config.db_pool_max_size)?;
    run_migrations(&pool)?;

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(postgres_cart_service(pool), &config.host, config.port)?.await?;
    Ok(())
}
