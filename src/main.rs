mod api;
mod app;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::HttpServer;
use dotenv::dotenv;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::{MongoUserRepository, UserRepository};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();

    log::info!("🚀 Starting User CRUD Service ({} mode)...", config.environment);

    // Uma única tentativa; sem conexão o serviço sobe mesmo assim
    let store = database::connect(&config.mongodb_uri).await;
    let repository: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(store.as_ref()));

    let lookup = config.user_lookup;

    log::info!("🌐 Server starting on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    HttpServer::new(move || app::create_app(repository.clone(), lookup))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
