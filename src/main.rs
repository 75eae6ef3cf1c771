mod config;
mod dtos;
mod errors;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod services;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger, web};
use log::{error, info};

use crate::config::{AppConfig, StoreBackend};
use crate::middleware::auth_extractor::SessionKeys;
use crate::repositories::{MemoryStore, PgStore, Store};
use crate::services::auth_services::AuthService;
use crate::services::listing_services::ListingService;
use crate::services::post_services::PostService;

/// Services shared by every worker; each holds the same store handle.
pub struct AppState {
    pub auth: AuthService,
    pub listing: ListingService,
    pub posts: PostService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, posts_per_page: u32) -> Self {
        Self {
            auth: AuthService::new(store.clone()),
            listing: ListingService::new(store.clone(), posts_per_page),
            posts: PostService::new(store),
        }
    }
}

async fn open_store(backend: StoreBackend) -> anyhow::Result<Arc<dyn Store>> {
    match backend {
        StoreBackend::Postgres => {
            let store = PgStore::new(config::get_pg_pool()?);
            store.ensure_schema().await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!("using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let store = match open_store(cfg.store).await {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open store: {:#}", e);
            std::process::exit(1);
        }
    };

    let state = web::Data::new(AppState::new(store, cfg.posts_per_page));
    let sessions = web::Data::new(SessionKeys::new(&cfg.secret_key, cfg.session_ttl_secs));
    let allowed_origins = cfg.allowed_origins.clone();

    let bind_address = format!("0.0.0.0:{}", cfg.port);
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["content-type", "accept", "x-requested-with"])
            .supports_credentials()
            .max_age(3600);

        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(sessions.clone())
            .configure(handlers::configure)
            .default_service(web::route().to(handlers::not_found))
    })
    .bind(&bind_address)?
    .run()
    .await
}
