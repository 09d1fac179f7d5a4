pub mod config;
pub mod db;
pub mod errors;
pub mod http;
pub mod middleware;
pub mod models;
pub mod state;
pub mod stats;

use axum::{Router, middleware as axum_middleware};
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    db::{FeedbackStore, MemoryFeedbackStore, RedisFeedbackStore},
    errors::AppError,
    middleware::{cors_layer, create_rate_limiter, rate_limit_middleware},
    state::AppState,
};

pub fn build_app(state: AppState, config: &Config) -> Router {
    let rate_limiter = create_rate_limiter(config.rate_limit_per_minute);

    Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(rate_limiter.clone(), req, next)
        }))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { "404 Not Found" })
}

async fn connect_store(config: &Config) -> Result<Arc<dyn FeedbackStore>, AppError> {
    match &config.redis_url {
        Some(url) => {
            let manager = RedisConnectionManager::new(url.as_str())?;
            let pool = Pool::builder()
                .build(manager)
                .await
                .map_err(AppError::RedisCommandError)?;
            tracing::info!("Using Redis feedback store");
            Ok(Arc::new(RedisFeedbackStore::new(pool)))
        }
        None => {
            tracing::warn!("REDIS_URL not set, keeping feedback in memory");
            Ok(Arc::new(MemoryFeedbackStore::new()))
        }
    }
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let store = connect_store(&config).await?;
    let app = build_app(AppState::new(store), &config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {}: {e}", config.port)))?;

    tracing::info!("Feedback stats server running at http://0.0.0.0:{}", config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Server error: {}", e);
        AppError::InternalError
    })
}
