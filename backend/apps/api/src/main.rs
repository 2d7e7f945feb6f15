//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Startup failures use `anyhow`; request-level errors are handled
//! inside the auth and clients crates.

use auth::{AuthConfig, AuthMiddlewareState, PgUserRepository, auth_router, require_auth};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use clients::{ClientsConfig, clients_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,clients=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let mut auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load the token secret from environment
        let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set in production");
        AuthConfig {
            token_secret: secret.into_bytes(),
            ..AuthConfig::default()
        }
    };
    if let Ok(url) = env::var("FRONTEND_URL") {
        auth_config.frontend_url = url;
    }
    if let Ok(url) = env::var("API_BASE_URL") {
        auth_config.api_base_url = url;
    }
    let auth_config = Arc::new(auth_config);

    let clients_config = Arc::new(ClientsConfig::default());

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Everything under the clients router requires a bearer token
    let protected = clients_router(pool.clone(), clients_config).route_layer(
        middleware::from_fn_with_state(
            AuthMiddlewareState {
                config: auth_config.clone(),
            },
            require_auth,
        ),
    );

    // Build router
    let app = Router::new()
        .nest(
            "/api/v1/auth",
            auth_router(PgUserRepository::new(pool.clone()), auth_config),
        )
        .nest("/api/v1", protected)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
