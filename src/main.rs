use axum::{Router, http::header, routing::get};
use billed::api::handlers::{api_routes, health};
use billed::api::openapi::ApiDoc;
use billed::api::{AppState, Backend};
use billed::auth::jwt::JwtService;
use billed::config::CONFIG;
use billed::infrastructure::logging::in_memory::InMemoryLogging;
use billed::infrastructure::store::http::HttpRemoteStore;
use billed::infrastructure::store::in_memory::InMemoryStore;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&CONFIG.log_level))
        .init();
    info!("Starting with {:?}", *CONFIG);

    let backend = match (&CONFIG.api_url, &CONFIG.seed_file) {
        (Some(url), _) => {
            info!("Using bills API at {}", url);
            Backend::Http(HttpRemoteStore::new(
                url,
                Duration::from_secs(CONFIG.api_timeout_seconds),
            )?)
        }
        (None, Some(seed)) => {
            info!("Using in-memory bills seeded from {}", seed);
            Backend::InMemory(InMemoryStore::from_seed_file(seed).await?)
        }
        (None, None) => {
            info!("Using empty in-memory bills");
            Backend::InMemory(InMemoryStore::new())
        }
    };

    let state = Arc::new(AppState {
        backend,
        logging: Arc::new(InMemoryLogging::new()),
        jwt: JwtService::new(CONFIG.jwt_secret.clone()),
    });

    let app = Router::new()
        .route("/", get(health))
        .nest("/api", api_routes(state))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new()) // Gzip compression
        .layer(TimeoutLayer::new(Duration::from_secs(30))) // 30-second timeout
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([http::Method::GET, http::Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http()); // Request tracing

    let addr = SocketAddr::from(([127, 0, 0, 1], CONFIG.port));
    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
