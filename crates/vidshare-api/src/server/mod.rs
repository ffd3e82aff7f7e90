//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, Router};
use tokio::net::TcpListener;
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use vidshare_common::{AppConfig, AppError, JwtService, PersistenceBackend, StorageBackend};
use vidshare_core::SnowflakeGenerator;
use vidshare_db::{create_pool, run_migrations, MemoryDatabase};
use vidshare_service::{ServiceContext, ServiceContextBuilder};
use vidshare_storage::{InMemoryMediaStorage, LocalMediaStorage};

use crate::middleware::{apply_api_middleware, apply_base_middleware};
use crate::openapi::ApiDoc;
use crate::response::ApiError;
use crate::routes::{create_router, health_routes, media_routes};
use crate::state::AppState;

/// SQL migrations shipped with the persistence crate
pub const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../vidshare-db/migrations");

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let api = apply_api_middleware(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    let router = Router::new()
        .merge(health_routes())
        .merge(media_routes())
        .merge(SwaggerUi::new("/swagger-ui").url(ApiDoc::openapi_json_path(), ApiDoc::openapi()))
        .merge(api)
        .fallback(|| async { ApiError::RouteNotFound })
        .layer(DefaultBodyLimit::max(config.storage.max_file_size_bytes()));

    let router = apply_base_middleware(
        router,
        Duration::from_secs(config.api.request_timeout_secs),
    );

    Ok(router.with_state(state))
}

async fn with_persistence(
    builder: ServiceContextBuilder,
    config: &AppConfig,
) -> Result<ServiceContextBuilder, AppError> {
    match config.persistence.backend {
        PersistenceBackend::Postgres => {
            info!("Connecting to PostgreSQL...");
            let db_config = vidshare_db::DatabaseConfig::new(
                &config.database.url,
                config.database.max_connections,
                config.database.min_connections,
            );
            let pool = create_pool(&db_config)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            if config.persistence.run_migrations {
                run_migrations(&pool, MIGRATIONS_DIR)
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
            }

            Ok(builder.postgres(pool))
        }
        PersistenceBackend::Memory => {
            warn!("Using in-memory persistence; data is lost on shutdown");
            Ok(builder.memory(&MemoryDatabase::new()))
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let snowflake_generator = Arc::new(
        SnowflakeGenerator::new(config.snowflake.worker_id)
            .map_err(|e| AppError::Config(e.to_string()))?,
    );

    let builder = ServiceContext::builder()
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator);
    let builder = with_persistence(builder, &config).await?;

    let storage = &config.storage;
    let (builder, local_media) = match storage.backend {
        StorageBackend::Local => {
            let local = Arc::new(LocalMediaStorage::new(
                &storage.upload_dir,
                &storage.public_base_url,
            ));
            info!(dir = %storage.upload_dir, "Serving media from the local filesystem");
            (builder.media(local.clone()), Some(local))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory media storage; uploads are lost on shutdown");
            let memory = Arc::new(InMemoryMediaStorage::new(&storage.public_base_url));
            (builder.media(memory), None)
        }
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let state = AppState::new(service_context, config);
    Ok(match local_media {
        Some(local) => state.with_local_media(local),
        None => state,
    })
}

/// Serve `app` on an already bound listener
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    serve(listener, app).await
}
