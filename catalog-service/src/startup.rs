use crate::config::{AuthConfig, CatalogConfig, JwtAlgorithm, StoreBackend};
use crate::handlers::{self, Listing};
use crate::models::{Artist, Venue};
use crate::AppState;
use axum::{
    handler::Handler,
    http::{header, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, patch, post},
    Router,
};
use service_core::auth::{CredentialVerifier, JwtVerifier};
use service_core::error::AppError;
use service_core::middleware::{
    method_not_allowed_middleware, metrics_middleware, not_found_fallback, request_id_middleware,
    require_scope, ScopeGate,
};
use service_core::store::MongoDb;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn listing_routes<T: Listing>(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("/{}", prefix),
            get(handlers::list_entries::<T>).post(handlers::create_entry::<T>),
        )
        .route(
            &format!("/{}/search", prefix),
            post(handlers::search_entries::<T>),
        )
        .route(
            &format!("/{}/:id", prefix),
            get(handlers::get_entry::<T>)
                .patch(handlers::update_entry::<T>)
                .delete(handlers::delete_entry::<T>),
        )
}

pub fn build_router(state: AppState) -> Router {
    let verifier = state.verifier.clone();
    // Applied per handler so unsupported methods still answer 405 ungated.
    let gate = |scope: &str| {
        from_fn_with_state(ScopeGate::new(verifier.clone(), scope), require_scope)
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        // Trivia
        .route("/categories", get(handlers::list_categories))
        .route(
            "/categories/:category_id/questions",
            get(handlers::category_questions),
        )
        .route(
            "/questions",
            get(handlers::list_questions).post(handlers::create_question),
        )
        .route("/questions/search", post(handlers::search_questions))
        .route("/questions/:question_id", delete(handlers::delete_question))
        .route("/quizzes", post(handlers::play_quiz))
        // Drinks
        .route(
            "/drinks",
            get(handlers::list_drinks)
                .post(handlers::create_drink.layer(gate("post:drinks"))),
        )
        .route(
            "/drinks-detail",
            get(handlers::drinks_detail.layer(gate("get:drinks-detail"))),
        )
        .route(
            "/drinks/:drink_id",
            patch(handlers::update_drink.layer(gate("patch:drinks")))
                .delete(handlers::delete_drink.layer(gate("delete:drinks"))),
        )
        // Venues and artists
        .route("/venues/areas", get(handlers::venue_areas))
        .merge(listing_routes::<Venue>("venues"))
        .merge(listing_routes::<Artist>("artists"))
        .route(
            "/shows",
            get(handlers::list_shows).post(handlers::create_show),
        )
        .fallback(not_found_fallback)
        .layer(from_fn(method_not_allowed_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

/// Builds the credential verifier described by `config`.
pub fn build_verifier(config: &AuthConfig) -> Result<JwtVerifier, AppError> {
    let verifier = match config.algorithm {
        JwtAlgorithm::HS256 => {
            let secret = config.secret.as_deref().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!("JWT_SECRET is required for HS256"))
            })?;
            JwtVerifier::from_secret(secret.as_bytes())
        }
        JwtAlgorithm::RS256 => {
            let path = config.public_key_path.as_deref().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!("JWT_PUBLIC_KEY_PATH is required for RS256"))
            })?;
            let pem = std::fs::read(path).map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!(
                    "Failed to read public key from {}: {}",
                    path,
                    e
                ))
            })?;
            JwtVerifier::from_rsa_pem(&pem).map_err(AppError::ConfigError)?
        }
    };

    let verifier = match config.audience.as_deref() {
        Some(audience) => verifier.with_audience(audience),
        None => verifier,
    };
    let verifier = match config.issuer.as_deref() {
        Some(issuer) => verifier.with_issuer(issuer),
        None => verifier,
    };

    tracing::info!(algorithm = ?config.algorithm, "Credential verifier initialized");
    Ok(verifier)
}

/// Wires repositories and the verifier according to `config`.
pub async fn build_state(config: &CatalogConfig) -> Result<AppState, AppError> {
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(build_verifier(&config.auth)?);

    let state = match config.store.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory store");
            AppState::in_memory(verifier)
        }
        StoreBackend::Mongo => {
            let uri = config.store.mongodb_uri.as_deref().ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!("MONGODB_URI is required for the mongo store"))
            })?;
            let db = MongoDb::connect(uri, &config.store.database).await?;
            AppState::mongo(&db, verifier).await?
        }
    };

    Ok(state.with_page_size(config.pagination.page_size))
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: CatalogConfig) -> Result<Self, AppError> {
        let state = build_state(&config).await?;
        Self::with_state(state, config.common.port).await
    }

    pub async fn with_state(state: AppState, port: u16) -> Result<Self, AppError> {
        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
