//! JSON HTTP API in front of the catalog client.
//!
//! Every response, success or failure, uses the same envelope as the
//! remote API and is marked `Cache-Control: no-store`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/api/search?query=` | Free-text search (query must be ≥ 2 characters) |
//! | `GET`  | `/api/profiles?page&orderBy&featured&q&per_page` | One page of the listing |
//! | `GET`  | `/api/profiles/featured` | Featured profiles |
//! | `GET`  | `/api/profiles/{slug}` | One profile by slug |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "success": false, "error": "a search term of at least 2 characters is required" }
//! ```
//!
//! Status codes: 400 for invalid input, 404 when the API has no such profile,
//! 500 for anything else.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::Catalog;
use crate::client::{ApiClient, ApiError, ProfileSource};
use crate::config::Config;
use crate::listing::ListingQuery;
use crate::models::Envelope;

/// Shortest accepted search term, in characters.
pub const MIN_QUERY_CHARS: usize = 2;

/// Shared state handed to every route handler.
#[derive(Clone)]
struct AppState {
    catalog: Arc<Catalog>,
    per_page: u32,
}

/// Starts the HTTP server against the remote API named in `[api].endpoint`.
///
/// Binds to `[server].bind` and runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let client = ApiClient::from_config(config)?;
    run_server_with_source(config, Arc::new(client)).await
}

/// Like [`run_server`], but serves profiles from any [`ProfileSource`].
pub async fn run_server_with_source(
    config: &Config,
    source: Arc<dyn ProfileSource>,
) -> anyhow::Result<()> {
    let app = router(config, source);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("catalog server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router.
pub fn router(config: &Config, source: Arc<dyn ProfileSource>) -> Router {
    let state = AppState {
        catalog: Arc::new(Catalog::new(source, config.listing.mode)),
        per_page: config.listing.per_page,
    };

    Router::new()
        .route("/api/search", get(handle_search))
        .route("/api/profiles", get(handle_list))
        .route("/api/profiles/featured", get(handle_featured))
        .route("/api/profiles/{slug}", get(handle_profile))
        .route("/health", get(handle_health))
        .with_state(state)
        .layer(build_cors(&config.server.cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| tracing::warn!("ignoring invalid CORS origin '{}': {}", o, e))
                .ok()
        })
        .collect();
    cors.allow_origin(origins)
}

// ============ Responses ============

/// A successful envelope with the no-store header.
fn envelope<T: Serialize>(status: StatusCode, body: Envelope<T>) -> Response {
    (
        status,
        [(header::CACHE_CONTROL, "no-store")],
        Json(body),
    )
        .into_response()
}

/// Error that renders as a failure envelope.
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        envelope::<()>(self.status, Envelope::failure(self.message))
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
    }
}

// ============ GET /api/search ============

async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let query = match params.get("query") {
        Some(q) if q.chars().count() >= MIN_QUERY_CHARS => q,
        _ => {
            return Err(bad_request(
                "a search term of at least 2 characters is required",
            ))
        }
    };

    let results = state.catalog.source().search(query).await.map_err(|e| {
        tracing::error!(error = %e, query = %query, "search failed");
        internal("failed to process search")
    })?;

    Ok(envelope(StatusCode::OK, Envelope::ok(results)))
}

// ============ GET /api/profiles ============

async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let query = ListingQuery::from_params(&params, state.per_page)
        .map_err(|e| bad_request(e.to_string()))?;

    let page = state.catalog.browse(&query).await.map_err(|e| {
        tracing::error!(error = %e, "listing failed");
        internal("failed to load profiles")
    })?;

    let total = page.total;
    Ok(envelope(StatusCode::OK, Envelope::ok(page).with_count(total)))
}

// ============ GET /api/profiles/featured ============

async fn handle_featured(State(state): State<AppState>) -> Result<Response, AppError> {
    let profiles = state.catalog.source().featured().await.map_err(|e| {
        tracing::error!(error = %e, "featured listing failed");
        internal("failed to load featured profiles")
    })?;

    let count = profiles.len() as u64;
    Ok(envelope(StatusCode::OK, Envelope::ok(profiles).with_count(count)))
}

// ============ GET /api/profiles/{slug} ============

async fn handle_profile(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    match state.catalog.source().by_slug(&slug).await {
        Ok(profile) => Ok(envelope(StatusCode::OK, Envelope::ok(profile))),
        Err(ApiError::Api(message)) => Err(not_found(message)),
        Err(e) => {
            tracing::error!(error = %e, slug = %slug, "profile lookup failed");
            Err(internal("failed to load profile"))
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
