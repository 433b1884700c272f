use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use user_search_engine::directory::{RemoteDirectory, SqliteDirectory, UserDirectory};
use user_search_engine::{SearchRequest, SearchResponse, UserSearchEngine};

/// The frontend triggers suggestions while the user types; shorter queries
/// match too much to be useful.
const MIN_QUERY_LENGTH: usize = 3;

#[derive(Clone)]
struct AppState {
    engine: Arc<UserSearchEngine>,
}

#[derive(Debug, Deserialize)]
struct SuggestParams {
    query: String,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default = "default_min_score")]
    min_score: f64,
}

fn default_limit() -> usize {
    10
}
fn default_min_score() -> f64 {
    60.0
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    directory: DirectoryStatsDto,
}

#[derive(Debug, Serialize)]
struct DirectoryStatsDto {
    total_users: u64,
    with_email: u64,
    with_handle: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_search_server=debug,user_search_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_path = std::env::var("DB_PATH").unwrap_or_else(|_| "users.db".to_string());
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8100);

    tracing::info!("🚀 Starting User Search Server");
    tracing::info!("🔌 Port: {}", port);

    // Prefer the account service's candidate API when configured, fall back
    // to the local SQLite directory
    let directory: Arc<dyn UserDirectory> = match std::env::var("DIRECTORY_URL") {
        Ok(url) => match RemoteDirectory::new(&url).await {
            Ok(remote) => {
                tracing::info!("✅ Remote directory initialized: {}", url);
                Arc::new(remote)
            }
            Err(e) => {
                tracing::warn!("⚠️ Remote directory unavailable, using sqlite: {}", e);
                tracing::info!("📦 Database: {}", db_path);
                Arc::new(SqliteDirectory::new(&db_path).await?)
            }
        },
        Err(_) => {
            tracing::info!("📦 Database: {}", db_path);
            Arc::new(SqliteDirectory::new(&db_path).await?)
        }
    };

    let state = AppState {
        engine: Arc::new(UserSearchEngine::new(directory)),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/suggest", get(suggest_handler))
        .route("/v1/stats", get(stats_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🔎 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: user_search_engine::VERSION.to_string(),
    })
}

async fn suggest_handler(
    State(state): State<AppState>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SearchResponse>, AppError> {
    tracing::debug!("Suggest request: {:?}", params);

    if params.query.trim().chars().count() < MIN_QUERY_LENGTH {
        return Err(AppError::QueryTooShort);
    }

    let request = SearchRequest {
        query: params.query.clone(),
        limit: params.limit,
        min_score: params.min_score,
    };

    let result = state.engine.suggest(request).await?;

    tracing::info!(
        "✅ {:?} → {} matches ({}ms)",
        params.query,
        result.matches.len(),
        result.latency_ms
    );

    Ok(Json(result))
}

async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.engine.directory_stats().await?;

    Ok(Json(StatsResponse {
        directory: DirectoryStatsDto {
            total_users: stats.total_users,
            with_email: stats.with_email,
            with_handle: stats.with_handle,
        },
    }))
}

// Error handling
enum AppError {
    QueryTooShort,
    Engine(user_search_engine::SearchEngineError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::QueryTooShort => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("query must be at least {} characters", MIN_QUERY_LENGTH),
            ),
            AppError::Engine(user_search_engine::SearchEngineError::Directory {
                directory,
                message,
            }) => (
                StatusCode::BAD_GATEWAY,
                format!("Directory '{}' error: {}", directory, message),
            ),
            AppError::Engine(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<user_search_engine::SearchEngineError>,
{
    fn from(err: E) -> Self {
        Self::Engine(err.into())
    }
}
