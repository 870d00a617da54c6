use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_engine::error::MovieEngineError;
use movie_engine::{
    Candidate, EngineConfig, Genre, MovieDetails, MovieEngine, MovieResult, RankOptions, RecommendQuery,
    RecommendationResponse, ScoredCandidate, ShortFilm, ShortFilmCatalog,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<MovieEngine>,
    config: Arc<EngineConfig>,
}

#[derive(Debug, Deserialize)]
struct RankRequest {
    query: String,
    /// Kept as raw JSON so a missing or non-array payload is reported as invalid input
    #[serde(default)]
    candidates: serde_json::Value,
    #[serde(flatten)]
    options: RankOptions,
}

#[derive(Debug, Serialize)]
struct RankResponse {
    results: Vec<ScoredCandidate>,
}

#[derive(Debug, Deserialize)]
struct LimitParams {
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    provider: String,
    ranker: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_engine_server=debug,movie_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("MOVIE_ENGINE_CONFIG").ok();
    let config = EngineConfig::load(config_path.as_deref().map(std::path::Path::new))?;
    let port = config.server.port;

    tracing::info!("🚀 Starting Movie Discovery Engine Server");
    tracing::info!("🔌 Port: {}", port);

    let engine = MovieEngine::from_config(&config)?;

    let state = AppState {
        engine: Arc::new(engine),
        config: Arc::new(config),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/rank", post(rank_handler))
        .route("/v1/recommend", post(recommend_handler))
        .route("/v1/movies/:id", get(details_handler))
        .route("/v1/genres", get(genres_handler))
        .route("/v1/genres/:id/movies", get(genre_movies_handler))
        .route("/v1/short-films", get(short_films_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🎬 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: movie_engine::VERSION.to_string(),
        provider: state.engine.provider_name().to_string(),
        ranker: state.engine.ranker_name().to_string(),
    })
}

async fn rank_handler(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let candidates = Candidate::list_from_json(&req.candidates)?;
    let results = state.engine.rank(&req.query, &candidates, &req.options)?;

    tracing::debug!("rank '{}' -> {} of {}", req.query, results.len(), candidates.len());

    Ok(Json(RankResponse { results }))
}

async fn recommend_handler(
    State(state): State<AppState>,
    Json(req): Json<RecommendQuery>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let response = state.engine.recommend(req).await?;
    tracing::info!("✅ {}", response.display());
    Ok(Json(response))
}

async fn details_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MovieDetails>, AppError> {
    Ok(Json(state.engine.details(id).await?))
}

async fn genres_handler(State(state): State<AppState>) -> Result<Json<Vec<Genre>>, AppError> {
    Ok(Json(state.engine.genres().await?))
}

async fn genre_movies_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<MovieResult>>, AppError> {
    Ok(Json(state.engine.movies_by_genre(id, params.limit).await?))
}

async fn short_films_handler(State(state): State<AppState>) -> Result<Json<Vec<ShortFilm>>, AppError> {
    let catalog = ShortFilmCatalog::load(&state.config.short_films_path).await?;
    Ok(Json(catalog.films().to_vec()))
}

// Error handling
struct AppError(MovieEngineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            MovieEngineError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            MovieEngineError::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {}", what)),
            MovieEngineError::Provider { provider, message } => {
                (StatusCode::BAD_GATEWAY, format!("Provider '{}' error: {}", provider, message))
            }
            e => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<MovieEngineError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
