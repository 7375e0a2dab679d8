use crate::config::AppConfig;
use crate::labels::Dictionaries;
use crate::pages::{
    self, CountryParams, GeneralParams, OverviewParams, Page, PageContext, PageDocument,
    PageRequest,
};
use crate::types::Datasets;
use crate::widgets::SelectionError;
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{info, warn};

pub struct AppState {
    pub data: Datasets,
    pub labels: Dictionaries,
    pub config: AppConfig,
}

impl AppState {
    pub fn context(&self) -> PageContext<'_> {
        PageContext {
            data: &self.data,
            labels: &self.labels,
            map: &self.config.map,
        }
    }

    fn evaluate(&self, request: PageRequest) -> Result<Json<PageDocument>, ApiError> {
        pages::evaluate(self.context(), &request)
            .map(Json)
            .map_err(ApiError)
    }
}

/// A rejected widget choice, answered with 400.
#[derive(Debug)]
pub struct ApiError(pub SelectionError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!("Rejected selection: {}", self.0);
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct PageEntry {
    key: &'static str,
    title: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/api/pages", get(pages_handler))
        .route("/api/pages/overview", get(overview_handler))
        .route("/api/pages/general", get(general_handler))
        .route("/api/pages/country", get(country_handler));

    if let Some(static_dir) = &state.config.server.static_dir {
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    app.layer(CorsLayer::permissive()).with_state(state)
}

pub async fn start_server(config: AppConfig, data: Datasets) -> Result<()> {
    let labels = Dictionaries::new().context("Invalid label dictionaries")?;
    let port = config.server.port;

    let state = Arc::new(AppState {
        data,
        labels,
        config,
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, router(state)).await?;
    Ok(())
}

pub async fn pages_handler() -> Json<Vec<PageEntry>> {
    Json(
        Page::ALL
            .iter()
            .map(|p| PageEntry {
                key: p.key(),
                title: p.title(),
            })
            .collect(),
    )
}

pub async fn overview_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<OverviewParams>,
) -> Result<Json<PageDocument>, ApiError> {
    state.evaluate(PageRequest::Overview(params))
}

pub async fn general_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeneralParams>,
) -> Result<Json<PageDocument>, ApiError> {
    state.evaluate(PageRequest::General(params))
}

pub async fn country_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CountryParams>,
) -> Result<Json<PageDocument>, ApiError> {
    state.evaluate(PageRequest::Country(params))
}
