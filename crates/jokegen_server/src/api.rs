//! HTTP API for story generation and health checks.

use crate::error::ApiError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use jokegen_core::{StoryOptions, StoryResult, StoryType};
use jokegen_story::StoryGenerator;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

/// API server state.
#[derive(Clone)]
pub struct ApiState {
    /// Shared story generator.
    pub generator: Arc<StoryGenerator>,
}

impl ApiState {
    /// Creates a new API state.
    pub fn new(generator: Arc<StoryGenerator>) -> Self {
        Self { generator }
    }
}

/// Query parameters accepted by `GET /story`.
///
/// Every parameter is optional. Empty values count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoryQuery {
    /// Story type name
    #[serde(rename = "type")]
    pub story_type: Option<String>,
    /// Literal theme
    pub theme: Option<String>,
    /// Literal style
    pub style: Option<String>,
    /// Literal modifier
    pub modifier: Option<String>,
    /// `true`, `1` or `yes` forces a fresh story
    pub force: Option<String>,
}

impl StoryQuery {
    /// Requested story type name, falling back to the default type.
    pub fn story_type_name(&self) -> &str {
        self.story_type
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(StoryType::default().name())
    }

    /// Whether the cached story must be ignored.
    pub fn force_regenerate(&self) -> bool {
        self.force.as_deref().is_some_and(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes"
            )
        })
    }

    /// Overrides for the generator.
    pub fn options(&self) -> StoryOptions {
        let mut options = StoryOptions::default().with_force_regenerate(self.force_regenerate());
        if let Some(theme) = &self.theme {
            options = options.with_theme(theme.as_str());
        }
        if let Some(style) = &self.style {
            options = options.with_style(style.as_str());
        }
        if let Some(modifier) = &self.modifier {
            options = options.with_modifier(modifier.as_str());
        }
        options
    }
}

/// Creates the API router.
pub fn create_router(generator: Arc<StoryGenerator>) -> Router {
    let state = ApiState::new(generator);

    Router::new()
        .route("/health", get(health_check))
        .route("/story", get(get_story))
        .with_state(state)
}

/// Health check endpoint.
#[instrument(skip_all)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Generate or fetch the cached story for the requested type.
#[instrument(skip(state, query), fields(story_type = %query.story_type_name()))]
async fn get_story(
    State(state): State<ApiState>,
    Query(query): Query<StoryQuery>,
) -> Result<Json<StoryResult>, ApiError> {
    let result = state
        .generator
        .parse_and_generate(query.story_type_name(), &query.options())
        .await?;
    info!(generated_at = %result.timestamp(), "Story served");
    Ok(Json(result))
}
