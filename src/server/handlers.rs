use crate::catalog::CategorySummary;
use crate::model::{ActivityRecord, Category, RecommendationRequest, RecommendationResponse};
use crate::server::AppState;
use crate::server::error::ApiError;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub activities: usize,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CategoryListing {
    pub category: CategorySummary,
    pub activities: Vec<ActivityRecord>,
}

/// `POST /api/recommendations`
pub async fn recommendations_handler(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected recommendation payload: {}", rejection.body_text());
        ApiError::MalformedPayload(rejection.body_text())
    })?;

    let recommendations = state.service.recommend(&request).await?;
    Ok(Json(RecommendationResponse { recommendations }))
}

/// `GET /api/categories`
pub async fn categories_handler(State(state): State<AppState>) -> Json<Vec<CategorySummary>> {
    Json(state.catalog.categories())
}

/// `GET /api/categories/:slug`
pub async fn category_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CategoryListing>, ApiError> {
    let category = resolve_category(&slug)?;
    let activities: Vec<ActivityRecord> = state
        .catalog
        .by_category(category)
        .into_iter()
        .cloned()
        .collect();
    info!("Listing {} activities for '{}'", activities.len(), slug);

    let summary = state
        .catalog
        .categories()
        .into_iter()
        .find(|c| c.slug == slug)
        .ok_or(ApiError::NotFound("Категория не найдена"))?;

    Ok(Json(CategoryListing {
        category: summary,
        activities,
    }))
}

/// `GET /api/categories/:slug/:id`
pub async fn category_activity_handler(
    State(state): State<AppState>,
    Path((slug, id)): Path<(String, String)>,
) -> Result<Json<ActivityRecord>, ApiError> {
    let category = resolve_category(&slug)?;
    state
        .catalog
        .find(category, &id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("Соревнование не найдено"))
}

/// `GET /api/activities/:id`
pub async fn activity_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ActivityRecord>, ApiError> {
    state
        .catalog
        .find_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or(ApiError::NotFound("Соревнование не найдено"))
}

/// `GET /healthz`
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        activities: state.catalog.len(),
        loaded_at: state.catalog.loaded_at(),
    })
}

fn resolve_category(slug: &str) -> Result<Category, ApiError> {
    Category::from_slug(slug).ok_or(ApiError::NotFound("Категория не найдена"))
}
