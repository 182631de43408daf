use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{error::AppError, routes::AppState};

#[derive(Deserialize)]
pub struct SearchParams {
    pub name: Option<String>,
}

/// GET /api/ingredients?name= - prefix matches ranked first
pub async fn list(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<SearchParams>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let ingredients = state
        .catalog
        .search_ingredients(params.name.as_deref())
        .await?;

    Ok(Json(ingredients))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    match state.catalog.find_ingredient(&id).await? {
        Some(ingredient) => Ok(Json(ingredient)),
        None => Err(foodgram_shared::Error::NotFound(format!("ingredient {id}")).into()),
    }
}
