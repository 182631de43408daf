use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::AppError, routes::AppState};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.catalog.list_tags().await?))
}

pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let Some(tag) = state.catalog.find_tag(&id).await? else {
        return Err(foodgram_shared::Error::NotFound(format!("tag {id}")).into());
    };

    Ok(Json(tag))
}
