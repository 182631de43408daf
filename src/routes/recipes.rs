use axum::{
    Json,
    extract::{Path, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::IntoResponse,
};
use axum_extra::extract::{Query, WithRejection};
use foodgram_recipe::{
    CreateInput, RecipeFilter, RecipeView, Relation, ShortRecipeView, UpdateInput,
};
use foodgram_shared::Error;
use serde::Deserialize;

use crate::{auth::AuthUser, error::AppError, routes::AppState};

#[derive(Deserialize)]
pub struct ListParams {
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "true" | "True"))
}

impl From<ListParams> for RecipeFilter {
    fn from(value: ListParams) -> Self {
        Self {
            is_favorited: flag(value.is_favorited.as_deref()),
            is_in_shopping_cart: flag(value.is_in_shopping_cart.as_deref()),
            author: value.author.filter(|author| !author.is_empty()),
            tags: value.tags,
        }
    }
}

async fn recipe_view(
    state: &AppState,
    id: &str,
    viewer: &str,
) -> Result<RecipeView, AppError> {
    match state.recipes.find(id, Some(viewer)).await? {
        Some(recipe) => Ok(recipe),
        None => Err(Error::NotFound(format!("recipe {id}")).into()),
    }
}

/// GET /api/recipes - newest first
pub async fn list(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListParams>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = user.as_ref().map(AuthUser::id);
    let recipes = state.recipes.list(params.into(), viewer).await?;

    Ok(Json(recipes))
}

pub async fn detail(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = user.as_ref().map(AuthUser::id);
    let Some(recipe) = state.recipes.find(&id, viewer).await? else {
        return Err(Error::NotFound(format!("recipe {id}")).into());
    };

    Ok(Json(recipe))
}

pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<CreateInput>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.recipe_command.create(input, user.id()).await?;
    let recipe = recipe_view(&state, &id, user.id()).await?;

    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateInput>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    state.recipe_command.update(&id, input, user.id()).await?;
    let recipe = recipe_view(&state, &id, user.id()).await?;

    Ok(Json(recipe))
}

pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.recipe_command.delete(&id, user.id()).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn add_relation(
    state: &AppState,
    relation: Relation,
    id: &str,
    user: &AuthUser,
) -> Result<(StatusCode, Json<ShortRecipeView>), AppError> {
    state
        .recipe_command
        .add_relation(relation, id, user.id())
        .await?;

    let Some(recipe) = state.recipes.find_short(id).await? else {
        return Err(Error::NotFound(format!("recipe {id}")).into());
    };

    Ok((StatusCode::CREATED, Json(recipe)))
}

pub async fn add_favorite(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    add_relation(&state, Relation::Favorite, &id, &user).await
}

pub async fn remove_favorite(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .recipe_command
        .remove_relation(Relation::Favorite, &id, user.id())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_to_cart(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    add_relation(&state, Relation::ShoppingCart, &id, &user).await
}

pub async fn remove_from_cart(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .recipe_command
        .remove_relation(Relation::ShoppingCart, &id, user.id())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/recipes/download_shopping_cart - plain text attachment
pub async fn download_shopping_cart(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let list = state.shopping.build(user.id()).await?;
    let body = list.render()?;

    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename={}", list.file_name()),
            ),
        ],
        body,
    ))
}
