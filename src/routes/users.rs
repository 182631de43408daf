use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use foodgram_shared::Error;
use foodgram_user::{RegisterInput, UserView};
use serde::{Deserialize, Serialize};

use crate::{auth::AuthUser, error::AppError, routes::AppState};

/// The registration response, a [`UserView`] without the subscription flag.
#[derive(Serialize)]
pub struct RegisteredUser {
    pub email: String,
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserView> for RegisteredUser {
    fn from(value: UserView) -> Self {
        Self {
            email: value.email,
            id: value.id,
            username: value.username,
            first_name: value.first_name,
            last_name: value.last_name,
        }
    }
}

#[derive(Deserialize)]
pub struct SubscriptionParams {
    pub recipes_limit: Option<u32>,
}

pub async fn list(
    user: Option<AuthUser>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = user.as_ref().map(AuthUser::id);

    Ok(Json(state.users.list(viewer).await?))
}

pub async fn detail(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let viewer = user.as_ref().map(AuthUser::id);
    let Some(found) = state.users.find(&id, viewer).await? else {
        return Err(Error::NotFound(format!("user {id}")).into());
    };

    Ok(Json(found))
}

pub async fn me(user: AuthUser) -> impl IntoResponse {
    Json(user.0)
}

pub async fn create(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<RegisterInput>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.user_command.register(input).await?;
    let Some(user) = state.users.find(&id, None).await? else {
        return Err(Error::NotFound(format!("user {id}")).into());
    };

    Ok((StatusCode::CREATED, Json(RegisteredUser::from(user))))
}

/// GET /api/users/subscriptions?recipes_limit=
pub async fn subscriptions(
    user: AuthUser,
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<SubscriptionParams>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let subscriptions = state
        .recipes
        .subscriptions(user.id(), params.recipes_limit)
        .await?;

    Ok(Json(subscriptions))
}

pub async fn subscribe(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Query(params), _): WithRejection<Query<SubscriptionParams>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    state.user_command.subscribe(user.id(), &id).await?;

    let Some(subscription) = state
        .recipes
        .subscription(&id, user.id(), params.recipes_limit)
        .await?
    else {
        return Err(Error::NotFound(format!("user {id}")).into());
    };

    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn unsubscribe(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.user_command.unsubscribe(user.id(), &id).await?;

    Ok(StatusCode::NO_CONTENT)
}
