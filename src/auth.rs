use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use foodgram_user::UserView;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::JwtConfig, error::AppError, routes::AppState};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
}

pub fn generate_token(config: &JwtConfig, sub: impl Into<String>) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + config.expiration_days as u64 * 24 * 60 * 60,
        iat: now,
        iss: config.issuer.to_owned(),
        sub: sub.into(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Returns the user id the token was issued for.
pub fn verify_token(
    config: &JwtConfig,
    token: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(data.claims.sub)
}

/// The requester, from an `Authorization: Bearer <jwt>` header. Rejects with 401.
pub struct AuthUser(pub UserView);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            <TypedHeader<Authorization<Bearer>> as FromRequestParts<AppState>>::from_request_parts(
                parts, state,
            )
            .await
            .map_err(|_| foodgram_shared::Error::Unauthenticated)?;

        let user_id = verify_token(&state.config.jwt, bearer.token()).map_err(|err| {
            tracing::debug!(err = %err, "rejected token");
            foodgram_shared::Error::Unauthenticated
        })?;

        let Some(user) = state.users.find(&user_id, None).await? else {
            return Err(foodgram_shared::Error::Unauthenticated.into());
        };

        Ok(AuthUser(user))
    }
}

/// Anonymous when no `Authorization` header is sent, a bad token is still a 401.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(None);
        }

        Ok(Some(
            <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?,
        ))
    }
}
