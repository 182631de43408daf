#![allow(dead_code)]

use std::str::FromStr;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use foodgram::{
    AppState,
    config::{
        Config, DatabaseConfig, JwtConfig, MediaConfig, ObservabilityConfig, ServerConfig,
    },
};
use foodgram_shared::State;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const PHOTO: &str = "data:image/png;base64,iVBORw0KGgo=";

pub struct TestApp {
    pub router: Router,
    pub config: Config,
    pub state: State,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub fn test_config(dir: &TempDir) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        },
        database: DatabaseConfig {
            url: format!("sqlite:{}", dir.child("db.sqlite3").to_str().unwrap()),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            issuer: "foodgram".to_owned(),
            audience: "foodgram-api".to_owned(),
            expiration_days: 7,
        },
        media: MediaConfig {
            root: dir.child("media").to_str().unwrap().to_owned(),
            url: "/media".to_owned(),
        },
        observability: ObservabilityConfig::default(),
    }
}

/// Migrated database with tags breakfast/lunch and ingredients Salt g, Milk ml.
pub async fn setup(dir: &TempDir) -> anyhow::Result<TestApp> {
    let config = test_config(dir);
    let opts = SqliteConnectOptions::from_str(&config.database.url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;
    let state = State::single(pool);

    let catalog = foodgram_catalog::Command(state.clone());
    let mut tags = vec![];
    for (name, color) in [("breakfast", "#E26C2D"), ("lunch", "#49B64E")] {
        tags.push(
            catalog
                .add_tag(foodgram_catalog::AddTagInput {
                    name: name.to_owned(),
                    color: color.to_owned(),
                    slug: name.to_owned(),
                })
                .await?,
        );
    }

    let mut ingredients = vec![];
    for (name, unit) in [("Salt", "g"), ("Milk", "ml")] {
        ingredients.push(
            catalog
                .add_ingredient(foodgram_catalog::AddIngredientInput {
                    name: name.to_owned(),
                    measurement_unit: unit.to_owned(),
                })
                .await?,
        );
    }

    let router = foodgram::routes::router(AppState::new(config.clone(), state.clone()));

    Ok(TestApp {
        router,
        config,
        state,
        tags,
        ingredients,
    })
}

impl TestApp {
    /// Registers through the API and returns `(id, token)`.
    pub async fn register(&self, username: &str) -> anyhow::Result<(String, String)> {
        let res = self
            .send(
                Method::POST,
                "/api/users",
                None,
                Some(serde_json::json!({
                    "email": format!("{username}@foodgram.localhost"),
                    "username": username,
                    "first_name": username,
                    "last_name": "Tester",
                    "password": "my_password",
                })),
            )
            .await?;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.text());

        let id = res.json()["id"].as_str().unwrap().to_owned();
        let token = foodgram::auth::generate_token(&self.config.jwt, &id)?;

        Ok((id, token))
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await?.to_bytes().to_vec();

        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }

    pub async fn create_recipe(
        &self,
        token: &str,
        name: &str,
        amounts: &[i64],
    ) -> anyhow::Result<TestResponse> {
        let ingredients: Vec<Value> = self
            .ingredients
            .iter()
            .zip(amounts)
            .map(|(id, amount)| serde_json::json!({ "id": id, "amount": amount }))
            .collect();

        self.send(
            Method::POST,
            "/api/recipes",
            Some(token),
            Some(serde_json::json!({
                "tags": [self.tags[0]],
                "ingredients": ingredients,
                "image": PHOTO,
                "name": name,
                "description": "Mix everything.",
                "cooking_time": 10,
            })),
        )
        .await
    }
}
