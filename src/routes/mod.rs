use axum::{
    Router,
    routing::{get, post},
};

mod health;
mod ingredients;
mod recipes;
mod tags;
mod users;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub catalog: foodgram_catalog::Query,
    pub users: foodgram_user::Query,
    pub user_command: foodgram_user::Command,
    pub recipes: foodgram_recipe::Query,
    pub recipe_command: foodgram_recipe::Command,
    pub shopping: foodgram_shopping::Query,
}

impl AppState {
    pub fn new(config: crate::config::Config, state: foodgram_shared::State) -> Self {
        let images = foodgram_recipe::ImageStore::new(&config.media.root);
        let read_db = state.read_db.clone();

        Self {
            catalog: foodgram_catalog::Query(read_db.clone()),
            users: foodgram_user::Query(read_db.clone()),
            user_command: foodgram_user::Command(state.clone()),
            recipes: foodgram_recipe::Query::new(read_db.clone(), &config.media.url),
            recipe_command: foodgram_recipe::Command::new(state, images),
            shopping: foodgram_shopping::Query(read_db),
            config,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/ingredients", get(ingredients::list))
        .route("/ingredients/{id}", get(ingredients::detail))
        .route("/tags", get(tags::list))
        .route("/tags/{id}", get(tags::detail))
        .route("/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/recipes/download_shopping_cart",
            get(recipes::download_shopping_cart),
        )
        .route(
            "/recipes/{id}",
            get(recipes::detail)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route(
            "/recipes/{id}/favorite",
            post(recipes::add_favorite).delete(recipes::remove_favorite),
        )
        .route(
            "/recipes/{id}/shopping_cart",
            post(recipes::add_to_cart).delete(recipes::remove_from_cart),
        )
        .route("/users", get(users::list).post(users::create))
        .route("/users/me", get(users::me))
        .route("/users/subscriptions", get(users::subscriptions))
        .route("/users/{id}", get(users::detail))
        .route(
            "/users/{id}/subscribe",
            post(users::subscribe).delete(users::unsubscribe),
        );

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.users.0.clone())
        .nest("/api", api)
        .with_state(app_state)
}
