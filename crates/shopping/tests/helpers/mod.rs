use std::{path::PathBuf, str::FromStr};

use foodgram_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;

    Ok(State::single(pool))
}

pub async fn create_user(state: &State, name: &str) -> anyhow::Result<String> {
    Ok(foodgram_user::Command(state.clone())
        .register(foodgram_user::RegisterInput {
            email: format!("{name}@foodgram.localhost"),
            username: name.to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            password: "my_password".to_owned(),
        })
        .await?)
}

pub async fn add_tag(state: &State) -> anyhow::Result<String> {
    Ok(foodgram_catalog::Command(state.clone())
        .add_tag(foodgram_catalog::AddTagInput {
            name: "dinner".to_owned(),
            color: "#8775D2".to_owned(),
            slug: "dinner".to_owned(),
        })
        .await?)
}

pub async fn add_ingredient(state: &State, name: &str, unit: &str) -> anyhow::Result<String> {
    Ok(foodgram_catalog::Command(state.clone())
        .add_ingredient(foodgram_catalog::AddIngredientInput {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        })
        .await?)
}

pub fn recipe(tag: &str, lines: &[(&str, i64)]) -> foodgram_recipe::CreateInput {
    foodgram_recipe::CreateInput {
        tags: vec![tag.to_owned()],
        ingredients: lines
            .iter()
            .map(|(id, amount)| foodgram_recipe::IngredientAmount {
                id: id.to_string(),
                amount: (*amount).into(),
            })
            .collect(),
        image: "data:image/png;base64,iVBORw0KGgo=".to_owned(),
        name: "Recipe".to_owned(),
        description: "Cook it".to_owned(),
        cooking_time: 10.into(),
    }
}
