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

#[allow(dead_code)]
pub async fn add_ingredients(
    state: &State,
    items: impl IntoIterator<Item = (&'static str, &'static str)>,
) -> anyhow::Result<Vec<String>> {
    let command = foodgram_catalog::Command(state.clone());
    let mut ids = vec![];
    for (name, unit) in items {
        ids.push(
            command
                .add_ingredient(foodgram_catalog::AddIngredientInput {
                    name: name.to_owned(),
                    measurement_unit: unit.to_owned(),
                })
                .await?,
        );
    }

    Ok(ids)
}
