use std::{path::PathBuf, str::FromStr};

use foodgram_shared::State;
use foodgram_user::RegisterInput;
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
pub fn register_input(name: &str) -> RegisterInput {
    RegisterInput {
        email: format!("{name}@foodgram.localhost"),
        username: name.to_owned(),
        first_name: name.to_owned(),
        last_name: "Tester".to_owned(),
        password: "my_password".to_owned(),
    }
}

#[allow(dead_code)]
pub async fn create_users(
    state: &State,
    names: impl IntoIterator<Item = &'static str>,
) -> anyhow::Result<Vec<String>> {
    let command = foodgram_user::Command(state.clone());

    let mut ids = vec![];
    for name in names {
        ids.push(command.register(register_input(name)).await?);
    }

    Ok(ids)
}
