use std::{path::PathBuf, str::FromStr};

use foodgram_recipe::{CreateInput, ImageStore, IngredientAmount, UpdateInput};
use foodgram_shared::State;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use temp_dir::TempDir;

pub const PHOTO: &str = "data:image/png;base64,iVBORw0KGgo=";

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    foodgram_db::migrate(&pool).await?;

    Ok(State::single(pool))
}

#[allow(dead_code)]
pub struct Fixture {
    pub state: State,
    pub media: PathBuf,
    pub command: foodgram_recipe::Command,
    pub query: foodgram_recipe::Query,
    pub users: Vec<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
}

/// Two users (ada, grace), tags breakfast/lunch/dinner and three ingredients.
pub async fn setup(dir: &TempDir) -> anyhow::Result<Fixture> {
    let state = setup_test_state(dir.child("db.sqlite3")).await?;
    let media = dir.child("media");

    let users_command = foodgram_user::Command(state.clone());
    let mut users = vec![];
    for name in ["ada", "grace"] {
        users.push(
            users_command
                .register(foodgram_user::RegisterInput {
                    email: format!("{name}@foodgram.localhost"),
                    username: name.to_owned(),
                    first_name: name.to_owned(),
                    last_name: "Tester".to_owned(),
                    password: "my_password".to_owned(),
                })
                .await?,
        );
    }

    let catalog = foodgram_catalog::Command(state.clone());
    let mut tags = vec![];
    for (name, color) in [
        ("breakfast", "#E26C2D"),
        ("lunch", "#49B64E"),
        ("dinner", "#8775D2"),
    ] {
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
    for (name, unit) in [("Salt", "g"), ("Flour", "g"), ("Milk", "ml")] {
        ingredients.push(
            catalog
                .add_ingredient(foodgram_catalog::AddIngredientInput {
                    name: name.to_owned(),
                    measurement_unit: unit.to_owned(),
                })
                .await?,
        );
    }

    Ok(Fixture {
        command: foodgram_recipe::Command::new(state.clone(), ImageStore::new(&media)),
        query: foodgram_recipe::Query::new(state.read_db.clone(), "/media"),
        state,
        media,
        users,
        tags,
        ingredients,
    })
}

#[allow(dead_code)]
pub fn create_input(
    name: &str,
    tags: &[&String],
    lines: &[(&String, i64)],
    cooking_time: i64,
) -> CreateInput {
    CreateInput {
        tags: tags.iter().map(|id| id.to_string()).collect(),
        ingredients: lines
            .iter()
            .map(|(id, amount)| IngredientAmount {
                id: id.to_string(),
                amount: (*amount).into(),
            })
            .collect(),
        image: PHOTO.to_owned(),
        name: name.to_owned(),
        description: format!("How to cook {name}"),
        cooking_time: cooking_time.into(),
    }
}

#[allow(dead_code)]
pub fn update_input(input: CreateInput) -> UpdateInput {
    UpdateInput {
        tags: input.tags,
        ingredients: input.ingredients,
        image: None,
        name: input.name,
        description: input.description,
        cooking_time: input.cooking_time,
    }
}
