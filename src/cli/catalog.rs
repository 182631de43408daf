use foodgram_catalog::{AddIngredientInput, AddTagInput, Command};

use crate::config::Config;

pub async fn add_tag(
    config: &Config,
    name: String,
    color: String,
    slug: String,
) -> anyhow::Result<()> {
    let command = Command(super::command_state(config).await?);
    let id = command.add_tag(AddTagInput { name, color, slug }).await?;

    tracing::info!("tag {id} added");

    Ok(())
}

pub async fn add_ingredient(
    config: &Config,
    name: String,
    measurement_unit: String,
) -> anyhow::Result<()> {
    let command = Command(super::command_state(config).await?);
    let id = command
        .add_ingredient(AddIngredientInput {
            name,
            measurement_unit,
        })
        .await?;

    tracing::info!("ingredient {id} added");

    Ok(())
}
