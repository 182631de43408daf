use std::sync::LazyLock;

use foodgram_db::table::{Ingredient, Tag};
use regex::Regex;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

static RE_HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").unwrap());
static RE_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap());

#[derive(Validate, Clone)]
pub struct AddIngredientInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 15))]
    pub measurement_unit: String,
}

#[derive(Validate, Clone)]
pub struct AddTagInput {
    #[validate(length(min = 1, max = 16))]
    pub name: String,
    #[validate(regex(path = *RE_HEX_COLOR, message = "The value is not a HEX color."))]
    pub color: String,
    #[validate(length(min = 1, max = 200), regex(path = *RE_SLUG))]
    pub slug: String,
}

/// Write side of the reference catalog. Entries are immutable once added.
#[derive(Clone)]
pub struct Command(pub foodgram_shared::State);

impl Command {
    pub async fn add_ingredient(
        &self,
        input: AddIngredientInput,
    ) -> foodgram_shared::Result<String> {
        let input = AddIngredientInput {
            name: input.name.trim().to_owned(),
            measurement_unit: input.measurement_unit.trim().to_owned(),
        };
        input.validate()?;

        let id = foodgram_shared::new_id();
        let name = input.name.to_owned();
        let statement = Query::insert()
            .into_table(Ingredient::Table)
            .columns([
                Ingredient::Id,
                Ingredient::Name,
                Ingredient::MeasurementUnit,
                Ingredient::SearchName,
            ])
            .values_panic([
                id.to_owned().into(),
                name.to_owned().into(),
                input.measurement_unit.to_owned().into(),
                name.to_lowercase().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await
            .map_err(|err| match foodgram_shared::Error::from(err) {
                foodgram_shared::Error::Conflict(_) => foodgram_shared::Error::Conflict(format!(
                    "ingredient {} ({}) already exists",
                    name, input.measurement_unit
                )),
                err => err,
            })?;

        tracing::debug!(ingredient = id, name, "ingredient added");

        Ok(id)
    }

    pub async fn add_tag(&self, input: AddTagInput) -> foodgram_shared::Result<String> {
        let input = AddTagInput {
            name: input.name.trim().to_owned(),
            color: input.color.trim().to_owned(),
            slug: input.slug.trim().to_owned(),
        };
        input.validate()?;

        let id = foodgram_shared::new_id();
        let statement = Query::insert()
            .into_table(Tag::Table)
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .values_panic([
                id.to_owned().into(),
                input.name.to_owned().into(),
                input.color.to_owned().into(),
                input.slug.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        sqlx::query_with(&sql, values)
            .execute(&self.0.write_db)
            .await
            .map_err(|err| match foodgram_shared::Error::from(err) {
                foodgram_shared::Error::Conflict(_) => foodgram_shared::Error::Conflict(
                    "a tag with the same name, color or slug already exists".to_owned(),
                ),
                err => err,
            })?;

        tracing::debug!(tag = id, slug = input.slug, "tag added");

        Ok(id)
    }
}
