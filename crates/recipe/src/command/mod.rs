use std::collections::HashSet;

use foodgram_db::table::{Ingredient, Recipe, RecipeIngredient, RecipeTag, Tag};
use sea_query::{
    Alias, Expr, ExprTrait, IntoColumnRef, IntoTableRef, Query, SqliteQueryBuilder,
};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqliteConnection, prelude::FromRow};
use validator::Validate;

use crate::{DecodedImage, ImageStore, input::Payload};

mod create;
mod delete;
mod update;

pub const MIN_COOKING_TIME: i64 = 1;
pub const MAX_COOKING_TIME: i64 = 2880;
pub const MIN_AMOUNT: i64 = 1;
/// Keeps shopping list sums far away from `i64` overflow.
pub const MAX_AMOUNT: i64 = 32767;

#[derive(Clone)]
pub struct Command {
    pub state: foodgram_shared::State,
    pub images: ImageStore,
}

/// A payload that passed every rule, ready to be written.
pub(crate) struct Checked {
    pub tags: Vec<String>,
    pub lines: Vec<(String, i64)>,
    pub image: Option<DecodedImage>,
    pub name: String,
    pub description: String,
    pub cooking_time: i64,
}

#[derive(FromRow)]
struct IdRow {
    id: String,
}

impl Command {
    pub fn new(state: foodgram_shared::State, images: ImageStore) -> Self {
        Self { state, images }
    }

    pub(crate) async fn author_of(
        conn: &mut SqliteConnection,
        id: &str,
    ) -> foodgram_shared::Result<String> {
        let statement = Query::select()
            .column(Recipe::AuthorId)
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some((author_id,)) = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(conn)
            .await?
        else {
            foodgram_shared::not_found!("recipe {id}");
        };

        Ok(author_id)
    }

    async fn existing_ids<T, C>(
        conn: &mut SqliteConnection,
        table: T,
        column: C,
        ids: Vec<String>,
    ) -> foodgram_shared::Result<HashSet<String>>
    where
        T: IntoTableRef,
        C: IntoColumnRef + Clone,
    {
        let statement = Query::select()
            .expr_as(Expr::col(column.clone()), Alias::new("id"))
            .from(table)
            .and_where(Expr::col(column).is_in(ids))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, IdRow, _>(&sql, values)
            .fetch_all(conn)
            .await?;

        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    /// Checks run in a fixed order so the first reported error is stable:
    /// tags, ingredient lines, cooking time, scalar fields, image.
    pub(crate) async fn check(
        conn: &mut SqliteConnection,
        payload: Payload,
    ) -> foodgram_shared::Result<Checked> {
        if payload.tags.is_empty() {
            foodgram_shared::bail!("at least one tag is required");
        }

        let mut seen = HashSet::new();
        if !payload.tags.iter().all(|id| seen.insert(id)) {
            foodgram_shared::bail!("tags must not repeat");
        }

        let known =
            Self::existing_ids(&mut *conn, Tag::Table, Tag::Id, payload.tags.clone()).await?;
        if let Some(id) = payload.tags.iter().find(|id| !known.contains(*id)) {
            foodgram_shared::not_found!("tag {id}");
        }

        if payload.ingredients.is_empty() {
            foodgram_shared::bail!("at least one ingredient is required");
        }

        let ids = payload
            .ingredients
            .iter()
            .map(|line| line.id.to_owned())
            .collect::<Vec<_>>();
        let known =
            Self::existing_ids(&mut *conn, Ingredient::Table, Ingredient::Id, ids).await?;

        let mut lines: Vec<(String, i64)> = Vec::with_capacity(payload.ingredients.len());
        for line in payload.ingredients.iter() {
            if !known.contains(&line.id) {
                foodgram_shared::not_found!("ingredient {}", line.id);
            }

            let Some(amount) = line.amount.to_i64() else {
                foodgram_shared::bail!("ingredient amount must be an integer");
            };

            if amount < MIN_AMOUNT {
                foodgram_shared::bail!("ingredient amount must be at least {MIN_AMOUNT}");
            }

            if amount > MAX_AMOUNT {
                foodgram_shared::bail!("ingredient amount must be at most {MAX_AMOUNT}");
            }

            if lines.iter().any(|(id, _)| id == &line.id) {
                foodgram_shared::bail!("ingredients must not repeat");
            }

            lines.push((line.id.to_owned(), amount));
        }

        let Some(cooking_time) = payload.cooking_time.to_i64() else {
            foodgram_shared::bail!("cooking time must be an integer");
        };

        if !(MIN_COOKING_TIME..=MAX_COOKING_TIME).contains(&cooking_time) {
            foodgram_shared::bail!(
                "cooking time must be between {MIN_COOKING_TIME} and {MAX_COOKING_TIME} minutes"
            );
        }

        payload.validate()?;

        let image = match payload.image.as_deref() {
            Some(value) => Some(crate::decode_data_uri(value)?),
            None => None,
        };

        Ok(Checked {
            tags: payload.tags,
            lines,
            image,
            name: payload.name,
            description: payload.description,
            cooking_time,
        })
    }

    /// Replaces tag links and ingredient lines of `recipe_id`.
    pub(crate) async fn write_links(
        conn: &mut SqliteConnection,
        recipe_id: &str,
        checked: &Checked,
    ) -> foodgram_shared::Result<()> {
        let statements = [
            Query::delete()
                .from_table(RecipeIngredient::Table)
                .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
                .to_owned(),
            Query::delete()
                .from_table(RecipeTag::Table)
                .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
                .to_owned(),
        ];

        for statement in statements {
            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *conn).await?;
        }

        let mut statement = Query::insert()
            .into_table(RecipeTag::Table)
            .columns([RecipeTag::RecipeId, RecipeTag::TagId])
            .to_owned();

        for tag_id in checked.tags.iter() {
            statement.values_panic([recipe_id.into(), tag_id.to_owned().into()]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;

        let mut statement = Query::insert()
            .into_table(RecipeIngredient::Table)
            .columns([
                RecipeIngredient::RecipeId,
                RecipeIngredient::IngredientId,
                RecipeIngredient::Amount,
                RecipeIngredient::Position,
            ])
            .to_owned();

        for (position, (ingredient_id, amount)) in checked.lines.iter().enumerate() {
            statement.values_panic([
                recipe_id.into(),
                ingredient_id.to_owned().into(),
                (*amount).into(),
                (position as i64).into(),
            ]);
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&mut *conn).await?;

        Ok(())
    }
}
