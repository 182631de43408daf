use std::collections::{HashMap, HashSet};

use foodgram_catalog::TagRow;
use foodgram_db::table::{Ingredient, Recipe, RecipeIngredient, RecipeTag, Tag};
use foodgram_user::UserView;
use sea_query::{Expr, ExprTrait, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

use crate::Relation;

mod subscription;

pub use subscription::*;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientLineView {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeView {
    pub id: String,
    pub tags: Vec<TagRow>,
    pub author: UserView,
    pub ingredients: Vec<IngredientLineView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub description: String,
    pub cooking_time: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ShortRecipeView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

/// List predicates. `is_favorited` and `is_in_shopping_cart` only apply
/// when a viewer is known.
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub author: Option<String>,
    /// Tag slugs, a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

#[derive(FromRow)]
struct RecipeRow {
    id: String,
    author_id: String,
    name: String,
    image: String,
    description: String,
    cooking_time: i64,
}

#[derive(FromRow)]
struct RecipeTagRow {
    recipe_id: String,
    id: String,
    name: String,
    color: String,
    slug: String,
}

#[derive(FromRow)]
struct RecipeIngredientRow {
    recipe_id: String,
    id: String,
    name: String,
    measurement_unit: String,
    amount: i64,
}

#[derive(Clone)]
pub struct Query {
    pub pool: SqlitePool,
    /// Public prefix of stored media, e.g. `/media`.
    pub media_url: String,
}

impl Query {
    pub fn new(pool: SqlitePool, media_url: impl Into<String>) -> Self {
        Self {
            pool,
            media_url: media_url.into(),
        }
    }

    pub(crate) fn image_url(&self, path: &str) -> String {
        if path.is_empty() {
            return String::new();
        }

        format!("{}/{}", self.media_url.trim_end_matches('/'), path)
    }

    fn select() -> SelectStatement {
        sea_query::Query::select()
            .columns([
                Recipe::Id,
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Image,
                Recipe::Description,
                Recipe::CookingTime,
            ])
            .from(Recipe::Table)
            .to_owned()
    }

    fn relation_subquery(relation: Relation, user_id: &str) -> SelectStatement {
        sea_query::Query::select()
            .column(relation.recipe_id())
            .from(relation.table())
            .and_where(Expr::col(relation.user_id()).eq(user_id))
            .to_owned()
    }

    /// Newest first.
    pub async fn list(
        &self,
        filter: RecipeFilter,
        viewer: Option<&str>,
    ) -> anyhow::Result<Vec<RecipeView>> {
        let mut statement = Self::select();

        if let Some(author) = filter.author {
            statement.and_where(Expr::col(Recipe::AuthorId).eq(author));
        }

        if !filter.tags.is_empty() {
            statement.and_where(
                Expr::col(Recipe::Id).in_subquery(
                    sea_query::Query::select()
                        .column((RecipeTag::Table, RecipeTag::RecipeId))
                        .from(RecipeTag::Table)
                        .inner_join(
                            Tag::Table,
                            Expr::col((Tag::Table, Tag::Id))
                                .equals((RecipeTag::Table, RecipeTag::TagId)),
                        )
                        .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(filter.tags))
                        .to_owned(),
                ),
            );
        }

        if let Some(viewer) = viewer {
            if filter.is_favorited {
                statement.and_where(
                    Expr::col(Recipe::Id)
                        .in_subquery(Self::relation_subquery(Relation::Favorite, viewer)),
                );
            }

            if filter.is_in_shopping_cart {
                statement.and_where(
                    Expr::col(Recipe::Id)
                        .in_subquery(Self::relation_subquery(Relation::ShoppingCart, viewer)),
                );
            }
        }

        statement
            .order_by(Recipe::PubDate, Order::Desc)
            .order_by_expr(Expr::cust("rowid"), Order::Desc);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        self.hydrate(rows, viewer).await
    }

    pub async fn find(
        &self,
        id: impl Into<String>,
        viewer: Option<&str>,
    ) -> anyhow::Result<Option<RecipeView>> {
        let statement = Self::select()
            .and_where(Expr::col(Recipe::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(row) = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![row], viewer).await?.pop())
    }

    pub async fn find_short(
        &self,
        id: impl Into<String>,
    ) -> anyhow::Result<Option<ShortRecipeView>> {
        let statement = sea_query::Query::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let recipe = sqlx::query_as_with::<_, ShortRecipeView, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(recipe.map(|mut recipe| {
            recipe.image = self.image_url(&recipe.image);
            recipe
        }))
    }

    async fn hydrate(
        &self,
        rows: Vec<RecipeRow>,
        viewer: Option<&str>,
    ) -> anyhow::Result<Vec<RecipeView>> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids = rows.iter().map(|row| row.id.to_owned()).collect::<Vec<_>>();

        let statement = sea_query::Query::select()
            .column((RecipeTag::Table, RecipeTag::RecipeId))
            .columns([
                (Tag::Table, Tag::Id),
                (Tag::Table, Tag::Name),
                (Tag::Table, Tag::Color),
                (Tag::Table, Tag::Slug),
            ])
            .from(RecipeTag::Table)
            .inner_join(
                Tag::Table,
                Expr::col((Tag::Table, Tag::Id)).equals((RecipeTag::Table, RecipeTag::TagId)),
            )
            .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).is_in(ids.clone()))
            .order_by((Tag::Table, Tag::Name), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut tags: HashMap<String, Vec<TagRow>> = HashMap::new();
        for row in sqlx::query_as_with::<_, RecipeTagRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?
        {
            tags.entry(row.recipe_id).or_default().push(TagRow {
                id: row.id,
                name: row.name,
                color: row.color,
                slug: row.slug,
            });
        }

        let statement = sea_query::Query::select()
            .column((RecipeIngredient::Table, RecipeIngredient::RecipeId))
            .columns([
                (Ingredient::Table, Ingredient::Id),
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::MeasurementUnit),
            ])
            .column((RecipeIngredient::Table, RecipeIngredient::Amount))
            .from(RecipeIngredient::Table)
            .inner_join(
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId)).is_in(ids.clone()),
            )
            .order_by(
                (RecipeIngredient::Table, RecipeIngredient::Position),
                Order::Asc,
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut lines: HashMap<String, Vec<IngredientLineView>> = HashMap::new();
        for row in sqlx::query_as_with::<_, RecipeIngredientRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?
        {
            lines
                .entry(row.recipe_id)
                .or_default()
                .push(IngredientLineView {
                    id: row.id,
                    name: row.name,
                    measurement_unit: row.measurement_unit,
                    amount: row.amount,
                });
        }

        let authors = foodgram_user::Query(self.pool.clone())
            .find_many(rows.iter().map(|row| row.author_id.to_owned()), viewer)
            .await?
            .into_iter()
            .map(|user| (user.id.to_owned(), user))
            .collect::<HashMap<_, _>>();

        let (favorites, cart) = match viewer {
            Some(viewer) => (
                self.related(Relation::Favorite, viewer, &ids).await?,
                self.related(Relation::ShoppingCart, viewer, &ids).await?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        let mut recipes = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(author) = authors.get(&row.author_id).cloned() else {
                anyhow::bail!("author {} of recipe {} not found", row.author_id, row.id);
            };

            recipes.push(RecipeView {
                tags: tags.remove(&row.id).unwrap_or_default(),
                ingredients: lines.remove(&row.id).unwrap_or_default(),
                is_favorited: favorites.contains(&row.id),
                is_in_shopping_cart: cart.contains(&row.id),
                author,
                image: self.image_url(&row.image),
                id: row.id,
                name: row.name,
                description: row.description,
                cooking_time: row.cooking_time,
            });
        }

        Ok(recipes)
    }

    async fn related(
        &self,
        relation: Relation,
        user_id: &str,
        ids: &[String],
    ) -> anyhow::Result<HashSet<String>> {
        let statement = Self::relation_subquery(relation, user_id)
            .and_where(Expr::col(relation.recipe_id()).is_in(ids.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
