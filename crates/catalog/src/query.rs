use foodgram_db::table::{Ingredient, Tag};
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct IngredientRow {
    pub id: String,
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct TagRow {
    pub id: String,
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    /// Ingredients whose name contains `name` (case-insensitive), prefix
    /// matches first and insertion order within each group.
    pub async fn search_ingredients(
        &self,
        name: Option<&str>,
    ) -> anyhow::Result<Vec<IngredientRow>> {
        let needle = name.map(|n| n.trim().to_lowercase()).unwrap_or_default();

        let mut statement = sea_query::Query::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .to_owned();

        // SQLite LIKE/LOWER only fold ASCII, search_name is lowered on insert.
        if !needle.is_empty() {
            statement
                .and_where(Expr::cust_with_values(
                    "instr(search_name, ?) > 0",
                    [needle.to_owned()],
                ))
                .order_by_expr(
                    Expr::cust_with_values("instr(search_name, ?) = 1", [needle]),
                    Order::Desc,
                );
        }

        statement.order_by_expr(Expr::cust("rowid"), Order::Asc);

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_ingredient(
        &self,
        id: impl Into<String>,
    ) -> anyhow::Result<Option<IngredientRow>> {
        let statement = sea_query::Query::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }

    pub async fn list_tags(&self) -> anyhow::Result<Vec<TagRow>> {
        let statement = sea_query::Query::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .order_by(Tag::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_all(&self.0)
            .await?)
    }

    pub async fn find_tag(&self, id: impl Into<String>) -> anyhow::Result<Option<TagRow>> {
        let statement = sea_query::Query::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).eq(id.into()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagRow, _>(&sql, values)
            .fetch_optional(&self.0)
            .await?)
    }
}
