use askama::Template;
use foodgram_db::table::{Ingredient, RecipeIngredient, ShoppingCart};
use sea_query::{Alias, Expr, ExprTrait, Func, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::{Date, OffsetDateTime, macros::format_description};

/// One line of the list: an ingredient summed over every recipe in the cart.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone)]
pub struct ShoppingList {
    pub owner: String,
    pub username: String,
    pub date: Date,
    pub items: Vec<ShoppingItem>,
}

#[derive(Template)]
#[template(path = "shopping_list.txt")]
struct ShoppingListTemplate<'a> {
    owner: &'a str,
    date: String,
    year: i32,
    items: &'a [ShoppingItem],
}

impl ShoppingList {
    pub fn render(&self) -> anyhow::Result<String> {
        let template = ShoppingListTemplate {
            owner: &self.owner,
            date: self.date.format(format_description!("[year]-[month]-[day]"))?,
            year: self.date.year(),
            items: &self.items,
        };

        Ok(template.render()?)
    }

    pub fn file_name(&self) -> String {
        format!("{}_shopping_list.txt", self.username)
    }
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    /// Sums ingredient amounts across the user's cart, grouped by
    /// (name, measurement unit) and ordered by name then unit.
    pub async fn build(&self, user_id: &str) -> foodgram_shared::Result<ShoppingList> {
        let Some(owner) = foodgram_user::Query(self.0.clone())
            .find(user_id, None)
            .await?
        else {
            foodgram_shared::not_found!("user {user_id}");
        };

        let statement = sea_query::Query::select()
            .expr(Func::count(Expr::col(ShoppingCart::RecipeId)))
            .from(ShoppingCart::Table)
            .and_where(Expr::col(ShoppingCart::UserId).eq(user_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (in_cart,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.0)
            .await?;

        if in_cart == 0 {
            foodgram_shared::bail!("shopping cart is empty");
        }

        let statement = sea_query::Query::select()
            .column((Ingredient::Table, Ingredient::Name))
            .column((Ingredient::Table, Ingredient::MeasurementUnit))
            .expr_as(
                Func::sum(Expr::col((RecipeIngredient::Table, RecipeIngredient::Amount))),
                Alias::new("amount"),
            )
            .from(ShoppingCart::Table)
            .inner_join(
                RecipeIngredient::Table,
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .equals((ShoppingCart::Table, ShoppingCart::RecipeId)),
            )
            .inner_join(
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id))
            .group_by_col((Ingredient::Table, Ingredient::Name))
            .group_by_col((Ingredient::Table, Ingredient::MeasurementUnit))
            .order_by((Ingredient::Table, Ingredient::Name), Order::Asc)
            .order_by((Ingredient::Table, Ingredient::MeasurementUnit), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let items = sqlx::query_as_with::<_, ShoppingItem, _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        tracing::debug!(user = user_id, items = items.len(), "shopping list built");

        Ok(ShoppingList {
            owner: owner.full_name(),
            username: owner.username,
            date: OffsetDateTime::now_utc().date(),
            items,
        })
    }
}
